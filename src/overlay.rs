use std::fmt::Write as _;

use crate::{
    config::Config,
    document::StrokeDocument,
    error::{KakijunError, KakijunResult},
    timeline::{Stroke, StrokeState},
};

/// Serialize one frame's stroke states into a standalone SVG document.
///
/// Layer order, bottom to top, mirrors the animated original: a border layer
/// under everything, the unfilled stroke shapes, the animated fill, and the
/// brush tip on top. The brush border sits behind or in front of the
/// unfilled layer depending on configuration. Hidden elements are omitted
/// outright instead of being styled invisible.
pub fn frame_svg(
    doc: &StrokeDocument,
    strokes: &[Stroke],
    states: &[StrokeState],
    cfg: &Config,
) -> KakijunResult<String> {
    if strokes.len() != doc.strokes.len() || states.len() != doc.strokes.len() {
        return Err(KakijunError::render(format!(
            "stroke/state count mismatch: {} paths, {} strokes, {} states",
            doc.strokes.len(),
            strokes.len(),
            states.len()
        )));
    }

    let vb = doc.view_box;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        vb.min_x, vb.min_y, vb.width, vb.height
    );

    // Border layer: every stroke outline, always visible.
    open_layer(
        &mut out,
        "border",
        &cfg.stroke.border_color,
        cfg.stroke.border_width,
    );
    for path in &doc.strokes {
        let _ = writeln!(
            out,
            r#"    <path id="{}" d="{}"/>"#,
            xml_escape(&path.id),
            xml_escape(&path.d)
        );
    }
    close_layer(&mut out);

    if cfg.brush.show && !cfg.brush.front_border {
        brush_border_layer(&mut out, doc, strokes, states, cfg);
    }

    // Unfilled layer: the light "still to be drawn" shapes; gone once drawn.
    open_layer(
        &mut out,
        "bg",
        &cfg.stroke.unfilled_color,
        cfg.stroke.unfilled_width,
    );
    for (path, state) in doc.strokes.iter().zip(states) {
        if !matches!(state, StrokeState::Complete) {
            let _ = writeln!(
                out,
                r#"    <path id="{}-bg" d="{}"/>"#,
                xml_escape(&path.id),
                xml_escape(&path.d)
            );
        }
    }
    close_layer(&mut out);

    if cfg.brush.show && cfg.brush.front_border {
        brush_border_layer(&mut out, doc, strokes, states, cfg);
    }

    // Animated layer: completed strokes in their final color, the in-flight
    // stroke partially revealed through its dash window.
    open_layer(
        &mut out,
        "anim",
        &cfg.stroke.filled_color,
        cfg.stroke.filled_width,
    );
    for ((path, stroke), state) in doc.strokes.iter().zip(strokes).zip(states) {
        match *state {
            StrokeState::Pending => {}
            StrokeState::Complete => {
                let _ = writeln!(
                    out,
                    r#"    <path id="{}-anim" d="{}"/>"#,
                    xml_escape(&path.id),
                    xml_escape(&path.d)
                );
            }
            StrokeState::Drawing { dash_offset, .. } => {
                let len = stroke.length.max(0.0);
                let _ = writeln!(
                    out,
                    r#"    <path id="{}-anim" d="{}" stroke="{}" stroke-dasharray="{:.3} {:.3}" stroke-dashoffset="{:.4}"/>"#,
                    xml_escape(&path.id),
                    xml_escape(&path.d),
                    xml_escape(&cfg.stroke.filling_color),
                    len,
                    len + 0.002,
                    dash_offset
                );
            }
        }
    }
    close_layer(&mut out);

    if cfg.brush.show {
        open_layer(&mut out, "brush", &cfg.brush.color, cfg.brush.width);
        for ((path, stroke), state) in doc.strokes.iter().zip(strokes).zip(states) {
            if let StrokeState::Drawing { dash_offset, .. } = *state {
                brush_tip(&mut out, path, stroke, dash_offset, "brush");
            }
        }
        close_layer(&mut out);
    }

    out.push_str("</svg>\n");
    Ok(out)
}

fn brush_border_layer(
    out: &mut String,
    doc: &StrokeDocument,
    strokes: &[Stroke],
    states: &[StrokeState],
    cfg: &Config,
) {
    open_layer(
        out,
        "brush-brd",
        &cfg.brush.border_color,
        cfg.brush.border_width,
    );
    for ((path, stroke), state) in doc.strokes.iter().zip(strokes).zip(states) {
        if let StrokeState::Drawing { dash_offset, .. } = *state {
            brush_tip(out, path, stroke, dash_offset, "brush-brd");
        }
    }
    close_layer(out);
}

/// A near-zero dash at the current reveal position reads as the brush tip.
fn brush_tip(
    out: &mut String,
    path: &crate::document::StrokePath,
    stroke: &Stroke,
    dash_offset: f64,
    suffix: &str,
) {
    let len = stroke.length.max(0.0);
    let _ = writeln!(
        out,
        r#"    <path id="{}-{}" d="{}" stroke-dasharray="0.001 {:.3}" stroke-dashoffset="{:.4}"/>"#,
        xml_escape(&path.id),
        suffix,
        xml_escape(&path.d),
        len + 0.002,
        dash_offset
    );
}

fn open_layer(out: &mut String, name: &str, color: &str, width: f64) {
    let _ = writeln!(
        out,
        r#"  <g id="{name}" style="fill:none;stroke:{};stroke-width:{};stroke-linecap:round;stroke-linejoin:round;">"#,
        xml_escape(color),
        width
    );
}

fn close_layer(out: &mut String) {
    out.push_str("  </g>\n");
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
