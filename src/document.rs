use crate::error::{KakijunError, KakijunResult};

/// Stroke-number label groups are skipped entirely; they are annotations,
/// not drawable strokes.
const NUMBER_LABEL_PREFIX: &str = "kvg:StrokeNumbers";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug)]
pub struct StrokePath {
    pub id: String,
    pub d: String,
}

/// The parsed input diagram: a view box plus the stroke paths in drawing
/// order (document order is semantically the stroke order).
#[derive(Clone, Debug)]
pub struct StrokeDocument {
    pub view_box: ViewBox,
    pub strokes: Vec<StrokePath>,
}

impl StrokeDocument {
    pub fn parse(xml: &str) -> KakijunResult<Self> {
        let doc = roxmltree::Document::parse(xml)
            .map_err(|e| KakijunError::svg(format!("failed to parse svg: {e}")))?;

        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(KakijunError::svg(format!(
                "root element is <{}>, expected <svg>",
                root.tag_name().name()
            )));
        }

        let view_box = parse_view_box(root)?;

        let mut strokes = Vec::new();
        for group in root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "g")
        {
            let group_id = group.attribute("id").unwrap_or("");
            if group_id.starts_with(NUMBER_LABEL_PREFIX) {
                continue;
            }

            for path in group
                .descendants()
                .filter(|n| n.is_element() && n.tag_name().name() == "path")
            {
                let d = path.attribute("d").ok_or_else(|| {
                    KakijunError::svg(format!(
                        "path {} has no 'd' attribute",
                        path.attribute("id").unwrap_or("<unnamed>")
                    ))
                })?;
                let id = match path.attribute("id") {
                    Some(id) => id.to_string(),
                    None => format!("stroke{}", strokes.len() + 1),
                };
                strokes.push(StrokePath {
                    id,
                    d: d.to_string(),
                });
            }
        }

        Ok(Self { view_box, strokes })
    }
}

fn parse_view_box(root: roxmltree::Node<'_, '_>) -> KakijunResult<ViewBox> {
    if let Some(vb) = root.attribute("viewBox") {
        let parts: Vec<f64> = vb
            .split([' ', ','])
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| KakijunError::svg(format!("malformed viewBox '{vb}'")))?;
        let [min_x, min_y, width, height] = parts[..] else {
            return Err(KakijunError::svg(format!("malformed viewBox '{vb}'")));
        };
        if width <= 0.0 || height <= 0.0 {
            return Err(KakijunError::svg(format!("empty viewBox '{vb}'")));
        }
        return Ok(ViewBox {
            min_x,
            min_y,
            width,
            height,
        });
    }

    let dim = |name: &str| -> KakijunResult<f64> {
        let raw = root
            .attribute(name)
            .ok_or_else(|| KakijunError::svg(format!("svg has neither viewBox nor {name}")))?;
        raw.trim_end_matches("px")
            .parse::<f64>()
            .map_err(|_| KakijunError::svg(format!("malformed {name} '{raw}'")))
    };

    let width = dim("width")?;
    let height = dim("height")?;
    if width <= 0.0 || height <= 0.0 {
        return Err(KakijunError::svg("svg width/height must be positive"));
    }
    Ok(ViewBox {
        min_x: 0.0,
        min_y: 0.0,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 109 109">
  <g id="kvg:StrokePaths_4e00">
    <path id="kvg:4e00-s1" d="M 10 50 L 99 50"/>
    <path id="kvg:4e00-s2" d="M 50 10 L 50 99"/>
  </g>
  <g id="kvg:StrokeNumbers_4e00">
    <text>1</text>
  </g>
</svg>"#;

    #[test]
    fn parses_strokes_in_document_order() {
        let doc = StrokeDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.strokes.len(), 2);
        assert_eq!(doc.strokes[0].id, "kvg:4e00-s1");
        assert_eq!(doc.strokes[1].id, "kvg:4e00-s2");
        assert_eq!(doc.view_box.width, 109.0);
        assert_eq!(doc.view_box.height, 109.0);
    }

    #[test]
    fn number_label_groups_are_skipped() {
        let doc = StrokeDocument::parse(SAMPLE).unwrap();
        assert!(doc.strokes.iter().all(|s| !s.d.is_empty()));
    }

    #[test]
    fn missing_path_id_gets_a_synthetic_one() {
        let xml = r#"<svg viewBox="0 0 10 10"><g><path d="M 0 0 L 1 1"/></g></svg>"#;
        let doc = StrokeDocument::parse(xml).unwrap();
        assert_eq!(doc.strokes[0].id, "stroke1");
    }

    #[test]
    fn width_height_fallback_when_no_view_box() {
        let xml = r#"<svg width="20px" height="30"><g><path d="M 0 0 L 1 1"/></g></svg>"#;
        let doc = StrokeDocument::parse(xml).unwrap();
        assert_eq!(doc.view_box.width, 20.0);
        assert_eq!(doc.view_box.height, 30.0);
    }

    #[test]
    fn missing_d_is_an_error() {
        let xml = r#"<svg viewBox="0 0 10 10"><g><path id="p"/></g></svg>"#;
        assert!(StrokeDocument::parse(xml).is_err());
    }

    #[test]
    fn no_strokes_is_allowed() {
        let xml = r#"<svg viewBox="0 0 10 10"/>"#;
        let doc = StrokeDocument::parse(xml).unwrap();
        assert!(doc.strokes.is_empty());
    }
}
