use std::path::Path;

use crate::{
    config::Config,
    document::StrokeDocument,
    encode_gif::{EncodeConfig, GifEncoder},
    error::{KakijunError, KakijunResult},
    measure, overlay,
    raster::{self, FrameRgba},
    timeline::{self, Stroke, Timeline},
};

/// Everything derived from one input diagram: the parsed document, measured
/// strokes, and the computed frame timeline.
#[derive(Clone, Debug)]
pub struct AnimationPlan {
    pub document: StrokeDocument,
    pub strokes: Vec<Stroke>,
    pub timeline: Timeline,
}

/// Parse, measure and schedule an input diagram without rendering anything.
#[tracing::instrument(skip(svg, cfg))]
pub fn plan_animation(svg: &str, cfg: &Config) -> KakijunResult<AnimationPlan> {
    cfg.validate()?;

    let document = StrokeDocument::parse(svg)?;
    let strokes = document
        .strokes
        .iter()
        .map(|path| {
            let length = measure::path_length(&path.d)?;
            Ok(Stroke {
                id: path.id.clone(),
                length,
            })
        })
        .collect::<KakijunResult<Vec<_>>>()?;

    let timeline = timeline::build(&strokes, &cfg.timeline())?;
    tracing::info!(
        strokes = strokes.len(),
        frames = timeline.frame_count(),
        animation_time = timeline.animation_time,
        "animation planned"
    );

    Ok(AnimationPlan {
        document,
        strokes,
        timeline,
    })
}

/// Render a single frame of the plan to premultiplied RGBA8 pixels.
pub fn render_frame(plan: &AnimationPlan, index: usize, cfg: &Config) -> KakijunResult<FrameRgba> {
    let frame = plan.timeline.frames.get(index).ok_or_else(|| {
        KakijunError::render(format!(
            "frame {index} is out of bounds ({} frames)",
            plan.timeline.frame_count()
        ))
    })?;
    let svg = overlay::frame_svg(&plan.document, &plan.strokes, &frame.states, cfg)?;
    raster::rasterize_frame(&svg, cfg.size)
}

/// Render the whole animation to a GIF file, streaming frames into the
/// encoder as they are rasterized.
#[tracing::instrument(skip(svg, cfg), fields(out = %out_path.display()))]
pub fn render_to_gif(svg: &str, out_path: &Path, cfg: &Config) -> KakijunResult<AnimationPlan> {
    let plan = plan_animation(svg, cfg)?;

    let mut encoder = GifEncoder::new(EncodeConfig {
        size: cfg.size,
        out_path: out_path.to_path_buf(),
        background: cfg.background_rgb()?,
        overwrite: true,
    })?;

    for frame in &plan.timeline.frames {
        let frame_svg = overlay::frame_svg(&plan.document, &plan.strokes, &frame.states, cfg)?;
        let rgba = raster::rasterize_frame(&frame_svg, cfg.size)?;
        encoder.encode_frame(&rgba, frame.delay)?;
        tracing::trace!(frame = frame.index, delay = frame.delay, "frame encoded");
    }

    encoder.finish()?;
    Ok(plan)
}
