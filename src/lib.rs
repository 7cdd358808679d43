#![forbid(unsafe_code)]

pub mod config;
pub mod document;
pub mod encode_gif;
pub mod error;
pub mod guide;
pub mod measure;
pub mod overlay;
pub mod pipeline;
pub mod raster;
pub mod timeline;
pub mod timing;

pub use config::{BrushStyle, Config, StrokeStyle};
pub use document::{StrokeDocument, StrokePath, ViewBox};
pub use error::{KakijunError, KakijunResult};
pub use pipeline::{AnimationPlan, plan_animation, render_frame, render_to_gif};
pub use raster::FrameRgba;
pub use timeline::{FramePlan, Stroke, StrokeState, Timeline, TimelineConfig};
pub use timing::{CubicBezier, Timing};
