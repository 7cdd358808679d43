//! # Kakijun guide (v0.1.0)
//!
//! This module is a standalone walkthrough of Kakijun's architecture and public API.
//! If you are looking for copy/paste commands, start with the repository `README.md`.
//! If you are implementing new features, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`StrokeDocument`](crate::StrokeDocument): the parsed input diagram — a view box plus
//!   stroke paths in drawing order
//! - [`Stroke`](crate::Stroke): one stroke's id and measured geometric length
//! - [`Timing`](crate::Timing): a named cubic-Bezier easing preset (`linear`, `ease`,
//!   `ease-in`, `ease-in-out`, `ease-out`)
//! - [`Timeline`](crate::Timeline): the computed schedule — per frame, the draw state of
//!   every stroke
//! - [`StrokeState`](crate::StrokeState): `Pending`, `Drawing { progress, dash_offset }`,
//!   or `Complete`
//! - [`FrameRgba`](crate::FrameRgba): rendered pixels (RGBA8, premultiplied alpha)
//!
//! The pipeline is explicitly staged:
//!
//! 1. Parse: [`StrokeDocument::parse`](crate::StrokeDocument::parse)
//! 2. Measure: [`measure::path_length`](crate::measure::path_length) (kurbo arc length,
//!    absolute error 1e-8)
//! 3. Schedule: [`timeline::build`](crate::timeline::build)
//! 4. Serialize overlays: [`overlay::frame_svg`](crate::overlay::frame_svg)
//! 5. Rasterize: [`raster::rasterize_frame`](crate::raster::rasterize_frame) (resvg)
//! 6. Encode: [`GifEncoder`](crate::encode_gif::GifEncoder)
//!
//! Convenience wrappers for the whole chain live in:
//! - [`plan_animation`](crate::plan_animation) (steps 1–3)
//! - [`render_frame`](crate::render_frame) (one frame of a plan)
//! - [`render_to_gif`](crate::render_to_gif) (everything)
//!
//! ---
//!
//! ## How stroke timing works
//!
//! Each stroke's draw duration comes from its geometric length:
//! `sqrt(length) / 8` by default, so a stroke four times as long draws at twice the
//! speed, in twice the time. The summed raw time is then compressed globally with
//! `(2 * total) ^ (2/3)` so characters with many strokes don't take proportionally
//! forever. A trailing pause is appended after the last stroke; its length is also
//! accounted for in the raw-time domain so the raw-per-real ratio stays constant
//! across the whole clip.
//!
//! Inside the frame loop, real time maps back to raw time through the *linear* ratio
//! `total_raw_time / animation_time`. The global rescale is nonlinear, so this mapping
//! is deliberately approximate; the rendered pacing depends on it, so it stays.
//!
//! Per frame and stroke the schedule decides: not reached yet (hidden), already done
//! (static), or mid-draw — in which case the easing function shapes the progress and
//! the partial reveal is expressed as a dash window over the path:
//! `stroke-dasharray: L (L+0.002)` with `stroke-dashoffset: L * (1 - progress) + 0.0015`.
//!
//! ---
//!
//! ## The easing solver
//!
//! [`CubicBezier::evaluate`](crate::CubicBezier::evaluate) inverts the curve's x
//! polynomial to find the curve parameter, then evaluates y there. The inversion
//! cascades cubic → quadratic → linear as leading coefficients vanish (thresholds
//! 1e-9), uses Cardano's method in the one-real-root regime and the trigonometric
//! method for three real roots, picking the smallest root ≥ -1e-9. Coincident
//! control points fall back to the cubic's inflection shift rather than failing.
//!
//! ---
//!
//! ## "No IO in the core" (and why)
//!
//! Scheduling and overlay generation are deterministic, pure functions: same input
//! document and config, bit-identical timeline and frame SVGs. File reading happens
//! in the CLI; the only writer is the GIF encoder, which streams frames as they are
//! rasterized instead of buffering the whole clip.
//!
//! ---
//!
//! ## Rendering one frame
//!
//! ```rust,no_run
//! use kakijun::{Config, Timing, plan_animation, render_frame};
//!
//! # fn main() -> kakijun::KakijunResult<()> {
//! let svg = std::fs::read_to_string("assets/4e00.svg")
//!     .map_err(anyhow::Error::new)?;
//!
//! let cfg = Config {
//!     timing: Timing::Linear,
//!     size: 320,
//!     ..Config::default()
//! };
//!
//! let plan = plan_animation(&svg, &cfg)?;
//! let frame = render_frame(&plan, 0, &cfg)?;
//! assert_eq!(frame.width, 320);
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## GIF encoding
//!
//! Kakijun encodes GIFs in-process ([`GifEncoder`](crate::encode_gif::GifEncoder));
//! there is no external rasterizer or encoder to install. Delays are per frame:
//! regular frames share the configured frame duration and the final frame carries
//! the remainder, which is where the trailing pause lands. Opaque output flattens
//! premultiplied alpha over the configured background color; `"transparent"`
//! keeps the alpha channel at the cost of much larger files.
