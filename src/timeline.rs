use crate::{
    error::{KakijunError, KakijunResult},
    timing::Timing,
};

/// One drawable stroke: an opaque id plus its geometric length.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub id: String,
    pub length: f64,
}

/// Default draw-speed policy: a stroke 4 times the length is drawn at twice
/// the speed, in twice the time.
pub fn stroke_duration(length: f64) -> f64 {
    length.sqrt() / 8.0
}

/// Default global rescale: sub-linear compression so glyphs with many
/// strokes don't take proportionally forever.
pub fn time_rescale(total_raw_time: f64) -> f64 {
    (2.0 * total_raw_time).powf(2.0 / 3.0)
}

#[derive(Clone, Debug)]
pub struct TimelineConfig {
    /// Seconds between regular output frames.
    pub frame_duration: f64,
    /// Trailing pause after the last stroke completes, in real seconds.
    pub wait_after: f64,
    pub timing: Timing,
    /// Per-stroke draw duration from geometric length.
    pub duration_of: fn(f64) -> f64,
    /// Raw total time to real animation seconds.
    pub rescale: fn(f64) -> f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            frame_duration: 0.04,
            wait_after: 1.5,
            timing: Timing::default(),
            duration_of: stroke_duration,
            rescale: time_rescale,
        }
    }
}

impl TimelineConfig {
    pub fn validate(&self) -> KakijunResult<()> {
        if !(self.frame_duration > 0.0) {
            return Err(KakijunError::config("frame_duration must be > 0"));
        }
        if !(self.wait_after >= 0.0) {
            return Err(KakijunError::config("wait_after must be >= 0"));
        }
        Ok(())
    }
}

/// Draw state of one stroke at one frame's sample time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum StrokeState {
    /// Not reached yet; the stroke is hidden.
    Pending,
    /// Mid-draw. `progress` is post-easing; `dash_offset` is the partial
    /// reveal offset derived from it.
    Drawing { progress: f64, dash_offset: f64 },
    /// Finished; drawn as a plain static stroke.
    Complete,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FramePlan {
    pub index: usize,
    /// Seconds this frame stays on screen. Regular frames share the
    /// configured frame duration; the final frame absorbs the remainder
    /// (which is where the trailing pause ends up).
    pub delay: f64,
    /// Parallel to the input stroke list.
    pub states: Vec<StrokeState>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub total_length: f64,
    /// Total raw drawing time, extended so that the raw-per-real ratio stays
    /// consistent through the pause window.
    pub total_raw_time: f64,
    /// Real animation seconds before the trailing pause.
    pub drawing_time: f64,
    /// Real animation seconds including the trailing pause.
    pub animation_time: f64,
    pub frames: Vec<FramePlan>,
}

impl Timeline {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Allocate strokes along the global timeline and compute every stroke's
/// draw state at every output frame.
///
/// The raw-to-real mapping inside the frame loop is the linear ratio
/// `total_raw_time / animation_time` even though the global rescale is
/// nonlinear; downstream visual calibration depends on this exact mapping.
#[tracing::instrument(skip(strokes, cfg), fields(strokes = strokes.len()))]
pub fn build(strokes: &[Stroke], cfg: &TimelineConfig) -> KakijunResult<Timeline> {
    cfg.validate()?;

    let mut total_length = 0.0f64;
    let mut total_raw_time = 0.0f64;
    let mut durations = Vec::with_capacity(strokes.len());
    for stroke in strokes {
        // Negative lengths behave as zero: drawn instantaneously in place.
        let length = stroke.length.max(0.0);
        let duration = (cfg.duration_of)(length).max(0.0);
        total_length += length;
        total_raw_time += duration;
        durations.push(duration);
    }

    let drawing_time = (cfg.rescale)(total_raw_time);
    if !drawing_time.is_finite() || drawing_time < 0.0 {
        return Err(KakijunError::timing(format!(
            "rescale produced an unusable animation time ({drawing_time})"
        )));
    }

    // Extend raw time through the pause window so raw-time-per-real-second
    // stays constant, then append the pause in real seconds.
    if drawing_time > 0.0 {
        total_raw_time += cfg.wait_after * total_raw_time / drawing_time;
    }
    let animation_time = drawing_time + cfg.wait_after;

    let last_frame_index = (drawing_time / cfg.frame_duration) as usize + 1;
    let last_frame_delay = animation_time - last_frame_index as f64 * cfg.frame_duration;

    tracing::debug!(
        total_length,
        total_raw_time,
        drawing_time,
        animation_time,
        frames = last_frame_index + 1,
        "timeline computed"
    );

    let mut frames = Vec::with_capacity(last_frame_index + 1);
    for index in 0..=last_frame_index {
        let real_time = index as f64 * cfg.frame_duration;
        let raw_time = if animation_time > 0.0 {
            real_time * total_raw_time / animation_time
        } else {
            0.0
        };

        let mut states = Vec::with_capacity(strokes.len());
        let mut elapsed_time = 0.0f64;
        for (stroke, &duration) in strokes.iter().zip(&durations) {
            let state = if raw_time < elapsed_time {
                StrokeState::Pending
            } else if duration == 0.0 || raw_time > elapsed_time + duration {
                StrokeState::Complete
            } else {
                let interval_progress = (raw_time - elapsed_time) / duration;
                let progress = cfg.timing.apply(interval_progress);
                StrokeState::Drawing {
                    progress,
                    // Small epsilon keeps the dash from collapsing to a
                    // zero-length artifact at full progress.
                    dash_offset: stroke.length.max(0.0) * (1.0 - progress) + 0.0015,
                }
            };
            states.push(state);
            elapsed_time += duration;
        }

        let delay = if index == last_frame_index {
            last_frame_delay.max(0.0)
        } else {
            cfg.frame_duration
        };
        frames.push(FramePlan {
            index,
            delay,
            states,
        });
    }

    Ok(Timeline {
        total_length,
        total_raw_time,
        drawing_time,
        animation_time,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_cfg() -> TimelineConfig {
        TimelineConfig {
            timing: Timing::Linear,
            ..TimelineConfig::default()
        }
    }

    fn stroke(id: &str, length: f64) -> Stroke {
        Stroke {
            id: id.to_string(),
            length,
        }
    }

    #[test]
    fn empty_input_yields_pause_only_timeline() {
        let tl = build(&[], &linear_cfg()).unwrap();
        assert!(tl.frame_count() >= 1);
        assert!(tl.frames.iter().all(|f| f.states.is_empty()));
        assert_eq!(tl.drawing_time, 0.0);
        assert_eq!(tl.animation_time, 1.5);
        let total: f64 = tl.frames.iter().map(|f| f.delay).sum();
        assert!((total - 1.5).abs() < 1e-9, "total delay {total}");
    }

    #[test]
    fn single_stroke_progresses_monotonically() {
        let tl = build(&[stroke("s1", 9.0)], &linear_cfg()).unwrap();

        let mut seen_drawing = false;
        let mut seen_complete = false;
        let mut last_progress = -1.0f64;
        for frame in &tl.frames {
            match frame.states[0] {
                StrokeState::Pending => {
                    assert!(!seen_drawing && !seen_complete, "regressed to pending");
                }
                StrokeState::Drawing { progress, .. } => {
                    assert!(!seen_complete, "regressed from complete");
                    assert!(progress > last_progress, "progress not increasing");
                    last_progress = progress;
                    seen_drawing = true;
                }
                StrokeState::Complete => seen_complete = true,
            }
        }
        assert!(seen_drawing);
        assert!(seen_complete);
        assert_eq!(
            tl.frames.last().unwrap().states[0],
            StrokeState::Complete
        );
    }

    #[test]
    fn two_stroke_scenario_matches_hand_computation() {
        let cfg = linear_cfg();
        let strokes = [stroke("a", 4.0), stroke("b", 1.0)];
        let tl = build(&strokes, &cfg).unwrap();

        // duration_of(4)=0.25, duration_of(1)=0.125
        let raw = 0.375f64;
        let drawing = (2.0 * raw).powf(2.0 / 3.0);
        assert!((drawing - 0.8255).abs() < 1e-3, "drawing time {drawing}");
        assert!((tl.drawing_time - drawing).abs() < 1e-12);
        assert!((tl.animation_time - (drawing + 1.5)).abs() < 1e-12);

        let expected_raw = raw + 1.5 * raw / drawing;
        assert!((tl.total_raw_time - expected_raw).abs() < 1e-12);

        assert_eq!(tl.frame_count(), (drawing / 0.04) as usize + 2);

        // Frame 0: first stroke sits exactly on its window start, progress 0.
        let f0 = &tl.frames[0];
        match f0.states[0] {
            StrokeState::Drawing { progress, dash_offset } => {
                assert_eq!(progress, 0.0);
                assert!((dash_offset - (4.0 + 0.0015)).abs() < 1e-12);
            }
            other => panic!("frame 0 stroke 0 was {other:?}"),
        }
        assert_eq!(f0.states[1], StrokeState::Pending);

        // Final frame: everything drawn, delay carries the remainder.
        let last = tl.frames.last().unwrap();
        assert_eq!(last.states, vec![StrokeState::Complete, StrokeState::Complete]);
        let expected_delay = tl.animation_time - (tl.frame_count() - 1) as f64 * 0.04;
        assert!((last.delay - expected_delay).abs() < 1e-9);

        // Regular frames keep the configured delay.
        assert!(tl.frames[..tl.frame_count() - 1]
            .iter()
            .all(|f| f.delay == 0.04));
    }

    #[test]
    fn strokes_draw_in_order_without_overlap_gaps() {
        let strokes = [stroke("a", 2.0), stroke("b", 5.0), stroke("c", 3.0)];
        let tl = build(&strokes, &linear_cfg()).unwrap();

        for frame in &tl.frames {
            // No stroke may be drawing or complete while a predecessor is
            // still pending.
            let mut latest_started = true;
            for state in &frame.states {
                let started = !matches!(state, StrokeState::Pending);
                assert!(
                    latest_started || !started,
                    "stroke started before its predecessor at frame {}",
                    frame.index
                );
                latest_started = started;
            }
        }
    }

    #[test]
    fn zero_and_negative_lengths_are_instantaneous() {
        let strokes = [stroke("a", 0.0), stroke("b", -3.0), stroke("c", 4.0)];
        let tl = build(&strokes, &linear_cfg()).unwrap();
        for frame in &tl.frames {
            assert_eq!(frame.states[0], StrokeState::Complete);
            assert_eq!(frame.states[1], StrokeState::Complete);
        }
        assert_eq!(tl.total_length, 4.0);
    }

    #[test]
    fn build_is_idempotent() {
        let strokes = [stroke("a", 4.0), stroke("b", 1.0)];
        let cfg = TimelineConfig::default();
        let a = build(&strokes, &cfg).unwrap();
        let b = build(&strokes, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_nonpositive_frame_duration() {
        let cfg = TimelineConfig {
            frame_duration: 0.0,
            ..TimelineConfig::default()
        };
        assert!(build(&[], &cfg).is_err());
    }
}
