use crate::{
    error::{KakijunError, KakijunResult},
    timeline::TimelineConfig,
    timing::Timing,
};

/// Widths are the full width INCLUDING any border.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub border_color: String,
    pub border_width: f64,
    pub unfilled_color: String,
    pub unfilled_width: f64,
    pub filling_color: String,
    pub filled_color: String,
    pub filled_width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            border_color: "#666".to_string(),
            border_width: 4.5,
            unfilled_color: "#eee".to_string(),
            unfilled_width: 3.0,
            filling_color: "#f00".to_string(),
            filled_color: "#000".to_string(),
            filled_width: 3.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrushStyle {
    pub show: bool,
    /// Draw the brush border above the unfilled layer instead of below it.
    pub front_border: bool,
    pub color: String,
    pub width: f64,
    pub border_color: String,
    pub border_width: f64,
}

impl Default for BrushStyle {
    fn default() -> Self {
        Self {
            show: true,
            front_border: true,
            color: "#f00".to_string(),
            width: 5.5,
            border_color: "#666".to_string(),
            border_width: 7.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub stroke: StrokeStyle,
    pub brush: BrushStyle,
    pub timing: Timing,
    /// Trailing pause after the last stroke completes, in seconds.
    pub wait_after: f64,
    /// Seconds per output frame.
    pub frame_duration: f64,
    /// Output raster size in pixels (square).
    pub size: u32,
    /// Hex color, or "transparent" for alpha output (much bigger files).
    pub background: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle::default(),
            brush: BrushStyle::default(),
            timing: Timing::default(),
            wait_after: 1.5,
            frame_duration: 0.04,
            size: 150,
            background: "#ddf".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> KakijunResult<()> {
        if !(self.frame_duration > 0.0) {
            return Err(KakijunError::config("frame_duration must be > 0"));
        }
        if !(self.wait_after >= 0.0) {
            return Err(KakijunError::config("wait_after must be >= 0"));
        }
        if self.size == 0 {
            return Err(KakijunError::config("size must be > 0"));
        }
        for (name, width) in [
            ("stroke.border_width", self.stroke.border_width),
            ("stroke.unfilled_width", self.stroke.unfilled_width),
            ("stroke.filled_width", self.stroke.filled_width),
            ("brush.width", self.brush.width),
            ("brush.border_width", self.brush.border_width),
        ] {
            if !(width > 0.0) {
                return Err(KakijunError::config(format!("{name} must be > 0")));
            }
        }
        for (name, color) in [
            ("stroke.border_color", &self.stroke.border_color),
            ("stroke.unfilled_color", &self.stroke.unfilled_color),
            ("stroke.filling_color", &self.stroke.filling_color),
            ("stroke.filled_color", &self.stroke.filled_color),
            ("brush.color", &self.brush.color),
            ("brush.border_color", &self.brush.border_color),
        ] {
            parse_hex_color(color)
                .map_err(|e| KakijunError::config(format!("{name}: {e}")))?;
        }
        if self.background != "transparent" {
            parse_hex_color(&self.background)
                .map_err(|e| KakijunError::config(format!("background: {e}")))?;
        }
        Ok(())
    }

    /// Background color to flatten onto, or None for transparent output.
    pub fn background_rgb(&self) -> KakijunResult<Option<[u8; 3]>> {
        if self.background == "transparent" {
            return Ok(None);
        }
        parse_hex_color(&self.background).map(Some)
    }

    pub fn timeline(&self) -> TimelineConfig {
        TimelineConfig {
            frame_duration: self.frame_duration,
            wait_after: self.wait_after,
            timing: self.timing,
            ..TimelineConfig::default()
        }
    }
}

/// Parse `#rgb` or `#rrggbb`.
pub fn parse_hex_color(s: &str) -> KakijunResult<[u8; 3]> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| KakijunError::config(format!("color '{s}' must start with '#'")))?;

    let channel = |sub: &str| {
        u8::from_str_radix(sub, 16)
            .map_err(|_| KakijunError::config(format!("color '{s}' has invalid hex digits")))
    };

    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in hex.chars().enumerate() {
                let v = channel(&ch.to_string())?;
                out[i] = v * 16 + v;
            }
            Ok(out)
        }
        6 => Ok([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ]),
        _ => Err(KakijunError::config(format!(
            "color '{s}' must be #rgb or #rrggbb"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn json_roundtrip_with_partial_input() {
        let cfg: Config = serde_json::from_str(r#"{"size": 320, "timing": "linear"}"#).unwrap();
        assert_eq!(cfg.size, 320);
        assert_eq!(cfg.timing, Timing::Linear);
        assert_eq!(cfg.frame_duration, 0.04);
        assert_eq!(cfg.stroke.filled_color, "#000");

        let s = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&s).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn hex_colors_parse_in_both_lengths() {
        assert_eq!(parse_hex_color("#ddf").unwrap(), [0xdd, 0xdd, 0xff]);
        assert_eq!(parse_hex_color("#1a2b3c").unwrap(), [0x1a, 0x2b, 0x3c]);
        assert!(parse_hex_color("red").is_err());
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#ggg").is_err());
    }

    #[test]
    fn transparent_background_is_accepted() {
        let cfg = Config {
            background: "transparent".to_string(),
            ..Config::default()
        };
        cfg.validate().unwrap();
        assert_eq!(cfg.background_rgb().unwrap(), None);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.frame_duration = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.stroke.border_color = "gray".to_string();
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.size = 0;
        assert!(cfg.validate().is_err());
    }
}
