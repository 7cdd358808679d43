use kurbo::{BezPath, ParamCurveArclen as _};

use crate::error::{KakijunError, KakijunResult};

/// Absolute error tolerance for arc-length integration.
const ARCLEN_ACCURACY: f64 = 1e-8;

pub fn parse_path(d: &str) -> KakijunResult<BezPath> {
    BezPath::from_svg(d).map_err(|e| KakijunError::svg(format!("invalid path data: {e}")))
}

/// Geometric length of an SVG path `d` string.
///
/// This is the length oracle the timeline builder consumes; everything else
/// treats the result as an opaque non-negative number.
pub fn path_length(d: &str) -> KakijunResult<f64> {
    let path = parse_path(d)?;
    Ok(path.segments().map(|seg| seg.arclen(ARCLEN_ACCURACY)).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_has_exact_length() {
        let len = path_length("M 0 0 L 4 0").unwrap();
        assert!((len - 4.0).abs() < 1e-9);
    }

    #[test]
    fn multi_segment_lengths_accumulate() {
        // Two unit legs of a right angle.
        let len = path_length("M 0 0 L 1 0 L 1 1").unwrap();
        assert!((len - 2.0).abs() < 1e-9);
    }

    #[test]
    fn cubic_arc_length_is_close_to_analytic() {
        // Half circle of radius 1 approximated by two cubics; arc length pi.
        const K: f64 = 0.5522847498307936;
        let d = format!(
            "M 1 0 C 1 {K} {K} 1 0 1 C {mk} 1 -1 {K} -1 0",
            mk = -K
        );
        let len = path_length(&d).unwrap();
        assert!((len - std::f64::consts::PI).abs() < 1e-3, "got {len}");
    }

    #[test]
    fn empty_path_is_zero_length() {
        assert_eq!(path_length("M 3 4").unwrap(), 0.0);
    }

    #[test]
    fn malformed_path_is_an_error() {
        assert!(path_length("M 0 0 Q banana").is_err());
    }
}
