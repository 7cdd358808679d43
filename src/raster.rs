use crate::error::{KakijunError, KakijunResult};

/// Rendered pixels for one frame. `data` is premultiplied RGBA8, row-major.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

// Avoid pathological allocations from absurd output sizes.
const MAX_DIM: u32 = 16_384;

/// Rasterize an SVG document string into a square pixmap of the given size,
/// scaling the view box to fit.
pub fn rasterize_frame(svg: &str, size: u32) -> KakijunResult<FrameRgba> {
    if size == 0 {
        return Err(KakijunError::render("raster size must be non-zero"));
    }
    if size > MAX_DIM {
        return Err(KakijunError::render(format!(
            "raster size too large: {size} (max {MAX_DIM})"
        )));
    }

    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|e| KakijunError::render(format!("failed to build svg tree: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| KakijunError::render("failed to allocate frame pixmap"))?;

    let tree_size = tree.size();
    if tree_size.width() <= 0.0 || tree_size.height() <= 0.0 {
        return Err(KakijunError::render("svg has invalid width/height"));
    }
    let sx = (size as f32) / tree_size.width();
    let sy = (size as f32) / tree_size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());

    Ok(FrameRgba {
        width: size,
        height: size,
        data: pixmap.data().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
  <rect x="0" y="0" width="10" height="10" fill="#ff0000"/>
</svg>"##;

    #[test]
    fn rasterizes_to_requested_size() {
        let frame = rasterize_frame(SQUARE, 32).unwrap();
        assert_eq!(frame.width, 32);
        assert_eq!(frame.height, 32);
        assert_eq!(frame.data.len(), 32 * 32 * 4);
        // Fully covered by an opaque red rect.
        assert_eq!(&frame.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn stroked_path_produces_ink() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
  <path d="M 0 5 L 10 5" stroke="#000" stroke-width="2" fill="none"/>
</svg>"##;
        let frame = rasterize_frame(svg, 20).unwrap();
        let any_ink = frame.data.chunks_exact(4).any(|px| px[3] > 0);
        assert!(any_ink);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(rasterize_frame(SQUARE, 0).is_err());
    }

    #[test]
    fn malformed_svg_is_rejected() {
        assert!(rasterize_frame("<svg", 10).is_err());
    }
}
