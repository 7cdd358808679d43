use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use crate::{
    error::{KakijunError, KakijunResult},
    raster::FrameRgba,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Square output size in pixels.
    pub size: u32,
    pub out_path: PathBuf,
    /// Flatten frames over this color; None keeps the alpha channel
    /// (1-bit GIF transparency, much bigger files).
    pub background: Option<[u8; 3]>,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> KakijunResult<()> {
        if self.size == 0 {
            return Err(KakijunError::config("encode size must be non-zero"));
        }
        if self.size > u16::MAX as u32 {
            return Err(KakijunError::config(format!(
                "encode size {} exceeds the gif limit of {}",
                self.size,
                u16::MAX
            )));
        }
        Ok(())
    }
}

pub fn ensure_parent_dir(path: &Path) -> KakijunResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streaming GIF encoder: frames go straight to the output file; per-frame
/// delays are supplied by the caller (the last frame carries the trailing
/// pause).
pub struct GifEncoder {
    cfg: EncodeConfig,
    encoder: gif::Encoder<BufWriter<File>>,
    scratch: Vec<u8>,
}

// Palette quantization speed (1 = best, 30 = fastest).
const QUANTIZE_SPEED: i32 = 10;

impl GifEncoder {
    pub fn new(cfg: EncodeConfig) -> KakijunResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(KakijunError::config(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        let file = File::create(&cfg.out_path).map_err(|e| {
            KakijunError::encode(format!(
                "failed to create '{}': {e}",
                cfg.out_path.display()
            ))
        })?;

        let side = cfg.size as u16;
        let mut encoder = gif::Encoder::new(BufWriter::new(file), side, side, &[])
            .map_err(|e| KakijunError::encode(format!("failed to start gif encoder: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| KakijunError::encode(format!("failed to set gif looping: {e}")))?;

        Ok(Self {
            scratch: vec![0u8; (cfg.size * cfg.size * 4) as usize],
            cfg,
            encoder,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRgba, delay_secs: f64) -> KakijunResult<()> {
        if frame.width != self.cfg.size || frame.height != self.cfg.size {
            return Err(KakijunError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.size, self.cfg.size
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(KakijunError::encode(
                "frame.data size mismatch with size*size*4",
            ));
        }

        match self.cfg.background {
            Some(bg) => flatten_premul_to_opaque(&mut self.scratch, &frame.data, bg),
            None => unpremultiply(&mut self.scratch, &frame.data),
        }

        let side = self.cfg.size as u16;
        let mut gif_frame =
            gif::Frame::from_rgba_speed(side, side, &mut self.scratch, QUANTIZE_SPEED);
        // GIF delays tick in centiseconds; a negative remainder clamps to 0.
        gif_frame.delay = (delay_secs * 100.0).round().clamp(0.0, f64::from(u16::MAX)) as u16;
        if self.cfg.background.is_none() {
            gif_frame.dispose = gif::DisposalMethod::Background;
        }

        self.encoder
            .write_frame(&gif_frame)
            .map_err(|e| KakijunError::encode(format!("failed to write gif frame: {e}")))
    }

    pub fn finish(self) -> KakijunResult<()> {
        use std::io::Write as _;
        let mut writer = self
            .encoder
            .into_inner()
            .map_err(|e| KakijunError::encode(format!("failed to finalize gif: {e}")))?;
        writer
            .flush()
            .map_err(|e| KakijunError::encode(format!("failed to flush gif output: {e}")))?;
        Ok(())
    }
}

/// Flatten premultiplied RGBA8 over an opaque background color.
fn flatten_premul_to_opaque(dst: &mut [u8], src: &[u8], bg: [u8; 3]) {
    let bg_r = u16::from(bg[0]);
    let bg_g = u16::from(bg[1]);
    let bg_b = u16::from(bg[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        d[0] = (u16::from(s[0]) + mul_div255(bg_r, inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255(bg_g, inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }
}

/// Recover straight RGBA from premultiplied input so the quantizer sees true
/// colors; GIF transparency is 1-bit so partial alpha survives only as the
/// nearest palette color.
fn unpremultiply(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3];
        if a == 0 || a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let a16 = u16::from(a);
        d[0] = ((u16::from(s[0]) * 255 + a16 / 2) / a16).min(255) as u8;
        d[1] = ((u16::from(s[1]) * 255 + a16 / 2) / a16).min(255) as u8;
        d[2] = ((u16::from(s[2]) * 255 + a16 / 2) / a16).min(255) as u8;
        d[3] = a;
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}
