//! RGBA rasters for heatmap backgrounds and decoded model images.

#[cfg(feature = "parallel-raster")]
use rayon::prelude::*;

use std::f64::consts::PI;

use crate::error::{CanvasError, CanvasResult};

const CHANNELS: usize = 4;

/// Row-major RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Fully transparent image.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        let len = pixel_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> CanvasResult<Self> {
        let len = pixel_len(width, height)?;
        if pixels.len() != len {
            return Err(CanvasError::InvalidData(format!(
                "expected {len} RGBA bytes for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Converts planar (CHW) RGB floats in `[0, 1]`, starting at `offset`,
    /// into an opaque image. Values are floored after scaling to 0..=255.
    pub fn from_planar_f32(
        data: &[f32],
        width: u32,
        height: u32,
        offset: usize,
    ) -> CanvasResult<Self> {
        let plane = width as usize * height as usize;
        let end = offset + 3 * plane;
        let Some(channels) = data.get(offset..end) else {
            return Err(CanvasError::InvalidData(format!(
                "planar image needs {} values from offset {offset}, buffer has {}",
                3 * plane,
                data.len()
            )));
        };
        Self::from_planes(width, height, |index, channel| {
            let value = channels[channel * plane + index];
            (f64::from(value) * 255.0).floor().clamp(0.0, 255.0) as u8
        })
    }

    /// Converts planar (CHW) RGB bytes into an opaque image.
    pub fn from_planar_u8(data: &[u8], width: u32, height: u32) -> CanvasResult<Self> {
        let plane = width as usize * height as usize;
        if data.len() != 3 * plane {
            return Err(CanvasError::InvalidData(format!(
                "planar image needs {} bytes, got {}",
                3 * plane,
                data.len()
            )));
        }
        Self::from_planes(width, height, |index, channel| data[channel * plane + index])
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let bytes = self.pixels.get(start..start + CHANNELS)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Planar RGB floats in `[0, 1]`, the layout encoder models take as input.
    #[must_use]
    pub fn to_planar_f32(&self) -> Vec<f32> {
        let plane = self.width as usize * self.height as usize;
        let mut out = vec![0.0; 3 * plane];
        for (index, rgba) in self.pixels.chunks_exact(CHANNELS).enumerate() {
            for channel in 0..3 {
                out[channel * plane + index] = f32::from(rgba[channel]) / 255.0;
            }
        }
        out
    }

    fn from_planes<F>(width: u32, height: u32, sample: F) -> CanvasResult<Self>
    where
        F: Fn(usize, usize) -> u8 + Sync + Send,
    {
        let mut image = Self::new(width, height)?;
        let row_width = width as usize;
        fill_rows(&mut image.pixels, row_width, |row, chunk| {
            for (col, rgba) in chunk.chunks_exact_mut(CHANNELS).enumerate() {
                let index = row * row_width + col;
                rgba[0] = sample(index, 0);
                rgba[1] = sample(index, 1);
                rgba[2] = sample(index, 2);
                rgba[3] = u8::MAX;
            }
        });
        Ok(image)
    }
}

/// Density of the standard 2D normal distribution.
#[must_use]
pub fn standard_gaussian_pdf(x: f64, y: f64) -> f64 {
    (1.0 / (2.0 * PI)) * (-(x * x + y * y) / 2.0).exp()
}

/// Greyscale heatmap of the standard 2D normal over `[-z_extent, z_extent]^2`,
/// normalized so the centre is white.
pub fn gaussian_heatmap(width: u32, height: u32, z_extent: f64) -> CanvasResult<RasterImage> {
    if width < 2 || height < 2 {
        return Err(CanvasError::config("heatmap needs at least 2x2 pixels"));
    }
    if !z_extent.is_finite() || z_extent <= 0.0 {
        return Err(CanvasError::config("heatmap extent must be finite and > 0"));
    }

    let mut image = RasterImage::new(width, height)?;
    let peak = standard_gaussian_pdf(0.0, 0.0);
    let cols = width as usize;
    let x_step = 2.0 * z_extent / f64::from(width - 1);
    let y_step = 2.0 * z_extent / f64::from(height - 1);

    fill_rows(&mut image.pixels, cols, |row, chunk| {
        let y = row as f64 * y_step - z_extent;
        for (col, rgba) in chunk.chunks_exact_mut(CHANNELS).enumerate() {
            let x = col as f64 * x_step - z_extent;
            let value = (standard_gaussian_pdf(x, y) / peak * 255.0).floor() as u8;
            rgba[0] = value;
            rgba[1] = value;
            rgba[2] = value;
            rgba[3] = u8::MAX;
        }
    });
    Ok(image)
}

fn pixel_len(width: u32, height: u32) -> CanvasResult<usize> {
    if width == 0 || height == 0 {
        return Err(CanvasError::InvalidViewport { width, height });
    }
    Ok(width as usize * height as usize * CHANNELS)
}

fn fill_rows<F>(pixels: &mut [u8], width: usize, fill: F)
where
    F: Fn(usize, &mut [u8]) + Sync + Send,
{
    let stride = width * CHANNELS;

    #[cfg(feature = "parallel-raster")]
    {
        pixels
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(row, chunk)| fill(row, chunk));
    }

    #[cfg(not(feature = "parallel-raster"))]
    {
        for (row, chunk) in pixels.chunks_mut(stride).enumerate() {
            fill(row, chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heatmap_peaks_in_the_centre() {
        let image = gaussian_heatmap(5, 5, 3.0).expect("heatmap");
        assert_eq!(image.pixel(2, 2), Some([255, 255, 255, 255]));
        let corner = image.pixel(0, 0).expect("corner");
        assert!(corner[0] < 5);
        assert_eq!(corner[3], 255);
    }

    #[test]
    fn planar_round_trip_keeps_byte_values() {
        let planar: Vec<u8> = (0..12).map(|v| v * 20).collect();
        let image = RasterImage::from_planar_u8(&planar, 2, 2).expect("image");
        assert_eq!(image.pixel(1, 0), Some([20, 100, 180, 255]));

        let floats = image.to_planar_f32();
        assert_eq!(floats.len(), 12);
        assert!((floats[1] - 20.0 / 255.0).abs() < 1e-6);
        assert!((floats[11] - 220.0 / 255.0).abs() < 1e-6);
    }
}
