use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::error::CanvasResult;
use crate::render::RasterImage;

/// Image scaling used before encoding (for example 128px renders down to the
/// 32px model input).
pub trait ImageResampler {
    fn resample<'a>(
        &'a self,
        image: &'a RasterImage,
        width: u32,
        height: u32,
    ) -> LocalBoxFuture<'a, CanvasResult<RasterImage>>;
}

/// Box filter: each target pixel averages the source pixels it covers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaAverageResampler;

impl ImageResampler for AreaAverageResampler {
    fn resample<'a>(
        &'a self,
        image: &'a RasterImage,
        width: u32,
        height: u32,
    ) -> LocalBoxFuture<'a, CanvasResult<RasterImage>> {
        future::ready(area_average(image, width, height)).boxed_local()
    }
}

fn area_average(source: &RasterImage, width: u32, height: u32) -> CanvasResult<RasterImage> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for ty in 0..height {
        let (y0, y1) = source_span(ty, height, source.height());
        for tx in 0..width {
            let (x0, x1) = source_span(tx, width, source.width());
            let mut sum = [0u64; 4];
            let mut count = 0u64;
            for sy in y0..y1 {
                for sx in x0..x1 {
                    if let Some(rgba) = source.pixel(sx, sy) {
                        for (acc, value) in sum.iter_mut().zip(rgba) {
                            *acc += u64::from(value);
                        }
                        count += 1;
                    }
                }
            }
            let count = count.max(1);
            pixels.extend(sum.iter().map(|total| ((total + count / 2) / count) as u8));
        }
    }
    RasterImage::from_rgba(width, height, pixels)
}

fn source_span(target: u32, target_len: u32, source_len: u32) -> (u32, u32) {
    let scaled = |index: u32| u64::from(index) * u64::from(source_len);
    let start = (scaled(target) / u64::from(target_len)) as u32;
    let end = scaled(target + 1).div_ceil(u64::from(target_len)) as u32;
    (start, end.max(start + 1).min(source_len))
}
