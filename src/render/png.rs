// src/render/png.rs
//! Растеризация SVG-карты в PNG
//!
//! Масштаб считается от DPI: SVG по умолчанию рассчитан на 96 DPI, поэтому
//! коэффициент равен `dpi / 96`. Фон всегда белый.

use crate::error::{MapError, MapResult};
use image::{ImageBuffer, Rgba, RgbaImage};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use resvg::{tiny_skia, usvg};
use tracing::debug;

/// DPI, под который рассчитаны единицы SVG
pub const SVG_BASE_DPI: f32 = 96.0;

#[must_use]
pub fn scale_for_dpi(dpi: u32) -> f32 {
    dpi as f32 / SVG_BASE_DPI
}

/// Переводит пиксели из премультиплицированной альфы tiny-skia в обычный RGBA
fn to_rgba_bytes(pixmap: &tiny_skia::Pixmap) -> Vec<u8> {
    let unpremultiply = |p: &tiny_skia::PremultipliedColorU8| {
        let c = p.demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    };

    #[cfg(feature = "parallel")]
    {
        pixmap
            .pixels()
            .par_iter()
            .flat_map_iter(unpremultiply)
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        pixmap.pixels().iter().flat_map(unpremultiply).collect()
    }
}

/// Растеризует SVG-разметку на белом фоне с масштабом `dpi / 96`
pub fn rasterize(svg_markup: &str, dpi: u32) -> MapResult<RgbaImage> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg_markup, &options)
        .map_err(|e| MapError::Raster(e.to_string()))?;

    let scale = scale_for_dpi(dpi);
    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;
    debug!(width, height, scale, "Rasterizing map");

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| MapError::Raster(format!("cannot allocate {width}x{height} pixmap")))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, to_rgba_bytes(&pixmap))
            .ok_or_else(|| MapError::Raster("Failed to create image buffer".into()))?;
    Ok(img)
}
