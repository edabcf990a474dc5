//! Thumbnail decoding for the selected image.

use client_core::ImageUpload;
use eframe::egui;
use egui::TextureHandle;

/// Preview handle owned by the current selection. The GPU texture is freed
/// when this value is dropped.
#[derive(Clone)]
pub struct PreviewTexture {
    texture: Option<TextureHandle>,
    size: egui::Vec2,
}

impl PreviewTexture {
    /// A selection whose bytes could not be decoded still gets a preview slot.
    pub fn unavailable() -> Self {
        Self {
            texture: None,
            size: egui::Vec2::ZERO,
        }
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    pub fn size(&self) -> egui::Vec2 {
        self.size
    }
}

impl std::fmt::Debug for PreviewTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewTexture")
            .field("loaded", &self.texture.is_some())
            .field("size", &self.size)
            .finish()
    }
}

pub fn load_preview(ctx: &egui::Context, upload: &ImageUpload, max_dimension: u32) -> PreviewTexture {
    match decode_preview(upload.bytes(), max_dimension) {
        Ok(color_image) => {
            let [w, h] = color_image.size;
            let texture = ctx.load_texture(
                format!("scan-preview:{}", upload.filename()),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            PreviewTexture {
                texture: Some(texture),
                size: egui::vec2(w as f32, h as f32),
            }
        }
        Err(err) => {
            tracing::warn!(filename = upload.filename(), "could not decode preview: {err}");
            PreviewTexture::unavailable()
        }
    }
}

/// Decodes `bytes` and scales the longest side down to `max_dimension`.
/// Smaller images keep their size.
pub fn decode_preview(
    bytes: &[u8],
    max_dimension: u32,
) -> Result<egui::ColorImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let (orig_w, orig_h) = (decoded.width(), decoded.height());
    let scale = (max_dimension as f32 / (orig_w.max(orig_h).max(1) as f32)).min(1.0);
    let resized = if scale < 1.0 {
        decoded.resize(
            (orig_w as f32 * scale).max(1.0) as u32,
            (orig_h as f32 * scale).max(1.0) as u32,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };
    let rgba = resized.to_rgba8();
    let [w, h] = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [w, h],
        rgba.as_raw(),
    ))
}
