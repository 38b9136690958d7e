//! Render target resource for fixed-resolution rendering.
//!
//! The scene is drawn into a framebuffer texture at the internal render
//! resolution, then scaled into the window with letterboxing. Non-send:
//! the render texture is a GPU resource owned by the main thread.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

/// Framebuffer at the internal render resolution.
pub struct RenderTarget {
    /// The underlying raylib render texture.
    pub texture: RenderTexture2D,
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
}

impl RenderTarget {
    /// Create a render target at the given internal resolution, with
    /// bilinear filtering for smooth window scaling.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create render texture: {}", e))?;

        let target = Self {
            texture,
            render_width: width,
            render_height: height,
        };
        unsafe {
            ffi::SetTextureFilter(
                target.texture.texture,
                TextureFilter::TEXTURE_FILTER_BILINEAR as i32,
            );
        }
        Ok(target)
    }

    /// Width / height of the internal resolution.
    pub fn aspect_ratio(&self) -> f32 {
        self.render_width as f32 / self.render_height as f32
    }

    /// Source rectangle for drawing the target's texture.
    ///
    /// Negative height flips the Y axis, compensating for OpenGL's inverted
    /// framebuffer coordinates.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.render_width as f32,
            height: -(self.render_height as f32),
        }
    }

    /// Blit the target into `dest`, inside an active drawing scope.
    ///
    /// Goes through the FFI directly; the safe draw wrappers want an owned
    /// texture reference the render texture cannot hand out.
    pub fn blit(&self, _d: &mut RaylibDrawHandle, dest: Rectangle) {
        unsafe {
            ffi::DrawTexturePro(
                self.texture.texture,
                self.source_rect().into(),
                dest.into(),
                ffi::Vector2 { x: 0.0, y: 0.0 },
                0.0,
                Color::WHITE.into(),
            );
        }
    }
}
