//! OS window size resource.
//!
//! Tracks the actual window dimensions, which may differ from the internal
//! render resolution. Updated once per frame; the resize event fires when
//! the value changes. Letterbox placement for the render target and
//! window-to-render coordinate mapping both live here.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Rectangle, Vector2};

/// Current window size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    pub w: i32,
    pub h: i32,
}

impl WindowSize {
    /// Width / height, guarding against a degenerate window.
    pub fn aspect(&self) -> f32 {
        if self.h > 0 {
            self.w as f32 / self.h as f32
        } else {
            1.0
        }
    }

    /// Destination rectangle that fits the render resolution inside the
    /// window, preserving aspect ratio and centering the content.
    pub fn calculate_letterbox(&self, render_width: u32, render_height: u32) -> Rectangle {
        let render_w = render_width as f32;
        let render_h = render_height as f32;
        let window_w = self.w as f32;
        let window_h = self.h as f32;

        let render_aspect = render_w / render_h;
        let window_aspect = window_w / window_h;

        if window_aspect > render_aspect {
            // pillarbox: bars left and right
            let scale = window_h / render_h;
            let scaled_w = render_w * scale;
            Rectangle {
                x: (window_w - scaled_w) / 2.0,
                y: 0.0,
                width: scaled_w,
                height: window_h,
            }
        } else {
            // letterbox: bars top and bottom
            let scale = window_w / render_w;
            let scaled_h = render_h * scale;
            Rectangle {
                x: 0.0,
                y: (window_h - scaled_h) / 2.0,
                width: window_w,
                height: scaled_h,
            }
        }
    }

    /// Map a window-space position into render-target space, clamping
    /// positions inside the black bars onto the render bounds.
    pub fn window_to_render_pos(
        &self,
        window_pos: Vector2,
        render_width: u32,
        render_height: u32,
    ) -> Vector2 {
        let letterbox = self.calculate_letterbox(render_width, render_height);
        let render_w = render_width as f32;
        let render_h = render_height as f32;

        let relative_x = window_pos.x - letterbox.x;
        let relative_y = window_pos.y - letterbox.y;

        Vector2 {
            x: (relative_x * render_w / letterbox.width).clamp(0.0, render_w),
            y: (relative_y * render_h / letterbox.height).clamp(0.0, render_h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_aspect_fills_the_window() {
        let size = WindowSize { w: 1280, h: 720 };
        let rect = size.calculate_letterbox(640, 360);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, 1280.0);
        assert_eq!(rect.height, 720.0);
    }

    #[test]
    fn wide_window_pillarboxes() {
        let size = WindowSize { w: 2000, h: 500 };
        let rect = size.calculate_letterbox(500, 500);
        assert_eq!(rect.width, 500.0);
        assert_eq!(rect.height, 500.0);
        assert_eq!(rect.x, 750.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn window_position_maps_into_render_space() {
        let size = WindowSize { w: 2000, h: 500 };
        let pos = size.window_to_render_pos(Vector2 { x: 1000.0, y: 250.0 }, 500, 500);
        assert_eq!(pos.x, 250.0);
        assert_eq!(pos.y, 250.0);
        // positions in the bars clamp to the render bounds
        let clamped = size.window_to_render_pos(Vector2 { x: 10.0, y: 250.0 }, 500, 500);
        assert_eq!(clamped.x, 0.0);
    }
}
