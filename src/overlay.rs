//! Framebuffer drawing for the pager overlay
//!
//! Operates on softbuffer-style `u32` pixel slices (0x00RRGGBB, alpha in the
//! high byte for sources). Everything is clipped to the frame.

use crate::model::Rect;

/// Blend a source pixel (with alpha) onto a destination pixel
///
/// Both colors are in ARGB format. The source alpha determines
/// the blend ratio.
#[inline]
pub fn blend_pixel(src: u32, dst: u32) -> u32 {
    let alpha = (src >> 24) & 0xFF;
    if alpha == 0 {
        return dst;
    }
    if alpha == 255 {
        return src | 0xFF000000;
    }

    let inv_alpha = 255 - alpha;

    let r = ((((src >> 16) & 0xFF) * alpha + ((dst >> 16) & 0xFF) * inv_alpha) / 255) & 0xFF;
    let g = ((((src >> 8) & 0xFF) * alpha + ((dst >> 8) & 0xFF) * inv_alpha) / 255) & 0xFF;
    let b = (((src & 0xFF) * alpha + (dst & 0xFF) * inv_alpha) / 255) & 0xFF;

    0xFF000000 | (r << 16) | (g << 8) | b
}

/// A mutable view of a framebuffer
pub struct Frame<'a> {
    pub buffer: &'a mut [u32],
    pub width: usize,
    pub height: usize,
}

impl<'a> Frame<'a> {
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        debug_assert!(buffer.len() >= width * height);
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Fill the whole frame with an opaque color
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color | 0xFF000000);
    }

    /// Blend one pixel, ignoring coordinates outside the frame
    #[inline]
    pub fn blend(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            self.buffer[idx] = blend_pixel(color, self.buffer[idx]);
        }
    }

    /// Fill `rect` with `color`, blending by its alpha
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let right = rect.right().min(self.width);
        let bottom = rect.bottom().min(self.height);
        for y in rect.y..bottom {
            let row = y * self.width;
            for px in &mut self.buffer[row + rect.x.min(right)..row + right] {
                *px = blend_pixel(color, *px);
            }
        }
    }

    /// One-pixel outline of `rect`
    pub fn stroke_rect(&mut self, rect: Rect, color: u32) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1, rect.width, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.height), color);
        self.fill_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.height), color);
    }

    /// Two-tone etched border: a shadow line with a highlight line inside it
    pub fn etched_border(&mut self, rect: Rect, shadow: u32, highlight: u32) {
        self.stroke_rect(rect, shadow);
        self.stroke_rect(rect.inset(1), highlight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_pixel_fully_opaque() {
        assert_eq!(blend_pixel(0xFFFF0000, 0xFF00FF00), 0xFFFF0000);
    }

    #[test]
    fn test_blend_pixel_fully_transparent() {
        assert_eq!(blend_pixel(0x00FF0000, 0xFF00FF00), 0xFF00FF00);
    }

    #[test]
    fn test_blend_pixel_half_alpha() {
        let result = blend_pixel(0x80FFFFFF, 0xFF000000);
        let r = (result >> 16) & 0xFF;
        assert!((127..=129).contains(&r), "r = {}", r);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut buffer = vec![0u32; 4 * 4];
        let mut frame = Frame::new(&mut buffer, 4, 4);
        frame.fill_rect(Rect::new(2, 2, 10, 10), 0xFFFFFFFF);

        assert_eq!(buffer[0], 0);
        assert_eq!(buffer[2 * 4 + 2], 0xFFFFFFFF);
        assert_eq!(buffer[3 * 4 + 3], 0xFFFFFFFF);
        assert_eq!(buffer.iter().filter(|&&p| p != 0).count(), 4);
    }

    #[test]
    fn test_fill_rect_outside_frame_is_noop() {
        let mut buffer = vec![0u32; 4 * 4];
        let mut frame = Frame::new(&mut buffer, 4, 4);
        frame.fill_rect(Rect::new(8, 0, 2, 2), 0xFFFFFFFF);
        assert!(buffer.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_etched_border_leaves_interior() {
        let mut buffer = vec![0u32; 8 * 8];
        let mut frame = Frame::new(&mut buffer, 8, 8);
        frame.etched_border(Rect::new(0, 0, 8, 8), 0xFF111111, 0xFFEEEEEE);

        assert_eq!(buffer[0], 0xFF111111);
        assert_eq!(buffer[8 + 1], 0xFFEEEEEE);
        assert_eq!(buffer[3 * 8 + 3], 0);
    }
}
