/// Represents a 2D buffer containing packed color and depth information.
///
/// Single writer: the rasterizer owns it mutably for the duration of a frame.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,

    /// One packed 0RGB value per pixel, row-major, top-left origin.
    pub color_buffer: Vec<u32>,

    /// One NDC depth per pixel. Reset to +infinity every frame.
    pub depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    /// Resets depth to +infinity and fills color with the background.
    pub fn clear(&mut self, background: u32) {
        self.color_buffer.fill(background);
        self.depth_buffer.fill(f32::INFINITY);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test and update.
    /// Passes only if `new_depth` is strictly closer than the stored value and lies in [0, 1].
    /// On success the depth buffer is updated.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) || !(0.0..=1.0).contains(&new_depth) {
            return false;
        }
        let idx = self.index(x, y);
        if self.depth_buffer[idx] <= new_depth {
            return false;
        }
        self.depth_buffer[idx] = new_depth;
        true
    }

    /// Should only be called AFTER depth_test_and_update returns true.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, packed: u32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.color_buffer[idx] = packed;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_both_buffers() {
        let mut fb = FrameBuffer::new(4, 3);
        assert!(fb.depth_test_and_update(1, 1, 0.5));
        fb.set_pixel(1, 1, 0xFFFFFF);
        fb.clear(0x101010);
        assert_eq!(fb.get_pixel(1, 1), Some(0x101010));
        assert_eq!(fb.get_depth(1, 1), Some(f32::INFINITY));
    }

    #[test]
    fn depth_test_is_strictly_closer_wins() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.depth_test_and_update(0, 0, 0.6));
        assert!(!fb.depth_test_and_update(0, 0, 0.6));
        assert!(!fb.depth_test_and_update(0, 0, 0.7));
        assert!(fb.depth_test_and_update(0, 0, 0.4));
        assert_eq!(fb.get_depth(0, 0), Some(0.4));
    }

    #[test]
    fn depth_outside_unit_range_is_rejected() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(!fb.depth_test_and_update(0, 0, -0.1));
        assert!(!fb.depth_test_and_update(0, 0, 1.1));
        assert!(!fb.depth_test_and_update(5, 0, 0.5));
    }
}
