//! RGBA8 pixel buffer for one atlas page.

/// Fixed-size RGBA8 page, row-major from the top-left, zero-initialized.
pub struct PageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PageBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Zero every pixel so the buffer can hold the next page.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Write one coverage value as white with alpha. Writes outside the
    /// page are dropped.
    pub fn put_mask(&mut self, x: u32, y: u32, value: u8) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&[255, 255, 255, value]);
        }
    }

    /// Write one coverage value into a single channel (0=R, 1=G, 2=B,
    /// 3=A), leaving the other channels untouched. Writes outside the
    /// page are dropped.
    pub fn put_channel(&mut self, x: u32, y: u32, channel: u8, value: u8) {
        debug_assert!(channel < 4);
        if let Some(i) = self.offset(x, y) {
            self.pixels[i + usize::from(channel)] = value;
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }
}
