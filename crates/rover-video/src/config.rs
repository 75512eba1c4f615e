/// Configuration for the frame source.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    width: u32,
    height: u32,
    fps: u32,
    jpeg_quality: u8,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 15,
            jpeg_quality: 80,
        }
    }
}

impl SourceConfig {
    /// Set the frame width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the frame height in pixels.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the target frames per second.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the JPEG quality (1-100).
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    // Getters
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}
