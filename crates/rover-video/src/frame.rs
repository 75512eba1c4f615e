use crate::VideoError;
use rover_bus::Header;

/// Payload encoding of a published frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Jpeg,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Jpeg => "jpeg",
        }
    }
}

/// A compressed video frame as it travels over the bus.
///
/// Immutable once built; ownership moves with the message.
#[derive(Debug, Clone)]
pub struct Frame {
    pub seq: u64,
    pub ts_ns: u64,
    pub width: u32,
    pub height: u32,
    pub encoding: Encoding,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(seq: u64, ts_ns: u64, width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            seq,
            ts_ns,
            width,
            height,
            encoding: Encoding::Jpeg,
            data,
        }
    }

    /// The bus header describing this frame.
    pub fn header(&self) -> Header {
        Header::new(self.seq, self.ts_ns, "video")
            .with_dims(self.width, self.height)
            .with_encoding(self.encoding.as_str())
    }
}

/// Decoded RGB8 pixels in HWC layout, `data.len() == width * height * 3`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, VideoError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(VideoError::Shape {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A raster of the given dimensions filled with one color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * 3);
        for _ in 0..pixels {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        self.data[idx..idx + 3].copy_from_slice(&color);
    }

    /// Read one pixel. Panics if `x`/`y` lies outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x},{y}) outside {}x{}",
            self.width,
            self.height
        );
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}
