use crate::{Raster, VideoError};
use image::codecs::jpeg::JpegEncoder;

/// Encode an RGB raster as JPEG at the given quality (1-100).
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, VideoError> {
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
    encoder
        .encode(
            &raster.data,
            raster.width,
            raster.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| VideoError::Encode(e.to_string()))?;
    Ok(out)
}

/// Decode JPEG bytes into an RGB raster.
pub fn decode_jpeg(data: &[u8]) -> Result<Raster, VideoError> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .map_err(|e| VideoError::Decode(e.to_string()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Raster::new(width, height, rgb.into_raw())
}
