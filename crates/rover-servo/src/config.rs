use crate::{ServoError, TrackerKind};
use rover_base::Rect;

/// Configuration for a servo session. Invalid values are fatal at startup.
#[derive(Clone, Debug)]
pub struct ServoConfig {
    frames_addr: String,
    publish_addr: String,
    tracker_kind: TrackerKind,
    roi: Option<Rect<f32>>,
    jpeg_quality: u8,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            frames_addr: "127.0.0.1:5555".to_string(),
            publish_addr: "0.0.0.0:5556".to_string(),
            tracker_kind: TrackerKind::Csrt,
            roi: None,
            jpeg_quality: 80,
        }
    }
}

impl ServoConfig {
    /// Set the address of the raw-frame hub to subscribe to.
    pub fn with_frames_addr(mut self, addr: String) -> Self {
        self.frames_addr = addr;
        self
    }

    /// Set the address the result hub binds to.
    pub fn with_publish_addr(mut self, addr: String) -> Self {
        self.publish_addr = addr;
        self
    }

    /// Set the tracking backend kind.
    pub fn with_tracker_kind(mut self, kind: TrackerKind) -> Self {
        self.tracker_kind = kind;
        self
    }

    /// Pin the initial region instead of the centered default box.
    pub fn with_roi(mut self, roi: Rect<f32>) -> Self {
        self.roi = Some(roi);
        self
    }

    /// Set the JPEG quality for the annotated stream (1-100).
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    // Getters
    pub fn frames_addr(&self) -> &str {
        &self.frames_addr
    }

    pub fn publish_addr(&self) -> &str {
        &self.publish_addr
    }

    pub fn tracker_kind(&self) -> TrackerKind {
        self.tracker_kind
    }

    pub fn roi(&self) -> Option<Rect<f32>> {
        self.roi
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

/// Parse an "X,Y,W,H" region argument. Degenerate boxes are rejected.
pub fn parse_roi(s: &str) -> Result<Rect<f32>, ServoError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(ServoError::Config(format!(
            "malformed ROI {s:?} (expected X,Y,W,H)"
        )));
    }

    let mut values = [0.0f32; 4];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse()
            .map_err(|_| ServoError::Config(format!("malformed ROI component {part:?}")))?;
    }

    let [x, y, w, h] = values;
    if w <= 0.0 || h <= 0.0 {
        return Err(ServoError::Config(format!(
            "ROI {s:?} has a non-positive dimension"
        )));
    }

    Ok(Rect::new(x, y, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roi() {
        let roi = parse_roi("140,100,40,40").unwrap();
        assert_eq!(roi, Rect::new(140.0, 100.0, 40.0, 40.0));

        let roi = parse_roi(" 10, 20, 30, 40 ").unwrap();
        assert_eq!(roi, Rect::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn test_parse_roi_rejects_malformed() {
        assert!(parse_roi("1,2,3").is_err());
        assert!(parse_roi("a,b,c,d").is_err());
        assert!(parse_roi("10,10,0,40").is_err());
        assert!(parse_roi("10,10,40,-1").is_err());
    }
}
