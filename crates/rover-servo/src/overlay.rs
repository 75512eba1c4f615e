use rover_base::Rect;
use rover_video::Raster;

/// Box and centroid color while tracking.
pub const TRACK_COLOR: [u8; 3] = [80, 220, 80];
/// Status marker color while lost/searching.
pub const LOST_COLOR: [u8; 3] = [255, 170, 0];

const STATUS_ORIGIN: u32 = 6;
const STATUS_SIZE: u32 = 8;

/// Draw a one-pixel box outline. Writes are clipped by the raster, so a
/// partially off-screen box draws its visible edges only.
pub fn draw_box(raster: &mut Raster, roi: Rect<f32>, color: [u8; 3]) {
    let x0 = roi.x.round() as i64;
    let y0 = roi.y.round() as i64;
    let x1 = x0 + roi.w.round() as i64;
    let y1 = y0 + roi.h.round() as i64;

    for x in x0..=x1 {
        set_pixel(raster, x, y0, color);
        set_pixel(raster, x, y1, color);
    }
    for y in y0..=y1 {
        set_pixel(raster, x0, y, color);
        set_pixel(raster, x1, y, color);
    }
}

/// Draw a filled circle marking the smoothed centroid.
pub fn draw_centroid(raster: &mut Raster, cx: f32, cy: f32, color: [u8; 3]) {
    let cx = cx.round() as i64;
    let cy = cy.round() as i64;
    let radius: i64 = 3;

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                set_pixel(raster, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw the tracking/lost status marker in the top-left corner.
///
/// Status is a colored square rather than rendered text; the overlay is
/// presentation detail and must not change frame dimensions.
pub fn draw_status(raster: &mut Raster, tracking: bool) {
    let color = if tracking { TRACK_COLOR } else { LOST_COLOR };
    for y in STATUS_ORIGIN..STATUS_ORIGIN + STATUS_SIZE {
        for x in STATUS_ORIGIN..STATUS_ORIGIN + STATUS_SIZE {
            raster.set_pixel(x, y, color);
        }
    }
}

fn set_pixel(raster: &mut Raster, x: i64, y: i64, color: [u8; 3]) {
    if x < 0 || y < 0 {
        return;
    }
    raster.set_pixel(x as u32, y as u32, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_outline_pixels() {
        let mut raster = Raster::filled(64, 64, [0, 0, 0]);
        draw_box(&mut raster, Rect::new(10.0, 10.0, 20.0, 20.0), TRACK_COLOR);

        assert_eq!(raster.pixel(10, 10), TRACK_COLOR);
        assert_eq!(raster.pixel(30, 30), TRACK_COLOR);
        assert_eq!(raster.pixel(20, 10), TRACK_COLOR);
        // Interior untouched
        assert_eq!(raster.pixel(20, 20), [0, 0, 0]);
    }

    #[test]
    fn test_offscreen_box_is_clipped() {
        let mut raster = Raster::filled(32, 32, [0, 0, 0]);
        draw_box(&mut raster, Rect::new(-10.0, -10.0, 100.0, 100.0), TRACK_COLOR);

        assert_eq!(raster.width, 32);
        assert_eq!(raster.height, 32);
    }

    #[test]
    fn test_centroid_dot() {
        let mut raster = Raster::filled(32, 32, [0, 0, 0]);
        draw_centroid(&mut raster, 16.0, 16.0, TRACK_COLOR);

        assert_eq!(raster.pixel(16, 16), TRACK_COLOR);
        assert_eq!(raster.pixel(16, 19), TRACK_COLOR);
        assert_eq!(raster.pixel(16, 21), [0, 0, 0]);
    }

    #[test]
    fn test_status_marker_colors() {
        let mut raster = Raster::filled(32, 32, [0, 0, 0]);
        draw_status(&mut raster, true);
        assert_eq!(raster.pixel(8, 8), TRACK_COLOR);

        draw_status(&mut raster, false);
        assert_eq!(raster.pixel(8, 8), LOST_COLOR);
    }
}
