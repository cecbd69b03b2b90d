use log::warn;

pub const DEFAULT_CAMERA_MARGIN: f32 = 2.0;

/// Half-height of an origin-centred orthographic view that shows the whole
/// four-quadrant level plus `margin` world units.
pub fn fit_camera(rows: usize, cols: usize, tile_size: f32, aspect: f32, margin: f32) -> f32 {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        warn!("viewport aspect ratio {aspect} is unusable, assuming square");
        1.0
    };
    let total_width = cols as f32 * 2.0 * tile_size;
    let total_height = rows as f32 * 2.0 * tile_size;
    let required = (total_width / (2.0 * aspect)).max(total_height / 2.0);
    required + margin
}
