use super::Vec2;

/// Computes the per-axis scale that fits a quad of aspect `image_aspect` into a
/// viewport of aspect `screen_aspect`.
///
/// Aspects are `width / height`. The axis that would overflow is shrunk; the
/// other stays at `1.0`:
/// - `screen_aspect < image_aspect`: bands top and bottom (letterbox)
/// - otherwise: bands left and right (pillarbox)
///
/// The scaled quad keeps `screen_aspect * x / y == image_aspect` on screen.
#[inline]
pub fn fit_scale(image_aspect: f32, screen_aspect: f32) -> Vec2 {
    if screen_aspect < image_aspect {
        Vec2::new(1.0, screen_aspect / image_aspect)
    } else {
        Vec2::new(image_aspect / screen_aspect, 1.0)
    }
}
