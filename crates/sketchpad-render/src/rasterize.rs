//! Pixel coverage for round-capped strokes and mitered rectangle corners.
//!
//! A pixel is painted when its center lies inside the stroke. There is no
//! anti-aliasing and no blending: covered pixels take the stroke color.

use image::{Rgba, RgbaImage};
use kurbo::{Circle, Line, Point, Rect, Vec2};

/// Half-widths below this would leave gaps between pixel centers.
const MIN_HALF_WIDTH: f64 = 0.5;

pub(crate) fn half_width(width: f64) -> f64 {
    (width / 2.0).max(MIN_HALF_WIDTH)
}

/// Squared distance from `p` to the closest point of `line`.
fn distance_sq_to_segment(line: Line, p: Point) -> f64 {
    let d: Vec2 = line.p1 - line.p0;
    let len_sq = d.hypot2();
    if len_sq == 0.0 {
        return (p - line.p0).hypot2();
    }
    let t = ((p - line.p0).dot(d) / len_sq).clamp(0.0, 1.0);
    (p - line.p0.lerp(line.p1, t)).hypot2()
}

/// Visit every pixel whose center lies in `bounds`, clipped to the image.
fn for_each_pixel_in(image: &mut RgbaImage, bounds: Rect, mut f: impl FnMut(&mut Rgba<u8>, Point)) {
    let (w, h) = image.dimensions();
    let x0 = (bounds.x0 - 0.5).ceil().max(0.0);
    let y0 = (bounds.y0 - 0.5).ceil().max(0.0);
    let x1 = (bounds.x1 - 0.5).floor().min(w as f64 - 1.0);
    let y1 = (bounds.y1 - 0.5).floor().min(h as f64 - 1.0);
    if !(x0 <= x1 && y0 <= y1) {
        return;
    }

    for y in y0 as u32..=y1 as u32 {
        for x in x0 as u32..=x1 as u32 {
            let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            f(image.get_pixel_mut(x, y), center);
        }
    }
}

/// Paint a segment with round caps.
pub(crate) fn fill_capsule(image: &mut RgbaImage, line: Line, half_width: f64, color: Rgba<u8>) {
    let bounds = Rect::from_points(line.p0, line.p1).inflate(half_width, half_width);
    let limit = half_width * half_width;
    for_each_pixel_in(image, bounds, |pixel, center| {
        if distance_sq_to_segment(line, center) <= limit {
            *pixel = color;
        }
    });
}

/// Paint an axis-aligned square of side `2 * half_width` around `center`.
///
/// Fills the outer corner of a right-angle miter join.
pub(crate) fn fill_square(image: &mut RgbaImage, center: Point, half_width: f64, color: Rgba<u8>) {
    let bounds = Rect::from_center_size(center, (2.0 * half_width, 2.0 * half_width));
    for_each_pixel_in(image, bounds, |pixel, _| *pixel = color);
}

/// Paint the outline of a circle.
pub(crate) fn fill_ring(image: &mut RgbaImage, circle: Circle, half_width: f64, color: Rgba<u8>) {
    let reach = circle.radius + half_width;
    let bounds = Rect::new(
        circle.center.x - reach,
        circle.center.y - reach,
        circle.center.x + reach,
        circle.center.y + reach,
    );
    for_each_pixel_in(image, bounds, |pixel, center| {
        let distance = center.distance(circle.center);
        if (distance - circle.radius).abs() <= half_width {
            *pixel = color;
        }
    });
}
