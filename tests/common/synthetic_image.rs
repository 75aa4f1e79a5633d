use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

pub const BACKGROUND: u8 = 30;
pub const SHEET: u8 = 200;

/// Dark frame with one bright sheet at `(x, y, w, h)` and a few small
/// distractor shapes in the corners, all below the sheet area gate.
pub fn sheet_scene(width: u32, height: u32, sheet: (i32, i32, u32, u32)) -> GrayImage {
    assert!(width >= 200 && height >= 200, "scene too small for distractors");
    let mut img = GrayImage::from_pixel(width, height, Luma([BACKGROUND]));
    let (x, y, w, h) = sheet;
    draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(w, h), Luma([SHEET]));

    draw_filled_rect_mut(&mut img, Rect::at(10, 10).of_size(20, 20), Luma([SHEET]));
    draw_filled_rect_mut(
        &mut img,
        Rect::at(width as i32 - 40, 12).of_size(25, 18),
        Luma([SHEET]),
    );
    let by = height as i32 - 15;
    draw_polygon_mut(
        &mut img,
        &[Point::new(12, by), Point::new(52, by), Point::new(32, by - 30)],
        Luma([SHEET]),
    );
    img
}

/// Bright frame crossed by a dark wire shaped as a V: vertex at `(vx, vy)`,
/// arms rising at `half_angle_deg`, spanning `x0..=x1` with vertical
/// thickness `thickness`.
pub fn v_wire_scene(
    width: u32,
    height: u32,
    vertex: (f32, f32),
    half_angle_deg: f32,
    x_range: (u32, u32),
    thickness: f32,
) -> GrayImage {
    let slope = half_angle_deg.to_radians().tan();
    let (vx, vy) = vertex;
    GrayImage::from_fn(width, height, |x, y| {
        let centre = vy - (x as f32 - vx).abs() * slope;
        let on_wire = x >= x_range.0
            && x <= x_range.1
            && (y as f32 - centre).abs() <= thickness * 0.5;
        if on_wire {
            Luma([40])
        } else {
            Luma([SHEET])
        }
    })
}

/// Interleave a gray image into RGB bytes.
pub fn to_rgb_bytes(gray: &GrayImage) -> Vec<u8> {
    gray.pixels().flat_map(|p| [p.0[0]; 3]).collect()
}
