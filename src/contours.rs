//! Region boundaries traced from binary edge maps.
//!
//! Tracing uses Suzuki-Abe border following (`imageproc::contours`). Only
//! outermost outer borders are kept, i.e. borders that are not nested inside
//! any other traced region. Geometry helpers mirror what the sheet and seam
//! stages need: enclosed area, closed perimeter, bounding box and a closed
//! Douglas-Peucker polygon approximation.
use crate::types::BoundingBox;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;

/// Closed boundary as an ordered sequence of pixel positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area by the shoelace formula (always non-negative).
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
        }
        (twice * 0.5).abs()
    }

    /// Perimeter of the closed boundary.
    pub fn arc_length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        arc_length(&self.points, true)
    }

    /// Smallest axis-aligned box holding every point; `width = max - min + 1`.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let min_x = min_x.max(0);
        let min_y = min_y.max(0);
        if max_x < min_x || max_y < min_y {
            return None;
        }
        Some(BoundingBox::new(
            min_x as u32,
            min_y as u32,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        ))
    }

    /// Closed polygon approximation with tolerance `epsilon` (pixels).
    ///
    /// The curve is split at two mutually distant points, each half is
    /// simplified as an open chain and the halves are joined, so the result
    /// lists every vertex once and does not depend on where tracing started.
    pub fn approx_polygon(&self, epsilon: f64) -> Vec<Point<i32>> {
        let pts = &self.points;
        if pts.len() < 3 || epsilon <= 0.0 {
            return pts.clone();
        }
        let far_b = farthest_from(pts, pts[0]);
        let far_a = farthest_from(pts, pts[far_b]);
        if far_a == far_b {
            return vec![pts[far_a]];
        }
        let (i, j) = (far_a.min(far_b), far_a.max(far_b));

        let mut out = approximate_polygon_dp(&pts[i..=j], epsilon, false);
        out.pop();
        let wrap: Vec<Point<i32>> = pts[j..].iter().chain(pts[..=i].iter()).copied().collect();
        let mut tail = approximate_polygon_dp(&wrap, epsilon, false);
        tail.pop();
        out.extend(tail);
        out
    }
}

fn farthest_from(points: &[Point<i32>], origin: Point<i32>) -> usize {
    let mut best = 0usize;
    let mut best_d2 = -1i64;
    for (i, p) in points.iter().enumerate() {
        let dx = (p.x - origin.x) as i64;
        let dy = (p.y - origin.y) as i64;
        let d2 = dx * dx + dy * dy;
        if d2 > best_d2 {
            best_d2 = d2;
            best = i;
        }
    }
    best
}

/// Outermost outer borders of the foreground (non-zero) pixels of `edges`,
/// in tracing order (raster order of their starting pixel).
pub fn external_contours(edges: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter(|c| !c.points.is_empty())
        .map(|c| Contour::new(c.points))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn rect_contour(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
        let mut pts = Vec::new();
        for x in x0..x1 {
            pts.push(Point::new(x, y0));
        }
        for y in y0..y1 {
            pts.push(Point::new(x1, y));
        }
        for x in (x0 + 1..=x1).rev() {
            pts.push(Point::new(x, y1));
        }
        for y in (y0 + 1..=y1).rev() {
            pts.push(Point::new(x0, y));
        }
        Contour::new(pts)
    }

    #[test]
    fn rectangle_geometry() {
        let c = rect_contour(10, 20, 50, 40);
        assert!((c.area() - 800.0).abs() < 1e-9);
        assert!((c.arc_length() - 120.0).abs() < 1e-6);
        assert_eq!(c.bounding_box(), Some(BoundingBox::new(10, 20, 41, 21)));
    }

    #[test]
    fn rectangle_approximates_to_four_vertices() {
        let mut c = rect_contour(10, 20, 50, 40);
        // start tracing mid-edge: the split must not create a fifth vertex
        c.points.rotate_left(17);
        let eps = 0.02 * c.arc_length();
        assert_eq!(c.approx_polygon(eps).len(), 4);
    }

    #[test]
    fn triangle_approximates_to_three_vertices() {
        let mut pts = Vec::new();
        for i in 0..40 {
            pts.push(Point::new(i, 0));
        }
        for i in 0..40 {
            pts.push(Point::new(40 - i, i));
        }
        for i in 0..40 {
            pts.push(Point::new(0, 40 - i));
        }
        let c = Contour::new(pts);
        assert_eq!(c.approx_polygon(0.02 * c.arc_length()).len(), 3);
    }

    #[test]
    fn nested_borders_are_not_external() {
        let mut img = GrayImage::new(60, 60);
        // hollow square with a blob inside it
        for i in 5..55 {
            img.put_pixel(i, 5, Luma([255]));
            img.put_pixel(i, 54, Luma([255]));
            img.put_pixel(5, i, Luma([255]));
            img.put_pixel(54, i, Luma([255]));
        }
        for y in 25..30 {
            for x in 25..30 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let contours = external_contours(&img);
        assert_eq!(contours.len(), 1);
        let bbox = contours[0].bounding_box().unwrap();
        assert_eq!(bbox, BoundingBox::new(5, 5, 50, 50));
    }

    #[test]
    fn empty_map_has_no_contours() {
        assert!(external_contours(&GrayImage::new(16, 16)).is_empty());
    }
}
