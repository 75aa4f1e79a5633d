//! Seam extraction: the wire/weld seam is the longest boundary in the
//! region of interest.
//!
//! Unlike the sheet stage, candidates are ranked by perimeter rather than
//! area, because a seam is long and thin. The winning contour is rasterised
//! into a filled binary mask for the bend detector.
use crate::contours::{external_contours, Contour};
use crate::edges::{edge_map, EdgeOptions};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use log::debug;

/// Return the contour with the largest closed perimeter, `None` if the
/// region has no edges at all.
pub fn extract_dominant(gray: &GrayImage, options: &EdgeOptions) -> Option<Contour> {
    let edges = edge_map(gray, options);
    let contours = external_contours(&edges);
    let mut best: Option<(f64, Contour)> = None;
    for contour in contours {
        let length = contour.arc_length();
        if best.as_ref().map_or(true, |(l, _)| length > *l) {
            best = Some((length, contour));
        }
    }
    if let Some((length, contour)) = &best {
        debug!(
            "seam: dominant contour with {} points, perimeter {length:.1}",
            contour.len()
        );
    }
    best.map(|(_, c)| c)
}

/// Rasterise `contour` as a filled polygon: 255 inside and on the boundary,
/// 0 elsewhere.
pub fn fill_mask(contour: &Contour, width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let mut poly: Vec<Point<i32>> = Vec::with_capacity(contour.len());
    for &p in &contour.points {
        if poly.last() != Some(&p) {
            poly.push(p);
        }
    }
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }

    if poly.len() < 3 {
        for p in poly {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
                mask.put_pixel(p.x as u32, p.y as u32, Luma([255]));
            }
        }
        return mask;
    }
    draw_polygon_mut(&mut mask, &poly, Luma([255]));
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
    use imageproc::rect::Rect;

    #[test]
    fn flat_region_has_no_seam() {
        let gray = GrayImage::from_pixel(64, 64, Luma([90]));
        assert!(extract_dominant(&gray, &EdgeOptions::default()).is_none());
    }

    #[test]
    fn long_thin_wire_beats_compact_blob() {
        let mut gray = GrayImage::from_pixel(300, 200, Luma([20]));
        // compact blob with the larger area
        draw_filled_rect_mut(&mut gray, Rect::at(20, 20).of_size(60, 60), Luma([230]));
        // long wire with the larger perimeter
        draw_filled_rect_mut(&mut gray, Rect::at(20, 150).of_size(260, 4), Luma([230]));
        let seam = extract_dominant(&gray, &EdgeOptions::default()).expect("contours exist");
        let bbox = seam.bounding_box().unwrap();
        assert!(bbox.width > 200, "expected the wire, got {bbox:?}");
        assert!(bbox.y > 140, "expected the wire, got {bbox:?}");
    }

    #[test]
    fn fill_mask_covers_interior() {
        let contour = Contour::new(vec![
            Point::new(10, 10),
            Point::new(40, 10),
            Point::new(40, 30),
            Point::new(10, 30),
        ]);
        let mask = fill_mask(&contour, 64, 48);
        assert_eq!(mask.get_pixel(25, 20).0[0], 255);
        assert_eq!(mask.get_pixel(5, 5).0[0], 0);
        assert_eq!(mask.get_pixel(50, 20).0[0], 0);
    }

    #[test]
    fn fill_mask_tolerates_closing_duplicate() {
        let contour = Contour::new(vec![
            Point::new(2, 2),
            Point::new(20, 2),
            Point::new(20, 20),
            Point::new(2, 2),
        ]);
        let mask = fill_mask(&contour, 32, 32);
        assert_eq!(mask.get_pixel(15, 8).0[0], 255);
    }

    #[test]
    fn traced_line_rasterises() {
        let mut gray = GrayImage::new(100, 60);
        draw_line_segment_mut(&mut gray, (5.0, 30.0), (95.0, 30.0), Luma([255]));
        let seam = extract_dominant(&gray, &EdgeOptions::unsmoothed()).expect("line edges");
        let mask = fill_mask(&seam, 100, 60);
        assert!(mask.pixels().any(|p| p.0[0] == 255));
    }
}
