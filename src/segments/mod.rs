//! Line segments from binary edge maps.
//!
//! This module implements the progressive probabilistic Hough transform
//! (PPHT) used to turn the seam's edge pixels into straight segments:
//!
//! - Edge pixels are visited in a fixed pseudo-random order. Each visited
//!   pixel votes into a (θ, ρ) accumulator; as soon as one bin reaches the
//!   vote threshold, the corresponding line is followed through the edge map
//!   in both directions from the pixel, tolerating gaps up to
//!   `max_line_gap` pixels.
//! - Pixels along the followed corridor are removed from the edge set and,
//!   when the corridor is long enough to be kept, their votes are withdrawn.
//!   Each pixel therefore contributes to at most one segment, which keeps the
//!   output sparse compared with the standard transform.
//! - Segments shorter than `min_line_length` (measured on the dominant axis)
//!   are dropped.
//!
//! The fixed visiting order makes results reproducible across runs, unlike
//! a randomly shuffled PPHT.
//!
//! Complexity: O(N·Θ) for N edge pixels and Θ angle bins, plus the corridor
//! walks which are linear in their length.

mod hough;
mod segment;

pub use hough::{hough_segments, HoughOptions};
pub use segment::LineSegment;
