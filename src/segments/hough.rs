use super::segment::LineSegment;
use image::GrayImage;
use log::debug;
use serde::Deserialize;
use std::time::Instant;

/// Fixed-point precision used while following a line through the raster.
const SHIFT: u32 = 16;
/// Seed of the deterministic visiting order.
const ORDER_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Parameters of the probabilistic Hough transform.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f32,
    /// Angle resolution of the accumulator in degrees.
    pub theta_deg: f32,
    /// Votes a (θ, ρ) bin needs before a line is followed.
    pub threshold: i32,
    /// Minimum extent of a kept segment along its dominant axis (pixels).
    pub min_line_length: i32,
    /// Largest run of missing edge pixels bridged while following a line.
    pub max_line_gap: i32,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta_deg: 1.0,
            threshold: 50,
            min_line_length: 30,
            max_line_gap: 10,
        }
    }
}

struct Accumulator {
    trig: Vec<(f32, f32)>,
    num_rho: usize,
    offset: i32,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(width: i32, height: i32, options: &HoughOptions) -> Self {
        let theta = options.theta_deg.max(0.01).to_radians();
        let rho = options.rho.max(0.01);
        let num_angle = ((std::f32::consts::PI / theta).round() as usize).max(1);
        let num_rho = (((width + height) * 2 + 1) as f32 / rho).round() as usize;
        let trig = (0..num_angle)
            .map(|n| {
                let a = n as f32 * theta;
                (a.cos() / rho, a.sin() / rho)
            })
            .collect();
        Self {
            trig,
            num_rho,
            offset: (num_rho as i32 - 1) / 2,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: i32, y: i32) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as i32 + self.offset;
        n * self.num_rho + r as usize
    }

    /// Add the votes of one pixel; returns the strongest bin it touched.
    fn vote(&mut self, x: i32, y: i32) -> (usize, i32) {
        let mut best = (0usize, i32::MIN);
        for n in 0..self.trig.len() {
            let idx = self.bin(n, x, y);
            self.votes[idx] += 1;
            if self.votes[idx] > best.1 {
                best = (n, self.votes[idx]);
            }
        }
        best
    }

    fn withdraw(&mut self, x: i32, y: i32) {
        for n in 0..self.trig.len() {
            let idx = self.bin(n, x, y);
            self.votes[idx] -= 1;
        }
    }
}

/// Deterministic Fisher-Yates shuffle (xorshift64).
fn shuffle(points: &mut [(i32, i32)]) {
    let mut state = ORDER_SEED;
    for i in (1..points.len()).rev() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let j = (state % (i as u64 + 1)) as usize;
        points.swap(i, j);
    }
}

/// Walk state along one followed line, in fixed point on the minor axis.
#[derive(Clone, Copy)]
struct Walker {
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
    x_major: bool,
}

impl Walker {
    #[inline]
    fn pixel(&self) -> (i32, i32) {
        if self.x_major {
            (self.x as i32, (self.y >> SHIFT) as i32)
        } else {
            ((self.x >> SHIFT) as i32, self.y as i32)
        }
    }

    #[inline]
    fn step(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    fn reversed(mut self) -> Self {
        self.dx = -self.dx;
        self.dy = -self.dy;
        self
    }
}

/// Extract straight segments from a binary edge map (non-zero = edge).
pub fn hough_segments(edges: &GrayImage, options: &HoughOptions) -> Vec<LineSegment> {
    let t0 = Instant::now();
    let (w, h) = (edges.width() as i32, edges.height() as i32);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let idx = |x: i32, y: i32| (y * w + x) as usize;

    let mut mask = vec![false; (w * h) as usize];
    let mut voted = vec![false; (w * h) as usize];
    let mut points = Vec::new();
    for (x, y, p) in edges.enumerate_pixels() {
        if p.0[0] > 0 {
            mask[idx(x as i32, y as i32)] = true;
            points.push((x as i32, y as i32));
        }
    }
    shuffle(&mut points);

    let mut acc = Accumulator::new(w, h, options);
    let mut lines = Vec::new();
    let inside = |(x, y): (i32, i32)| x >= 0 && x < w && y >= 0 && y < h;

    for &(px, py) in &points {
        if !mask[idx(px, py)] {
            continue;
        }
        let (best_n, best_votes) = acc.vote(px, py);
        voted[idx(px, py)] = true;
        if best_votes < options.threshold {
            continue;
        }

        // line direction is the normal (cos θ, sin θ) rotated by 90°
        let (c, s) = acc.trig[best_n];
        let (a, b) = (-s, c);
        let start = if a.abs() > b.abs() {
            Walker {
                x: px as i64,
                y: ((py as i64) << SHIFT) + (1 << (SHIFT - 1)),
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * (1i64 << SHIFT) as f32 / a.abs()).round() as i64,
                x_major: true,
            }
        } else {
            Walker {
                x: ((px as i64) << SHIFT) + (1 << (SHIFT - 1)),
                y: py as i64,
                dx: (a * (1i64 << SHIFT) as f32 / b.abs()).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        };

        // follow the line both ways to find its extent
        let mut line_end = [(px, py); 2];
        for (k, end) in line_end.iter_mut().enumerate() {
            let mut walker = if k == 0 { start } else { start.reversed() };
            let mut gap = 0;
            loop {
                let p = walker.pixel();
                if !inside(p) {
                    break;
                }
                if mask[idx(p.0, p.1)] {
                    gap = 0;
                    *end = p;
                } else {
                    gap += 1;
                    if gap > options.max_line_gap {
                        break;
                    }
                }
                walker.step();
            }
        }

        let good = (line_end[1].0 - line_end[0].0).abs() >= options.min_line_length
            || (line_end[1].1 - line_end[0].1).abs() >= options.min_line_length;

        // consume the corridor; withdraw votes only for a kept line
        for (k, end) in line_end.iter().enumerate() {
            let mut walker = if k == 0 { start } else { start.reversed() };
            loop {
                let p = walker.pixel();
                let i = idx(p.0, p.1);
                if mask[i] {
                    if good && voted[i] {
                        acc.withdraw(p.0, p.1);
                        voted[i] = false;
                    }
                    mask[i] = false;
                }
                if p == *end {
                    break;
                }
                walker.step();
            }
        }

        if good {
            lines.push(LineSegment::new(
                [line_end[0].0 as f32, line_end[0].1 as f32],
                [line_end[1].0 as f32, line_end[1].1 as f32],
            ));
        }
    }

    debug!(
        "hough: {} edge pixels -> {} segments in {:.2} ms",
        points.len(),
        lines.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    lines
}
