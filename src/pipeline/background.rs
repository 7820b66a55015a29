//! Border-connected background segmentation.
//!
//! The background colour is voted from eight probes on the image border, then
//! a breadth-first flood fill seeded from every border pixel marks pixels
//! within the threshold. Regions of the same colour that are enclosed by
//! foreground are never reached.

use std::collections::{HashMap, VecDeque};

use image::RgbaImage;

use crate::types::Colour;

/// Squared Euclidean distance from black to white in RGB space.
/// The distance itself is `255 * sqrt(3)`.
pub const MAX_RGB_DISTANCE_SQ: f64 = 3.0 * 255.0 * 255.0;

/// Per-pixel background flags, row-major at pixel buffer resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl BackgroundMask {
    /// A mask with no background pixels.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` is background. Out-of-range positions are not.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Number of background pixels.
    pub fn len(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    pub(crate) fn insert(&mut self, x: usize, y: usize) {
        self.bits[y * self.width + x] = true;
    }
}

/// The eight border probe positions: corners, then edge midpoints.
pub fn probe_points(width: u32, height: u32) -> [(u32, u32); 8] {
    let (right, bottom) = (width - 1, height - 1);
    let (mid_x, mid_y) = (width / 2, height / 2);
    [
        (0, 0),
        (right, 0),
        (0, bottom),
        (right, bottom),
        (mid_x, 0),
        (mid_x, bottom),
        (0, mid_y),
        (right, mid_y),
    ]
}

/// The most frequent RGB colour among the probe points.
///
/// Ties go to the colour that was probed first.
pub fn sample_background(pixels: &RgbaImage) -> Option<Colour> {
    let (width, height) = pixels.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let mut order: Vec<Colour> = Vec::with_capacity(8);
    let mut counts: HashMap<Colour, usize> = HashMap::new();
    for (x, y) in probe_points(width, height) {
        let colour = Colour::from(*pixels.get_pixel(x, y)).opaque();
        let count = counts.entry(colour).or_insert(0);
        if *count == 0 {
            order.push(colour);
        }
        *count += 1;
    }

    let mut best: Option<(Colour, usize)> = None;
    for colour in order {
        let n = counts[&colour];
        if best.map_or(true, |(_, m)| n > m) {
            best = Some((colour, n));
        }
    }
    best.map(|(c, _)| c)
}

/// Normalized RGB distance in `[0, 1]`.
pub fn normalized_distance(a: Colour, b: Colour) -> f64 {
    (a.distance_sq(b) as f64 / MAX_RGB_DISTANCE_SQ).sqrt()
}

/// Flood-fill the border-connected background region.
///
/// `threshold` is a percentage in `[0, 100]`; a pixel joins the background
/// when its normalized distance to the sampled colour is strictly below
/// `threshold / 100`. Each pixel is visited at most once.
pub fn segment_background(pixels: &RgbaImage, threshold: u8) -> BackgroundMask {
    let (w, h) = pixels.dimensions();
    let (width, height) = (w as usize, h as usize);
    let mut mask = BackgroundMask::empty(width, height);

    let Some(seed) = sample_background(pixels) else {
        return mask;
    };
    let bound = f64::from(threshold.min(100)) / 100.0;

    let is_background = |x: usize, y: usize| {
        let colour = Colour::from(*pixels.get_pixel(x as u32, y as u32));
        normalized_distance(colour, seed) < bound
    };

    let mut visited = vec![false; width * height];
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

    let mut visit = |x: usize,
                     y: usize,
                     queue: &mut VecDeque<(usize, usize)>,
                     mask: &mut BackgroundMask| {
        let i = y * width + x;
        if visited[i] {
            return;
        }
        visited[i] = true;
        if is_background(x, y) {
            mask.insert(x, y);
            queue.push_back((x, y));
        }
    };

    for x in 0..width {
        visit(x, 0, &mut queue, &mut mask);
        visit(x, height - 1, &mut queue, &mut mask);
    }
    for y in 0..height {
        visit(0, y, &mut queue, &mut mask);
        visit(width - 1, y, &mut queue, &mut mask);
    }

    while let Some((x, y)) = queue.pop_front() {
        if x > 0 {
            visit(x - 1, y, &mut queue, &mut mask);
        }
        if x + 1 < width {
            visit(x + 1, y, &mut queue, &mut mask);
        }
        if y > 0 {
            visit(x, y - 1, &mut queue, &mut mask);
        }
        if y + 1 < height {
            visit(x, y + 1, &mut queue, &mut mask);
        }
    }

    mask
}
