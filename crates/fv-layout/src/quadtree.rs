//! Barnes-Hut quadtree for the charge force.
//!
//! Cells are stored in a flat arena. Each cell keeps the number of bodies
//! below it and their centroid, which stands in for the whole cell when it
//! is far enough from the query point.

use fv_core::{Real, Vec2, vec2};

const MAX_DEPTH: usize = 24;

#[derive(Debug, Clone)]
struct Cell {
    center: Vec2,
    half: Real,
    mass: Real,
    centroid: Vec2,
    children: Option<[usize; 4]>,
    bodies: Vec<usize>,
}

impl Cell {
    fn new(center: Vec2, half: Real) -> Self {
        Self {
            center,
            half,
            mass: 0.0,
            centroid: Vec2::zeros(),
            children: None,
            bodies: Vec::new(),
        }
    }

    fn quadrant(&self, p: &Vec2) -> usize {
        usize::from(p.x >= self.center.x) | (usize::from(p.y >= self.center.y) << 1)
    }

    fn contains(&self, p: &Vec2) -> bool {
        (p.x - self.center.x).abs() <= self.half && (p.y - self.center.y).abs() <= self.half
    }
}

/// Spatial index over a snapshot of positions.
#[derive(Debug, Clone)]
pub struct QuadTree<'a> {
    points: &'a [Vec2],
    cells: Vec<Cell>,
    theta: Real,
}

impl<'a> QuadTree<'a> {
    /// Build over `points`. Non-finite points are skipped.
    pub fn build(points: &'a [Vec2], theta: Real) -> Self {
        let mut min = vec2(Real::INFINITY, Real::INFINITY);
        let mut max = vec2(Real::NEG_INFINITY, Real::NEG_INFINITY);
        for p in points.iter().filter(|p| p.x.is_finite() && p.y.is_finite()) {
            min = vec2(min.x.min(p.x), min.y.min(p.y));
            max = vec2(max.x.max(p.x), max.y.max(p.y));
        }

        let mut tree = Self {
            points,
            cells: Vec::new(),
            theta,
        };
        if min.x > max.x {
            return tree;
        }

        let size = max - min;
        let extent = size.x.max(size.y).max(1.0);
        tree.cells.push(Cell::new((min + max) / 2.0, extent / 2.0));
        for (i, p) in points.iter().enumerate() {
            if p.x.is_finite() && p.y.is_finite() {
                tree.insert(0, i, 0);
            }
        }
        tree.accumulate(0);
        tree
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn insert(&mut self, cell: usize, body: usize, depth: usize) {
        let p = self.points[body];
        if let Some(children) = self.cells[cell].children {
            let q = self.cells[cell].quadrant(&p);
            self.insert(children[q], body, depth + 1);
            return;
        }

        let leaf = &mut self.cells[cell];
        if leaf.bodies.is_empty() || depth >= MAX_DEPTH {
            leaf.bodies.push(body);
            return;
        }

        // Split the leaf and push its bodies down.
        let center = leaf.center;
        let quarter = leaf.half / 2.0;
        let moved = std::mem::take(&mut leaf.bodies);
        let first = self.cells.len();
        for q in 0..4 {
            let dx = if q & 1 == 1 { quarter } else { -quarter };
            let dy = if q & 2 == 2 { quarter } else { -quarter };
            self.cells.push(Cell::new(center + vec2(dx, dy), quarter));
        }
        self.cells[cell].children = Some([first, first + 1, first + 2, first + 3]);
        for b in moved {
            self.insert(cell, b, depth);
        }
        self.insert(cell, body, depth);
    }

    fn accumulate(&mut self, cell: usize) -> (Real, Vec2) {
        let (mass, weighted) = match self.cells[cell].children {
            Some(children) => children.iter().fold((0.0, Vec2::zeros()), |(m, w), &c| {
                let (cm, cc) = self.accumulate(c);
                (m + cm, w + cc * cm)
            }),
            None => {
                let bodies = &self.cells[cell].bodies;
                let sum = bodies
                    .iter()
                    .fold(Vec2::zeros(), |acc, &b| acc + self.points[b]);
                (bodies.len() as Real, sum)
            }
        };
        let centroid = if mass > 0.0 { weighted / mass } else { Vec2::zeros() };
        let c = &mut self.cells[cell];
        c.mass = mass;
        c.centroid = centroid;
        (mass, centroid)
    }

    /// Velocity contribution on body `index` from every other body.
    ///
    /// Each body at offset `d` contributes `d * k / max(|d|^2, min_distance^2)`;
    /// far cells contribute once with their body count as weight.
    pub fn charge_on(&self, index: usize, k: Real, min_distance: Real) -> Vec2 {
        let mut out = Vec2::zeros();
        if self.cells.is_empty() {
            return out;
        }
        let p = self.points[index];
        let min2 = min_distance * min_distance;
        let mut stack = vec![0usize];
        while let Some(ci) = stack.pop() {
            let cell = &self.cells[ci];
            if cell.mass == 0.0 {
                continue;
            }
            let delta = cell.centroid - p;
            let d2 = delta.norm_squared();
            match cell.children {
                Some(children) => {
                    let width = cell.half * 2.0;
                    if !cell.contains(&p) && width * width < self.theta * self.theta * d2 {
                        out += delta * (k * cell.mass / d2.max(min2));
                    } else {
                        stack.extend_from_slice(&children);
                    }
                }
                None => {
                    for &b in cell.bodies.iter().filter(|&&b| b != index) {
                        let delta = self.points[b] - p;
                        out += delta * (k / delta.norm_squared().max(min2));
                    }
                }
            }
        }
        out
    }
}
