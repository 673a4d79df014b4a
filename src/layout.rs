use std::collections::HashMap;
use std::collections::hash_map;
use std::f64::consts::TAU;

use tracing::{debug, warn};

use crate::graph::{NodeId, SignedGraph, Topology};

/// Horizontal gap, in hop units, between packed components.
const COMPONENT_GAP: f64 = 1.0;
const MIN_SEPARATION: f64 = 1e-9;

/// A 2-D coordinate in layout (data) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Node positions keyed by identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<N: NodeId = String> {
    positions: HashMap<N, Point>,
}

impl<N: NodeId> Default for Layout<N> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }
}

impl<N: NodeId> Layout<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: N, pos: impl Into<Point>) -> Option<Point> {
        self.positions.insert(node, pos.into())
    }

    pub fn get(&self, node: &N) -> Option<Point> {
        self.positions.get(node).copied()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.positions.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, N, Point> {
        self.positions.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, N, Point> {
        self.positions.keys()
    }
}

impl<N: NodeId, P: Into<Point>> FromIterator<(N, P)> for Layout<N> {
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().map(|(n, p)| (n, p.into())).collect(),
        }
    }
}

/// A strategy that places every node of an unsigned topology.
pub trait LayoutAlgorithm<N: NodeId> {
    fn layout(&self, topology: &Topology<N>) -> Layout<N>;
}

/// Lays out `graph` with the default [`KamadaKawai`] settings.
///
/// Only the unsigned projection reaches the algorithm, so edge signs never
/// influence node placement.
pub fn compute_layout<N: NodeId>(graph: &SignedGraph<N>) -> Layout<N> {
    KamadaKawai::default().layout(&graph.unsigned_projection())
}

/// Nodes evenly spaced on a circle, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularLayout {
    pub scale: f64,
    pub center: Point,
}

impl Default for CircularLayout {
    fn default() -> Self {
        Self {
            scale: 1.0,
            center: Point::default(),
        }
    }
}

impl<N: NodeId> LayoutAlgorithm<N> for CircularLayout {
    fn layout(&self, topology: &Topology<N>) -> Layout<N> {
        let coords = circle(topology.len(), self.scale);
        topology
            .nodes()
            .iter()
            .cloned()
            .zip(coords)
            .map(|(node, p)| (node, Point::new(p.x + self.center.x, p.y + self.center.y)))
            .collect()
    }
}

/// Kamada–Kawai spring layout over shortest-path hop distances.
///
/// Minimizes `sum (|p_i - p_j| - d_ij)^2 / d_ij^2` by stress majorization,
/// starting from a circle. Disconnected components are solved separately and
/// packed left to right before the final rescale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KamadaKawai {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub scale: f64,
    pub center: Point,
}

impl Default for KamadaKawai {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tolerance: 1e-4,
            scale: 1.0,
            center: Point::default(),
        }
    }
}

impl<N: NodeId> LayoutAlgorithm<N> for KamadaKawai {
    fn layout(&self, topology: &Topology<N>) -> Layout<N> {
        if topology.is_empty() {
            return Layout::new();
        }

        let components = topology.connected_components();
        if components.len() > 1 {
            warn!(
                components = components.len(),
                "graph is disconnected; laying out components independently"
            );
        }

        let mut raw = vec![Point::default(); topology.len()];
        let mut offset_x = 0.0;
        let mut total_iterations = 0;

        for component in &components {
            let (coords, iterations) = self.solve_component(topology, component);
            total_iterations += iterations;

            let (min, max) = extent(&coords);
            let shift_x = offset_x - min.x;
            let shift_y = -(min.y + max.y) / 2.0;
            for (&node, p) in component.iter().zip(&coords) {
                raw[node] = Point::new(p.x + shift_x, p.y + shift_y);
            }
            offset_x += (max.x - min.x) + COMPONENT_GAP;
        }

        rescale(&mut raw, self.scale, self.center);
        debug!(
            nodes = topology.len(),
            components = components.len(),
            iterations = total_iterations,
            "computed kamada-kawai layout"
        );

        topology.nodes().iter().cloned().zip(raw).collect()
    }
}

impl KamadaKawai {
    fn solve_component<N: NodeId>(
        &self,
        topology: &Topology<N>,
        component: &[usize],
    ) -> (Vec<Point>, usize) {
        let m = component.len();
        if m == 1 {
            return (vec![Point::default()], 0);
        }

        let dist: Vec<Vec<f64>> = component
            .iter()
            .map(|&source| {
                let hops = topology.bfs_distances(source);
                component
                    .iter()
                    .map(|&target| hops[target].map_or(f64::INFINITY, |h| h as f64))
                    .collect()
            })
            .collect();

        // Circumference roughly m hops so neighbours start about one unit apart.
        let mut pos = circle(m, (m as f64 / TAU).max(0.5));
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;
            let mut max_shift: f64 = 0.0;

            for i in 0..m {
                let (mut sum_x, mut sum_y, mut total_weight) = (0.0, 0.0, 0.0);
                for j in 0..m {
                    if i == j {
                        continue;
                    }
                    let d = dist[i][j];
                    let w = 1.0 / (d * d);
                    let dx = pos[i].x - pos[j].x;
                    let dy = pos[i].y - pos[j].y;
                    let norm = dx.hypot(dy);
                    let (ux, uy) = if norm > MIN_SEPARATION {
                        (dx / norm, dy / norm)
                    } else {
                        (0.0, 0.0)
                    };
                    sum_x += w * (pos[j].x + d * ux);
                    sum_y += w * (pos[j].y + d * uy);
                    total_weight += w;
                }

                let next = Point::new(sum_x / total_weight, sum_y / total_weight);
                max_shift = max_shift.max(next.distance(&pos[i]));
                pos[i] = next;
            }

            if max_shift < self.tolerance {
                break;
            }
        }

        (pos, iterations)
    }
}

fn circle(n: usize, radius: f64) -> Vec<Point> {
    if n == 1 {
        return vec![Point::default()];
    }
    (0..n)
        .map(|k| {
            let theta = TAU * k as f64 / n as f64;
            Point::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

fn extent(points: &[Point]) -> (Point, Point) {
    let mut min = Point::new(f64::MAX, f64::MAX);
    let mut max = Point::new(f64::MIN, f64::MIN);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// Centers `points` on `center` and scales the largest absolute
/// coordinate to `scale`.
fn rescale(points: &mut [Point], scale: f64, center: Point) {
    if points.is_empty() {
        return;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut lim: f64 = 0.0;
    for p in points.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        lim = lim.max(p.x.abs()).max(p.y.abs());
    }

    let factor = if lim > 0.0 { scale / lim } else { 0.0 };
    for p in points.iter_mut() {
        p.x = p.x * factor + center.x;
        p.y = p.y * factor + center.y;
    }
}
