// File: crates/chart-core/src/hover.rs
// Summary: Pointer → nearest sample resolution over the Voronoi diagram of projected samples.
// Notes:
// - Distances are Euclidean in plot pixels, never in data space.
// - Queries are pure: the same pointer against the same resolver always yields the same sample.

use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::delaunay::Triangulation;
use crate::geometry::{Point, Rect};
use crate::path::LineGenerator;
use crate::series::{Dataset, SampleId};

/// Squared distances within this relative tolerance count as a tie.
const TIE_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverConfig {
    /// Below this many distinct projected points the resolver skips the Voronoi build
    /// and scans linearly. A scan over a few dozen points is cheaper than walking a mesh.
    pub brute_force_below: usize,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self { brute_force_below: 64 }
    }
}

/// Which lookup structure a resolver ended up with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Empty,
    Linear,
    Voronoi,
}

#[derive(Clone, Debug)]
enum Index {
    Empty,
    Linear,
    Voronoi {
        mesh: Triangulation,
        /// Sites sorted by x, used to pick a walk start close to the pointer.
        by_x: Vec<(f64, usize)>,
    },
}

/// Nearest-sample lookup for one dataset under one pair of scales.
///
/// Rebuild it whenever the dataset or the scales change; nothing here tracks either.
#[derive(Clone, Debug)]
pub struct HoverResolver {
    plot: Rect,
    /// `plot` grown to cover every site; the top sample can project above the plot.
    hit: Rect,
    /// Projected position of every sample, flat order.
    positions: Vec<Point>,
    /// Flat offset of each series' first sample.
    series_offsets: Vec<usize>,
    /// Distinct projected points; index order follows first appearance in flat order.
    sites: Vec<Point>,
    /// Sample owning each site (the first one projected there).
    owners: Vec<SampleId>,
    index: Index,
}

impl HoverResolver {
    pub fn build(
        dataset: &Dataset,
        line: &LineGenerator,
        inner_width: f64,
        inner_height: f64,
        config: &HoverConfig,
    ) -> Self {
        let started = Instant::now();
        let mut positions = Vec::with_capacity(dataset.sample_count());
        let mut series_offsets = Vec::with_capacity(dataset.series().len());
        let mut sites = Vec::new();
        let mut owners = Vec::new();
        let mut seen: FxHashMap<(u64, u64), usize> = FxHashMap::default();

        for (si, series) in dataset.series().iter().enumerate() {
            series_offsets.push(positions.len());
            for (i, sample) in series.samples.iter().enumerate() {
                let p = line.project(sample);
                positions.push(p);
                if !p.is_finite() {
                    continue;
                }
                // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
                let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
                seen.entry(key).or_insert_with(|| {
                    sites.push(p);
                    owners.push(SampleId::new(si, i));
                    sites.len() - 1
                });
            }
        }

        let index = if sites.is_empty() {
            Index::Empty
        } else if sites.len() < config.brute_force_below {
            Index::Linear
        } else {
            let mesh = Triangulation::build(&sites);
            let mut by_x: Vec<(f64, usize)> = sites.iter().enumerate().map(|(i, p)| (p.x, i)).collect();
            by_x.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            Index::Voronoi { mesh, by_x }
        };

        let plot = Rect::from_ltwh(0.0, 0.0, inner_width, inner_height);
        let hit = sites.iter().fold(plot, |r, p| {
            Rect::from_ltrb(r.left.min(p.x), r.top.min(p.y), r.right.max(p.x), r.bottom.max(p.y))
        });
        let resolver = Self {
            plot,
            hit,
            positions,
            series_offsets,
            sites,
            owners,
            index,
        };
        debug!(
            samples = resolver.positions.len(),
            sites = resolver.sites.len(),
            strategy = ?resolver.strategy(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "built hover resolver"
        );
        resolver
    }

    pub fn strategy(&self) -> Strategy {
        match self.index {
            Index::Empty => Strategy::Empty,
            Index::Linear => Strategy::Linear,
            Index::Voronoi { .. } => Strategy::Voronoi,
        }
    }

    /// Plot rectangle in inner coordinates.
    pub fn plot_rect(&self) -> Rect {
        self.plot
    }

    /// Area where pointers resolve: the plot plus any site projected past its edges.
    pub fn hit_rect(&self) -> Rect {
        self.hit
    }

    /// Projected position of `id`, identical to what the line generator produced.
    pub fn position(&self, id: SampleId) -> Option<Point> {
        let start = *self.series_offsets.get(id.series)?;
        let end = self.series_offsets.get(id.series + 1).copied().unwrap_or(self.positions.len());
        let flat = start + id.index;
        (flat < end).then(|| self.positions[flat])
    }

    /// Nearest sample to `pointer` (inner plot coordinates).
    pub fn find(&self, pointer: Point) -> Option<SampleId> {
        if !pointer.is_finite() || !self.hit.contains(pointer) {
            return None;
        }
        let site = match &self.index {
            Index::Empty => return None,
            Index::Linear => self.scan(pointer),
            Index::Voronoi { mesh, by_x } => self.walk(mesh, by_x, pointer),
        }?;
        self.owners.get(site).copied()
    }

    /// Voronoi cell of every distinct site, clipped to the plot, keyed by owning sample.
    pub fn cells(&self) -> Vec<(SampleId, Vec<Point>)> {
        let scratch;
        let mesh = match &self.index {
            Index::Empty => return Vec::new(),
            Index::Voronoi { mesh, .. } => mesh,
            Index::Linear => {
                scratch = Triangulation::build(&self.sites);
                &scratch
            }
        };
        self.owners
            .iter()
            .enumerate()
            .map(|(site, &owner)| (owner, mesh.cell(site, &self.plot)))
            .collect()
    }

    fn scan(&self, pointer: Point) -> Option<usize> {
        let best = self
            .sites
            .iter()
            .map(|p| p.dist2(pointer))
            .fold(f64::INFINITY, f64::min);
        self.sites.iter().position(|p| is_tie(p.dist2(pointer), best))
    }

    /// Greedy descent over Voronoi neighbours, then the lowest site among exact ties.
    fn walk(&self, mesh: &Triangulation, by_x: &[(f64, usize)], pointer: Point) -> Option<usize> {
        let mut current = start_site(by_x, pointer.x)?;
        let mut best = self.sites[current].dist2(pointer);
        loop {
            let mut moved = false;
            for &n in mesh.neighbors(current) {
                let d = self.sites[n].dist2(pointer);
                if d < best {
                    best = d;
                    current = n;
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }

        // Equidistant sites share Voronoi edges or a vertex, so they are reachable
        // from each other through tied neighbours.
        let mut winner = current;
        let mut stack = vec![current];
        let mut visited = vec![current];
        while let Some(s) = stack.pop() {
            for &n in mesh.neighbors(s) {
                if visited.contains(&n) || !is_tie(self.sites[n].dist2(pointer), best) {
                    continue;
                }
                visited.push(n);
                stack.push(n);
                winner = winner.min(n);
            }
        }
        Some(winner)
    }
}

#[inline]
fn is_tie(d: f64, best: f64) -> bool {
    d <= best || (d - best).abs() <= TIE_TOLERANCE * best.max(f64::MIN_POSITIVE)
}

/// Site whose x is closest to `x`; lower site index on equal x.
fn start_site(by_x: &[(f64, usize)], x: f64) -> Option<usize> {
    let i = by_x.partition_point(|&(sx, _)| sx < x);
    let after = by_x.get(i);
    let before = i.checked_sub(1).and_then(|j| by_x.get(j));
    match (before, after) {
        (Some(b), Some(a)) => Some(if x - b.0 <= a.0 - x { b.1 } else { a.1 }),
        (Some(b), None) => Some(b.1),
        (None, Some(a)) => Some(a.1),
        (None, None) => None,
    }
}
