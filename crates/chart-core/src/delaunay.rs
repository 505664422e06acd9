// File: crates/chart-core/src/delaunay.rs
// Summary: Incremental Delaunay triangulation (Bowyer–Watson) and its Voronoi dual.
// Notes:
// - Input points must be finite and pairwise distinct; the hover resolver dedupes first.
// - A large enclosing triangle seeds the mesh; its three vertices never show up in the
//   neighbour graph, but their triangles still close the Voronoi cells of hull points.

use rustc_hash::FxHashMap;

use crate::geometry::{in_circle, orient, Point, Rect};

const NONE: usize = usize::MAX;

/// How far the seed triangle reaches, in multiples of the bounding box size.
const SEED_REACH: f64 = 100.0;

#[derive(Clone, Copy, Debug)]
struct Triangle {
    /// Counter-clockwise (positive `orient`) vertex indices.
    v: [usize; 3],
    /// `adj[k]` is the triangle across the edge opposite `v[k]`.
    adj: [usize; 3],
    alive: bool,
}

impl Triangle {
    #[inline]
    fn edge(&self, k: usize) -> (usize, usize) {
        (self.v[(k + 1) % 3], self.v[(k + 2) % 3])
    }
}

/// Delaunay mesh over a point set, with neighbour lists in compressed form.
#[derive(Clone, Debug)]
pub struct Triangulation {
    /// Input points followed by the three seed vertices.
    points: Vec<Point>,
    real: usize,
    triangles: Vec<Triangle>,
    offsets: Vec<usize>,
    neighbors: Vec<usize>,
}

impl Triangulation {
    /// Triangulate `points`. Fewer than two points yields an empty mesh with no neighbours.
    pub fn build(points: &[Point]) -> Self {
        let real = points.len();
        let mut mesh = Self {
            points: points.to_vec(),
            real,
            triangles: Vec::new(),
            offsets: vec![0; real + 1],
            neighbors: Vec::new(),
        };
        if real < 2 {
            return mesh;
        }

        mesh.seed();

        // Insert in (x, y) order so each walk starts next to the previous insertion.
        let mut order: Vec<usize> = (0..real).collect();
        order.sort_by(|&a, &b| {
            let (pa, pb) = (points[a], points[b]);
            pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y))
        });

        let mut inserter = Inserter::default();
        for i in order {
            inserter.insert(&mut mesh, i);
        }
        mesh.collect_neighbors();
        mesh
    }

    pub fn len(&self) -> usize { self.real }
    pub fn is_empty(&self) -> bool { self.real == 0 }

    pub fn point(&self, i: usize) -> Point { self.points[i] }

    /// Voronoi neighbours of site `i` (Delaunay edges), ascending.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Triangles made only of input points.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.triangles
            .iter()
            .filter(move |t| t.alive && t.v.iter().all(|&v| v < self.real))
            .map(|t| t.v)
    }

    /// Voronoi cell of site `i`, clipped to `clip`, as a counter-clockwise polygon.
    ///
    /// Hull cells are unbounded in theory; here they are closed by the seed triangle,
    /// which lies far enough outside any sane clip rectangle to be invisible.
    pub fn cell(&self, i: usize, clip: &Rect) -> Vec<Point> {
        if i >= self.real {
            return Vec::new();
        }
        let site = self.points[i];
        if self.real == 1 {
            return rect_polygon(clip);
        }

        let mut centers: Vec<Point> = self
            .triangles
            .iter()
            .filter(|t| t.alive && t.v.contains(&i))
            .filter_map(|t| circumcenter(self.points[t.v[0]], self.points[t.v[1]], self.points[t.v[2]]))
            .collect();
        centers.sort_by(|a, b| {
            let ta = (a.y - site.y).atan2(a.x - site.x);
            let tb = (b.y - site.y).atan2(b.x - site.x);
            ta.total_cmp(&tb)
        });
        centers.dedup_by(|a, b| a.dist2(*b) < 1e-18);
        clip_to_rect(&centers, clip)
    }

    fn seed(&mut self) {
        let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
        let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.points[..self.real] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        let d = (x1 - x0).max(y1 - y0).max(1.0);
        let (cx, cy) = ((x0 + x1) * 0.5, (y0 + y1) * 0.5);

        let s = self.real;
        self.points.push(Point::new(cx - SEED_REACH * d, cy - d));
        self.points.push(Point::new(cx + SEED_REACH * d, cy - d));
        self.points.push(Point::new(cx, cy + SEED_REACH * d));
        self.triangles.push(Triangle { v: [s, s + 1, s + 2], adj: [NONE; 3], alive: true });
    }

    fn collect_neighbors(&mut self) {
        let mut lists: Vec<Vec<usize>> = vec![Vec::new(); self.real];
        for t in self.triangles.iter().filter(|t| t.alive) {
            for k in 0..3 {
                let (a, b) = t.edge(k);
                if a < self.real && b < self.real {
                    lists[a].push(b);
                    lists[b].push(a);
                }
            }
        }

        self.offsets.clear();
        self.neighbors.clear();
        self.offsets.push(0);
        for mut l in lists {
            l.sort_unstable();
            l.dedup();
            self.neighbors.extend_from_slice(&l);
            self.offsets.push(self.neighbors.len());
        }
    }
}

/// Scratch state reused across insertions.
#[derive(Default)]
struct Inserter {
    /// Per-triangle stamp; equal to `round` while the triangle is in the cavity.
    mark: Vec<usize>,
    round: usize,
    last: usize,
    cavity: Vec<usize>,
    stack: Vec<usize>,
    boundary: Vec<(usize, usize, usize, usize)>,
}

impl Inserter {
    fn in_cavity(&self, t: usize) -> bool {
        t != NONE && self.mark.get(t).copied() == Some(self.round)
    }

    fn insert(&mut self, mesh: &mut Triangulation, pi: usize) {
        let p = mesh.points[pi];
        let Some(start) = self.locate(mesh, p) else {
            tracing::warn!(point = pi, "point outside the mesh; skipped");
            return;
        };

        self.round += 1;
        self.mark.resize(mesh.triangles.len(), 0);
        self.grow_cavity(mesh, start, p);
        self.repair_cavity(mesh, start, p);

        // Boundary edges of the cavity, as (a, b, outer triangle, old triangle).
        self.boundary.clear();
        for &t in &self.cavity {
            let tri = mesh.triangles[t];
            for k in 0..3 {
                if !self.in_cavity(tri.adj[k]) {
                    let (a, b) = tri.edge(k);
                    self.boundary.push((a, b, tri.adj[k], t));
                }
            }
        }
        for &t in &self.cavity {
            mesh.triangles[t].alive = false;
        }

        let first_new = mesh.triangles.len();
        let mut by_start: FxHashMap<usize, usize> = FxHashMap::default();
        let mut by_end: FxHashMap<usize, usize> = FxHashMap::default();
        for (n, &(a, b, outer, old)) in self.boundary.iter().enumerate() {
            let id = first_new + n;
            mesh.triangles.push(Triangle { v: [a, b, pi], adj: [NONE, NONE, outer], alive: true });
            by_start.insert(a, id);
            by_end.insert(b, id);
            if outer != NONE {
                if let Some(slot) = mesh.triangles[outer].adj.iter_mut().find(|s| **s == old) {
                    *slot = id;
                }
            }
        }
        for id in first_new..mesh.triangles.len() {
            let [a, b, _] = mesh.triangles[id].v;
            // Edge (b, p) is shared with the fan triangle starting at b, edge (p, a)
            // with the one ending at a.
            mesh.triangles[id].adj[0] = by_start.get(&b).copied().unwrap_or(NONE);
            mesh.triangles[id].adj[1] = by_end.get(&a).copied().unwrap_or(NONE);
        }
        if mesh.triangles.len() > first_new {
            self.last = mesh.triangles.len() - 1;
        }
    }

    /// Visibility walk from the last inserted triangle, with a full scan as the fallback
    /// when round-off sends the walk in circles.
    fn locate(&self, mesh: &Triangulation, p: Point) -> Option<usize> {
        let mut t = if mesh.triangles.get(self.last).is_some_and(|t| t.alive) {
            self.last
        } else {
            mesh.triangles.iter().position(|t| t.alive)?
        };

        let limit = mesh.triangles.len() + 16;
        'walk: for step in 0..limit {
            let tri = mesh.triangles[t];
            for j in 0..3 {
                let k = (j + step) % 3;
                let (a, b) = tri.edge(k);
                if orient(mesh.points[a], mesh.points[b], p) < 0.0 && tri.adj[k] != NONE {
                    t = tri.adj[k];
                    continue 'walk;
                }
            }
            return Some(t);
        }

        mesh.triangles.iter().position(|tri| {
            tri.alive && (0..3).all(|k| {
                let (a, b) = tri.edge(k);
                orient(mesh.points[a], mesh.points[b], p) >= 0.0
            })
        })
    }

    /// Collect every triangle whose circumcircle holds `p`, flooding from `start`.
    fn grow_cavity(&mut self, mesh: &Triangulation, start: usize, p: Point) {
        self.cavity.clear();
        self.stack.clear();
        self.mark[start] = self.round;
        self.cavity.push(start);
        self.stack.push(start);

        while let Some(t) = self.stack.pop() {
            for &n in &mesh.triangles[t].adj {
                if n == NONE || self.in_cavity(n) {
                    continue;
                }
                let [a, b, c] = mesh.triangles[n].v;
                if in_circle(mesh.points[a], mesh.points[b], mesh.points[c], p) > 0.0 {
                    self.mark[n] = self.round;
                    self.cavity.push(n);
                    self.stack.push(n);
                }
            }
        }
    }

    /// Keep the cavity star-shaped around `p`: drop triangles owning a boundary edge that
    /// `p` cannot see, then drop anything no longer connected to `start`.
    fn repair_cavity(&mut self, mesh: &Triangulation, start: usize, p: Point) {
        loop {
            let mut dropped = false;
            let mut i = 0;
            while i < self.cavity.len() {
                let t = self.cavity[i];
                let tri = mesh.triangles[t];
                let hidden = t != start
                    && (0..3).any(|k| {
                        if self.in_cavity(tri.adj[k]) {
                            return false;
                        }
                        let (a, b) = tri.edge(k);
                        orient(mesh.points[a], mesh.points[b], p) <= 0.0
                    });
                if hidden {
                    self.mark[t] = 0;
                    self.cavity.swap_remove(i);
                    dropped = true;
                } else {
                    i += 1;
                }
            }
            if !dropped {
                return;
            }

            // Reconnect from `start`; anything unreachable leaves the cavity.
            let members = std::mem::take(&mut self.cavity);
            self.round += 1;
            for &t in &members {
                self.mark[t] = self.round - 1;
            }
            self.stack.clear();
            self.stack.push(start);
            self.mark[start] = self.round;
            self.cavity.push(start);
            while let Some(t) = self.stack.pop() {
                for &n in &mesh.triangles[t].adj {
                    if n != NONE && self.mark[n] == self.round - 1 {
                        self.mark[n] = self.round;
                        self.cavity.push(n);
                        self.stack.push(n);
                    }
                }
            }
        }
    }
}

/// Circumcenter of `abc`, or `None` for a degenerate (collinear) triangle.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;
    let d = 2.0 * (bx * cy - by * cx);
    if d.abs() < 1e-300 {
        return None;
    }
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    Some(Point::new(a.x + (cy * b2 - by * c2) / d, a.y + (bx * c2 - cx * b2) / d))
}

fn rect_polygon(r: &Rect) -> Vec<Point> {
    vec![
        Point::new(r.left, r.top),
        Point::new(r.right, r.top),
        Point::new(r.right, r.bottom),
        Point::new(r.left, r.bottom),
    ]
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    fn inside(self, p: Point, r: &Rect) -> bool {
        match self {
            Side::Left => p.x >= r.left,
            Side::Right => p.x <= r.right,
            Side::Top => p.y >= r.top,
            Side::Bottom => p.y <= r.bottom,
        }
    }

    /// Where segment `ab` crosses this side's line.
    fn cross(self, a: Point, b: Point, r: &Rect) -> Point {
        match self {
            Side::Left | Side::Right => {
                let x = if matches!(self, Side::Left) { r.left } else { r.right };
                let t = (x - a.x) / (b.x - a.x);
                Point::new(x, a.y + t * (b.y - a.y))
            }
            Side::Top | Side::Bottom => {
                let y = if matches!(self, Side::Top) { r.top } else { r.bottom };
                let t = (y - a.y) / (b.y - a.y);
                Point::new(a.x + t * (b.x - a.x), y)
            }
        }
    }
}

/// Sutherland–Hodgman clip of a convex polygon against an axis-aligned rectangle.
fn clip_to_rect(poly: &[Point], r: &Rect) -> Vec<Point> {
    let mut out = poly.to_vec();
    for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
        if out.is_empty() {
            break;
        }
        let input = std::mem::take(&mut out);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            match (side.inside(cur, r), side.inside(prev, r)) {
                (true, true) => out.push(cur),
                (true, false) => {
                    out.push(side.cross(prev, cur, r));
                    out.push(cur);
                }
                (false, true) => out.push(side.cross(prev, cur, r)),
                (false, false) => {}
            }
            prev = cur;
        }
    }
    out
}
