//! Polyline paths built from control points with linear and bezier segments.
//!
//! A control point carrying a [`SegmentKind`] starts a new segment that runs up
//! to (and includes) the next typed point. The sampled polyline keeps
//! cumulative arc lengths so sub-ranges can be cut by progress fraction.

use glam::Vec2;

/// Target spacing between bezier samples along the control polygon.
const BEZIER_STEP_PX: f32 = 2.0;
const BEZIER_MIN_STEPS: usize = 4;
const BEZIER_MAX_STEPS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Linear,
    Bezier,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub pos: Vec2,
    pub kind: Option<SegmentKind>,
}

impl ControlPoint {
    #[inline(always)]
    pub const fn typed(pos: Vec2, kind: SegmentKind) -> Self {
        Self {
            pos,
            kind: Some(kind),
        }
    }

    #[inline(always)]
    pub const fn plain(pos: Vec2) -> Self {
        Self { pos, kind: None }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Path {
    vertices: Vec<Vec2>,
    cumulative: Vec<f32>,
}

fn bezier_point(points: &[Vec2], t: f32, scratch: &mut Vec<Vec2>) -> Vec2 {
    scratch.clear();
    scratch.extend_from_slice(points);
    let n = scratch.len();
    for level in 1..n {
        for i in 0..n - level {
            scratch[i] = scratch[i].lerp(scratch[i + 1], t);
        }
    }
    scratch.first().copied().unwrap_or(Vec2::ZERO)
}

fn push_unique(out: &mut Vec<Vec2>, p: Vec2) {
    if out.last().is_some_and(|last| last.distance_squared(p) <= f32::EPSILON) {
        return;
    }
    out.push(p);
}

fn flush_segment(kind: SegmentKind, points: &[Vec2], out: &mut Vec<Vec2>) {
    match kind {
        // A two-point bezier is just a line.
        SegmentKind::Linear => points.iter().for_each(|&p| push_unique(out, p)),
        SegmentKind::Bezier if points.len() <= 2 => points.iter().for_each(|&p| push_unique(out, p)),
        SegmentKind::Bezier => {
            let polygon: f32 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
            let steps = ((polygon / BEZIER_STEP_PX).ceil() as usize)
                .clamp(BEZIER_MIN_STEPS, BEZIER_MAX_STEPS);
            let mut scratch = Vec::with_capacity(points.len());
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                push_unique(out, bezier_point(points, t, &mut scratch));
            }
        }
    }
}

impl Path {
    pub fn new(control_points: &[ControlPoint]) -> Self {
        let mut vertices = Vec::new();
        let Some(first) = control_points.first() else {
            return Self::default();
        };

        let mut kind = first.kind.unwrap_or(SegmentKind::Linear);
        let mut segment = vec![first.pos];
        let last_ix = control_points.len() - 1;
        for (i, cp) in control_points.iter().enumerate().skip(1) {
            segment.push(cp.pos);
            if let Some(next_kind) = cp.kind
                && i != last_ix
            {
                flush_segment(kind, &segment, &mut vertices);
                segment.clear();
                segment.push(cp.pos);
                kind = next_kind;
            }
        }
        flush_segment(kind, &segment, &mut vertices);

        let mut cumulative = Vec::with_capacity(vertices.len());
        let mut acc = 0.0_f32;
        for (i, v) in vertices.iter().enumerate() {
            if i > 0 {
                acc += vertices[i - 1].distance(*v);
            }
            cumulative.push(acc);
        }
        Self {
            vertices,
            cumulative,
        }
    }

    #[inline(always)]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Total arc length.
    #[inline(always)]
    pub fn distance(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn interpolate(&self, i: usize, d: f32) -> Vec2 {
        let n = self.vertices.len();
        if i == 0 {
            return self.vertices[0];
        }
        if i >= n {
            return self.vertices[n - 1];
        }
        let d0 = self.cumulative[i - 1];
        let d1 = self.cumulative[i];
        let span = d1 - d0;
        if span.abs() <= f32::EPSILON {
            return self.vertices[i - 1];
        }
        self.vertices[i - 1].lerp(self.vertices[i], (d - d0) / span)
    }

    pub fn position_at(&self, progress: f32) -> Vec2 {
        if self.vertices.is_empty() {
            return Vec2::ZERO;
        }
        let d = progress.clamp(0.0, 1.0) * self.distance();
        let i = self.cumulative.partition_point(|&c| c < d);
        self.interpolate(i, d)
    }

    /// Writes the part of the path between progress `p0` and `p1` into `out`.
    ///
    /// `out` is left empty when the range is empty (`p1 <= p0`) or the path has
    /// no length.
    pub fn sample_range(&self, out: &mut Vec<Vec2>, p0: f32, p1: f32) {
        out.clear();
        let p0 = p0.clamp(0.0, 1.0);
        let p1 = p1.clamp(0.0, 1.0);
        let total = self.distance();
        if p1 <= p0 || total <= 0.0 {
            return;
        }

        let d0 = p0 * total;
        let d1 = p1 * total;
        let n = self.vertices.len();

        let mut i = self.cumulative.partition_point(|&c| c < d0);
        out.push(self.interpolate(i, d0));
        while i < n && self.cumulative[i] <= d1 {
            push_unique(out, self.vertices[i]);
            i += 1;
        }
        push_unique(out, self.interpolate(i, d1));
    }
}

/// Polyline arc length.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Shifts `points` so the first one sits at the origin; returns the old first
/// point. An empty list becomes a single origin vertex.
pub fn rebase_to_origin(points: &mut Vec<Vec2>) -> Vec2 {
    let Some(&origin) = points.first() else {
        points.push(Vec2::ZERO);
        return Vec2::ZERO;
    };
    for p in points.iter_mut() {
        *p -= origin;
    }
    origin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Path {
        Path::new(&[
            ControlPoint::typed(Vec2::new(0.0, 0.0), SegmentKind::Linear),
            ControlPoint::plain(Vec2::new(10.0, 0.0)),
            ControlPoint::plain(Vec2::new(10.0, 10.0)),
        ])
    }

    #[test]
    fn linear_path_measures_its_legs() {
        let p = l_shape();
        assert_eq!(p.vertices().len(), 3);
        assert!((p.distance() - 20.0).abs() <= 1e-5);
        assert_eq!(p.position_at(0.5), Vec2::new(10.0, 0.0));
        assert_eq!(p.position_at(0.75), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn sub_range_cuts_at_exact_distances() {
        let p = l_shape();
        let mut out = Vec::new();
        p.sample_range(&mut out, 0.25, 0.75);
        assert_eq!(out.first().copied(), Some(Vec2::new(5.0, 0.0)));
        assert_eq!(out.last().copied(), Some(Vec2::new(10.0, 5.0)));
        assert!((polyline_length(&out) - 10.0).abs() <= 1e-4);
    }

    #[test]
    fn empty_range_yields_no_vertices() {
        let p = l_shape();
        let mut out = vec![Vec2::ONE];
        p.sample_range(&mut out, 0.4, 0.4);
        assert!(out.is_empty());
        p.sample_range(&mut out, 0.6, 0.2);
        assert!(out.is_empty());
    }

    #[test]
    fn bezier_corner_stays_inside_control_hull() {
        let p = Path::new(&[
            ControlPoint::typed(Vec2::new(0.0, 0.0), SegmentKind::Bezier),
            ControlPoint::plain(Vec2::new(10.0, 0.0)),
            ControlPoint::plain(Vec2::new(10.0, 10.0)),
        ]);
        assert!(p.vertices().len() > 3, "curve should be subdivided");
        // Rounded corner is shorter than the two straight legs.
        assert!(p.distance() < 20.0 && p.distance() > 14.0, "got {}", p.distance());
        for v in p.vertices() {
            assert!(v.x >= -1e-4 && v.x <= 10.0 + 1e-4 && v.y >= -1e-4 && v.y <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn rebase_moves_first_vertex_to_origin() {
        let mut pts = vec![Vec2::new(3.0, 4.0), Vec2::new(5.0, 4.0)];
        let offset = rebase_to_origin(&mut pts);
        assert_eq!(offset, Vec2::new(3.0, 4.0));
        assert_eq!(pts, vec![Vec2::ZERO, Vec2::new(2.0, 0.0)]);

        let mut empty = Vec::new();
        assert_eq!(rebase_to_origin(&mut empty), Vec2::ZERO);
        assert_eq!(empty, vec![Vec2::ZERO]);
    }
}
