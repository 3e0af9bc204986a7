use glam::{Mat4, Vec2, Vec3};

use crate::chem::{Atom, Residue, SubRange};
use crate::error::RepError;
use crate::math::{calc_chunk_matrix, CubicSpline};

/// Two splines through one residue run: the backbone center line and the
/// "wing" line that orients the cross section.
///
/// The point sequences carry two extra points at either end so the spline
/// can be sampled across the run edges; [`CartoonHelper::prepare_matrices`]
/// only samples the inner part.
#[derive(Debug, Clone)]
pub struct CartoonHelper {
    center: CubicSpline,
    top: CubicSpline,
    shift: f32,
    step: f32,
    segments: usize,
}

/// Center and wing point sequences for one run.
#[derive(Debug, Default)]
struct RunPoints {
    center: Vec<Vec3>,
    top: Vec<Vec3>,
}

impl RunPoints {
    fn push(&mut self, center: Vec3, top: Vec3) {
        self.center.push(center);
        self.top.push(top);
    }

    /// Push a residue's control point, or repeat the last point for an
    /// invalid residue.
    fn push_residue(&mut self, residue: &Residue) {
        if !residue.is_valid {
            if let (Some(&c), Some(&t)) = (self.center.last(), self.top.last()) {
                self.push(c, t);
                return;
            }
        }
        let cp = residue.control_point;
        self.push(cp, cp + residue.wing_vector);
    }

    /// Two copies of a point a quarter step beyond `curr`, away from
    /// `other`.
    fn extrapolate(&mut self, curr: &Residue, other: &Residue) {
        let cp = curr.control_point.lerp(other.control_point, -0.25);
        let tp = cp + curr.wing_vector;
        self.push(cp, tp);
        self.push(cp, tp);
    }

    /// Five points for a residue without usable neighbours: the control
    /// point flanked by its own backbone span on both sides.
    fn lone(&mut self, residue: &Residue, atoms: &[Atom], pos: &dyn Fn(usize) -> Vec3) {
        let (from, to) = if residue.is_nucleic() {
            ("C5'", "C3'")
        } else {
            ("N", "C")
        };
        let find = |name: &str| {
            residue
                .atoms
                .iter()
                .copied()
                .find(|&a| atoms[a].visual_name() == name)
        };
        let span = match (find(from), find(to)) {
            (Some(f), Some(t)) => Some((f, t)),
            _ => residue.first_atom().zip(residue.last_atom()),
        };
        let shift = span.map_or(Vec3::ZERO, |(f, t)| pos(t) - pos(f));
        let wing = residue.wing_vector;
        let cp = residue.control_point;
        let (prev, next) = (cp - shift, cp + shift);
        self.push(prev, prev + wing);
        self.push(prev, prev + wing);
        self.push(cp, cp + wing);
        self.push(next, next + wing);
        self.push(next, next + wing);
    }
}

impl CartoonHelper {
    /// Prepare splines for residues `run.start..=run.end` of a backbone
    /// segment spanning `boundaries`.
    ///
    /// `residues` may be static or frame residues; `pos` supplies matching
    /// atom positions for lone residues. Each
    /// [`prepare_matrices`](Self::prepare_matrices) call yields `segments`
    /// matrices.
    ///
    /// # Errors
    ///
    /// Returns [`RepError::InvalidParameter`] when `segments < 2` or the
    /// run produces too few spline points.
    pub fn new(
        residues: &[Residue],
        atoms: &[Atom],
        pos: &dyn Fn(usize) -> Vec3,
        run: SubRange,
        boundaries: SubRange,
        segments: usize,
        tension: f32,
    ) -> Result<Self, RepError> {
        if segments < 2 {
            return Err(RepError::InvalidParameter(format!(
                "ribbon needs at least 2 segments per half residue, got {segments}"
            )));
        }
        let points = calc_points(residues, atoms, pos, run, boundaries);
        let count = run.len() as f32;
        let shift = 0.5 / (count + 1.0);
        let step = (1.0 - 2.0 * shift) / (2.0 * count * (segments - 1) as f32);
        Ok(Self {
            center: CubicSpline::new(points.center, tension)?,
            top: CubicSpline::new(points.top, tension)?,
            shift,
            step,
            segments,
        })
    }

    /// Number of matrices per [`prepare_matrices`](Self::prepare_matrices)
    /// call.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Ring transforms for half residue `idx` of the run (`0` is the first
    /// half of the first residue), with the cross-section radius lerped
    /// from `first_rad` to `second_rad`.
    #[must_use]
    pub fn prepare_matrices(&self, idx: usize, first_rad: Vec2, second_rad: Vec2) -> Vec<Mat4> {
        let last = (self.segments - 1) as f32;
        let mut value = self.shift + self.step * last * idx as f32;
        (0..self.segments)
            .map(|m| {
                let rad = first_rad.lerp(second_rad, (m as f32 / last).min(1.0));
                let top = self.top.at_inner(value);
                let center = self.center.at_inner(value);
                value += self.step;
                let next = self.center.at_inner(value);
                calc_chunk_matrix(center, next, top - center, rad)
            })
            .collect()
    }
}

fn calc_points(
    residues: &[Residue],
    atoms: &[Atom],
    pos: &dyn Fn(usize) -> Vec3,
    run: SubRange,
    boundaries: SubRange,
) -> RunPoints {
    let prev_idx = |idx: usize| {
        if idx > boundaries.start && residues[idx - 1].is_valid {
            idx - 1
        } else {
            idx
        }
    };
    let next_idx = |idx: usize| {
        if idx < boundaries.end && residues[idx + 1].is_valid {
            idx + 1
        } else {
            idx
        }
    };

    let mut points = RunPoints::default();
    let prev = prev_idx(run.start);
    let next = next_idx(run.end);
    if prev == next {
        points.lone(&residues[run.start], atoms, pos);
        return points;
    }

    if prev == run.start {
        points.extrapolate(&residues[run.start], &residues[next_idx(run.start)]);
    } else {
        points.push_residue(&residues[prev_idx(prev)]);
        points.push_residue(&residues[prev]);
    }
    for residue in &residues[run.start..=run.end] {
        points.push_residue(residue);
    }
    if next == next_idx(next) {
        points.extrapolate(&residues[run.end], &residues[prev_idx(run.end)]);
    } else {
        points.push_residue(&residues[next]);
        points.push_residue(&residues[next_idx(next)]);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::peptide;

    fn run(start: usize, end: usize) -> SubRange {
        SubRange { start, end }
    }

    #[test]
    fn lone_residue_gets_five_points() {
        let complex = peptide(1);
        let pos = |i: usize| complex.atoms()[i].position;
        let points = calc_points(complex.residues(), complex.atoms(), &pos, run(0, 0), run(0, 0));
        assert_eq!(points.center.len(), 5);
        let cp = complex.residues()[0].control_point;
        assert_eq!(points.center[2], cp);
        let span = complex.atoms()[2].position - complex.atoms()[0].position;
        assert!((points.center[0] - (cp - span)).length() < 1e-5);
    }

    #[test]
    fn run_ends_are_extrapolated_or_extended() {
        let complex = peptide(6);
        let pos = |i: usize| complex.atoms()[i].position;
        let residues = complex.residues();

        let whole = calc_points(residues, complex.atoms(), &pos, run(0, 5), run(0, 5));
        assert_eq!(whole.center.len(), 10);
        let beyond = residues[0].control_point.lerp(residues[1].control_point, -0.25);
        assert_eq!(whole.center[0], beyond);
        assert_eq!(whole.center[1], beyond);

        let inner = calc_points(residues, complex.atoms(), &pos, run(2, 3), run(0, 5));
        assert_eq!(inner.center.len(), 6);
        assert_eq!(inner.center[0], residues[0].control_point);
        assert_eq!(inner.center[5], residues[5].control_point);
    }

    #[test]
    fn half_residue_boundary_sits_on_the_control_point() {
        let complex = peptide(4);
        let pos = |i: usize| complex.atoms()[i].position;
        let helper = CartoonHelper::new(
            complex.residues(),
            complex.atoms(),
            &pos,
            run(0, 3),
            run(0, 3),
            6,
            -0.7,
        )
        .unwrap();
        let rad = Vec2::splat(0.3);
        for k in 0..4 {
            let mtc = helper.prepare_matrices(2 * k + 1, rad, rad);
            assert_eq!(mtc.len(), 6);
            let origin = mtc[0].transform_point3(Vec3::ZERO);
            let cp = complex.residues()[k].control_point;
            assert!((origin - cp).length() < 1e-3, "residue {k}");
        }
    }

    #[test]
    fn radius_lerps_across_the_half() {
        let complex = peptide(3);
        let pos = |i: usize| complex.atoms()[i].position;
        let helper =
            CartoonHelper::new(complex.residues(), complex.atoms(), &pos, run(0, 2), run(0, 2), 4, 0.0)
                .unwrap();
        let mtc = helper.prepare_matrices(0, Vec2::splat(1.0), Vec2::splat(2.0));
        let scale = |m: &Mat4| m.transform_vector3(Vec3::X).length();
        assert!((scale(&mtc[0]) - 1.0).abs() < 1e-4);
        assert!((scale(&mtc[3]) - 2.0).abs() < 1e-4);
        assert!(CartoonHelper::new(complex.residues(), complex.atoms(), &pos, run(0, 2), run(0, 2), 1, 0.0).is_err());
    }
}
