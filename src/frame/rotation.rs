use std::f64::consts::TAU;
use std::fmt;

use nalgebra::{Matrix3, Vector3};

// ---------------------------------------------------------------------------
// Rotation axes
// ---------------------------------------------------------------------------

/// Satellite body axes in this simulator's convention.
///
/// The camera looks along local +z, so roll spins about z and moves the
/// spherical azimuth. Pitch (about x) and yaw (about y) tilt the boresight
/// and together move the polar angle.
///
/// ```text
///          z  (roll, boresight; polar angle measured from here)
///          |
///          |____ y  (yaw)
///         /
///        x  (pitch; azimuth measured from here)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Roll,
    Pitch,
    Yaw,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Roll, Axis::Pitch, Axis::Yaw];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Roll => "Roll",
            Axis::Pitch => "Pitch",
            Axis::Yaw => "Yaw",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Matrix operations
// ---------------------------------------------------------------------------

/// Frame rotation (global → local) by `angle` about `axis`.
///
/// Negative angles are wrapped into [0, 2π) first. The matrix re-expresses
/// a vector in a frame turned by `angle`, so a point at azimuth φ lands on
/// the local x-z plane after a roll of φ.
pub fn rotation(axis: Axis, angle: f64) -> Matrix3<f64> {
    let angle = angle.rem_euclid(TAU);
    let (s, c) = angle.sin_cos();
    match axis {
        Axis::Roll => Matrix3::new(
            c, s, 0.0,
            -s, c, 0.0,
            0.0, 0.0, 1.0,
        ),
        Axis::Pitch => Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c, s,
            0.0, -s, c,
        ),
        Axis::Yaw => Matrix3::new(
            c, 0.0, -s,
            0.0, 1.0, 0.0,
            s, 0.0, c,
        ),
    }
}

/// Matrix product `a · b` (apply `b` first, then `a`).
pub fn compose(a: &Matrix3<f64>, b: &Matrix3<f64>) -> Matrix3<f64> {
    a * b
}

pub fn transpose(a: &Matrix3<f64>) -> Matrix3<f64> {
    a.transpose()
}

/// Returns `r · v`.
pub fn apply_rotation(r: &Matrix3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    r * v
}

// ---------------------------------------------------------------------------
// Cumulative orientation
// ---------------------------------------------------------------------------

/// Running satellite orientation: `r` maps global → local, `r_t` maps
/// local → global. The pair is only ever replaced together.
#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    r: Matrix3<f64>,
    r_t: Matrix3<f64>,
}

impl Orientation {
    pub fn identity() -> Self {
        Self {
            r: Matrix3::identity(),
            r_t: Matrix3::identity(),
        }
    }

    /// Global → local.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.r
    }

    /// Local → global.
    pub fn transpose(&self) -> &Matrix3<f64> {
        &self.r_t
    }

    pub fn to_local(&self, global: &Vector3<f64>) -> Vector3<f64> {
        apply_rotation(&self.r, global)
    }

    pub fn to_global(&self, local: &Vector3<f64>) -> Vector3<f64> {
        apply_rotation(&self.r_t, local)
    }

    /// Prepend a maneuver rotation: `R ← M · R`, `Rᵗ ← (M · R)ᵗ`.
    pub fn commit(&mut self, maneuver: &Matrix3<f64>) {
        let r = compose(maneuver, &self.r);
        self.r_t = transpose(&r);
        self.r = r;
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    const ANGLES: [f64; 9] = [0.0, 0.3, -0.3, FRAC_PI_2, -FRAC_PI_2, PI, 4.0, -7.5, 1.0e5];

    #[test]
    fn transpose_equals_negated_angle() {
        for axis in Axis::ALL {
            for a in ANGLES {
                let lhs = transpose(&rotation(axis, a));
                let rhs = rotation(axis, -a);
                assert_relative_eq!(lhs, rhs, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn rotations_are_orthonormal() {
        for axis in Axis::ALL {
            for a in ANGLES {
                let r = rotation(axis, a);
                assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-12);
                assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn negative_angle_wraps() {
        let a = rotation(Axis::Yaw, -0.5);
        let b = rotation(Axis::Yaw, TAU - 0.5);
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn roll_brings_azimuth_onto_x_axis() {
        // Point at azimuth 90 deg on the equator
        let v = Vector3::new(0.0, 2.0, 0.0);
        let local = apply_rotation(&rotation(Axis::Roll, FRAC_PI_2), &v);
        assert_relative_eq!(local, Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn yaw_brings_xz_point_onto_boresight() {
        let theta: f64 = 0.7;
        let v = Vector3::new(theta.sin(), 0.0, theta.cos());
        let local = apply_rotation(&rotation(Axis::Yaw, theta), &v);
        assert_relative_eq!(local, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn pitch_brings_yz_point_onto_boresight() {
        let theta: f64 = 1.1;
        // +y side needs a negative pitch
        let v = Vector3::new(0.0, theta.sin(), theta.cos());
        let local = apply_rotation(&rotation(Axis::Pitch, -theta), &v);
        assert_relative_eq!(local, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn commit_keeps_transpose_in_sync() {
        let mut o = Orientation::identity();
        o.commit(&rotation(Axis::Roll, 0.4));
        o.commit(&rotation(Axis::Pitch, -1.2));
        assert_relative_eq!(*o.transpose(), o.matrix().transpose(), epsilon = 1e-15);
        assert_relative_eq!(o.matrix() * o.transpose(), Matrix3::identity(), epsilon = 1e-12);

        let g = Vector3::new(1.0, -2.0, 3.0);
        assert_relative_eq!(o.to_global(&o.to_local(&g)), g, epsilon = 1e-12);
    }

    #[test]
    fn compose_applies_right_operand_first() {
        let roll = rotation(Axis::Roll, FRAC_PI_2);
        let yaw = rotation(Axis::Yaw, FRAC_PI_2);
        let v = Vector3::new(0.0, 1.0, 0.0);
        let step = apply_rotation(&yaw, &apply_rotation(&roll, &v));
        assert_relative_eq!(apply_rotation(&compose(&yaw, &roll), &v), step, epsilon = 1e-12);
    }
}
