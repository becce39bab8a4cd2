use std::f64::consts::TAU;

use nalgebra::Vector3;

/// Spherical coordinates in the physics convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from origin, ≥ 0.
    pub rho: f64,
    /// Polar angle from +z, [0, π].
    pub theta: f64,
    /// Azimuth from +x toward +y, [0, 2π).
    pub phi: f64,
}

/// Selects one component of a [`Spherical`] for in-place edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SphericalCoord {
    Radius,
    Polar,
    Azimuth,
}

impl Spherical {
    pub fn new(rho: f64, theta: f64, phi: f64) -> Self {
        Self { rho, theta, phi }
    }

    pub fn get(&self, coord: SphericalCoord) -> f64 {
        match coord {
            SphericalCoord::Radius => self.rho,
            SphericalCoord::Polar => self.theta,
            SphericalCoord::Azimuth => self.phi,
        }
    }

    /// Overwrite one component. Azimuths are wrapped into [0, 2π).
    pub fn set(&mut self, coord: SphericalCoord, value: f64) {
        match coord {
            SphericalCoord::Radius => self.rho = value,
            SphericalCoord::Polar => self.theta = value,
            SphericalCoord::Azimuth => self.phi = wrap_azimuth(value),
        }
    }

    pub fn to_cartesian(&self) -> Vector3<f64> {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        Vector3::new(self.rho * st * cp, self.rho * st * sp, self.rho * ct)
    }
}

/// Map any angle into [0, 2π).
pub fn wrap_azimuth(phi: f64) -> f64 {
    let wrapped = phi.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert a cartesian vector to spherical coordinates.
///
/// The zero vector has no direction; callers must exclude it (θ comes out
/// NaN). For ρ above ~1e-9 the result is well conditioned.
pub fn to_spherical(v: &Vector3<f64>) -> Spherical {
    let rho = v.norm();
    let theta = (v.z / rho).clamp(-1.0, 1.0).acos();
    let phi = wrap_azimuth(v.y.atan2(v.x));
    Spherical { rho, theta, phi }
}
