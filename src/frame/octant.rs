use std::fmt;

use nalgebra::Vector3;

/// One of the eight global-frame octants, each home to a named body in the
/// simulated scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Octant {
    /// +x, +y, +z
    Grace,
    /// +x, −y, +z
    Bray,
    /// +x, +y, −z
    Price,
    /// +x, −y, −z
    Mig,
    /// −x, +y, +z
    Wiem,
    /// −x, −y, +z
    Turk,
    /// −x, +y, −z
    Mrow,
    /// −x, −y, −z
    Sebas,
}

impl Octant {
    /// Octant containing `v`, or `None` when any coordinate rounds to zero
    /// at two decimals (the point sits on an octant boundary).
    pub fn classify(v: &Vector3<f64>) -> Option<Self> {
        let round = |c: f64| (c * 100.0).round() / 100.0;
        let (x, y, z) = (round(v.x), round(v.y), round(v.z));
        if x == 0.0 || y == 0.0 || z == 0.0 {
            return None;
        }
        Some(match (x > 0.0, y > 0.0, z > 0.0) {
            (true, true, true) => Octant::Grace,
            (true, false, true) => Octant::Bray,
            (true, true, false) => Octant::Price,
            (true, false, false) => Octant::Mig,
            (false, true, true) => Octant::Wiem,
            (false, false, true) => Octant::Turk,
            (false, true, false) => Octant::Mrow,
            (false, false, false) => Octant::Sebas,
        })
    }

    pub fn body(self) -> &'static str {
        match self {
            Octant::Grace => "GRACE",
            Octant::Bray => "BRAY",
            Octant::Price => "PRICE",
            Octant::Mig => "MIG",
            Octant::Wiem => "WIEM",
            Octant::Turk => "TURK",
            Octant::Mrow => "MROW",
            Octant::Sebas => "SEBAS",
        }
    }

    pub fn signs(self) -> &'static str {
        match self {
            Octant::Grace => "+x, +y, +z",
            Octant::Bray => "+x, -y, +z",
            Octant::Price => "+x, +y, -z",
            Octant::Mig => "+x, -y, -z",
            Octant::Wiem => "-x, +y, +z",
            Octant::Turk => "-x, -y, +z",
            Octant::Mrow => "-x, +y, -z",
            Octant::Sebas => "-x, -y, -z",
        }
    }
}

impl fmt::Display for Octant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.body(), self.signs())
    }
}
