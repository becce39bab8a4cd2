use nalgebra::Vector3;
use thiserror::Error;

use crate::dynamics::state::{MAX_RANGE, MIN_RANGE};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseTargetError {
    #[error("expected 3 numbers (x y z), got {0}")]
    WrongCount(usize),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a finite number")]
    NotFinite(String),

    #[error("(0 0 0) is not a supported target")]
    Origin,

    #[error("distance {0} is outside the supported range [{min}, {max}]", min = MIN_RANGE, max = MAX_RANGE)]
    OutOfRange(f64),
}

/// Parse "x y z" or "x,y,z" into a valid, non-zero target vector.
pub fn parse_target(s: &str) -> Result<Vector3<f64>, ParseTargetError> {
    let parts: Vec<&str> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err(ParseTargetError::WrongCount(parts.len()));
    }

    let mut v = [0.0; 3];
    for (slot, part) in v.iter_mut().zip(&parts) {
        let value: f64 = part
            .parse()
            .map_err(|_| ParseTargetError::NotANumber(part.to_string()))?;
        if !value.is_finite() {
            return Err(ParseTargetError::NotFinite(part.to_string()));
        }
        *slot = value;
    }

    if v.iter().all(|&c| c == 0.0) {
        return Err(ParseTargetError::Origin);
    }
    let target = Vector3::new(v[0], v[1], v[2]);
    let rho = target.norm();
    if !(MIN_RANGE..=MAX_RANGE).contains(&rho) {
        return Err(ParseTargetError::OutOfRange(rho));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_and_comma_separated() {
        assert_eq!(parse_target("1 -2 3.5").unwrap(), Vector3::new(1.0, -2.0, 3.5));
        assert_eq!(parse_target("1,-2,3.5").unwrap(), Vector3::new(1.0, -2.0, 3.5));
        assert_eq!(parse_target("  0, 0 ,1 \n").unwrap(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn rejects_origin() {
        assert_eq!(parse_target("0 0 0"), Err(ParseTargetError::Origin));
        assert_eq!(parse_target("-0 0.0 0"), Err(ParseTargetError::Origin));
    }

    #[test]
    fn rejects_unsupported_distances() {
        assert_eq!(parse_target("1e-200 0 0"), Err(ParseTargetError::OutOfRange(0.0)));
        assert!(matches!(parse_target("1e200,0,0"), Err(ParseTargetError::OutOfRange(r)) if r.is_infinite()));
        assert!(matches!(parse_target("2e9 0 0"), Err(ParseTargetError::OutOfRange(_))));
        assert!(parse_target("1e-3 0 0").is_ok());
    }

    #[test]
    fn rejects_wrong_count() {
        assert_eq!(parse_target("1 2"), Err(ParseTargetError::WrongCount(2)));
        assert_eq!(parse_target("1 2 3 4"), Err(ParseTargetError::WrongCount(4)));
        assert_eq!(parse_target(""), Err(ParseTargetError::WrongCount(0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_target("1 x 3"), Err(ParseTargetError::NotANumber("x".into())));
        assert_eq!(parse_target("1 inf 3"), Err(ParseTargetError::NotFinite("inf".into())));
        assert!(parse_target("NaN 1 1").is_err());
    }
}
