use serde::{Deserialize, Serialize};

use super::*;

/// How a longitude is compared against a house band that crosses 0°.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapPolicy {
    /// Lift the longitude by 360° when it sits below the band start, so a
    /// body at 5° lands in a house spanning 350°..20°.
    #[default]
    Normalize,
    /// Compare the longitude as given. A body just past 0° in a band that
    /// starts before 360° is left without a house.
    Literal,
}

/// Cusp `i` opens house `i + 1`; the band runs to the next cusp, and the
/// twelfth closes on the first. The first matching band wins.
///
/// Returns `None` when no band contains the longitude, which only happens
/// with cusps that do not partition the circle (or near 0° under
/// [`WrapPolicy::Literal`]).
pub fn assign_house(longitude: f64, cusps: &[f64; 12], policy: WrapPolicy) -> Option<House> {
    for i in 0..12 {
        let start = cusps[i];
        let mut end = cusps[(i + 1) % 12];
        let mut position = longitude;

        if end < start {
            end += 360.0;
            if policy == WrapPolicy::Normalize && position < start {
                position += 360.0;
            }
        }

        if start <= position && position < end {
            return House::from_index(i + 1);
        }
    }
    None
}

/// Twelve 30° houses, the first opening at `start`.
pub fn equal_cusps(start: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_longitude(start + 30.0 * i as f64);
    }
    cusps
}
