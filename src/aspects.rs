use serde::{Deserialize, Serialize};
use std::fmt;

use super::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectInfo {
    pub first: CelestialBody,
    pub second: CelestialBody,
    pub aspect: Aspect,
    /// Distance in degrees from the exact aspect angle.
    pub orb: f64,
}

impl fmt::Display for AspectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.first, self.aspect, self.second)
    }
}

/// Shortest arc between two longitudes, in [0, 180].
pub fn separation(a: f64, b: f64) -> f64 {
    let angle = normalize_longitude((a - b).abs());
    if angle <= 180.0 {
        angle
    } else {
        360.0 - angle
    }
}

/// Every aspect between every unordered pair of bodies.
///
/// Pairs follow the order of `bodies`, each considered once; within a pair
/// the canonical angles are tried in ascending order. All matches are kept,
/// so an orb wide enough to overlap two aspects reports both.
pub fn detect_aspects(bodies: &[(CelestialBody, f64)], orb: f64) -> Vec<AspectInfo> {
    let mut aspects = Vec::new();

    for (i, &(body1, longitude1)) in bodies.iter().enumerate() {
        for &(body2, longitude2) in bodies.iter().skip(i + 1) {
            let angle = separation(longitude1, longitude2);
            for aspect in Aspect::all() {
                let deviation = (angle - aspect.angle()).abs();
                if deviation <= orb {
                    aspects.push(AspectInfo {
                        first: body1,
                        second: body2,
                        aspect,
                        orb: deviation,
                    });
                }
            }
        }
    }

    aspects
}
