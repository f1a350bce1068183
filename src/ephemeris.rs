//! Ephemeris input: what the external astronomical calculation hands us.
//!
//! Nothing here computes positions. Longitudes, cusps and the ascendant come
//! from a collaborator (Swiss Ephemeris, JPL Horizons, a cached table) behind
//! [`EphemerisSource`]; this module validates and normalizes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use super::*;

/// Birth moment and place. Request-scoped, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthInfo {
    pub date_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Seam to whatever computes planetary positions and house cusps.
pub trait EphemerisSource {
    fn positions(&self, birth: &BirthInfo) -> Result<EphemerisData, ChartError>;
}

/// Raw collaborator output, possibly un-normalized.
///
/// Only the bodies present in `longitudes` appear in the chart. Ketu is
/// always recomputed from Rahu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEphemeris")]
pub struct EphemerisData {
    #[serde(rename = "bodies")]
    pub longitudes: BTreeMap<CelestialBody, f64>,
    pub cusps: Vec<f64>,
    pub ascendant: f64,
}

/// Wire form with body names as free text.
#[derive(Deserialize)]
struct RawEphemeris {
    #[serde(default)]
    bodies: BTreeMap<String, f64>,
    cusps: Vec<f64>,
    ascendant: f64,
}

impl TryFrom<RawEphemeris> for EphemerisData {
    type Error = ChartError;

    fn try_from(raw: RawEphemeris) -> Result<Self, Self::Error> {
        let mut longitudes = BTreeMap::new();
        for (name, longitude) in raw.bodies {
            let body = CelestialBody::from_name(&name).ok_or(ChartError::UnknownBody(name))?;
            if longitudes.insert(body, longitude).is_some() {
                return Err(ChartError::DuplicateBody(body));
            }
        }
        Ok(EphemerisData {
            longitudes,
            cusps: raw.cusps,
            ascendant: raw.ascendant,
        })
    }
}

/// Validated, normalized chart input. Every value is in [0, 360).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChart {
    /// In [`CelestialBody::iter`] order, Ketu included when Rahu is known.
    pub bodies: Vec<(CelestialBody, f64)>,
    pub cusps: [f64; 12],
    pub ascendant: f64,
}

/// The south node sits exactly opposite the north node.
pub fn ketu_longitude(rahu: f64) -> f64 {
    normalize_longitude(rahu + 180.0)
}

fn check_finite(field: impl Into<String>, value: f64) -> Result<f64, ChartError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::MalformedEphemeris {
            field: field.into(),
            value,
        })
    }
}

impl EphemerisData {
    pub fn new(cusps: Vec<f64>, ascendant: f64) -> Self {
        EphemerisData {
            longitudes: BTreeMap::new(),
            cusps,
            ascendant,
        }
    }

    pub fn with_body(mut self, body: CelestialBody, longitude: f64) -> Self {
        self.longitudes.insert(body, longitude);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let raw: RawEphemeris = serde_json::from_str(json)?;
        EphemerisData::try_from(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Fails fast on any non-finite value or a cusp list that is not 12 long.
    pub fn resolve(&self) -> Result<ResolvedChart, ChartError> {
        if self.cusps.len() != 12 {
            return Err(ChartError::CuspCount(self.cusps.len()));
        }

        let mut cusps = [0.0; 12];
        for (i, &cusp) in self.cusps.iter().enumerate() {
            cusps[i] = normalize_longitude(check_finite(format!("cusp {}", i + 1), cusp)?);
        }

        let ascendant = normalize_longitude(check_finite("ascendant", self.ascendant)?);

        if self.longitudes.contains_key(&CelestialBody::Ketu) {
            if self.longitudes.contains_key(&CelestialBody::Rahu) {
                warn!("Ketu supplied directly; replacing it with the value derived from Rahu");
            } else {
                warn!("Ketu supplied without Rahu; dropping it from the chart");
            }
        }

        let mut bodies = Vec::with_capacity(self.longitudes.len() + 1);
        for body in CelestialBody::iter() {
            let longitude = if body.is_derived() {
                match self.longitudes.get(&CelestialBody::Rahu) {
                    Some(&rahu) => ketu_longitude(check_finite("Rahu", rahu)?),
                    None => continue,
                }
            } else {
                match self.longitudes.get(&body) {
                    Some(&longitude) => normalize_longitude(check_finite(body.name(), longitude)?),
                    None => continue,
                }
            };
            bodies.push((body, longitude));
        }

        Ok(ResolvedChart {
            bodies,
            cusps,
            ascendant,
        })
    }
}

/// Hands back the same pre-computed positions for every birth.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedEphemeris {
    data: EphemerisData,
}

impl FixedEphemeris {
    pub fn new(data: EphemerisData) -> Self {
        FixedEphemeris { data }
    }
}

impl EphemerisSource for FixedEphemeris {
    fn positions(&self, _birth: &BirthInfo) -> Result<EphemerisData, ChartError> {
        Ok(self.data.clone())
    }
}
