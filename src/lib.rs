// src/lib.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

pub mod aspects;
pub mod config;
pub mod ephemeris;
pub mod houses;
pub mod meanings;
pub mod report;
pub mod topics;
pub mod transport;

pub use aspects::{detect_aspects, separation, AspectInfo};
pub use config::{InterpreterConfig, DEFAULT_ORB};
pub use ephemeris::{ketu_longitude, BirthInfo, EphemerisData, EphemerisSource, FixedEphemeris, ResolvedChart};
pub use houses::{assign_house, equal_cusps, WrapPolicy};
pub use report::{BodyPlacement, ChartReport, HouseMeaning, SignPlacement};
pub use topics::Topic;
pub use transport::{split_message, MAX_MESSAGE_LEN};

// ---------------------------
// ## Enumerations
// ---------------------------

/// Bodies a chart is built from. Discriminants are the Swiss Ephemeris
/// planet numbers; Ketu has none and is always derived from Rahu.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum CelestialBody {
    Sun = 0,
    Moon = 1,
    Mercury = 2,
    Venus = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
    Pluto = 9,
    Rahu = 11,
    Ketu = 999,
}

impl CelestialBody {
    /// Fixed enumeration order. Report lines and aspect pairs follow it.
    pub fn iter() -> impl Iterator<Item = CelestialBody> {
        [
            CelestialBody::Sun,
            CelestialBody::Moon,
            CelestialBody::Mercury,
            CelestialBody::Venus,
            CelestialBody::Mars,
            CelestialBody::Jupiter,
            CelestialBody::Saturn,
            CelestialBody::Uranus,
            CelestialBody::Neptune,
            CelestialBody::Pluto,
            CelestialBody::Rahu,
            CelestialBody::Ketu,
        ]
        .iter()
        .copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
            CelestialBody::Rahu => "Rahu",
            CelestialBody::Ketu => "Ketu",
        }
    }

    /// Ketu is never queried from an ephemeris.
    pub fn is_derived(&self) -> bool {
        matches!(self, CelestialBody::Ketu)
    }

    pub fn from_name(name: &str) -> Option<CelestialBody> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "northnode" | "north node" | "truenode" | "true node" => {
                return Some(CelestialBody::Rahu)
            }
            "southnode" | "south node" => return Some(CelestialBody::Ketu),
            _ => {}
        }
        CelestialBody::iter().find(|body| body.name().eq_ignore_ascii_case(&name))
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum House {
    First = 1,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
    Tenth,
    Eleventh,
    Twelfth,
}

impl House {
    pub fn from_index(index: usize) -> Option<House> {
        match index {
            1 => Some(House::First),
            2 => Some(House::Second),
            3 => Some(House::Third),
            4 => Some(House::Fourth),
            5 => Some(House::Fifth),
            6 => Some(House::Sixth),
            7 => Some(House::Seventh),
            8 => Some(House::Eighth),
            9 => Some(House::Ninth),
            10 => Some(House::Tenth),
            11 => Some(House::Eleventh),
            12 => Some(House::Twelfth),
            _ => None,
        }
    }

    /// 1-based house number.
    pub fn number(&self) -> usize {
        *self as usize
    }

    pub fn all() -> impl Iterator<Item = House> {
        (1..=12).filter_map(House::from_index)
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "House {}", self.number())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries = 0,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn from_longitude(longitude: f64) -> Self {
        let sign_index = (normalize_longitude(longitude) / 30.0).floor() as usize;
        match sign_index {
            0 => ZodiacSign::Aries,
            1 => ZodiacSign::Taurus,
            2 => ZodiacSign::Gemini,
            3 => ZodiacSign::Cancer,
            4 => ZodiacSign::Leo,
            5 => ZodiacSign::Virgo,
            6 => ZodiacSign::Libra,
            7 => ZodiacSign::Scorpio,
            8 => ZodiacSign::Sagittarius,
            9 => ZodiacSign::Capricorn,
            10 => ZodiacSign::Aquarius,
            11 => ZodiacSign::Pisces,
            _ => ZodiacSign::Aries, // Fallback
        }
    }

    /// 0-based position in the zodiac, Aries = 0.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign_str = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", sign_str)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aspect {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl Aspect {
    /// Canonical aspects in ascending order of their defining angle.
    pub fn all() -> impl Iterator<Item = Aspect> {
        [
            Aspect::Conjunction,
            Aspect::Sextile,
            Aspect::Square,
            Aspect::Trine,
            Aspect::Opposition,
        ]
        .iter()
        .copied()
    }

    pub fn angle(&self) -> f64 {
        match self {
            Aspect::Conjunction => 0.0,
            Aspect::Sextile => 60.0,
            Aspect::Square => 90.0,
            Aspect::Trine => 120.0,
            Aspect::Opposition => 180.0,
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ---------------------------
// ## Error Handling
// ---------------------------

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Malformed ephemeris input: {field} = {value}")]
    MalformedEphemeris { field: String, value: f64 },

    #[error("Expected 12 house cusps, got {0}")]
    CuspCount(usize),

    #[error("Unknown celestial body: {0}")]
    UnknownBody(String),

    #[error("Celestial body given more than once: {0}")]
    DuplicateBody(CelestialBody),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------
// ## Interpretation
// ---------------------------

/// Reduce any finite angle to [0, 360).
pub fn normalize_longitude(longitude: f64) -> f64 {
    let normalized = longitude.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Builds the full natal chart report from raw ephemeris output.
///
/// Validates and normalizes the input, derives Ketu, assigns houses, detects
/// aspects and composes the report. Pure: identical inputs always give an
/// identical report. Bodies whose house cannot be determined are kept in the
/// report without house information.
pub fn interpret(data: &EphemerisData, config: &InterpreterConfig) -> Result<ChartReport, ChartError> {
    config.validate()?;
    let chart = data.resolve()?;

    let placements: Vec<BodyPlacement> = chart
        .bodies
        .iter()
        .map(|&(body, longitude)| {
            let house = assign_house(longitude, &chart.cusps, config.wrap_policy);
            match house {
                Some(house) => debug!(%body, longitude, house = house.number(), "house assigned"),
                None => warn!(%body, longitude, "no house determined"),
            }
            BodyPlacement::new(body, longitude, house)
        })
        .collect();

    let aspects = detect_aspects(&chart.bodies, config.orb);
    debug!(count = aspects.len(), orb = config.orb, "aspects detected");

    Ok(report::compose(chart.ascendant, placements, aspects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn equal_house_chart(bodies: &[(CelestialBody, f64)]) -> EphemerisData {
        let mut data = EphemerisData::new(equal_cusps(0.0).to_vec(), 0.0);
        for &(body, longitude) in bodies {
            data = data.with_body(body, longitude);
        }
        data
    }

    #[test]
    fn test_sign_from_longitude() {
        assert_eq!(ZodiacSign::from_longitude(15.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(195.0), ZodiacSign::Libra);
        assert_eq!(ZodiacSign::from_longitude(359.999), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(360.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(-30.0), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::Libra.index(), 6);
    }

    #[test]
    fn test_normalize_longitude() {
        assert_relative_eq!(normalize_longitude(370.0), 10.0);
        assert_relative_eq!(normalize_longitude(-90.0), 270.0);
        assert_relative_eq!(normalize_longitude(-1e-20), 0.0);
        assert!(normalize_longitude(-1e-20) < 360.0);
    }

    #[test]
    fn test_body_names() {
        assert_eq!(CelestialBody::from_name("sun"), Some(CelestialBody::Sun));
        assert_eq!(CelestialBody::from_name(" PLUTO "), Some(CelestialBody::Pluto));
        assert_eq!(CelestialBody::from_name("NorthNode"), Some(CelestialBody::Rahu));
        assert_eq!(CelestialBody::from_name("south node"), Some(CelestialBody::Ketu));
        assert_eq!(CelestialBody::from_name("Chiron"), None);
        assert_eq!(CelestialBody::iter().count(), 12);
        assert!(CelestialBody::Ketu.is_derived());
        assert!(!CelestialBody::Rahu.is_derived());
    }

    #[test]
    fn test_house_numbers() {
        assert_eq!(House::all().count(), 12);
        assert_eq!(House::Seventh.number(), 7);
        assert_eq!(House::from_index(0), None);
        assert_eq!(House::from_index(13), None);
        assert_eq!(House::Twelfth.to_string(), "House 12");
    }

    #[test]
    fn test_sun_moon_opposition_scenario() {
        let data = equal_house_chart(&[(CelestialBody::Sun, 15.0), (CelestialBody::Moon, 195.0)]);
        let report = interpret(&data, &InterpreterConfig::default()).unwrap();

        assert_eq!(report.ascendant.sign, ZodiacSign::Aries);

        let sun = &report.bodies[0];
        assert_eq!(sun.body, CelestialBody::Sun);
        assert_eq!(sun.sign, ZodiacSign::Aries);
        assert_eq!(sun.house, Some(House::First));

        let moon = &report.bodies[1];
        assert_eq!(moon.body, CelestialBody::Moon);
        assert_eq!(moon.sign, ZodiacSign::Libra);
        assert_eq!(moon.house, Some(House::Seventh));

        assert_eq!(report.aspects.len(), 1);
        let aspect = &report.aspects[0];
        assert_eq!(
            (aspect.first, aspect.second, aspect.aspect),
            (CelestialBody::Sun, CelestialBody::Moon, Aspect::Opposition)
        );
    }

    #[test]
    fn test_ketu_derived_scenario() {
        let data = equal_house_chart(&[(CelestialBody::Rahu, 100.0)]);
        let report = interpret(&data, &InterpreterConfig::default()).unwrap();

        let ketu = report
            .bodies
            .iter()
            .find(|p| p.body == CelestialBody::Ketu)
            .unwrap();
        assert_relative_eq!(ketu.longitude, 280.0);
        assert_eq!(ketu.sign, ZodiacSign::Capricorn);
        assert_eq!(ketu.house, Some(House::Tenth));

        // nodes are always exactly opposite
        assert_eq!(report.aspects.len(), 1);
        assert_eq!(report.aspects[0].aspect, Aspect::Opposition);
    }

    #[test]
    fn test_interpret_is_deterministic() {
        let data = equal_house_chart(&[
            (CelestialBody::Sun, 84.2),
            (CelestialBody::Moon, 301.7),
            (CelestialBody::Mars, 144.0),
            (CelestialBody::Venus, 62.5),
            (CelestialBody::Rahu, 271.3),
        ]);
        let config = InterpreterConfig::default();
        let first = interpret(&data, &config).unwrap().render();
        let second = interpret(&data, &config).unwrap().render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_interpret_rejects_non_finite_input() {
        let data = equal_house_chart(&[(CelestialBody::Sun, f64::NAN)]);
        let err = interpret(&data, &InterpreterConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::MalformedEphemeris { .. }));

        let data = EphemerisData::new(equal_cusps(0.0).to_vec(), f64::INFINITY);
        assert!(interpret(&data, &InterpreterConfig::default()).is_err());
    }

    #[test]
    fn test_interpret_keeps_unassigned_bodies() {
        // every cusp identical: no band has any width
        let data = EphemerisData::new(vec![10.0; 12], 10.0).with_body(CelestialBody::Sun, 200.0);
        let report = interpret(&data, &InterpreterConfig::default()).unwrap();
        assert_eq!(report.bodies.len(), 1);
        assert_eq!(report.bodies[0].house, None);
        assert!(!report.render().contains(" | House"));
    }
}
