use serde::{Deserialize, Serialize};
use std::fmt;

use super::meanings::{house_meaning, sign_meaning};
use super::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignPlacement {
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub meaning: String,
}

impl SignPlacement {
    pub fn new(longitude: f64) -> Self {
        let sign = ZodiacSign::from_longitude(longitude);
        SignPlacement {
            longitude,
            sign,
            meaning: sign_meaning(sign).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPlacement {
    pub body: CelestialBody,
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub sign_meaning: String,
    pub degree_in_sign: f64,
    /// `None` when the cusps gave no band for this longitude.
    pub house: Option<House>,
    pub house_meaning: Option<String>,
}

impl BodyPlacement {
    pub fn new(body: CelestialBody, longitude: f64, house: Option<House>) -> Self {
        let sign = ZodiacSign::from_longitude(longitude);
        BodyPlacement {
            body,
            longitude,
            sign,
            sign_meaning: sign_meaning(sign).to_string(),
            degree_in_sign: normalize_longitude(longitude) % 30.0,
            house,
            house_meaning: house.map(|house| house_meaning(house).to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseMeaning {
    pub house: House,
    pub meaning: String,
}

/// Finished chart interpretation. Rendering never truncates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReport {
    pub ascendant: SignPlacement,
    pub bodies: Vec<BodyPlacement>,
    pub aspects: Vec<AspectInfo>,
    /// All twelve houses, occupied or not.
    pub houses: Vec<HouseMeaning>,
}

pub fn compose(ascendant: f64, bodies: Vec<BodyPlacement>, aspects: Vec<AspectInfo>) -> ChartReport {
    let houses = House::all()
        .map(|house| HouseMeaning {
            house,
            meaning: house_meaning(house).to_string(),
        })
        .collect();

    ChartReport {
        ascendant: SignPlacement::new(ascendant),
        bodies,
        aspects,
        houses,
    }
}

impl ChartReport {
    pub fn render(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "Ascendant: {} - {}\n",
            self.ascendant.sign, self.ascendant.meaning
        ));

        report.push_str("\nPlanets:\n");
        for placement in &self.bodies {
            report.push_str(&format!(
                "{}: {} - {}",
                placement.body, placement.sign, placement.sign_meaning
            ));
            if let (Some(house), Some(meaning)) = (placement.house, &placement.house_meaning) {
                report.push_str(&format!(" | {}: {}", house, meaning));
            }
            report.push('\n');
        }

        report.push_str("\nAspects:\n");
        for aspect in &self.aspects {
            report.push_str(&format!("{}\n", aspect));
        }

        report.push_str("\nHouses:\n");
        for entry in &self.houses {
            report.push_str(&format!("{}: {}\n", entry.house, entry.meaning));
        }

        report
    }

    /// Bodies the cusps could not place.
    pub fn unassigned(&self) -> impl Iterator<Item = CelestialBody> + '_ {
        self.bodies
            .iter()
            .filter(|placement| placement.house.is_none())
            .map(|placement| placement.body)
    }

    pub fn placement(&self, body: CelestialBody) -> Option<&BodyPlacement> {
        self.bodies.iter().find(|placement| placement.body == body)
    }
}

impl fmt::Display for ChartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_report() -> ChartReport {
        let bodies = vec![
            BodyPlacement::new(CelestialBody::Sun, 15.0, Some(House::First)),
            BodyPlacement::new(CelestialBody::Moon, 195.0, Some(House::Seventh)),
            BodyPlacement::new(CelestialBody::Mars, 250.0, None),
        ];
        let aspects = vec![AspectInfo {
            first: CelestialBody::Sun,
            second: CelestialBody::Moon,
            aspect: Aspect::Opposition,
            orb: 0.0,
        }];
        compose(0.0, bodies, aspects)
    }

    #[test]
    fn test_render_layout() {
        let text = sample_report().render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], format!("Ascendant: Aries - {}", sign_meaning(ZodiacSign::Aries)));
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Planets:");
        assert_eq!(
            lines[3],
            format!(
                "Sun: Aries - {} | House 1: {}",
                sign_meaning(ZodiacSign::Aries),
                house_meaning(House::First)
            )
        );
        assert_eq!(
            lines[4],
            format!(
                "Moon: Libra - {} | House 7: {}",
                sign_meaning(ZodiacSign::Libra),
                house_meaning(House::Seventh)
            )
        );
        assert_eq!(lines[5], format!("Mars: Sagittarius - {}", sign_meaning(ZodiacSign::Sagittarius)));
        assert_eq!(lines[7], "Aspects:");
        assert_eq!(lines[8], "Sun Opposition Moon");
        assert_eq!(lines[10], "Houses:");
        assert_eq!(lines.len(), 23);
        assert_eq!(lines[22], format!("House 12: {}", house_meaning(House::Twelfth)));
    }

    #[test]
    fn test_empty_aspects_keep_header() {
        let report = compose(
            100.0,
            vec![BodyPlacement::new(CelestialBody::Sun, 15.0, Some(House::First))],
            Vec::new(),
        );
        let text = report.render();
        assert!(text.contains("\nAspects:\n\nHouses:\n"));
        assert_eq!(report.houses.len(), 12);
        assert_eq!(report.ascendant.sign, ZodiacSign::Cancer);
    }

    #[test]
    fn test_only_newline_controls() {
        let text = sample_report().render();
        assert!(!text.chars().any(|c| c.is_control() && c != '\n'));
    }

    #[test]
    fn test_unassigned_and_lookup() {
        let report = sample_report();
        assert_eq!(report.unassigned().collect::<Vec<_>>(), vec![CelestialBody::Mars]);
        let moon = report.placement(CelestialBody::Moon).unwrap();
        assert_relative_eq!(moon.degree_in_sign, 15.0);
        assert!(report.placement(CelestialBody::Pluto).is_none());
    }

    #[test]
    fn test_degree_in_sign_for_raw_longitude() {
        let placement = BodyPlacement::new(CelestialBody::Venus, -10.0, None);
        assert_eq!(placement.sign, ZodiacSign::Pisces);
        assert_relative_eq!(placement.degree_in_sign, 20.0);

        let placement = BodyPlacement::new(CelestialBody::Venus, 395.0, Some(House::Second));
        assert_eq!(placement.sign, ZodiacSign::Aries);
        assert_relative_eq!(placement.degree_in_sign, 5.0);
    }

    #[test]
    fn test_display_matches_render() {
        let report = sample_report();
        assert_eq!(report.to_string(), report.render());
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["bodies"][1]["sign"], "Libra");
        assert_eq!(json["bodies"][1]["sign_meaning"], sign_meaning(ZodiacSign::Libra));
        assert_eq!(json["bodies"][1]["house"], "Seventh");
        assert_eq!(json["bodies"][1]["house_meaning"], house_meaning(House::Seventh));
        assert_eq!(json["bodies"][2]["house"], serde_json::Value::Null);
        assert_eq!(json["bodies"][2]["house_meaning"], serde_json::Value::Null);
        assert_eq!(json["aspects"][0]["aspect"], "Opposition");
    }
}
