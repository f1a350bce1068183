//! Interpretation text. One table for the whole process, never mutated.

use super::*;

const SIGN_MEANINGS: [&str; 12] = [
    "initiative, courage and a direct, pioneering drive",
    "steadiness, patience and a love of comfort and beauty",
    "curiosity, quick wit and a talent for communication",
    "sensitivity, care and deep attachment to home and family",
    "warmth, generosity and a need for creative self-expression",
    "precision, diligence and a practical, analytical mind",
    "harmony, diplomacy and a focus on partnership",
    "intensity, depth and the power to transform",
    "optimism, a love of freedom and the search for meaning",
    "ambition, discipline and long-term responsibility",
    "originality, independence and concern for the collective",
    "compassion, imagination and strong intuition",
];

const HOUSE_MEANINGS: [&str; 12] = [
    "self, appearance and personal approach to life",
    "money, possessions and personal values",
    "communication, siblings and short journeys",
    "home, family roots and inner security",
    "creativity, romance, children and pleasure",
    "work, daily routine, service and health",
    "partnership, marriage and open relationships",
    "shared resources, intimacy and transformation",
    "philosophy, higher learning and long journeys",
    "career, reputation and public standing",
    "friends, groups, hopes and income from work",
    "solitude, the subconscious and hidden matters",
];

pub fn sign_meaning(sign: ZodiacSign) -> &'static str {
    SIGN_MEANINGS[sign.index()]
}

pub fn house_meaning(house: House) -> &'static str {
    HOUSE_MEANINGS[house.number() - 1]
}

/// What a body governs in a chart.
pub fn body_keyword(body: CelestialBody) -> &'static str {
    match body {
        CelestialBody::Sun => "identity and vitality",
        CelestialBody::Moon => "emotions and instincts",
        CelestialBody::Mercury => "thinking and speech",
        CelestialBody::Venus => "love and values",
        CelestialBody::Mars => "energy and action",
        CelestialBody::Jupiter => "growth and fortune",
        CelestialBody::Saturn => "structure and limits",
        CelestialBody::Uranus => "change and innovation",
        CelestialBody::Neptune => "dreams and spirituality",
        CelestialBody::Pluto => "power and rebirth",
        CelestialBody::Rahu => "desire and worldly ambition",
        CelestialBody::Ketu => "detachment and past-life gifts",
    }
}
