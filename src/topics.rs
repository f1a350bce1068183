//! Reading topics offered to the user after the chart is built.
//!
//! Labels are the exact strings the chat keyboard sends back, so a reply can
//! be mapped to a topic without guessing. Every topic has a prompt template;
//! where the prompt goes is the caller's business.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::meanings::body_keyword;
use super::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    General = 1,
    TotemAnimal,
    Finances,
    Business,
    Purpose,
    Income,
    Relationships,
    LifePeriod,
    Everything,
}

const KEYBOARD_WIDTH: usize = 3;

impl Topic {
    pub fn all() -> impl Iterator<Item = Topic> {
        [
            Topic::General,
            Topic::TotemAnimal,
            Topic::Finances,
            Topic::Business,
            Topic::Purpose,
            Topic::Income,
            Topic::Relationships,
            Topic::LifePeriod,
            Topic::Everything,
        ]
        .iter()
        .copied()
    }

    pub fn number(&self) -> usize {
        *self as usize
    }

    /// Menu title as shown on the keyboard, without the number.
    pub fn title(&self) -> &'static str {
        match self {
            Topic::General => "Общая информация о тебе",
            Topic::TotemAnimal => "Тотемное животное",
            Topic::Finances => "Финансы",
            Topic::Business => "Бизнес",
            Topic::Purpose => "Предназначение",
            Topic::Income => "Доходы",
            Topic::Relationships => "Отношения",
            Topic::LifePeriod => "Жизненный период",
            Topic::Everything => "Меня интересует всё",
        }
    }

    pub fn english_title(&self) -> &'static str {
        match self {
            Topic::General => "General information about you",
            Topic::TotemAnimal => "Totem animal",
            Topic::Finances => "Finances",
            Topic::Business => "Business",
            Topic::Purpose => "Life purpose",
            Topic::Income => "Income",
            Topic::Relationships => "Relationships",
            Topic::LifePeriod => "Current life period",
            Topic::Everything => "Everything",
        }
    }

    /// Numbered keyboard label, e.g. `"3. Финансы"`.
    pub fn label(&self) -> String {
        format!("{}. {}", self.number(), self.title())
    }

    /// Accepts the keyboard label, either title, or the bare number.
    pub fn from_label(text: &str) -> Option<Topic> {
        let text = text.trim();
        let (number, rest) = match text.split_once('.') {
            Some((number, rest)) => (number.trim(), rest.trim()),
            None => (text, ""),
        };

        if let Ok(n) = number.parse::<usize>() {
            let topic = Topic::all().find(|topic| topic.number() == n)?;
            return if rest.is_empty() || topic.matches_title(rest) {
                Some(topic)
            } else {
                None
            };
        }

        Topic::all().find(|topic| topic.matches_title(text))
    }

    fn matches_title(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        text == self.title().to_lowercase() || text == self.english_title().to_lowercase()
    }

    /// Labels in rows of three, menu order.
    pub fn keyboard() -> Vec<Vec<String>> {
        let labels: Vec<String> = Topic::all().map(|topic| topic.label()).collect();
        labels.chunks(KEYBOARD_WIDTH).map(|row| row.to_vec()).collect()
    }

    fn focus(&self) -> &'static str {
        match self {
            Topic::General => "the person's character, temperament and main strengths",
            Topic::TotemAnimal => {
                "a totem animal that matches the chart, and why it fits the dominant signs"
            }
            Topic::Finances => "attitude to money, saving and spending, and financial risks",
            Topic::Business => "entrepreneurial talent, business style and favourable fields",
            Topic::Purpose => "life purpose, vocation and the lessons this life is built around",
            Topic::Income => "sources of income, earning potential and how to grow it",
            Topic::Relationships => "love, partnership, compatibility needs and family life",
            Topic::LifePeriod => "the themes of the current life period and what to focus on now",
            Topic::Everything => {
                "a complete reading covering character, purpose, money, career and relationships"
            }
        }
    }

    /// Prompt for a text-generation service, embedding the full chart.
    pub fn prompt(&self, report: &ChartReport) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "You are an experienced astrologer. Using the natal chart below, write a reading on \"{}\". Focus on {}.\n",
            self.english_title(),
            self.focus()
        ));

        prompt.push_str("\nKey bodies:\n");
        for placement in &report.bodies {
            prompt.push_str(&format!(
                "- {} ({}) in {}\n",
                placement.body,
                body_keyword(placement.body),
                placement.sign
            ));
        }

        prompt.push_str("\nChart:\n");
        prompt.push_str(&report.render());
        prompt
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
