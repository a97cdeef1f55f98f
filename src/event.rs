//! Historical events annotated on the price timeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A historical event that may have moved the price.
///
/// `category` and `impact_level` are open enumerations taken verbatim from the
/// event table (e.g. `Geopolitical`, `High`); filters compare them by exact
/// string match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub event: String,
    pub description: String,
    pub category: String,
    pub impact_level: String,
}

impl EventRecord {
    pub fn new(
        date: NaiveDate,
        event: impl Into<String>,
        category: impl Into<String>,
        impact_level: impl Into<String>,
    ) -> Self {
        Self {
            date,
            event: event.into(),
            description: String::new(),
            category: category.into(),
            impact_level: impact_level.into(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl std::fmt::Display for EventRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} [{}/{}]", self.date, self.event, self.category, self.impact_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let event = EventRecord::new(
            NaiveDate::from_ymd_opt(2020, 3, 11).unwrap(),
            "COVID-19 declared pandemic",
            "Economic",
            "High",
        )
        .with_description("WHO declares a global pandemic");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["date"], "2020-03-11");
        assert_eq!(json["event"], "COVID-19 declared pandemic");
        assert_eq!(json["description"], "WHO declares a global pandemic");
        assert_eq!(json["category"], "Economic");
        assert_eq!(json["impact_level"], "High");
    }

    #[test]
    fn test_display() {
        let event = EventRecord::new(NaiveDate::from_ymd_opt(1990, 8, 2).unwrap(), "Gulf War", "Geopolitical", "High");
        assert_eq!(event.to_string(), "1990-08-02 Gulf War [Geopolitical/High]");
    }
}
