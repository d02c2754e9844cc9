//! Closed domain enums.
//!
//! Every categorical field on the wire and in the database is one of these
//! sets. All serialize as SCREAMING_SNAKE strings both in JSON and in their
//! TEXT columns, so a value that deserializes is by construction a member of
//! the canonical set.

use serde::{Deserialize, Serialize};

/// Self-reported driver skill tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Pro,
}

/// Category of a car modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModCategory {
    Engine,
    Suspension,
    Aero,
    Brakes,
    WheelsTires,
    Drivetrain,
    Exhaust,
    Interior,
    Exterior,
    Electronics,
    Other,
}

/// Discipline a track hosts.
///
/// This is the one canonical set; legacy "GRIP" values are not accepted
/// anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Autocross,
    Roadcourse,
    Drift,
    Drag,
}

impl std::str::FromStr for EventType {
    type Err = String;

    /// Parse a free-form event type string, case-insensitively. Used by
    /// the bulk import, whose data file carries lowercase values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AUTOCROSS" => Ok(Self::Autocross),
            "ROADCOURSE" => Ok(Self::Roadcourse),
            "DRIFT" => Ok(Self::Drift),
            "DRAG" => Ok(Self::Drag),
            other => Err(format!("unknown event type: {other}")),
        }
    }
}

/// Surface condition a review, tip, or lap was recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrivingCondition {
    Dry,
    Wet,
}

/// Track moderation status. Only APPROVED tracks are publicly listed;
/// creation currently always writes APPROVED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackStatus {
    Pending,
    Approved,
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_wire_form() {
        let json = serde_json::to_string(&EventType::Roadcourse).unwrap();
        assert_eq!(json, "\"ROADCOURSE\"");

        let parsed: EventType = serde_json::from_str("\"AUTOCROSS\"").unwrap();
        assert_eq!(parsed, EventType::Autocross);
    }

    #[test]
    fn test_grip_is_rejected() {
        let result: Result<EventType, _> = serde_json::from_str("\"GRIP\"");
        assert!(result.is_err(), "GRIP is not a member of the canonical set");
    }

    #[test]
    fn test_mod_category_screaming_snake() {
        let json = serde_json::to_string(&ModCategory::WheelsTires).unwrap();
        assert_eq!(json, "\"WHEELS_TIRES\"");

        let parsed: ModCategory = serde_json::from_str("\"WHEELS_TIRES\"").unwrap();
        assert_eq!(parsed, ModCategory::WheelsTires);
    }

    #[test]
    fn test_lowercase_condition_rejected() {
        let result: Result<DrivingCondition, _> = serde_json::from_str("\"dry\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_event_type_from_str_case_insensitive() {
        assert_eq!("roadcourse".parse::<EventType>(), Ok(EventType::Roadcourse));
        assert_eq!("DRAG".parse::<EventType>(), Ok(EventType::Drag));
        assert!("grip".parse::<EventType>().is_err());
    }

    #[test]
    fn test_track_status_members() {
        for (s, v) in [
            ("\"PENDING\"", TrackStatus::Pending),
            ("\"APPROVED\"", TrackStatus::Approved),
            ("\"REJECTED\"", TrackStatus::Rejected),
        ] {
            let parsed: TrackStatus = serde_json::from_str(s).unwrap();
            assert_eq!(parsed, v);
        }
    }
}
