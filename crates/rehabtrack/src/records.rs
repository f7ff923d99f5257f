//! Core record types for rehabtrack.
//!
//! This module defines the three entry kinds a session can hold and the
//! identifiers of the tables they live in.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Highest pain level an exercise entry can carry.
pub const MAX_PAIN_LEVEL: u8 = 10;

/// Highest progress percentage a goal can carry.
pub const MAX_PROGRESS: u8 = 100;

/// Identifies one of the three session tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableId {
    /// Logged exercises.
    Exercises,
    /// Rehabilitation goals.
    Goals,
    /// Scheduled appointments.
    Appointments,
}

impl TableId {
    /// Every table, in display order.
    pub const ALL: [Self; 3] = [Self::Exercises, Self::Goals, Self::Appointments];

    /// The identifier used in URLs and JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exercises => "exercises",
            Self::Goals => "goals",
            Self::Appointments => "appointments",
        }
    }

    /// Column headers for the raw listing of this table.
    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Exercises => &[
                "Date",
                "Exercise",
                "Reps",
                "Duration",
                "Notes",
                "Feeling",
                "Pain Level",
            ],
            Self::Goals => &["Goal", "Target Date", "Progress", "Notes"],
            Self::Appointments => &["Date", "Time", "Description"],
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| Error::invalid_table(s))
    }
}

/// How the patient felt during an exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feeling {
    /// No answer was selected.
    #[default]
    Unset,
    /// Felt good.
    Good,
    /// Felt okay.
    Okay,
    /// Felt bad.
    Bad,
}

impl Feeling {
    /// Every choice, in the order the form offers them.
    pub const ALL: [Self; 4] = [Self::Unset, Self::Good, Self::Okay, Self::Bad];

    /// Form value for this choice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Good => "good",
            Self::Okay => "okay",
            Self::Bad => "bad",
        }
    }

    /// Label shown to the user.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Unset => "Select",
            Self::Good => "Good 😊",
            Self::Okay => "Okay 😐",
            Self::Bad => "Bad 😞",
        }
    }

    /// Parse a submitted value.
    ///
    /// Accepts form values and labels case-insensitively; a blank value or
    /// the `Select` placeholder means [`Feeling::Unset`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("select") {
            return Some(Self::Unset);
        }
        Self::ALL.into_iter().find(|feeling| {
            value.eq_ignore_ascii_case(feeling.as_str()) || value == feeling.label()
        })
    }
}

impl fmt::Display for Feeling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Day the exercise was done.
    pub date: NaiveDate,
    /// Name of the exercise.
    pub exercise: String,
    /// Number of repetitions.
    pub reps: u32,
    /// Duration in minutes.
    pub duration: f64,
    /// Free-form notes.
    pub notes: String,
    /// How the exercise felt.
    pub feeling: Feeling,
    /// Pain level, `0..=10`.
    pub pain_level: u8,
}

/// One rehabilitation goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEntry {
    /// What the goal is.
    pub goal: String,
    /// When the goal should be reached.
    pub target_date: NaiveDate,
    /// Percentage complete, `0..=100`.
    pub progress: u8,
    /// Free-form notes.
    pub notes: String,
}

impl GoalEntry {
    /// Progress as a fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        f64::from(self.progress) / f64::from(MAX_PROGRESS)
    }
}

/// One scheduled appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentEntry {
    /// Day of the appointment.
    pub date: NaiveDate,
    /// Time of day of the appointment.
    pub time: NaiveTime,
    /// What the appointment is for.
    pub description: String,
}

/// A record of any kind, tagged with the table it belongs in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "table", content = "record", rename_all = "snake_case")]
pub enum Record {
    /// An exercise entry.
    Exercise(ExerciseEntry),
    /// A goal entry.
    Goal(GoalEntry),
    /// An appointment entry.
    Appointment(AppointmentEntry),
}

impl Record {
    /// The table this record belongs in.
    #[must_use]
    pub fn table(&self) -> TableId {
        match self {
            Self::Exercise(_) => TableId::Exercises,
            Self::Goal(_) => TableId::Goals,
            Self::Appointment(_) => TableId::Appointments,
        }
    }
}

impl From<ExerciseEntry> for Record {
    fn from(entry: ExerciseEntry) -> Self {
        Self::Exercise(entry)
    }
}

impl From<GoalEntry> for Record {
    fn from(entry: GoalEntry) -> Self {
        Self::Goal(entry)
    }
}

impl From<AppointmentEntry> for Record {
    fn from(entry: AppointmentEntry) -> Self {
        Self::Appointment(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_table_id_round_trips_through_str() {
        for table in TableId::ALL {
            assert_eq!(table.as_str().parse::<TableId>().unwrap(), table);
        }
    }

    #[test]
    fn test_unknown_table_is_invalid() {
        let err = "medications".parse::<TableId>().unwrap_err();
        assert!(matches!(err, Error::InvalidTable { ref table } if table == "medications"));
    }

    #[test]
    fn test_table_id_is_case_sensitive() {
        assert!("Exercises".parse::<TableId>().is_err());
    }

    #[test]
    fn test_columns_match_field_count() {
        assert_eq!(TableId::Exercises.columns().len(), 7);
        assert_eq!(TableId::Goals.columns().len(), 4);
        assert_eq!(TableId::Appointments.columns().len(), 3);
    }

    #[test]
    fn test_feeling_parse() {
        assert_eq!(Feeling::parse(""), Some(Feeling::Unset));
        assert_eq!(Feeling::parse("Select"), Some(Feeling::Unset));
        assert_eq!(Feeling::parse("GOOD"), Some(Feeling::Good));
        assert_eq!(Feeling::parse(" okay "), Some(Feeling::Okay));
        assert_eq!(Feeling::parse("Bad 😞"), Some(Feeling::Bad));
        assert_eq!(Feeling::parse("great"), None);
    }

    #[test]
    fn test_feeling_display_uses_label() {
        assert_eq!(Feeling::Good.to_string(), "Good 😊");
        assert_eq!(Feeling::Unset.to_string(), "Select");
    }

    #[test]
    fn test_goal_fraction() {
        let goal = GoalEntry {
            goal: "Walk 1km".to_string(),
            target_date: date(2025, 6, 1),
            progress: 50,
            notes: String::new(),
        };
        assert!((goal.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_table() {
        let appointment = AppointmentEntry {
            date: date(2025, 1, 2),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            description: "Physio".to_string(),
        };
        assert_eq!(Record::from(appointment).table(), TableId::Appointments);
    }

    #[test]
    fn test_exercise_serialization() {
        let entry = ExerciseEntry {
            date: date(2025, 1, 1),
            exercise: "Squats".to_string(),
            reps: 10,
            duration: 5.0,
            notes: String::new(),
            feeling: Feeling::Good,
            pain_level: 2,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["feeling"], "good");
        assert_eq!(json["pain_level"], 2);
    }
}
