//! Form controllers for rehabtrack.
//!
//! Each table has one controller. A controller turns the raw string fields of
//! one submission into a typed record and appends it to the session store.
//! Submission is all-or-nothing: if any field fails to coerce, nothing is
//! appended.
//!
//! # Example
//!
//! ```
//! use rehabtrack::form::{FormController, FormFields, GoalForm};
//! use rehabtrack::store::RecordStore;
//!
//! let mut store = RecordStore::new();
//! let fields: FormFields = [("goal", "Walk 1km"), ("progress", "50")]
//!     .into_iter()
//!     .collect();
//!
//! let ack = GoalForm::submit(&mut store, &fields).unwrap();
//! assert_eq!(ack.row_count, 1);
//! assert_eq!(store.goals()[0].progress, 50);
//! ```

mod coerce;

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::records::{
    AppointmentEntry, ExerciseEntry, GoalEntry, Record, TableId, MAX_PAIN_LEVEL, MAX_PROGRESS,
};
use crate::store::RecordStore;

/// Raw field values of one form submission, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Create an empty set of fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Get a field value exactly as submitted.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Get a field value with surrounding whitespace removed, treating a
    /// blank value as absent.
    #[must_use]
    pub fn trimmed(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Acknowledgment of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitAck {
    /// The table the record was appended to.
    pub table: TableId,
    /// Message to show the user.
    pub message: &'static str,
    /// Number of records in the table after the append.
    pub row_count: usize,
}

/// Collects one record from form fields and appends it on submit.
pub trait FormController {
    /// The table this controller writes to.
    const TABLE: TableId;

    /// Message shown after a successful submission.
    const SUCCESS_MESSAGE: &'static str;

    /// The record type this form produces.
    type Entry: Into<Record>;

    /// Coerce raw fields into a record.
    ///
    /// `today` is used for date fields left blank.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FieldCoercion`] for the first field that cannot
    /// be coerced.
    fn coerce(fields: &FormFields, today: NaiveDate) -> Result<Self::Entry>;

    /// Coerce the fields and append the record, dating blank fields today.
    ///
    /// # Errors
    ///
    /// Returns an error if coercion fails. The store is unchanged.
    fn submit(store: &mut RecordStore, fields: &FormFields) -> Result<SubmitAck> {
        Self::submit_on(store, fields, Local::now().date_naive())
    }

    /// Coerce the fields and append the record, with an explicit date for
    /// blank date fields.
    ///
    /// # Errors
    ///
    /// Returns an error if coercion fails. The store is unchanged.
    fn submit_on(
        store: &mut RecordStore,
        fields: &FormFields,
        today: NaiveDate,
    ) -> Result<SubmitAck> {
        let entry = match Self::coerce(fields, today) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(table = %Self::TABLE, error = %e, "Rejected submission");
                return Err(e);
            }
        };
        let row_count = store.append(Self::TABLE, entry)?;
        info!(table = %Self::TABLE, row_count, "Accepted submission");
        Ok(SubmitAck {
            table: Self::TABLE,
            message: Self::SUCCESS_MESSAGE,
            row_count,
        })
    }
}

/// The "Log Exercise" form.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseForm;

impl FormController for ExerciseForm {
    const TABLE: TableId = TableId::Exercises;
    const SUCCESS_MESSAGE: &'static str = "Exercise logged successfully! ✅";
    type Entry = ExerciseEntry;

    fn coerce(fields: &FormFields, today: NaiveDate) -> Result<ExerciseEntry> {
        Ok(ExerciseEntry {
            date: coerce::date(fields, "date", today)?,
            exercise: coerce::text(fields, "exercise"),
            reps: coerce::count(fields, "reps")?,
            duration: coerce::amount(fields, "duration")?,
            notes: coerce::text(fields, "notes"),
            feeling: coerce::feeling(fields, "feeling")?,
            pain_level: coerce::clamped(fields, "pain_level", MAX_PAIN_LEVEL)?,
        })
    }
}

/// The "Set Goals" form.
#[derive(Debug, Clone, Copy)]
pub struct GoalForm;

impl FormController for GoalForm {
    const TABLE: TableId = TableId::Goals;
    const SUCCESS_MESSAGE: &'static str = "Goal added successfully! 🎉";
    type Entry = GoalEntry;

    fn coerce(fields: &FormFields, today: NaiveDate) -> Result<GoalEntry> {
        Ok(GoalEntry {
            goal: coerce::text(fields, "goal"),
            target_date: coerce::date(fields, "target_date", today)?,
            progress: coerce::clamped(fields, "progress", MAX_PROGRESS)?,
            notes: coerce::text(fields, "notes"),
        })
    }
}

/// The "Schedule Appointment" form.
#[derive(Debug, Clone, Copy)]
pub struct AppointmentForm;

impl FormController for AppointmentForm {
    const TABLE: TableId = TableId::Appointments;
    const SUCCESS_MESSAGE: &'static str = "Appointment scheduled successfully! ✅";
    type Entry = AppointmentEntry;

    fn coerce(fields: &FormFields, today: NaiveDate) -> Result<AppointmentEntry> {
        Ok(AppointmentEntry {
            date: coerce::date(fields, "date", today)?,
            time: coerce::time(fields, "time", coerce::default_appointment_time())?,
            description: coerce::text(fields, "description"),
        })
    }
}

/// Submit to whichever controller owns `table`.
///
/// # Errors
///
/// Returns an error if coercion fails. The store is unchanged.
pub fn submit_to(
    table: TableId,
    store: &mut RecordStore,
    fields: &FormFields,
    today: NaiveDate,
) -> Result<SubmitAck> {
    match table {
        TableId::Exercises => ExerciseForm::submit_on(store, fields, today),
        TableId::Goals => GoalForm::submit_on(store, fields, today),
        TableId::Appointments => AppointmentForm::submit_on(store, fields, today),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::error::Error;
    use crate::records::Feeling;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn squats_fields() -> FormFields {
        [
            ("date", "2025-01-01"),
            ("exercise", "Squats"),
            ("reps", "10"),
            ("duration", "5.0"),
            ("notes", ""),
            ("feeling", "good"),
            ("pain_level", "2"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_exercise_submit_scenario() {
        let mut store = RecordStore::new();
        let ack = ExerciseForm::submit(&mut store, &squats_fields()).unwrap();

        assert_eq!(ack.table, TableId::Exercises);
        assert_eq!(ack.message, "Exercise logged successfully! ✅");
        assert_eq!(ack.row_count, 1);
        assert_eq!(
            store.exercises(),
            [ExerciseEntry {
                date: date(2025, 1, 1),
                exercise: "Squats".to_string(),
                reps: 10,
                duration: 5.0,
                notes: String::new(),
                feeling: Feeling::Good,
                pain_level: 2,
            }]
        );
        assert_eq!(store.summary().exercises, 1);
    }

    #[test]
    fn test_non_numeric_reps_leaves_store_unchanged() {
        let mut store = RecordStore::new();
        let mut fields = squats_fields();
        fields.insert("reps", "lots");

        let err = ExerciseForm::submit(&mut store, &fields).unwrap_err();
        assert!(matches!(err, Error::FieldCoercion { field: "reps", .. }));
        assert!(err.is_input_error());
        assert_eq!(store.len(TableId::Exercises), 0);
    }

    #[test]
    fn test_non_numeric_progress_leaves_store_unchanged() {
        let mut store = RecordStore::new();
        GoalForm::submit(&mut store, &[("goal", "Stairs"), ("progress", "10")].into_iter().collect())
            .unwrap();

        let fields: FormFields = [("goal", "Walk"), ("progress", "half")].into_iter().collect();
        assert!(GoalForm::submit(&mut store, &fields).is_err());
        assert_eq!(store.len(TableId::Goals), 1);
    }

    #[test]
    fn test_late_field_failure_is_atomic() {
        // Every field before pain_level coerces; the last one does not.
        let mut store = RecordStore::new();
        let mut fields = squats_fields();
        fields.insert("pain_level", "severe");

        assert!(ExerciseForm::submit(&mut store, &fields).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_pain_level_is_clamped() {
        let mut store = RecordStore::new();
        for (raw, expected) in [("0", 0), ("10", 10), ("11", 10), ("-4", 0)] {
            let mut fields = squats_fields();
            fields.insert("pain_level", raw);
            ExerciseForm::submit(&mut store, &fields).unwrap();
            assert_eq!(store.exercises().last().unwrap().pain_level, expected);
        }
        assert!(store
            .exercises()
            .iter()
            .all(|e| e.pain_level <= MAX_PAIN_LEVEL));
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut store = RecordStore::new();
        for (raw, expected) in [("0", 0), ("100", 100), ("101", 100), ("-1", 0)] {
            let fields: FormFields = [("goal", "Walk 1km"), ("progress", raw)].into_iter().collect();
            GoalForm::submit(&mut store, &fields).unwrap();
            assert_eq!(store.goals().last().unwrap().progress, expected);
        }
    }

    #[test]
    fn test_goal_scenario_fraction() {
        let mut store = RecordStore::new();
        let fields: FormFields = [
            ("goal", "Walk 1km"),
            ("target_date", "2025-06-01"),
            ("progress", "50"),
            ("notes", ""),
        ]
        .into_iter()
        .collect();

        GoalForm::submit(&mut store, &fields).unwrap();
        let goal = &store.goals()[0];
        assert_eq!(goal.target_date, date(2025, 6, 1));
        assert!((goal.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_blank_fields_use_defaults() {
        let mut store = RecordStore::new();
        let today = date(2025, 7, 14);

        submit_to(TableId::Appointments, &mut store, &FormFields::new(), today).unwrap();
        submit_to(TableId::Exercises, &mut store, &FormFields::new(), today).unwrap();

        let appointment = &store.appointments()[0];
        assert_eq!(appointment.date, today);
        assert_eq!(appointment.time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(appointment.description, "");

        let exercise = &store.exercises()[0];
        assert_eq!(exercise.date, today);
        assert_eq!(exercise.reps, 0);
        assert_eq!(exercise.feeling, Feeling::Unset);
    }

    #[test]
    fn test_two_appointments_keep_submission_order() {
        let mut store = RecordStore::new();
        let first: FormFields = [("date", "2025-03-01"), ("time", "09:00"), ("description", "Physio")]
            .into_iter()
            .collect();
        let second: FormFields = [("date", "2025-02-01"), ("time", "15:30"), ("description", "Scan")]
            .into_iter()
            .collect();

        AppointmentForm::submit(&mut store, &first).unwrap();
        let ack = AppointmentForm::submit(&mut store, &second).unwrap();

        assert_eq!(ack.row_count, 2);
        let descriptions: Vec<&str> = store
            .appointments()
            .iter()
            .map(|a| a.description.as_str())
            .collect();
        assert_eq!(descriptions, ["Physio", "Scan"]);
        assert_eq!(
            store.appointments()[1].time,
            NaiveTime::from_hms_opt(15, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_form_fields_trimmed() {
        let fields: FormFields = [("a", "  x "), ("b", "   ")].into_iter().collect();
        assert_eq!(fields.trimmed("a"), Some("x"));
        assert_eq!(fields.trimmed("b"), None);
        assert_eq!(fields.get("b"), Some("   "));
        assert_eq!(fields.trimmed("c"), None);
    }

    #[test]
    fn test_form_fields_deserialize_from_json_object() {
        let fields: FormFields = serde_json::from_str(r#"{"goal": "Walk"}"#).unwrap();
        assert_eq!(fields.get("goal"), Some("Walk"));
    }
}
