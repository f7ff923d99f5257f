//! Read-only projections of session tables.
//!
//! Every function here is a pure function of the records it is given. The
//! [`html`] submodule turns these projections into markup.

pub mod html;

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::records::{ExerciseEntry, GoalEntry, TableId};
use crate::store::{Summary, Table};

/// Shown on the progress page before any exercise is logged.
pub const NO_EXERCISES: &str =
    "No exercise data logged yet. Start logging your exercises to see progress!";

/// Shown on the goals page before any goal is set.
pub const NO_GOALS: &str = "No goals set yet. Start setting your goals to track progress!";

/// Shown on the appointments page before any appointment is scheduled.
pub const NO_APPOINTMENTS: &str = "No appointments scheduled yet.";

/// A table rendered as header and string cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Column headers.
    pub columns: &'static [&'static str],
    /// One row of cells per record, in insertion order.
    pub rows: Vec<Vec<String>>,
}

impl Listing {
    /// Check if the listing has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render every record of a table as a row of cells.
#[must_use]
pub fn listing(table: Table<'_>) -> Listing {
    let rows = match table {
        Table::Exercises(rows) => rows
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    e.exercise.clone(),
                    e.reps.to_string(),
                    format_minutes(e.duration),
                    e.notes.clone(),
                    e.feeling.label().to_string(),
                    e.pain_level.to_string(),
                ]
            })
            .collect(),
        Table::Goals(rows) => rows
            .iter()
            .map(|g| {
                vec![
                    g.goal.clone(),
                    g.target_date.to_string(),
                    g.progress.to_string(),
                    g.notes.clone(),
                ]
            })
            .collect(),
        Table::Appointments(rows) => rows
            .iter()
            .map(|a| {
                vec![
                    a.date.to_string(),
                    a.time.to_string(),
                    a.description.clone(),
                ]
            })
            .collect(),
    };

    Listing {
        columns: table.id().columns(),
        rows,
    }
}

/// Durations always show at least one decimal place, so `5.0` stays `5.0`.
fn format_minutes(minutes: f64) -> String {
    if minutes.fract().abs() < f64::EPSILON {
        format!("{minutes:.1}")
    } else {
        minutes.to_string()
    }
}

/// One goal as shown on the goals page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    /// What the goal is.
    pub goal: String,
    /// When it should be reached.
    pub target_date: NaiveDate,
    /// Progress as a fraction in `[0, 1]`.
    pub fraction: f64,
}

/// Project goals into progress bars.
#[must_use]
pub fn progress(goals: &[GoalEntry]) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|g| GoalProgress {
            goal: g.goal.clone(),
            target_date: g.target_date,
            fraction: g.fraction(),
        })
        .collect()
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Color of the shortest bar.
    pub const LOW: Self = Self(13, 8, 135);
    /// Color of the longest bar.
    pub const HIGH: Self = Self(240, 249, 33);

    /// Blend from `self` toward `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        // A blend of two u8 values stays within u8.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel =
            |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One bar of the duration chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    /// Day of the exercise.
    pub date: NaiveDate,
    /// Duration in minutes.
    pub duration: f64,
    /// Bar color, scaled by duration.
    pub color: Rgb,
}

/// The "Exercise Duration Over Time" bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationChart {
    /// One bar per exercise, in insertion order.
    pub bars: Vec<ChartBar>,
    /// The longest duration, or `0.0` for an empty chart.
    pub max_duration: f64,
}

impl DurationChart {
    /// Chart title.
    pub const TITLE: &'static str = "Exercise Duration Over Time";
}

/// Project exercises into one bar per record.
///
/// Bars are not aggregated by date: two exercises on the same day give two
/// bars.
#[must_use]
pub fn duration_chart(exercises: &[ExerciseEntry]) -> DurationChart {
    let max_duration = exercises.iter().map(|e| e.duration).fold(0.0, f64::max);
    let bars = exercises
        .iter()
        .map(|e| {
            let t = if max_duration > 0.0 {
                e.duration / max_duration
            } else {
                0.0
            };
            ChartBar {
                date: e.date,
                duration: e.duration,
                color: Rgb::LOW.lerp(Rgb::HIGH, t),
            }
        })
        .collect();

    DurationChart { bars, max_duration }
}

/// A labelled count on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metric {
    /// Metric label.
    pub label: &'static str,
    /// Metric value.
    pub value: usize,
}

/// The three home page metrics.
#[must_use]
pub fn home_metrics(summary: Summary) -> [Metric; 3] {
    [
        Metric {
            label: "Total Exercises Logged",
            value: summary.exercises,
        },
        Metric {
            label: "Goals Set",
            value: summary.goals,
        },
        Metric {
            label: "Appointments Scheduled",
            value: summary.appointments,
        },
    ]
}

/// The empty-state notice of a table.
#[must_use]
pub fn empty_notice(table: TableId) -> &'static str {
    match table {
        TableId::Exercises => NO_EXERCISES,
        TableId::Goals => NO_GOALS,
        TableId::Appointments => NO_APPOINTMENTS,
    }
}
