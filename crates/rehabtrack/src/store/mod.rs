//! Session-scoped record storage for rehabtrack.
//!
//! A [`RecordStore`] holds the three append-only tables of one session. The
//! [`SessionRegistry`] maps session identifiers to their stores and drops
//! stores whose session has gone idle.

mod sessions;

pub use sessions::{SessionId, SessionRegistry, SharedStore};
pub(crate) use sessions::lock_store;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::records::{AppointmentEntry, ExerciseEntry, GoalEntry, Record, TableId};

/// The three tables of one session.
///
/// Records are only ever appended; order of insertion is order of display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    exercises: Vec<ExerciseEntry>,
    goals: Vec<GoalEntry>,
    appointments: Vec<AppointmentEntry>,
}

/// A read-only view of one table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Table<'a> {
    /// The exercises table.
    Exercises(&'a [ExerciseEntry]),
    /// The goals table.
    Goals(&'a [GoalEntry]),
    /// The appointments table.
    Appointments(&'a [AppointmentEntry]),
}

impl Table<'_> {
    /// Which table this is.
    #[must_use]
    pub fn id(&self) -> TableId {
        match self {
            Self::Exercises(_) => TableId::Exercises,
            Self::Goals(_) => TableId::Goals,
            Self::Appointments(_) => TableId::Appointments,
        }
    }

    /// Number of records in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Exercises(rows) => rows.len(),
            Self::Goals(rows) => rows.len(),
            Self::Appointments(rows) => rows.len(),
        }
    }

    /// Check if the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Record counts across a session, surfaced as the home page metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of logged exercises.
    pub exercises: usize,
    /// Number of goals set.
    pub goals: usize,
    /// Number of scheduled appointments.
    pub appointments: usize,
}

impl RecordStore {
    /// Create a store with three empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the end of the named table.
    ///
    /// Returns the table length after the append.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTable`] if the record does not belong in
    /// `table`. The store is left unchanged.
    pub fn append(&mut self, table: TableId, record: impl Into<Record>) -> Result<usize> {
        let len = match (table, record.into()) {
            (TableId::Exercises, Record::Exercise(entry)) => {
                self.exercises.push(entry);
                self.exercises.len()
            }
            (TableId::Goals, Record::Goal(entry)) => {
                self.goals.push(entry);
                self.goals.len()
            }
            (TableId::Appointments, Record::Appointment(entry)) => {
                self.appointments.push(entry);
                self.appointments.len()
            }
            (table, record) => {
                return Err(Error::invalid_table(format!(
                    "{table} cannot hold a {} record",
                    record.table()
                )));
            }
        };
        debug!(%table, len, "Appended record");
        Ok(len)
    }

    /// Read every record of a table, in insertion order.
    #[must_use]
    pub fn read_all(&self, table: TableId) -> Table<'_> {
        match table {
            TableId::Exercises => Table::Exercises(&self.exercises),
            TableId::Goals => Table::Goals(&self.goals),
            TableId::Appointments => Table::Appointments(&self.appointments),
        }
    }

    /// Read every record of a table named by its string identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTable`] if no table has that name.
    pub fn read_named(&self, name: &str) -> Result<Table<'_>> {
        Ok(self.read_all(name.parse()?))
    }

    /// All logged exercises.
    #[must_use]
    pub fn exercises(&self) -> &[ExerciseEntry] {
        &self.exercises
    }

    /// All goals.
    #[must_use]
    pub fn goals(&self) -> &[GoalEntry] {
        &self.goals
    }

    /// All appointments.
    #[must_use]
    pub fn appointments(&self) -> &[AppointmentEntry] {
        &self.appointments
    }

    /// Number of records in a table.
    #[must_use]
    pub fn len(&self, table: TableId) -> usize {
        self.read_all(table).len()
    }

    /// Check if every table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        TableId::ALL.into_iter().all(|table| self.len(table) == 0)
    }

    /// Record counts for all three tables.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            exercises: self.exercises.len(),
            goals: self.goals.len(),
            appointments: self.appointments.len(),
        }
    }
}
