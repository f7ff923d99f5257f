//! `rehabtrack` - A session-scoped rehabilitation tracker
//!
//! This library provides the record store, form handling and page rendering
//! behind the `rehabtrack` web application. Each browser session owns three
//! in-memory tables (exercises, goals and appointments) that live only as
//! long as the session does.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod logging;
pub mod page;
pub mod records;
pub mod server;
pub mod store;
pub mod view;

pub use config::Config;
pub use dispatch::{PageView, Submission};
pub use error::{Error, Result};
pub use form::{FormController, FormFields, SubmitAck};
pub use logging::init_logging;
pub use page::Page;
pub use records::{AppointmentEntry, ExerciseEntry, Feeling, GoalEntry, Record, TableId};
pub use store::{RecordStore, SessionId, SessionRegistry};
