//! Page dispatch.
//!
//! One call here is one render pass: an optional submission runs to
//! completion against the session store, then the page is projected from
//! the store as it stands afterwards.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::form::{self, FormFields, SubmitAck};
use crate::page::Page;
use crate::records::TableId;
use crate::store::RecordStore;
use crate::view::{self, DurationChart, GoalProgress, Listing, Metric};

/// The page-specific part of a rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageBody {
    /// Summary metrics.
    Home {
        /// Record counts.
        metrics: [Metric; 3],
    },
    /// The exercise form has no read side.
    LogExercise,
    /// Every logged exercise and the duration chart.
    ViewProgress {
        /// Raw exercise listing.
        listing: Listing,
        /// Duration bar chart.
        chart: DurationChart,
    },
    /// Progress bars for every goal.
    SetGoals {
        /// One entry per goal.
        goals: Vec<GoalProgress>,
    },
    /// Every scheduled appointment.
    ScheduleAppointment {
        /// Raw appointment listing.
        appointments: Listing,
    },
}

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Submission {
    /// The record was appended.
    Accepted(SubmitAck),
    /// A field failed to coerce; nothing was appended.
    Rejected {
        /// Why the submission was rejected.
        message: String,
    },
}

impl Submission {
    /// Check if the record was appended.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Notification text for the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Accepted(ack) => ack.message,
            Self::Rejected { message } => message.as_str(),
        }
    }
}

/// Everything needed to present one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// The page being shown.
    pub page: Page,
    /// Default for blank date inputs.
    pub today: NaiveDate,
    /// Page content projected from the store.
    pub body: PageBody,
    /// Result of the submission made in this pass, if any.
    pub submission: Option<Submission>,
    /// Field values to pre-fill the form with.
    pub values: FormFields,
}

/// Render a page from the current store contents.
#[must_use]
pub fn render(page: Page, store: &RecordStore, today: NaiveDate) -> PageView {
    let body = match page {
        Page::Home => PageBody::Home {
            metrics: view::home_metrics(store.summary()),
        },
        Page::LogExercise => PageBody::LogExercise,
        Page::ViewProgress => PageBody::ViewProgress {
            listing: view::listing(store.read_all(TableId::Exercises)),
            chart: view::duration_chart(store.exercises()),
        },
        Page::SetGoals => PageBody::SetGoals {
            goals: view::progress(store.goals()),
        },
        Page::ScheduleAppointment => PageBody::ScheduleAppointment {
            appointments: view::listing(store.read_all(TableId::Appointments)),
        },
    };

    PageView {
        page,
        today,
        body,
        submission: None,
        values: FormFields::new(),
    }
}

/// Submit a page's form, then render the page.
///
/// A submission whose fields fail to coerce is reported in
/// [`PageView::submission`] rather than as an error, and leaves the store
/// unchanged.
///
/// # Errors
///
/// Returns [`Error::NoForm`] if the page has no form.
pub fn submit(
    page: Page,
    store: &mut RecordStore,
    fields: FormFields,
    today: NaiveDate,
) -> Result<PageView> {
    let table = page.form_table().ok_or(Error::NoForm { page: page.slug() })?;

    let submission = match form::submit_to(table, store, &fields, today) {
        Ok(ack) => Submission::Accepted(ack),
        Err(e) if e.is_input_error() => Submission::Rejected {
            message: e.to_string(),
        },
        Err(e) => return Err(e),
    };

    let mut view = render(page, store, today);
    view.submission = Some(submission);
    view.values = fields;
    Ok(view)
}
