//! Navigation pages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::records::TableId;

/// A page of the application, as picked from the sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    /// Summary metrics and quick links.
    #[default]
    Home,
    /// Exercise logging form.
    LogExercise,
    /// Exercise listing and duration chart.
    ViewProgress,
    /// Goal form and progress bars.
    SetGoals,
    /// Appointment form and listing.
    ScheduleAppointment,
}

impl Page {
    /// Every page, in sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::LogExercise,
        Self::ViewProgress,
        Self::SetGoals,
        Self::ScheduleAppointment,
    ];

    /// URL path segment for this page.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::LogExercise => "log-exercise",
            Self::ViewProgress => "view-progress",
            Self::SetGoals => "set-goals",
            Self::ScheduleAppointment => "schedule-appointment",
        }
    }

    /// Sidebar label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "🏠 Home",
            Self::LogExercise => "📝 Log Exercise",
            Self::ViewProgress => "📊 View Progress",
            Self::SetGoals => "🎯 Set Goals",
            Self::ScheduleAppointment => "📅 Schedule Appointment",
        }
    }

    /// Page heading.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Home => "Welcome to the Rehabilitation Management App! 🎉",
            Self::LogExercise => "Log Your Exercise 📝",
            Self::ViewProgress => "Your Exercise Progress 📊",
            Self::SetGoals => "Set Your Rehabilitation Goals 🎯",
            Self::ScheduleAppointment => "Schedule an Appointment 📅",
        }
    }

    /// URL of this page.
    #[must_use]
    pub fn path(self) -> String {
        format!("/pages/{}", self.slug())
    }

    /// The table this page's form writes to, if it has a form.
    #[must_use]
    pub fn form_table(self) -> Option<TableId> {
        match self {
            Self::Home | Self::ViewProgress => None,
            Self::LogExercise => Some(TableId::Exercises),
            Self::SetGoals => Some(TableId::Goals),
            Self::ScheduleAppointment => Some(TableId::Appointments),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.slug() == s)
            .ok_or_else(|| Error::UnknownPage {
                slug: s.to_string(),
            })
    }
}
