//! HTML rendering of page views.
//!
//! Pages are plain server-rendered documents: forms post back to their own
//! page and every read-side projection is drawn without client scripts.

use std::borrow::Cow;
use std::fmt::{self, Write};

use crate::config::UiConfig;
use crate::dispatch::{PageBody, PageView};
use crate::page::Page;
use crate::records::{Feeling, TableId, MAX_PAIN_LEVEL, MAX_PROGRESS};
use crate::view::{empty_notice, DurationChart, GoalProgress, Listing, Metric};

const STYLE: &str = r"
body { margin: 0; font-family: sans-serif; background-color: #f5f5f5; }
header { text-align: center; font-size: 24px; font-weight: bold; margin: 20px 0; color: #4CAF50; }
.layout { display: flex; }
nav { width: 220px; padding: 16px; background: #fff; }
nav a { display: block; padding: 6px 0; color: #333; text-decoration: none; }
nav a.active { font-weight: bold; color: #4CAF50; }
main { flex: 1; padding: 16px 32px; }
.metrics { display: flex; gap: 24px; }
.metric { background: #fff; padding: 12px 20px; border-radius: 5px; }
.metric .value { font-size: 18px; font-weight: bold; }
.notice { padding: 10px 14px; border-radius: 5px; margin: 12px 0; }
.notice.success { background: #e6f4ea; color: #1e6b34; }
.notice.error { background: #fdecea; color: #8a1c13; }
.notice.info { background: #e8f0fe; color: #174ea6; }
button, .button { background-color: #4CAF50; color: white; border: none; border-radius: 5px; padding: 10px 20px; text-decoration: none; }
button:hover, .button:hover { background-color: #45a049; }
form label { display: block; margin: 8px 0; }
table { border-collapse: collapse; background: #fff; }
th, td { border: 1px solid #ddd; padding: 4px 8px; }
progress { width: 100%; }
footer { text-align: center; font-size: 14px; margin-top: 50px; color: #888; }
";

const QUOTES: &[(&str, &str)] = &[
    (
        "The difference between the impossible and the possible lies in a person's determination.",
        "Tommy Lasorda",
    ),
    ("Ntawuzaguhesha agaciro nutiha agaciro", "Paul Kagame"),
    (
        "Run if you cant walk if you cant crawl no matter what just keep moving",
        "martin luther king",
    ),
];

/// Escape text for use in HTML content and quoted attribute values.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Render a complete HTML document for a page view.
#[must_use]
pub fn render_document(view: &PageView, ui: &UiConfig) -> String {
    let mut out = String::with_capacity(8 * 1024);
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, view, ui);
    out
}

fn write_document(out: &mut String, view: &PageView, ui: &UiConfig) -> fmt::Result {
    write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header>🏋️ Welcome to the Rehabilitation Management App!</header>\n\
         <div class=\"layout\">\n",
        escape(&ui.title)
    )?;

    write_nav(out, view.page)?;

    writeln!(out, "<main>\n<h2>{}</h2>", view.page.heading())?;
    if let Some(submission) = &view.submission {
        let kind = if submission.is_accepted() { "success" } else { "error" };
        write_notice(out, kind, submission.message())?;
    }

    match &view.body {
        PageBody::Home { metrics } => write_home(out, metrics)?,
        PageBody::LogExercise => write_exercise_form(out, view)?,
        PageBody::ViewProgress { listing, chart } => {
            if listing.is_empty() {
                write_notice(out, "info", empty_notice(TableId::Exercises))?;
            } else {
                write_listing(out, listing)?;
                writeln!(out, "<h3>Exercise Duration Over Time 📈</h3>")?;
                write_chart(out, chart)?;
            }
        }
        PageBody::SetGoals { goals } => {
            write_goal_form(out, view)?;
            write_goals(out, goals)?;
        }
        PageBody::ScheduleAppointment { appointments } => {
            write_appointment_form(out, view)?;
            if appointments.is_empty() {
                write_notice(out, "info", empty_notice(TableId::Appointments))?;
            } else {
                writeln!(out, "<h3>Your Appointments 📅</h3>")?;
                write_listing(out, appointments)?;
            }
        }
    }

    write!(
        out,
        "</main>\n</div>\n<footer>{}</footer>\n</body>\n</html>\n",
        escape(&ui.footer)
    )
}

fn write_nav(out: &mut String, current: Page) -> fmt::Result {
    writeln!(out, "<nav>\n<h3>Navigation</h3>")?;
    for page in Page::ALL {
        let class = if page == current { " class=\"active\"" } else { "" };
        writeln!(out, "<a href=\"{}\"{class}>{}</a>", page.path(), page.label())?;
    }
    writeln!(out, "</nav>")
}

fn write_notice(out: &mut String, kind: &str, message: &str) -> fmt::Result {
    writeln!(out, "<div class=\"notice {kind}\">{}</div>", escape(message))
}

fn write_home(out: &mut String, metrics: &[Metric]) -> fmt::Result {
    writeln!(
        out,
        "<p>This app helps you manage your rehabilitation exercises, set goals, \
         and track your progress.</p>"
    )?;
    for (quote, author) in QUOTES {
        writeln!(
            out,
            "<blockquote><em>\"{}\"</em><br><strong>- {}</strong></blockquote>",
            escape(quote),
            escape(author)
        )?;
    }

    writeln!(out, "<h3>Your Progress Summary 📊</h3>\n<div class=\"metrics\">")?;
    for metric in metrics {
        writeln!(
            out,
            "<div class=\"metric\"><div>{}</div><div class=\"value\">{}</div></div>",
            metric.label, metric.value
        )?;
    }
    writeln!(out, "</div>")?;

    writeln!(out, "<h3>Quick Navigation 🚀</h3>\n<div class=\"metrics\">")?;
    for (page, label) in [
        (Page::LogExercise, "Log Exercise"),
        (Page::ViewProgress, "View Progress"),
        (Page::SetGoals, "Set Goals"),
    ] {
        writeln!(out, "<a class=\"button\" href=\"{}\">{label}</a>", page.path())?;
    }
    writeln!(out, "</div>")
}

/// Value to pre-fill a form field with.
fn value<'a>(view: &'a PageView, name: &str, default: &'a str) -> Cow<'a, str> {
    escape(view.values.get(name).unwrap_or(default))
}

fn write_exercise_form(out: &mut String, view: &PageView) -> fmt::Result {
    let today = view.today.to_string();
    let selected = view
        .values
        .get("feeling")
        .and_then(Feeling::parse)
        .unwrap_or_default();

    writeln!(out, "<form method=\"post\" action=\"{}\">", view.page.path())?;
    writeln!(
        out,
        "<label>Date <input type=\"date\" name=\"date\" value=\"{}\"></label>",
        value(view, "date", &today)
    )?;
    writeln!(
        out,
        "<label>Exercise Name <input type=\"text\" name=\"exercise\" value=\"{}\"></label>",
        value(view, "exercise", "")
    )?;
    writeln!(
        out,
        "<label>Repetitions <input type=\"number\" name=\"reps\" min=\"0\" step=\"1\" value=\"{}\"></label>",
        value(view, "reps", "0")
    )?;
    writeln!(
        out,
        "<label>Duration (minutes) <input type=\"number\" name=\"duration\" min=\"0\" step=\"0.1\" value=\"{}\"></label>",
        value(view, "duration", "0.0")
    )?;
    writeln!(
        out,
        "<label>Notes <textarea name=\"notes\">{}</textarea></label>",
        value(view, "notes", "")
    )?;
    writeln!(
        out,
        "<label>How did you feel during the exercise? <select name=\"feeling\">"
    )?;
    for feeling in Feeling::ALL {
        let attr = if feeling == selected { " selected" } else { "" };
        writeln!(
            out,
            "<option value=\"{}\"{attr}>{}</option>",
            feeling.as_str(),
            feeling.label()
        )?;
    }
    writeln!(out, "</select></label>")?;
    writeln!(
        out,
        "<label>Pain Level (0-{MAX_PAIN_LEVEL}) <input type=\"range\" name=\"pain_level\" min=\"0\" max=\"{MAX_PAIN_LEVEL}\" value=\"{}\"></label>",
        value(view, "pain_level", "0")
    )?;
    writeln!(out, "<button type=\"submit\">Log Exercise</button>\n</form>")
}

fn write_goal_form(out: &mut String, view: &PageView) -> fmt::Result {
    let today = view.today.to_string();

    writeln!(out, "<form method=\"post\" action=\"{}\">", view.page.path())?;
    writeln!(
        out,
        "<label>Goal Description <input type=\"text\" name=\"goal\" value=\"{}\"></label>",
        value(view, "goal", "")
    )?;
    writeln!(
        out,
        "<label>Target Date <input type=\"date\" name=\"target_date\" value=\"{}\"></label>",
        value(view, "target_date", &today)
    )?;
    writeln!(
        out,
        "<label>Progress (%) <input type=\"number\" name=\"progress\" min=\"0\" max=\"{MAX_PROGRESS}\" step=\"1\" value=\"{}\"></label>",
        value(view, "progress", "0")
    )?;
    writeln!(
        out,
        "<label>Notes <textarea name=\"notes\">{}</textarea></label>",
        value(view, "notes", "")
    )?;
    writeln!(out, "<button type=\"submit\">Add Goal</button>\n</form>")
}

fn write_appointment_form(out: &mut String, view: &PageView) -> fmt::Result {
    let today = view.today.to_string();

    writeln!(out, "<form method=\"post\" action=\"{}\">", view.page.path())?;
    writeln!(
        out,
        "<label>Appointment Date <input type=\"date\" name=\"date\" value=\"{}\"></label>",
        value(view, "date", &today)
    )?;
    writeln!(
        out,
        "<label>Appointment Time <input type=\"time\" name=\"time\" value=\"{}\"></label>",
        value(view, "time", "09:00")
    )?;
    writeln!(
        out,
        "<label>Description of Appointment <input type=\"text\" name=\"description\" value=\"{}\"></label>",
        value(view, "description", "")
    )?;
    writeln!(
        out,
        "<button type=\"submit\">Schedule Appointment</button>\n</form>"
    )
}

fn write_goals(out: &mut String, goals: &[GoalProgress]) -> fmt::Result {
    if goals.is_empty() {
        return write_notice(out, "info", empty_notice(TableId::Goals));
    }
    writeln!(out, "<h3>Your Goals 📋</h3>")?;
    for goal in goals {
        writeln!(
            out,
            "<p><strong>{}</strong> (Target Date: {})</p>\n<progress value=\"{}\" max=\"1\"></progress>",
            escape(&goal.goal),
            goal.target_date,
            goal.fraction
        )?;
    }
    Ok(())
}

fn write_listing(out: &mut String, listing: &Listing) -> fmt::Result {
    writeln!(out, "<table>\n<thead><tr>")?;
    for column in listing.columns {
        write!(out, "<th>{column}</th>")?;
    }
    writeln!(out, "</tr></thead>\n<tbody>")?;
    for row in &listing.rows {
        write!(out, "<tr>")?;
        for cell in row {
            write!(out, "<td>{}</td>", escape(cell))?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody>\n</table>")
}

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 320.0;
const CHART_MARGIN: f64 = 48.0;

fn write_chart(out: &mut String, chart: &DurationChart) -> fmt::Result {
    let plot_width = CHART_WIDTH - 2.0 * CHART_MARGIN;
    let plot_height = CHART_HEIGHT - 2.0 * CHART_MARGIN;
    let baseline = CHART_HEIGHT - CHART_MARGIN;
    // Bar count never approaches f64's integer precision.
    #[allow(clippy::cast_precision_loss)]
    let slot = plot_width / chart.bars.len().max(1) as f64;

    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CHART_WIDTH}\" height=\"{CHART_HEIGHT}\" \
         role=\"img\" aria-label=\"{title}\">\n<title>{title}</title>",
        title = DurationChart::TITLE
    )?;
    writeln!(
        out,
        "<text x=\"{}\" y=\"20\" text-anchor=\"middle\">{}</text>",
        CHART_WIDTH / 2.0,
        DurationChart::TITLE
    )?;
    writeln!(
        out,
        "<line x1=\"{CHART_MARGIN}\" y1=\"{baseline}\" x2=\"{}\" y2=\"{baseline}\" stroke=\"#888\"/>",
        CHART_WIDTH - CHART_MARGIN
    )?;

    for (i, bar) in chart.bars.iter().enumerate() {
        let height = if chart.max_duration > 0.0 {
            bar.duration / chart.max_duration * plot_height
        } else {
            0.0
        };
        #[allow(clippy::cast_precision_loss)]
        let x = CHART_MARGIN + slot * i as f64;
        writeln!(
            out,
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{height:.1}\" fill=\"{}\">\
             <title>{}: {} min</title></rect>",
            x + slot * 0.1,
            baseline - height,
            slot * 0.8,
            bar.color,
            bar.date,
            bar.duration
        )?;
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\">{}</text>",
            x + slot / 2.0,
            baseline + 14.0,
            bar.date
        )?;
    }

    writeln!(
        out,
        "<text x=\"12\" y=\"{:.1}\" font-size=\"12\" transform=\"rotate(-90 12 {:.1})\" \
         text-anchor=\"middle\">Duration (minutes)</text>",
        CHART_HEIGHT / 2.0,
        CHART_HEIGHT / 2.0
    )?;
    writeln!(out, "</svg>")
}
