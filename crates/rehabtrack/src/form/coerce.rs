//! Field coercion rules shared by the form controllers.
//!
//! Blank numeric fields fall back to zero and blank dates to the day of
//! submission, matching what the rendered form pre-fills.

use chrono::{NaiveDate, NaiveTime};

use super::FormFields;
use crate::error::{Error, Result};
use crate::records::Feeling;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time an appointment defaults to when none is given.
pub(crate) fn default_appointment_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Free text, verbatim.
pub(crate) fn text(fields: &FormFields, name: &'static str) -> String {
    fields.get(name).unwrap_or_default().to_string()
}

/// A `YYYY-MM-DD` date.
pub(crate) fn date(
    fields: &FormFields,
    name: &'static str,
    default: NaiveDate,
) -> Result<NaiveDate> {
    match fields.trimmed(name) {
        None => Ok(default),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| Error::coercion(name, raw, "a date formatted YYYY-MM-DD")),
    }
}

/// An `HH:MM` or `HH:MM:SS` time of day.
pub(crate) fn time(
    fields: &FormFields,
    name: &'static str,
    default: NaiveTime,
) -> Result<NaiveTime> {
    match fields.trimmed(name) {
        None => Ok(default),
        Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| Error::coercion(name, raw, "a time formatted HH:MM")),
    }
}

/// A whole number `>= 0`.
pub(crate) fn count(fields: &FormFields, name: &'static str) -> Result<u32> {
    match fields.trimmed(name) {
        None => Ok(0),
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| Error::coercion(name, raw, "a non-negative integer")),
    }
}

/// A finite real number `>= 0`. Negative zero is stored as zero.
pub(crate) fn amount(fields: &FormFields, name: &'static str) -> Result<f64> {
    match fields.trimmed(name) {
        None => Ok(0.0),
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value + 0.0),
            _ => Err(Error::coercion(name, raw, "a non-negative number")),
        },
    }
}

/// A whole number clamped into `0..=max`.
pub(crate) fn clamped(fields: &FormFields, name: &'static str, max: u8) -> Result<u8> {
    match fields.trimmed(name) {
        None => Ok(0),
        Some(raw) => {
            let value = raw
                .parse::<i64>()
                .map_err(|_| Error::coercion(name, raw, "an integer"))?;
            let clamped = value.clamp(0, i64::from(max));
            Ok(u8::try_from(clamped).unwrap_or(max))
        }
    }
}

/// One of the [`Feeling`] choices.
pub(crate) fn feeling(fields: &FormFields, name: &'static str) -> Result<Feeling> {
    let raw = fields.get(name).unwrap_or_default();
    Feeling::parse(raw).ok_or_else(|| Error::coercion(name, raw, "one of unset, good, okay, bad"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs.iter().copied().collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    #[test]
    fn test_text_is_verbatim() {
        let f = fields(&[("notes", "  sore knee  ")]);
        assert_eq!(text(&f, "notes"), "  sore knee  ");
        assert_eq!(text(&f, "missing"), "");
    }

    #[test]
    fn test_date_parses_and_defaults() {
        let f = fields(&[("date", "2025-01-01"), ("blank", "  ")]);
        assert_eq!(
            date(&f, "date", today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(date(&f, "blank", today()).unwrap(), today());
        assert_eq!(date(&f, "missing", today()).unwrap(), today());
    }

    #[test]
    fn test_date_rejects_garbage() {
        let f = fields(&[("date", "01/02/2025")]);
        let err = date(&f, "date", today()).unwrap_err();
        assert!(matches!(err, Error::FieldCoercion { field: "date", .. }));
    }

    #[test]
    fn test_time_accepts_both_formats() {
        let f = fields(&[("short", "14:30"), ("long", "14:30:15")]);
        assert_eq!(
            time(&f, "short", default_appointment_time()).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap()
        );
        assert_eq!(
            time(&f, "long", default_appointment_time()).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 15).unwrap()
        );
        assert_eq!(
            time(&f, "missing", default_appointment_time()).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_count() {
        let f = fields(&[("ok", "12"), ("neg", "-1"), ("word", "ten"), ("frac", "1.5")]);
        assert_eq!(count(&f, "ok").unwrap(), 12);
        assert_eq!(count(&f, "missing").unwrap(), 0);
        assert!(count(&f, "neg").is_err());
        assert!(count(&f, "word").is_err());
        assert!(count(&f, "frac").is_err());
    }

    #[test]
    fn test_amount() {
        let f = fields(&[
            ("ok", "5.5"),
            ("int", "3"),
            ("neg", "-0.1"),
            ("nan", "NaN"),
            ("inf", "inf"),
            ("word", "five"),
            ("negzero", "-0"),
        ]);
        assert!((amount(&f, "ok").unwrap() - 5.5).abs() < f64::EPSILON);
        assert!((amount(&f, "int").unwrap() - 3.0).abs() < f64::EPSILON);
        assert!(amount(&f, "missing").unwrap().abs() < f64::EPSILON);
        assert!(amount(&f, "neg").is_err());
        assert!(amount(&f, "nan").is_err());
        assert!(amount(&f, "inf").is_err());
        assert!(amount(&f, "word").is_err());

        let zero = amount(&f, "negzero").unwrap();
        assert!(zero.abs() < f64::EPSILON);
        assert!(zero.is_sign_positive());
        assert_eq!(zero.to_string(), "0");
    }

    #[test]
    fn test_clamped_boundaries() {
        let f = fields(&[
            ("zero", "0"),
            ("max", "100"),
            ("over", "101"),
            ("under", "-3"),
            ("huge", "99999999999"),
            ("word", "half"),
        ]);
        assert_eq!(clamped(&f, "zero", 100).unwrap(), 0);
        assert_eq!(clamped(&f, "max", 100).unwrap(), 100);
        assert_eq!(clamped(&f, "over", 100).unwrap(), 100);
        assert_eq!(clamped(&f, "under", 100).unwrap(), 0);
        assert_eq!(clamped(&f, "huge", 10).unwrap(), 10);
        assert_eq!(clamped(&f, "missing", 10).unwrap(), 0);
        assert!(clamped(&f, "word", 100).is_err());
    }

    #[test]
    fn test_feeling() {
        let f = fields(&[("good", "good"), ("bogus", "ecstatic")]);
        assert_eq!(feeling(&f, "good").unwrap(), Feeling::Good);
        assert_eq!(feeling(&f, "missing").unwrap(), Feeling::Unset);
        assert!(feeling(&f, "bogus").is_err());
    }
}
