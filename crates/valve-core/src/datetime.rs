//! Cell coercion for dates and numbers.
//!
//! Failures resolve to `None`; callers treat that as an absent value.

use chrono::{NaiveDate, NaiveDateTime};

use valve_model::RawValue;

/// Procedure date of a cell, if it holds or spells one.
///
/// Numeric cells are not dates: sheet readers deliver real date cells as
/// [`RawValue::Date`]/[`RawValue::DateTime`].
pub fn parse_procedure_date(value: &RawValue) -> Option<NaiveDate> {
    match value {
        RawValue::Date(date) => Some(*date),
        RawValue::DateTime(dt) => Some(dt.date()),
        RawValue::Text(text) => parse_date_text(text),
        RawValue::Number(_) | RawValue::Missing => None,
    }
}

/// Parse the date part of a textual date or datetime.
///
/// Ambiguous numeric forms are read day-first, as written in the source
/// workbook's locale.
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_datetime(trimmed)
        .map(|dt| dt.date())
        .or_else(|| try_parse_date(trimmed))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%d.%m.%y %H:%M:%S",
        "%d.%m.%y %H:%M",
        "%d.%m.%Y %H:%M:%S",
        "%d.%m.%Y %H:%M",
        "%d/%m/%y %H:%M:%S",
        "%d/%m/%y %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        // Two-digit years first: %Y would read "24" as the year 24.
        "%d.%m.%y", // 15.01.24
        "%d.%m.%Y", // German: 15.01.2024
        "%d/%m/%y",
        "%Y/%m/%d",
        "%d/%m/%Y",
        "%d-%b-%Y", // 15-Jan-2024
        "%d-%m-%Y",
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Numeric value of a cell.
///
/// Accepts a decimal comma when the text has no decimal point.
pub fn parse_number(value: &RawValue) -> Option<f64> {
    let parsed = match value {
        RawValue::Number(number) => Some(*number),
        RawValue::Text(text) => {
            let trimmed = text.trim();
            trimmed.parse::<f64>().ok().or_else(|| {
                if trimmed.contains(',') && !trimmed.contains('.') {
                    trimmed.replace(',', ".").parse::<f64>().ok()
                } else {
                    None
                }
            })
        }
        RawValue::Date(_) | RawValue::DateTime(_) | RawValue::Missing => None,
    };
    parsed.filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> RawValue {
        RawValue::Text(value.to_string())
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 15);
        assert_eq!(parse_date_text("2026-01-15"), expected);
        assert_eq!(parse_date_text("15.01.2026"), expected);
        assert_eq!(parse_date_text("15.01.26"), expected);
        assert_eq!(parse_date_text("2026-01-15 08:30:00"), expected);
        assert_eq!(parse_date_text("15.01.26 08:30"), expected);
        assert_eq!(parse_date_text("15.01.26 08:30:15"), expected);
        assert_eq!(parse_date_text("15.01.2026 08:30"), expected);
        assert_eq!(parse_date_text("15/01/26 08:30"), expected);
        assert_eq!(parse_date_text("15/01/2026"), expected);
        assert_eq!(parse_date_text("15/01/26"), expected);
        assert_eq!(parse_date_text("2026/01/15"), expected);
        assert_eq!(parse_date_text("15-Jan-2026"), expected);
    }

    #[test]
    fn test_unparseable_dates_are_absent() {
        assert_eq!(parse_date_text(""), None);
        assert_eq!(parse_date_text("geplant"), None);
        assert_eq!(parse_date_text("31.02.2026"), None);
        assert_eq!(parse_procedure_date(&RawValue::Number(46023.0)), None);
        assert_eq!(parse_procedure_date(&RawValue::Missing), None);
    }

    #[test]
    fn test_date_cells_pass_through() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).expect("date");
        assert_eq!(parse_procedure_date(&RawValue::Date(date)), Some(date));
        let dt = date.and_hms_opt(23, 59, 0).expect("datetime");
        assert_eq!(parse_procedure_date(&RawValue::DateTime(dt)), Some(date));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&RawValue::Number(3.0)), Some(3.0));
        assert_eq!(parse_number(&text(" 4.5 ")), Some(4.5));
        assert_eq!(parse_number(&text("4,5")), Some(4.5));
        assert_eq!(parse_number(&text("1,234.5")), None);
        assert_eq!(parse_number(&text("k.A.")), None);
        assert_eq!(parse_number(&text("NaN")), None);
        assert_eq!(parse_number(&RawValue::Missing), None);
    }
}
