use time::{Date, Month};

use crate::error::FaersError;

/// Parses a compact `YYYYMMDD` report date into a calendar date.
pub(crate) fn parse_compact_date(value: &str) -> Result<Date, FaersError> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FaersError::InvalidArgument(format!(
            "Report date '{value}' is not in YYYYMMDD format"
        )));
    }

    let year: i32 = value[0..4]
        .parse()
        .map_err(|_| FaersError::InvalidArgument(format!("Invalid year in '{value}'")))?;
    if year < 1 {
        return Err(FaersError::InvalidArgument(format!(
            "Invalid year {year} in '{value}'"
        )));
    }
    let month: u8 = value[4..6]
        .parse()
        .map_err(|_| FaersError::InvalidArgument(format!("Invalid month in '{value}'")))?;
    let day: u8 = value[6..8]
        .parse()
        .map_err(|_| FaersError::InvalidArgument(format!("Invalid day in '{value}'")))?;

    let month = Month::try_from(month).map_err(|_| {
        FaersError::InvalidArgument(format!(
            "Invalid month {month} in '{value}' (must be 01-12)"
        ))
    })?;
    Date::from_calendar_date(year, month, day).map_err(|_| {
        FaersError::InvalidArgument(format!("Invalid day {day} for month {month} in '{value}'"))
    })
}

/// `YYYY-MM` bucket key for a date.
pub(crate) fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

#[cfg(test)]
mod tests {
    use super::{month_key, parse_compact_date};

    #[test]
    fn parses_compact_date_into_month_key() {
        let date = parse_compact_date("20230115").expect("valid date");
        assert_eq!(month_key(date), "2023-01");
    }

    #[test]
    fn accepts_leap_day() {
        let date = parse_compact_date("20240229").expect("leap day");
        assert_eq!(month_key(date), "2024-02");
    }

    #[test]
    fn rejects_day_outside_month() {
        let err = parse_compact_date("20230229").expect_err("not a leap year");
        assert!(err.to_string().contains("Invalid day 29"));
    }

    #[test]
    fn rejects_invalid_month() {
        let err = parse_compact_date("20231315").expect_err("month should fail");
        assert!(err.to_string().contains("Invalid month"));
    }

    #[test]
    fn rejects_non_digit_characters() {
        assert!(parse_compact_date("2023-1-5").is_err());
        assert!(parse_compact_date("2023011").is_err());
    }

    #[test]
    fn rejects_space_padded_fields() {
        assert!(parse_compact_date("202311 5").is_err());
        assert!(parse_compact_date("2023 115").is_err());
    }

    #[test]
    fn rejects_year_zero() {
        assert!(parse_compact_date("00000115").is_err());
    }
}
