//! Start menu state.

use crate::error::{StormError, StormResult};
use crate::geo::Basin;
use chrono::{Datelike, NaiveDate};

/// First season with usable best-track data.
pub const FIRST_YEAR: i32 = 1951;

/// Parses the start date typed into the menu.
///
/// Month and day may be left blank and default to 1. The year must lie
/// between [`FIRST_YEAR`] and the year of `today`.
pub fn parse_start_date(
    year: &str,
    month: &str,
    day: &str,
    today: NaiveDate,
) -> StormResult<NaiveDate> {
    fn field(text: &str, name: &str, default: u32) -> StormResult<u32> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(default);
        }
        text.parse()
            .map_err(|_| StormError::InvalidDate(format!("{} must be a number, got {:?}", name, text)))
    }

    let year_text = year.trim();
    let year: i32 = year_text
        .parse()
        .map_err(|_| StormError::InvalidDate(format!("year must be a number, got {:?}", year_text)))?;
    let month = field(month, "month", 1)?;
    let day = field(day, "day", 1)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        StormError::InvalidDate(format!("{}-{:02}-{:02} is not a calendar date", year, month, day))
    })?;

    if date.year() < FIRST_YEAR {
        return Err(StormError::InvalidDate(format!(
            "date must be in {} or later",
            FIRST_YEAR
        )));
    }
    if date.year() > today.year() {
        return Err(StormError::InvalidDate(format!(
            "date cannot be after {}",
            today.year()
        )));
    }
    Ok(date)
}

/// Inputs on the start menu.
#[derive(Default)]
pub struct MenuState {
    pub year: String,
    pub month: String,
    pub day: String,

    /// Basin whose map and tracks will be used
    pub basin: Basin,

    /// Last validation error, shown under the inputs
    pub error: Option<String>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the inputs, recording the error for display on failure.
    pub fn start_date(&mut self, today: NaiveDate) -> Option<NaiveDate> {
        match parse_start_date(&self.year, &self.month, &self.day, today) {
            Ok(date) => {
                self.error = None;
                Some(date)
            }
            Err(e) => {
                log::warn!("Rejected start date: {}", e);
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn month_and_day_default_to_one() {
        let date = parse_start_date("2019", "", " ", today()).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());

        let date = parse_start_date(" 2019 ", "10", "5", today()).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 10, 5).unwrap());
    }

    #[test]
    fn year_range_is_enforced() {
        assert!(parse_start_date("1951", "", "", today()).is_ok());
        assert!(matches!(
            parse_start_date("1950", "12", "31", today()),
            Err(StormError::InvalidDate(_))
        ));
        assert!(parse_start_date("2024", "12", "31", today()).is_ok());
        assert!(parse_start_date("2025", "", "", today()).is_err());
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert!(parse_start_date("", "", "", today()).is_err());
        assert!(parse_start_date("20x9", "", "", today()).is_err());
        assert!(parse_start_date("2019", "13", "", today()).is_err());
        assert!(parse_start_date("2019", "2", "30", today()).is_err());
        assert!(parse_start_date("2019", "-1", "", today()).is_err());
    }

    #[test]
    fn menu_keeps_the_last_error() {
        let mut menu = MenuState::new();
        assert_eq!(menu.basin, Basin::WesternPacific);

        menu.year = "1900".to_string();
        assert!(menu.start_date(today()).is_none());
        assert!(menu.error.as_deref().is_some_and(|e| e.contains("1951")));

        menu.year = "2001".to_string();
        menu.month = "9".to_string();
        assert_eq!(
            menu.start_date(today()),
            NaiveDate::from_ymd_opt(2001, 9, 1)
        );
        assert!(menu.error.is_none());
    }
}
