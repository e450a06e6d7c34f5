//! Calendar domain logic for the booking widget.
//!
//! This module owns the month grid: Monday-first padding, day counts, and the
//! past/pickable/today/selected flags of every day. The UI only paints the
//! cells it gets back; which days may be clicked is decided here.

use chrono::{Datelike, NaiveDate, Weekday};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::{CalendarCursor, CalendarMonth, DayCell, GridCell};

/// Errors raised by calendar arithmetic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),
    #[error("Year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
}

/// Which days of the week visitors may book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickableDayRule {
    /// Every day that is not in the past
    AnyDay,
    /// Only the listed weekdays
    Weekdays(Vec<Weekday>),
}

impl PickableDayRule {
    pub fn allows(&self, weekday: Weekday) -> bool {
        match self {
            PickableDayRule::AnyDay => true,
            PickableDayRule::Weekdays(days) => days.contains(&weekday),
        }
    }
}

impl Default for PickableDayRule {
    /// Monday and Wednesday only
    fn default() -> Self {
        PickableDayRule::Weekdays(vec![Weekday::Mon, Weekday::Wed])
    }
}

/// Calendar service that handles all grid and navigation arithmetic
#[derive(Debug, Clone, Default)]
pub struct CalendarService {
    day_rule: PickableDayRule,
}

impl CalendarService {
    pub fn new(day_rule: PickableDayRule) -> Self {
        Self { day_rule }
    }

    /// Generate the Monday-first grid for a month.
    ///
    /// The grid holds `first_day_offset` padding cells followed by one cell per
    /// day. `today` is compared by date only, so everything before it is past.
    pub fn generate_calendar_month(
        &self,
        cursor: CalendarCursor,
        today: NaiveDate,
        selected_date: Option<NaiveDate>,
    ) -> Result<CalendarMonth, CalendarError> {
        let cursor = self.validate_cursor(cursor)?;
        let days_in_month = self.days_in_month(cursor.month, cursor.year);
        let first_day_offset = self.first_day_offset(cursor.month, cursor.year)?;

        info!("🗓️ Generating calendar for {} ({} days, offset {})", cursor, days_in_month, first_day_offset);

        let mut cells = Vec::with_capacity((first_day_offset + days_in_month) as usize);
        cells.extend((0..first_day_offset).map(|_| GridCell::Padding));

        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(cursor.year, cursor.month, day)
                .ok_or(CalendarError::YearOutOfRange(cursor.year))?;
            let cell = DayCell {
                day,
                date,
                weekday: date.weekday(),
                is_past: date < today,
                is_pickable: self.day_rule.allows(date.weekday()),
                is_today: date == today,
                is_selected: selected_date == Some(date),
            };
            debug!("🗓️ Day {} clickable={} today={} selected={}", day, cell.is_clickable(), cell.is_today, cell.is_selected);
            cells.push(GridCell::Day(cell));
        }

        Ok(CalendarMonth {
            year: cursor.year,
            month: cursor.month,
            first_day_offset,
            cells,
        })
    }

    /// Whether a date may be picked given today's date
    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today && self.day_rule.allows(date.weekday())
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            2 => if self.is_leap_year(year) { 29 } else { 28 },
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Leading padding for a Monday-first week (0 = Monday, ..., 6 = Sunday)
    pub fn first_day_offset(&self, month: u32, year: i32) -> Result<u32, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::YearOutOfRange(year))?;

        // Sunday-based weekday shifted so Sunday lands at the end of the week
        let weekday = first.weekday().num_days_from_sunday();
        Ok(if weekday == 0 { 6 } else { weekday - 1 })
    }

    pub fn validate_cursor(&self, cursor: CalendarCursor) -> Result<CalendarCursor, CalendarError> {
        if !(1..=12).contains(&cursor.month) {
            return Err(CalendarError::InvalidMonth(cursor.month));
        }
        Ok(cursor)
    }

    /// Cursor pointing at the month that contains `date`
    pub fn cursor_for(&self, date: NaiveDate) -> CalendarCursor {
        CalendarCursor::new(date.year(), date.month())
    }

    /// Navigate to the previous month
    pub fn previous_month(&self, cursor: CalendarCursor) -> CalendarCursor {
        if cursor.month <= 1 {
            CalendarCursor::new(cursor.year - 1, 12)
        } else {
            CalendarCursor::new(cursor.year, cursor.month - 1)
        }
    }

    /// Navigate to the next month
    pub fn next_month(&self, cursor: CalendarCursor) -> CalendarCursor {
        if cursor.month >= 12 {
            CalendarCursor::new(cursor.year + 1, 1)
        } else {
            CalendarCursor::new(cursor.year, cursor.month + 1)
        }
    }
}
