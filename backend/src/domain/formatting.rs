//! Locale-specific text for the booking widget.
//!
//! The calendar and wizard logic never build user-facing strings themselves;
//! they go through a [`BookingFormatter`] so the core stays locale agnostic.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use shared::{CalendarCursor, GuestDetails, GuestValidationError, SlotTime};

/// Formatting capability consumed by the wizard and the renderers
pub trait BookingFormatter: Send + Sync {
    /// Calendar header, e.g. "December 2025"
    fn month_year(&self, cursor: CalendarCursor) -> String;

    /// Monday-first weekday column headers
    fn weekday_headers(&self) -> [&'static str; 7];

    /// Full date with weekday for the booking summary
    fn long_date(&self, date: NaiveDate) -> String;

    /// Compact numeric date for the confirmation message
    fn short_date(&self, date: NaiveDate) -> String;

    fn duration(&self, minutes: u32) -> String;

    fn validation_message(&self, error: &GuestValidationError) -> String;

    /// Shown in the slot panel before a date is picked
    fn no_date_selected(&self) -> String;

    /// Shown in the slot panel when the date has no free slots
    fn no_slots_available(&self) -> String;

    /// Shown in the date label before a date is picked
    fn date_placeholder(&self) -> String;

    fn confirmation_message(&self, guest: &GuestDetails, date: NaiveDate, time: SlotTime, duration_minutes: u32) -> String;

    /// Clock line refreshed once a minute
    fn clock_display(&self, now: NaiveTime) -> String {
        format!("Central European Time ({})", now.format("%H:%M"))
    }
}

/// Supported widget locales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Hu,
    En,
}

impl Locale {
    pub fn formatter(&self) -> Box<dyn BookingFormatter> {
        match self {
            Locale::Hu => Box::new(HungarianFormatter),
            Locale::En => Box::new(EnglishFormatter),
        }
    }
}

/// Hungarian texts, matching the hu-HU browser locale output
#[derive(Debug, Clone, Copy, Default)]
pub struct HungarianFormatter;

impl HungarianFormatter {
    const MONTH_NAMES: [&'static str; 12] = [
        "Január", "Február", "Március", "Április", "Május", "Június",
        "Július", "Augusztus", "Szeptember", "Október", "November", "December",
    ];

    fn weekday_name(weekday: Weekday) -> &'static str {
        match weekday {
            Weekday::Mon => "hétfő",
            Weekday::Tue => "kedd",
            Weekday::Wed => "szerda",
            Weekday::Thu => "csütörtök",
            Weekday::Fri => "péntek",
            Weekday::Sat => "szombat",
            Weekday::Sun => "vasárnap",
        }
    }

    fn month_name(month: u32) -> &'static str {
        month
            .checked_sub(1)
            .and_then(|index| Self::MONTH_NAMES.get(index as usize))
            .copied()
            .unwrap_or("Ismeretlen")
    }
}

impl BookingFormatter for HungarianFormatter {
    fn month_year(&self, cursor: CalendarCursor) -> String {
        format!("{} {}", Self::month_name(cursor.month), cursor.year)
    }

    fn weekday_headers(&self) -> [&'static str; 7] {
        ["H", "K", "Sz", "Cs", "P", "Sz", "V"]
    }

    fn long_date(&self, date: NaiveDate) -> String {
        // Month names are lowercase inside a date
        format!(
            "{}. {} {}., {}",
            date.year(),
            Self::month_name(date.month()).to_lowercase(),
            date.day(),
            Self::weekday_name(date.weekday())
        )
    }

    fn short_date(&self, date: NaiveDate) -> String {
        format!("{}. {:02}. {:02}.", date.year(), date.month(), date.day())
    }

    fn duration(&self, minutes: u32) -> String {
        format!("{} perc", minutes)
    }

    fn validation_message(&self, error: &GuestValidationError) -> String {
        match error {
            GuestValidationError::EmptyName => "Kérjük, add meg a neved!",
            GuestValidationError::EmptyEmail => "Kérjük, add meg az email címed!",
            GuestValidationError::InvalidEmail => "Kérjük, adj meg egy érvényes email címet!",
        }
        .to_string()
    }

    fn no_date_selected(&self) -> String {
        "Kérjük, válassz egy dátumot a naptárból".to_string()
    }

    fn no_slots_available(&self) -> String {
        "Nincs elérhető időpont ezen a napon".to_string()
    }

    fn date_placeholder(&self) -> String {
        "Válassz egy dátumot".to_string()
    }

    fn confirmation_message(&self, guest: &GuestDetails, date: NaiveDate, time: SlotTime, duration_minutes: u32) -> String {
        format!(
            "Foglalás megerősítve!\n\nNév: {}\nEmail: {}\nDátum: {}\nIdőpont: {}\nIdőtartam: {}",
            guest.name,
            guest.email,
            self.short_date(date),
            time,
            self.duration(duration_minutes)
        )
    }
}

/// English texts
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishFormatter;

impl EnglishFormatter {
    fn month_name(month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    fn weekday_name(weekday: Weekday) -> &'static str {
        match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

impl BookingFormatter for EnglishFormatter {
    fn month_year(&self, cursor: CalendarCursor) -> String {
        format!("{} {}", Self::month_name(cursor.month), cursor.year)
    }

    fn weekday_headers(&self) -> [&'static str; 7] {
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
    }

    fn long_date(&self, date: NaiveDate) -> String {
        format!(
            "{}, {} {}, {}",
            Self::weekday_name(date.weekday()),
            Self::month_name(date.month()),
            date.day(),
            date.year()
        )
    }

    fn short_date(&self, date: NaiveDate) -> String {
        format!("{:02}/{:02}/{}", date.month(), date.day(), date.year())
    }

    fn duration(&self, minutes: u32) -> String {
        format!("{} min", minutes)
    }

    fn validation_message(&self, error: &GuestValidationError) -> String {
        match error {
            GuestValidationError::EmptyName => "Please enter your name!",
            GuestValidationError::EmptyEmail => "Please enter your email address!",
            GuestValidationError::InvalidEmail => "Please enter a valid email address!",
        }
        .to_string()
    }

    fn no_date_selected(&self) -> String {
        "Please pick a date from the calendar".to_string()
    }

    fn no_slots_available(&self) -> String {
        "No times available on this day".to_string()
    }

    fn date_placeholder(&self) -> String {
        "Pick a date".to_string()
    }

    fn confirmation_message(&self, guest: &GuestDetails, date: NaiveDate, time: SlotTime, duration_minutes: u32) -> String {
        format!(
            "Booking confirmed!\n\nName: {}\nEmail: {}\nDate: {}\nTime: {}\nDuration: {}",
            guest.name,
            guest.email,
            self.short_date(date),
            time,
            self.duration(duration_minutes)
        )
    }
}
