use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Default appointment length in minutes
pub const DEFAULT_DURATION_MINUTES: u32 = 15;

/// Number of fixed two-hour interval tabs offered in tabbed slot mode
pub const INTERVAL_TAB_COUNT: u8 = 6;

/// First hour covered by the interval tabs (08:00)
pub const INTERVAL_TABS_START_HOUR: u8 = 8;

/// The year and month currently displayed by the calendar (month is 1-based)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CalendarCursor {
    pub year: i32,
    pub month: u32,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for CalendarCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Derived view of a single day of the displayed month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayCell {
    /// Day of month (1-based)
    pub day: u32,
    pub date: NaiveDate,
    pub weekday: Weekday,
    /// Strictly before today
    pub is_past: bool,
    /// Allowed by the active day rule
    pub is_pickable: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    /// A day can be clicked only when it is not in the past and the day rule allows it
    pub fn is_clickable(&self) -> bool {
        !self.is_past && self.is_pickable
    }
}

/// One cell of the Monday-first month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "cell")]
pub enum GridCell {
    /// Empty padding cell before the first day of the month
    Padding,
    /// Actual day within the month
    Day(DayCell),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(cell) => Some(cell),
            GridCell::Padding => None,
        }
    }
}

/// A calendar month laid out as a Monday-first grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Number of leading padding cells (0 = Monday, ..., 6 = Sunday)
    pub first_day_offset: u32,
    pub cells: Vec<GridCell>,
}

impl CalendarMonth {
    pub fn cursor(&self) -> CalendarCursor {
        CalendarCursor::new(self.year, self.month)
    }

    /// Iterate over the real day cells, skipping padding
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::as_day)
    }

    /// Look up a day cell by its day of month
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|cell| cell.day == day)
    }

    pub fn selected_day(&self) -> Option<&DayCell> {
        self.days().find(|cell| cell.is_selected)
    }
}

/// A wall-clock slot start time, written as "HH:MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime {
    hour: u8,
    minute: u8,
}

impl SlotTime {
    /// Build a slot time, returning None for out-of-range components
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn from_minutes(minutes_since_midnight: u32) -> Option<Self> {
        let hour = u8::try_from(minutes_since_midnight / 60).ok()?;
        let minute = (minutes_since_midnight % 60) as u8;
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Error returned when a string is not a valid "HH:MM" time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid slot time '{0}', expected HH:MM")]
pub struct ParseSlotTimeError(pub String);

impl FromStr for SlotTime {
    type Err = ParseSlotTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSlotTimeError(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        SlotTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = ParseSlotTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

/// A bookable slot as shown in the slot list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: SlotTime,
    pub is_selected: bool,
}

/// One of the six fixed two-hour bands between 08:00 and 20:00 (index 0..6)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "u8", into = "u8")]
pub struct IntervalTab(u8);

impl IntervalTab {
    pub fn new(index: u8) -> Option<Self> {
        (index < INTERVAL_TAB_COUNT).then_some(Self(index))
    }

    pub fn all() -> impl Iterator<Item = IntervalTab> {
        (0..INTERVAL_TAB_COUNT).map(IntervalTab)
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn start_hour(&self) -> u8 {
        INTERVAL_TABS_START_HOUR + self.0 * 2
    }

    pub fn end_hour(&self) -> u8 {
        self.start_hour() + 2
    }

    /// Whether a slot start time falls within this band
    pub fn contains(&self, time: SlotTime) -> bool {
        time.hour() >= self.start_hour() && time.hour() < self.end_hour()
    }
}

impl fmt::Display for IntervalTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00 - {:02}:00", self.start_hour(), self.end_hour())
    }
}

impl TryFrom<u8> for IntervalTab {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        IntervalTab::new(value)
            .ok_or_else(|| format!("Invalid interval tab {}. Must be below {}", value, INTERVAL_TAB_COUNT))
    }
}

impl From<IntervalTab> for u8 {
    fn from(value: IntervalTab) -> Self {
        value.0
    }
}

/// Steps of the booking wizard, in flow order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    DateSelection,
    TimeSelection,
    BookingDetails,
}

impl WizardStep {
    /// 1-based step number as shown in the progress bar
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::DateSelection => 1,
            WizardStep::TimeSelection => 2,
            WizardStep::BookingDetails => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::DateSelection),
            2 => Some(WizardStep::TimeSelection),
            3 => Some(WizardStep::BookingDetails),
            _ => None,
        }
    }
}

/// What the visitor has picked so far
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingSelection {
    pub selected_date: Option<NaiveDate>,
    /// Only meaningful for `selected_date`; cleared whenever the date changes
    pub selected_time: Option<SlotTime>,
    pub duration_minutes: u32,
}

impl BookingSelection {
    pub fn new(duration_minutes: u32) -> Self {
        Self {
            selected_date: None,
            selected_time: None,
            duration_minutes,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.selected_date.is_some() && self.selected_time.is_some()
    }
}

impl Default for BookingSelection {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MINUTES)
    }
}

/// Guest input submitted with the booking form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
}

impl GuestDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Copy with surrounding whitespace removed from both fields
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

/// Form field a validation error refers to (the one to focus)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GuestField {
    Name,
    Email,
}

/// Guest form validation failures, checked in order name, email presence, email format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
pub enum GuestValidationError {
    #[error("Guest name cannot be empty")]
    EmptyName,
    #[error("Guest email cannot be empty")]
    EmptyEmail,
    #[error("Guest email is not a valid address")]
    InvalidEmail,
}

impl GuestValidationError {
    pub fn field(&self) -> GuestField {
        match self {
            GuestValidationError::EmptyName => GuestField::Name,
            GuestValidationError::EmptyEmail | GuestValidationError::InvalidEmail => GuestField::Email,
        }
    }
}

/// Read-only summary shown on the booking details step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingSummary {
    pub formatted_date: String,
    pub time: SlotTime,
    pub formatted_duration: String,
}

/// Finalized booking handed back to the caller after a successful confirmation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub duration_minutes: u32,
    pub summary: BookingSummary,
    /// Locale-formatted confirmation text for display
    pub message: String,
}

/// State changes queued by the wizard for renderers to pick up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum WizardEvent {
    CursorMoved(CalendarCursor),
    DateSelected(NaiveDate),
    TimeSelected(SlotTime),
    /// The selected time was dropped while the date stayed
    TimeCleared,
    /// Both date and time were dropped
    SelectionCleared,
    StepChanged { from: WizardStep, to: WizardStep },
    DurationChanged(u32),
    IntervalTabChanged(IntervalTab),
    BookingConfirmed(Uuid),
}
