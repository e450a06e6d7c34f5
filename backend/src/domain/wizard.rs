//! # Booking Wizard
//!
//! The wizard owns the whole booking session: calendar cursor, current step,
//! selection, and the derived view data (month grid and slot list). Every
//! transition checks its preconditions first and leaves the state untouched
//! when it is rejected.
//!
//! ## Steps
//!
//! `DateSelection -> TimeSelection -> BookingDetails`, with backward moves to
//! any earlier step:
//!
//! - back to `DateSelection` clears the date and the time
//! - back to `TimeSelection` keeps both, so the chosen slot stays highlighted
//!
//! Renderers read the derived data through the accessors and call
//! [`BookingWizard::drain_events`] to learn what changed.

use chrono::NaiveDate;
use log::{debug, info, warn};
use shared::{
    BookingConfirmation, BookingSelection, BookingSummary, CalendarCursor, CalendarMonth, GuestDetails,
    GuestValidationError, IntervalTab, ParseSlotTimeError, SlotTime, TimeSlot, WizardEvent, WizardStep,
    DEFAULT_DURATION_MINUTES,
};
use uuid::Uuid;

use super::availability::SlotAvailability;
use super::calendar::{CalendarError, CalendarService, PickableDayRule};
use super::clock::Clock;
use super::formatting::BookingFormatter;
use super::guest_form::GuestFormService;
use super::time_slots::{BusinessHours, SlotMode, SlotWindow, TimeSlotService, DEFAULT_SLOT_STEP_MINUTES};

/// Reasons a wizard transition was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Date {0} cannot be selected")]
    DateNotSelectable(NaiveDate),
    #[error("No date has been selected")]
    NoDateSelected,
    #[error("No time has been selected")]
    NoTimeSelected,
    #[error("Slot {0} is not offered for the selected date")]
    SlotNotOffered(SlotTime),
    #[error(transparent)]
    InvalidSlotTime(#[from] ParseSlotTimeError),
    #[error("Cannot move back from {from:?} to the later step {to:?}")]
    CannotGoForward { from: WizardStep, to: WizardStep },
    #[error("A duration of {0} minutes is not offered")]
    DurationNotOffered(u32),
    #[error("Invalid interval tab {0}")]
    InvalidIntervalTab(u8),
    #[error("Interval tabs are not enabled")]
    IntervalTabsDisabled,
    #[error("Booking is not ready to confirm")]
    NotReadyToConfirm,
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// Errors returned by [`BookingWizard::confirm_booking`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Validation(#[from] GuestValidationError),
}

/// Static wizard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSettings {
    pub day_rule: PickableDayRule,
    pub slot_mode: SlotMode,
    pub business_hours: BusinessHours,
    pub slot_step_minutes: u32,
    pub default_duration_minutes: u32,
    pub duration_presets: Vec<u32>,
    /// Month shown first; defaults to the month containing today
    pub initial_cursor: Option<CalendarCursor>,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            day_rule: PickableDayRule::default(),
            slot_mode: SlotMode::default(),
            business_hours: BusinessHours::default(),
            slot_step_minutes: DEFAULT_SLOT_STEP_MINUTES,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            duration_presets: vec![15, 30, 45, 60],
            initial_cursor: None,
        }
    }
}

/// Controller for one booking session
pub struct BookingWizard {
    calendar: CalendarService,
    slots: TimeSlotService,
    guest_form: GuestFormService,
    availability: Box<dyn SlotAvailability>,
    formatter: Box<dyn BookingFormatter>,
    clock: Box<dyn Clock>,

    slot_mode: SlotMode,
    business_hours: BusinessHours,
    duration_presets: Vec<u32>,

    cursor: CalendarCursor,
    step: WizardStep,
    selection: BookingSelection,
    active_tab: IntervalTab,

    month: CalendarMonth,
    available_slots: Vec<SlotTime>,
    events: Vec<WizardEvent>,
}

impl BookingWizard {
    pub fn new(
        settings: WizardSettings,
        availability: Box<dyn SlotAvailability>,
        formatter: Box<dyn BookingFormatter>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CalendarError> {
        let calendar = CalendarService::new(settings.day_rule);
        let today = clock.today();
        let cursor = calendar.validate_cursor(settings.initial_cursor.unwrap_or_else(|| calendar.cursor_for(today)))?;
        let month = calendar.generate_calendar_month(cursor, today, None)?;

        info!("🧭 Booking wizard started at {} (today {})", cursor, today);

        Ok(Self {
            calendar,
            slots: TimeSlotService::new(settings.slot_step_minutes),
            guest_form: GuestFormService::new(),
            availability,
            formatter,
            clock,
            slot_mode: settings.slot_mode,
            business_hours: settings.business_hours,
            duration_presets: settings.duration_presets,
            cursor,
            step: WizardStep::DateSelection,
            selection: BookingSelection::new(settings.default_duration_minutes),
            active_tab: IntervalTab::default(),
            month,
            available_slots: Vec::new(),
            events: Vec::new(),
        })
    }

    // ----- read side -----

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn calendar_month(&self) -> &CalendarMonth {
        &self.month
    }

    pub fn available_slots(&self) -> &[SlotTime] {
        &self.available_slots
    }

    /// Slot list with the selection flag set, for rendering
    pub fn time_slots(&self) -> Vec<TimeSlot> {
        self.slots.to_time_slots(&self.available_slots, self.selection.selected_time)
    }

    pub fn slot_mode(&self) -> SlotMode {
        self.slot_mode
    }

    pub fn active_tab(&self) -> IntervalTab {
        self.active_tab
    }

    pub fn duration_presets(&self) -> &[u32] {
        &self.duration_presets
    }

    pub fn formatter(&self) -> &dyn BookingFormatter {
        self.formatter.as_ref()
    }

    pub fn month_title(&self) -> String {
        self.formatter.month_year(self.cursor)
    }

    /// Label for the selected date, or the placeholder when nothing is picked
    pub fn selected_date_label(&self) -> String {
        match self.selection.selected_date {
            Some(date) => self.formatter.long_date(date),
            None => self.formatter.date_placeholder(),
        }
    }

    /// Message to show instead of the slot list, if any
    pub fn slot_panel_message(&self) -> Option<String> {
        if self.selection.selected_date.is_none() {
            Some(self.formatter.no_date_selected())
        } else if self.available_slots.is_empty() {
            Some(self.formatter.no_slots_available())
        } else {
            None
        }
    }

    /// Read-only summary, present only on the booking details step
    pub fn summary(&self) -> Option<BookingSummary> {
        if self.step != WizardStep::BookingDetails {
            return None;
        }
        let date = self.selection.selected_date?;
        let time = self.selection.selected_time?;
        Some(BookingSummary {
            formatted_date: self.formatter.long_date(date),
            time,
            formatted_duration: self.formatter.duration(self.selection.duration_minutes),
        })
    }

    pub fn clock_display(&self) -> String {
        self.formatter.clock_display(self.clock.now().time())
    }

    /// User-facing text for a guest form error
    pub fn validation_message(&self, error: &GuestValidationError) -> String {
        self.formatter.validation_message(error)
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.events)
    }

    // ----- navigation -----

    pub fn next_month(&mut self) -> Result<CalendarCursor, CalendarError> {
        self.move_cursor(self.calendar.next_month(self.cursor))
    }

    pub fn previous_month(&mut self) -> Result<CalendarCursor, CalendarError> {
        self.move_cursor(self.calendar.previous_month(self.cursor))
    }

    fn move_cursor(&mut self, cursor: CalendarCursor) -> Result<CalendarCursor, CalendarError> {
        self.month = self.build_month(cursor)?;
        self.cursor = cursor;
        self.events.push(WizardEvent::CursorMoved(cursor));
        info!("📅 Navigated to {}", cursor);
        Ok(cursor)
    }

    /// Re-derive the grid and slot list, e.g. after the day rolled over
    ///
    /// A selected date that is no longer bookable (it became the past at
    /// midnight) is dropped and the wizard returns to date selection.
    pub fn refresh(&mut self) -> Result<(), CalendarError> {
        if let Some(date) = self.selection.selected_date {
            if !self.calendar.is_selectable(date, self.clock.today()) {
                info!("🕛 Selected date {} is no longer bookable, clearing selection", date);
                self.clear_selection();
                self.set_step(WizardStep::DateSelection);
            }
        }
        self.month = self.build_month(self.cursor)?;
        if let Some(date) = self.selection.selected_date {
            self.available_slots = self.generate_slots(date);
        }
        Ok(())
    }

    // ----- transitions -----

    /// Pick a day. Always clears the selected time and moves to time selection.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<WizardStep, TransitionError> {
        let today = self.clock.today();
        if !self.calendar.is_selectable(date, today) {
            warn!("🚫 Date {} is not selectable (today {})", date, today);
            return Err(TransitionError::DateNotSelectable(date));
        }

        // Jump to the date's month so the selection is visible
        let cursor = self.calendar.cursor_for(date);
        let month = self.calendar.generate_calendar_month(cursor, today, Some(date))?;

        let had_time = self.selection.selected_time.take().is_some();
        self.selection.selected_date = Some(date);
        if cursor != self.cursor {
            self.cursor = cursor;
            self.events.push(WizardEvent::CursorMoved(cursor));
        }
        self.month = month;
        self.available_slots = self.generate_slots(date);

        self.events.push(WizardEvent::DateSelected(date));
        if had_time {
            self.events.push(WizardEvent::TimeCleared);
        }
        info!("📅 Selected date {} ({} slots)", date, self.available_slots.len());

        self.set_step(WizardStep::TimeSelection);
        Ok(self.step)
    }

    /// Pick one of the currently offered slots and move to the booking details
    pub fn select_time(&mut self, time: SlotTime) -> Result<WizardStep, TransitionError> {
        if self.selection.selected_date.is_none() {
            return Err(TransitionError::NoDateSelected);
        }
        if !self.available_slots.contains(&time) {
            warn!("🚫 Slot {} is not offered", time);
            return Err(TransitionError::SlotNotOffered(time));
        }

        self.selection.selected_time = Some(time);
        self.events.push(WizardEvent::TimeSelected(time));
        info!("🕒 Selected time {}", time);

        self.set_step(WizardStep::BookingDetails);
        Ok(self.step)
    }

    /// Parse an "HH:MM" string and select it
    pub fn select_time_str(&mut self, time: &str) -> Result<WizardStep, TransitionError> {
        let time: SlotTime = time.parse()?;
        self.select_time(time)
    }

    /// Return to an earlier (or the current) step
    pub fn go_back(&mut self, target: WizardStep) -> Result<WizardStep, TransitionError> {
        if target > self.step {
            return Err(TransitionError::CannotGoForward { from: self.step, to: target });
        }

        if target == WizardStep::DateSelection {
            self.clear_selection();
            self.month = self.build_month(self.cursor)?;
        }

        self.set_step(target);
        Ok(self.step)
    }

    /// Generic step navigation: forward moves need their preconditions, backward moves go through `go_back`
    pub fn go_to_step(&mut self, target: WizardStep) -> Result<WizardStep, TransitionError> {
        if target <= self.step {
            return self.go_back(target);
        }

        if self.selection.selected_date.is_none() {
            debug!("Ignoring move to {:?}: no date selected", target);
            return Err(TransitionError::NoDateSelected);
        }
        if target == WizardStep::BookingDetails && !self.selection.is_complete() {
            debug!("Ignoring move to {:?}: no time selected", target);
            return Err(TransitionError::NoTimeSelected);
        }

        self.set_step(target);
        Ok(self.step)
    }

    /// Change the appointment length to one of the presets
    pub fn select_duration(&mut self, minutes: u32) -> Result<u32, TransitionError> {
        if !self.duration_presets.contains(&minutes) {
            return Err(TransitionError::DurationNotOffered(minutes));
        }
        if self.selection.duration_minutes != minutes {
            self.selection.duration_minutes = minutes;
            self.events.push(WizardEvent::DurationChanged(minutes));
            info!("⏱️ Duration set to {} minutes", minutes);
        }
        Ok(minutes)
    }

    /// Switch the visible two-hour band (tabbed mode only).
    ///
    /// A selected time outside the new band is dropped, and the wizard
    /// falls back to time selection if it was showing the details.
    pub fn select_interval_tab(&mut self, index: u8) -> Result<IntervalTab, TransitionError> {
        if self.slot_mode != SlotMode::Tabbed {
            return Err(TransitionError::IntervalTabsDisabled);
        }
        let tab = IntervalTab::new(index).ok_or(TransitionError::InvalidIntervalTab(index))?;
        if tab == self.active_tab {
            return Ok(tab);
        }

        self.active_tab = tab;
        self.events.push(WizardEvent::IntervalTabChanged(tab));
        info!("🗂️ Interval tab set to {}", tab);

        if let Some(date) = self.selection.selected_date {
            self.available_slots = self.generate_slots(date);
        }
        if let Some(time) = self.selection.selected_time {
            if !tab.contains(time) {
                self.selection.selected_time = None;
                self.events.push(WizardEvent::TimeCleared);
                if self.step == WizardStep::BookingDetails {
                    self.set_step(WizardStep::TimeSelection);
                }
            }
        }
        Ok(tab)
    }

    /// Validate the guest details and assemble the finalized booking.
    ///
    /// Nothing is submitted anywhere; the caller decides what to do with the
    /// confirmation. A validation failure leaves the wizard untouched.
    pub fn confirm_booking(&mut self, guest: &GuestDetails) -> Result<BookingConfirmation, BookingError> {
        let (date, time) = match (self.step, self.selection.selected_date, self.selection.selected_time) {
            (WizardStep::BookingDetails, Some(date), Some(time)) => (date, time),
            _ => return Err(TransitionError::NotReadyToConfirm.into()),
        };
        if !self.calendar.is_selectable(date, self.clock.today()) {
            warn!("🚫 Refusing to confirm {}: the date is no longer bookable", date);
            return Err(TransitionError::DateNotSelectable(date).into());
        }
        let summary = self.summary().ok_or(TransitionError::NotReadyToConfirm)?;
        let guest = self.guest_form.validate(guest)?;

        let duration_minutes = self.selection.duration_minutes;
        let confirmation = BookingConfirmation {
            id: Uuid::new_v4(),
            message: self.formatter.confirmation_message(&guest, date, time, duration_minutes),
            guest_name: guest.name,
            guest_email: guest.email,
            date,
            time,
            duration_minutes,
            summary,
        };

        self.events.push(WizardEvent::BookingConfirmed(confirmation.id));
        info!("✅ Booking {} confirmed for {} {}", confirmation.id, date, time);
        Ok(confirmation)
    }

    // ----- helpers -----

    fn set_step(&mut self, to: WizardStep) {
        let from = self.step;
        if from != to {
            self.step = to;
            self.events.push(WizardEvent::StepChanged { from, to });
            debug!("🧭 Step {:?} -> {:?}", from, to);
        }
    }

    fn clear_selection(&mut self) {
        let had_selection = self.selection.selected_date.is_some() || self.selection.selected_time.is_some();
        self.selection.selected_date = None;
        self.selection.selected_time = None;
        self.available_slots.clear();
        if had_selection {
            self.events.push(WizardEvent::SelectionCleared);
        }
    }

    fn build_month(&self, cursor: CalendarCursor) -> Result<CalendarMonth, CalendarError> {
        self.calendar
            .generate_calendar_month(cursor, self.clock.today(), self.selection.selected_date)
    }

    fn slot_window(&self) -> SlotWindow {
        match self.slot_mode {
            SlotMode::BusinessHours => SlotWindow::BusinessHours(self.business_hours),
            SlotMode::Tabbed => SlotWindow::Tab(self.active_tab),
        }
    }

    fn generate_slots(&self, date: NaiveDate) -> Vec<SlotTime> {
        self.slots
            .generate_time_slots(date, self.slot_window(), self.availability.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::{AlwaysAvailable, BookedSlot, BookedSlots};
    use crate::domain::clock::FixedClock;
    use crate::domain::formatting::HungarianFormatter;
    use chrono::NaiveDateTime;
    use std::sync::{Arc, Mutex};

    /// Test clock that can be moved forward while the wizard holds it
    #[derive(Clone)]
    struct SteppingClock(Arc<Mutex<NaiveDateTime>>);

    impl SteppingClock {
        fn new(now: NaiveDateTime) -> Self {
            Self(Arc::new(Mutex::new(now)))
        }

        fn set(&self, now: NaiveDateTime) {
            *self.0.lock().unwrap() = now;
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().unwrap()
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn time(s: &str) -> SlotTime {
        s.parse().unwrap()
    }

    fn wizard_with(settings: WizardSettings, availability: Box<dyn SlotAvailability>) -> BookingWizard {
        BookingWizard::new(
            settings,
            availability,
            Box::new(HungarianFormatter),
            Box::new(FixedClock::on(date(2025, 12, 10))),
        )
        .unwrap()
    }

    fn wizard() -> BookingWizard {
        wizard_with(WizardSettings::default(), Box::new(AlwaysAvailable))
    }

    #[test]
    fn test_starts_on_todays_month() {
        let wizard = wizard();
        assert_eq!(wizard.step(), WizardStep::DateSelection);
        assert_eq!(wizard.cursor(), CalendarCursor::new(2025, 12));
        assert_eq!(wizard.selection(), &BookingSelection::default());
        assert_eq!(wizard.month_title(), "December 2025");
        assert_eq!(wizard.selected_date_label(), "Válassz egy dátumot");
        assert_eq!(wizard.slot_panel_message().as_deref(), Some("Kérjük, válassz egy dátumot a naptárból"));
    }

    #[test]
    fn test_initial_cursor_from_settings() {
        let settings = WizardSettings {
            initial_cursor: Some(CalendarCursor::new(2026, 2)),
            ..WizardSettings::default()
        };
        let wizard = wizard_with(settings, Box::new(AlwaysAvailable));
        assert_eq!(wizard.calendar_month().month, 2);
        assert_eq!(wizard.calendar_month().year, 2026);
    }

    #[test]
    fn test_invalid_initial_cursor_is_rejected() {
        let settings = WizardSettings {
            initial_cursor: Some(CalendarCursor::new(2026, 13)),
            ..WizardSettings::default()
        };
        let result = BookingWizard::new(
            settings,
            Box::new(AlwaysAvailable),
            Box::new(HungarianFormatter),
            Box::new(FixedClock::on(date(2025, 12, 10))),
        );
        assert!(matches!(result, Err(CalendarError::InvalidMonth(13))));
    }

    #[test]
    fn test_select_date_moves_to_time_selection() {
        let mut wizard = wizard();
        assert_eq!(wizard.select_date(date(2025, 12, 15)), Ok(WizardStep::TimeSelection));

        assert_eq!(wizard.selection().selected_date, Some(date(2025, 12, 15)));
        assert_eq!(wizard.calendar_month().selected_day().map(|c| c.day), Some(15));
        assert_eq!(wizard.available_slots().first(), Some(&time("09:00")));
        assert_eq!(wizard.available_slots().len(), 32);
        assert!(wizard.slot_panel_message().is_none());
    }

    #[test]
    fn test_select_date_clears_time() {
        let mut wizard = wizard();
        wizard.select_date(date(2025, 12, 15)).unwrap();
        wizard.select_time(time("10:30")).unwrap();
        assert_eq!(wizard.selection().selected_time, Some(time("10:30")));

        wizard.select_date(date(2025, 12, 17)).unwrap();
        assert_eq!(wizard.selection().selected_time, None);
        assert_eq!(wizard.step(), WizardStep::TimeSelection);

        // Re-selecting the same date clears too
        wizard.select_time(time("11:00")).unwrap();
        wizard.select_date(date(2025, 12, 17)).unwrap();
        assert_eq!(wizard.selection().selected_time, None);
    }

    #[test]
    fn test_unselectable_dates_are_rejected_without_change() {
        let mut wizard = wizard();

        // Past Monday
        assert_eq!(
            wizard.select_date(date(2025, 12, 8)),
            Err(TransitionError::DateNotSelectable(date(2025, 12, 8)))
        );
        // Future Tuesday
        assert!(wizard.select_date(date(2025, 12, 16)).is_err());

        assert_eq!(wizard.step(), WizardStep::DateSelection);
        assert_eq!(wizard.selection().selected_date, None);
        assert!(wizard.drain_events().is_empty());
    }

    #[test]
    fn test_select_date_in_other_month_moves_cursor() {
        let mut wizard = wizard();
        // 2026-01-05 is a Monday
        wizard.select_date(date(2026, 1, 5)).unwrap();
        assert_eq!(wizard.cursor(), CalendarCursor::new(2026, 1));
        assert!(wizard.drain_events().contains(&WizardEvent::CursorMoved(CalendarCursor::new(2026, 1))));
    }

    #[test]
    fn test_select_time_requires_date_and_offered_slot() {
        let mut wizard = wizard();
        assert_eq!(wizard.select_time(time("10:30")), Err(TransitionError::NoDateSelected));

        wizard.select_date(date(2025, 12, 15)).unwrap();
        assert_eq!(wizard.select_time(time("08:45")), Err(TransitionError::SlotNotOffered(time("08:45"))));
        assert_eq!(wizard.select_time(time("10:10")), Err(TransitionError::SlotNotOffered(time("10:10"))));
        assert!(matches!(wizard.select_time_str("10h30"), Err(TransitionError::InvalidSlotTime(_))));
        assert_eq!(wizard.step(), WizardStep::TimeSelection);

        assert_eq!(wizard.select_time_str("10:30"), Ok(WizardStep::BookingDetails));
    }

    #[test]
    fn test_booked_slot_cannot_be_selected() {
        let booked = BookedSlots::new([BookedSlot { date: date(2025, 12, 15), time: time("10:30") }]);
        let mut wizard = wizard_with(WizardSettings::default(), Box::new(booked));
        wizard.select_date(date(2025, 12, 15)).unwrap();

        assert_eq!(wizard.available_slots().len(), 31);
        assert_eq!(wizard.select_time(time("10:30")), Err(TransitionError::SlotNotOffered(time("10:30"))));
    }

    #[test]
    fn test_summary_on_booking_details() {
        let mut wizard = wizard();
        assert!(wizard.summary().is_none());

        wizard.select_date(date(2025, 12, 15)).unwrap();
        wizard.select_time(time("10:30")).unwrap();

        let summary = wizard.summary().unwrap();
        assert_eq!(summary.formatted_date, "2025. december 15., hétfő");
        assert_eq!(summary.time, time("10:30"));
        assert_eq!(summary.formatted_duration, "15 perc");
    }

    #[test]
    fn test_go_to_step_without_preconditions_is_noop() {
        let mut wizard = wizard();
        assert_eq!(wizard.go_to_step(WizardStep::TimeSelection), Err(TransitionError::NoDateSelected));
        assert_eq!(wizard.step(), WizardStep::DateSelection);

        wizard.select_date(date(2025, 12, 15)).unwrap();
        assert_eq!(wizard.go_to_step(WizardStep::BookingDetails), Err(TransitionError::NoTimeSelected));
        assert_eq!(wizard.step(), WizardStep::TimeSelection);
    }

    #[test]
    fn test_go_back_to_time_selection_keeps_selection() {
        let mut wizard = wizard();
        wizard.select_date(date(2025, 12, 15)).unwrap();
        wizard.select_time(time("10:30")).unwrap();

        assert_eq!(wizard.go_back(WizardStep::TimeSelection), Ok(WizardStep::TimeSelection));
        assert_eq!(wizard.selection().selected_date, Some(date(2025, 12, 15)));
        assert_eq!(wizard.selection().selected_time, Some(time("10:30")));
        assert!(wizard.summary().is_none());
        assert!(wizard.time_slots().iter().any(|slot| slot.is_selected && slot.time == time("10:30")));

        // The kept time lets the visitor step forward again
        assert_eq!(wizard.go_to_step(WizardStep::BookingDetails), Ok(WizardStep::BookingDetails));
    }

    #[test]
    fn test_go_back_to_date_selection_clears_selection() {
        let mut wizard = wizard();
        wizard.select_date(date(2025, 12, 15)).unwrap();
        wizard.select_time(time("10:30")).unwrap();

        assert_eq!(wizard.go_back(WizardStep::DateSelection), Ok(WizardStep::DateSelection));
        assert_eq!(wizard.selection().selected_date, None);
        assert_eq!(wizard.selection().selected_time, None);
        assert!(wizard.available_slots().is_empty());
        assert!(wizard.calendar_month().selected_day().is_none());
        assert!(wizard.drain_events().contains(&WizardEvent::SelectionCleared));
    }

    #[test]
    fn test_go_back_cannot_move_forward() {
        let mut wizard = wizard();
        wizard.select_date(date(2025, 12, 15)).unwrap();
        assert_eq!(
            wizard.go_back(WizardStep::BookingDetails),
            Err(TransitionError::CannotGoForward {
                from: WizardStep::TimeSelection,
                to: WizardStep::BookingDetails
            })
        );
    }

    #[test]
    fn test_month_navigation_keeps_selection() {
        let mut wizard = wizard();
        wizard.select_date(date(2025, 12, 15)).unwrap();

        assert_eq!(wizard.next_month(), Ok(CalendarCursor::new(2026, 1)));
        assert_eq!(wizard.month_title(), "Január 2026");
        assert_eq!(wizard.selection().selected_date, Some(date(2025, 12, 15)));
        assert!(wizard.calendar_month().selected_day().is_none());

        assert_eq!(wizard.previous_month(), Ok(CalendarCursor::new(2025, 12)));
        assert_eq!(wizard.calendar_month().selected_day().map(|c| c.day), Some(15));
    }

    #[test]
    fn test_select_duration() {
        let mut wizard = wizard();
        assert_eq!(wizard.select_duration(30), Ok(30));
        assert_eq!(wizard.selection().duration_minutes, 30);
        assert_eq!(wizard.select_duration(20), Err(TransitionError::DurationNotOffered(20)));
        assert_eq!(wizard.selection().duration_minutes, 30);

        wizard.select_date(date(2025, 12, 15)).unwrap();
        wizard.select_time(time("10:30")).unwrap();
        assert_eq!(wizard.summary().unwrap().formatted_duration, "30 perc");
    }

    #[test]
    fn test_interval_tabs() {
        let settings = WizardSettings {
            slot_mode: SlotMode::Tabbed,
            ..WizardSettings::default()
        };
        let mut wizard = wizard_with(settings, Box::new(AlwaysAvailable));
        wizard.select_date(date(2025, 12, 15)).unwrap();

        assert_eq!(wizard.available_slots().first(), Some(&time("08:00")));
        assert_eq!(wizard.available_slots().len(), 8);

        wizard.select_time(time("09:30")).unwrap();
        assert_eq!(wizard.select_interval_tab(6), Err(TransitionError::InvalidIntervalTab(6)));

        // Moving to 10-12 drops the 09:30 selection and leaves the details step
        let tab = wizard.select_interval_tab(1).unwrap();
        assert_eq!(tab.start_hour(), 10);
        assert_eq!(wizard.available_slots().first(), Some(&time("10:00")));
        assert_eq!(wizard.selection().selected_time, None);
        assert_eq!(wizard.step(), WizardStep::TimeSelection);
    }

    #[test]
    fn test_interval_tabs_disabled_in_business_hours_mode() {
        let mut wizard = wizard();
        assert_eq!(wizard.select_interval_tab(1), Err(TransitionError::IntervalTabsDisabled));
    }

    #[test]
    fn test_confirm_requires_booking_details() {
        let mut wizard = wizard();
        let guest = GuestDetails::new("Kovács János", "janos@example.com");
        assert_eq!(
            wizard.confirm_booking(&guest),
            Err(BookingError::Transition(TransitionError::NotReadyToConfirm))
        );
    }

    #[test]
    fn test_confirm_validation_failure_keeps_state() {
        let mut wizard = wizard();
        wizard.select_date(date(2025, 12, 15)).unwrap();
        wizard.select_time(time("10:30")).unwrap();
        wizard.drain_events();

        let result = wizard.confirm_booking(&GuestDetails::new("", "janos@example.com"));
        assert_eq!(result, Err(BookingError::Validation(GuestValidationError::EmptyName)));

        let result = wizard.confirm_booking(&GuestDetails::new("János", "janos.example.com"));
        assert_eq!(result, Err(BookingError::Validation(GuestValidationError::InvalidEmail)));
        assert_eq!(wizard.validation_message(&GuestValidationError::InvalidEmail), "Kérjük, adj meg egy érvényes email címet!");

        assert_eq!(wizard.step(), WizardStep::BookingDetails);
        assert_eq!(wizard.selection().selected_time, Some(time("10:30")));
        assert!(wizard.drain_events().is_empty());
    }

    #[test]
    fn test_confirm_builds_payload() {
        let mut wizard = wizard();
        wizard.select_date(date(2025, 12, 15)).unwrap();
        wizard.select_time(time("10:30")).unwrap();

        let confirmation = wizard
            .confirm_booking(&GuestDetails::new(" Kovács János ", "janos@example.com"))
            .unwrap();
        assert_eq!(confirmation.guest_name, "Kovács János");
        assert_eq!(confirmation.guest_email, "janos@example.com");
        assert_eq!(confirmation.date, date(2025, 12, 15));
        assert_eq!(confirmation.time, time("10:30"));
        assert_eq!(confirmation.duration_minutes, 15);
        assert!(confirmation.message.contains("Időpont: 10:30"));
        assert!(wizard.drain_events().contains(&WizardEvent::BookingConfirmed(confirmation.id)));
    }

    #[test]
    fn test_events_describe_transitions() {
        let mut wizard = wizard();
        wizard.select_date(date(2025, 12, 15)).unwrap();
        wizard.select_time(time("10:30")).unwrap();

        assert_eq!(
            wizard.drain_events(),
            vec![
                WizardEvent::DateSelected(date(2025, 12, 15)),
                WizardEvent::StepChanged { from: WizardStep::DateSelection, to: WizardStep::TimeSelection },
                WizardEvent::TimeSelected(time("10:30")),
                WizardEvent::StepChanged { from: WizardStep::TimeSelection, to: WizardStep::BookingDetails },
            ]
        );
        assert!(wizard.drain_events().is_empty());
    }

    #[test]
    fn test_clock_display() {
        let wizard = BookingWizard::new(
            WizardSettings::default(),
            Box::new(AlwaysAvailable),
            Box::new(HungarianFormatter),
            Box::new(FixedClock::at(date(2025, 12, 10).and_hms_opt(14, 7, 0).unwrap())),
        )
        .unwrap();
        assert_eq!(wizard.clock_display(), "Central European Time (14:07)");
    }

    #[test]
    fn test_midnight_rollover_drops_selected_date() {
        let clock = SteppingClock::new(date(2025, 12, 15).and_hms_opt(23, 50, 0).unwrap());
        let mut wizard = BookingWizard::new(
            WizardSettings::default(),
            Box::new(AlwaysAvailable),
            Box::new(HungarianFormatter),
            Box::new(clock.clone()),
        )
        .unwrap();
        wizard.select_date(date(2025, 12, 15)).unwrap();
        wizard.select_time(time("10:30")).unwrap();
        wizard.drain_events();

        // Still the same day: nothing changes
        clock.set(date(2025, 12, 15).and_hms_opt(23, 59, 0).unwrap());
        wizard.refresh().unwrap();
        assert_eq!(wizard.step(), WizardStep::BookingDetails);
        assert!(wizard.drain_events().is_empty());

        clock.set(date(2025, 12, 16).and_hms_opt(0, 1, 0).unwrap());
        let guest = GuestDetails::new("Kovács János", "janos@example.com");
        assert_eq!(
            wizard.confirm_booking(&guest),
            Err(BookingError::Transition(TransitionError::DateNotSelectable(date(2025, 12, 15))))
        );

        wizard.refresh().unwrap();
        assert_eq!(wizard.step(), WizardStep::DateSelection);
        assert_eq!(wizard.selection().selected_date, None);
        assert_eq!(wizard.selection().selected_time, None);
        assert!(wizard.available_slots().is_empty());

        let day = wizard.calendar_month().day(15).unwrap();
        assert!(day.is_past);
        assert!(!day.is_selected);
        assert!(wizard.calendar_month().day(16).unwrap().is_today);

        assert_eq!(
            wizard.drain_events(),
            vec![
                WizardEvent::SelectionCleared,
                WizardEvent::StepChanged { from: WizardStep::BookingDetails, to: WizardStep::DateSelection },
            ]
        );
        assert!(matches!(wizard.confirm_booking(&guest), Err(BookingError::Transition(TransitionError::NotReadyToConfirm))));
    }
}
