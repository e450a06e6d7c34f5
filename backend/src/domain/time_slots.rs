//! Time slot generation for a selected date.
//!
//! Candidates are laid out at a fixed step over a window (business hours or
//! one interval tab) and then filtered through the injected availability
//! lookup.

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use shared::{IntervalTab, SlotTime, TimeSlot};

use super::availability::SlotAvailability;

/// Default slot granularity in minutes
pub const DEFAULT_SLOT_STEP_MINUTES: u32 = 15;

/// Opening hours for the non-tabbed layout, `start_hour` inclusive and `end_hour` exclusive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusinessHours {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

/// How the slot panel is laid out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlotMode {
    /// A single list spanning the business hours
    #[default]
    BusinessHours,
    /// Six two-hour tabs between 08:00 and 20:00, one shown at a time
    Tabbed,
}

/// The hour range slots are generated over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotWindow {
    BusinessHours(BusinessHours),
    Tab(IntervalTab),
}

impl SlotWindow {
    pub fn start_hour(&self) -> u8 {
        match self {
            SlotWindow::BusinessHours(hours) => hours.start_hour,
            SlotWindow::Tab(tab) => tab.start_hour(),
        }
    }

    pub fn end_hour(&self) -> u8 {
        match self {
            SlotWindow::BusinessHours(hours) => hours.end_hour,
            SlotWindow::Tab(tab) => tab.end_hour(),
        }
    }

    pub fn contains(&self, time: SlotTime) -> bool {
        time.hour() >= self.start_hour() && time.hour() < self.end_hour()
    }
}

/// Service generating the slot list shown for a date
#[derive(Debug, Clone)]
pub struct TimeSlotService {
    step_minutes: u32,
}

impl TimeSlotService {
    pub fn new(step_minutes: u32) -> Self {
        Self {
            step_minutes: step_minutes.max(1),
        }
    }

    /// Every slot start in the window, before availability filtering
    pub fn candidate_slots(&self, window: SlotWindow) -> Vec<SlotTime> {
        let start = u32::from(window.start_hour()) * 60;
        let end = u32::from(window.end_hour()) * 60;

        (start..end)
            .step_by(self.step_minutes as usize)
            .filter_map(SlotTime::from_minutes)
            .collect()
    }

    /// Available slot starts for `date`, in ascending order.
    ///
    /// An empty result means the caller should show its "no slots" message.
    pub fn generate_time_slots(
        &self,
        date: NaiveDate,
        window: SlotWindow,
        availability: &dyn SlotAvailability,
    ) -> Vec<SlotTime> {
        let keep_first = availability.keeps_window_start();
        let slots: Vec<SlotTime> = self
            .candidate_slots(window)
            .into_iter()
            .enumerate()
            .filter(|(index, time)| (keep_first && *index == 0) || availability.is_slot_available(date, *time))
            .map(|(_, time)| time)
            .collect();

        info!(
            "🕒 Generated {} slots for {} between {:02}:00 and {:02}:00",
            slots.len(),
            date,
            window.start_hour(),
            window.end_hour()
        );
        slots
    }

    /// Attach the selection flag for rendering
    pub fn to_time_slots(&self, slots: &[SlotTime], selected: Option<SlotTime>) -> Vec<TimeSlot> {
        slots
            .iter()
            .map(|time| TimeSlot {
                time: *time,
                is_selected: selected == Some(*time),
            })
            .collect()
    }
}

impl Default for TimeSlotService {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_STEP_MINUTES)
    }
}
