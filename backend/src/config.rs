//! # Booking Configuration
//!
//! Widget settings loaded from a YAML file. Every field has a default, so an
//! empty file (or no file at all) gives the Monday/Wednesday, 09:00-17:00,
//! 15-minute Hungarian setup.
//!
//! ## YAML Format
//!
//! ```yaml
//! locale: hu
//! default_duration_minutes: 15
//! duration_presets: [15, 30, 45, 60]
//! pickable_days:
//!   weekdays: [monday, wednesday]
//! slot_mode: business_hours
//! business_hours: { start_hour: 9, end_hour: 17 }
//! slot_step_minutes: 15
//! availability:
//!   sampled: { seed: 42, removal_rate: 0.3 }
//! initial_month: { year: 2025, month: 12 }
//! ```

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::{CalendarCursor, DEFAULT_DURATION_MINUTES};
use std::fs;
use std::path::Path;

use crate::domain::availability::{AlwaysAvailable, BookedSlot, BookedSlots, SampledAvailability, SlotAvailability};
use crate::domain::calendar::PickableDayRule;
use crate::domain::formatting::Locale;
use crate::domain::time_slots::{BusinessHours, SlotMode, DEFAULT_SLOT_STEP_MINUTES};
use crate::domain::wizard::WizardSettings;

/// Where slot availability comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityConfig {
    /// Every slot is free
    #[default]
    Always,
    /// Seeded pseudo-random removal, always keeping the first slot
    Sampled {
        #[serde(default)]
        seed: u64,
        #[serde(default = "default_removal_rate")]
        removal_rate: f64,
    },
    /// A fixed list of already-booked slots
    Booked(Vec<BookedSlot>),
}

fn default_removal_rate() -> f64 {
    SampledAvailability::DEFAULT_REMOVAL_RATE
}

impl AvailabilityConfig {
    pub fn build(&self) -> Box<dyn SlotAvailability> {
        match self {
            AvailabilityConfig::Always => Box::new(AlwaysAvailable),
            AvailabilityConfig::Sampled { seed, removal_rate } => Box::new(SampledAvailability::new(*seed, *removal_rate)),
            AvailabilityConfig::Booked(slots) => Box::new(BookedSlots::new(slots.iter().copied())),
        }
    }
}

/// Top-level widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub locale: Locale,
    pub default_duration_minutes: u32,
    pub duration_presets: Vec<u32>,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub pickable_days: PickableDayRule,
    pub slot_mode: SlotMode,
    pub business_hours: BusinessHours,
    pub slot_step_minutes: u32,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub availability: AvailabilityConfig,
    /// Month shown first (defaults to the current month)
    pub initial_month: Option<CalendarCursor>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            duration_presets: vec![15, 30, 45, 60],
            pickable_days: PickableDayRule::default(),
            slot_mode: SlotMode::default(),
            business_hours: BusinessHours::default(),
            slot_step_minutes: DEFAULT_SLOT_STEP_MINUTES,
            availability: AvailabilityConfig::default(),
            initial_month: None,
        }
    }
}

impl BookingConfig {
    /// Load and validate a YAML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read booking config {:?}", path))?;
        let config = Self::from_yaml_str(&yaml_content)
            .with_context(|| format!("Invalid booking config {:?}", path))?;
        info!("⚙️ Loaded booking config from {:?}", path);
        Ok(config)
    }

    /// Load from a file when one is given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("⚙️ No booking config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_yaml_str(yaml_content: &str) -> Result<Self> {
        let config: BookingConfig = if yaml_content.trim().is_empty() {
            BookingConfig::default()
        } else {
            serde_yaml::from_str(yaml_content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let hours = self.business_hours;
        if hours.end_hour > 24 {
            bail!("Business hours end at {}, which is past midnight", hours.end_hour);
        }
        if hours.start_hour >= hours.end_hour {
            bail!("Business hours must start before they end ({} >= {})", hours.start_hour, hours.end_hour);
        }
        if self.slot_step_minutes == 0 || 60 % self.slot_step_minutes != 0 {
            bail!("Slot step of {} minutes must evenly divide an hour", self.slot_step_minutes);
        }
        if self.duration_presets.is_empty() {
            bail!("At least one duration preset is required");
        }
        if !self.duration_presets.contains(&self.default_duration_minutes) {
            bail!("Default duration {} is not one of the presets {:?}", self.default_duration_minutes, self.duration_presets);
        }
        if let PickableDayRule::Weekdays(days) = &self.pickable_days {
            if days.is_empty() {
                bail!("Weekday rule lists no days; use any_day to allow every day");
            }
        }
        if let AvailabilityConfig::Sampled { removal_rate, .. } = self.availability {
            if !(0.0..=1.0).contains(&removal_rate) {
                bail!("Removal rate {} must be between 0 and 1", removal_rate);
            }
        }
        if let Some(cursor) = self.initial_month {
            if !(1..=12).contains(&cursor.month) {
                bail!("Invalid initial month: {}. Must be between 1 and 12", cursor.month);
            }
        }
        Ok(())
    }

    pub fn wizard_settings(&self) -> WizardSettings {
        WizardSettings {
            day_rule: self.pickable_days.clone(),
            slot_mode: self.slot_mode,
            business_hours: self.business_hours,
            slot_step_minutes: self.slot_step_minutes,
            default_duration_minutes: self.default_duration_minutes,
            duration_presets: self.duration_presets.clone(),
            initial_cursor: self.initial_month,
        }
    }
}
