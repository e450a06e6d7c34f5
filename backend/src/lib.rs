//! # Booking Widget Backend
//!
//! Calendar, time slot and booking wizard logic for the appointment booking
//! widget, exposed as a library so any rendering layer (terminal, web,
//! desktop) can drive it.

use anyhow::Result;
use log::info;

pub mod config;
pub mod domain;

pub use config::{AvailabilityConfig, BookingConfig};
pub use domain::*;

/// Builds booking sessions from a loaded configuration
pub struct Backend {
    config: BookingConfig,
}

impl Backend {
    pub fn new(config: BookingConfig) -> Result<Self> {
        config.validate()?;
        info!("🚀 Booking backend initialized (locale {:?}, {:?})", config.locale, config.slot_mode);
        Ok(Self { config })
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Start a booking session reading "now" from the system clock
    pub fn new_wizard(&self) -> Result<BookingWizard> {
        self.new_wizard_with_clock(Box::new(SystemClock))
    }

    /// Start a booking session with an explicit clock
    pub fn new_wizard_with_clock(&self, clock: Box<dyn Clock>) -> Result<BookingWizard> {
        let wizard = BookingWizard::new(
            self.config.wizard_settings(),
            self.config.availability.build(),
            self.config.locale.formatter(),
            clock,
        )?;
        Ok(wizard)
    }
}
