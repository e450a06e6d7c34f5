use booking_widget_backend::{BookingError, BookingWizard};
use chrono::NaiveDate;
use log::{debug, info, warn};
use shared::{GuestField, WizardEvent};

use crate::commands::{parse_command, Command, HELP_TEXT};
use crate::render;

/// What the main loop should do after a line of input
#[derive(Debug, PartialEq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Owns the booking session and turns commands into wizard calls
pub struct TerminalApp {
    wizard: BookingWizard,
}

impl TerminalApp {
    pub fn new(wizard: BookingWizard) -> Self {
        Self { wizard }
    }

    #[cfg(test)]
    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    pub fn screen(&self) -> String {
        render::render_screen(&self.wizard)
    }

    /// Periodic clock update; also keeps the grid's past/today flags current
    pub fn tick(&mut self) -> String {
        if let Err(e) = self.wizard.refresh() {
            warn!("Failed to refresh calendar: {}", e);
        }
        self.wizard.clock_display()
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        match parse_command(line) {
            Ok(Some(Command::Quit)) => Reply::Quit,
            Ok(Some(command)) => Reply::Print(self.handle(command)),
            Ok(None) => Reply::Print(String::new()),
            Err(e) => Reply::Print(format!("⚠️ {}", e)),
        }
    }

    fn handle(&mut self, command: Command) -> String {
        debug!("⌨️ Command: {:?}", command);
        let feedback = match command {
            Command::NextMonth => self.wizard.next_month().err().map(|e| e.to_string()),
            Command::PreviousMonth => self.wizard.previous_month().err().map(|e| e.to_string()),
            Command::Day(day) => self.select_day(day),
            Command::Slot(time) => self.wizard.select_time_str(&time).err().map(|e| e.to_string()),
            Command::Tab(index) => self.wizard.select_interval_tab(index).err().map(|e| e.to_string()),
            Command::Duration(minutes) => self.wizard.select_duration(minutes).err().map(|e| e.to_string()),
            Command::Back(step) => self.wizard.go_back(step).err().map(|e| e.to_string()),
            Command::Step(step) => self.wizard.go_to_step(step).err().map(|e| e.to_string()),
            Command::Confirm(guest) => match self.wizard.confirm_booking(&guest) {
                Ok(confirmation) => Some(render::render_confirmation(&confirmation)),
                Err(BookingError::Validation(e)) => {
                    let field = match e.field() {
                        GuestField::Name => "name",
                        GuestField::Email => "email",
                    };
                    Some(format!("✏️ {} ({})", self.wizard.validation_message(&e), field))
                }
                Err(e) => Some(e.to_string()),
            },
            Command::Help => Some(HELP_TEXT.to_string()),
            Command::Quit => None,
        };

        let events = self.wizard.drain_events();
        let repaint = events.iter().any(|e| !matches!(e, WizardEvent::BookingConfirmed(_)));
        for event in &events {
            if let WizardEvent::BookingConfirmed(id) = event {
                info!("✅ Booking {} confirmed", id);
            }
        }

        let mut output = Vec::new();
        if repaint {
            output.push(self.screen());
        }
        if let Some(feedback) = feedback {
            output.push(feedback);
        }
        output.join("\n\n")
    }

    fn select_day(&mut self, day: u32) -> Option<String> {
        let cursor = self.wizard.cursor();
        match NaiveDate::from_ymd_opt(cursor.year, cursor.month, day) {
            Some(date) => self.wizard.select_date(date).err().map(|e| e.to_string()),
            None => Some(format!("{} has no day {}", cursor, day)),
        }
    }
}
