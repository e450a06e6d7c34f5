//! Guest form validation for the booking details step.
//!
//! Checks run in a fixed order (name, email presence, email format) and the
//! first failure is the one reported, together with the field to focus.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{GuestDetails, GuestValidationError};

/// Basic `local@domain.tld` shape, no whitespace and a single `@`
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(EMAIL_PATTERN).ok());

/// Service validating guest input before a booking is accepted
#[derive(Debug, Clone, Copy, Default)]
pub struct GuestFormService;

impl GuestFormService {
    pub fn new() -> Self {
        Self
    }

    /// Validate and trim guest input, returning the cleaned details on success
    pub fn validate(&self, guest: &GuestDetails) -> Result<GuestDetails, GuestValidationError> {
        let cleaned = guest.trimmed();

        if cleaned.name.is_empty() {
            warn!("📝 Guest form rejected: empty name");
            return Err(GuestValidationError::EmptyName);
        }
        if cleaned.email.is_empty() {
            warn!("📝 Guest form rejected: empty email");
            return Err(GuestValidationError::EmptyEmail);
        }
        if !self.is_valid_email(&cleaned.email) {
            warn!("📝 Guest form rejected: malformed email");
            return Err(GuestValidationError::InvalidEmail);
        }

        debug!("📝 Guest form accepted");
        Ok(cleaned)
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        EMAIL_REGEX
            .as_ref()
            .map(|re| re.is_match(email))
            .unwrap_or(false)
    }
}
