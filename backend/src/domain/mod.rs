//! # Domain Module
//!
//! Contains all business logic for the booking widget.
//!
//! This module works independently of any UI toolkit: renderers receive
//! plain view data (month grids, slot lists, summaries) and forward user
//! actions to the wizard.
//!
//! ## Module Organization
//!
//! - **calendar**: Month grid generation, day rules and cursor navigation
//! - **time_slots**: Slot windows and slot list generation
//! - **availability**: The injected slot availability lookup and its implementations
//! - **guest_form**: Guest name/email validation
//! - **formatting**: Locale-specific text behind the `BookingFormatter` trait
//! - **clock**: Source of "now" and "today"
//! - **wizard**: The booking wizard state machine tying the services together
//!
//! ## Business Rules
//!
//! - Only days that are not in the past and pass the day rule can be picked
//! - Picking a date always clears the picked time
//! - A time can only be picked from the slots offered for the picked date
//! - Guest details are checked name first, then email presence, then email format

pub mod availability;
pub mod calendar;
pub mod clock;
pub mod formatting;
pub mod guest_form;
pub mod time_slots;
pub mod wizard;

pub use availability::*;
pub use calendar::*;
pub use clock::*;
pub use formatting::*;
pub use guest_form::*;
pub use time_slots::*;
pub use wizard::*;
