//! # Slot Availability
//!
//! Availability is an injected capability: the slot engine asks a
//! [`SlotAvailability`] whether each candidate slot can be booked, so the
//! engine itself stays deterministic and storage agnostic.

use chrono::{Datelike, NaiveDate};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use shared::SlotTime;
use std::collections::HashSet;

/// Trait defining the availability lookup used when generating slots
pub trait SlotAvailability: Send + Sync {
    /// Whether the slot starting at `time` on `date` can still be booked
    fn is_slot_available(&self, date: NaiveDate, time: SlotTime) -> bool;

    /// Whether the first slot of a window is kept regardless of the lookup
    fn keeps_window_start(&self) -> bool {
        false
    }
}

/// Every slot is free
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAvailable;

impl SlotAvailability for AlwaysAvailable {
    fn is_slot_available(&self, _date: NaiveDate, _time: SlotTime) -> bool {
        true
    }
}

/// A slot that has already been taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookedSlot {
    pub date: NaiveDate,
    pub time: SlotTime,
}

/// Availability backed by a fixed set of booked slots
#[derive(Debug, Clone, Default)]
pub struct BookedSlots {
    booked: HashSet<BookedSlot>,
}

impl BookedSlots {
    pub fn new(booked: impl IntoIterator<Item = BookedSlot>) -> Self {
        Self {
            booked: booked.into_iter().collect(),
        }
    }

    pub fn book(&mut self, date: NaiveDate, time: SlotTime) -> bool {
        self.booked.insert(BookedSlot { date, time })
    }

    pub fn len(&self) -> usize {
        self.booked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.booked.is_empty()
    }
}

impl SlotAvailability for BookedSlots {
    fn is_slot_available(&self, date: NaiveDate, time: SlotTime) -> bool {
        !self.booked.contains(&BookedSlot { date, time })
    }
}

/// Deterministic stand-in for real booking data.
///
/// Each (date, time) pair gets its own seeded draw, so the same slot always
/// gets the same answer. Roughly `removal_rate` of the slots come back taken,
/// and the first slot of every window is always offered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledAvailability {
    seed: u64,
    removal_rate: f64,
}

impl SampledAvailability {
    pub const DEFAULT_REMOVAL_RATE: f64 = 0.3;

    pub fn new(seed: u64, removal_rate: f64) -> Self {
        Self {
            seed,
            removal_rate: removal_rate.clamp(0.0, 1.0),
        }
    }

    pub fn removal_rate(&self) -> f64 {
        self.removal_rate
    }

    fn slot_seed(&self, date: NaiveDate, time: SlotTime) -> u64 {
        let day = date.num_days_from_ce() as u64;
        let minutes = u64::from(time.minutes_since_midnight());
        self.seed ^ (day << 16) ^ minutes
    }
}

impl Default for SampledAvailability {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_REMOVAL_RATE)
    }
}

impl SlotAvailability for SampledAvailability {
    fn is_slot_available(&self, date: NaiveDate, time: SlotTime) -> bool {
        let mut rng = ChaCha8Rng::seed_from_u64(self.slot_seed(date, time));
        let available = rng.gen::<f64>() >= self.removal_rate;
        debug!("🎲 Sampled {} {} available={}", date, time, available);
        available
    }

    fn keeps_window_start(&self) -> bool {
        true
    }
}

impl<T: SlotAvailability + ?Sized> SlotAvailability for Box<T> {
    fn is_slot_available(&self, date: NaiveDate, time: SlotTime) -> bool {
        (**self).is_slot_available(date, time)
    }

    fn keeps_window_start(&self) -> bool {
        (**self).keeps_window_start()
    }
}
