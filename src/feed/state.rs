//! Current feed state

use super::types::{PriceSnapshot, StateError};
use rust_decimal::Decimal;

/// Latest snapshot plus the sequence number it was published under
#[derive(Debug, Clone)]
pub struct FeedState {
    snapshot: PriceSnapshot,
    sequence: u64,
    floor: Decimal,
}

impl FeedState {
    /// Start from `seed`, published as sequence 1
    pub fn new(seed: PriceSnapshot, floor: Decimal) -> Result<Self, StateError> {
        check_floor(&seed, floor)?;
        Ok(Self {
            snapshot: seed,
            sequence: 1,
            floor,
        })
    }

    pub fn snapshot(&self) -> &PriceSnapshot {
        &self.snapshot
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn floor(&self) -> Decimal {
        self.floor
    }

    /// Replace the current snapshot, returning its new sequence number
    pub fn replace(&mut self, snapshot: PriceSnapshot) -> Result<u64, StateError> {
        check_floor(&snapshot, self.floor)?;
        self.snapshot = snapshot;
        self.sequence += 1;
        Ok(self.sequence)
    }
}

fn check_floor(snapshot: &PriceSnapshot, floor: Decimal) -> Result<(), StateError> {
    if snapshot.price < floor {
        return Err(StateError::BelowFloor {
            price: snapshot.price,
            floor,
        });
    }
    Ok(())
}
