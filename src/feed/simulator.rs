//! Bounded random-walk price simulator
//!
//! Fallback when the upstream source cannot be reached. Each step moves the
//! previous price by a uniform offset in `[-band, +band]` and clamps the
//! result at the floor.

use super::types::PriceSnapshot;
use crate::config::{ConfigError, SimulatorConfig};
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Decimal places kept on each simulated step
const STEP_SCALE: u32 = 4;

/// Random-walk simulator seeded by the last known price
#[derive(Debug, Clone)]
pub struct PriceSimulator {
    band: Decimal,
    floor: Decimal,
}

impl PriceSimulator {
    /// Create a simulator from validated configuration
    pub fn new(config: &SimulatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            band: config.band,
            floor: config.floor,
        })
    }

    pub fn band(&self) -> Decimal {
        self.band
    }

    pub fn floor(&self) -> Decimal {
        self.floor
    }

    /// Next price after `previous`, using the thread-local RNG
    pub fn next(&self, previous: &PriceSnapshot) -> PriceSnapshot {
        self.next_with(previous, &mut rand::thread_rng())
    }

    /// Next price after `previous`, drawing from `rng`
    pub fn next_with<R: Rng + ?Sized>(&self, previous: &PriceSnapshot, rng: &mut R) -> PriceSnapshot {
        let unit: f64 = rng.gen_range(-1.0..=1.0);
        let offset = Decimal::from_f64(unit)
            .map(|u| (u * self.band).round_dp(STEP_SCALE))
            .unwrap_or(Decimal::ZERO);

        let price = (previous.price + offset).max(self.floor);
        PriceSnapshot::following(previous.price, price)
    }
}
