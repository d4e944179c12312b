use crate::errors::LaunchError;
use crate::market::market_cap::TickRange;

/// Gamma is stored as an int24 by the auction hook.
pub const MAX_GAMMA: i32 = (1 << 23) - 1;

/// Per-epoch tick drift that carries an auction from `start_tick` to
/// `end_tick` over `duration_seconds`.
///
/// The even share of the range per epoch is rounded to the nearest multiple
/// of `tick_spacing`, ties away from zero. A non-empty range never yields a
/// zero gamma: the result is bumped to one spacing in the range's direction.
pub fn solve_gamma(
    start_tick: i32,
    end_tick: i32,
    duration_seconds: u64,
    epoch_length_seconds: u64,
    tick_spacing: i32,
) -> Result<i32, LaunchError> {
    if tick_spacing <= 0 {
        return Err(LaunchError::InvalidSchedule(format!(
            "tick spacing must be positive, got {tick_spacing}"
        )));
    }
    if epoch_length_seconds == 0 {
        return Err(LaunchError::InvalidSchedule(
            "epoch length must be positive".to_string(),
        ));
    }
    if duration_seconds == 0 || duration_seconds % epoch_length_seconds != 0 {
        return Err(LaunchError::InvalidSchedule(format!(
            "duration {duration_seconds}s is not a positive multiple of {epoch_length_seconds}s"
        )));
    }

    let total_epochs = (duration_seconds / epoch_length_seconds) as i128;
    let delta = end_tick as i128 - start_tick as i128;
    if delta == 0 {
        return Ok(0);
    }

    // delta / (epochs * spacing), rounded half away from zero.
    let denominator = total_epochs * tick_spacing as i128;
    let quotient = delta.abs() / denominator;
    let remainder = delta.abs() % denominator;
    let mut units = if 2 * remainder >= denominator {
        quotient + 1
    } else {
        quotient
    };
    if units == 0 {
        units = 1;
    }

    let gamma = delta.signum() * units * tick_spacing as i128;
    if gamma.abs() > MAX_GAMMA as i128 {
        return Err(LaunchError::InvalidSchedule(format!(
            "gamma {gamma} does not fit in an int24"
        )));
    }
    Ok(gamma as i32)
}

/// Time structure of a dynamic auction over a tick range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionSchedule {
    pub start_tick: i32,
    pub end_tick: i32,
    pub duration_seconds: u64,
    pub epoch_length_seconds: u64,
    pub tick_spacing: i32,
}

impl AuctionSchedule {
    pub fn new(
        range: TickRange,
        duration_seconds: u64,
        epoch_length_seconds: u64,
        tick_spacing: i32,
    ) -> Self {
        Self {
            start_tick: range.start_tick,
            end_tick: range.end_tick,
            duration_seconds,
            epoch_length_seconds,
            tick_spacing,
        }
    }

    pub fn total_epochs(&self) -> Result<u64, LaunchError> {
        if self.epoch_length_seconds == 0
            || self.duration_seconds % self.epoch_length_seconds != 0
        {
            return Err(LaunchError::InvalidSchedule(format!(
                "duration {}s is not a multiple of the {}s epoch",
                self.duration_seconds, self.epoch_length_seconds
            )));
        }
        Ok(self.duration_seconds / self.epoch_length_seconds)
    }

    pub fn gamma(&self) -> Result<i32, LaunchError> {
        solve_gamma(
            self.start_tick,
            self.end_tick,
            self.duration_seconds,
            self.epoch_length_seconds,
            self.tick_spacing,
        )
    }
}
