//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter and one tick is one
//! simulated hour.  Every delay drawn in days goes through [`days_to_ticks`]
//! before it reaches the scheduler, so all schedule arithmetic is exact
//! integer arithmetic (no floating-point drift) and comparisons are O(1).
//!
//! The mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_time = start_unix_secs + tick * 3600

use std::fmt;

/// Ticks in one simulated day (1 tick = 1 hour).
pub const TICKS_PER_DAY: u64 = 24;

/// Seconds represented by one tick.
pub const SECS_PER_TICK: i64 = 3_600;

/// Convert a duration in days to whole ticks, rounding up so an event is
/// never scheduled before the drawn delay has fully elapsed.
///
/// Negative and NaN durations map to 0.  Values within `1e-9` ticks of an
/// integer are snapped to it, so `7.0` days is exactly 168 ticks.
pub fn days_to_ticks(days: f64) -> u64 {
    if days.is_nan() || days <= 0.0 {
        return 0;
    }
    let ticks = days * TICKS_PER_DAY as f64;
    let nearest = ticks.round();
    if (ticks - nearest).abs() < 1e-9 {
        nearest as u64
    } else {
        ticks.ceil() as u64
    }
}

/// Convert a tick count to fractional days.
#[inline]
pub fn ticks_to_days(ticks: u64) -> f64 {
    ticks as f64 / TICKS_PER_DAY as f64
}

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// Hour of the simulated day, `0..24`.
    #[inline]
    pub fn hour_of_day(self) -> u32 {
        (self.0 % TICKS_PER_DAY) as u32
    }

    /// Whole simulated days since tick 0.
    #[inline]
    pub fn day(self) -> u64 {
        self.0 / TICKS_PER_DAY
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and maps it to Unix wall-clock seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_unix_secs: i64) -> Self {
        Self {
            start_unix_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.current_tick.0 as i64 * SECS_PER_TICK
    }

    /// Unix timestamp corresponding to `tick`.
    #[inline]
    pub fn unix_secs_at(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * SECS_PER_TICK
    }

    /// Break elapsed time into (day, hour) components from sim start.
    pub fn elapsed_dh(&self) -> (u64, u32) {
        (self.current_tick.day(), self.current_tick.hour_of_day())
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h) = self.elapsed_dh();
        write!(f, "{} (day {} {:02}:00)", self.current_tick, d, h)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Epidemiological rates live in `tb_disease::Parameters`; this struct only
/// holds what the run loop itself needs.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Total ticks to simulate.  One year at 1 tick/hour: 365 * 24 = 8760.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Snapshot compartment counts every N ticks.  24 = once per day.
    /// 0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// Configuration for `days` simulated days with daily snapshots.
    pub fn days(days: u64, seed: u64) -> Self {
        Self {
            start_unix_secs: 0,
            total_ticks: days * TICKS_PER_DAY,
            seed,
            output_interval_ticks: TICKS_PER_DAY,
        }
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs)
    }
}
