//! Core identifier and time types for the market simulation.
//!
//! This module defines the fundamental aliases and constants used throughout
//! the system to identify stocks and investors and to track simulated time.

// =============================================================================
// Constants
// =============================================================================

/// Price scale factor: 10,000 means 4 decimal places.
/// - `10000` = $1.00
/// - `1` = $0.0001 (smallest price increment)
pub const PRICE_SCALE: i64 = 10_000;

/// Seconds in one simulated calendar day.
pub const SECS_PER_DAY: u64 = 86_400;

/// Reserved identifier for the human player's account.
pub const HUMAN_INVESTOR_ID: &str = "human-player";

// =============================================================================
// Symbol and Identifier Types
// =============================================================================

/// Stock ticker symbol (e.g., "INNV", "HLTH").
pub type Symbol = String;

/// Unique identifier for an investor (e.g., "investor-7", "human-player").
pub type InvestorId = String;

// =============================================================================
// Time Types
// =============================================================================

/// Wall clock timestamp in seconds since the Unix epoch.
pub type Timestamp = u64;

/// Simulation calendar day counter. Seeded history occupies days 1..=200,
/// so live trading begins on day 200.
pub type SimDay = u32;

/// Day boundary strictly after `clock` (the next UTC midnight, in seconds).
#[inline]
pub fn next_midnight(clock: Timestamp) -> Timestamp {
    (clock / SECS_PER_DAY + 1) * SECS_PER_DAY
}
