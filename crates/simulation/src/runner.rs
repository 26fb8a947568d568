//! Wall-clock advancement: intraday noise between midnights, full
//! settlement at each crossing.
//!
//! [`advance_time`] is the only way simulated time moves. It never mutates
//! its input; callers get back a settled copy, which keeps snapshots and
//! retries trivial.

use rand::Rng;

use news::EventEnricher;
use types::{Price, SECS_PER_DAY, SimulationState, next_midnight};

use crate::settlement;

/// Full-day intraday swing; shorter segments scale by the square root of
/// elapsed time.
const DAILY_VOLATILITY: f64 = 0.03;

/// Advance a copy of `state` by `seconds` and return the settled copy.
///
/// Time moves in segments clipped at each UTC midnight. Every segment
/// wiggles the live closes, stretching each day's high/low range, and a
/// segment landing on a midnight runs the end-of-day settlement before
/// the next segment begins. The clock is committed segment by segment, so
/// trades struck mid-advance carry the timestamp of their own segment.
pub fn advance_time<R: Rng>(
    state: &SimulationState,
    seconds: u64,
    rng: &mut R,
    enricher: &dyn EventEnricher,
) -> SimulationState {
    let mut next = state.clone();
    let end = next.clock + seconds;
    let mut boundary = next_midnight(next.clock);

    while next.clock < end {
        let step = (end - next.clock).min(boundary - next.clock);
        next.clock += step;

        let volatility = (step as f64).sqrt() * DAILY_VOLATILITY / (SECS_PER_DAY as f64).sqrt();
        for stock in next.stocks.iter_mut().filter(|stock| !stock.delisted) {
            let Some(bar) = stock.last_bar_mut() else {
                continue;
            };
            let drift = (rng.random::<f64>() - 0.5) * volatility;
            let price = Price::from_float_floored(bar.close.to_float() * (1.0 + drift));
            bar.record_print(price);
        }

        if next.clock >= boundary {
            settlement::run_end_of_day(&mut next, rng, enricher);
            boundary += SECS_PER_DAY;
        }
    }

    next
}

// =============================================================================
// Tests
// =============================================================================
