//! The aggregate simulation state: every stock, every investor, the event
//! log, and the scheduler counters. This is the sole unit of snapshotting,
//! and the value every public simulation operation consumes and returns.

use serde::{Deserialize, Serialize};

use crate::events::{ActiveEvent, EVENT_HISTORY_CAP};
use crate::ids::{SimDay, Timestamp};
use crate::market::Stock;
use crate::portfolio::Investor;

/// Points of market-index history kept.
pub const MARKET_INDEX_CAP: usize = 250;

/// One point of the cross-sectional market index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub day: SimDay,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Completed calendar days since genesis seeding began. Monotonic.
    pub day: SimDay,
    /// Authoritative wall clock, seconds since the Unix epoch. Monotonic,
    /// finer-grained than `day`.
    pub clock: Timestamp,
    pub stocks: Vec<Stock>,
    pub investors: Vec<Investor>,
    /// The event applied during the current day's settlement, if any.
    pub active_event: Option<ActiveEvent>,
    /// Newest-first bounded log of past events.
    pub event_history: Vec<ActiveEvent>,
    pub market_index_history: Vec<IndexPoint>,
    /// Vestigial counter from an earlier scheduling scheme; corporate news
    /// now fires probabilistically per stock.
    pub next_corporate_event_day: SimDay,
    pub next_macro_event_day: SimDay,
}

impl SimulationState {
    pub fn stock(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.iter().find(|stock| stock.symbol == symbol)
    }

    pub fn stock_mut(&mut self, symbol: &str) -> Option<&mut Stock> {
        self.stocks.iter_mut().find(|stock| stock.symbol == symbol)
    }

    pub fn investor(&self, id: &str) -> Option<&Investor> {
        self.investors.iter().find(|investor| investor.id == id)
    }

    pub fn investor_mut(&mut self, id: &str) -> Option<&mut Investor> {
        self.investors.iter_mut().find(|investor| investor.id == id)
    }

    /// Makes `event` the day's active event and logs it newest-first,
    /// evicting the oldest entry past the cap.
    pub fn push_event(&mut self, event: ActiveEvent) {
        self.active_event = Some(event.clone());
        self.event_history.insert(0, event);
        self.event_history.truncate(EVENT_HISTORY_CAP);
    }

    /// Appends an index point, evicting the oldest past the cap.
    pub fn push_index_point(&mut self, day: SimDay, price: f64) {
        self.market_index_history.push(IndexPoint { day, price });
        if self.market_index_history.len() > MARKET_INDEX_CAP {
            self.market_index_history.remove(0);
        }
    }

    /// Equal-weight average of the latest closes across listed stocks.
    /// `None` once every stock is delisted.
    pub fn average_close(&self) -> Option<f64> {
        let closes: Vec<f64> = self
            .stocks
            .iter()
            .filter(|stock| !stock.delisted)
            .filter_map(|stock| stock.last_close())
            .map(|price| price.to_float())
            .collect();
        if closes.is_empty() {
            return None;
        }
        Some(closes.iter().sum::<f64>() / closes.len() as f64)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
