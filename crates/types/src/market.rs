//! Market data types: daily bars, sectors, and the stocks that carry them.

use crate::ids::{SimDay, Symbol};
use crate::money::Price;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Constants
// =============================================================================

/// Number of seeded daily bars each stock starts with.
pub const INITIAL_HISTORY_LENGTH: usize = 200;

/// Maximum daily bars retained per stock; the oldest bar is evicted beyond
/// this, so indicator windows always have enough history without unbounded
/// growth.
pub const HISTORY_CAP: usize = INITIAL_HISTORY_LENGTH + 50;

// =============================================================================
// Sector
// =============================================================================

/// Industry sector. Drives the sector-level event impact maps and the
/// per-sector business tax drag applied at each day boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Sector {
    Technology,
    Health,
    Energy,
    Finance,
    Industrials,
}

impl Sector {
    /// All sectors, in display order.
    pub const ALL: [Sector; 5] = [
        Sector::Technology,
        Sector::Health,
        Sector::Energy,
        Sector::Finance,
        Sector::Industrials,
    ];

    /// Annual Washington B&O tax rate for this sector, applied as a daily
    /// drag of `rate / 365` on every close.
    pub fn bo_tax_rate(self) -> f64 {
        match self {
            // WA B&O "Service and Other Activities" rate is ~1.5%
            Sector::Technology | Sector::Health | Sector::Finance => 0.015,
            // WA B&O "Manufacturing/Wholesaling" rate is ~0.484%
            Sector::Energy | Sector::Industrials => 0.00484,
        }
    }

    /// Human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Health => "Health",
            Sector::Energy => "Energy",
            Sector::Finance => "Finance",
            Sector::Industrials => "Industrials",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// OhlcBar
// =============================================================================

/// One day of price history for a single stock.
///
/// `close` is mutated in place by intraday noise and end-of-day adjustments;
/// `high`/`low` stretch to cover every intraday print.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    /// Simulation day this bar belongs to.
    pub day: SimDay,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    /// Shares traded. Finalized at the day boundary; 0 while the day is open.
    pub volume: u64,
}

impl OhlcBar {
    /// A fresh bar opening flat at the previous close, with no volume yet.
    pub fn flat(day: SimDay, close: Price) -> Self {
        Self {
            day,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }

    /// Record an intraday print: moves the close and stretches high/low.
    pub fn record_print(&mut self, price: Price) {
        self.close = price;
        self.high = self.high.max(price);
        self.low = self.low.min(price);
    }
}

// =============================================================================
// Corporate AI
// =============================================================================

/// Per-action weight maps for a stock's corporate decision network.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorporateActionWeights {
    pub split: BTreeMap<String, f64>,
    pub alliance: BTreeMap<String, f64>,
    pub acquisition: BTreeMap<String, f64>,
}

/// Corporate decision state carried on each stock. The weights steer stock
/// splits, alliances, and acquisitions; executing those actions is a separate
/// subsystem, so this engine only carries and serializes the state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorporateAi {
    /// Earliest day the company will next consider a corporate action.
    pub next_action_day: SimDay,
    pub weights: CorporateActionWeights,
    pub learning_rate: f64,
}

// =============================================================================
// Stock
// =============================================================================

/// A listed company and its full market state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: Symbol,
    pub name: String,
    pub sector: Sector,
    /// Daily bars, oldest first, capped at [`HISTORY_CAP`].
    pub history: Vec<OhlcBar>,
    /// Delisted stocks are frozen: no pricing, no trading, no new bars.
    pub delisted: bool,
    pub shares_outstanding: u64,
    /// Earnings per share, carried for valuation displays.
    pub eps: f64,
    pub corporate_ai: CorporateAi,
}

impl Stock {
    /// Latest close, if any history exists.
    pub fn last_close(&self) -> Option<Price> {
        self.history.last().map(|bar| bar.close)
    }

    /// Mutable access to the current (latest) bar.
    pub fn last_bar_mut(&mut self) -> Option<&mut OhlcBar> {
        self.history.last_mut()
    }

    /// Day of the latest bar, if any history exists.
    pub fn last_bar_day(&self) -> Option<SimDay> {
        self.history.last().map(|bar| bar.day)
    }

    /// Append a bar, evicting the oldest once past [`HISTORY_CAP`].
    pub fn push_bar(&mut self, bar: OhlcBar) {
        self.history.push(bar);
        if self.history.len() > HISTORY_CAP {
            self.history.remove(0);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_stock(bars: usize) -> Stock {
        let history = (1..=bars)
            .map(|day| OhlcBar::flat(day as SimDay, Price::from_float(10.0)))
            .collect();
        Stock {
            symbol: "TEST".to_string(),
            name: "Test Corp".to_string(),
            sector: Sector::Technology,
            history,
            delisted: false,
            shares_outstanding: 100_000_000,
            eps: 2.5,
            corporate_ai: CorporateAi {
                next_action_day: 300,
                weights: CorporateActionWeights::default(),
                learning_rate: 0.02,
            },
        }
    }

    #[test]
    fn test_history_cap_evicts_oldest() {
        let mut stock = test_stock(HISTORY_CAP);
        stock.push_bar(OhlcBar::flat(999, Price::from_float(11.0)));

        assert_eq!(stock.history.len(), HISTORY_CAP);
        assert_eq!(stock.history[0].day, 2, "oldest bar should be evicted");
        assert_eq!(stock.last_bar_day(), Some(999));
    }

    #[test]
    fn test_record_print_stretches_range() {
        let mut bar = OhlcBar::flat(1, Price::from_float(10.0));
        bar.record_print(Price::from_float(10.5));
        bar.record_print(Price::from_float(9.8));

        assert_eq!(bar.close, Price::from_float(9.8));
        assert_eq!(bar.high, Price::from_float(10.5));
        assert_eq!(bar.low, Price::from_float(9.8));
        assert_eq!(bar.open, Price::from_float(10.0));
    }

    #[test]
    fn test_sector_tax_rates() {
        assert!((Sector::Technology.bo_tax_rate() - 0.015).abs() < 1e-12);
        assert!((Sector::Energy.bo_tax_rate() - 0.00484).abs() < 1e-12);
        assert_eq!(Sector::ALL.len(), 5);
    }
}
