//! Agent-side holdings: share lots, pending trade records, strategy tiers,
//! and the investor population itself.
//!
//! Lots are append-only on purchase and consumed oldest-first on sale; the
//! consumption logic itself lives in the `agents` crate. Everything here is
//! plain serializable state.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{InvestorId, SimDay, Symbol, Timestamp, SECS_PER_DAY};
use crate::market::Stock;
use crate::money::{Cash, Price, Quantity};
use crate::network::{ActivationTrace, NetworkWeights};

/// Points of portfolio-value history kept per investor.
pub const PORTFOLIO_HISTORY_CAP: usize = 200;

// ===========================================================================
// Share lots
// ===========================================================================

/// A discrete purchase record: this many shares, bought at this price and
/// time, with the indicator snapshot observed at purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareLot {
    pub purchase_time: Timestamp,
    pub purchase_price: Price,
    pub shares: Quantity,
    /// Indicator values at purchase time. Empty for manual trades.
    #[serde(default)]
    pub purchase_features: BTreeMap<String, f64>,
}

impl ShareLot {
    /// Fractional days this lot has been held as of `now`.
    #[inline]
    pub fn holding_days(&self, now: Timestamp) -> f64 {
        now.saturating_sub(self.purchase_time) as f64 / SECS_PER_DAY as f64
    }
}

/// All lots an investor holds in one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub symbol: Symbol,
    pub lots: Vec<ShareLot>,
}

impl PortfolioItem {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            lots: Vec::new(),
        }
    }

    /// Total shares across all lots.
    #[inline]
    pub fn total_shares(&self) -> Quantity {
        self.lots.iter().map(|lot| lot.shares).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}

// ===========================================================================
// Pending trade records
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A trade awaiting outcome evaluation. Created when an agent acts, consumed
/// exactly once by the learning pass when `outcome_day` is reached, then
/// discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTrade {
    pub symbol: Symbol,
    pub day: SimDay,
    pub side: TradeSide,
    pub shares: Quantity,
    pub price: Price,
    /// Indicator snapshot at decision time. Never recomputed.
    pub features: BTreeMap<String, f64>,
    /// Layer activations at decision time, for networks with hidden layers.
    #[serde(default)]
    pub activations: Option<ActivationTrace>,
    pub outcome_day: SimDay,
}

// ===========================================================================
// Strategy tiers
// ===========================================================================

/// Factor weights for the mid-tier strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexWeights {
    /// Short-horizon momentum preference.
    pub growth: f64,
    /// Contrarian, oscillator-driven preference.
    pub value: f64,
    /// Moving-average crossover preference.
    pub trend: f64,
    /// Low-volatility preference.
    pub safety: f64,
}

/// How an investor decides. Three tiers, discriminated by `kind`; callers
/// match on the variant, never on anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Strategy {
    /// Reactive model driven by raw momentum and volatility.
    Simple {
        price_momentum_weight: f64,
        volatility_weight: f64,
        risk_aversion: f64,
    },
    /// Fixed factor weights over a handful of indicators.
    Complex {
        weights: ComplexWeights,
        risk_aversion: f64,
        trade_frequency: f64,
    },
    /// Neural scoring over the full indicator set, with online learning.
    NeuralNet {
        network: NetworkWeights,
        risk_aversion: f64,
        trade_frequency: f64,
        learning_rate: f64,
    },
}

impl Strategy {
    /// Score threshold beyond which the investor acts.
    #[inline]
    pub fn risk_aversion(&self) -> f64 {
        match self {
            Strategy::Simple { risk_aversion, .. }
            | Strategy::Complex { risk_aversion, .. }
            | Strategy::NeuralNet { risk_aversion, .. } => *risk_aversion,
        }
    }

    #[inline]
    pub fn network(&self) -> Option<&NetworkWeights> {
        match self {
            Strategy::NeuralNet { network, .. } => Some(network),
            _ => None,
        }
    }

    #[inline]
    pub fn network_mut(&mut self) -> Option<&mut NetworkWeights> {
        match self {
            Strategy::NeuralNet { network, .. } => Some(network),
            _ => None,
        }
    }

    #[inline]
    pub fn learning_rate(&self) -> Option<f64> {
        match self {
            Strategy::NeuralNet { learning_rate, .. } => Some(*learning_rate),
            _ => None,
        }
    }
}

// ===========================================================================
// Investors
// ===========================================================================

/// One point of an investor's mark-to-market value history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuePoint {
    pub day: SimDay,
    pub value: Cash,
}

/// A market participant: the human player or an autonomous fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: InvestorId,
    pub name: String,
    #[serde(default)]
    pub human: bool,
    /// Derived from the network's dominant weights at setup time.
    #[serde(default)]
    pub strategy_name: Option<String>,
    pub strategy: Strategy,
    pub cash: Cash,
    pub portfolio: Vec<PortfolioItem>,
    pub portfolio_history: Vec<PortfolioValuePoint>,
    /// Carried but never consulted by the settlement logic.
    pub tax_loss_carryforward: Cash,
    pub total_taxes_paid: Cash,
    /// Net long-term capital gain accrued since the last annual settlement.
    pub wa_annual_net_ltcg: Cash,
    pub recent_trades: Vec<RecentTrade>,
}

impl Investor {
    /// Total shares held in `symbol`, zero if no position.
    pub fn shares_of(&self, symbol: &str) -> Quantity {
        self.position(symbol)
            .map(PortfolioItem::total_shares)
            .unwrap_or(Quantity::ZERO)
    }

    pub fn position(&self, symbol: &str) -> Option<&PortfolioItem> {
        self.portfolio.iter().find(|item| item.symbol == symbol)
    }

    pub fn position_mut(&mut self, symbol: &str) -> Option<&mut PortfolioItem> {
        self.portfolio.iter_mut().find(|item| item.symbol == symbol)
    }

    /// Existing position in `symbol`, or a fresh empty one.
    pub fn position_or_insert(&mut self, symbol: &str) -> &mut PortfolioItem {
        let idx = match self.portfolio.iter().position(|item| item.symbol == symbol) {
            Some(idx) => idx,
            None => {
                self.portfolio.push(PortfolioItem::new(symbol.to_owned()));
                self.portfolio.len() - 1
            }
        };
        &mut self.portfolio[idx]
    }

    /// Cash plus holdings marked at each stock's latest close. Positions in
    /// unknown symbols are valued at zero.
    pub fn total_value(&self, stocks: &[Stock]) -> Cash {
        let holdings: Cash = self
            .portfolio
            .iter()
            .map(|item| {
                let close = stocks
                    .iter()
                    .find(|stock| stock.symbol == item.symbol)
                    .and_then(Stock::last_close)
                    .unwrap_or(Price::ZERO);
                close * item.total_shares()
            })
            .sum();
        self.cash + holdings
    }

    /// Appends a value point, evicting the oldest past the cap.
    pub fn push_value_point(&mut self, day: SimDay, value: Cash) {
        self.portfolio_history.push(PortfolioValuePoint { day, value });
        if self.portfolio_history.len() > PORTFOLIO_HISTORY_CAP {
            self.portfolio_history.remove(0);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
