//! Core data model for the market simulation.
//!
//! Everything here is plain serializable state: fixed-point money and share
//! quantities, OHLC market history, neural-network weights, investor
//! portfolios with lot-level cost basis, market events, and the aggregate
//! [`SimulationState`] the simulation crate transforms. No behavior beyond
//! small accessors lives here; the decision and settlement logic sits in the
//! `quant`, `agents`, `news`, and `simulation` crates.

pub mod events;
pub mod ids;
pub mod market;
pub mod money;
pub mod network;
pub mod portfolio;
pub mod state;
pub mod tax;

pub use events::{ActiveEvent, Article, EventImpact, EventTone, EVENT_HISTORY_CAP};
pub use ids::{
    next_midnight, InvestorId, SimDay, Symbol, Timestamp, HUMAN_INVESTOR_ID, PRICE_SCALE,
    SECS_PER_DAY,
};
pub use market::{
    CorporateActionWeights, CorporateAi, OhlcBar, Sector, Stock, HISTORY_CAP,
    INITIAL_HISTORY_LENGTH,
};
pub use money::{Cash, Price, Quantity};
pub use network::{ActivationTrace, NetworkWeights};
pub use portfolio::{
    ComplexWeights, Investor, PortfolioItem, PortfolioValuePoint, RecentTrade, ShareLot, Strategy,
    TradeSide, PORTFOLIO_HISTORY_CAP,
};
pub use state::{IndexPoint, SimulationState, MARKET_INDEX_CAP};
