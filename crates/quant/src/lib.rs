//! Quantitative feature extraction for the market simulation.
//!
//! One job: turn a stock's daily bar history into the named feature map
//! ([`compute_indicators`]) that the agent networks score and learn
//! against. Momentum, moving-average trends, contrarian oscillators,
//! volatility bands, and volume flow all live in [`indicators`].
//!
//! All math runs in `f64`; fixed-point prices are converted on the way in.

pub mod indicators;

pub use indicators::compute_indicators;
