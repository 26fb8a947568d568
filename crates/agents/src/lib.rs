//! Agent decision-making and bookkeeping for the market simulation.
//!
//! This crate provides:
//! - [`evaluator`] - the neural forward pass scoring a stock's feature map
//!   across all three network topologies
//! - [`learning`] - the delayed-outcome weight update applied once a
//!   trade's evaluation day arrives
//! - [`ledger`] - lot-level buy/sell bookkeeping with FIFO consumption and
//!   Washington long-term capital-gains accrual
//!
//! # Architecture
//! The simulation crate drives the flow: at each day boundary it computes
//! indicators per stock, calls [`forward`] per investor, executes any
//! resulting trades through the ledger, and queues a trade record that
//! [`evaluate_due_trades`] consumes five days later to nudge the weights.
//! Nothing in this crate touches a stock's price history.

pub mod evaluator;
pub mod learning;
pub mod ledger;

pub use evaluator::{forward, Evaluation};
pub use learning::{evaluate_due_trades, trade_error, EXPECTED_RETURN};
pub use ledger::{buy, sell, settle_annual_taxes, washington_tax_due};
