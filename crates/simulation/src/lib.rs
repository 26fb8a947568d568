//! Simulation crate: the day cycle for the neural-agent stock market.
//!
//! This crate owns everything that moves the market: genesis seeding, the
//! wall-clock runner, end-of-day settlement, manual player trades, and
//! snapshot persistence. The `types` crate holds the state; `quant`,
//! `agents`, and `news` supply the indicator, decision, and event logic
//! this crate orchestrates.
//!
//! # Architecture
//!
//! Time advances through [`advance_time`] in segments clipped at UTC
//! midnights; each crossed midnight settles one full day:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              run_end_of_day()                │
//! │                                              │
//! │  1. Land a due macro shock, reschedule it    │
//! │  2. Reprice closes: tax drag, inflation,     │
//! │     event factors, corporate-news rolls      │
//! │  3. Funds grade due trades, then buy/sell    │
//! │  4. Finalize daily volume                    │
//! │  5. Mark every account's portfolio value     │
//! │  6. Extend the market index                  │
//! │  7. Settle annual taxes on year boundaries   │
//! │  8. Open the next day's bar flat             │
//! │                                              │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use simulation::{Engine, SimulationConfig};
//! use types::{Quantity, HUMAN_INVESTOR_ID};
//!
//! let mut engine = Engine::new(SimulationConfig::new(42));
//! engine.advance_days(30);
//! engine.player_buy(HUMAN_INVESTOR_ID, "INNV", Quantity(10));
//! engine.save("market.json")?;
//! # Ok::<(), simulation::SimError>(())
//! ```
//!
//! Every public operation is a pure `State -> State` transform under the
//! hood; [`Engine`] just threads the state, the seeded RNG, and the news
//! enricher through them.

pub mod config;
pub mod engine;
pub mod error;
pub mod population;
pub mod runner;
pub mod settlement;
pub mod setup;
pub mod snapshot;
pub mod trades;
pub mod universe;

pub use config::SimulationConfig;
pub use engine::Engine;
pub use error::{Result, SimError};
pub use runner::advance_time;
pub use settlement::run_end_of_day;
pub use setup::{GENESIS_CLOCK, build_initial_state};
pub use snapshot::{from_json, load_state, save_state, to_json};
pub use trades::{player_buy, player_sell};
