//! Market news system for the trading simulation.
//!
//! This crate provides:
//! - **Catalog**: Static event templates (sector corporate stories, macro shocks)
//! - **Generator**: Event drawing and scheduling with deterministic seeding
//! - **Enrichment**: The [`EventEnricher`] seam between event numbers and display copy
//! - **Articles**: Local template-based financial prose
//!
//! # Architecture
//!
//! Events fire during end-of-day settlement. The settlement loop owns the
//! decision of *when* (macro schedule reached, corporate probability roll);
//! this crate owns *what* (template choice, impact payload, article copy):
//!
//! ```text
//! Day boundary:
//!   1. day >= next_macro_event_day?       → draw_macro_event()
//!   2. quiet day, per stock: p = 0.005    → draw_corporate_event()
//!   3. EventSeed → EventEnricher          → headline / summary / full text
//!   4. Published ActiveEvent              → state.active_event + history log
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use news::{TemplateEnricher, draw_macro_event, next_macro_event_day};
//!
//! if next_day >= state.next_macro_event_day {
//!     let event = draw_macro_event(&mut rng, next_day, &TemplateEnricher);
//!     state.push_event(event);
//!     state.next_macro_event_day = next_macro_event_day(&mut rng, next_day);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod article;
pub mod catalog;
pub mod enrich;
pub mod generator;

// =============================================================================
// Re-exports
// =============================================================================

pub use article::TemplateEnricher;
pub use catalog::{CorporateTemplate, MACRO_EVENTS, MacroTemplate, corporate_templates};
pub use enrich::{EventEnricher, EventSeed, NoOpEnricher};
pub use generator::{
    CORPORATE_EVENT_PROBABILITY, draw_corporate_event, draw_macro_event,
    genesis_corporate_event_day, genesis_macro_event_day, next_macro_event_day,
};
