//! Market events: macro shocks hitting every sector and idiosyncratic
//! corporate news pinned to one stock.
//!
//! An event's numeric payload is its multiplicative price impact; headline,
//! summary, and body text are display metadata filled in by an enricher and
//! never read by the settlement logic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{SimDay, Symbol};
use crate::market::Sector;

/// Most-recent events kept in the state's history log.
pub const EVENT_HISTORY_CAP: usize = 50;

// ===========================================================================
// Impact
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTone {
    Positive,
    Negative,
}

impl EventTone {
    /// Lowercase form, matching the serialized representation.
    pub fn as_str(self) -> &'static str {
        match self {
            EventTone::Positive => "positive",
            EventTone::Negative => "negative",
        }
    }
}

impl fmt::Display for EventTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Multiplicative price impact. A factor of `1.15` lifts the close 15%,
/// `0.85` knocks it down 15%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "kebab-case")]
pub enum EventImpact {
    /// One factor, applied to the single targeted stock.
    Uniform { factor: f64 },
    /// Sector-keyed factors with a default fallback, for market-wide events.
    BySector {
        default: f64,
        #[serde(default)]
        overrides: BTreeMap<Sector, f64>,
    },
}

impl EventImpact {
    /// Factor a market-wide impact applies to a stock in `sector`.
    pub fn factor_for(&self, sector: Sector) -> f64 {
        match self {
            EventImpact::Uniform { factor } => *factor,
            EventImpact::BySector { default, overrides } => {
                overrides.get(&sector).copied().unwrap_or(*default)
            }
        }
    }
}

// ===========================================================================
// Events
// ===========================================================================

/// Generated article text for an event. Pure display metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    pub summary: String,
    pub full_text: String,
}

/// A point-in-time market event. `symbol` is `None` for market-wide macro
/// events and names the hit stock for corporate news.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub id: String,
    pub day: SimDay,
    pub symbol: Option<Symbol>,
    /// Company display name for corporate events.
    pub company: Option<String>,
    pub name: String,
    pub description: String,
    pub tone: EventTone,
    pub impact: EventImpact,
    pub article: Article,
    #[serde(default)]
    pub image_ref: Option<String>,
}

impl ActiveEvent {
    #[inline]
    pub fn is_market_wide(&self) -> bool {
        self.symbol.is_none()
    }

    /// The close adjustment this event applies to the given stock, if any.
    ///
    /// Targeted events only move their own symbol and only carry uniform
    /// impacts; market-wide events only carry sector maps. A mismatched
    /// pairing applies nothing.
    pub fn price_factor(&self, symbol: &str, sector: Sector) -> Option<f64> {
        match (&self.symbol, &self.impact) {
            (Some(target), EventImpact::Uniform { factor }) if target == symbol => Some(*factor),
            (None, EventImpact::BySector { default, overrides }) => {
                Some(overrides.get(&sector).copied().unwrap_or(*default))
            }
            _ => None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn macro_event() -> ActiveEvent {
        ActiveEvent {
            id: "201-42".to_owned(),
            day: 201,
            symbol: None,
            company: None,
            name: "Global Recession".to_owned(),
            description: "A severe global recession begins.".to_owned(),
            tone: EventTone::Negative,
            impact: EventImpact::BySector {
                default: 0.85,
                overrides: BTreeMap::from([(Sector::Health, 0.95)]),
            },
            article: Article::default(),
            image_ref: None,
        }
    }

    #[test]
    fn test_by_sector_falls_back_to_default() {
        let event = macro_event();
        assert_eq!(event.impact.factor_for(Sector::Health), 0.95);
        assert_eq!(event.impact.factor_for(Sector::Technology), 0.85);
    }

    #[test]
    fn test_market_wide_event_hits_every_symbol() {
        let event = macro_event();
        assert!(event.is_market_wide());
        assert_eq!(event.price_factor("AAA", Sector::Energy), Some(0.85));
        assert_eq!(event.price_factor("BBB", Sector::Health), Some(0.95));
    }

    #[test]
    fn test_targeted_event_only_moves_its_own_stock() {
        let mut event = macro_event();
        event.symbol = Some("AAA".to_owned());
        event.impact = EventImpact::Uniform { factor: 1.2 };
        assert_eq!(event.price_factor("AAA", Sector::Technology), Some(1.2));
        assert_eq!(event.price_factor("BBB", Sector::Technology), None);
    }

    #[test]
    fn test_mismatched_impact_shape_applies_nothing() {
        // A targeted event carrying a sector map moves nothing, and a
        // market-wide event carrying a plain factor moves nothing.
        let mut targeted = macro_event();
        targeted.symbol = Some("AAA".to_owned());
        assert_eq!(targeted.price_factor("AAA", Sector::Health), None);

        let mut market_wide = macro_event();
        market_wide.impact = EventImpact::Uniform { factor: 0.9 };
        assert_eq!(market_wide.price_factor("AAA", Sector::Health), None);
    }

    #[test]
    fn test_impact_serde_tags() {
        let json = serde_json::to_string(&EventImpact::Uniform { factor: 1.15 }).unwrap();
        assert!(json.contains(r#""scope":"uniform""#));
        let back: EventImpact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EventImpact::Uniform { factor: 1.15 });
    }
}
