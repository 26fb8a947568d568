//! Event drawing and scheduling.
//!
//! Events fire at day boundaries. A macro shock lands once its scheduled day
//! arrives and immediately reschedules the next one; on quiet days each stock
//! independently rolls a small chance of sector-flavored corporate news. All
//! draws come through the caller's generator, so a given seed replays the
//! same tape of events.

use rand::Rng;

use types::{ActiveEvent, EventImpact, EventTone, SimDay, Stock};

use crate::catalog;
use crate::enrich::{EventEnricher, EventSeed};

/// Chance an otherwise-quiet stock draws corporate news at a day boundary.
pub const CORPORATE_EVENT_PROBABILITY: f64 = 0.005;

// Scheduling windows, in days.
const MACRO_GAP_MIN: SimDay = 150;
const MACRO_GAP_SPREAD: SimDay = 150;
const GENESIS_MACRO_DELAY: SimDay = 200;
const GENESIS_MACRO_SPREAD: SimDay = 165;
const GENESIS_CORPORATE_DELAY: SimDay = 50;
const GENESIS_CORPORATE_SPREAD: SimDay = 50;

// =============================================================================
// Drawing
// =============================================================================

/// Draw a market-wide macro shock for `day`.
pub fn draw_macro_event<R: Rng>(
    rng: &mut R,
    day: SimDay,
    enricher: &dyn EventEnricher,
) -> ActiveEvent {
    let template = &catalog::MACRO_EVENTS[rng.random_range(0..catalog::MACRO_EVENTS.len())];
    let seed = EventSeed {
        day,
        symbol: None,
        company: None,
        sector: None,
        name: template.name.to_owned(),
        description: template.description.to_owned(),
        tone: template.tone,
        impact: EventImpact::BySector {
            default: template.default_impact,
            overrides: template.overrides.iter().copied().collect(),
        },
    };
    publish(rng, seed, &["macro", template.tone.as_str()], enricher)
}

/// Draw corporate news pinned to `stock`, flavored by its sector.
pub fn draw_corporate_event<R: Rng>(
    rng: &mut R,
    day: SimDay,
    stock: &Stock,
    enricher: &dyn EventEnricher,
) -> ActiveEvent {
    let tone = if rng.random::<f64>() > 0.5 {
        EventTone::Positive
    } else {
        EventTone::Negative
    };
    let pool = catalog::corporate_templates(stock.sector, tone);
    let template = &pool[rng.random_range(0..pool.len())];

    let seed = EventSeed {
        day,
        symbol: Some(stock.symbol.clone()),
        company: Some(stock.name.clone()),
        sector: Some(stock.sector),
        name: template.name.to_owned(),
        description: template.description.to_owned(),
        tone,
        impact: EventImpact::Uniform {
            factor: template.impact,
        },
    };
    let keywords = [stock.sector.as_str(), stock.name.as_str(), tone.as_str()];
    publish(rng, seed, &keywords, enricher)
}

/// Enrich a drawn seed and mint the published event.
fn publish<R: Rng>(
    rng: &mut R,
    seed: EventSeed,
    keywords: &[&str],
    enricher: &dyn EventEnricher,
) -> ActiveEvent {
    let article = enricher.article(&seed, rng);
    let image_ref = enricher.image_ref(&article.headline, keywords, rng);

    ActiveEvent {
        id: format!("{}-{}", seed.day, rng.random::<u32>()),
        day: seed.day,
        symbol: seed.symbol,
        company: seed.company,
        name: seed.name,
        description: seed.description,
        tone: seed.tone,
        impact: seed.impact,
        article,
        image_ref,
    }
}

// =============================================================================
// Scheduling
// =============================================================================

/// Day the next macro shock fires, drawn after one lands on `day`.
pub fn next_macro_event_day<R: Rng>(rng: &mut R, day: SimDay) -> SimDay {
    day + MACRO_GAP_MIN + rng.random_range(0..MACRO_GAP_SPREAD)
}

/// First macro shock day for a freshly built market.
pub fn genesis_macro_event_day<R: Rng>(rng: &mut R, day: SimDay) -> SimDay {
    day + GENESIS_MACRO_DELAY + rng.random_range(0..GENESIS_MACRO_SPREAD)
}

/// Seed value for the corporate-event counter of a freshly built market.
pub fn genesis_corporate_event_day<R: Rng>(rng: &mut R, day: SimDay) -> SimDay {
    day + GENESIS_CORPORATE_DELAY + rng.random_range(0..GENESIS_CORPORATE_SPREAD)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use types::{CorporateActionWeights, CorporateAi, OhlcBar, Price, Sector};

    use crate::enrich::NoOpEnricher;

    use super::*;

    fn test_stock(symbol: &str, sector: Sector) -> Stock {
        Stock {
            symbol: symbol.to_string(),
            name: "HealthSphere".to_string(),
            sector,
            history: vec![OhlcBar::flat(200, Price::from_float(8.0))],
            delisted: false,
            shares_outstanding: 100_000_000,
            eps: 2.0,
            corporate_ai: CorporateAi {
                next_action_day: 300,
                weights: CorporateActionWeights::default(),
                learning_rate: 0.02,
            },
        }
    }

    #[test]
    fn test_same_seed_draws_same_events() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let stock = test_stock("HLTH", Sector::Health);

        for day in 201..221 {
            assert_eq!(
                draw_macro_event(&mut a, day, &NoOpEnricher),
                draw_macro_event(&mut b, day, &NoOpEnricher)
            );
            assert_eq!(
                draw_corporate_event(&mut a, day, &stock, &NoOpEnricher),
                draw_corporate_event(&mut b, day, &stock, &NoOpEnricher)
            );
        }
    }

    #[test]
    fn test_macro_draws_cover_the_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::BTreeSet::new();

        for _ in 0..100 {
            let event = draw_macro_event(&mut rng, 300, &NoOpEnricher);
            assert!(event.is_market_wide());
            assert!(matches!(event.impact, EventImpact::BySector { .. }));

            let template = catalog::MACRO_EVENTS
                .iter()
                .find(|t| t.name == event.name)
                .expect("drawn event should come from the catalog");
            assert_eq!(event.tone, template.tone);
            assert_eq!(event.description, template.description);
            seen.insert(event.name.clone());
        }

        // 100 uniform draws over six templates hit every one of them.
        assert_eq!(seen.len(), catalog::MACRO_EVENTS.len());
    }

    #[test]
    fn test_corporate_news_stays_in_sector_and_tone() {
        let mut rng = StdRng::seed_from_u64(11);
        let stock = test_stock("HLTH", Sector::Health);

        for _ in 0..60 {
            let event = draw_corporate_event(&mut rng, 250, &stock, &NoOpEnricher);
            assert_eq!(event.symbol.as_deref(), Some("HLTH"));
            assert_eq!(event.company.as_deref(), Some("HealthSphere"));

            let pool = catalog::corporate_templates(Sector::Health, event.tone);
            let template = pool
                .iter()
                .find(|t| t.name == event.name)
                .expect("drawn story should come from the sector pool");
            match event.impact {
                EventImpact::Uniform { factor } => assert_eq!(factor, template.impact),
                _ => panic!("corporate news carries a uniform impact"),
            }
        }
    }

    #[test]
    fn test_event_ids_embed_the_day() {
        let mut rng = StdRng::seed_from_u64(5);
        let event = draw_macro_event(&mut rng, 201, &NoOpEnricher);
        assert!(event.id.starts_with("201-"));
        assert_eq!(event.day, 201);
    }

    #[test]
    fn test_scheduling_windows() {
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..200 {
            let next = next_macro_event_day(&mut rng, 300);
            assert!((450..600).contains(&next), "reschedule window, got {next}");

            let first = genesis_macro_event_day(&mut rng, 200);
            assert!((400..565).contains(&first), "genesis macro window, got {first}");

            let counter = genesis_corporate_event_day(&mut rng, 200);
            assert!((250..300).contains(&counter), "genesis corporate window, got {counter}");
        }
    }
}
