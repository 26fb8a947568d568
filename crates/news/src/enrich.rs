//! Event enrichment boundary.
//!
//! Drawing an event fixes its numbers (impact, tone, target); enrichment
//! fills in the display metadata around them. The [`EventEnricher`] trait is
//! that seam: the stock enricher composes template articles locally, and a
//! hosted text or image backend can slot in behind the same interface
//! without touching the generator.

use rand::RngCore;

use types::{Article, EventImpact, EventTone, Sector, SimDay, Symbol};

// =============================================================================
// EventSeed
// =============================================================================

/// A drawn event before publication: the numeric payload is final, the
/// display copy is not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSeed {
    /// Day the event fires.
    pub day: SimDay,
    /// Affected stock, `None` for market-wide shocks.
    pub symbol: Option<Symbol>,
    /// Company display name for corporate events.
    pub company: Option<String>,
    /// Sector of the affected stock, `None` for market-wide shocks.
    pub sector: Option<Sector>,
    /// Template event name.
    pub name: String,
    /// Template one-liner.
    pub description: String,
    pub tone: EventTone,
    pub impact: EventImpact,
}

impl EventSeed {
    /// Company name as it should appear in article copy.
    pub fn subject(&self) -> &str {
        self.company.as_deref().unwrap_or("The Market")
    }
}

// =============================================================================
// EventEnricher
// =============================================================================

/// Composes display metadata for a drawn event.
///
/// Implementations draw from the shared simulation stream, so a given seed
/// produces the same copy on every run.
pub trait EventEnricher: Send + Sync {
    /// Human-readable name for logging and debugging.
    fn name(&self) -> &str;

    /// Compose the headline, summary, and body for an event.
    fn article(&self, seed: &EventSeed, rng: &mut dyn RngCore) -> Article;

    /// Optional illustration reference for the composed headline.
    ///
    /// Keywords carry the event's context (sector, company, tone) for
    /// backends that select imagery by subject.
    #[allow(unused_variables)]
    fn image_ref(
        &self,
        headline: &str,
        keywords: &[&str],
        rng: &mut dyn RngCore,
    ) -> Option<String> {
        None
    }
}

/// Publishes events with the raw template text and no imagery.
///
/// Useful in tests and headless runs where article prose is noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEnricher;

impl EventEnricher for NoOpEnricher {
    fn name(&self) -> &str {
        "noop"
    }

    fn article(&self, seed: &EventSeed, _rng: &mut dyn RngCore) -> Article {
        Article {
            headline: seed.name.clone(),
            summary: seed.description.clone(),
            full_text: seed.description.clone(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn sample_seed() -> EventSeed {
        EventSeed {
            day: 201,
            symbol: Some("INNV".to_owned()),
            company: Some("Innovate Corp".to_owned()),
            sector: Some(Sector::Technology),
            name: "Major Acquisition".to_owned(),
            description: "Acquires a promising startup, expanding its market reach.".to_owned(),
            tone: EventTone::Positive,
            impact: EventImpact::Uniform { factor: 1.10 },
        }
    }

    #[test]
    fn test_noop_enricher_echoes_template_text() {
        let mut rng = StdRng::seed_from_u64(7);
        let seed = sample_seed();
        let article = NoOpEnricher.article(&seed, &mut rng);

        assert_eq!(article.headline, "Major Acquisition");
        assert_eq!(article.summary, seed.description);
        assert_eq!(article.full_text, seed.description);
        assert_eq!(
            NoOpEnricher.image_ref(&article.headline, &["Technology"], &mut rng),
            None
        );
    }

    #[test]
    fn test_subject_falls_back_to_the_market() {
        let mut seed = sample_seed();
        assert_eq!(seed.subject(), "Innovate Corp");

        seed.company = None;
        assert_eq!(seed.subject(), "The Market");
    }
}
