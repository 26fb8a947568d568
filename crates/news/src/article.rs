//! Local article composition.
//!
//! [`TemplateEnricher`] assembles financial-news prose from vocabulary pools
//! keyed by event tone, in the shape of a wire-service report: an opener, a
//! detail line, market context, an analyst quote most of the time, and an
//! outlook. No hosted text backend is involved; every draw comes from the
//! shared simulation stream, so articles are reproducible per seed.

use rand::{Rng, RngCore};

use types::{Article, EventTone, Sector};

use crate::enrich::{EventEnricher, EventSeed};

// =============================================================================
// Vocabulary
// =============================================================================

const POSITIVE_HEADLINES: [&str; 9] = [
    "Surges After Announcing",
    "Rallies on News of",
    "Poised for Growth Following",
    "Jumps as Market Cheers",
    "Announces Groundbreaking",
    "Gets a Boost from",
    "Shares Climb as Unveils",
    "Stock Soars on Positive Outlook",
    "Gains Momentum with",
];

const NEGATIVE_HEADLINES: [&str; 9] = [
    "Plummets Amid Fears of",
    "Tumbles After Revealing",
    "Faces Headwinds Due to",
    "Stock Drops on Concern Over",
    "Issues Warning Regarding",
    "Braces for Impact of",
    "Investors Anxious as Faces",
    "Uncertainty Looms Over Following",
    "Under Pressure Amid",
];

const POSITIVE_OPENERS: [&str; 5] = [
    "In a significant move that buoyed investor confidence,",
    "Shares of {company} saw a dramatic uptick today following the announcement of",
    "The market responded with enthusiasm to news from {company} regarding",
    "A wave of optimism swept through the markets today after the confirmation of",
    "{company} captured the market's attention on Tuesday with news of",
];

const NEGATIVE_OPENERS: [&str; 5] = [
    "A shadow was cast over the markets today as {company} confirmed troubling reports of",
    "{company} is facing a challenging period ahead after it revealed",
    "Investor sentiment soured for {company} following the release of news concerning",
    "Global markets are on edge following the breaking news of",
    "An air of uncertainty surrounds {company} today, as the firm grapples with",
];

const POSITIVE_DETAILS: [&str; 4] = [
    "This development is seen by many as a validation of the company's strategic direction.",
    "The announcement is expected to solidify its market position and create new revenue streams.",
    "Experts believe this could be a major catalyst for future earnings, pending successful execution.",
    "The move is widely interpreted as a proactive step to address market demands and stay ahead of the competition.",
];

const NEGATIVE_DETAILS: [&str; 4] = [
    "The full financial impact of this event remains to be seen, but early indicators are concerning.",
    "This raises serious questions about the company's internal controls and risk management protocols.",
    "The company's leadership is now under intense pressure to formulate a response and mitigate the damage.",
    "The ripple effects of this event could be felt across the economy for months to come, impacting supply chains and consumer confidence.",
];

const ANALYST_TITLES: [&str; 6] = [
    "a senior market analyst at OmniCap",
    "a technology sector expert from Innovest",
    "a lead researcher at Capital Insights",
    "a veteran strategist with MacroView Analytics",
    "an industry watchdog from SectorPulse",
    "a geopolitical risk consultant from Strata-G",
];

const POSITIVE_QUOTES: [&str; 3] = [
    r#""This is a clear and decisive move by {company}. It demonstrates their ability to innovate and adapt in a rapidly changing landscape," commented {analyst}. "We're seeing a fundamental strength here that could set a new benchmark for the industry.""#,
    r#""The market has been waiting for a positive signal, and this is it. We are upgrading our rating to 'Buy' based on this news," stated {analyst}."#,
    r#""This political development is exactly the kind of catalyst the markets needed to break out of their recent slump," explained {analyst}. "It removes a significant layer of uncertainty.""#,
];

const NEGATIVE_QUOTES: [&str; 3] = [
    r#""The situation is still developing, but this is certainly a major headwind for {company}," stated {analyst}. "The key question now is how leadership will respond and whether they can restore confidence. We advise a cautious 'Hold' for now.""#,
    r#""This was an unforced error, and it's going to take significant time and resources to rebuild trust with both consumers and investors," said {analyst}."#,
    r#""Geopolitical instability or natural disasters of this scale introduce a level of uncertainty that markets simply hate," said {analyst}. "Expect increased volatility as the situation unfolds, with safe-haven assets likely outperforming.""#,
];

const MARKET_CONTEXT: [&str; 4] = [
    "This news comes amid a period of heightened volatility in the {sector} sector.",
    "The development is particularly noteworthy given the current macroeconomic climate of rising inflation.",
    "In a market hungry for direction, this event has provided a clear focal point for traders and algorithms alike.",
    "The event serves as a stark reminder of how interconnected global markets and geopolitical events are in the modern economy.",
];

const POSITIVE_OUTLOOKS: [&str; 3] = [
    "Looking ahead, the company appears well-positioned to capitalize on this momentum.",
    "Analysts will be watching the next earnings call closely to see if this development translates to the bottom line.",
    "This move could pave the way for further innovation and market share capture in the coming quarters.",
];

const NEGATIVE_OUTLOOKS: [&str; 4] = [
    "The company faces a challenging road to recovery, with several quarters of uncertainty likely ahead.",
    "The full repercussions of this development may not be clear for some time, as secondary effects are still being assessed.",
    "This event will likely be a drag on performance for the foreseeable future, potentially impacting their next earnings report.",
    "The long-term economic consequences are still being calculated, but the short-term outlook appears grim for the affected regions and sectors.",
];

/// Chance the analyst quote paragraph is dropped for variety.
const QUOTE_SKIP_PROBABILITY: f64 = 0.15;

fn pick(rng: &mut dyn RngCore, pool: &[&'static str]) -> &'static str {
    pool[rng.random_range(0..pool.len())]
}

// =============================================================================
// TemplateEnricher
// =============================================================================

/// Composes articles from the static vocabulary pools.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEnricher;

impl EventEnricher for TemplateEnricher {
    fn name(&self) -> &str {
        "template"
    }

    fn article(&self, seed: &EventSeed, rng: &mut dyn RngCore) -> Article {
        let company = seed.subject();

        let (verbs, openers, details, quotes, outlooks) = match seed.tone {
            EventTone::Positive => (
                &POSITIVE_HEADLINES[..],
                &POSITIVE_OPENERS[..],
                &POSITIVE_DETAILS[..],
                &POSITIVE_QUOTES[..],
                &POSITIVE_OUTLOOKS[..],
            ),
            EventTone::Negative => (
                &NEGATIVE_HEADLINES[..],
                &NEGATIVE_OPENERS[..],
                &NEGATIVE_DETAILS[..],
                &NEGATIVE_QUOTES[..],
                &NEGATIVE_OUTLOOKS[..],
            ),
        };

        let headline = format!("{} {} {}", company, pick(rng, verbs), seed.name);

        let opener = pick(rng, openers).replace("{company}", company);
        let detail = pick(rng, details);
        let quote = pick(rng, quotes)
            .replace("{company}", company)
            .replace("{analyst}", pick(rng, &ANALYST_TITLES));
        let outlook = pick(rng, outlooks);

        let scope = seed.sector.map_or("Global Markets", Sector::as_str);
        let context = pick(rng, &MARKET_CONTEXT).replace("{sector}", scope);

        let mut paragraphs = vec![format!("{} {}.", opener, seed.description), detail.to_owned(), context];
        if rng.random::<f64>() > QUOTE_SKIP_PROBABILITY {
            paragraphs.push(quote);
        }
        paragraphs.push(outlook.to_owned());

        Article {
            headline,
            summary: seed.description.clone(),
            full_text: paragraphs.join("\n\n"),
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

    use types::EventImpact;

    use super::*;

    fn corporate_seed() -> EventSeed {
        EventSeed {
            day: 210,
            symbol: Some("HLTH".to_owned()),
            company: Some("HealthSphere".to_owned()),
            sector: Some(Sector::Health),
            name: "FDA Approval".to_owned(),
            description: "Receives full FDA approval for its flagship drug.".to_owned(),
            tone: EventTone::Positive,
            impact: EventImpact::Uniform { factor: 1.20 },
        }
    }

    fn macro_seed() -> EventSeed {
        EventSeed {
            day: 400,
            symbol: None,
            company: None,
            sector: None,
            name: "Global Recession".to_owned(),
            description: "A severe global recession begins, impacting all sectors of the economy."
                .to_owned(),
            tone: EventTone::Negative,
            impact: EventImpact::BySector {
                default: 0.85,
                overrides: std::collections::BTreeMap::new(),
            },
        }
    }

    #[test]
    fn test_headline_frames_company_and_event() {
        let mut rng = StdRng::seed_from_u64(3);
        let article = TemplateEnricher.article(&corporate_seed(), &mut rng);

        assert!(article.headline.starts_with("HealthSphere "));
        assert!(article.headline.ends_with(" FDA Approval"));
        assert_eq!(article.summary, corporate_seed().description);
    }

    #[test]
    fn test_macro_articles_speak_for_the_market() {
        let mut rng = StdRng::seed_from_u64(3);
        let article = TemplateEnricher.article(&macro_seed(), &mut rng);

        assert!(article.headline.starts_with("The Market "));
        assert!(!article.full_text.contains("{company}"));
        assert!(!article.full_text.contains("{analyst}"));
        assert!(!article.full_text.contains("{sector}"));
    }

    #[test]
    fn test_same_seed_same_article() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);

        for _ in 0..20 {
            assert_eq!(
                TemplateEnricher.article(&corporate_seed(), &mut a),
                TemplateEnricher.article(&corporate_seed(), &mut b)
            );
        }
    }

    #[test]
    fn test_quote_paragraph_is_usually_but_not_always_present() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut lengths = std::collections::BTreeSet::new();

        for _ in 0..300 {
            let article = TemplateEnricher.article(&corporate_seed(), &mut rng);
            assert!(article.full_text.contains(&corporate_seed().description));
            lengths.insert(article.full_text.split("\n\n").count());
        }

        // Four paragraphs when the quote is skipped, five when it lands.
        assert_eq!(lengths, std::collections::BTreeSet::from([4, 5]));
    }
}
