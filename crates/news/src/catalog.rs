//! Static event templates.
//!
//! Two catalogs drive the event generator: sector-scoped corporate news
//! (three positive and three negative stories per sector) and market-wide
//! macro shocks with per-sector impact overrides. Impacts are multiplicative
//! close factors; `1.15` lifts a close 15%, `0.85` knocks it down 15%.

use types::{EventTone, Sector};

// =============================================================================
// Template types
// =============================================================================

/// A corporate news story scoped to a single stock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorporateTemplate {
    /// Short event name, used as the article subject.
    pub name: &'static str,
    /// One-sentence description, used as the article summary.
    pub description: &'static str,
    /// Multiplicative impact on the affected stock's close.
    pub impact: f64,
}

/// A market-wide macro shock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub tone: EventTone,
    /// Impact applied to sectors without an override.
    pub default_impact: f64,
    /// Sector-specific impact overrides.
    pub overrides: &'static [(Sector, f64)],
}

// =============================================================================
// Macro catalog
// =============================================================================

/// Market-wide shocks, drawn uniformly when a macro event fires.
pub const MACRO_EVENTS: [MacroTemplate; 6] = [
    MacroTemplate {
        name: "Global Recession",
        description: "A severe global recession begins, impacting all sectors of the economy.",
        tone: EventTone::Negative,
        default_impact: 0.85,
        overrides: &[(Sector::Health, 0.95)],
    },
    MacroTemplate {
        name: "War Breaks Out",
        description: "A major geopolitical conflict erupts, causing market instability and boosting defense-related industries.",
        tone: EventTone::Negative,
        default_impact: 0.90,
        overrides: &[(Sector::Industrials, 1.15), (Sector::Energy, 1.10)],
    },
    MacroTemplate {
        name: "Widespread Famine",
        description: "Global crop failures lead to a widespread famine, disrupting supply chains and consumer spending.",
        tone: EventTone::Negative,
        default_impact: 0.88,
        overrides: &[(Sector::Industrials, 0.95)],
    },
    MacroTemplate {
        name: "Technological Boom",
        description: "A wave of innovation sparks a technological boom, lifting markets to new highs.",
        tone: EventTone::Positive,
        default_impact: 1.10,
        overrides: &[(Sector::Technology, 1.25), (Sector::Finance, 1.15)],
    },
    MacroTemplate {
        name: "Global Pandemic",
        description: "A new pandemic sweeps the globe, leading to lockdowns and economic disruption.",
        tone: EventTone::Negative,
        default_impact: 0.80,
        overrides: &[(Sector::Health, 1.20), (Sector::Technology, 1.10)],
    },
    MacroTemplate {
        name: "Peace Treaty Signed",
        description: "A historic peace treaty is signed, ending a major conflict and boosting global market confidence.",
        tone: EventTone::Positive,
        default_impact: 1.10,
        overrides: &[(Sector::Industrials, 0.90), (Sector::Energy, 0.95)],
    },
];

// =============================================================================
// Corporate catalog
// =============================================================================

const TECHNOLOGY_POSITIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "Breakthrough AI Chip",
        description: "Unveils a new chip, promising a 200% performance boost.",
        impact: 1.15,
    },
    CorporateTemplate {
        name: "Product Launch Success",
        description: "New flagship product receives rave reviews and record pre-orders.",
        impact: 1.12,
    },
    CorporateTemplate {
        name: "Major Acquisition",
        description: "Acquires a promising startup, expanding its market reach.",
        impact: 1.10,
    },
];

const TECHNOLOGY_NEGATIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "Major Security Breach",
        description: "Reports a massive data breach, compromising user data.",
        impact: 0.85,
    },
    CorporateTemplate {
        name: "Key Engineer Departs",
        description: "Visionary lead engineer unexpectedly resigns.",
        impact: 0.92,
    },
    CorporateTemplate {
        name: "Product Recall",
        description: "A critical flaw forces a recall of its latest product.",
        impact: 0.88,
    },
];

const HEALTH_POSITIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "FDA Approval",
        description: "Receives full FDA approval for its flagship drug.",
        impact: 1.20,
    },
    CorporateTemplate {
        name: "Breakthrough Research",
        description: "Publishes groundbreaking research with huge potential.",
        impact: 1.13,
    },
    CorporateTemplate {
        name: "Joins Major Health Index",
        description: "Stock is added to a prestigious healthcare index.",
        impact: 1.08,
    },
];

const HEALTH_NEGATIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "Clinical Trial Failure",
        description: "Phase 3 clinical trials for a key drug have failed.",
        impact: 0.75,
    },
    CorporateTemplate {
        name: "Patent Expiration",
        description: "Loses patent protection on a best-selling treatment.",
        impact: 0.90,
    },
    CorporateTemplate {
        name: "Unexpected Side Effects",
        description: "New reports of severe side effects linked to its product.",
        impact: 0.87,
    },
];

const ENERGY_POSITIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "New Efficiency Record",
        description: "Achieves a new world record for energy conversion efficiency.",
        impact: 1.18,
    },
    CorporateTemplate {
        name: "Government Subsidy",
        description: "Awarded a major government contract for green energy.",
        impact: 1.14,
    },
    CorporateTemplate {
        name: "Discovery of New Reserve",
        description: "Announces the discovery of a massive new energy reserve.",
        impact: 1.11,
    },
];

const ENERGY_NEGATIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "Environmental Accident",
        description: "Responsible for a significant environmental incident.",
        impact: 0.82,
    },
    CorporateTemplate {
        name: "Regulatory Changes",
        description: "New regulations will significantly increase operational costs.",
        impact: 0.91,
    },
    CorporateTemplate {
        name: "Infrastructure Failure",
        description: "A critical piece of infrastructure has failed, halting production.",
        impact: 0.89,
    },
];

const FINANCE_POSITIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "Positive Earnings Report",
        description: "Reports quarterly earnings far exceeding expectations.",
        impact: 1.16,
    },
    CorporateTemplate {
        name: "New Fintech Platform",
        description: "Launches an innovative new trading platform that goes viral.",
        impact: 1.12,
    },
    CorporateTemplate {
        name: "Interest Rate Hike",
        description: "A surprise interest rate hike is expected to boost profits.",
        impact: 1.09,
    },
];

const FINANCE_NEGATIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "Regulatory Fine",
        description: "Hit with a massive fine for regulatory non-compliance.",
        impact: 0.86,
    },
    CorporateTemplate {
        name: "Credit Rating Downgrade",
        description: "Company's credit rating is downgraded by a major agency.",
        impact: 0.90,
    },
    CorporateTemplate {
        name: "Trading System Outage",
        description: "A day-long outage costs millions and damages its reputation.",
        impact: 0.93,
    },
];

const INDUSTRIALS_POSITIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "Major Infrastructure Contract",
        description: "Wins a multi-billion dollar government infrastructure contract.",
        impact: 1.17,
    },
    CorporateTemplate {
        name: "Robotics Automation Deal",
        description: "Signs a deal to automate the factories of a major client.",
        impact: 1.12,
    },
    CorporateTemplate {
        name: "Supply Chain Innovation",
        description: "Develops a new logistics system, cutting costs by 30%.",
        impact: 1.10,
    },
];

const INDUSTRIALS_NEGATIVE: [CorporateTemplate; 3] = [
    CorporateTemplate {
        name: "Union Strikes",
        description: "Widespread union strikes have halted all production.",
        impact: 0.88,
    },
    CorporateTemplate {
        name: "Factory Accident",
        description: "A major factory accident leads to costly repairs and lawsuits.",
        impact: 0.91,
    },
    CorporateTemplate {
        name: "Raw Material Costs Spike",
        description: "A global shortage causes a sudden, sharp spike in material costs.",
        impact: 0.94,
    },
];

/// Corporate stories available for a given sector and tone.
pub fn corporate_templates(sector: Sector, tone: EventTone) -> &'static [CorporateTemplate] {
    match (sector, tone) {
        (Sector::Technology, EventTone::Positive) => &TECHNOLOGY_POSITIVE,
        (Sector::Technology, EventTone::Negative) => &TECHNOLOGY_NEGATIVE,
        (Sector::Health, EventTone::Positive) => &HEALTH_POSITIVE,
        (Sector::Health, EventTone::Negative) => &HEALTH_NEGATIVE,
        (Sector::Energy, EventTone::Positive) => &ENERGY_POSITIVE,
        (Sector::Energy, EventTone::Negative) => &ENERGY_NEGATIVE,
        (Sector::Finance, EventTone::Positive) => &FINANCE_POSITIVE,
        (Sector::Finance, EventTone::Negative) => &FINANCE_NEGATIVE,
        (Sector::Industrials, EventTone::Positive) => &INDUSTRIALS_POSITIVE,
        (Sector::Industrials, EventTone::Negative) => &INDUSTRIALS_NEGATIVE,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sector_has_three_stories_per_tone() {
        for sector in Sector::ALL {
            for tone in [EventTone::Positive, EventTone::Negative] {
                assert_eq!(
                    corporate_templates(sector, tone).len(),
                    3,
                    "{sector} {tone} pool size"
                );
            }
        }
    }

    #[test]
    fn test_corporate_impacts_match_their_tone() {
        for sector in Sector::ALL {
            for template in corporate_templates(sector, EventTone::Positive) {
                assert!(template.impact > 1.0, "{} should lift the close", template.name);
            }
            for template in corporate_templates(sector, EventTone::Negative) {
                assert!(template.impact < 1.0, "{} should cut the close", template.name);
            }
        }
    }

    #[test]
    fn test_macro_default_impacts_match_their_tone() {
        // Overrides may run against the grain (war lifts Industrials), but the
        // default factor always follows the headline tone.
        for template in &MACRO_EVENTS {
            match template.tone {
                EventTone::Positive => assert!(template.default_impact > 1.0, "{}", template.name),
                EventTone::Negative => assert!(template.default_impact < 1.0, "{}", template.name),
            }
        }
    }

    #[test]
    fn test_recession_spares_health() {
        let recession = &MACRO_EVENTS[0];
        assert_eq!(recession.name, "Global Recession");
        assert_eq!(recession.overrides, &[(Sector::Health, 0.95)]);
    }
}
