//! The listed universe and agent name pools.
//!
//! Fifty companies across five sectors, forty-nine fund names, and the
//! feature pool fund networks draw their input neurons from. All static;
//! genesis randomizes prices, weights, and schedules around these tables.

use types::Sector;

/// A company listing: symbol, display name, sector.
pub type Listing = (&'static str, &'static str, Sector);

/// Every listed company. Genesis creates one stock per entry.
pub const LISTINGS: [Listing; 50] = [
    ("INNV", "Innovate Corp", Sector::Technology),
    ("TECH", "TechGen Inc.", Sector::Technology),
    ("HLTH", "HealthSphere", Sector::Health),
    ("ENRG", "Syner-G", Sector::Energy),
    ("FINX", "FinEx Solutions", Sector::Finance),
    ("QUAN", "Quantum Leap", Sector::Technology),
    ("CYBR", "CyberSec Corp", Sector::Technology),
    ("BIOF", "BioFuture Labs", Sector::Health),
    ("SOLR", "Solaris Energy", Sector::Energy),
    ("DRON", "DroneWorks", Sector::Technology),
    ("DATA", "DataMine Inc.", Sector::Technology),
    ("ROBO", "RoboGenix", Sector::Technology),
    ("AQUA", "AquaPure", Sector::Industrials),
    ("FUTR", "Futuristics", Sector::Industrials),
    ("SPCE", "SpaceWarp", Sector::Industrials),
    ("NANO", "NanoBuild", Sector::Technology),
    ("VRTX", "Vertex Realty", Sector::Finance),
    ("GAME", "GameSphere", Sector::Technology),
    ("MEDI", "MediCare+", Sector::Health),
    ("AGRI", "AgriGrow", Sector::Industrials),
    ("EDGE", "Edge AI Systems", Sector::Technology),
    ("CLD", "CloudCore Inc.", Sector::Technology),
    ("VR", "Virtual Reality Labs", Sector::Technology),
    ("IOT", "Internet of Things Co.", Sector::Technology),
    ("SFTW", "Software Solutions", Sector::Technology),
    ("LOGI", "LogiCore", Sector::Technology),
    ("GENE", "Genomics PLC", Sector::Health),
    ("TELE", "TeleHealth Connect", Sector::Health),
    ("SURG", "Surgical Systems", Sector::Health),
    ("VITA", "VitaPharm", Sector::Health),
    ("CARE", "CareBotics", Sector::Health),
    ("IMMU", "ImmunoTherapeutics", Sector::Health),
    ("HYDR", "HydroGen Power", Sector::Energy),
    ("WIND", "Windmill Corp", Sector::Energy),
    ("NUCL", "Nuclear Fusion Inc.", Sector::Energy),
    ("BATT", "BatteryTech", Sector::Energy),
    ("GEO", "GeoThermal Dynamics", Sector::Energy),
    ("GRID", "SmartGrid Systems", Sector::Energy),
    ("INSR", "InsuranTech", Sector::Finance),
    ("PAY", "PaySphere", Sector::Finance),
    ("LEND", "LendLogic", Sector::Finance),
    ("BLOK", "BlockChain Ventures", Sector::Finance),
    ("TRDE", "TradeFlow", Sector::Finance),
    ("WEAL", "WealthWise", Sector::Finance),
    ("AERO", "AeroDynamics", Sector::Industrials),
    ("SHIP", "Global Shipping", Sector::Industrials),
    ("BLD", "BuildRight Construction", Sector::Industrials),
    ("AUTO", "AutoDrive Systems", Sector::Industrials),
    ("CHEM", "ChemiCorp", Sector::Industrials),
    ("RAIL", "RailWorks Logistics", Sector::Industrials),
];

/// Fund names for the AI investor population, one investor per name.
pub const FUND_NAMES: [&str; 49] = [
    "Nexus Alpha",
    "Quantum Blue",
    "Momentum Prime",
    "Value Core",
    "Volatility Edge",
    "Trend Rider",
    "Contrarian Fund",
    "Growth Engine",
    "Omega Capital",
    "Stellar Ascent",
    "Apex Dynamics",
    "Momentum Machines",
    "Vertex Ventures",
    "Orion Capital",
    "Helios Holdings",
    "Zenith Wealth",
    "Polaris Partners",
    "Crestview Capital",
    "Bluechip Bets",
    "Phoenix Funds",
    "Galactic Growth",
    "Titan Traders",
    "Elysian Equities",
    "Vanguard Vision",
    "Sierra Strategies",
    "Neptune Navigators",
    "Apollo Analytics",
    "Meridian Markets",
    "Odyssey Ops",
    "Cascade Capital",
    "Ironclad Investments",
    "Summit Seekers",
    "Delta Derivatives",
    "Alpha Wave",
    "Beta Builders",
    "Gamma Gains",
    "Theta Traders",
    "Intrinsic Value",
    "Market Mavericks",
    "Axiom Arbitrage",
    "Cygnus Capital",
    "Dragonfly Dynamics",
    "Echo Equities",
    "Fusion Financial",
    "Griffin Growth",
    "Hydra Holdings",
    "Infinity Investments",
    "Javelin Ventures",
    "Kestrel Capital",
];

/// Feature names fund networks may wire as input neurons.
///
/// Some entries have no matching indicator output; a network holding one
/// simply never receives signal on that input. The pool is wider than the
/// indicator set on purpose, so strategies vary in how much of their wiring
/// is live.
pub const NEURON_POOL: [&str; 33] = [
    "momentum_5d",
    "momentum_10d",
    "momentum_20d",
    "momentum_50d",
    "trend_price_vs_sma_10",
    "trend_price_vs_sma_20",
    "trend_price_vs_sma_50",
    "trend_price_vs_sma_100",
    "trend_price_vs_sma_200",
    "trend_sma_crossover_10_20",
    "trend_sma_crossover_20_50",
    "trend_sma_crossover_50_200",
    "trend_price_vs_ema_10",
    "trend_price_vs_ema_20",
    "trend_price_vs_ema_50",
    "trend_ema_crossover_10_20",
    "trend_ema_crossover_20_50",
    "oscillator_rsi_7_contrarian",
    "oscillator_rsi_14_contrarian",
    "oscillator_rsi_21_contrarian",
    "oscillator_stochastic_k_14_contrarian",
    "oscillator_stochastic_d_14_contrarian",
    "oscillator_cci_20_contrarian",
    "oscillator_williams_r_14_contrarian",
    "volatility_bollinger_bandwidth_20",
    "volatility_bollinger_percent_b_20",
    "volatility_atr_14",
    "volatility_historical_20d",
    "volume_obv_trend_20d",
    "volume_cmf_20",
    "volume_avg_20d_spike",
    "macd_histogram",
    "macd_divergence_10d",
];

/// Feature names a stock's corporate decision network draws from.
pub const CORPORATE_NEURONS: [&str; 6] = [
    "self_momentum_50d",
    "self_volatility_atr_14",
    "price_vs_ath",
    "market_momentum_50d",
    "sector_momentum_50d",
    "opportunity_score",
];

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_symbols_are_unique() {
        let symbols: BTreeSet<_> = LISTINGS.iter().map(|(symbol, _, _)| symbol).collect();
        assert_eq!(symbols.len(), LISTINGS.len());
    }

    #[test]
    fn test_every_sector_is_listed() {
        for sector in Sector::ALL {
            assert!(
                LISTINGS.iter().any(|(_, _, s)| *s == sector),
                "no listing for {sector}"
            );
        }
    }

    #[test]
    fn test_fund_names_are_unique() {
        let names: BTreeSet<_> = FUND_NAMES.iter().collect();
        assert_eq!(names.len(), FUND_NAMES.len());
    }
}
