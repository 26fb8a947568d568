//! Capital-gains tax constants.
//!
//! Annual settlement consults only the Washington long-term pieces. The
//! federal rate and short-term brackets are carried alongside them but
//! never applied anywhere.

use crate::money::Cash;

/// Holding period, in days, beyond which a lot's gain counts as long-term.
pub const LONG_TERM_HOLDING_DAYS: f64 = 365.0;

/// Washington long-term capital-gains excise rate.
pub const WASHINGTON_LTCG_RATE: f64 = 0.07;

/// Annual Washington exemption: $262,000 of net long-term gains.
pub const WASHINGTON_CG_EXEMPTION: Cash = Cash(2_620_000_000);

/// Federal long-term rate. Defined but never consulted by settlement.
pub const FEDERAL_LTCG_RATE: f64 = 0.15;

/// One federal short-term bracket: gains up to `upper` tax at `rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    pub upper: Cash,
    pub rate: f64,
}

/// Federal short-term brackets. Defined but never consulted by settlement.
pub const FEDERAL_STCG_BRACKETS: [TaxBracket; 3] = [
    TaxBracket {
        upper: Cash(10_000_000),
        rate: 0.10,
    },
    TaxBracket {
        upper: Cash(50_000_000),
        rate: 0.20,
    },
    TaxBracket {
        upper: Cash(i64::MAX),
        rate: 0.30,
    },
];
