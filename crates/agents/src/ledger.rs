//! Lot-level portfolio bookkeeping.
//!
//! Buys append discrete lots, never merging; sells consume lots
//! oldest-purchase-first. Each consumed lot held past the long-term
//! threshold adds its pro-rated gain or loss to the investor's annual
//! Washington capital-gains accumulator, which [`settle_annual_taxes`]
//! drains once a simulated year.
//!
//! Both trade operations fail silently: an unaffordable buy or an
//! oversized sell leaves the investor untouched and returns `false`.
//! Callers that pre-validate can ignore the return value.

use std::collections::BTreeMap;

use types::tax::{LONG_TERM_HOLDING_DAYS, WASHINGTON_CG_EXEMPTION, WASHINGTON_LTCG_RATE};
use types::{Cash, Investor, Price, Quantity, ShareLot, Timestamp};

/// Append a purchase lot and debit cash.
///
/// No-op if `shares` is zero or the cost exceeds available cash.
pub fn buy(
    investor: &mut Investor,
    symbol: &str,
    shares: Quantity,
    price: Price,
    now: Timestamp,
    features: BTreeMap<String, f64>,
) -> bool {
    if shares.is_zero() {
        return false;
    }
    let cost = price * shares;
    if investor.cash < cost {
        return false;
    }
    investor.cash -= cost;
    investor.position_or_insert(symbol).lots.push(ShareLot {
        purchase_time: now,
        purchase_price: price,
        shares,
        purchase_features: features,
    });
    true
}

/// Sell `shares` at `price`, consuming lots oldest-first.
///
/// No-op if `shares` is zero or exceeds the held total. The full proceeds
/// are credited immediately regardless of per-lot tax classification; each
/// consumed lot held longer than [`LONG_TERM_HOLDING_DAYS`] accrues
/// `(price - purchase_price) * consumed` into the annual long-term
/// accumulator. An emptied position is removed from the portfolio.
pub fn sell(
    investor: &mut Investor,
    symbol: &str,
    shares: Quantity,
    price: Price,
    now: Timestamp,
) -> bool {
    if shares.is_zero() || investor.shares_of(symbol) < shares {
        return false;
    }
    investor.cash += price * shares;

    let mut accrued = Cash::ZERO;
    let Some(item) = investor.position_mut(symbol) else {
        return false;
    };
    item.lots.sort_by_key(|lot| lot.purchase_time);

    let mut remaining = shares;
    item.lots.retain_mut(|lot| {
        if remaining.is_zero() {
            return true;
        }
        let consumed = lot.shares.min(remaining);
        if lot.holding_days(now) > LONG_TERM_HOLDING_DAYS {
            accrued += (price - lot.purchase_price) * consumed;
        }
        if lot.shares <= remaining {
            remaining = remaining.saturating_sub(lot.shares);
            false
        } else {
            lot.shares = lot.shares.saturating_sub(remaining);
            remaining = Quantity::ZERO;
            true
        }
    });

    let emptied = item.is_empty();
    if emptied {
        investor.portfolio.retain(|item| item.symbol != symbol);
    }
    investor.wa_annual_net_ltcg += accrued;
    true
}

/// Washington long-term capital-gains tax due on the year's net gains.
///
/// Gains at or under the exemption owe nothing; only the excess is taxed.
pub fn washington_tax_due(investor: &Investor) -> Cash {
    if investor.wa_annual_net_ltcg <= WASHINGTON_CG_EXEMPTION {
        return Cash::ZERO;
    }
    let taxable = investor.wa_annual_net_ltcg - WASHINGTON_CG_EXEMPTION;
    Cash::from_float(taxable.to_float() * WASHINGTON_LTCG_RATE)
}

/// Annual settlement: debit any tax due and reset the accumulator.
pub fn settle_annual_taxes(investor: &mut Investor) {
    let due = washington_tax_due(investor);
    if due.is_positive() {
        investor.total_taxes_paid += due;
        investor.cash -= due;
    }
    investor.wa_annual_net_ltcg = Cash::ZERO;
}

// =============================================================================
// Tests
// =============================================================================
