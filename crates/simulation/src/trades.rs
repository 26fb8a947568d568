//! Manual trading: the human player's buy and sell entry points.
//!
//! Both operations take the state by reference and return a settled copy;
//! the input is never touched. Anything invalid — unknown player, unknown
//! or delisted symbol, zero shares, an unaffordable buy, an oversized
//! sell — returns the copy unchanged, with no error surface. Fills go
//! through the same lot ledger the funds use, so manual sales accrue
//! long-term gains exactly like autonomous ones; manual lots just carry no
//! indicator snapshot.

use std::collections::BTreeMap;

use types::{Price, Quantity, SimulationState};

/// Buy `shares` of `symbol` at the latest close, debiting the player's cash.
pub fn player_buy(
    state: &SimulationState,
    player_id: &str,
    symbol: &str,
    shares: Quantity,
) -> SimulationState {
    let mut next = state.clone();
    let Some(price) = quote(&next, symbol) else {
        return next;
    };
    let clock = next.clock;
    if let Some(player) = next.investor_mut(player_id) {
        // An unaffordable or empty order falls through silently.
        agents::buy(player, symbol, shares, price, clock, BTreeMap::new());
    }
    next
}

/// Sell `shares` of `symbol` at the latest close, crediting the player's
/// cash and consuming lots oldest-first.
pub fn player_sell(
    state: &SimulationState,
    player_id: &str,
    symbol: &str,
    shares: Quantity,
) -> SimulationState {
    let mut next = state.clone();
    let Some(price) = quote(&next, symbol) else {
        return next;
    };
    let clock = next.clock;
    if let Some(player) = next.investor_mut(player_id) {
        // An oversized or empty order falls through silently.
        agents::sell(player, symbol, shares, price, clock);
    }
    next
}

/// Latest close for a live symbol; `None` blocks the trade.
fn quote(state: &SimulationState, symbol: &str) -> Option<Price> {
    let stock = state.stock(symbol)?;
    if stock.delisted {
        return None;
    }
    stock.last_close()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use types::{
        Cash, CorporateActionWeights, CorporateAi, HUMAN_INVESTOR_ID, Investor, OhlcBar,
        PortfolioItem, SECS_PER_DAY, Sector, ShareLot, Stock, Strategy,
    };

    use super::*;

    fn market(close: f64, cash: f64) -> SimulationState {
        let stock = Stock {
            symbol: "AAA".to_owned(),
            name: "AAA Corp".to_owned(),
            sector: Sector::Technology,
            history: vec![OhlcBar::flat(200, Price::from_float(close))],
            delisted: false,
            shares_outstanding: 100_000_000,
            eps: 2.0,
            corporate_ai: CorporateAi {
                next_action_day: 300,
                weights: CorporateActionWeights::default(),
                learning_rate: 0.02,
            },
        };
        let player = Investor {
            id: HUMAN_INVESTOR_ID.to_owned(),
            name: "You".to_owned(),
            human: true,
            strategy_name: None,
            strategy: Strategy::Simple {
                price_momentum_weight: 0.0,
                volatility_weight: 0.0,
                risk_aversion: 999.0,
            },
            cash: Cash::from_float(cash),
            portfolio: Vec::new(),
            portfolio_history: Vec::new(),
            tax_loss_carryforward: Cash::ZERO,
            total_taxes_paid: Cash::ZERO,
            wa_annual_net_ltcg: Cash::ZERO,
            recent_trades: Vec::new(),
        };
        SimulationState {
            day: 200,
            clock: 400 * SECS_PER_DAY,
            stocks: vec![stock],
            investors: vec![player],
            active_event: None,
            event_history: Vec::new(),
            market_index_history: Vec::new(),
            next_corporate_event_day: 250,
            next_macro_event_day: 400,
        }
    }

    fn seed_lot(state: &mut SimulationState, price: f64, shares: u64, time: u64) {
        let player = state.investor_mut(HUMAN_INVESTOR_ID).unwrap();
        let lot = ShareLot {
            purchase_time: time,
            purchase_price: Price::from_float(price),
            shares: Quantity(shares),
            purchase_features: BTreeMap::new(),
        };
        match player.position_mut("AAA") {
            Some(item) => item.lots.push(lot),
            None => player.portfolio.push(PortfolioItem {
                symbol: "AAA".to_owned(),
                lots: vec![lot],
            }),
        }
    }

    #[test]
    fn test_buy_debits_cash_and_appends_a_bare_lot() {
        let state = market(10.0, 100.0);
        let next = player_buy(&state, HUMAN_INVESTOR_ID, "AAA", Quantity(5));

        let player = next.investor(HUMAN_INVESTOR_ID).unwrap();
        assert_eq!(player.cash, Cash::from_float(50.0));
        assert_eq!(player.shares_of("AAA"), 5);

        let lot = &player.position("AAA").unwrap().lots[0];
        assert_eq!(lot.purchase_time, next.clock);
        assert_eq!(lot.purchase_price, Price::from_float(10.0));
        // Manual trades carry no indicator snapshot and are never graded.
        assert!(lot.purchase_features.is_empty());
        assert!(player.recent_trades.is_empty());

        // The input state is untouched.
        assert_eq!(
            state.investor(HUMAN_INVESTOR_ID).unwrap().cash,
            Cash::from_float(100.0)
        );
    }

    #[test]
    fn test_unaffordable_buy_returns_the_state_unchanged() {
        let state = market(10.0, 100.0);
        let next = player_buy(&state, HUMAN_INVESTOR_ID, "AAA", Quantity(11));
        assert_eq!(next, state);
    }

    #[test]
    fn test_invalid_inputs_return_the_state_unchanged() {
        let state = market(10.0, 100.0);
        assert_eq!(
            player_buy(&state, HUMAN_INVESTOR_ID, "AAA", Quantity::ZERO),
            state
        );
        assert_eq!(
            player_buy(&state, HUMAN_INVESTOR_ID, "ZZZ", Quantity(5)),
            state
        );
        assert_eq!(player_buy(&state, "nobody", "AAA", Quantity(5)), state);
        assert_eq!(
            player_sell(&state, HUMAN_INVESTOR_ID, "ZZZ", Quantity(5)),
            state
        );
        assert_eq!(player_sell(&state, "nobody", "AAA", Quantity(5)), state);
    }

    #[test]
    fn test_delisted_symbol_blocks_both_sides() {
        let mut state = market(10.0, 100.0);
        seed_lot(&mut state, 5.0, 10, 0);
        state.stocks[0].delisted = true;

        assert_eq!(
            player_buy(&state, HUMAN_INVESTOR_ID, "AAA", Quantity(5)),
            state
        );
        assert_eq!(
            player_sell(&state, HUMAN_INVESTOR_ID, "AAA", Quantity(5)),
            state
        );
    }

    #[test]
    fn test_sell_consumes_oldest_lot_and_accrues_long_term_gain() {
        let mut state = market(10.0, 100.0);
        // One lot from the epoch (long-term by now), one from yesterday.
        seed_lot(&mut state, 4.0, 10, 0);
        let yesterday = state.clock - SECS_PER_DAY;
        seed_lot(&mut state, 9.0, 10, yesterday);

        let next = player_sell(&state, HUMAN_INVESTOR_ID, "AAA", Quantity(10));
        let player = next.investor(HUMAN_INVESTOR_ID).unwrap();

        assert_eq!(player.cash, Cash::from_float(200.0));
        assert_eq!(player.shares_of("AAA"), 10);
        // The epoch lot went first; its (10 - 4) * 10 gain is long-term.
        assert_eq!(
            player.position("AAA").unwrap().lots[0].purchase_price,
            Price::from_float(9.0)
        );
        assert_eq!(player.wa_annual_net_ltcg, Cash::from_float(60.0));
    }

    #[test]
    fn test_short_term_manual_sale_accrues_nothing() {
        let mut state = market(10.0, 100.0);
        let last_month = state.clock - 30 * SECS_PER_DAY;
        seed_lot(&mut state, 4.0, 10, last_month);

        let next = player_sell(&state, HUMAN_INVESTOR_ID, "AAA", Quantity(10));
        let player = next.investor(HUMAN_INVESTOR_ID).unwrap();
        assert_eq!(player.cash, Cash::from_float(200.0));
        assert_eq!(player.wa_annual_net_ltcg, Cash::ZERO);
    }

    #[test]
    fn test_oversell_returns_the_state_unchanged() {
        let mut state = market(10.0, 100.0);
        seed_lot(&mut state, 4.0, 10, 0);
        let next = player_sell(&state, HUMAN_INVESTOR_ID, "AAA", Quantity(11));
        assert_eq!(next, state);
    }

    #[test]
    fn test_selling_out_removes_the_position() {
        let mut state = market(10.0, 100.0);
        seed_lot(&mut state, 4.0, 10, 0);
        let next = player_sell(&state, HUMAN_INVESTOR_ID, "AAA", Quantity(10));
        let player = next.investor(HUMAN_INVESTOR_ID).unwrap();
        assert!(player.position("AAA").is_none());
    }
}
