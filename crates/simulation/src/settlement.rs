//! End-of-day settlement: the one place the market moves on.
//!
//! Every crossing of a UTC midnight runs the same sequence over the whole
//! state: reprice closes under tax drag, inflation, and any live event;
//! let every fund grade past trades and place new ones; finalize volume;
//! mark every account; extend the index; settle annual taxes when a year
//! closes; and open the next day's bar.
//!
//! Order matters. Events reprice the closes before any fund reads them,
//! funds trade before volume finalizes, and the next day's flat bar opens
//! only after every account is marked at today's close.

use std::collections::BTreeMap;

use rand::Rng;

use news::EventEnricher;
use types::{
    OhlcBar, Price, Quantity, RecentTrade, SimDay, SimulationState, Symbol, TradeSide,
};

/// Fraction of available cash a fund commits to a single buy.
const BUY_CASH_FRACTION: f64 = 0.2;
/// Fraction of a held position a fund unwinds on a sell signal.
const SELL_POSITION_FRACTION: f64 = 0.5;
/// Days until a placed trade is graded by the learning pass.
const OUTCOME_HORIZON_DAYS: SimDay = 5;
/// Daily inflation credit applied to every close.
const INFLATION_RATE: f64 = 0.0005;
/// Upper bound of the ambient volume noise added at each close.
const AMBIENT_VOLUME_NOISE: f64 = 50_000.0;
/// Days per simulated tax year.
const DAYS_PER_YEAR: SimDay = 365;

/// Settle one day boundary in place. The clock is the runner's business;
/// only `day` moves here.
pub fn run_end_of_day<R: Rng>(
    state: &mut SimulationState,
    rng: &mut R,
    enricher: &dyn EventEnricher,
) {
    let next_day = state.day + 1;
    state.day = next_day;
    state.active_event = None;

    // Phase 1: a due macro shock lands now and reschedules itself.
    if next_day >= state.next_macro_event_day {
        let event = news::draw_macro_event(rng, next_day, enricher);
        state.push_event(event);
        state.next_macro_event_day = news::next_macro_event_day(rng, next_day);
    }

    // Phase 2: reprice every close. A live event scales the stocks it
    // touches; on quiet days each stock rolls its own corporate-news
    // chance, and the first hit becomes the day's event for everyone.
    let mut traded: BTreeMap<Symbol, u64> = BTreeMap::new();
    for i in 0..state.stocks.len() {
        if state.stocks[i].delisted {
            continue;
        }
        traded.insert(state.stocks[i].symbol.clone(), 0);
        let Some(close) = state.stocks[i].last_close() else {
            continue;
        };

        let drag = state.stocks[i].sector.bo_tax_rate() / DAYS_PER_YEAR as f64;
        let mut price = close.to_float() * (1.0 - drag + INFLATION_RATE);

        if let Some(event) = &state.active_event {
            if let Some(factor) =
                event.price_factor(&state.stocks[i].symbol, state.stocks[i].sector)
            {
                price *= factor;
            }
        } else if rng.random::<f64>() < news::CORPORATE_EVENT_PROBABILITY {
            let event = news::draw_corporate_event(rng, next_day, &state.stocks[i], enricher);
            price *= event.impact.factor_for(state.stocks[i].sector);
            state.push_event(event);
        }

        if let Some(bar) = state.stocks[i].last_bar_mut() {
            bar.close = Price::from_float_floored(price);
        }
    }

    // Phase 3: every fund grades its due trades, then scores each stock at
    // the fresh close. Indicators are computed once per stock; every fund
    // reads the same snapshot.
    let features_by_symbol: BTreeMap<Symbol, BTreeMap<String, f64>> = state
        .stocks
        .iter()
        .filter(|stock| !stock.delisted)
        .map(|stock| {
            (
                stock.symbol.clone(),
                quant::compute_indicators(&stock.history),
            )
        })
        .collect();

    let clock = state.clock;
    let stocks = &state.stocks;
    for investor in &mut state.investors {
        agents::evaluate_due_trades(investor, stocks);
        if investor.strategy.network().is_none() {
            continue;
        }
        let risk_aversion = investor.strategy.risk_aversion();

        for stock in stocks.iter().filter(|stock| !stock.delisted) {
            let Some(features) = features_by_symbol.get(&stock.symbol) else {
                continue;
            };
            let Some(price) = stock.last_close() else {
                continue;
            };
            let Some(network) = investor.strategy.network() else {
                break;
            };
            let evaluation = agents::forward(network, features);

            if evaluation.score > risk_aversion {
                let budget = investor.cash.to_float() * BUY_CASH_FRACTION;
                let shares = Quantity((budget / price.to_float()).floor() as u64);
                if !shares.is_zero()
                    && agents::buy(investor, &stock.symbol, shares, price, clock, features.clone())
                {
                    *traded.entry(stock.symbol.clone()).or_insert(0) += shares.raw();
                    investor.recent_trades.push(RecentTrade {
                        symbol: stock.symbol.clone(),
                        day: next_day,
                        side: TradeSide::Buy,
                        shares,
                        price,
                        features: features.clone(),
                        activations: Some(evaluation.trace),
                        outcome_day: next_day + OUTCOME_HORIZON_DAYS,
                    });
                }
            } else if evaluation.score < -risk_aversion {
                let owned = investor.shares_of(&stock.symbol);
                let shares =
                    Quantity((owned.raw() as f64 * SELL_POSITION_FRACTION).floor() as u64);
                if !shares.is_zero() && agents::sell(investor, &stock.symbol, shares, price, clock)
                {
                    *traded.entry(stock.symbol.clone()).or_insert(0) += shares.raw();
                    investor.recent_trades.push(RecentTrade {
                        symbol: stock.symbol.clone(),
                        day: next_day,
                        side: TradeSide::Sell,
                        shares,
                        price,
                        features: features.clone(),
                        activations: Some(evaluation.trace),
                        outcome_day: next_day + OUTCOME_HORIZON_DAYS,
                    });
                }
            }
        }
    }

    // Phase 4: finalize volume with ambient noise on top of agent flow.
    for stock in state.stocks.iter_mut().filter(|stock| !stock.delisted) {
        let flow = traded.get(&stock.symbol).copied().unwrap_or(0);
        if let Some(bar) = stock.last_bar_mut() {
            bar.volume = (flow as f64 + rng.random::<f64>() * AMBIENT_VOLUME_NOISE).round() as u64;
        }
    }

    // Phase 5: mark every account at today's closes, the human included.
    let stocks = &state.stocks;
    for investor in &mut state.investors {
        let value = investor.total_value(stocks);
        investor.push_value_point(next_day, value);
    }

    // Phase 6: extend the index. Skipped once every stock is delisted,
    // since an empty mean has no value to record.
    if let Some(mean) = state.average_close() {
        state.push_index_point(next_day, mean);
    }

    // Phase 7: annual tax settlement for every account.
    if next_day % DAYS_PER_YEAR == 0 {
        for investor in &mut state.investors {
            agents::settle_annual_taxes(investor);
        }
    }

    // Phase 8: open the next day flat at today's close.
    for stock in state.stocks.iter_mut().filter(|stock| !stock.delisted) {
        if let Some(close) = stock.last_close() {
            stock.push_bar(OhlcBar::flat(next_day, close));
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

    use news::NoOpEnricher;
    use types::tax::WASHINGTON_CG_EXEMPTION;
    use types::{
        Cash, ComplexWeights, CorporateActionWeights, CorporateAi, Investor, NetworkWeights,
        SECS_PER_DAY, Sector, ShareLot, Stock, Strategy,
    };

    use super::*;

    fn rising_bars(days: usize, start: f64) -> Vec<OhlcBar> {
        let mut bars = Vec::with_capacity(days);
        let mut close = start;
        for day in 1..=days {
            bars.push(OhlcBar::flat(day as SimDay, Price::from_float(close)));
            close *= 1.01;
        }
        bars
    }

    fn stock(symbol: &str, sector: Sector, history: Vec<OhlcBar>) -> Stock {
        Stock {
            symbol: symbol.to_owned(),
            name: format!("{symbol} Corp"),
            sector,
            history,
            delisted: false,
            shares_outstanding: 100_000_000,
            eps: 2.0,
            corporate_ai: CorporateAi {
                next_action_day: 10_000,
                weights: CorporateActionWeights::default(),
                learning_rate: 0.02,
            },
        }
    }

    fn fund(id: &str, cash: f64, weights: &[(&str, f64)], risk_aversion: f64) -> Investor {
        Investor {
            id: id.to_owned(),
            name: id.to_owned(),
            human: false,
            strategy_name: None,
            strategy: Strategy::NeuralNet {
                network: NetworkWeights::SingleLayer {
                    weights: weights
                        .iter()
                        .map(|(name, w)| (name.to_string(), *w))
                        .collect(),
                },
                risk_aversion,
                trade_frequency: 0.2,
                learning_rate: 0.01,
            },
            cash: Cash::from_float(cash),
            portfolio: Vec::new(),
            portfolio_history: Vec::new(),
            tax_loss_carryforward: Cash::ZERO,
            total_taxes_paid: Cash::ZERO,
            wa_annual_net_ltcg: Cash::ZERO,
            recent_trades: Vec::new(),
        }
    }

    fn human(cash: f64) -> Investor {
        Investor {
            id: "human-player".to_owned(),
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
        }
    }

    fn state(stocks: Vec<Stock>, investors: Vec<Investor>) -> SimulationState {
        let day = stocks
            .first()
            .and_then(Stock::last_bar_day)
            .unwrap_or(0);
        SimulationState {
            day,
            clock: 400 * SECS_PER_DAY,
            stocks,
            investors,
            active_event: None,
            event_history: Vec::new(),
            market_index_history: Vec::new(),
            // Far enough out that no macro shock interferes by default.
            next_corporate_event_day: 10_000,
            next_macro_event_day: 10_000,
        }
    }

    #[test]
    fn test_day_advances_and_next_bar_opens_flat() {
        let mut state = state(
            vec![stock("AAA", Sector::Technology, rising_bars(30, 10.0))],
            vec![human(100.0)],
        );
        let mut rng = StdRng::seed_from_u64(42);
        run_end_of_day(&mut state, &mut rng, &NoOpEnricher);

        assert_eq!(state.day, 31);
        let stock = &state.stocks[0];
        assert_eq!(stock.history.len(), 31);
        let new_bar = stock.history.last().unwrap();
        assert_eq!(new_bar.day, 31);
        assert_eq!(new_bar.volume, 0);
        // Flat open at the settled close.
        assert_eq!(new_bar.open, stock.history[29].close);
        assert_eq!(new_bar.close, stock.history[29].close);
    }

    #[test]
    fn test_drag_inflation_and_event_reprice_the_close() {
        let mut state = state(
            vec![
                stock("TEC", Sector::Technology, rising_bars(30, 10.0)),
                stock("NRG", Sector::Energy, rising_bars(30, 20.0)),
            ],
            vec![human(100.0)],
        );
        // Force the macro shock to land at this boundary.
        state.next_macro_event_day = 31;
        let opens: Vec<f64> = state
            .stocks
            .iter()
            .map(|s| s.last_close().unwrap().to_float())
            .collect();

        let mut rng = StdRng::seed_from_u64(42);
        run_end_of_day(&mut state, &mut rng, &NoOpEnricher);

        let event = state.active_event.clone().expect("macro shock due");
        assert!(event.is_market_wide());
        for (stock, open) in state.stocks.iter().zip(opens) {
            let drag = stock.sector.bo_tax_rate() / 365.0;
            let expected = open * (1.0 - drag + INFLATION_RATE)
                * event.impact.factor_for(stock.sector);
            // The settled close sits under the new flat bar.
            let settled = stock.history[29].close;
            assert_eq!(settled, Price::from_float_floored(expected));
        }
    }

    #[test]
    fn test_macro_shock_reschedules_itself() {
        let mut state = state(
            vec![stock("AAA", Sector::Finance, rising_bars(30, 10.0))],
            vec![human(100.0)],
        );
        state.next_macro_event_day = 31;
        let mut rng = StdRng::seed_from_u64(42);
        run_end_of_day(&mut state, &mut rng, &NoOpEnricher);

        assert_eq!(state.event_history.len(), 1);
        assert_eq!(state.event_history[0].day, 31);
        assert!(
            (181..331).contains(&state.next_macro_event_day),
            "reschedule window, got {}",
            state.next_macro_event_day
        );
    }

    #[test]
    fn test_quote_floor_holds_through_shocks() {
        // A penny stock takes a macro shock at the first boundary; whatever
        // the shock's direction, no close may ever leave the floor behind.
        let bars = vec![OhlcBar::flat(1, Price::MIN_QUOTE)];
        let mut state = state(
            vec![stock("PNY", Sector::Technology, bars)],
            vec![human(100.0)],
        );
        state.next_macro_event_day = 2;
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            run_end_of_day(&mut state, &mut rng, &NoOpEnricher);
        }
        for bar in &state.stocks[0].history {
            assert!(bar.close >= Price::MIN_QUOTE);
        }
    }

    #[test]
    fn test_bullish_fund_buys_a_fifth_of_cash() {
        let mut state = state(
            vec![stock("AAA", Sector::Technology, rising_bars(30, 10.0))],
            // Score 0 beats a negative threshold, so this fund always buys.
            vec![fund("investor-1", 1_000.0, &[], -1.0)],
        );
        let clock = state.clock;
        let mut rng = StdRng::seed_from_u64(42);
        run_end_of_day(&mut state, &mut rng, &NoOpEnricher);

        let investor = &state.investors[0];
        let trade = &investor.recent_trades[0];
        assert_eq!(trade.side, TradeSide::Buy);
        assert_eq!(trade.day, 31);
        assert_eq!(trade.outcome_day, 36);
        assert!(trade.activations.is_some());
        assert!(!trade.features.is_empty());

        // A fifth of $1,000 at the settled close, rounded down.
        let expected_shares = (200.0 / trade.price.to_float()).floor() as u64;
        assert_eq!(trade.shares, expected_shares);
        assert_eq!(
            investor.cash,
            Cash::from_float(1_000.0) - trade.price * trade.shares
        );

        let lot = &investor.position("AAA").unwrap().lots[0];
        assert_eq!(lot.purchase_time, clock);
        assert_eq!(lot.purchase_price, trade.price);
        assert!(!lot.purchase_features.is_empty());

        // Agent flow shows up in the settled bar's volume.
        assert!(state.stocks[0].history[29].volume >= trade.shares.raw());
    }

    #[test]
    fn test_bearish_fund_sells_half_and_accrues_ltcg() {
        let mut investor = fund("investor-1", 100.0, &[("momentum_5d", -1_000.0)], 0.5);
        investor.portfolio.push(types::PortfolioItem {
            symbol: "AAA".to_owned(),
            lots: vec![ShareLot {
                purchase_time: 0,
                purchase_price: Price::from_float(4.0),
                shares: Quantity(10),
                purchase_features: BTreeMap::new(),
            }],
        });
        let mut state = state(
            vec![stock("AAA", Sector::Technology, rising_bars(30, 10.0))],
            vec![investor],
        );

        let mut rng = StdRng::seed_from_u64(42);
        run_end_of_day(&mut state, &mut rng, &NoOpEnricher);

        let investor = &state.investors[0];
        let trade = &investor.recent_trades[0];
        assert_eq!(trade.side, TradeSide::Sell);
        assert_eq!(trade.shares, 5);
        assert_eq!(investor.shares_of("AAA"), 5);
        assert_eq!(
            investor.cash,
            Cash::from_float(100.0) + trade.price * Quantity(5)
        );
        // Held since the epoch, 400 days ago: long-term gain accrues.
        assert_eq!(
            investor.wa_annual_net_ltcg,
            (trade.price - Price::from_float(4.0)) * Quantity(5)
        );
    }

    #[test]
    fn test_accounts_without_networks_sit_out_the_trading_loop() {
        // Hand-tuned factor funds score nothing; only neural funds trade.
        let mut factor_fund = fund("investor-2", 1_000.0, &[], -1.0);
        factor_fund.strategy = Strategy::Complex {
            weights: ComplexWeights {
                growth: 0.8,
                ..ComplexWeights::default()
            },
            risk_aversion: -1.0,
            trade_frequency: 0.2,
        };
        let mut state = state(
            vec![stock("AAA", Sector::Technology, rising_bars(30, 10.0))],
            vec![human(500.0), fund("investor-1", 1_000.0, &[], -1.0), factor_fund],
        );
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..3 {
            run_end_of_day(&mut state, &mut rng, &NoOpEnricher);
        }

        for idle in [&state.investors[0], &state.investors[2]] {
            assert!(idle.portfolio.is_empty());
            assert!(idle.recent_trades.is_empty());
            // Still marked every day alongside the trading funds.
            assert_eq!(idle.portfolio_history.len(), 3);
        }
        assert_eq!(state.investors[0].cash, Cash::from_float(500.0));
        assert_eq!(state.investors[2].cash, Cash::from_float(1_000.0));
        assert!(!state.investors[1].portfolio.is_empty());
    }

    #[test]
    fn test_index_extends_at_the_average_close() {
        let mut state = state(
            vec![
                stock("AAA", Sector::Technology, rising_bars(30, 10.0)),
                stock("BBB", Sector::Health, rising_bars(30, 30.0)),
            ],
            vec![human(100.0)],
        );
        let mut rng = StdRng::seed_from_u64(42);
        run_end_of_day(&mut state, &mut rng, &NoOpEnricher);

        let point = state.market_index_history.last().unwrap();
        assert_eq!(point.day, 31);
        assert!((point.price - state.average_close().unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_fully_delisted_market_records_nothing() {
        let mut dead = stock("AAA", Sector::Technology, rising_bars(30, 10.0));
        dead.delisted = true;
        let mut state = state(vec![dead], vec![human(100.0)]);

        let mut rng = StdRng::seed_from_u64(42);
        run_end_of_day(&mut state, &mut rng, &NoOpEnricher);

        assert_eq!(state.day, 31);
        assert!(state.market_index_history.is_empty());
        assert_eq!(state.stocks[0].history.len(), 30, "no new bar while delisted");
    }

    #[test]
    fn test_annual_boundary_settles_every_account() {
        let mut rich = human(1_000_000.0);
        rich.wa_annual_net_ltcg = WASHINGTON_CG_EXEMPTION + Cash::from_float(100_000.0);
        let mut fund_inv = fund("investor-1", 1_000_000.0, &[], 999.0);
        fund_inv.wa_annual_net_ltcg = WASHINGTON_CG_EXEMPTION + Cash::from_float(100_000.0);

        let mut state = state(
            vec![stock("AAA", Sector::Technology, rising_bars(30, 10.0))],
            vec![rich, fund_inv],
        );
        state.day = 364;

        let mut rng = StdRng::seed_from_u64(42);
        run_end_of_day(&mut state, &mut rng, &NoOpEnricher);

        assert_eq!(state.day, 365);
        for investor in &state.investors {
            assert_eq!(investor.total_taxes_paid, Cash::from_float(7_000.0));
            assert_eq!(investor.wa_annual_net_ltcg, Cash::ZERO);
        }
    }

    #[test]
    fn test_same_seed_settles_identically() {
        let base = state(
            vec![
                stock("AAA", Sector::Technology, rising_bars(30, 10.0)),
                stock("BBB", Sector::Energy, rising_bars(30, 20.0)),
            ],
            vec![human(100.0), fund("investor-1", 1_000.0, &[], -1.0)],
        );

        let mut a = base.clone();
        let mut b = base;
        let mut rng_a = StdRng::seed_from_u64(5);
        let mut rng_b = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            run_end_of_day(&mut a, &mut rng_a, &NoOpEnricher);
            run_end_of_day(&mut b, &mut rng_b, &NoOpEnricher);
        }
        assert_eq!(a, b);
    }
}
