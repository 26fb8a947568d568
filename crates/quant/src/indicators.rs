//! Per-stock technical feature extraction.
//!
//! [`compute_indicators`] turns a stock's daily bar history into the flat
//! feature map the neural strategies score against. Feature names double as
//! neuron names, so they are stable identifiers: `momentum_5d`,
//! `trend_price_vs_sma_20`, `oscillator_rsi_14_contrarian`, and so on.
//!
//! Every feature guards its own lookback window. Short histories simply
//! produce fewer features; a missing feature is a neutral zero contribution
//! downstream, never an error.

use std::collections::BTreeMap;

use types::OhlcBar;

const MOMENTUM_PERIODS: [usize; 4] = [5, 10, 20, 50];
const SMA_PERIODS: [usize; 5] = [10, 20, 50, 100, 200];
const EMA_PERIODS: [usize; 3] = [10, 20, 50];
const RSI_PERIODS: [usize; 3] = [7, 14, 21];
const STOCHASTIC_PERIOD: usize = 14;
const BOLLINGER_PERIOD: usize = 20;
const VOLUME_PERIOD: usize = 20;
const ATR_PERIOD: usize = 14;

/// Simple moving average of the last `period` values.
fn sma(values: &[f64], period: usize) -> Option<f64> {
    if values.len() < period || period == 0 {
        return None;
    }
    let sum: f64 = values.iter().rev().take(period).sum();
    Some(sum / period as f64)
}

/// Exponential moving average over the whole series, seeded with the SMA of
/// the first `period` values.
fn ema(values: &[f64], period: usize) -> Option<f64> {
    if values.len() < period || period == 0 {
        return None;
    }
    let k = 2.0 / (period as f64 + 1.0);
    let seed: f64 = values.iter().take(period).sum::<f64>() / period as f64;
    let ema = values
        .iter()
        .skip(period)
        .fold(seed, |prev, value| value * k + prev * (1.0 - k));
    Some(ema)
}

/// Compute the full feature map for a bar history (oldest first).
///
/// Returns an empty map for histories shorter than two bars.
pub fn compute_indicators(history: &[OhlcBar]) -> BTreeMap<String, f64> {
    let mut features = BTreeMap::new();
    let prices: Vec<f64> = history.iter().map(|bar| bar.close.to_float()).collect();
    let volumes: Vec<f64> = history.iter().map(|bar| bar.volume as f64).collect();
    if prices.len() < 2 {
        return features;
    }

    let len = prices.len();
    let current = prices[len - 1];
    let prev = prices[len - 2];

    // Momentum: return over the last `p` steps. At exactly `p` bars the
    // window is anchored on the first bar.
    for p in MOMENTUM_PERIODS {
        if len >= p {
            let base = prices[len.saturating_sub(p + 1)];
            features.insert(format!("momentum_{p}d"), current / base - 1.0);
        }
    }

    // Simple moving averages and the price's distance from each.
    let mut smas: BTreeMap<usize, f64> = BTreeMap::new();
    for p in SMA_PERIODS {
        if let Some(value) = sma(&prices, p) {
            smas.insert(p, value);
            features.insert(format!("trend_price_vs_sma_{p}"), (current - value) / value);
        }
    }
    for (fast, slow) in [(10, 20), (20, 50), (50, 200)] {
        if let (Some(&f), Some(&s)) = (smas.get(&fast), smas.get(&slow)) {
            features.insert(format!("trend_sma_crossover_{fast}_{slow}"), (f - s) / s);
        }
    }

    // Exponential moving averages and their crossovers.
    let mut emas: BTreeMap<usize, f64> = BTreeMap::new();
    for p in EMA_PERIODS {
        if let Some(value) = ema(&prices, p) {
            emas.insert(p, value);
            features.insert(format!("trend_price_vs_ema_{p}"), (current - value) / value);
        }
    }
    for (fast, slow) in [(10, 20), (20, 50)] {
        if let (Some(&f), Some(&s)) = (emas.get(&fast), emas.get(&slow)) {
            features.insert(format!("trend_ema_crossover_{fast}_{slow}"), (f - s) / s);
        }
    }

    // Contrarian RSI: +1 deeply oversold, -1 deeply overbought. A window
    // with no losses scores neutral.
    for p in RSI_PERIODS {
        if len > p {
            let window = &prices[len - p - 1..];
            let mut gains = 0.0;
            let mut losses = 0.0;
            for pair in window.windows(2) {
                let change = pair[1] - pair[0];
                if change > 0.0 {
                    gains += change;
                } else {
                    losses += change.abs();
                }
            }
            let avg_loss = losses / p as f64;
            let value = if avg_loss > 0.0 {
                let rs = (gains / p as f64) / avg_loss;
                let rsi = 100.0 - 100.0 / (1.0 + rs);
                (50.0 - rsi) / 50.0
            } else {
                0.0
            };
            features.insert(format!("oscillator_rsi_{p}_contrarian"), value);
        }
    }

    // Stochastic %K over closes, contrarian-normalized. A flat window sits
    // at the 50 midpoint.
    if len >= STOCHASTIC_PERIOD {
        let window = &prices[len - STOCHASTIC_PERIOD..];
        let low = window.iter().copied().fold(f64::INFINITY, f64::min);
        let high = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let k = if high > low {
            100.0 * (current - low) / (high - low)
        } else {
            50.0
        };
        features.insert(
            "oscillator_stochastic_k_14_contrarian".to_owned(),
            (50.0 - k) / 50.0,
        );
    }

    // Bollinger bands around the 20-day SMA, two population std-devs wide.
    // %B is undefined when the bands collapse.
    if let Some(&mid) = smas.get(&BOLLINGER_PERIOD) {
        let window = &prices[len - BOLLINGER_PERIOD..];
        let variance =
            window.iter().map(|p| (p - mid).powi(2)).sum::<f64>() / BOLLINGER_PERIOD as f64;
        let std_dev = variance.sqrt();
        let upper = mid + std_dev * 2.0;
        let lower = mid - std_dev * 2.0;
        features.insert(
            "volatility_bollinger_bandwidth_20".to_owned(),
            (upper - lower) / mid,
        );
        if upper > lower {
            features.insert(
                "volatility_bollinger_percent_b_20".to_owned(),
                (current - lower) / (upper - lower),
            );
        }
    }

    // MACD histogram, normalized by the slow EMA.
    if let (Some(fast), Some(slow)) = (ema(&prices, 12), ema(&prices, 26)) {
        features.insert("macd_histogram".to_owned(), (fast - slow) / slow);
    }

    // Volume spike relative to the 20-day average. Omitted when the window
    // has no volume at all.
    if len >= VOLUME_PERIOD {
        let avg = volumes[len - VOLUME_PERIOD..].iter().sum::<f64>() / VOLUME_PERIOD as f64;
        if avg > 0.0 {
            features.insert(
                "volume_avg_20d_spike".to_owned(),
                (volumes[len - 1] - avg) / avg,
            );
        }
    }

    // On-balance volume versus its own 20-day mean. The first bar of the
    // window contributes no step when no earlier close exists.
    if len >= VOLUME_PERIOD {
        let mut obv = 0.0;
        let mut running = Vec::with_capacity(VOLUME_PERIOD);
        for i in len - VOLUME_PERIOD..len {
            if i > 0 {
                if prices[i] > prices[i - 1] {
                    obv += volumes[i];
                } else if prices[i] < prices[i - 1] {
                    obv -= volumes[i];
                }
            }
            running.push(obv);
        }
        let obv_sma = running.iter().sum::<f64>() / VOLUME_PERIOD as f64;
        if obv_sma != 0.0 {
            features.insert(
                "volume_obv_trend_20d".to_owned(),
                (obv - obv_sma) / obv_sma.abs(),
            );
        }
    }

    // Chaikin-style money flow. The flow sign compares each close against
    // the second-to-last close, not each bar's own predecessor.
    if len >= VOLUME_PERIOD {
        let mut flow = 0.0;
        let mut vol_sum = 0.0;
        for i in len - VOLUME_PERIOD..len {
            let sign = if prices[i] - prev > 0.0 { 1.0 } else { -1.0 };
            flow += sign * volumes[i];
            vol_sum += volumes[i];
        }
        if vol_sum > 0.0 {
            features.insert("volume_cmf_20".to_owned(), flow / vol_sum);
        }
    }

    // ATR approximated from close-to-close moves, normalized by the
    // current price.
    if len > ATR_PERIOD {
        let window = &prices[len - ATR_PERIOD - 1..];
        let atr = window
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).abs())
            .sum::<f64>()
            / ATR_PERIOD as f64;
        if current > 0.0 {
            features.insert("volatility_atr_14".to_owned(), atr / current);
        }
    }

    features
}

// =============================================================================
// Tests
// =============================================================================
