//! RSI (Relative Strength Index).
//!
//! RSI = 100 * EMA_up / (EMA_up + EMA_down), where up/down are the positive
//! and negative parts of the close-to-close delta, smoothed exponentially
//! with center-of-mass = n-1 (alpha = 1/n). The recursion is seeded by the
//! first delta, so values exist from the second bar onward with no hard
//! warmup cutoff. A zero denominator (no movement yet) yields no value.

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out: Vec<Option<f64>> = vec![None; closes.len()];
    if period == 0 || closes.len() < 2 {
        return out;
    }

    let alpha = 1.0 / period as f64;
    let first_delta = closes[1] - closes[0];
    let mut ema_up = first_delta.max(0.0);
    let mut ema_down = (-first_delta).max(0.0);
    out[1] = rsi_value(ema_up, ema_down);

    for i in 2..closes.len() {
        let delta = closes[i] - closes[i - 1];
        ema_up = (1.0 - alpha) * ema_up + alpha * delta.max(0.0);
        ema_down = (1.0 - alpha) * ema_down + alpha * (-delta).max(0.0);
        out[i] = rsi_value(ema_up, ema_down);
    }

    out
}

fn rsi_value(ema_up: f64, ema_down: f64) -> Option<f64> {
    let total = ema_up + ema_down;
    if total == 0.0 {
        None
    } else {
        Some(100.0 * ema_up / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_and_single() {
        assert!(calculate_rsi(&[], 14).is_empty());

        let rsi = calculate_rsi(&[100.0], 14);
        assert_eq!(rsi.len(), 1);
        assert!(rsi[0].is_none());
    }

    #[test]
    fn rsi_defined_from_first_delta() {
        let rsi = calculate_rsi(&[100.0, 101.0, 102.0], 14);

        assert!(rsi[0].is_none());
        assert!(rsi[1].is_some());
        assert!(rsi[2].is_some());
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let rsi = calculate_rsi(&closes, 14);

        for value in rsi.iter().skip(1) {
            assert!((value.unwrap() - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let rsi = calculate_rsi(&closes, 14);

        for value in rsi.iter().skip(1) {
            assert!(value.unwrap().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn rsi_flat_series_has_no_value() {
        let rsi = calculate_rsi(&[100.0; 10], 14);
        assert!(rsi.iter().all(|v| v.is_none()));
    }

    #[test]
    fn rsi_known_recursion() {
        // d1 = +2 seeds up=2, down=0; d2 = -1 gives
        // up = 2 * 13/14, down = 1/14 → rsi = 100 * 26/27
        let rsi = calculate_rsi(&[100.0, 102.0, 101.0], 14);

        assert!((rsi[1].unwrap() - 100.0).abs() < 1e-12);
        assert!((rsi[2].unwrap() - 100.0 * 26.0 / 27.0).abs() < 1e-9);
    }

    #[test]
    fn rsi_stays_in_range() {
        let closes: Vec<f64> = (1..=40)
            .map(|i| 100.0 + ((i % 7) as f64 - 3.0) * 2.0)
            .collect();
        let rsi = calculate_rsi(&closes, 14);

        for value in rsi.iter().flatten() {
            assert!((0.0..=100.0).contains(value), "RSI {} out of range", value);
        }
    }

    #[test]
    fn rsi_zero_period() {
        let rsi = calculate_rsi(&[100.0, 101.0], 0);
        assert!(rsi.iter().all(|v| v.is_none()));
    }
}
