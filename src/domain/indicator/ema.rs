//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with the SMA of the first n values, then
//! EMA[i] = V[i]*k + EMA[i-1]*(1-k). The first (n-1) entries carry no value.

/// EMA over a value series (closing prices in the pipeline, but any derived
/// series works the same way).
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out: Vec<Option<f64>> = vec![None; values.len()];
    if period == 0 || values.is_empty() || values.len() < period {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(ema);

    for i in period..values.len() {
        ema = values[i] * k + ema * (1.0 - k);
        out[i] = Some(ema);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_warmup() {
        let ema = calculate_ema(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);

        assert!(ema[0].is_none());
        assert!(ema[1].is_none());
        assert!(ema[2].is_some());
        assert!(ema[3].is_some());
        assert!(ema[4].is_some());
    }

    #[test]
    fn ema_period_1() {
        let ema = calculate_ema(&[10.0, 20.0, 30.0], 1);

        assert!((ema[0].unwrap() - 10.0).abs() < f64::EPSILON);
        assert!((ema[1].unwrap() - 20.0).abs() < f64::EPSILON);
        assert!((ema[2].unwrap() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ema_seed_is_sma() {
        let ema = calculate_ema(&[10.0, 20.0, 30.0], 3);

        let expected_sma = (10.0 + 20.0 + 30.0) / 3.0;
        assert!((ema[2].unwrap() - expected_sma).abs() < f64::EPSILON);
    }

    #[test]
    fn ema_recursive_calculation() {
        let ema = calculate_ema(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);

        let k = 2.0 / 4.0;
        let sma = (10.0 + 20.0 + 30.0) / 3.0;
        assert!((ema[2].unwrap() - sma).abs() < f64::EPSILON);

        let ema_3 = 40.0 * k + sma * (1.0 - k);
        assert!((ema[3].unwrap() - ema_3).abs() < f64::EPSILON);

        let ema_4 = 50.0 * k + ema_3 * (1.0 - k);
        assert!((ema[4].unwrap() - ema_4).abs() < f64::EPSILON);
    }

    #[test]
    fn ema_equal_values() {
        let ema = calculate_ema(&[100.0; 5], 3);

        for value in ema.iter().skip(2) {
            assert!((value.unwrap() - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn ema_empty_values() {
        let ema = calculate_ema(&[], 3);
        assert!(ema.is_empty());
    }

    #[test]
    fn ema_period_0() {
        let ema = calculate_ema(&[10.0, 20.0], 0);
        assert!(ema.iter().all(|v| v.is_none()));
    }

    #[test]
    fn ema_period_longer_than_series() {
        let ema = calculate_ema(&[10.0, 20.0], 5);
        assert!(ema.iter().all(|v| v.is_none()));
    }
}
