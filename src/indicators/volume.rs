//! On-Balance Volume.

use crate::indicators::IndicatorSeries;

/// OBV: cumulative volume seeded at volume[0]; adds on an up-close,
/// subtracts on a down-close, holds on a flat close. Defined at every index.
pub fn obv(closes: &[f64], volumes: &[f64]) -> IndicatorSeries {
    let n = closes.len();
    if n == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n);
    let mut running = volumes[0];
    out.push(Some(running));

    for i in 1..n {
        if closes[i] > closes[i - 1] {
            running += volumes[i];
        } else if closes[i] < closes[i - 1] {
            running -= volumes[i];
        }
        out.push(Some(running));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_obv_direction_handling() {
        let closes = vec![10.0, 11.0, 11.0, 9.0, 12.0];
        let volumes = vec![100.0, 50.0, 30.0, 20.0, 10.0];

        let result = obv(&closes, &volumes);
        // seed 100, up +50, flat hold, down -20, up +10
        let expected = [100.0, 150.0, 150.0, 130.0, 140.0];
        for (got, want) in result.iter().zip(expected) {
            assert_relative_eq!(got.unwrap(), want);
        }
    }

    #[test]
    fn test_obv_single_bar() {
        let result = obv(&[10.0], &[42.0]);
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].unwrap(), 42.0);
    }

    #[test]
    fn test_obv_empty() {
        assert!(obv(&[], &[]).is_empty());
    }
}
