// jobmart-core/src/domain/stats.rs

//! Null-aware descriptive statistics shared by Silver and Gold.

/// Mean of the present values, `None` when there are none.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Sum of the present values (0 when there are none).
pub fn sum<I>(values: I) -> i64
where
    I: IntoIterator<Item = Option<i64>>,
{
    values.into_iter().flatten().sum()
}

/// Present, non-NaN values in ascending order.
pub fn sorted<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut out: Vec<f64> = values.into_iter().flatten().filter(|v| !v.is_nan()).collect();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile `q` in [0, 1] of an ascending slice, linear interpolation
/// between the two closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_skips_nulls() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn test_quantile_interpolates_linearly() {
        let values = sorted([Some(4.0), Some(1.0), None, Some(3.0), Some(2.0)]);
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
    }

    #[test]
    fn test_quantile_of_single_value_and_empty() {
        assert_eq!(quantile(&[7.0], 0.9), Some(7.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_sum_ignores_nulls() {
        assert_eq!(sum([Some(2), None, Some(5)]), 7);
        assert_eq!(sum(Vec::<Option<i64>>::new()), 0);
    }
}
