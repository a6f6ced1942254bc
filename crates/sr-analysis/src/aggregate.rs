//! Pure aggregation computations.
//!
//! These helpers carry no table or catalog knowledge; the engine feeds them
//! extracted value and label sequences and shapes the output into series
//! tables.

/// One equal-width frequency bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Exclusive upper edge (inclusive for the last bin).
    pub end: f64,
    /// Observations falling in the bin.
    pub count: i64,
}

/// Bin values into `bins` equal-width frequency bins over `[min, max]`.
///
/// Empty input yields no bins. Single-valued input collapses to one
/// unit-width bin holding every observation.
pub fn bin_frequencies(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    if span == 0.0 {
        return vec![Bin {
            start: min,
            end: min + 1.0,
            count: values.len() as i64,
        }];
    }

    let width = span / bins as f64;
    let mut counts = vec![0i64; bins];
    for &v in values {
        let idx = (((v - min) / span) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Five-number summary with 1.5·IQR whisker bounds.
///
/// Whiskers are the Tukey fences `q1 - 1.5·IQR` and `q3 + 1.5·IQR` clamped
/// to the observed range. They are not snapped to the most extreme
/// observation inside the fences, and observations beyond the fences are
/// not reported separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumber {
    /// Lower whisker: `max(min, q1 - 1.5·IQR)`.
    pub whisker_lo: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Upper whisker: `min(max, q3 + 1.5·IQR)`.
    pub whisker_hi: f64,
}

/// Linear-interpolation quantile over an ascending-sorted slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = p * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Compute the five-number summary of a sample. Empty samples yield `None`.
pub fn five_number(values: &[f64]) -> Option<FiveNumber> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    Some(FiveNumber {
        whisker_lo: (q1 - 1.5 * iqr).max(min),
        q1,
        median,
        q3,
        whisker_hi: (q3 + 1.5 * iqr).min(max),
    })
}

/// Sum values per label, keeping first-seen label order.
pub fn grouped_sum(pairs: impl IntoIterator<Item = (String, f64)>) -> Vec<(String, f64)> {
    let mut order: Vec<(String, f64)> = Vec::new();
    for (label, value) in pairs {
        match order.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, total)) => *total += value,
            None => order.push((label, value)),
        }
    }
    order
}

/// Sort grouped totals ascending by key.
///
/// Keys compare numerically when every key parses as a number (quarter
/// buckets), lexicographically otherwise. The sort is stable.
pub fn sort_key_ascending(groups: &mut [(String, f64)]) {
    let numeric: Option<Vec<f64>> = groups
        .iter()
        .map(|(key, _)| key.parse::<f64>().ok())
        .collect();
    match numeric {
        Some(keys) => {
            let mut indexed: Vec<(f64, (String, f64))> =
                keys.into_iter().zip(groups.iter().cloned()).collect();
            indexed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            for (slot, (_, group)) in groups.iter_mut().zip(indexed) {
                *slot = group;
            }
        }
        None => groups.sort_by(|a, b| a.0.cmp(&b.0)),
    }
}

/// Sort grouped totals descending by total; equal totals keep their
/// first-seen order (stable sort).
pub fn sort_total_descending(groups: &mut [(String, f64)]) {
    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_range_and_count_everything() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 5.0];
        let bins = bin_frequencies(&values, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[4].end, 5.0);
        // Max values land in the last bin, not out of range.
        assert_eq!(bins.iter().map(|b| b.count).sum::<i64>(), 7);
        assert_eq!(bins[4].count, 3);
    }

    #[test]
    fn single_valued_input_gets_one_bin() {
        let bins = bin_frequencies(&[7.0, 7.0], 30);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
    }

    #[test]
    fn empty_input_has_no_bins() {
        assert!(bin_frequencies(&[], 30).is_empty());
    }

    #[test]
    fn five_number_of_known_sample() {
        let summary = five_number(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        // Whiskers clamp to the observed range.
        assert_eq!(summary.whisker_lo, 1.0);
        assert_eq!(summary.whisker_hi, 5.0);
    }

    #[test]
    fn whiskers_sit_at_the_fences_not_at_in_fence_extremes() {
        // q1 = 2, q3 = 4, IQR = 2: upper fence 7 sits between the largest
        // in-fence observation (4) and the outlying maximum (100).
        let summary = five_number(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(summary.whisker_hi, 7.0);
        // Lower fence -1 clamps to the observed minimum.
        assert_eq!(summary.whisker_lo, 1.0);
    }

    #[test]
    fn grouped_sum_keeps_first_seen_order() {
        let groups = grouped_sum(vec![
            ("B".to_string(), 1.0),
            ("A".to_string(), 2.0),
            ("B".to_string(), 3.0),
        ]);
        assert_eq!(groups, vec![("B".to_string(), 4.0), ("A".to_string(), 2.0)]);
    }

    #[test]
    fn key_ascending_sorts_numeric_keys_numerically() {
        let mut groups = vec![
            ("10".to_string(), 1.0),
            ("2".to_string(), 2.0),
            ("1".to_string(), 3.0),
        ];
        sort_key_ascending(&mut groups);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["1", "2", "10"]);
    }

    #[test]
    fn total_descending_breaks_ties_by_first_seen() {
        let mut groups = vec![
            ("A".to_string(), 30.0),
            ("B".to_string(), 30.0),
            ("C".to_string(), 40.0),
        ];
        sort_total_descending(&mut groups);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["C", "A", "B"]);
    }
}
