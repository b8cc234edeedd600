//! Manual edits and renormalization back to 100%

use tracing::{debug, warn};

use crate::models::{Distribution, Money};

/// Set one row's percentage by hand and mark it manual
///
/// Negative input is floored at zero. Returns false when `index` is out of range.
pub fn set_percentage(distributions: &mut [Distribution], index: usize, percentage: f64) -> bool {
    match distributions.get_mut(index) {
        Some(row) => {
            row.percentage = percentage.max(0.0);
            row.is_manual = true;
            true
        }
        None => false,
    }
}

/// Rescale the non-manual rows so the grand total is 100%
///
/// Manual rows keep their percentage. The remaining rows share
/// `100 - manual_total` in proportion to their current percentages (evenly if
/// they are all zero). When manual rows alone reach or pass 100%, the other
/// rows are set to zero and the total is left above 100: that input has no
/// resolution here and `validate_distribution` will reject it.
///
/// Every amount is recomputed from its final percentage.
pub fn adjust_to_100_percent(distributions: &[Distribution], income: Money) -> Vec<Distribution> {
    let mut rows = distributions.to_vec();

    let manual_total: f64 = rows
        .iter()
        .filter(|r| r.is_manual)
        .map(|r| r.percentage)
        .sum();
    let target = 100.0 - manual_total;

    let free: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_manual)
        .map(|(i, _)| i)
        .collect();

    if free.is_empty() {
        debug!(manual_total, "every row is manual, nothing to rescale");
    } else if target <= 0.0 {
        warn!(manual_total, "manual percentages reach 100%, other rows zeroed");
        for &i in &free {
            rows[i].percentage = 0.0;
        }
    } else {
        let free_total: f64 = free.iter().map(|&i| rows[i].percentage.max(0.0)).sum();
        if free_total > 0.0 {
            let factor = target / free_total;
            for &i in &free {
                rows[i].percentage = rows[i].percentage.max(0.0) * factor;
            }
        } else {
            let even = target / free.len() as f64;
            for &i in &free {
                rows[i].percentage = even;
            }
        }
    }

    for row in &mut rows {
        row.amount = income.percent(row.percentage);
    }

    rows
}
