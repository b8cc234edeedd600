//! Distribution calculation and validation

use tracing::debug;

use super::AllocationPolicy;
use crate::models::{BudgetCategory, Distribution, MacroGroup, Money};

/// Allowed drift, in percentage points, when checking a distribution sums to 100
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Compute a distribution of `income` across `categories`
///
/// Returns an empty vector when income is zero or negative: the distribution
/// is "not computable", which is not an error. `investment_percentage` is
/// trusted; callers clamp it.
///
/// Rows come out in macro-group order (needs, wants, investments). A group
/// without categories gets one placeholder row. Amounts sum exactly to
/// `income`, and each row is within a cent of `income * percentage / 100`.
pub fn calculate_distribution(
    income: Money,
    investment_percentage: u8,
    categories: &[BudgetCategory],
    policy: &AllocationPolicy,
) -> Vec<Distribution> {
    if !income.is_positive() {
        debug!(%income, "income not positive, distribution not computable");
        return Vec::new();
    }

    let groups = policy.group_percentages(investment_percentage);

    // Needs and investments round on their own; wants absorb the rounding so
    // the groups add up to income to the cent.
    let mut group_amounts = [Money::zero(); 3];
    for (slot, (group, pct)) in group_amounts.iter_mut().zip(groups.iter()) {
        if *group != MacroGroup::Wants {
            *slot = income.percent(*pct);
        }
    }
    group_amounts[1] = income - group_amounts[0] - group_amounts[2];

    let mut rows = Vec::with_capacity(categories.len() + groups.len());

    for ((group, group_pct), group_amount) in groups.iter().zip(group_amounts) {
        let members: Vec<&BudgetCategory> = categories
            .iter()
            .filter(|c| c.matches_group(*group))
            .collect();

        if members.is_empty() {
            rows.push(Distribution::placeholder(*group, *group_pct, group_amount));
            continue;
        }

        let weights = group_weights(&members);
        let weight_total: f64 = weights.iter().sum();
        let amounts = apportion(group_amount, &weights);

        for ((category, weight), amount) in members.iter().zip(&weights).zip(amounts) {
            let percentage = group_pct * weight / weight_total;
            rows.push(Distribution::for_category(category, *group, percentage, amount));
        }
    }

    debug!(
        %income,
        investment_percentage,
        rows = rows.len(),
        "calculated distribution"
    );
    rows
}

/// Weights for the categories of one group
///
/// Default percentages are used only when every member has a positive one;
/// otherwise the group splits evenly.
fn group_weights(members: &[&BudgetCategory]) -> Vec<f64> {
    let all_weighted = members
        .iter()
        .all(|c| c.default_percentage.map_or(false, |p| p > 0.0));

    if all_weighted {
        members
            .iter()
            .map(|c| c.default_percentage.unwrap_or(1.0))
            .collect()
    } else {
        vec![1.0; members.len()]
    }
}

/// Split `total` proportionally to `weights`, to the cent, losing nothing
///
/// Each share is floored, then the leftover cents go one at a time to the
/// shares with the largest fractional remainders (earlier shares win ties).
/// All-zero or empty weights split evenly.
pub fn apportion(total: Money, weights: &[f64]) -> Vec<Money> {
    if weights.is_empty() {
        return Vec::new();
    }

    let weight_total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    let even = vec![1.0; weights.len()];
    let (weights, weight_total) = if weight_total > 0.0 {
        (weights, weight_total)
    } else {
        (even.as_slice(), weights.len() as f64)
    };

    let total_cents = total.cents();
    let mut shares = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());

    for (index, weight) in weights.iter().enumerate() {
        let raw = total_cents as f64 * weight.max(0.0) / weight_total;
        let floor = raw.floor();
        shares.push(floor as i64);
        remainders.push((index, raw - floor));
    }

    let mut leftover = total_cents - shares.iter().sum::<i64>();
    remainders.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut cursor = remainders.iter().cycle();
    while leftover > 0 {
        if let Some((index, _)) = cursor.next() {
            shares[*index] += 1;
        }
        leftover -= 1;
    }

    shares.into_iter().map(Money::from_cents).collect()
}

/// Sum of all row percentages
pub fn total_percentage(distributions: &[Distribution]) -> f64 {
    distributions.iter().map(|d| d.percentage).sum()
}

/// Check the percentages sum to 100 within [`DEFAULT_TOLERANCE`]
pub fn validate_distribution(distributions: &[Distribution]) -> bool {
    validate_distribution_with(distributions, DEFAULT_TOLERANCE)
}

/// Check the percentages sum to 100 within `tolerance` percentage points
pub fn validate_distribution_with(distributions: &[Distribution], tolerance: f64) -> bool {
    // Epsilon absorbs float noise at exactly the tolerance boundary
    (total_percentage(distributions) - 100.0).abs() <= tolerance + 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AllocationPolicy {
        AllocationPolicy::default()
    }

    fn sample_categories() -> Vec<BudgetCategory> {
        vec![
            BudgetCategory::new("Housing", Some(MacroGroup::Needs)),
            BudgetCategory::new("Groceries", Some(MacroGroup::Needs)),
            BudgetCategory::new("Transportation", Some(MacroGroup::Needs)),
            BudgetCategory::new("Dining Out", Some(MacroGroup::Wants)),
            BudgetCategory::new("Entertainment", Some(MacroGroup::Wants)),
            BudgetCategory::new("Emergency Fund", Some(MacroGroup::Investments)),
            BudgetCategory::new("Retirement", Some(MacroGroup::Investments)),
        ]
    }

    fn group_amount(rows: &[Distribution], group: MacroGroup) -> Money {
        rows.iter()
            .filter(|r| r.macro_group == group)
            .map(|r| r.amount)
            .sum()
    }

    fn pct(value: f64) -> Distribution {
        Distribution::placeholder(MacroGroup::Needs, value, Money::zero())
    }

    #[test]
    fn test_no_income_yields_empty_distribution() {
        let categories = sample_categories();
        assert!(calculate_distribution(Money::zero(), 20, &categories, &policy()).is_empty());
        assert!(
            calculate_distribution(Money::from_cents(-100), 20, &categories, &policy()).is_empty()
        );
    }

    #[test]
    fn test_totals_for_5000_at_20_percent() {
        let rows = calculate_distribution(
            Money::from_cents(500_000),
            20,
            &sample_categories(),
            &policy(),
        );

        assert_eq!(group_amount(&rows, MacroGroup::Investments).cents(), 100_000);
        assert_eq!(
            (group_amount(&rows, MacroGroup::Needs) + group_amount(&rows, MacroGroup::Wants))
                .cents(),
            400_000
        );
        assert!(validate_distribution(&rows));
    }

    #[test]
    fn test_sums_hold_for_many_incomes() {
        let categories = sample_categories();
        for income_cents in [1, 99, 10_001, 333_333, 500_000, 1_234_567, 9_876_543] {
            for investment in [0u8, 7, 20, 33, 80] {
                let income = Money::from_cents(income_cents);
                let rows = calculate_distribution(income, investment, &categories, &policy());

                assert!(
                    (total_percentage(&rows) - 100.0).abs() <= 0.01,
                    "percentages for {} at {}",
                    income,
                    investment
                );
                let amount_total: Money = rows.iter().map(|r| r.amount).sum();
                assert_eq!(amount_total, income, "amounts for {} at {}", income, investment);

                for row in &rows {
                    let exact = income.percent(row.percentage);
                    assert!(
                        (row.amount.cents() - exact.cents()).abs() <= 1,
                        "{} drifted from {}",
                        row,
                        exact
                    );
                }
            }
        }
    }

    #[test]
    fn test_even_split_within_group() {
        let rows = calculate_distribution(
            Money::from_cents(500_000),
            20,
            &sample_categories(),
            &policy(),
        );

        let needs: Vec<_> = rows
            .iter()
            .filter(|r| r.macro_group == MacroGroup::Needs)
            .collect();
        assert_eq!(needs.len(), 3);
        for row in &needs {
            assert!((row.percentage - 50.0 / 3.0).abs() < 1e-9);
        }
        // 2500.00 / 3 -> 833.34, 833.33, 833.33
        assert_eq!(needs[0].amount.cents(), 83_334);
        assert_eq!(needs[1].amount.cents(), 83_333);
        assert_eq!(needs[2].amount.cents(), 83_333);
    }

    #[test]
    fn test_default_weights_used_when_every_member_has_one() {
        let categories = vec![
            BudgetCategory::with_weight("Housing", MacroGroup::Needs, 60.0),
            BudgetCategory::with_weight("Groceries", MacroGroup::Needs, 40.0),
        ];
        let rows = calculate_distribution(Money::from_cents(500_000), 20, &categories, &policy());

        assert!((rows[0].percentage - 30.0).abs() < 1e-9);
        assert!((rows[1].percentage - 20.0).abs() < 1e-9);
        assert_eq!(rows[0].amount.cents(), 150_000);
        assert_eq!(rows[1].amount.cents(), 100_000);
    }

    #[test]
    fn test_partial_weights_fall_back_to_even_split() {
        let categories = vec![
            BudgetCategory::with_weight("Housing", MacroGroup::Needs, 90.0),
            BudgetCategory::new("Groceries", Some(MacroGroup::Needs)),
        ];
        let rows = calculate_distribution(Money::from_cents(100_000), 20, &categories, &policy());

        assert!((rows[0].percentage - 25.0).abs() < 1e-9);
        assert!((rows[1].percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_placeholder_for_empty_group() {
        let categories = vec![
            BudgetCategory::new("Housing", Some(MacroGroup::Needs)),
            BudgetCategory::new("Retirement", Some(MacroGroup::Investments)),
        ];
        let income = Money::from_cents(500_000);
        let rows = calculate_distribution(income, 20, &categories, &policy());

        let placeholders: Vec<_> = rows.iter().filter(|r| r.is_placeholder).collect();
        assert_eq!(placeholders.len(), 1);
        let wants = placeholders[0];
        assert_eq!(wants.macro_group, MacroGroup::Wants);
        assert!((wants.percentage - 30.0).abs() < 1e-9);
        assert_eq!(wants.amount, income.percent(wants.percentage));
        assert!(validate_distribution(&rows));
    }

    #[test]
    fn test_no_categories_gives_placeholders_only() {
        let rows = calculate_distribution(Money::from_cents(300_000), 10, &[], &policy());
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.is_placeholder));
        assert!(validate_distribution(&rows));
    }

    #[test]
    fn test_untagged_category_satisfies_every_group() {
        let categories = vec![BudgetCategory::new("Misc", None)];
        let rows = calculate_distribution(Money::from_cents(100_000), 20, &categories, &policy());

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| !r.is_placeholder));
        assert!(rows.iter().all(|r| r.category_name == "Misc"));
        assert!(validate_distribution(&rows));
    }

    #[test]
    fn test_validate_distribution_tolerance() {
        assert!(validate_distribution(&[pct(49.99), pct(50.01)]));
        assert!(!validate_distribution(&[pct(40.0), pct(50.0)]));
        assert!(!validate_distribution(&[pct(33.3), pct(33.3), pct(33.3)]));
        assert!(validate_distribution(&[pct(33.33), pct(33.33), pct(33.34)]));
        assert!(!validate_distribution(&[]));
        assert!(validate_distribution_with(&[pct(99.5)], 0.5));
    }

    #[test]
    fn test_apportion() {
        let shares = apportion(Money::from_cents(100), &[1.0, 1.0, 1.0]);
        assert_eq!(
            shares,
            vec![
                Money::from_cents(34),
                Money::from_cents(33),
                Money::from_cents(33)
            ]
        );

        let shares = apportion(Money::from_cents(1000), &[0.0, 0.0]);
        assert_eq!(shares, vec![Money::from_cents(500), Money::from_cents(500)]);

        let shares = apportion(Money::from_cents(1001), &[3.0, 1.0]);
        assert_eq!(shares.iter().sum::<Money>(), Money::from_cents(1001));
        assert_eq!(shares[0].cents(), 751);

        assert!(apportion(Money::from_cents(10), &[]).is_empty());
    }
}
