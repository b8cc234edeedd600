//! Credit-card installment splitting

use crate::models::Money;

/// Split a purchase into `count` installments that add up exactly to `total`
///
/// Leftover cents go to the first installments, one each. A count of zero
/// yields no installments.
pub fn split_installments(total: Money, count: u32) -> Vec<Money> {
    if count == 0 {
        return Vec::new();
    }

    let count = i64::from(count);
    let base = total.cents().div_euclid(count);
    let leftover = total.cents().rem_euclid(count);

    (0..count)
        .map(|i| Money::from_cents(base + i64::from(i < leftover)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let parts = split_installments(Money::from_cents(30_000), 3);
        assert_eq!(parts, vec![Money::from_cents(10_000); 3]);
    }

    #[test]
    fn test_leftover_on_first_installments() {
        let parts = split_installments(Money::from_cents(10_000), 3);
        assert_eq!(
            parts,
            vec![
                Money::from_cents(3_334),
                Money::from_cents(3_333),
                Money::from_cents(3_333)
            ]
        );
        assert_eq!(parts.iter().sum::<Money>(), Money::from_cents(10_000));
    }

    #[test]
    fn test_zero_count() {
        assert!(split_installments(Money::from_cents(100), 0).is_empty());
    }

    #[test]
    fn test_more_installments_than_cents() {
        let parts = split_installments(Money::from_cents(2), 4);
        assert_eq!(parts.iter().sum::<Money>(), Money::from_cents(2));
        assert_eq!(parts[0].cents(), 1);
        assert_eq!(parts[3].cents(), 0);
    }
}
