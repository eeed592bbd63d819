//! Fee and rebate tier lookup, pure functions over the configured tables.

use crate::types::{FeeTier, RebateTier};
use soroban_sdk::Vec;

/// Yearly base fee for a label of `len` characters: first tier whose
/// `char_num` covers the length, falling through to the last tier's amount
/// for longer labels.
pub fn base_fee(tiers: &Vec<FeeTier>, len: u32) -> i128 {
    let mut amount = 0i128;
    for t in tiers.iter() {
        amount = t.amount;
        if len <= t.char_num {
            return t.amount;
        }
    }
    amount
}

/// Rebate percentage for referral number `count` (the referral about to be
/// counted). The last tier is the catch-all.
pub fn rebate_rate(tiers: &Vec<RebateTier>, count: u64) -> u32 {
    let mut rate = 0u32;
    for t in tiers.iter() {
        rate = t.rate;
        if count <= t.up_to {
            return t.rate;
        }
    }
    rate
}

/// Tiers must be sorted by ascending char length with non-increasing fees:
/// shorter labels never cost less than longer ones.
pub fn fees_well_formed(tiers: &Vec<FeeTier>) -> bool {
    let mut prev: Option<FeeTier> = None;
    for t in tiers.iter() {
        if t.char_num == 0 || t.amount < 0 {
            return false;
        }
        if let Some(p) = prev {
            if t.char_num <= p.char_num || t.amount > p.amount {
                return false;
            }
        }
        prev = Some(t);
    }
    true
}

/// Thresholds strictly ascending, rates capped at 100 percent.
pub fn rebates_well_formed(tiers: &Vec<RebateTier>) -> bool {
    let mut prev: Option<RebateTier> = None;
    for t in tiers.iter() {
        if t.rate > 100 {
            return false;
        }
        if let Some(p) = prev {
            if t.up_to <= p.up_to {
                return false;
            }
        }
        prev = Some(t);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{vec, Env};

    fn fee_table(e: &Env) -> Vec<FeeTier> {
        vec![
            e,
            FeeTier { char_num: 3, amount: 150 },
            FeeTier { char_num: 4, amount: 20 },
            FeeTier { char_num: 5, amount: 3 },
        ]
    }

    #[test]
    fn fee_tiers_select_by_length() {
        let e = Env::default();
        let tiers = fee_table(&e);
        assert_eq!(base_fee(&tiers, 1), 150);
        assert_eq!(base_fee(&tiers, 3), 150);
        assert_eq!(base_fee(&tiers, 4), 20);
        assert_eq!(base_fee(&tiers, 5), 3);
        // the last tier is the floor for anything longer
        assert_eq!(base_fee(&tiers, 6), 3);
        assert_eq!(base_fee(&tiers, 42), 3);
    }

    #[test]
    fn rebate_tiers_select_by_count() {
        let e = Env::default();
        let tiers = vec![
            &e,
            RebateTier { up_to: 10, rate: 5 },
            RebateTier { up_to: 30, rate: 10 },
            RebateTier { up_to: 9999, rate: 15 },
        ];
        assert_eq!(rebate_rate(&tiers, 1), 5);
        assert_eq!(rebate_rate(&tiers, 10), 5);
        assert_eq!(rebate_rate(&tiers, 11), 10);
        assert_eq!(rebate_rate(&tiers, 30), 10);
        assert_eq!(rebate_rate(&tiers, 31), 15);
        assert_eq!(rebate_rate(&tiers, 100_000), 15);
    }

    #[test]
    fn validation_rejects_disorder() {
        let e = Env::default();
        assert!(fees_well_formed(&fee_table(&e)));
        // fee rising with length breaks monotonicity
        let bad = vec![
            &e,
            FeeTier { char_num: 3, amount: 10 },
            FeeTier { char_num: 4, amount: 20 },
        ];
        assert!(!fees_well_formed(&bad));
        let dup = vec![
            &e,
            FeeTier { char_num: 3, amount: 20 },
            FeeTier { char_num: 3, amount: 10 },
        ];
        assert!(!fees_well_formed(&dup));

        let bad_rate = vec![&e, RebateTier { up_to: 10, rate: 101 }];
        assert!(!rebates_well_formed(&bad_rate));
        let bad_order = vec![
            &e,
            RebateTier { up_to: 30, rate: 5 },
            RebateTier { up_to: 10, rate: 10 },
        ];
        assert!(!rebates_well_formed(&bad_order));
    }
}
