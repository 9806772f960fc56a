//! Wedding cost splitting.
//!
//! Jointly incurred costs (meals, return presents, the venue reserve) are
//! divided between the husband's and the bride's side according to a split
//! method. Every split conserves money: the two shares always add up to the
//! total being split.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

/// How a headcount-priced cost (meals, presents) is divided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    /// Combined cost divided in two.
    #[default]
    Half,
    /// Husband's side pays the whole combined cost.
    Husband,
    /// Bride's side pays the whole combined cost.
    Bride,
    /// Each side pays for its own headcount.
    Privacy,
}

impl SplitMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::Husband => "husband",
            Self::Bride => "bride",
            Self::Privacy => "privacy",
        }
    }
}

impl TryFrom<&str> for SplitMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "half" => Ok(Self::Half),
            "husband" => Ok(Self::Husband),
            "bride" => Ok(Self::Bride),
            "privacy" => Ok(Self::Privacy),
            other => Err(EngineError::InvalidInput(format!(
                "invalid split method: {other}"
            ))),
        }
    }
}

/// How the venue reserve (deposit) is credited back to each side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReserveMethod {
    #[default]
    Half,
    Husband,
    Bride,
}

impl ReserveMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::Husband => "husband",
            Self::Bride => "bride",
        }
    }
}

impl TryFrom<&str> for ReserveMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "half" => Ok(Self::Half),
            "husband" => Ok(Self::Husband),
            "bride" => Ok(Self::Bride),
            other => Err(EngineError::InvalidInput(format!(
                "invalid reserve method: {other}"
            ))),
        }
    }
}

/// A cost divided between the two sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shares {
    pub husband: Money,
    pub bride: Money,
}

impl Shares {
    pub fn total(self) -> Option<Money> {
        self.husband.checked_add(self.bride)
    }
}

fn headcount_cost(price: Money, count: i64) -> ResultEngine<Money> {
    price
        .checked_mul(count)
        .ok_or_else(|| EngineError::InvalidAmount("headcount cost too large".to_string()))
}

/// Splits a per-head price over both sides' headcounts.
///
/// Returns the combined cost and each side's share of it. Half splits give
/// the odd unit to the husband's side.
pub fn split_headcount(
    method: SplitMethod,
    price: Money,
    husband_count: i64,
    bride_count: i64,
) -> ResultEngine<(Money, Shares)> {
    let husband_own = headcount_cost(price, husband_count)?;
    let bride_own = headcount_cost(price, bride_count)?;
    let all = husband_own
        .checked_add(bride_own)
        .ok_or_else(|| EngineError::InvalidAmount("headcount cost too large".to_string()))?;

    let shares = match method {
        SplitMethod::Privacy => Shares {
            husband: husband_own,
            bride: bride_own,
        },
        SplitMethod::Husband => Shares {
            husband: all,
            bride: Money::ZERO,
        },
        SplitMethod::Bride => Shares {
            husband: Money::ZERO,
            bride: all,
        },
        SplitMethod::Half => {
            let (husband, bride) = all.halves();
            Shares { husband, bride }
        }
    };
    Ok((all, shares))
}

/// Splits the reserve. The shares always add up to `reserve_price`.
pub fn split_reserve(method: ReserveMethod, reserve_price: Money) -> Shares {
    match method {
        ReserveMethod::Half => {
            let (husband, bride) = reserve_price.halves();
            Shares { husband, bride }
        }
        ReserveMethod::Husband => Shares {
            husband: reserve_price,
            bride: Money::ZERO,
        },
        ReserveMethod::Bride => Shares {
            husband: Money::ZERO,
            bride: reserve_price,
        },
    }
}

/// The derived settlement of a wedding, per side and combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Sum of each side's own cost categories.
    pub fixed: Shares,
    pub all_meal_cost: Money,
    pub meal: Shares,
    pub all_present_cost: Money,
    pub present: Shares,
    pub reserve: Shares,
    pub all_cost: Money,
    /// `all_cost` minus the reserve and both pre-deposits.
    pub all_payment: Money,
    pub husband_payment: Money,
    pub bride_payment: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_meal_split_halves_combined_cost() {
        let (all, shares) =
            split_headcount(SplitMethod::Half, Money::new(10_000), 3, 1).unwrap();
        assert_eq!(all, Money::new(40_000));
        assert_eq!(shares.husband, Money::new(20_000));
        assert_eq!(shares.bride, Money::new(20_000));
    }

    #[test]
    fn privacy_meal_split_charges_own_headcount() {
        let (all, shares) =
            split_headcount(SplitMethod::Privacy, Money::new(10_000), 3, 1).unwrap();
        assert_eq!(all, Money::new(40_000));
        assert_eq!(shares.husband, Money::new(30_000));
        assert_eq!(shares.bride, Money::new(10_000));
    }

    #[test]
    fn one_side_pays_everything() {
        let (_, husband) =
            split_headcount(SplitMethod::Husband, Money::new(5_000), 2, 4).unwrap();
        assert_eq!(husband, Shares { husband: Money::new(30_000), bride: Money::ZERO });

        let (_, bride) = split_headcount(SplitMethod::Bride, Money::new(5_000), 2, 4).unwrap();
        assert_eq!(bride, Shares { husband: Money::ZERO, bride: Money::new(30_000) });
    }

    #[test]
    fn odd_half_split_conserves_money() {
        let (all, shares) = split_headcount(SplitMethod::Half, Money::new(3), 1, 0).unwrap();
        assert_eq!(all, Money::new(3));
        assert_eq!(shares.husband, Money::new(2));
        assert_eq!(shares.bride, Money::new(1));
        assert_eq!(shares.total(), Some(all));
    }

    #[test]
    fn reserve_to_husband() {
        let shares = split_reserve(ReserveMethod::Husband, Money::new(50_000));
        assert_eq!(shares.husband, Money::new(50_000));
        assert_eq!(shares.bride, Money::ZERO);
    }

    #[test]
    fn reserve_shares_always_sum_to_reserve() {
        for method in [ReserveMethod::Half, ReserveMethod::Husband, ReserveMethod::Bride] {
            for price in [0, 1, 50_000, 50_001] {
                let shares = split_reserve(method, Money::new(price));
                assert_eq!(shares.total(), Some(Money::new(price)), "{method:?} {price}");
            }
        }
    }

    #[test]
    fn unknown_methods_are_rejected() {
        assert!(SplitMethod::try_from("").is_err());
        assert!(SplitMethod::try_from("split").is_err());
        assert!(ReserveMethod::try_from("privacy").is_err());
        assert_eq!(SplitMethod::try_from("privacy").unwrap(), SplitMethod::Privacy);
    }

    #[test]
    fn headcount_overflow_is_an_error() {
        assert!(split_headcount(SplitMethod::Half, Money::new(i64::MAX), 2, 0).is_err());
    }
}
