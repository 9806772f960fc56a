//! Wedding expense records and their settlement.
//!
//! A wedding stores ten cost categories per side plus headcounts for meals
//! and return presents. The settlement is derived on read and never stored.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    split::{ReserveMethod, Settlement, Shares, SplitMethod, split_headcount, split_reserve},
    util::parse_uuid,
};

/// The ten cost categories each side pays on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCosts {
    pub hall_rental: Money,
    pub sword_rental: Money,
    pub bouquet: Money,
    pub operator_fee: Money,
    pub grooming_female: Money,
    pub grooming_male: Money,
    pub frame: Money,
    pub raw_file: Money,
    pub video: Money,
    pub misc: Money,
}

impl SideCosts {
    fn categories(&self) -> [Money; 10] {
        [
            self.hall_rental,
            self.sword_rental,
            self.bouquet,
            self.operator_fee,
            self.grooming_female,
            self.grooming_male,
            self.frame,
            self.raw_file,
            self.video,
            self.misc,
        ]
    }

    pub fn total(&self) -> ResultEngine<Money> {
        checked_sum(self.categories())
    }
}

fn too_large() -> EngineError {
    EngineError::InvalidAmount("settlement amount too large".to_string())
}

fn checked_sum(parts: impl IntoIterator<Item = Money>) -> ResultEngine<Money> {
    parts
        .into_iter()
        .try_fold(Money::ZERO, |acc, part| acc.checked_add(part).ok_or_else(too_large))
}

fn checked_minus(from: Money, parts: impl IntoIterator<Item = Money>) -> ResultEngine<Money> {
    parts
        .into_iter()
        .try_fold(from, |acc, part| acc.checked_sub(part).ok_or_else(too_large))
}

/// One side of the wedding (husband's or bride's).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub image: Option<String>,
    pub costs: SideCosts,
    pub meal_count: i64,
    pub present_count: i64,
    pub pre_deposit: Money,
}

impl Party {
    fn validate(&self, side: &str) -> ResultEngine<()> {
        if self.meal_count < 0 || self.present_count < 0 {
            return Err(EngineError::InvalidInput(format!(
                "{side} headcounts must be >= 0"
            )));
        }
        if self.pre_deposit.is_negative()
            || self.costs.categories().iter().any(|c| c.is_negative())
        {
            return Err(EngineError::InvalidAmount(format!(
                "{side} costs must be >= 0"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wedding {
    pub id: Uuid,
    pub wedding_at: DateTime<Utc>,
    pub event_at: DateTime<Utc>,
    pub meal_method: SplitMethod,
    pub present_method: SplitMethod,
    pub reserve_method: ReserveMethod,
    pub meal_price: Money,
    pub present_price: Money,
    pub reserve_price: Money,
    pub husband: Party,
    pub bride: Party,
    pub created_at: DateTime<Utc>,
}

/// Masks a person's name, keeping only its first and last character.
///
/// `"홍길동"` becomes `"홍*동"`; names of one or two characters keep their
/// first character followed by a single `*`. Characters are counted after
/// NFC normalization so composed syllables count once.
pub fn mask_name(name: &str) -> ResultEngine<String> {
    let chars: Vec<char> = name.trim().nfc().collect();
    match chars.as_slice() {
        [] => Err(EngineError::InvalidInput(
            "name must not be empty".to_string(),
        )),
        [first] | [first, _] => Ok(format!("{first}*")),
        [first, middle @ .., last] => {
            Ok(format!("{first}{}{last}", "*".repeat(middle.len())))
        }
    }
}

impl Wedding {
    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if self.meal_price.is_negative()
            || self.present_price.is_negative()
            || self.reserve_price.is_negative()
        {
            return Err(EngineError::InvalidAmount(
                "prices must be >= 0".to_string(),
            ));
        }
        self.husband.validate("husband")?;
        self.bride.validate("bride")?;
        self.settlement().map(|_| ())
    }

    /// Derives both sides' totals from the stored costs and split methods.
    pub fn settlement(&self) -> ResultEngine<Settlement> {
        let fixed = Shares {
            husband: self.husband.costs.total()?,
            bride: self.bride.costs.total()?,
        };
        let (all_meal_cost, meal) = split_headcount(
            self.meal_method,
            self.meal_price,
            self.husband.meal_count,
            self.bride.meal_count,
        )?;
        let (all_present_cost, present) = split_headcount(
            self.present_method,
            self.present_price,
            self.husband.present_count,
            self.bride.present_count,
        )?;
        let reserve = split_reserve(self.reserve_method, self.reserve_price);

        let all_cost = checked_sum([fixed.husband, fixed.bride, all_meal_cost, all_present_cost])?;
        let all_payment = checked_minus(
            all_cost,
            [
                self.reserve_price,
                self.husband.pre_deposit,
                self.bride.pre_deposit,
            ],
        )?;
        let husband_payment = checked_minus(
            checked_sum([fixed.husband, meal.husband, present.husband])?,
            [reserve.husband, self.husband.pre_deposit],
        )?;
        let bride_payment = checked_minus(
            checked_sum([fixed.bride, meal.bride, present.bride])?,
            [reserve.bride, self.bride.pre_deposit],
        )?;

        Ok(Settlement {
            fixed,
            all_meal_cost,
            meal,
            all_present_cost,
            present,
            reserve,
            all_cost,
            all_payment,
            husband_payment,
            bride_payment,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "weddings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub wedding_at: DateTimeUtc,
    pub event_at: DateTimeUtc,
    pub meal_method: String,
    pub present_method: String,
    pub reserve_method: String,
    pub meal_price: i64,
    pub present_price: i64,
    pub reserve_price: i64,
    pub husband_name: String,
    pub husband_image: Option<String>,
    pub husband_hall_rental: i64,
    pub husband_sword_rental: i64,
    pub husband_bouquet: i64,
    pub husband_operator_fee: i64,
    pub husband_grooming_female: i64,
    pub husband_grooming_male: i64,
    pub husband_frame: i64,
    pub husband_raw_file: i64,
    pub husband_video: i64,
    pub husband_misc: i64,
    pub husband_meal_count: i64,
    pub husband_present_count: i64,
    pub husband_pre_deposit: i64,
    pub bride_name: String,
    pub bride_image: Option<String>,
    pub bride_hall_rental: i64,
    pub bride_sword_rental: i64,
    pub bride_bouquet: i64,
    pub bride_operator_fee: i64,
    pub bride_grooming_female: i64,
    pub bride_grooming_male: i64,
    pub bride_frame: i64,
    pub bride_raw_file: i64,
    pub bride_video: i64,
    pub bride_misc: i64,
    pub bride_meal_count: i64,
    pub bride_present_count: i64,
    pub bride_pre_deposit: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Wedding> for ActiveModel {
    fn from(w: &Wedding) -> Self {
        let (h, b) = (&w.husband, &w.bride);
        Self {
            id: ActiveValue::Set(w.id.to_string()),
            wedding_at: ActiveValue::Set(w.wedding_at),
            event_at: ActiveValue::Set(w.event_at),
            meal_method: ActiveValue::Set(w.meal_method.as_str().to_string()),
            present_method: ActiveValue::Set(w.present_method.as_str().to_string()),
            reserve_method: ActiveValue::Set(w.reserve_method.as_str().to_string()),
            meal_price: ActiveValue::Set(w.meal_price.units()),
            present_price: ActiveValue::Set(w.present_price.units()),
            reserve_price: ActiveValue::Set(w.reserve_price.units()),
            husband_name: ActiveValue::Set(h.name.clone()),
            husband_image: ActiveValue::Set(h.image.clone()),
            husband_hall_rental: ActiveValue::Set(h.costs.hall_rental.units()),
            husband_sword_rental: ActiveValue::Set(h.costs.sword_rental.units()),
            husband_bouquet: ActiveValue::Set(h.costs.bouquet.units()),
            husband_operator_fee: ActiveValue::Set(h.costs.operator_fee.units()),
            husband_grooming_female: ActiveValue::Set(h.costs.grooming_female.units()),
            husband_grooming_male: ActiveValue::Set(h.costs.grooming_male.units()),
            husband_frame: ActiveValue::Set(h.costs.frame.units()),
            husband_raw_file: ActiveValue::Set(h.costs.raw_file.units()),
            husband_video: ActiveValue::Set(h.costs.video.units()),
            husband_misc: ActiveValue::Set(h.costs.misc.units()),
            husband_meal_count: ActiveValue::Set(h.meal_count),
            husband_present_count: ActiveValue::Set(h.present_count),
            husband_pre_deposit: ActiveValue::Set(h.pre_deposit.units()),
            bride_name: ActiveValue::Set(b.name.clone()),
            bride_image: ActiveValue::Set(b.image.clone()),
            bride_hall_rental: ActiveValue::Set(b.costs.hall_rental.units()),
            bride_sword_rental: ActiveValue::Set(b.costs.sword_rental.units()),
            bride_bouquet: ActiveValue::Set(b.costs.bouquet.units()),
            bride_operator_fee: ActiveValue::Set(b.costs.operator_fee.units()),
            bride_grooming_female: ActiveValue::Set(b.costs.grooming_female.units()),
            bride_grooming_male: ActiveValue::Set(b.costs.grooming_male.units()),
            bride_frame: ActiveValue::Set(b.costs.frame.units()),
            bride_raw_file: ActiveValue::Set(b.costs.raw_file.units()),
            bride_video: ActiveValue::Set(b.costs.video.units()),
            bride_misc: ActiveValue::Set(b.costs.misc.units()),
            bride_meal_count: ActiveValue::Set(b.meal_count),
            bride_present_count: ActiveValue::Set(b.present_count),
            bride_pre_deposit: ActiveValue::Set(b.pre_deposit.units()),
            created_at: ActiveValue::Set(w.created_at),
        }
    }
}

impl TryFrom<Model> for Wedding {
    type Error = EngineError;

    fn try_from(m: Model) -> ResultEngine<Self> {
        let husband = Party {
            name: m.husband_name,
            image: m.husband_image,
            costs: SideCosts {
                hall_rental: Money::new(m.husband_hall_rental),
                sword_rental: Money::new(m.husband_sword_rental),
                bouquet: Money::new(m.husband_bouquet),
                operator_fee: Money::new(m.husband_operator_fee),
                grooming_female: Money::new(m.husband_grooming_female),
                grooming_male: Money::new(m.husband_grooming_male),
                frame: Money::new(m.husband_frame),
                raw_file: Money::new(m.husband_raw_file),
                video: Money::new(m.husband_video),
                misc: Money::new(m.husband_misc),
            },
            meal_count: m.husband_meal_count,
            present_count: m.husband_present_count,
            pre_deposit: Money::new(m.husband_pre_deposit),
        };
        let bride = Party {
            name: m.bride_name,
            image: m.bride_image,
            costs: SideCosts {
                hall_rental: Money::new(m.bride_hall_rental),
                sword_rental: Money::new(m.bride_sword_rental),
                bouquet: Money::new(m.bride_bouquet),
                operator_fee: Money::new(m.bride_operator_fee),
                grooming_female: Money::new(m.bride_grooming_female),
                grooming_male: Money::new(m.bride_grooming_male),
                frame: Money::new(m.bride_frame),
                raw_file: Money::new(m.bride_raw_file),
                video: Money::new(m.bride_video),
                misc: Money::new(m.bride_misc),
            },
            meal_count: m.bride_meal_count,
            present_count: m.bride_present_count,
            pre_deposit: Money::new(m.bride_pre_deposit),
        };

        Ok(Self {
            id: parse_uuid(&m.id, "wedding")?,
            wedding_at: m.wedding_at,
            event_at: m.event_at,
            meal_method: SplitMethod::try_from(m.meal_method.as_str())?,
            present_method: SplitMethod::try_from(m.present_method.as_str())?,
            reserve_method: ReserveMethod::try_from(m.reserve_method.as_str())?,
            meal_price: Money::new(m.meal_price),
            present_price: Money::new(m.present_price),
            reserve_price: Money::new(m.reserve_price),
            husband,
            bride,
            created_at: m.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedding() -> Wedding {
        let now = Utc::now();
        Wedding {
            id: Uuid::new_v4(),
            wedding_at: now,
            event_at: now,
            meal_method: SplitMethod::Half,
            present_method: SplitMethod::Half,
            reserve_method: ReserveMethod::Half,
            meal_price: Money::new(10_000),
            present_price: Money::new(3_000),
            reserve_price: Money::new(50_000),
            husband: Party {
                name: "김*수".to_string(),
                costs: SideCosts {
                    hall_rental: Money::new(500_000),
                    video: Money::new(200_000),
                    ..SideCosts::default()
                },
                meal_count: 3,
                present_count: 3,
                pre_deposit: Money::new(100_000),
                ..Party::default()
            },
            bride: Party {
                name: "이*".to_string(),
                costs: SideCosts {
                    hall_rental: Money::new(500_000),
                    bouquet: Money::new(80_000),
                    ..SideCosts::default()
                },
                meal_count: 1,
                present_count: 2,
                pre_deposit: Money::new(20_001),
                ..Party::default()
            },
            created_at: now,
        }
    }

    #[test]
    fn mask_keeps_first_and_last() {
        assert_eq!(mask_name("홍길동").unwrap(), "홍*동");
        assert_eq!(mask_name("남궁민수").unwrap(), "남**수");
        assert_eq!(mask_name("Alexander").unwrap(), "A*******r");
    }

    #[test]
    fn mask_short_names() {
        assert_eq!(mask_name("이현").unwrap(), "이*");
        assert_eq!(mask_name("K").unwrap(), "K*");
        assert!(mask_name("   ").is_err());
    }

    #[test]
    fn mask_counts_composed_syllables_once() {
        // "한" spelled with conjoining jamo (decomposed form).
        let decomposed = "\u{1112}\u{1161}\u{11AB}\u{1100}\u{1173}\u{11AF}";
        assert_eq!(mask_name(decomposed).unwrap(), "한*");
    }

    #[test]
    fn fixed_totals_are_per_side() {
        let settlement = wedding().settlement().unwrap();
        assert_eq!(settlement.fixed.husband, Money::new(700_000));
        assert_eq!(settlement.fixed.bride, Money::new(580_000));
    }

    #[test]
    fn aggregates_match_sum_of_sides() {
        let mut w = wedding();
        for meal in [SplitMethod::Half, SplitMethod::Husband, SplitMethod::Bride, SplitMethod::Privacy] {
            for reserve in [ReserveMethod::Half, ReserveMethod::Husband, ReserveMethod::Bride] {
                for reserve_price in [0, 50_000, 50_001] {
                    w.meal_method = meal;
                    w.present_method = meal;
                    w.reserve_method = reserve;
                    w.reserve_price = Money::new(reserve_price);
                    let s = w.settlement().unwrap();
                    assert_eq!(
                        s.husband_payment + s.bride_payment,
                        s.all_payment,
                        "{meal:?} {reserve:?} {reserve_price}"
                    );
                    assert_eq!(s.meal.total(), Some(s.all_meal_cost));
                    assert_eq!(s.present.total(), Some(s.all_present_cost));
                }
            }
        }
    }

    #[test]
    fn overflowing_costs_are_rejected() {
        let mut w = wedding();
        w.husband.costs.hall_rental = Money::new(i64::MAX);
        w.husband.costs.sword_rental = Money::new(1);
        assert!(matches!(w.settlement(), Err(EngineError::InvalidAmount(_))));
        assert!(matches!(w.validate(), Err(EngineError::InvalidAmount(_))));

        let mut w = wedding();
        w.husband.costs.hall_rental = Money::new(i64::MAX - 100);
        assert!(matches!(w.settlement(), Err(EngineError::InvalidAmount(_))));
    }

    #[test]
    fn settlement_figures() {
        let s = wedding().settlement().unwrap();
        // meals: 4 heads * 10,000 halved; presents: 5 heads * 3,000 halved.
        assert_eq!(s.all_meal_cost, Money::new(40_000));
        assert_eq!(s.meal, Shares { husband: Money::new(20_000), bride: Money::new(20_000) });
        assert_eq!(s.all_present_cost, Money::new(15_000));
        assert_eq!(s.present, Shares { husband: Money::new(7_500), bride: Money::new(7_500) });
        assert_eq!(s.all_cost, Money::new(1_335_000));
        assert_eq!(s.all_payment, Money::new(1_335_000 - 50_000 - 100_000 - 20_001));
        assert_eq!(
            s.husband_payment,
            Money::new(700_000 + 20_000 + 7_500 - 25_000 - 100_000)
        );
        assert_eq!(
            s.bride_payment,
            Money::new(580_000 + 20_000 + 7_500 - 25_000 - 20_001)
        );
    }

    #[test]
    fn validate_rejects_negative_inputs() {
        let mut w = wedding();
        w.bride.meal_count = -1;
        assert!(w.validate().is_err());

        let mut w = wedding();
        w.husband.costs.frame = Money::new(-5);
        assert!(w.validate().is_err());

        let mut w = wedding();
        w.reserve_price = Money::new(-1);
        assert!(w.validate().is_err());
    }
}
