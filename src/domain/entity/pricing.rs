use uuid::Uuid;

use crate::error::operation::OperationError;

use super::{impl_entity, state_copy, state_ref, EntityData};

/// Distance tier of a vehicle type.
///
/// The first tier (`from_km == 0` with a bounded `to_km`) charges its unit
/// price as a flat amount; every later tier charges per km driven inside the
/// tier. A rule without `to_km` is open ended and absorbs the remaining
/// distance.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRuleState {
    pub(in crate::domain) vehicle_type_id: Uuid,
    pub(in crate::domain) from_km: f64,
    pub(in crate::domain) to_km: Option<f64>,
    pub(in crate::domain) unit_price: i64,
}

#[derive(Debug, Clone)]
pub struct PricingRule {
    pub(in crate::domain) data: EntityData,
    pub(in crate::domain) state: PricingRuleState,
}

impl_entity!(PricingRule, PricingRuleState);

impl PricingRule {
    state_copy!(vehicle_type_id, Uuid);
    state_copy!(from_km, f64);
    state_copy!(to_km, Option<f64>);
    state_copy!(unit_price, i64);

    pub fn new(vehicle_type_id: Uuid, from_km: f64, to_km: Option<f64>, unit_price: i64) -> Self {
        Self {
            data: EntityData::new(),
            state: PricingRuleState {
                vehicle_type_id,
                from_km,
                to_km,
                unit_price,
            },
        }
    }

    fn is_flat(&self) -> bool {
        self.state.from_km == 0.0 && self.state.to_km.is_some()
    }

    pub fn overlaps(&self, other: &PricingRule) -> bool {
        let end = self.state.to_km.unwrap_or(f64::INFINITY);
        let other_end = other.state.to_km.unwrap_or(f64::INFINITY);
        self.state.from_km < other_end && other.state.from_km < end
    }
}

/// Cargo category markup applied on top of the tiered base price.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAdjustmentState {
    pub(in crate::domain) category: String,
    pub(in crate::domain) multiplier: f64,
    pub(in crate::domain) extra_fee: i64,
}

#[derive(Debug, Clone)]
pub struct CategoryAdjustment {
    pub(in crate::domain) data: EntityData,
    pub(in crate::domain) state: CategoryAdjustmentState,
}

impl_entity!(CategoryAdjustment, CategoryAdjustmentState);

impl CategoryAdjustment {
    state_ref!(category, String);
    state_copy!(multiplier, f64);
    state_copy!(extra_fee, i64);

    pub fn new(category: String, multiplier: f64, extra_fee: i64) -> Self {
        Self {
            data: EntityData::new(),
            state: CategoryAdjustmentState {
                category,
                multiplier,
                extra_fee,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierAmount {
    pub range: String,
    pub unit_price: i64,
    pub distance_km: f64,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Final price, all vehicles, rounded to the nearest 1000 VND.
    pub total_price: i64,
    pub base_price_per_vehicle: i64,
    pub adjusted_price_per_vehicle: i64,
    pub tiers: Vec<TierAmount>,
}

/// Rounds half-up to the nearest 1000 VND.
pub fn round_to_nearest_thousand(amount: i64) -> i64 {
    let rem = amount.rem_euclid(1000);
    if rem >= 500 {
        amount - rem + 1000
    } else {
        amount - rem
    }
}

pub fn deposit_amount(total: i64, percent: u32) -> i64 {
    round_to_nearest_thousand((total * percent as i64 + 50) / 100)
}

pub fn remaining_amount(total: i64, deposit: i64) -> i64 {
    round_to_nearest_thousand(total - deposit)
}

/// Walks the distance tiers in order, consuming the requested distance.
///
/// `rules` must be the tiers of a single vehicle type, sorted by `from_km`.
pub fn quote(
    rules: &[PricingRule],
    adjustment: Option<&CategoryAdjustment>,
    distance_km: f64,
    vehicle_count: u32,
) -> Result<Quote, OperationError> {
    if rules.is_empty() {
        return Err(OperationError::NoApplicableRule);
    }

    let mut remaining = distance_km;
    let mut base_price = 0.0f64;
    let mut tiers = Vec::new();

    for rule in rules {
        if remaining <= 0.0 && !rule.is_flat() {
            break;
        }

        if rule.is_flat() {
            let span = rule.to_km().unwrap_or(0.0) - rule.from_km();
            let consumed = remaining.min(span);
            remaining -= consumed;
            base_price += rule.unit_price() as f64;
            tiers.push(TierAmount {
                range: format!("{}-{} km", rule.from_km(), rule.to_km().unwrap_or(0.0)),
                unit_price: rule.unit_price(),
                distance_km: consumed.max(0.0),
                amount: rule.unit_price(),
            });
        } else {
            let consumed = match rule.to_km() {
                Some(to) => remaining.min(to - rule.from_km()),
                None => remaining,
            };
            remaining -= consumed;
            let amount = rule.unit_price() as f64 * consumed;
            base_price += amount;
            let range = match rule.to_km() {
                Some(to) => format!("{}-{to} km", rule.from_km()),
                None => format!(">={} km", rule.from_km()),
            };
            tiers.push(TierAmount {
                range,
                unit_price: rule.unit_price(),
                distance_km: consumed,
                amount: amount.round() as i64,
            });
        }
    }

    if remaining > 0.0 {
        return Err(OperationError::NoApplicableRule);
    }

    let adjusted = match adjustment {
        Some(adj) => base_price * adj.multiplier() + adj.extra_fee() as f64,
        None => base_price,
    };
    let total = adjusted * vehicle_count as f64;

    Ok(Quote {
        total_price: round_to_nearest_thousand(total.round() as i64),
        base_price_per_vehicle: round_to_nearest_thousand(base_price.round() as i64),
        adjusted_price_per_vehicle: round_to_nearest_thousand(adjusted.round() as i64),
        tiers,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tiers(vehicle_type_id: Uuid) -> Vec<PricingRule> {
        vec![
            PricingRule::new(vehicle_type_id, 0.0, Some(4.0), 150_000),
            PricingRule::new(vehicle_type_id, 4.0, Some(40.0), 12_000),
            PricingRule::new(vehicle_type_id, 40.0, None, 9_000),
        ]
    }

    #[test]
    fn rounding_is_half_up_to_thousand() {
        assert_eq!(round_to_nearest_thousand(1_499), 1_000);
        assert_eq!(round_to_nearest_thousand(1_500), 2_000);
        assert_eq!(round_to_nearest_thousand(0), 0);
        assert_eq!(round_to_nearest_thousand(999_999), 1_000_000);
    }

    #[test]
    fn deposit_and_remaining_round_consistently() {
        let total = 3_250_000;
        let deposit = deposit_amount(total, 30);
        assert_eq!(deposit, 975_000);
        assert_eq!(remaining_amount(total, deposit), 2_275_000);
    }

    #[test]
    fn short_trip_charges_flat_tier_only() {
        let rules = tiers(Uuid::new_v4());
        let quote = quote(&rules, None, 2.5, 1).unwrap();
        assert_eq!(quote.total_price, 150_000);
        assert_eq!(quote.tiers.len(), 1);
    }

    #[test]
    fn long_trip_walks_every_tier() {
        let rules = tiers(Uuid::new_v4());
        // 4 km flat + 36 km * 12k + 10 km * 9k = 150k + 432k + 90k
        let quote = quote(&rules, None, 50.0, 1).unwrap();
        assert_eq!(quote.base_price_per_vehicle, 672_000);
        assert_eq!(quote.total_price, 672_000);
        assert_eq!(quote.tiers.len(), 3);
        assert_eq!(quote.tiers[2].distance_km, 10.0);
    }

    #[test]
    fn category_adjustment_and_vehicle_count_scale_the_price() {
        let rules = tiers(Uuid::new_v4());
        let fragile = CategoryAdjustment::new("FRAGILE".into(), 1.25, 50_000);
        // base 672k -> 672k * 1.25 + 50k = 890k per vehicle, 2 vehicles
        let quote = quote(&rules, Some(&fragile), 50.0, 2).unwrap();
        assert_eq!(quote.adjusted_price_per_vehicle, 890_000);
        assert_eq!(quote.total_price, 1_780_000);
    }

    #[test]
    fn distance_beyond_bounded_tiers_requires_open_tier() {
        let vehicle_type_id = Uuid::new_v4();
        let bounded = vec![
            PricingRule::new(vehicle_type_id, 0.0, Some(4.0), 150_000),
            PricingRule::new(vehicle_type_id, 4.0, Some(40.0), 12_000),
        ];
        let err = quote(&bounded, None, 60.0, 1).unwrap_err();
        assert_eq!(err, OperationError::NoApplicableRule);
    }

    #[test]
    fn empty_rule_set_is_rejected() {
        assert_eq!(
            quote(&[], None, 10.0, 1).unwrap_err(),
            OperationError::NoApplicableRule
        );
    }

    #[test]
    fn overlapping_tiers_are_detected() {
        let id = Uuid::new_v4();
        let a = PricingRule::new(id, 4.0, Some(40.0), 12_000);
        let b = PricingRule::new(id, 30.0, None, 9_000);
        let c = PricingRule::new(id, 40.0, None, 9_000);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
