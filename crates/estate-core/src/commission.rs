//! The two-tier commission split applied to every closed deal.
//!
//! All arithmetic is decimal. `per_broker` is the quotient at full `Decimal`
//! precision, and the partner's share is whatever the agency's share leaves of
//! it, so the two shares always add back to `per_broker`. Rounding is only for
//! display, see [`CommissionSplit::rounded`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Share of each broker's cut kept by the agency (0.90).
pub const PRIMARY_SHARE_RATIO: Decimal = Decimal::from_parts(90, 0, 0, false, 2);

/// The derived monetary fields of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionSplit {
  pub total:         Decimal,
  pub per_broker:    Decimal,
  /// The agency's share of `per_broker`.
  pub primary_share: Decimal,
  /// The partner's share of `per_broker`.
  pub partner_share: Decimal,
}

impl CommissionSplit {
  /// Every field rounded to whole currency units, for display only.
  pub fn rounded(&self) -> Self {
    Self {
      total:         self.total.round_dp(0),
      per_broker:    self.per_broker.round_dp(0),
      primary_share: self.primary_share.round_dp(0),
      partner_share: self.partner_share.round_dp(0),
    }
  }
}

/// Split the brokerage collected from both sides of a deal.
pub fn compute(
  brokerage_from_owner: Decimal,
  brokerage_from_client: Decimal,
  number_of_brokers: u32,
) -> Result<CommissionSplit> {
  if number_of_brokers < 1 {
    return Err(Error::InvalidInput(
      "number of brokers must be at least 1".into(),
    ));
  }
  if brokerage_from_owner < Decimal::ZERO {
    return Err(Error::InvalidInput(
      "brokerage from owner must not be negative".into(),
    ));
  }
  if brokerage_from_client < Decimal::ZERO {
    return Err(Error::InvalidInput(
      "brokerage from client must not be negative".into(),
    ));
  }

  let total = brokerage_from_owner
    .checked_add(brokerage_from_client)
    .ok_or_else(|| Error::InvalidInput("total brokerage overflows".into()))?;

  let per_broker = total
    .checked_div(Decimal::from(number_of_brokers))
    .ok_or_else(|| Error::InvalidInput("per-broker share overflows".into()))?;

  let primary_share = per_broker
    .checked_mul(PRIMARY_SHARE_RATIO)
    .ok_or_else(|| Error::InvalidInput("primary share overflows".into()))?;
  let partner_share = per_broker - primary_share;

  Ok(CommissionSplit { total, per_broker, primary_share, partner_share })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(v: i64) -> Decimal { Decimal::from(v) }

  #[test]
  fn single_broker_example() {
    let split = compute(d(25_000), d(25_000), 1).unwrap();
    assert_eq!(split.total, d(50_000));
    assert_eq!(split.per_broker, d(50_000));
    assert_eq!(split.primary_share, d(45_000));
    assert_eq!(split.partner_share, d(5_000));
  }

  #[test]
  fn shares_sum_to_the_per_broker_quotient() {
    let amounts = [0, 1, 999, 25_000, 37_500, 1_234_567];
    for owner in amounts {
      for client in amounts {
        for n in 1..=10u32 {
          let split = compute(d(owner), d(client), n).unwrap();
          let quotient = d(owner + client) / d(n as i64);
          assert_eq!(split.per_broker, quotient);
          assert_eq!(split.primary_share + split.partner_share, quotient);
        }
      }
    }
  }

  #[test]
  fn fractional_amounts_split_exactly() {
    let owner = Decimal::new(1_234_555, 2); // 12345.55
    let client = Decimal::new(10, 1); // 1.0
    let split = compute(owner, client, 2).unwrap();
    assert_eq!(split.per_broker, Decimal::new(6_173_275, 3));
    assert_eq!(split.partner_share, Decimal::new(6_173_275, 4));
    assert_eq!(split.primary_share + split.partner_share, split.per_broker);
  }

  #[test]
  fn repeating_quotient_is_not_truncated() {
    let split = compute(d(50_000), d(0), 3).unwrap();
    let third = d(50_000) / d(3);
    assert_eq!(split.per_broker, third);
    assert_eq!(split.primary_share + split.partner_share, third);
    assert!(split.per_broker.scale() > 12);
    assert_eq!(split.rounded().per_broker, d(16_667));
  }

  #[test]
  fn zero_brokers_is_rejected() {
    assert!(matches!(compute(d(1), d(1), 0), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn negative_amounts_are_rejected() {
    assert!(matches!(compute(d(-1), d(1), 1), Err(Error::InvalidInput(_))));
    assert!(matches!(compute(d(1), d(-1), 1), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn ratio_constant_is_ninety_percent() {
    assert_eq!(PRIMARY_SHARE_RATIO, Decimal::new(90, 2));
  }
}
