use serde::{Deserialize, Serialize};

use crate::display::round_currency;

/// Reasons offered by the sale discount picker
pub const COMMON_REASONS: [&str; 6] = [
    "Promocion del mes",
    "Cliente frecuente",
    "Compra por volumen",
    "Liquidacion",
    "Cortesia",
    "Otro",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SaleDiscountSpec {
    Percentage { percent: f64 },
    FixedAmount { amount: f64 },
}

/// A discount over the whole sale subtotal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SaleDiscount {
    pub subtotal: f64,
    pub amount: f64,
    pub percent: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaleDiscountError {
    #[error("A reason is required for a sale discount")]
    EmptyReason,

    #[error("Discount amount must be greater than zero")]
    NothingToDiscount,
}

impl SaleDiscount {
    pub fn compute(subtotal: f64, spec: SaleDiscountSpec) -> Self {
        let (amount, percent) = match spec {
            SaleDiscountSpec::Percentage { percent } => {
                (round_currency(subtotal * percent / 100.0), percent)
            }
            SaleDiscountSpec::FixedAmount { amount } => {
                let percent = if subtotal > 0.0 {
                    round_currency(amount / subtotal * 100.0)
                } else {
                    0.0
                };
                (amount, percent)
            }
        };

        Self {
            subtotal,
            amount,
            percent,
            total: subtotal - amount,
        }
    }

    pub fn validate(&self, reason: &str) -> Result<(), SaleDiscountError> {
        if reason.trim().is_empty() {
            return Err(SaleDiscountError::EmptyReason);
        }
        if self.amount <= 0.0 {
            return Err(SaleDiscountError::NothingToDiscount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_to_cents() {
        let spec = SaleDiscountSpec::Percentage { percent: 10.0 };
        let discount = SaleDiscount::compute(1234.57, spec);
        assert_eq!(discount.amount, 123.46);
        assert_eq!(discount.percent, 10.0);
        assert!((discount.total - 1111.11).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_amount_derives_percent() {
        let spec = SaleDiscountSpec::FixedAmount { amount: 100.0 };
        let discount = SaleDiscount::compute(300.0, spec);
        assert_eq!(discount.amount, 100.0);
        assert_eq!(discount.percent, 33.33);
        assert_eq!(discount.total, 200.0);

        let empty = SaleDiscount::compute(0.0, SaleDiscountSpec::FixedAmount { amount: 50.0 });
        assert_eq!(empty.percent, 0.0);
    }

    #[test]
    fn test_validate() {
        let discount = SaleDiscount::compute(100.0, SaleDiscountSpec::Percentage { percent: 5.0 });
        assert_eq!(discount.validate(COMMON_REASONS[1]), Ok(()));
        assert_eq!(discount.validate("  "), Err(SaleDiscountError::EmptyReason));

        let zero = SaleDiscount::compute(100.0, SaleDiscountSpec::Percentage { percent: 0.0 });
        assert_eq!(zero.validate("Cortesia"), Err(SaleDiscountError::NothingToDiscount));
    }
}
