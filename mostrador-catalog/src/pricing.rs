use mostrador_core::UserRole;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::policy::AuthorizationPolicy;

/// How the operator wants to move away from the list price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdjustmentSpec {
    /// Percent off the base price
    Percentage { percent: f64 },
    /// Currency amount off the base price
    FixedAmount { amount: f64 },
    /// Replacement price; the base price is ignored
    FixedPrice { price: f64 },
}

impl AdjustmentSpec {
    pub fn none() -> Self {
        AdjustmentSpec::Percentage { percent: 0.0 }
    }
}

/// Everything the editing UI shows for one adjustment, recomputed on every input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceAdjustmentResult {
    pub base_price: f64,
    pub final_price: f64,
    pub discount_amount: f64,
    pub discount_percent: f64,
    pub margin_percent: f64,
    /// Margin of the unadjusted base price
    pub original_margin_percent: f64,
    pub below_cost: bool,
    /// How much under cost the final price is, 0 when not below cost
    pub loss_amount: f64,
    pub authorization_ceiling: f64,
    pub requires_authorization: bool,
    pub requires_reason: bool,
}

impl PriceAdjustmentResult {
    pub fn has_discount(&self) -> bool {
        self.discount_amount > 0.0
    }
}

pub fn compute_final_price(base_price: f64, spec: &AdjustmentSpec) -> f64 {
    match *spec {
        AdjustmentSpec::Percentage { percent } => {
            (base_price * (1.0 - percent / 100.0)).max(0.0)
        }
        AdjustmentSpec::FixedAmount { amount } => (base_price - amount).max(0.0),
        AdjustmentSpec::FixedPrice { price } => price,
    }
}

/// Negative for a markup; not clamped
pub fn compute_discount_percent(base_price: f64, final_price: f64) -> f64 {
    if base_price > 0.0 {
        (base_price - final_price) / base_price * 100.0
    } else {
        0.0
    }
}

/// Margin over cost, `(price - cost) / cost`
pub fn compute_margin_percent(price: f64, cost: f64) -> f64 {
    if cost > 0.0 {
        (price - cost) / cost * 100.0
    } else {
        0.0
    }
}

pub fn is_below_cost(price: f64, cost: f64) -> bool {
    cost > 0.0 && price < cost
}

/// Price adjustment engine. Holds no state besides the policy table, so one
/// instance can serve any number of concurrent editors.
#[derive(Debug, Clone, Default)]
pub struct PriceAdjustmentEngine {
    policy: AuthorizationPolicy,
}

impl PriceAdjustmentEngine {
    pub fn new(policy: AuthorizationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AuthorizationPolicy {
        &self.policy
    }

    pub fn authorization_ceiling(&self, role: UserRole) -> f64 {
        self.policy.authorization_ceiling(role)
    }

    pub fn requires_authorization(&self, discount_percent: f64, role: UserRole) -> bool {
        self.policy.requires_authorization(discount_percent, role)
    }

    pub fn evaluate(
        &self,
        base_price: f64,
        cost: f64,
        spec: &AdjustmentSpec,
        role: UserRole,
    ) -> PriceAdjustmentResult {
        let final_price = compute_final_price(base_price, spec);
        let discount_percent = compute_discount_percent(base_price, final_price);
        let below_cost = is_below_cost(final_price, cost);

        let result = PriceAdjustmentResult {
            base_price,
            final_price,
            discount_amount: base_price - final_price,
            discount_percent,
            margin_percent: compute_margin_percent(final_price, cost),
            original_margin_percent: compute_margin_percent(base_price, cost),
            below_cost,
            loss_amount: if below_cost { cost - final_price } else { 0.0 },
            authorization_ceiling: self.policy.authorization_ceiling(role),
            requires_authorization: self.policy.requires_authorization(discount_percent, role),
            requires_reason: self.policy.requires_reason(discount_percent, below_cost),
        };

        debug!(
            ?spec,
            %role,
            base_price,
            final_price,
            discount_percent,
            requires_authorization = result.requires_authorization,
            below_cost,
            "Evaluated price adjustment"
        );

        result
    }
}
