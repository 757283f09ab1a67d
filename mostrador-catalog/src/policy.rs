use mostrador_core::app_config::PricingSettings;
use mostrador_core::{CoreError, CoreResult, UserRole};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Discount governance shared by the line-item editor and the catalog builder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorizationPolicy {
    /// Maximum discount percent each role may apply on its own
    pub ceilings: HashMap<UserRole, f64>,

    /// Ceiling for roles without an entry in `ceilings`
    pub default_ceiling: f64,

    /// Discounts strictly above this percent need a written reason
    pub reason_threshold_percent: f64,
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self {
            ceilings: {
                let mut m = HashMap::new();
                m.insert(UserRole::Vendedor, 10.0);
                m.insert(UserRole::Supervisor, 20.0);
                m.insert(UserRole::Admin, 30.0);
                m.insert(UserRole::Gerente, 100.0);
                m
            },
            default_ceiling: 10.0,
            reason_threshold_percent: 10.0,
        }
    }
}

impl AuthorizationPolicy {
    /// Build a policy from the `[pricing]` configuration section
    pub fn from_settings(settings: &PricingSettings) -> CoreResult<Self> {
        let mut ceilings = HashMap::with_capacity(settings.ceilings.len());
        for (name, ceiling) in &settings.ceilings {
            let role: UserRole = name.parse().map_err(|_| {
                CoreError::InvalidPolicy(format!("unknown role in ceilings: {}", name))
            })?;
            ceilings.insert(role, *ceiling);
        }

        let policy = Self {
            ceilings,
            default_ceiling: settings.default_ceiling,
            reason_threshold_percent: settings.reason_threshold_percent,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> CoreResult<()> {
        let check = |label: String, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(CoreError::InvalidPolicy(format!(
                    "{} must be a non-negative number, got {}",
                    label, value
                )))
            }
        };

        check("default_ceiling".to_string(), self.default_ceiling)?;
        check("reason_threshold_percent".to_string(), self.reason_threshold_percent)?;
        for (role, ceiling) in &self.ceilings {
            check(format!("ceiling for {}", role), *ceiling)?;
        }
        Ok(())
    }

    pub fn authorization_ceiling(&self, role: UserRole) -> f64 {
        self.ceilings.get(&role).copied().unwrap_or(self.default_ceiling)
    }

    /// Markups (negative discounts) never need authorization
    pub fn requires_authorization(&self, discount_percent: f64, role: UserRole) -> bool {
        discount_percent > 0.0 && discount_percent > self.authorization_ceiling(role)
    }

    pub fn requires_reason(&self, discount_percent: f64, below_cost: bool) -> bool {
        discount_percent > self.reason_threshold_percent || below_cost
    }
}
