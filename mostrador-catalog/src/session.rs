use chrono::{DateTime, Utc};
use mostrador_core::UserRole;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::pricing::{AdjustmentSpec, PriceAdjustmentEngine, PriceAdjustmentResult};
use crate::product::{PriceTier, Product};

/// Lifecycle of one line-item price edit:
/// `Idle -> Editing(spec) -> Blocked | Ready -> Committed`.
/// `Editing` resolves as soon as the engine has evaluated the adjustment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditState {
    Idle,
    Editing { spec: AdjustmentSpec },
    Blocked,
    Ready,
    Committed,
}

/// Tag persisted on the line item next to the unit price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceClassification {
    List { tier: PriceTier },
    Custom,
}

/// What the caller writes back into the sale line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommittedPrice {
    pub product_id: String,
    pub base_price: f64,
    pub unit_price: f64,
    pub classification: PriceClassification,
    pub discount_amount: f64,
    pub discount_percent: f64,
    pub reason: Option<String>,
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommitError {
    #[error("No price adjustment to commit")]
    NothingToCommit,

    #[error("Discount of {requested:.1}% requires authorization (allowed up to {ceiling}%)")]
    AuthorizationRequired {
        requested: f64,
        ceiling: f64,
    },

    #[error("A reason is required for this price")]
    ReasonRequired,

    #[error("Price already committed")]
    AlreadyCommitted,
}

/// One open price editor for a sale line. The engine decides the flags;
/// the session only refuses to commit while they say so.
pub struct PriceEditSession<'a> {
    engine: &'a PriceAdjustmentEngine,
    product: Product,
    role: UserRole,
    tier: PriceTier,
    spec: Option<AdjustmentSpec>,
    result: Option<PriceAdjustmentResult>,
    reason: String,
    state: EditState,
}

impl<'a> PriceEditSession<'a> {
    pub fn new(
        engine: &'a PriceAdjustmentEngine,
        product: Product,
        tier: PriceTier,
        role: UserRole,
    ) -> Self {
        Self {
            engine,
            product,
            role,
            tier,
            spec: None,
            result: None,
            reason: String::new(),
            state: EditState::Idle,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn tier(&self) -> PriceTier {
        self.tier
    }

    pub fn result(&self) -> Option<&PriceAdjustmentResult> {
        self.result.as_ref()
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Switch between retail and wholesale; re-evaluates the current spec
    pub fn select_tier(&mut self, tier: PriceTier) -> Result<(), CommitError> {
        self.ensure_open()?;
        self.tier = tier;
        if let Some(spec) = self.spec {
            self.resolve(spec);
        }
        Ok(())
    }

    pub fn edit(&mut self, spec: AdjustmentSpec) -> Result<PriceAdjustmentResult, CommitError> {
        self.ensure_open()?;
        Ok(self.resolve(spec))
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) -> Result<(), CommitError> {
        self.ensure_open()?;
        self.reason = reason.into();
        Ok(())
    }

    pub fn can_commit(&self) -> bool {
        self.check_commit().is_ok()
    }

    pub fn commit(&mut self) -> Result<CommittedPrice, CommitError> {
        if let Err(err) = self.check_commit() {
            warn!(
                product_id = %self.product.id,
                role = %self.role,
                "Refused price commit: {}",
                err
            );
            return Err(err);
        }

        let (spec, result) = match (self.spec, self.result.as_ref()) {
            (Some(spec), Some(result)) => (spec, result),
            _ => return Err(CommitError::NothingToCommit),
        };

        let is_override = matches!(spec, AdjustmentSpec::FixedPrice { .. });
        let classification = if is_override || result.has_discount() {
            PriceClassification::Custom
        } else {
            PriceClassification::List { tier: self.tier }
        };

        let reason = self.reason.trim();
        let committed = CommittedPrice {
            product_id: self.product.id.clone(),
            base_price: result.base_price,
            unit_price: result.final_price,
            classification,
            discount_amount: result.discount_amount,
            discount_percent: result.discount_percent,
            reason: (!reason.is_empty()).then(|| reason.to_string()),
            committed_at: Utc::now(),
        };

        self.state = EditState::Committed;
        info!(
            product_id = %committed.product_id,
            unit_price = committed.unit_price,
            discount_percent = committed.discount_percent,
            "Committed line item price"
        );

        Ok(committed)
    }

    fn resolve(&mut self, spec: AdjustmentSpec) -> PriceAdjustmentResult {
        self.state = EditState::Editing { spec };
        let result = self.engine.evaluate(
            self.product.base_price(self.tier),
            self.product.cost,
            &spec,
            self.role,
        );

        self.state = if result.requires_authorization {
            EditState::Blocked
        } else {
            EditState::Ready
        };
        self.spec = Some(spec);
        self.result = Some(result.clone());
        result
    }

    fn ensure_open(&self) -> Result<(), CommitError> {
        if self.state == EditState::Committed {
            return Err(CommitError::AlreadyCommitted);
        }
        Ok(())
    }

    fn check_commit(&self) -> Result<(), CommitError> {
        match (self.state, self.result.as_ref()) {
            (EditState::Committed, _) => Err(CommitError::AlreadyCommitted),
            (EditState::Blocked, Some(result)) => Err(CommitError::AuthorizationRequired {
                requested: result.discount_percent,
                ceiling: result.authorization_ceiling,
            }),
            (EditState::Ready, Some(result)) => {
                if result.requires_reason && self.reason.trim().is_empty() {
                    Err(CommitError::ReasonRequired)
                } else {
                    Ok(())
                }
            }
            _ => Err(CommitError::NothingToCommit),
        }
    }
}
