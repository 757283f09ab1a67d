use std::sync::Arc;
use mostrador_catalog::PriceAdjustmentEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PriceAdjustmentEngine>,
}

impl AppState {
    pub fn new(engine: PriceAdjustmentEngine) -> Self {
        Self { engine: Arc::new(engine) }
    }
}
