use std::sync::Arc;

use farm_core::repositories::FarmerRepository;
use farm_core::services::FarmerService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub farmer_service: Arc<FarmerService<dyn FarmerRepository>>,
}

impl AppState {
    pub fn new(farmer_repo: Arc<dyn FarmerRepository>) -> Self {
        Self {
            farmer_service: Arc::new(FarmerService::new(farmer_repo)),
        }
    }
}
