use std::sync::Arc;

use menu_forecast::service::ForecastService;

/// Shared, read-only handle given to every handler.
pub type AppState = Arc<ForecastService>;
