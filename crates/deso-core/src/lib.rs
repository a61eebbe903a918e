pub mod app_config;
pub mod area;
pub mod config;
pub mod lookup;
pub mod widget_config;

pub use app_config::{AppConfig, EndpointConfig, Environment};
pub use area::{AreaAttributes, AreaField, AttributeValue, MISSING_VALUE};
pub use config::{load_app_config, load_app_config_from_env};
pub use lookup::{DebugInfo, GeocodeResult, LookupResult, Suggestion};
pub use widget_config::WidgetConfig;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
