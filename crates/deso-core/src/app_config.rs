use crate::widget_config::WidgetConfig;

pub const DEFAULT_SUGGEST_URL: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/suggest";
pub const DEFAULT_GEOCODE_URL: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/findAddressCandidates";
pub const DEFAULT_FEATURE_QUERY_URL: &str =
    "https://services8.arcgis.com/9CUL84k8apjo6IDh/arcgis/rest/services/DeSO_Attribut_RegInd_2025/FeatureServer/0/query";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Production output is plain log lines with no colour codes or targets.
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The three ArcGIS REST endpoints the lookup pipeline talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub suggest_url: String,
    pub geocode_url: String,
    pub feature_query_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            suggest_url: DEFAULT_SUGGEST_URL.to_owned(),
            geocode_url: DEFAULT_GEOCODE_URL.to_owned(),
            feature_query_url: DEFAULT_FEATURE_QUERY_URL.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub endpoints: EndpointConfig,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Quiet period after the last keystroke before suggestions are fetched.
    pub debounce_ms: u64,
    pub widget: WidgetConfig,
}
