use crate::services::logging::LogLevel;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Intersection settings for scroll-triggered entrance animations
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimatorConfig {
    /// Fraction of the element that must be visible (0.0-1.0)
    pub threshold: f64,
    /// CSS margin applied to the viewport when computing intersections
    pub root_margin: String,
}

impl Default for ScrollAnimatorConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub remote_logging: bool,
    pub min_log_level: LogLevel,
    pub scroll: ScrollAnimatorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            remote_logging: true,
            min_log_level: if cfg!(debug_assertions) { LogLevel::Debug } else { LogLevel::Info },
            scroll: ScrollAnimatorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, with the API base URL overridable at build time through
    /// `NESTLING_API_BASE_URL`
    pub fn from_env() -> Self {
        Self::with_base_url_override(option_env!("NESTLING_API_BASE_URL"))
    }

    fn with_base_url_override(base_url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = base_url.map(str::trim).filter(|url| !url.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        config
    }
}
