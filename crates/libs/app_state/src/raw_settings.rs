use crate::DEFAULT_TOP_N;
use serde::Deserialize;

/// Settings exactly as they appear in `config/settings.yaml` (and `APP__*` overrides).
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawSettings {
    #[serde(default)]
    pub backend: RawBackendSettings,
    #[serde(default)]
    pub analysis: RawAnalysisSettings,
    #[serde(default)]
    pub results: RawResultSettings,
    #[serde(default)]
    pub picker: RawPickerSettings,
    #[serde(default)]
    pub logging: RawLoggingSettings,
}

/// Where the remote color-playlist service lives.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RawBackendSettings {
    pub base_url: String,
    /// Sent as the `Cookie` header on every call. Empty means no session.
    pub session_cookie: Option<String>,
    pub connect_timeout_secs: u64,
}

impl Default for RawBackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            session_cookie: None,
            connect_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RawAnalysisSettings {
    pub fetch_timeout_secs: u64,
    pub analyze_timeout_secs: u64,
    pub commit_timeout_secs: u64,
    /// Cadence of the simulated progress counter.
    pub tick_interval_ms: u64,
    /// How long a finished progress view stays at 100% before it is dismissed.
    pub completion_linger_ms: u64,
}

impl Default for RawAnalysisSettings {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 60,
            analyze_timeout_secs: 120,
            commit_timeout_secs: 120,
            tick_interval_ms: 200,
            completion_linger_ms: 500,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RawResultSettings {
    pub default_top_n: usize,
}

impl Default for RawResultSettings {
    fn default() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

/// Raster resolution of the color picker surface.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RawPickerSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for RawPickerSettings {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RawLoggingSettings {
    pub level: String,
}

impl Default for RawLoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
