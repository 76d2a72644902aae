use crate::{DEFAULT_TOP_N, RawAnalysisSettings, RawSettings};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub backend: BackendSettings,
    pub analysis: AnalysisSettings,
    pub results: ResultSettings,
    pub picker: PickerSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub session_cookie: Option<String>,
    pub connect_timeout: Duration,
}

/// Time bounds and pacing for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub fetch_timeout: Duration,
    pub analyze_timeout: Duration,
    pub commit_timeout: Duration,
    pub tick_interval: Duration,
    pub completion_linger: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSettings {
    pub default_top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSettings {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let session_cookie = raw
            .backend
            .session_cookie
            .map(|cookie| cookie.trim().to_string())
            .filter(|cookie| !cookie.is_empty());

        Self {
            backend: BackendSettings {
                base_url: raw.backend.base_url,
                session_cookie,
                connect_timeout: Duration::from_secs(raw.backend.connect_timeout_secs),
            },
            analysis: raw.analysis.into(),
            results: ResultSettings {
                // A cutoff of zero would make every fresh result set look empty.
                default_top_n: raw.results.default_top_n.max(1),
            },
            picker: PickerSettings {
                width: raw.picker.width,
                height: raw.picker.height,
            },
            logging: LoggingSettings {
                level: raw.logging.level,
            },
        }
    }
}

impl From<RawAnalysisSettings> for AnalysisSettings {
    fn from(raw: RawAnalysisSettings) -> Self {
        Self {
            fetch_timeout: Duration::from_secs(raw.fetch_timeout_secs),
            analyze_timeout: Duration::from_secs(raw.analyze_timeout_secs),
            commit_timeout: Duration::from_secs(raw.commit_timeout_secs),
            tick_interval: Duration::from_millis(raw.tick_interval_ms.max(1)),
            completion_linger: Duration::from_millis(raw.completion_linger_ms),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        RawAnalysisSettings::default().into()
    }
}

impl Default for ResultSettings {
    fn default() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        RawSettings::default().into()
    }
}
