use crate::application::dashboard_service::DEFAULT_PERIOD;
use crate::domain::dashboard::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::ops::Range;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("generator.period_ms must be greater than zero")]
    ZeroPeriod,
    #[error("generator.capacity must be greater than zero")]
    ZeroCapacity,
    #[error("generator value range must be finite, got {min}..{max}")]
    NonFiniteRange { min: f64, max: f64 },
    #[error("generator.min_value ({min}) must be below generator.max_value ({max})")]
    EmptyRange { min: f64, max: f64 },
    #[error("display.chart_height must be greater than zero")]
    ZeroChartHeight,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    pub period_ms: u64,
    pub capacity: usize,
    pub min_value: f64,
    pub max_value: f64,
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD.as_millis() as u64,
            capacity: DEFAULT_CAPACITY,
            min_value: 65.0,
            max_value: 85.0,
            seed: None,
        }
    }
}

impl GeneratorSettings {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn value_range(&self) -> Range<f64> {
        self.min_value..self.max_value
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Terminal,
    Json,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub mode: RenderMode,
    pub chart_height: usize,
    pub unit: String,
    pub clear_screen: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Terminal,
            chart_height: 8,
            unit: "°F".to_string(),
            clear_screen: true,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generator = &self.generator;
        if generator.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if generator.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let (min, max) = (generator.min_value, generator.max_value);
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteRange { min, max });
        }
        if min >= max {
            return Err(ConfigError::EmptyRange { min, max });
        }

        if self.display.chart_height == 0 {
            return Err(ConfigError::ZeroChartHeight);
        }
        Ok(())
    }
}

/// Load `config/dashboard.{toml,...}` if present, falling back to defaults.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .build()?;

    let dashboard: DashboardConfig = settings.try_deserialize()?;
    dashboard.validate()?;
    Ok(dashboard)
}
