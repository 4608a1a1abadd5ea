use chrono::NaiveDate;
use serde::Deserialize;

/// Root application configuration. Loaded from an optional `adcost.toml`
/// in the working directory, then environment variables with the prefix
/// `ADCOST__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_records")]
    pub records: usize,
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// Largest day offset from `start_date`, inclusive.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_scatter_sample_limit")]
    pub scatter_sample_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default functions
fn default_records() -> usize {
    5000
}
fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}
fn default_window_days() -> u32 {
    365
}
fn default_dataset_path() -> String {
    "tv_advertising_data.csv".to_string()
}
fn default_export_path() -> String {
    "filtered_tv_advertising_data.csv".to_string()
}
fn default_preview_rows() -> usize {
    100
}
fn default_scatter_sample_limit() -> usize {
    1000
}
fn default_log_filter() -> String {
    "adcost=info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            records: default_records(),
            start_date: default_start_date(),
            window_days: default_window_days(),
            seed: None,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            export_path: default_export_path(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            preview_rows: default_preview_rows(),
            scatter_sample_limit: default_scatter_sample_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: default_log_filter(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            data: DataConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `adcost.toml` (if present) and environment
    /// variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("adcost").required(false))
            .add_source(
                config::Environment::with_prefix("ADCOST")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.generator.records, 5000);
        assert_eq!(config.generator.window_days, 365);
        assert_eq!(
            config.generator.start_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(config.dashboard.scatter_sample_limit, 1000);
        assert_eq!(config.data.export_path, "filtered_tv_advertising_data.csv");
    }

    #[test]
    fn test_partial_source_fills_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("generator.records", 250)
            .unwrap()
            .set_override("generator.start_date", "2024-03-01")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.generator.records, 250);
        assert_eq!(
            config.generator.start_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(config.dashboard.preview_rows, 100);
    }
}
