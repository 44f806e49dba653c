//! Configuration loading and representation.
//!
//! Everything comes from `ROLLSTOCK_*` environment variables with defaults
//! suitable for local development.

use std::net::SocketAddr;

use thiserror::Error;

use rollstock_inventory::ReportingZone;
use rollstock_observability::LogFormat;

use crate::service::DEFAULT_MAX_WINDOW_DAYS;

pub const BIND_ADDR: &str = "ROLLSTOCK_BIND_ADDR";
pub const REPORTING_OFFSET: &str = "ROLLSTOCK_REPORTING_OFFSET";
pub const LOG_FORMAT: &str = "ROLLSTOCK_LOG_FORMAT";
pub const LOG_LEVEL: &str = "ROLLSTOCK_LOG_LEVEL";
pub const MAX_WINDOW_DAYS: &str = "ROLLSTOCK_MAX_WINDOW_DAYS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Warehouse reporting zone (Moscow, no DST).
const DEFAULT_REPORTING_OFFSET: &str = "+03:00";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub reporting_zone: ReportingZone,
    pub log_format: LogFormat,
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Widest statistics window, in reporting-zone calendar days.
    pub max_window_days: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = get(BIND_ADDR, DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(BIND_ADDR, e))?;

        let reporting_zone = get(REPORTING_OFFSET, DEFAULT_REPORTING_OFFSET)
            .parse::<ReportingZone>()
            .map_err(|e| invalid(REPORTING_OFFSET, e.message()))?;

        let log_format = match lookup(LOG_FORMAT) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|e| invalid(LOG_FORMAT, e))?,
            None => LogFormat::default(),
        };

        let log_level = get(LOG_LEVEL, DEFAULT_LOG_LEVEL);
        if log_level.trim().is_empty() {
            return Err(invalid(LOG_LEVEL, "must not be empty"));
        }

        let max_window_days = match lookup(MAX_WINDOW_DAYS) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| invalid(MAX_WINDOW_DAYS, e))?,
            None => DEFAULT_MAX_WINDOW_DAYS,
        };
        if max_window_days == 0 {
            return Err(invalid(MAX_WINDOW_DAYS, "must be at least 1"));
        }

        Ok(Self {
            bind_addr,
            reporting_zone,
            log_format,
            log_level,
            max_window_days,
        })
    }
}

fn invalid(key: &'static str, message: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.reporting_zone.offset().local_minus_utc(), 3 * 3600);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.max_window_days, DEFAULT_MAX_WINDOW_DAYS);
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            (BIND_ADDR, "127.0.0.1:9000"),
            (REPORTING_OFFSET, "UTC"),
            (LOG_FORMAT, "pretty"),
            (LOG_LEVEL, "rollstock=debug"),
            (MAX_WINDOW_DAYS, "400"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.reporting_zone, ReportingZone::utc());
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.log_level, "rollstock=debug");
        assert_eq!(cfg.max_window_days, 400);
    }

    #[test]
    fn malformed_values_name_the_key() {
        let err = config(&[(REPORTING_OFFSET, "Europe/Moscow")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: REPORTING_OFFSET, .. }));

        let err = config(&[(BIND_ADDR, "nope")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: BIND_ADDR, .. }));

        let err = config(&[(LOG_FORMAT, "xml")]).unwrap_err();
        assert!(err.to_string().contains(LOG_FORMAT));

        for raw in ["0", "-5", "lots"] {
            let err = config(&[(MAX_WINDOW_DAYS, raw)]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: MAX_WINDOW_DAYS, .. }), "{raw}");
        }

        let err = config(&[(REPORTING_OFFSET, "+1é2")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: REPORTING_OFFSET, .. }));
    }
}
