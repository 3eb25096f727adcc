//! Board configuration structures.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, SweepPolicy};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "BOARD_";

/// Board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Seconds between sweep passes.
    pub sweep_interval_secs: u64,
    /// Seconds a completed reservation stays visible.
    pub grace_period_secs: u64,
    /// Smallest accepted load count.
    pub min_loads: u32,
    /// Largest accepted load count.
    pub max_loads: u32,
    /// Audit events kept in memory; 0 disables auditing.
    pub audit_capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: SweepPolicy::DEFAULT_INTERVAL.as_secs(),
            grace_period_secs: SweepPolicy::DEFAULT_GRACE_PERIOD.as_secs(),
            min_loads: 1,
            max_loads: 10,
            audit_capacity: 256,
        }
    }
}

impl BoardConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.sweep_interval_secs == 0 {
            return Err("sweep_interval_secs must be greater than 0".into());
        }
        let max_interval = SweepPolicy::MAX_INTERVAL.as_secs();
        if self.sweep_interval_secs > max_interval {
            return Err(format!(
                "sweep_interval_secs ({}) must be at most {max_interval}",
                self.sweep_interval_secs
            ));
        }
        let max_grace = SweepPolicy::MAX_GRACE_PERIOD.as_secs();
        if self.grace_period_secs > max_grace {
            return Err(format!(
                "grace_period_secs ({}) must be at most {max_grace}",
                self.grace_period_secs
            ));
        }
        if self.min_loads == 0 {
            return Err("min_loads must be greater than 0".into());
        }
        if self.max_loads < self.min_loads {
            return Err(format!(
                "max_loads ({}) must be at least min_loads ({})",
                self.max_loads, self.min_loads
            ));
        }
        Ok(())
    }

    /// Sweep timing derived from this configuration.
    #[must_use]
    pub const fn sweep_policy(&self) -> SweepPolicy {
        SweepPolicy {
            interval: Duration::from_secs(self.sweep_interval_secs),
            grace_period: Duration::from_secs(self.grace_period_secs),
        }
    }

    /// Parse configuration from a JSON string and validate. Missing fields
    /// take their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load defaults overridden by `BOARD_*` environment variables, reading a
    /// `.env` file first if one is present.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BoardConfig::from_env`] with a caller-provided variable source.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = read_var(&lookup, "SWEEP_INTERVAL_SECS")? {
            cfg.sweep_interval_secs = v;
        }
        if let Some(v) = read_var(&lookup, "GRACE_PERIOD_SECS")? {
            cfg.grace_period_secs = v;
        }
        if let Some(v) = read_var(&lookup, "MIN_LOADS")? {
            cfg.min_loads = v;
        }
        if let Some(v) = read_var(&lookup, "MAX_LOADS")? {
            cfg.max_loads = v;
        }
        if let Some(v) = read_var(&lookup, "AUDIT_CAPACITY")? {
            cfg.audit_capacity = v;
        }
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

fn read_var<F, T>(lookup: &F, name: &str) -> AppResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let key = format!("{ENV_PREFIX}{name}");
    lookup(&key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{key} has invalid value `{raw}`"))
        })
        .transpose()
}
