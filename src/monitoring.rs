//! Runtime side of the `monitoring` block.
//!
//! The configuration only describes what to log. This module turns it into a
//! `tracing` subscriber and a small token-usage tracker that consumers feed
//! with context sizes as a session runs.

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::McpConfig;
use crate::schema::{MemoryType, MonitoringConfig, NamedVariants, TokenSettings, TypeSettings};

/// Filter for the configured log level. `RUST_LOG`, when set, wins.
#[must_use]
pub fn env_filter(config: &MonitoringConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level.name()))
}

/// Install a global fmt subscriber when monitoring is enabled.
///
/// Returns `true` if this call installed the subscriber. Disabled monitoring,
/// or a subscriber installed earlier by the host process, leaves logging as
/// it is.
pub fn init_tracing(config: &MonitoringConfig) -> bool {
    if !config.enabled {
        return false;
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Where a context size falls relative to the token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageStatus {
    WithinBudget,
    /// Past `compressionThreshold`; the runtime should compress.
    OverThreshold,
    /// Input no longer fits beside the reserved output tokens.
    Overflow,
}

/// Tracks context size against the `token` settings.
#[derive(Debug, Clone)]
pub struct TokenUsageMonitor {
    monitoring: MonitoringConfig,
    budget: TokenSettings,
}

impl TokenUsageMonitor {
    #[must_use]
    pub const fn new(monitoring: MonitoringConfig, budget: TokenSettings) -> Self {
        Self {
            monitoring,
            budget,
        }
    }

    /// Monitor for a resolved config. Uses default token settings when the
    /// config has no `token` entry.
    #[must_use]
    pub fn from_config(config: &McpConfig) -> Self {
        let budget = match config.settings_for(MemoryType::Token) {
            Some(TypeSettings::Token(token)) => token.clone(),
            _ => TokenSettings::default(),
        };
        Self::new(config.monitoring.clone(), budget)
    }

    /// Tokens available for input once output is reserved.
    #[must_use]
    pub fn available_input_tokens(&self) -> u64 {
        self.budget
            .max_context_window
            .saturating_sub(self.budget.reserved_output_tokens)
    }

    /// Input size at which compression should start.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn compression_trigger(&self) -> u64 {
        (self.available_input_tokens() as f64 * self.budget.compression_threshold).floor() as u64
    }

    #[must_use]
    pub fn status(&self, used_tokens: u64) -> UsageStatus {
        if used_tokens > self.available_input_tokens() {
            UsageStatus::Overflow
        } else if used_tokens >= self.compression_trigger() {
            UsageStatus::OverThreshold
        } else {
            UsageStatus::WithinBudget
        }
    }

    /// Classify `used_tokens` and log it as the monitoring block asks.
    pub fn record(&self, used_tokens: u64) -> UsageStatus {
        let status = self.status(used_tokens);
        let available = self.available_input_tokens();

        if self.monitoring.log_token_usage {
            info!(used_tokens, available, ?status, "token usage");
        }
        if status == UsageStatus::Overflow && self.monitoring.alert_on_overflow {
            warn!(
                "Context overflow: {used_tokens} tokens used, {available} available ({} reserved for output)",
                self.budget.reserved_output_tokens
            );
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LogLevel;
    use crate::validation::validate;

    fn monitor(window: u64, reserved: u64, threshold: f64) -> TokenUsageMonitor {
        TokenUsageMonitor::new(
            MonitoringConfig::default(),
            TokenSettings {
                max_context_window: window,
                reserved_output_tokens: reserved,
                compression_threshold: threshold,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_budget_arithmetic() {
        let m = monitor(10_000, 2_000, 0.75);
        assert_eq!(m.available_input_tokens(), 8_000);
        assert_eq!(m.compression_trigger(), 6_000);
    }

    #[test]
    fn test_status_boundaries() {
        let m = monitor(10_000, 2_000, 0.75);
        assert_eq!(m.record(5_999), UsageStatus::WithinBudget);
        assert_eq!(m.record(6_000), UsageStatus::OverThreshold);
        assert_eq!(m.record(8_000), UsageStatus::OverThreshold);
        assert_eq!(m.record(8_001), UsageStatus::Overflow);
    }

    #[test]
    fn test_reserved_beyond_window_always_overflows() {
        let m = monitor(1_000, 4_096, 0.8);
        assert_eq!(m.available_input_tokens(), 0);
        assert_eq!(m.status(1), UsageStatus::Overflow);
    }

    #[test]
    fn test_from_config_uses_token_settings() {
        let validated = validate(
            r#"{"version":"1.0","mcpTypes":["token"],"typeSpecificConfig":{"token":{"maxContextWindow":32000}}}"#,
        )
        .unwrap();
        let m = TokenUsageMonitor::from_config(&validated.config);
        assert_eq!(m.available_input_tokens(), 32_000 - 4_096);

        let validated = validate(r#"{"version":"1.0","mcpTypes":["vector"]}"#).unwrap();
        let m = TokenUsageMonitor::from_config(&validated.config);
        assert_eq!(m.available_input_tokens(), 200_000 - 4_096);
    }

    #[test]
    fn test_disabled_monitoring_installs_nothing() {
        let config = MonitoringConfig {
            enabled: false,
            log_level: LogLevel::Trace,
            ..Default::default()
        };
        assert!(!init_tracing(&config));
    }
}
