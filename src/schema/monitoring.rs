//! The `monitoring` block.

use super::record::{named_enum, settings_record};

named_enum! {
    /// Minimum level for log events emitted by the consuming runtime.
    LogLevel {
        Trace => "trace",
        Debug => "debug",
        Info => "info",
        Warn => "warn",
        Error => "error",
    }
}

settings_record! {
    /// Logging controls for the agent runtime.
    ///
    /// Omitting the block entirely is equivalent to `{}`: every field takes
    /// its module default.
    MonitoringConfig / MonitoringOverlay {
        /// Install a log subscriber at startup.
        enabled: bool = false,
        /// Emit an event for every recorded token-usage sample.
        log_token_usage: bool = false,
        /// Emit a warning when usage exceeds the context window.
        alert_on_overflow: bool = true,
        /// Minimum level when `RUST_LOG` is not set.
        log_level: LogLevel = LogLevel::Info,
    }
}
