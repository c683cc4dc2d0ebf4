use lithe_events::FailurePolicy;
use lithe_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};

/// Main Lithe configuration
///
/// Configuration is loaded from (in priority order):
/// 1. `lithe.jsonc` - JSON with comments
/// 2. `lithe.json` - Standard JSON
/// 3. `lithe.yml` / `lithe.yaml` - YAML format
///
/// Also checks hidden variants (`.lithe.*`) and `~/.config/lithe/` for global config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LitheConfig {
    /// Event dispatcher settings
    #[serde(default)]
    pub events: EventsSettings,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Event dispatcher settings
///
/// # Example
///
/// ```yaml
/// events:
///   failure_policy: isolate
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsSettings {
    /// What happens when a listener fails during emit (default: abort)
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}
