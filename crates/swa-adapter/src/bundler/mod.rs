//! Bundler seam.
//!
//! The adapter describes each bundling pass as a [`BundleConfig`] and hands
//! it to a [`Bundler`]. The bundler itself is an external tool; only the
//! configuration handed to it is this crate's concern.

mod esbuild;

use std::time::Duration;

use async_trait::async_trait;
use swa_config::BundleConfig;
use tracing::{debug, warn};

use crate::error::Result;

pub use esbuild::EsbuildBundler;

/// A diagnostic the bundler reported without failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleWarning {
    pub code: Option<String>,
    pub plugin: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct BundleOutput {
    pub warnings: Vec<BundleWarning>,
    pub duration: Duration,
}

#[async_trait]
pub trait Bundler: Send + Sync {
    /// Run one bundling pass. Failure is fatal to the build.
    async fn bundle(&self, config: &BundleConfig) -> Result<BundleOutput>;
}

/// Log the warnings of a pass that the config does not suppress.
///
/// Returns how many were reported.
pub fn report_warnings(config: &BundleConfig, output: &BundleOutput) -> usize {
    let mut reported = 0;
    for warning in &output.warnings {
        if config.suppresses(warning.code.as_deref(), warning.plugin.as_deref()) {
            debug!(code = ?warning.code, "suppressed bundler warning");
            continue;
        }
        warn!(
            code = warning.code.as_deref().unwrap_or("-"),
            plugin = warning.plugin.as_deref().unwrap_or("-"),
            "{}",
            warning.message
        );
        reported += 1;
    }
    reported
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn suppressed_warnings_are_not_reported() {
        let config = BundleConfig::from_value(json!({
            "suppressWarnings": [
                { "code": "CIRCULAR_DEPENDENCY" },
                { "plugin": "sourcemaps", "code": "PLUGIN_WARNING" }
            ]
        }))
        .unwrap();
        let output = BundleOutput {
            warnings: vec![
                BundleWarning {
                    code: Some("CIRCULAR_DEPENDENCY".into()),
                    plugin: None,
                    message: "a -> b -> a".into(),
                },
                BundleWarning {
                    code: Some("PLUGIN_WARNING".into()),
                    plugin: Some("sourcemaps".into()),
                    message: "missing map".into(),
                },
                BundleWarning {
                    code: Some("PLUGIN_WARNING".into()),
                    plugin: Some("commonjs".into()),
                    message: "mixed modules".into(),
                },
            ],
            ..Default::default()
        };

        assert_eq!(report_warnings(&config, &output), 1);
    }
}
