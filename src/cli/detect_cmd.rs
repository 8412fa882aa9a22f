//! Detect command handler

use std::collections::BTreeMap;

use serde::Serialize;

use crate::application::acquisition::{PNGPASTE, POWERSHELL, WL_PASTE, XCLIP};
use crate::application::ports::ToolProbe;
use crate::domain::environment::{detect, EnvironmentContext, EnvironmentMarkers, Platform};

use super::presenter::Presenter;

/// Helpers reported by `clipimg detect`
pub const PROBED_TOOLS: &[&str] = &[POWERSHELL, XCLIP, WL_PASTE, PNGPASTE];

/// What the current process would paste with
#[derive(Debug, Clone, Serialize)]
pub struct DetectReport {
    pub platform: Platform,
    pub context: EnvironmentContext,
    pub supported: bool,
    pub tools: BTreeMap<String, bool>,
}

impl DetectReport {
    /// Build a report from environment markers and a tool probe
    pub async fn collect<P: ToolProbe + ?Sized>(markers: &EnvironmentMarkers, probe: &P) -> Self {
        let context = detect(markers);

        let mut tools = BTreeMap::new();
        for tool in PROBED_TOOLS {
            tools.insert(tool.to_string(), probe.has_command(tool).await);
        }

        Self {
            platform: markers.platform.unwrap_or(Platform::Other),
            context,
            supported: context.is_supported(),
            tools,
        }
    }
}

/// Handle detect subcommand
pub async fn handle_detect_command<P: ToolProbe + ?Sized>(
    json: bool,
    probe: &P,
    presenter: &Presenter,
) -> Result<(), String> {
    let report = DetectReport::collect(&EnvironmentMarkers::from_process(), probe).await;

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
        presenter.output(&text);
        return Ok(());
    }

    presenter.key_value("platform", report.platform.as_str());
    presenter.key_value("context", report.context.as_str());
    presenter.key_value("supported", &report.supported.to_string());
    for (tool, found) in &report.tools {
        presenter.key_value(tool, if *found { "found" } else { "missing" });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::acquisition::testing::FakeProbe;

    fn markers(platform: Platform) -> EnvironmentMarkers {
        EnvironmentMarkers {
            platform: Some(platform),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn report_lists_every_tool() {
        let probe = FakeProbe::with_tools(&[WL_PASTE]);
        let report = DetectReport::collect(&markers(Platform::Linux), &probe).await;

        assert_eq!(report.context, EnvironmentContext::LinuxX11);
        assert!(report.supported);
        assert_eq!(report.tools.len(), PROBED_TOOLS.len());
        assert_eq!(report.tools.get(WL_PASTE), Some(&true));
        assert_eq!(report.tools.get(XCLIP), Some(&false));
    }

    #[tokio::test]
    async fn report_serializes_kebab_case_context() {
        let probe = FakeProbe::default();
        let report = DetectReport::collect(&markers(Platform::Windows), &probe).await;

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["context"], "native-windows");
        assert_eq!(json["platform"], "windows");
        assert_eq!(json["tools"]["powershell.exe"], false);
    }

    #[tokio::test]
    async fn unknown_platform_is_unsupported() {
        let probe = FakeProbe::default();
        let report = DetectReport::collect(&EnvironmentMarkers::default(), &probe).await;

        assert_eq!(report.platform, Platform::Other);
        assert_eq!(report.context, EnvironmentContext::Unsupported);
        assert!(!report.supported);
    }
}
