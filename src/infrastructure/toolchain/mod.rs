use tokio::process::Command;

/// Binaries the export path shells out to
pub const REQUIRED_TOOLS: &[&str] = &["ffmpeg", "ffprobe"];

#[derive(Debug, Clone)]
pub struct ToolchainStatus {
    pub available: bool,
    pub missing: Vec<String>,
}

/// Pre-flight probe for the external codec toolchain. Both audio entry
/// points consult this before starting a job so a missing binary surfaces
/// as a clear capability error instead of a failure deep inside export.
pub struct ToolchainProbe {
    tools: Vec<String>,
}

impl ToolchainProbe {
    pub fn new() -> Self {
        Self {
            tools: REQUIRED_TOOLS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Probe a custom tool list
    pub fn with_tools(tools: Vec<String>) -> Self {
        Self { tools }
    }

    /// Run `<tool> -version` for every required tool. A spawn failure or a
    /// non-zero exit marks the tool as missing.
    pub async fn check(&self) -> ToolchainStatus {
        let mut missing = Vec::new();

        for tool in &self.tools {
            let result = Command::new(tool).arg("-version").output().await;
            match result {
                Ok(output) if output.status.success() => {}
                Ok(output) => {
                    tracing::warn!(
                        tool = %tool,
                        status = ?output.status.code(),
                        "Toolchain probe: tool exited with error"
                    );
                    missing.push(tool.clone());
                }
                Err(err) => {
                    tracing::warn!(tool = %tool, error = %err, "Toolchain probe: tool not invokable");
                    missing.push(tool.clone());
                }
            }
        }

        ToolchainStatus {
            available: missing.is_empty(),
            missing,
        }
    }
}

impl Default for ToolchainProbe {
    fn default() -> Self {
        Self::new()
    }
}
