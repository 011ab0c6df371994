//! Pipeline subprocess runner
//!
//! The pipeline is an opaque program that reads symbols from its argument
//! list and writes analyses to the store. It is never run through a shell.

use std::process::Stdio;
use tokio::process::Command;
use tracing::{error, info, warn};

use crate::config::PipelineConfig;
use crate::error::{DashboardError, Result};
use crate::pipeline::symbols::Symbol;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub stdout: String,
}

/// Runs one pipeline batch. Symbols are already validated.
#[async_trait::async_trait]
pub trait PipelineExecutor: Send + Sync {
    async fn run(&self, symbols: &[Symbol], with_ai: bool) -> Result<PipelineOutput>;
}

pub struct ProcessPipeline {
    config: PipelineConfig,
}

impl ProcessPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Script, symbols, optional `--ai`, then `--export <target>`
    pub fn arguments(&self, symbols: &[Symbol], with_ai: bool) -> Vec<String> {
        let mut args = Vec::with_capacity(symbols.len() + 4);
        args.push(self.config.script.clone());
        args.extend(symbols.iter().map(|s| s.as_str().to_string()));
        if with_ai {
            args.push("--ai".to_string());
        }
        args.push("--export".to_string());
        args.push(self.config.export_target.clone());
        args
    }
}

#[async_trait::async_trait]
impl PipelineExecutor for ProcessPipeline {
    async fn run(&self, symbols: &[Symbol], with_ai: bool) -> Result<PipelineOutput> {
        let args = self.arguments(symbols, with_ai);
        info!(
            program = %self.config.program,
            working_dir = %self.config.working_dir.display(),
            symbols = symbols.len(),
            with_ai,
            "Starting analysis pipeline"
        );

        let child = Command::new(&self.config.program)
            .args(&args)
            .current_dir(&self.config.working_dir)
            .env("PYTHONUNBUFFERED", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.config.timeout, child.wait_with_output()).await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    timeout_secs = self.config.timeout.as_secs(),
                    "Analysis pipeline timed out"
                );
                return Err(DashboardError::PipelineTimeout(self.config.timeout.as_secs()));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(status = %output.status, stderr = %stderr, "Analysis pipeline failed");
            return Err(DashboardError::Pipeline(if stderr.is_empty() {
                format!("pipeline exited with {}", output.status)
            } else {
                stderr
            }));
        }

        info!(symbols = symbols.len(), "Analysis pipeline finished");
        Ok(PipelineOutput { stdout })
    }
}
