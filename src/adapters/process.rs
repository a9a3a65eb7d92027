use crate::core::{CommandExecutor, ExecutionOutput};
use crate::utils::error::{GeoidError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use tokio::process::Command;

/// Spawns programs directly, without a shell.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, program: &str, args: &[String]) -> Result<ExecutionOutput> {
        tracing::debug!("Spawning {} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GeoidError::ToolNotFound {
                    program: program.to_string(),
                },
                _ => GeoidError::IoError(e),
            })?;

        let result = ExecutionOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!("{} exited with {:?}", program, result.status);
        Ok(result)
    }
}
