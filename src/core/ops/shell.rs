//! External command execution
//!
//! Programs are spawned directly with an argument vector; no shell is
//! involved. There is no timeout: a hung tool stalls its caller.

use std::ffi::OsString;
use std::path::PathBuf;

use super::super::{CoreError, CoreResult};

// ============================================================================
// Input/Output Types
// ============================================================================

#[derive(Clone, Debug)]
pub struct CommandInput {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl CommandInput {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Command line for logs and error messages
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

// ============================================================================
// Operations
// ============================================================================

/// Run a command to completion.
///
/// A spawn failure or a non-zero exit is an error carrying the command line
/// and whatever the tool wrote to stderr.
pub async fn run(input: &CommandInput) -> CoreResult<CommandOutput> {
    let output = tokio::process::Command::new(&input.program)
        .args(&input.args)
        .output()
        .await
        .map_err(|e| CoreError::ShellExec(input.display(), e.to_string()))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        let exit = output
            .status
            .code()
            .map(|c| format!("exit={}", c))
            .unwrap_or_else(|| "terminated by signal".to_string());
        return Err(CoreError::ShellExec(
            input.display(),
            format!("{} {}", exit, stderr.trim()).trim_end().to_string(),
        ));
    }

    Ok(CommandOutput { stdout, stderr })
}
