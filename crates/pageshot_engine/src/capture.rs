use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use pageshot_logging::{shot_debug, shot_error, shot_warn};
use tokio::process::Command;

/// The capture tool exits 0 even when rendering failed; this line on stdout
/// is the only failure signal it gives.
pub const FAILURE_MARKER: &str = "Electron exited with code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Success,
    ToolReportedFailure { message: String },
    LaunchFailure { message: String },
    TimedOut { after: Duration },
}

impl CaptureOutcome {
    /// Message for the caller, `None` on success.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            CaptureOutcome::Success => None,
            CaptureOutcome::ToolReportedFailure { message }
            | CaptureOutcome::LaunchFailure { message } => Some(message.clone()),
            CaptureOutcome::TimedOut { after } => Some(format!(
                "capture tool did not finish within {}s",
                after.as_secs_f64()
            )),
        }
    }
}

/// Classify the tool's stdout. The exit code is deliberately not an input.
pub fn classify_output(stdout: &str) -> CaptureOutcome {
    if stdout.starts_with(FAILURE_MARKER) {
        CaptureOutcome::ToolReportedFailure {
            message: stdout.trim().to_string(),
        }
    } else {
        CaptureOutcome::Success
    }
}

#[derive(Debug, Clone)]
pub struct CaptureSettings {
    pub executable: PathBuf,
    /// Upper bound on one capture; the process is killed once it elapses.
    pub timeout: Option<Duration>,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("electroshot"),
            timeout: Some(Duration::from_secs(120)),
        }
    }
}

#[async_trait::async_trait]
pub trait CaptureTool: Send + Sync {
    async fn capture(&self, args: &[String]) -> CaptureOutcome;
}

/// Runs the external capture executable once per call.
#[derive(Debug, Clone)]
pub struct ProcessCaptureTool {
    settings: CaptureSettings,
}

impl ProcessCaptureTool {
    pub fn new(settings: CaptureSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl CaptureTool for ProcessCaptureTool {
    async fn capture(&self, args: &[String]) -> CaptureOutcome {
        let executable = &self.settings.executable;
        let mut command = Command::new(executable);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                shot_error!("Unable to start {:?}: {}", executable, err);
                return CaptureOutcome::LaunchFailure {
                    message: format!("unable to start capture tool: {err}"),
                };
            }
        };

        let waiting = child.wait_with_output();
        let output = match self.settings.timeout {
            Some(limit) => match tokio::time::timeout(limit, waiting).await {
                Ok(output) => output,
                Err(_) => {
                    // Dropping the future drops the child, which kills it.
                    shot_warn!("Capture tool exceeded {:?}; killed", limit);
                    return CaptureOutcome::TimedOut { after: limit };
                }
            },
            None => waiting.await,
        };

        let output = match output {
            Ok(output) => output,
            Err(err) => {
                shot_error!("Lost contact with capture tool: {}", err);
                return CaptureOutcome::LaunchFailure {
                    message: format!("unable to collect capture tool output: {err}"),
                };
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        shot_debug!("Capture tool exited with {}", output.status);
        if !output.stderr.is_empty() {
            shot_debug!(
                "Capture tool stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        classify_output(&stdout)
    }
}
