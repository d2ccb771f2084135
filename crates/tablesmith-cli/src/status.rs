use std::fmt;
use std::process::ExitCode;

/// Process outcome, reported as the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl RunStatus {
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Ok => 0,
            RunStatus::Warning => 1,
            RunStatus::Critical => 2,
            RunStatus::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Ok => "OK",
            RunStatus::Warning => "WARNING",
            RunStatus::Critical => "CRITICAL",
            RunStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        ExitCode::from(status.code())
    }
}
