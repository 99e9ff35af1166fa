pub mod config;
pub mod init;
pub mod pull;
pub mod status;
pub mod sync;
pub mod version;

/// How a command ended, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Stopped before doing any work, e.g. the operator cancelled
    Aborted,
    /// Completed, but some agents failed
    PartialFailure,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Aborted => 1,
            Outcome::PartialFailure => 2,
        }
    }
}
