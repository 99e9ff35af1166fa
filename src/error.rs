use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncodeError {
    #[error("Configuration not found. Run 'syncode init' first.")]
    NotConfigured,

    #[error("No agents configured. Run 'syncode init' to set up agents.")]
    NoAgentsConfigured,

    #[error("No adapter found for {0}")]
    AdapterMissing(String),

    #[error("Failed to sync {agent}: {message}")]
    AdapterOperationFailed { agent: String, message: String },

    #[error("No remote repository configured. Add a remote with: git remote add origin <url>")]
    NoRemote,

    #[error("Cannot pull with uncommitted changes. Commit or stash them first.")]
    DirtyWorkingTree(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Failed to pull from remote: {}\nIf this issue persists, open an issue and attach the error trace from {}", .message, .trace.display())]
    PullFailed { message: String, trace: PathBuf },

    #[error("Git error: {0}")]
    Git(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Could not determine the home directory")]
    HomeNotFound,
}

impl SyncodeError {
    /// Variant name, recorded as the error type in trace files
    pub fn kind(&self) -> &'static str {
        match self {
            SyncodeError::NotConfigured => "NotConfigured",
            SyncodeError::NoAgentsConfigured => "NoAgentsConfigured",
            SyncodeError::AdapterMissing(_) => "AdapterMissing",
            SyncodeError::AdapterOperationFailed { .. } => "AdapterOperationFailed",
            SyncodeError::NoRemote => "NoRemote",
            SyncodeError::DirtyWorkingTree(_) => "DirtyWorkingTree",
            SyncodeError::FetchFailed(_) => "FetchFailed",
            SyncodeError::PullFailed { .. } => "PullFailed",
            SyncodeError::Git(_) => "Git",
            SyncodeError::ConfigParse(_) => "ConfigParse",
            SyncodeError::ConfigSerialize(_) => "ConfigSerialize",
            SyncodeError::Io(_) => "Io",
            SyncodeError::InvalidConfig(_) => "InvalidConfig",
            SyncodeError::Prompt(_) => "Prompt",
            SyncodeError::HomeNotFound => "HomeNotFound",
        }
    }
}

impl From<inquire::InquireError> for SyncodeError {
    fn from(err: inquire::InquireError) -> Self {
        SyncodeError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SyncodeError>;
