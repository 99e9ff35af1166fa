use crate::error::{Result, SyncodeError};
use crate::utils::path::{expand_tilde, expand_tilde_with};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "SYNCODE_CONFIG";

/// Persisted syncode state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Root of the sync repository, may start with `~`
    pub repo_path: String,

    /// Tracked agent ids, in the order they were added.
    /// Hand-edited files may contain duplicates; readers dedupe.
    #[serde(default)]
    pub agents: Vec<String>,
}

impl GlobalConfig {
    pub fn new(repo_path: impl Into<String>, agents: Vec<String>) -> Self {
        let mut config = Self {
            repo_path: repo_path.into(),
            agents: Vec::new(),
        };
        config.add_agents(agents);
        config
    }

    /// Repository root with a leading `~` expanded against `home`
    pub fn repo_root(&self, home: &Path) -> PathBuf {
        expand_tilde_with(&self.repo_path, home)
    }

    pub fn tracks(&self, id: &str) -> bool {
        self.agents.iter().any(|a| a == id)
    }

    /// Append ids in order, skipping any already tracked.
    /// Returns the ids that were actually added.
    pub fn add_agents<I, S>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = Vec::new();
        for id in ids {
            let id = id.into();
            if !self.tracks(&id) {
                self.agents.push(id.clone());
                added.push(id);
            }
        }
        added
    }

    /// Tracked ids with duplicates removed, first occurrence wins
    pub fn unique_agents(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for id in &self.agents {
            if !seen.contains(id) {
                seen.push(id.clone());
            }
        }
        seen
    }
}

/// Load/save handle for the persisted [`GlobalConfig`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$SYNCODE_CONFIG`, or `~/.syncode/config.toml`
    pub fn locate() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            let path = expand_tilde(PathBuf::from(path)).ok_or(SyncodeError::HomeNotFound)?;
            return Ok(Self::new(path));
        }
        let home = dirs::home_dir().ok_or(SyncodeError::HomeNotFound)?;
        Ok(Self::new(default_path(&home)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the config. An absent file is `NotConfigured`, never a default.
    pub fn load(&self) -> Result<GlobalConfig> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SyncodeError::NotConfigured)
            }
            Err(e) => return Err(e.into()),
        };
        let config: GlobalConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Replace the stored config.
    ///
    /// Writes a sibling temporary file and renames it into place so an
    /// interrupted write never leaves a truncated config behind.
    pub fn save(&self, config: &GlobalConfig) -> Result<()> {
        let contents = toml::to_string_pretty(config)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, contents)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "config.toml".into());
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

/// `~/.syncode/config.toml`
pub fn default_path(home: &Path) -> PathBuf {
    home.join(".syncode").join("config.toml")
}
