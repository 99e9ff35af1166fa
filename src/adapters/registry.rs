//! Registry of sync adapters, keyed by agent id.

use super::claude::ClaudeAdapter;
use super::codex::CodexAdapter;
use super::editor::{CursorAdapter, VsCodeAdapter};
use super::gemini::GeminiAdapter;
use super::ghostty::GhosttyAdapter;
use super::opencode::OpenCodeAdapter;
use super::zsh::ZshAdapter;
use super::Adapter;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup table from agent id to adapter. Built once, never mutated.
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn Adapter>>,
}

impl AdapterRegistry {
    /// Registry with every built-in adapter
    pub fn builtin() -> Self {
        Self::from_adapters(vec![
            Arc::new(OpenCodeAdapter),
            Arc::new(ClaudeAdapter),
            Arc::new(CodexAdapter),
            Arc::new(GeminiAdapter),
            Arc::new(CursorAdapter),
            Arc::new(VsCodeAdapter),
            Arc::new(GhosttyAdapter),
            Arc::new(ZshAdapter),
        ])
    }

    /// Registry over an explicit adapter list; a later duplicate id wins
    pub fn from_adapters(adapters: Vec<Arc<dyn Adapter>>) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.id().to_string(), adapter))
            .collect();
        Self { adapters }
    }

    /// Get an adapter by agent id
    pub fn get(&self, id: &str) -> Option<Arc<dyn Adapter>> {
        self.adapters.get(id).cloned()
    }

    /// All registered agent ids, sorted
    pub fn list_available(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.adapters.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
