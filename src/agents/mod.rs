//! Known agents and how to tell whether they are installed.
//!
//! Every agent syncode knows about has a static [`AgentMetadata`] entry:
//! its id (the key used in the config file and the adapter registry), a
//! display name, whether a sync adapter exists for it, and a detection
//! predicate evaluated against a [`HostEnv`].
//!
//! Detection only probes the filesystem under the home directory and the
//! executable search path; it never runs the agent.

pub mod host;
pub mod metadata;

pub use host::HostEnv;
pub use metadata::{
    agents_with_adapters, agents_without_adapters, all_agent_ids, detect_installed_agents,
    display_name, get_agent_metadata, is_agent_installed, AgentMetadata,
};
