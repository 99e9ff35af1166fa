//! Operator prompts.
//!
//! The sync and reconcile flows ask their questions through [`Prompter`] so
//! they can run against flags, a terminal, or a scripted answer list in
//! tests. Every method returns `Ok(None)` when the operator cancels.

use crate::error::{Result, SyncodeError};
use crate::sync::Direction;
use inquire::{Confirm, InquireError, MultiSelect, Select};
use std::fmt;

/// One entry of the agent selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentChoice {
    pub id: String,
    pub label: String,
    pub hint: Option<String>,
}

impl fmt::Display for AgentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} ({})", self.label, hint),
            None => write!(f, "{}", self.label),
        }
    }
}

pub trait Prompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>>;

    fn select_direction(&mut self) -> Result<Option<Direction>>;

    /// Pick agents from `choices`, all preselected. Returns ids.
    fn select_agents(
        &mut self,
        direction: Direction,
        choices: &[AgentChoice],
    ) -> Result<Option<Vec<String>>>;
}

/// Prompter answering from command-line flags first and the terminal second.
#[derive(Debug, Clone, Default)]
pub struct CliPrompter {
    direction: Option<Direction>,
    agents: Vec<String>,
    assume_yes: bool,
    interactive: bool,
}

impl CliPrompter {
    pub fn new(
        direction: Option<Direction>,
        agents: Vec<String>,
        assume_yes: bool,
        interactive: bool,
    ) -> Self {
        Self {
            direction,
            agents,
            assume_yes,
            interactive,
        }
    }
}

impl Prompter for CliPrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>> {
        if self.assume_yes {
            return Ok(Some(true));
        }
        if !self.interactive {
            return Ok(Some(default));
        }
        cancellable(Confirm::new(message).with_default(default).prompt())
    }

    fn select_direction(&mut self) -> Result<Option<Direction>> {
        if let Some(direction) = self.direction {
            return Ok(Some(direction));
        }
        if !self.interactive {
            return Err(SyncodeError::InvalidConfig(
                "no terminal to ask for a direction; pass --import or --export".to_string(),
            ));
        }
        let options = vec![Direction::Import, Direction::Export];
        cancellable(Select::new("What would you like to do?", options).prompt())
    }

    fn select_agents(
        &mut self,
        direction: Direction,
        choices: &[AgentChoice],
    ) -> Result<Option<Vec<String>>> {
        if !self.agents.is_empty() {
            return pick_from_flags(&self.agents, choices).map(Some);
        }
        if !self.interactive {
            return Ok(Some(choices.iter().map(|c| c.id.clone()).collect()));
        }

        let all: Vec<usize> = (0..choices.len()).collect();
        let picked = cancellable(
            MultiSelect::new(
                &format!("Select agents to {}", direction.verb()),
                choices.to_vec(),
            )
            .with_default(&all)
            .prompt(),
        )?;
        Ok(picked.map(|picked| picked.into_iter().map(|c| c.id).collect()))
    }
}

/// Keep the `--agent` ids, in the order of `choices`. An id that is not
/// among the choices is an error so a typo never silently syncs nothing.
fn pick_from_flags(requested: &[String], choices: &[AgentChoice]) -> Result<Vec<String>> {
    if let Some(unknown) = requested
        .iter()
        .find(|id| !choices.iter().any(|c| &c.id == *id))
    {
        let tracked: Vec<&str> = choices.iter().map(|c| c.id.as_str()).collect();
        return Err(SyncodeError::InvalidConfig(format!(
            "agent '{}' is not in your config (tracked: {})",
            unknown,
            tracked.join(", ")
        )));
    }
    Ok(choices
        .iter()
        .filter(|c| requested.contains(&c.id))
        .map(|c| c.id.clone())
        .collect())
}

fn cancellable<T>(answer: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Prompter replaying fixed answers, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompter {
    pub confirm: Option<bool>,
    pub direction: Option<Direction>,
    pub agents: Option<Vec<String>>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<Option<bool>> {
        self.asked.push(message.to_string());
        Ok(self.confirm)
    }

    fn select_direction(&mut self) -> Result<Option<Direction>> {
        self.asked.push("direction".to_string());
        Ok(self.direction)
    }

    fn select_agents(
        &mut self,
        _direction: Direction,
        _choices: &[AgentChoice],
    ) -> Result<Option<Vec<String>>> {
        self.asked.push("agents".to_string());
        Ok(self.agents.clone())
    }
}
