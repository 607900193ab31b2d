use std::env;

use super::{Command, CommandError, Flow};
use crate::path::PathExpander;

#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String]) -> Result<Flow, CommandError> {
        let Some(path_str) = args.first() else {
            return Err(CommandError::InvalidArguments(
                "expected argument to \"cd\"".to_string(),
            ));
        };

        let expanded = self
            .path_expander
            .expand(path_str)
            .map_err(|e| CommandError::ExecutionError(e.to_string()))?;

        env::set_current_dir(&expanded).map_err(|e| {
            CommandError::ExecutionError(format!("cannot change directory to '{}': {}", path_str, e))
        })?;

        Ok(Flow::Continue)
    }
}
