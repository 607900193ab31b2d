use std::sync::{Arc, Mutex};

use super::{Command, CommandError, Flow};
use crate::core::alias::AliasTable;
use crate::core::history::HistoryLog;

/// Releases the session's alias and history storage before signalling
/// the read loop to stop.
#[derive(Clone)]
pub struct ExitCommand {
    aliases: Arc<Mutex<AliasTable>>,
    history: Arc<Mutex<HistoryLog>>,
}

impl ExitCommand {
    pub fn new(aliases: Arc<Mutex<AliasTable>>, history: Arc<Mutex<HistoryLog>>) -> Self {
        Self { aliases, history }
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[String]) -> Result<Flow, CommandError> {
        self.aliases
            .lock()
            .map_err(|e| CommandError::ExecutionError(format!("Failed to access aliases: {}", e)))?
            .clear();
        self.history
            .lock()
            .map_err(|e| CommandError::ExecutionError(format!("Failed to access history: {}", e)))?
            .clear();

        println!("Goodbye!");
        Ok(Flow::Exit)
    }
}
