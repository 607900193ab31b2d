use std::io::Write;

use super::{Command, CommandError, Flow};

#[derive(Clone)]
pub struct ClearCommand;

impl Default for ClearCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ClearCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ClearCommand {
    fn execute(&self, _args: &[String]) -> Result<Flow, CommandError> {
        // Clear the screen and home the cursor.
        print!("\x1b[2J\x1b[H");
        std::io::stdout().flush()?;
        Ok(Flow::Continue)
    }
}
