use std::sync::{Arc, Mutex};

use super::{Command, CommandError, Flow};
use crate::core::history::HistoryLog;
use crate::style::Styler;

#[derive(Clone)]
pub struct HistoryCommand {
    history: Arc<Mutex<HistoryLog>>,
    styler: Styler,
}

impl HistoryCommand {
    pub fn new(history: Arc<Mutex<HistoryLog>>, styler: Styler) -> Self {
        Self { history, styler }
    }
}

impl Command for HistoryCommand {
    fn execute(&self, _args: &[String]) -> Result<Flow, CommandError> {
        let history = self
            .history
            .lock()
            .map_err(|e| CommandError::ExecutionError(format!("Failed to access history: {}", e)))?;

        println!("{}", self.styler.header("Command History:"));
        for (index, entry) in history.entries().iter().enumerate() {
            println!("{:3}  {}", index + 1, self.styler.paint(entry));
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::MAX_HISTORY;
    use crate::style::Theme;

    #[test]
    fn test_listing_continues_the_loop() {
        let history = Arc::new(Mutex::new(HistoryLog::new(MAX_HISTORY)));
        history.lock().expect("lock").record("ls -l");
        let theme = Arc::new(Mutex::new(Theme::default()));
        let cmd = HistoryCommand::new(history, Styler::new(theme));
        assert_eq!(cmd.execute(&[]).expect("listing should succeed"), Flow::Continue);
    }
}
