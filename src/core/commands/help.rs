use super::{Command, CommandError, Flow, BUILTIN_NAMES};
use crate::style::Styler;

#[derive(Clone)]
pub struct HelpCommand {
    styler: Styler,
}

impl HelpCommand {
    pub fn new(styler: Styler) -> Self {
        Self { styler }
    }
}

impl Command for HelpCommand {
    fn execute(&self, _args: &[String]) -> Result<Flow, CommandError> {
        println!("{}", self.styler.header("=== Carotid Shell ==="));
        println!("Type program names and arguments, then press enter.");
        println!("Special features:");
        println!("  !! - repeat the last command");
        println!("  > file - redirect output to a file");
        println!("  < file - redirect input from a file");
        println!("  cmd1 | cmd2 - pipe output from cmd1 to cmd2");
        println!();
        println!("The following are built in:");
        for name in BUILTIN_NAMES {
            println!("  {}", name);
        }
        println!();
        println!("Use 'help <command>' for information on other programs.");
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Theme;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_help_continues_the_loop() {
        let theme = Arc::new(Mutex::new(Theme::default()));
        let cmd = HelpCommand::new(Styler::new(theme));
        assert_eq!(cmd.execute(&[]).expect("help should succeed"), Flow::Continue);
    }
}
