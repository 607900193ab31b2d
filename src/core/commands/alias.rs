use std::sync::{Arc, Mutex};

use super::{Command, CommandError, Flow};
use crate::core::alias::AliasTable;

#[derive(Clone)]
pub struct AliasCommand {
    aliases: Arc<Mutex<AliasTable>>,
}

impl AliasCommand {
    pub fn new(aliases: Arc<Mutex<AliasTable>>) -> Self {
        Self { aliases }
    }

    fn list(&self) -> Result<Flow, CommandError> {
        let aliases = self.aliases.lock().map_err(|e| {
            CommandError::ExecutionError(format!("Failed to access aliases: {}", e))
        })?;

        println!("Current aliases:");
        for entry in aliases.entries() {
            println!("{}='{}'", entry.name, entry.command);
        }
        Ok(Flow::Continue)
    }

    fn define(&self, name: &str, command: &str) -> Result<Flow, CommandError> {
        let mut aliases = self.aliases.lock().map_err(|e| {
            CommandError::ExecutionError(format!("Failed to access aliases: {}", e))
        })?;

        if aliases.define(name, command) {
            println!("Alias created: {}='{}'", name, command);
        } else {
            println!("Maximum number of aliases reached.");
        }
        Ok(Flow::Continue)
    }

    fn print_usage(&self) -> Result<Flow, CommandError> {
        println!("Usage: alias <name> <command>");
        println!("       alias <name>=<command>");
        Ok(Flow::Continue)
    }
}

impl Command for AliasCommand {
    fn execute(&self, args: &[String]) -> Result<Flow, CommandError> {
        let Some(first) = args.first() else {
            return self.list();
        };

        // "name=command" form: split on the first '=' in the name token;
        // any further tokens extend the replacement.
        if let Some((name, command)) = first.split_once('=') {
            if name.is_empty() || (command.is_empty() && args.len() == 1) {
                return self.print_usage();
            }
            let mut replacement = command.to_string();
            for extra in &args[1..] {
                if !replacement.is_empty() {
                    replacement.push(' ');
                }
                replacement.push_str(extra);
            }
            return self.define(name, &replacement);
        }

        if args.len() < 2 {
            return self.print_usage();
        }

        self.define(first, &args[1..].join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alias::MAX_ALIASES;

    fn command() -> (AliasCommand, Arc<Mutex<AliasTable>>) {
        let aliases = Arc::new(Mutex::new(AliasTable::new(MAX_ALIASES)));
        (AliasCommand::new(aliases.clone()), aliases)
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_define_with_separate_tokens() {
        let (cmd, aliases) = command();
        let flow = cmd.execute(&args(&["ll", "dir"])).expect("should define");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(aliases.lock().expect("lock").resolve("ll"), "dir");
    }

    #[test]
    fn test_define_with_combined_token() {
        let (cmd, aliases) = command();
        cmd.execute(&args(&["ll=dir"])).expect("should define");
        assert_eq!(aliases.lock().expect("lock").resolve("ll"), "dir");
    }

    #[test]
    fn test_combined_and_split_forms_agree() {
        let (cmd_a, aliases_a) = command();
        let (cmd_b, aliases_b) = command();
        cmd_a.execute(&args(&["gs=git", "status"])).expect("should define");
        cmd_b.execute(&args(&["gs", "git", "status"])).expect("should define");
        assert_eq!(
            aliases_a.lock().expect("lock").resolve("gs"),
            aliases_b.lock().expect("lock").resolve("gs"),
        );
    }

    #[test]
    fn test_multi_word_replacement() {
        let (cmd, aliases) = command();
        cmd.execute(&args(&["ll", "ls", "-l"])).expect("should define");
        assert_eq!(aliases.lock().expect("lock").resolve("ll"), "ls -l");
    }

    #[test]
    fn test_listing_is_soft() {
        let (cmd, _) = command();
        assert_eq!(cmd.execute(&[]).expect("should list"), Flow::Continue);
    }

    #[test]
    fn test_lone_name_prints_usage() {
        let (cmd, aliases) = command();
        assert_eq!(
            cmd.execute(&args(&["nonsense"])).expect("usage is soft"),
            Flow::Continue
        );
        assert!(aliases.lock().expect("lock").is_empty());
    }

    #[test]
    fn test_capacity_exhaustion_is_soft() {
        let aliases = Arc::new(Mutex::new(AliasTable::new(1)));
        let cmd = AliasCommand::new(aliases.clone());
        cmd.execute(&args(&["a=one"])).expect("should define");
        let flow = cmd.execute(&args(&["b=two"])).expect("rejection is soft");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(aliases.lock().expect("lock").len(), 1);
    }
}
