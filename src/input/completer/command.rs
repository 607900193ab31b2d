use std::{collections::BTreeSet, env, fs};

use rustyline::completion::Pair;

use crate::core::commands::BUILTIN_NAMES;

/// Completes the first word of a line: builtin names, executables found
/// on PATH, and the session's alias names.
#[derive(Clone)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
    aliases: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self {
            commands: BTreeSet::new(),
            aliases: BTreeSet::new(),
        };
        completer.refresh_commands();
        completer
    }

    pub fn refresh_commands(&mut self) {
        self.commands.clear();
        for name in BUILTIN_NAMES {
            self.commands.insert(name.to_string());
        }

        let Some(path_var) = env::var_os("PATH") else {
            return;
        };
        for dir in env::split_paths(&path_var) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_executable_kind = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if is_executable_kind {
                    if let Some(name) = entry.file_name().to_str() {
                        self.commands.insert(name.to_string());
                    }
                }
            }
        }
    }

    pub fn update_aliases(&mut self, names: &[String]) {
        self.aliases = names.iter().cloned().collect();
    }

    pub fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        let mut matches = Vec::new();

        for cmd in self.commands.iter().filter(|c| c.starts_with(prefix)) {
            matches.push(Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            });
        }
        for alias in self.aliases.iter().filter(|a| a.starts_with(prefix)) {
            matches.push(Pair {
                display: format!("{} (alias)", alias),
                replacement: alias.clone(),
            });
        }

        matches
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_completable() {
        let completer = CommandCompleter::new();
        let matches = completer.complete_command("hist");
        assert!(matches.iter().any(|p| p.replacement == "history"));
    }

    #[test]
    fn test_aliases_are_completable() {
        let mut completer = CommandCompleter::new();
        completer.update_aliases(&["ll".to_string()]);
        let matches = completer.complete_command("ll");
        assert!(matches.iter().any(|p| p.replacement == "ll"));
    }

    #[test]
    fn test_unmatched_prefix_yields_nothing() {
        let completer = CommandCompleter::new();
        assert!(completer
            .complete_command("zzz-no-such-prefix-zzz")
            .is_empty());
    }
}
