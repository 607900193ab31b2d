use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::alias::AliasTable;
use crate::core::commands::{BuiltinRegistry, Flow};
use crate::core::history::{HistoryLog, MAX_HISTORY};
use crate::core::{redirect, tokenize};
use crate::error::ShellError;
use crate::flags::Flags;
use crate::process::ProcessExecutor;
use crate::style::{Styler, Theme};

use super::pipeline::Pipeline;

/// Bound on `!!` and alias substitutions for a single line. Indirect
/// alias cycles hit this instead of recursing forever.
const MAX_EXPANSIONS: usize = 16;

/// Owns the session state (alias table, history log, last command) and
/// resolves one line at a time: `!!` replay, alias substitution, builtin
/// lookup, then external launch with optional redirection.
pub struct Dispatcher {
    aliases: Arc<Mutex<AliasTable>>,
    history: Arc<Mutex<HistoryLog>>,
    last_command: Option<String>,
    builtins: BuiltinRegistry,
    process: ProcessExecutor,
}

impl Dispatcher {
    pub fn new(flags: &Flags, theme: Arc<Mutex<Theme>>, styler: Styler) -> Self {
        let aliases = Arc::new(Mutex::new(AliasTable::with_defaults()));
        let history = Arc::new(Mutex::new(HistoryLog::new(MAX_HISTORY)));
        let builtins = BuiltinRegistry::new(aliases.clone(), history.clone(), theme, styler);
        let process = ProcessExecutor::new(flags);

        Self {
            aliases,
            history,
            last_command: None,
            builtins,
            process,
        }
    }

    pub fn alias_names(&self) -> Vec<String> {
        self.lock_aliases().names()
    }

    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    pub fn history_entries(&self) -> Vec<String> {
        self.lock_history().entries().to_vec()
    }

    fn lock_aliases(&self) -> MutexGuard<'_, AliasTable> {
        match self.aliases.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_history(&self) -> MutexGuard<'_, HistoryLog> {
        match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Resolve and run one raw input line. The raw line is recorded into
    /// history before any rewriting, so `history` shows what was typed.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        self.lock_history().record(line);

        if line.contains('|') {
            self.last_command = Some(line.to_string());
            let pipeline = Pipeline::parse(line)?;
            pipeline.execute(&self.process)?;
            return Ok(Flow::Continue);
        }

        let args = tokenize::split_line(line);
        // A `!!` line replays the stored command and must not replace it
        // with the literal `!!`; anything else becomes the new last
        // command before aliases rewrite it.
        if args.first().map(String::as_str) != Some("!!") {
            self.last_command = Some(line.to_string());
        }

        self.dispatch(args)
    }

    fn dispatch(&mut self, mut args: Vec<String>) -> Result<Flow, ShellError> {
        let mut expansions = 0;

        loop {
            let Some(first) = args.first().cloned() else {
                return Ok(Flow::Continue);
            };

            if first == "!!" {
                let Some(previous) = self.last_command.clone() else {
                    println!("No previous command found.");
                    return Ok(Flow::Continue);
                };

                expansions += 1;
                if expansions > MAX_EXPANSIONS {
                    eprintln!("carotid: too many expansions, stopping at '{}'", previous);
                    return Ok(Flow::Continue);
                }

                println!("Executing: {}", previous);
                if previous.contains('|') {
                    let pipeline = Pipeline::parse(&previous)?;
                    pipeline.execute(&self.process)?;
                    return Ok(Flow::Continue);
                }

                args = tokenize::split_line(&previous);
                continue;
            }

            let replacement = self.lock_aliases().lookup(&first).map(str::to_owned);
            if let Some(replacement) = replacement {
                expansions += 1;
                if expansions > MAX_EXPANSIONS {
                    eprintln!("carotid: too many alias expansions for '{}'", first);
                    return Ok(Flow::Continue);
                }

                let mut rebuilt = replacement;
                for arg in &args[1..] {
                    rebuilt.push(' ');
                    rebuilt.push_str(arg);
                }
                args = tokenize::split_line(&rebuilt);

                // Self-referencing aliases substitute once and stop.
                if args.first().map(String::as_str) == Some(first.as_str()) {
                    break;
                }
                continue;
            }

            break;
        }

        let Some(command) = args.first() else {
            return Ok(Flow::Continue);
        };

        if let Some(result) = self.builtins.execute(command, &args[1..]) {
            return result.map_err(ShellError::from);
        }

        if redirect::contains_operator(&args) {
            let spec = redirect::parse(&args)?;
            self.process.run_redirected(&spec)?;
        } else {
            self.process.run(&args)?;
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        let theme = Arc::new(Mutex::new(Theme::default()));
        let styler = Styler::new(theme.clone());
        Dispatcher::new(&Flags::default(), theme, styler)
    }

    #[test]
    fn test_empty_line_is_skipped() {
        let mut dispatcher = dispatcher();
        let flow = dispatcher.execute_line("   \t ").expect("blank line is a no-op");
        assert_eq!(flow, Flow::Continue);
        assert!(dispatcher.history_entries().is_empty());
        assert!(dispatcher.last_command().is_none());
    }

    #[test]
    fn test_raw_line_is_recorded_before_rewriting() {
        let mut dispatcher = dispatcher();
        dispatcher.execute_line("ll").expect("alias should run");
        assert_eq!(dispatcher.history_entries(), ["ll"]);
        assert_eq!(dispatcher.last_command(), Some("ll"));
    }

    #[test]
    fn test_repeat_without_previous_command() {
        let mut dispatcher = dispatcher();
        let flow = dispatcher.execute_line("!!").expect("reported, not fatal");
        assert_eq!(flow, Flow::Continue);
        // The unresolvable `!!` is still recorded as raw input.
        assert_eq!(dispatcher.history_entries(), ["!!"]);
        assert!(dispatcher.last_command().is_none());
    }

    #[test]
    fn test_repeat_replays_builtin() {
        let mut dispatcher = dispatcher();
        dispatcher.execute_line("help").expect("help should run");
        let flow = dispatcher.execute_line("!!").expect("replay should run");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(dispatcher.last_command(), Some("help"));
        assert_eq!(dispatcher.history_entries(), ["help", "!!"]);
    }

    #[test]
    fn test_repeat_twice_keeps_replaying() {
        let mut dispatcher = dispatcher();
        dispatcher.execute_line("help").expect("help should run");
        dispatcher.execute_line("!!").expect("first replay");
        dispatcher.execute_line("!!").expect("second replay");
        assert_eq!(dispatcher.last_command(), Some("help"));
    }

    #[test]
    fn test_builtin_exit_terminates() {
        let mut dispatcher = dispatcher();
        let flow = dispatcher.execute_line("exit").expect("exit should run");
        assert_eq!(flow, Flow::Exit);
    }

    #[test]
    fn test_alias_cycle_terminates() {
        let mut dispatcher = dispatcher();
        {
            let mut aliases = dispatcher.lock_aliases();
            aliases.define("ping", "pong");
            aliases.define("pong", "ping");
        }
        let flow = dispatcher.execute_line("ping").expect("cycle is reported");
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_self_referencing_alias_expands_once() {
        let mut dispatcher = dispatcher();
        {
            let mut aliases = dispatcher.lock_aliases();
            // Expands to itself; must dispatch, not loop.
            aliases.define("history", "history");
        }
        let flow = dispatcher.execute_line("history").expect("builtin should run");
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_alias_arguments_are_appended() {
        let mut dispatcher = dispatcher();
        {
            let mut aliases = dispatcher.lock_aliases();
            aliases.define("greet", "echo hello");
        }
        let flow = dispatcher.execute_line("greet world").expect("echo should run");
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_unknown_command_is_soft() {
        let mut dispatcher = dispatcher();
        let flow = dispatcher
            .execute_line("definitely-not-a-real-command-xyz")
            .expect("missing binary is reported, not fatal");
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_redirected_output_reaches_file() {
        let mut dispatcher = dispatcher();
        let target = std::env::temp_dir().join(format!("carotid-dispatch-{}.txt", std::process::id()));
        let line = format!("echo hi > {}", target.display());

        dispatcher.execute_line(&line).expect("echo should run");

        let contents = std::fs::read_to_string(&target).expect("file written");
        assert_eq!(contents, "hi\n");
        std::fs::remove_file(&target).expect("cleanup");
    }

    #[test]
    fn test_missing_redirect_target_is_reported() {
        let mut dispatcher = dispatcher();
        let result = dispatcher.execute_line("sort >");
        assert!(matches!(result, Err(ShellError::Redirect(_))));
    }

    #[test]
    fn test_pipeline_line_updates_last_command() {
        let mut dispatcher = dispatcher();
        dispatcher
            .execute_line("echo one | cat")
            .expect("pipeline should run");
        assert_eq!(dispatcher.last_command(), Some("echo one | cat"));
        assert_eq!(dispatcher.history_entries(), ["echo one | cat"]);
    }

    #[test]
    fn test_repeat_replays_pipeline() {
        let mut dispatcher = dispatcher();
        dispatcher
            .execute_line("echo one | cat")
            .expect("pipeline should run");
        let flow = dispatcher.execute_line("!!").expect("replay should run");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(dispatcher.last_command(), Some("echo one | cat"));
    }

    #[test]
    fn test_history_keeps_raw_pipeline_and_repeat_lines() {
        let mut dispatcher = dispatcher();
        dispatcher.execute_line("help").expect("help should run");
        dispatcher.execute_line("!!").expect("replay should run");
        dispatcher
            .execute_line("echo one | cat")
            .expect("pipeline should run");
        assert_eq!(
            dispatcher.history_entries(),
            ["help", "!!", "echo one | cat"]
        );
    }
}
