use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

mod alias;
mod cd;
mod clear;
mod color;
mod exit;
mod help;
mod history;

pub use alias::AliasCommand;
pub use cd::CdCommand;
pub use clear::ClearCommand;
pub use color::ColorCommand;
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use history::HistoryCommand;

use crate::core::alias::AliasTable;
use crate::core::history::HistoryLog;
use crate::style::{Styler, Theme};

/// Builtin names, in the order `help` lists them.
pub const BUILTIN_NAMES: [&str; 7] = ["cd", "help", "exit", "history", "clear", "color", "alias"];

/// Continuation signal returned by every builtin. Only `exit` terminates
/// the read loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    ExecutionError(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
            CommandError::ExecutionError(msg) => write!(f, "execution error: {}", msg),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl std::error::Error for CommandError {}

pub trait Command {
    fn execute(&self, args: &[String]) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Alias(AliasCommand),
    Cd(CdCommand),
    Clear(ClearCommand),
    Color(ColorCommand),
    Exit(ExitCommand),
    Help(HelpCommand),
    History(HistoryCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String]) -> Result<Flow, CommandError> {
        match self {
            CommandType::Alias(cmd) => cmd.execute(args),
            CommandType::Cd(cmd) => cmd.execute(args),
            CommandType::Clear(cmd) => cmd.execute(args),
            CommandType::Color(cmd) => cmd.execute(args),
            CommandType::Exit(cmd) => cmd.execute(args),
            CommandType::Help(cmd) => cmd.execute(args),
            CommandType::History(cmd) => cmd.execute(args),
        }
    }
}

/// Fixed table of in-process commands, consulted after `!!` and alias
/// resolution have rewritten the line.
#[derive(Clone)]
pub struct BuiltinRegistry {
    commands: BTreeMap<String, CommandType>,
}

impl BuiltinRegistry {
    pub fn new(
        aliases: Arc<Mutex<AliasTable>>,
        history: Arc<Mutex<HistoryLog>>,
        theme: Arc<Mutex<Theme>>,
        styler: Styler,
    ) -> Self {
        let mut commands = BTreeMap::new();

        commands.insert("cd".to_string(), CommandType::Cd(CdCommand::new()));
        commands.insert(
            "help".to_string(),
            CommandType::Help(HelpCommand::new(styler.clone())),
        );
        commands.insert(
            "exit".to_string(),
            CommandType::Exit(ExitCommand::new(aliases.clone(), history.clone())),
        );
        commands.insert(
            "history".to_string(),
            CommandType::History(HistoryCommand::new(history, styler.clone())),
        );
        commands.insert("clear".to_string(), CommandType::Clear(ClearCommand::new()));
        commands.insert(
            "color".to_string(),
            CommandType::Color(ColorCommand::new(theme, styler)),
        );
        commands.insert(
            "alias".to_string(),
            CommandType::Alias(AliasCommand::new(aliases)),
        );

        BuiltinRegistry { commands }
    }

    /// Invoke the named builtin, or None when the name is not one.
    pub fn execute(&self, command: &str, args: &[String]) -> Option<Result<Flow, CommandError>> {
        self.commands.get(command).map(|cmd| cmd.execute(args))
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }
}
