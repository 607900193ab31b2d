use std::env;
use std::sync::{Arc, Mutex};

use rustyline::{config::Configurer, history::FileHistory, Editor};

mod dispatch;
pub mod pipeline;

use crate::{
    core::commands::Flow,
    error::ShellError,
    flags::Flags,
    input::ShellCompleter,
    style::{Styler, Theme},
};

pub use dispatch::Dispatcher;

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, FileHistory>,
    pub(crate) current_dir: String,
    pub(crate) completer: ShellCompleter,
    pub(crate) styler: Styler,
    pub(crate) flags: Flags,
    pub(crate) dispatcher: Dispatcher,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let theme = Arc::new(Mutex::new(Theme::default()));
        let styler = Styler::new(theme.clone());
        let dispatcher = Dispatcher::new(&flags, theme, styler.clone());

        let completer = ShellCompleter::new(styler.clone());
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer.clone()));
        editor.set_auto_add_history(true);

        let current_dir = env::current_dir()?.to_string_lossy().to_string();

        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to leave the shell");
        })?;

        Ok(Shell {
            editor,
            current_dir,
            completer,
            styler,
            flags,
            dispatcher,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            self.print_banner();
        }

        self.completer.refresh_commands();
        self.completer.update_aliases(&self.dispatcher.alias_names());
        self.editor.set_helper(Some(self.completer.clone()));

        loop {
            let prompt = self.render_prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        if !self.flags.is_set("quiet") {
                            eprintln!("Warning: Couldn't add to history: {}", e);
                        }
                    }

                    match self.dispatcher.execute_line(&line) {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => {
                            if !self.flags.is_set("quiet") {
                                eprintln!("{}", self.styler.error(&e.to_string()));
                            }
                        }
                    }

                    self.refresh_session_state();
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-C");
                    }
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-D");
                    }
                    break;
                }
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            }
        }
        Ok(())
    }

    /// Pick up state a command may have changed: the working directory
    /// after `cd`, alias names for completion after `alias`.
    fn refresh_session_state(&mut self) {
        if let Ok(dir) = env::current_dir() {
            self.current_dir = dir.to_string_lossy().to_string();
        }
        self.completer.update_aliases(&self.dispatcher.alias_names());
        self.editor.set_helper(Some(self.completer.clone()));
    }

    fn render_prompt(&self) -> String {
        let user = env::var("USER").unwrap_or_else(|_| "user".to_string());
        format!("{}@{}> ", user, self.current_dir)
    }

    fn print_banner(&self) {
        println!("{}", self.styler.header("=== Carotid Shell ==="));
        println!("History, aliases, redirection and pipelines built in.");
        println!("Type 'help' for available commands.");
        println!();
    }
}
