use std::borrow::Cow;

use super::{command::CommandCompleter, path::PathCompleter};
use crate::style::Styler;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Editor helper: first word completes as a command or alias, later
/// words complete as paths; the line and prompt are styled live.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    styler: Styler,
}

impl ShellCompleter {
    pub fn new(styler: Styler) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(),
            path_completer: PathCompleter::new(),
            styler,
        }
    }

    pub fn refresh_commands(&mut self) {
        self.command_completer.refresh_commands();
    }

    pub fn update_aliases(&mut self, names: &[String]) {
        self.command_completer.update_aliases(names);
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.styler.highlight_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(self.styler.prompt(prompt))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();

        if line_up_to_cursor.ends_with(' ') || words.is_empty() {
            words.push("");
        }

        let is_first_word = words.len() == 1;
        let word = words.last().copied().unwrap_or("");
        let start = if word.is_empty() {
            pos
        } else {
            line_up_to_cursor.rfind(word).unwrap_or(pos)
        };

        let matches = if is_first_word {
            self.command_completer.complete_command(word)
        } else {
            self.path_completer.complete_path(word)
        };

        Ok((start, matches))
    }
}
