use std::fs::File;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use super::{signal, ProcessError};
use crate::core::redirect::RedirectSpec;
use crate::flags::Flags;
use crate::path::PathExpander;

/// Launches external commands from an explicit argument vector. No host
/// shell is involved; redirection targets are opened here and attached
/// to the child's stdio.
#[derive(Clone)]
pub struct ProcessExecutor {
    quiet_mode: bool,
    path_expander: PathExpander,
}

impl ProcessExecutor {
    pub fn new(flags: &Flags) -> Self {
        ProcessExecutor {
            quiet_mode: flags.is_set("quiet"),
            path_expander: PathExpander::new(),
        }
    }

    fn expand_args(&self, args: &[String]) -> Vec<String> {
        args.iter()
            .map(|arg| {
                if arg.contains('~') {
                    self.path_expander
                        .expand(arg)
                        .map(|p| p.to_string_lossy().into_owned())
                        .unwrap_or_else(|_| arg.to_owned())
                } else {
                    arg.to_owned()
                }
            })
            .collect()
    }

    fn report_not_found(&self, name: &str) {
        if !self.quiet_mode {
            eprintln!("carotid: command not found: {}", name);
        }
    }

    /// Run a command with inherited stdio and wait for it. A missing
    /// binary is reported to the user, not treated as a shell failure;
    /// a nonzero exit status is not surfaced at all.
    pub fn run(&self, args: &[String]) -> Result<(), ProcessError> {
        let expanded = self.expand_args(args);
        let Some((program, rest)) = expanded.split_first() else {
            return Ok(());
        };

        let mut command = Command::new(program);
        command
            .args(rest)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(std::env::vars());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.report_not_found(program);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        signal::setup_signal_handlers()?;
        child.wait()?;
        Ok(())
    }

    /// Run a command with its stdio rewired according to the extracted
    /// redirection clauses.
    pub fn run_redirected(&self, spec: &RedirectSpec) -> Result<(), ProcessError> {
        let expanded = self.expand_args(&spec.argv);
        let Some((program, rest)) = expanded.split_first() else {
            return Ok(());
        };

        let mut command = Command::new(program);
        command.args(rest).stderr(Stdio::inherit());

        match &spec.stdin_from {
            Some(path) => {
                let source = self.open_target(path, |p| File::open(p))?;
                command.stdin(Stdio::from(source));
            }
            None => {
                command.stdin(Stdio::inherit());
            }
        }

        match &spec.stdout_to {
            Some(path) => {
                let sink = self.open_target(path, |p| File::create(p))?;
                command.stdout(Stdio::from(sink));
            }
            None => {
                command.stdout(Stdio::inherit());
            }
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.report_not_found(program);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        signal::setup_signal_handlers()?;
        child.wait()?;
        Ok(())
    }

    fn open_target(
        &self,
        path: &str,
        open: fn(&std::path::Path) -> std::io::Result<File>,
    ) -> Result<File, ProcessError> {
        let expanded = self
            .path_expander
            .expand(path)
            .map_err(|e| ProcessError::Redirect(e.to_string()))?;
        open(&expanded).map_err(|e| ProcessError::Redirect(format!("{}: {}", path, e)))
    }

    /// Run a command and collect its stdout. Used for the producer stage
    /// of a pipeline; the buffer stands in for the intermediate file.
    pub fn capture(&self, args: &[String]) -> Result<Vec<u8>, ProcessError> {
        let expanded = self.expand_args(args);
        let Some((program, rest)) = expanded.split_first() else {
            return Ok(Vec::new());
        };

        let mut command = Command::new(program);
        command.args(rest).stdout(Stdio::piped()).stderr(Stdio::inherit());

        match command.output() {
            Ok(output) => Ok(output.stdout),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.report_not_found(program);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run a command with the given bytes fed to its stdin. Used for the
    /// consumer stage of a pipeline.
    pub fn run_with_input(&self, args: &[String], input: &[u8]) -> Result<(), ProcessError> {
        let expanded = self.expand_args(args);
        let Some((program, rest)) = expanded.split_first() else {
            return Ok(());
        };

        let mut command = Command::new(program);
        command
            .args(rest)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.report_not_found(program);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(mut child_stdin) = child.stdin.take() {
            // The consumer may close its input early (head, grep -m).
            if let Err(e) = child_stdin.write_all(input) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        child.wait()?;
        Ok(())
    }
}
