use std::{fs, path::Path};

use rustyline::completion::Pair;

/// Completes file-system paths for the non-command words of a line.
#[derive(Clone)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir, prefix) = split_input(incomplete);

        let mut matches = Vec::new();
        let Ok(entries) = fs::read_dir(&dir) else {
            return matches;
        };

        for entry in entries.filter_map(Result::ok) {
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !name.starts_with(&prefix) {
                continue;
            }

            let candidate = if dir == "." {
                name.clone()
            } else {
                format!("{}{}", dir_with_separator(&dir), name)
            };

            let pair = if entry.path().is_dir() {
                Pair {
                    display: format!("{}/", candidate),
                    replacement: format!("{}/", candidate),
                }
            } else {
                Pair {
                    display: candidate.clone(),
                    replacement: format!("{} ", candidate),
                }
            };
            matches.push(pair);
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

impl Default for PathCompleter {
    fn default() -> Self {
        Self::new()
    }
}

fn split_input(incomplete: &str) -> (String, String) {
    if incomplete.is_empty() {
        return (".".to_string(), String::new());
    }
    if incomplete.ends_with('/') {
        return (incomplete.to_string(), String::new());
    }

    let path = Path::new(incomplete);
    let prefix = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.to_string_lossy().into_owned()
        }
        _ => ".".to_string(),
    };
    (dir, prefix)
}

fn dir_with_separator(dir: &str) -> String {
    if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{}/", dir)
    }
}
