use crate::error::ShellError;
use std::path::PathBuf;

/// Expands a leading tilde to the user's home directory. `~user` forms
/// are passed through untouched.
#[derive(Clone)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        let Some(rest) = path.strip_prefix('~') else {
            return Ok(PathBuf::from(path));
        };

        if rest.is_empty() {
            return dirs::home_dir().ok_or(ShellError::HomeDirNotFound);
        }

        match rest.strip_prefix('/') {
            Some(tail) => {
                let mut expanded = dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?;
                for part in tail.split('/').filter(|p| !p.is_empty()) {
                    expanded.push(part);
                }
                Ok(expanded)
            }
            None => Ok(PathBuf::from(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_untouched() {
        let expander = PathExpander::new();
        assert_eq!(
            expander.expand("/tmp/file").expect("should expand"),
            PathBuf::from("/tmp/file")
        );
    }

    #[test]
    fn test_bare_tilde_is_home() {
        let expander = PathExpander::new();
        let home = dirs::home_dir().expect("home dir available in tests");
        assert_eq!(expander.expand("~").expect("should expand"), home);
    }

    #[test]
    fn test_tilde_with_path() {
        let expander = PathExpander::new();
        let home = dirs::home_dir().expect("home dir available in tests");
        assert_eq!(
            expander.expand("~/notes/todo.txt").expect("should expand"),
            home.join("notes").join("todo.txt")
        );
    }

    #[test]
    fn test_tilde_user_form_passes_through() {
        let expander = PathExpander::new();
        assert_eq!(
            expander.expand("~other/file").expect("should expand"),
            PathBuf::from("~other/file")
        );
    }
}
