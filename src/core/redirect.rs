use std::fmt;

/// An argument vector with its redirection clauses extracted. The files
/// are opened and wired to the child's stdio at launch; no command string
/// is rebuilt for a host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSpec {
    pub argv: Vec<String>,
    pub stdout_to: Option<String>,
    pub stdin_from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectError {
    MissingTarget(char),
    MissingCommand,
}

impl fmt::Display for RedirectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectError::MissingTarget(op) => {
                write!(f, "syntax error: expected a file name after '{}'", op)
            }
            RedirectError::MissingCommand => write!(f, "syntax error: missing command"),
        }
    }
}

impl std::error::Error for RedirectError {}

pub fn contains_operator(args: &[String]) -> bool {
    args.iter().any(|arg| arg == ">" || arg == "<")
}

/// Scan left to right. Each `>` or `<` consumes the following token as
/// its target; a later duplicate overwrites the earlier one. All other
/// tokens form the base argv regardless of position.
pub fn parse(args: &[String]) -> Result<RedirectSpec, RedirectError> {
    let mut argv = Vec::new();
    let mut stdout_to = None;
    let mut stdin_from = None;

    let mut iter = args.iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            ">" => {
                let target = iter.next().ok_or(RedirectError::MissingTarget('>'))?;
                stdout_to = Some(target.clone());
            }
            "<" => {
                let target = iter.next().ok_or(RedirectError::MissingTarget('<'))?;
                stdin_from = Some(target.clone());
            }
            _ => argv.push(token.clone()),
        }
    }

    if argv.is_empty() {
        return Err(RedirectError::MissingCommand);
    }

    Ok(RedirectSpec {
        argv,
        stdout_to,
        stdin_from,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_detects_operators() {
        assert!(contains_operator(&args(&["sort", ">", "out.txt"])));
        assert!(contains_operator(&args(&["sort", "<", "in.txt"])));
        assert!(!contains_operator(&args(&["sort", "-r", "in.txt"])));
    }

    #[test]
    fn test_output_clause() {
        let spec = parse(&args(&["sort", ">", "out.txt"])).expect("should parse");
        assert_eq!(spec.argv, ["sort"]);
        assert_eq!(spec.stdout_to.as_deref(), Some("out.txt"));
        assert!(spec.stdin_from.is_none());
    }

    #[test]
    fn test_input_clause() {
        let spec = parse(&args(&["wc", "-l", "<", "in.txt"])).expect("should parse");
        assert_eq!(spec.argv, ["wc", "-l"]);
        assert_eq!(spec.stdin_from.as_deref(), Some("in.txt"));
        assert!(spec.stdout_to.is_none());
    }

    #[test]
    fn test_both_clauses_in_one_command() {
        let spec = parse(&args(&["sort", "<", "in.txt", ">", "out.txt"])).expect("should parse");
        assert_eq!(spec.argv, ["sort"]);
        assert_eq!(spec.stdin_from.as_deref(), Some("in.txt"));
        assert_eq!(spec.stdout_to.as_deref(), Some("out.txt"));
    }

    #[test]
    fn test_arguments_after_target_stay_in_argv() {
        let spec = parse(&args(&["head", ">", "out.txt", "-n", "2"])).expect("should parse");
        assert_eq!(spec.argv, ["head", "-n", "2"]);
        assert_eq!(spec.stdout_to.as_deref(), Some("out.txt"));
    }

    #[test]
    fn test_later_operator_overwrites_target() {
        let spec = parse(&args(&["sort", ">", "a.txt", ">", "b.txt"])).expect("should parse");
        assert_eq!(spec.stdout_to.as_deref(), Some("b.txt"));
    }

    #[test]
    fn test_missing_target_is_an_error() {
        assert_eq!(
            parse(&args(&["sort", ">"])),
            Err(RedirectError::MissingTarget('>'))
        );
        assert_eq!(
            parse(&args(&["sort", "<"])),
            Err(RedirectError::MissingTarget('<'))
        );
    }

    #[test]
    fn test_operator_without_command_is_an_error() {
        assert_eq!(
            parse(&args(&[">", "out.txt"])),
            Err(RedirectError::MissingCommand)
        );
    }
}
