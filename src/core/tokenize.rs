/// Token delimiters: space, tab, carriage return, newline.
const DELIMITERS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Split a raw input line into an argument vector. Runs of delimiters
/// collapse, so the result never contains empty tokens. A line of only
/// delimiters yields an empty vector; callers skip dispatch for those.
pub fn split_line(line: &str) -> Vec<String> {
    line.split(&DELIMITERS[..])
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_whitespace() {
        assert_eq!(split_line("ls -l /tmp"), vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn test_delimiters_collapse() {
        let tokens = split_line("  sort \t -r \r\n out.txt \n");
        assert_eq!(tokens, vec!["sort", "-r", "out.txt"]);
        assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_blank_line_yields_nothing() {
        assert!(split_line("").is_empty());
        assert!(split_line(" \t\r\n").is_empty());
    }

    #[test]
    fn test_join_then_split_round_trip() {
        let tokens = split_line("grep -n main src/lib.rs");
        let rejoined = tokens.join(" ");
        assert_eq!(split_line(&rejoined), tokens);
    }
}
