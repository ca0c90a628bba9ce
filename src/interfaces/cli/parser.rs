//! Console command parsing

/// A parsed console line: lower-cased command name plus raw arguments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    /// Split a line on whitespace, keeping double-quoted runs together
    ///
    /// Quote characters themselves are dropped; an unterminated quote runs
    /// to the end of the line.
    pub fn parse(&self, line: &str) -> ParsedCommand {
        let line = line.trim();
        if line.is_empty() {
            return ParsedCommand::default();
        }

        let mut parts = split_quoted(line).into_iter();
        let name = parts.next().unwrap_or_default().to_lowercase();
        ParsedCommand {
            name,
            args: parts.collect(),
        }
    }
}

fn split_quoted(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if !quoted && c.is_whitespace() => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Rewrite a bare `<base_url>/<code>` line into `open <code>`
///
/// The scheme (`http://` or `https://`) is ignored on both sides. Lines with
/// spaces are commands and pass through untouched, as does anything that
/// does not start with the base URL.
pub fn normalize_shortlink_input(line: &str, base_url: &str) -> String {
    let input = line.trim();
    if input.is_empty() || input.contains(' ') {
        return input.to_string();
    }

    let base = base_url.trim();
    if base.is_empty() {
        return input.to_string();
    }

    let input_no_scheme = strip_scheme(input);
    let base_no_scheme = strip_scheme(base);
    let prefix = if base_no_scheme.ends_with('/') {
        base_no_scheme.to_string()
    } else {
        format!("{}/", base_no_scheme)
    };

    if let Some(rest) = input_no_scheme.strip_prefix(prefix.as_str()) {
        let code = rest.trim_matches('/');
        if !code.is_empty() {
            return format!("open {}", code);
        }
    }

    input.to_string()
}

fn strip_scheme(s: &str) -> &str {
    let s = s.trim();
    for scheme in ["http://", "https://"] {
        if let Some(head) = s.get(..scheme.len())
            && head.eq_ignore_ascii_case(scheme)
        {
            return &s[scheme.len()..];
        }
    }
    s
}
