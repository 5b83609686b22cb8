//! Command words understood by the console.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A console command. Parsing ignores ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Command {
    Add,
    List,
    Update,
    Delete,
    Search,
    Save,
    Exit,
}

impl Command {
    /// Parses a command token; `None` for anything unknown.
    pub fn parse(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    /// All command words in menu order.
    pub fn names() -> Vec<&'static str> {
        Command::iter().map(Into::into).collect()
    }
}

/// The first whitespace-delimited token of a line, or `""` for a blank line.
pub fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(Command::parse("add"), Some(Command::Add));
        assert_eq!(Command::parse("LIST"), Some(Command::List));
        assert_eq!(Command::parse("Exit"), Some(Command::Exit));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse("remove"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_names_in_menu_order() {
        assert_eq!(
            Command::names(),
            vec!["add", "list", "update", "delete", "search", "save", "exit"]
        );
    }

    #[test]
    fn test_first_token() {
        assert_eq!(first_token("  save  now "), "save");
        assert_eq!(first_token("   "), "");
        assert_eq!(first_token("Ali\n"), "Ali");
    }
}
