// src/browse.rs
// =============================================================================
// Commands typed at the `browse` prompt.
//
//   n, next        next page
//   p, prev        previous page
//   f, first       first page
//   l, last        last page
//   <number>       that page
//   s <query>      new search (starts again at page 1)
//   q, quit        leave
//
// Each paging command maps onto a button of the pagination strip, so a
// disabled or missing button does nothing, same as clicking it would.
// =============================================================================

use crate::pagination::Affordance;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Click(Affordance),
    Search(String),
    Help,
    Quit,
}

impl BrowseCommand {
    // None for blank lines
    pub fn parse(line: &str) -> Option<BrowseCommand> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(query) = line.strip_prefix("s ").or_else(|| line.strip_prefix("search ")) {
            return Some(BrowseCommand::Search(query.trim().to_string()));
        }

        let command = match line.to_lowercase().as_str() {
            "n" | "next" => BrowseCommand::Click(Affordance::Next),
            "p" | "prev" | "previous" => BrowseCommand::Click(Affordance::Previous),
            "f" | "first" => BrowseCommand::Click(Affordance::First),
            "l" | "last" => BrowseCommand::Click(Affordance::Last),
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            other => match other.parse::<u32>() {
                Ok(page) => BrowseCommand::Click(Affordance::Page(page)),
                Err(_) => BrowseCommand::Help,
            },
        };
        Some(command)
    }
}

pub const HELP: &str = "n next · p previous · f first · l last · <number> page · s <query> search · q quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_commands() {
        assert_eq!(BrowseCommand::parse("n"), Some(BrowseCommand::Click(Affordance::Next)));
        assert_eq!(BrowseCommand::parse(" Prev "), Some(BrowseCommand::Click(Affordance::Previous)));
        assert_eq!(BrowseCommand::parse("first"), Some(BrowseCommand::Click(Affordance::First)));
        assert_eq!(BrowseCommand::parse("l"), Some(BrowseCommand::Click(Affordance::Last)));
        assert_eq!(BrowseCommand::parse("17"), Some(BrowseCommand::Click(Affordance::Page(17))));
    }

    #[test]
    fn test_search_and_quit() {
        assert_eq!(
            BrowseCommand::parse("s async runtime"),
            Some(BrowseCommand::Search("async runtime".to_string()))
        );
        assert_eq!(BrowseCommand::parse("q"), Some(BrowseCommand::Quit));
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(BrowseCommand::parse("   "), None);
        assert_eq!(BrowseCommand::parse("-3"), Some(BrowseCommand::Help));
        assert_eq!(BrowseCommand::parse("what"), Some(BrowseCommand::Help));
    }
}
