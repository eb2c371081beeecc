//! Parsing one line of player input.

use mathmaster_core::parse_answer;

pub const HELP: &str = "\
Type a number and press Enter to answer.
  :levels      list levels
  :level N     switch to an unlocked level
  :hint        spend a hint on this question
  :stats       show your progress
  :badges      show achievements
  :name NAME   set your player name
  :reset       erase all progress
  :quit        save and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Answer(i64),
    Levels,
    Level(u32),
    Hint,
    Stats,
    Badges,
    Name(String),
    Reset,
    Help,
    Quit,
    /// Blank line; nothing to do.
    Empty,
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = line.strip_prefix(':') else {
            return parse_answer(line).map_or_else(|| Self::Unknown(line.to_string()), Self::Answer);
        };

        let (name, arg) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, arg)| (name, arg.trim()));
        match (name.to_ascii_lowercase().as_str(), arg) {
            ("levels", "") => Self::Levels,
            ("level", n) => n
                .parse()
                .map_or_else(|_| Self::Unknown(line.to_string()), Self::Level),
            ("hint", "") => Self::Hint,
            ("stats", "") => Self::Stats,
            ("badges", "") => Self::Badges,
            ("name", name) if !name.is_empty() => Self::Name(name.to_string()),
            ("reset", "") => Self::Reset,
            ("help" | "?", "") => Self::Help,
            ("quit" | "q" | "exit", "") => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_answers() {
        assert_eq!(Command::parse(" 42 "), Command::Answer(42));
        assert_eq!(Command::parse("-3"), Command::Answer(-3));
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn non_numeric_text_is_unknown() {
        assert_eq!(Command::parse("twelve"), Command::Unknown("twelve".to_string()));
    }

    #[test]
    fn colon_commands() {
        assert_eq!(Command::parse(":levels"), Command::Levels);
        assert_eq!(Command::parse(":LEVEL 7"), Command::Level(7));
        assert_eq!(Command::parse(":hint"), Command::Hint);
        assert_eq!(Command::parse(":stats"), Command::Stats);
        assert_eq!(Command::parse(":badges"), Command::Badges);
        assert_eq!(Command::parse(":reset"), Command::Reset);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(":help"), Command::Help);
    }

    #[test]
    fn name_keeps_inner_spaces() {
        assert_eq!(
            Command::parse(":name  Ada  Lovelace "),
            Command::Name("Ada  Lovelace".to_string())
        );
    }

    #[test]
    fn bad_arguments_are_unknown() {
        assert!(matches!(Command::parse(":level two"), Command::Unknown(_)));
        assert!(matches!(Command::parse(":level"), Command::Unknown(_)));
        assert!(matches!(Command::parse(":name"), Command::Unknown(_)));
        assert!(matches!(Command::parse(":stats now"), Command::Unknown(_)));
    }
}
