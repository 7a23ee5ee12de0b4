use crate::error::{PhoneSiftError, Result};
use crate::export::{ExportFormat, ListKind};
use std::path::PathBuf;

/// One line of user input in the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    List,
    All,
    ToggleStatus(String),
    ToggleFavorite(String),
    Favorites,
    Working,
    Export {
        kind: ListKind,
        format: Option<ExportFormat>,
    },
    Summary,
    Help,
    Quit,
    Empty,
}

pub const HELP_TEXT: &[(&str, &str)] = &[
    ("load <path>", "read a text file and extract its phone numbers"),
    ("list", "show the numbers found by the last load"),
    ("all", "show every number seen this session"),
    ("status <ref>", "toggle a number between DEAD and WORKING"),
    ("fav <ref>", "toggle a number's favorite mark"),
    ("favorites", "show favorite numbers with their status"),
    ("working", "show numbers marked WORKING"),
    ("export <favorites|working> [pdf|text]", "write a list document"),
    ("summary", "show registry counts"),
    ("help", "show this help"),
    ("quit", "end the session"),
];

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Empty);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let invalid = |reason: &str| PhoneSiftError::InvalidCommand {
            input: line.to_string(),
            reason: reason.to_string(),
        };

        match verb.to_lowercase().as_str() {
            "load" | "open" => {
                if rest.is_empty() {
                    return Err(invalid("expected a file path"));
                }
                Ok(Command::Load(PathBuf::from(unquote(rest))))
            }
            "list" | "ls" => Ok(Command::List),
            "all" => Ok(Command::All),
            "status" | "s" | "toggle" => {
                if rest.is_empty() {
                    return Err(invalid("expected an index or a phone number"));
                }
                Ok(Command::ToggleStatus(rest.to_string()))
            }
            "fav" | "f" | "favorite" | "heart" => {
                if rest.is_empty() {
                    return Err(invalid("expected an index or a phone number"));
                }
                Ok(Command::ToggleFavorite(rest.to_string()))
            }
            "favorites" | "favs" => Ok(Command::Favorites),
            "working" => Ok(Command::Working),
            "export" => {
                let mut args = rest.split_whitespace();
                let kind = args
                    .next()
                    .ok_or_else(|| invalid("expected `favorites` or `working`"))?;
                let kind = ListKind::parse(kind)
                    .ok_or_else(|| invalid("expected `favorites` or `working`"))?;
                let format = match args.next() {
                    Some(value) => Some(
                        ExportFormat::parse(value)
                            .ok_or_else(|| invalid("export format must be `pdf` or `text`"))?,
                    ),
                    None => None,
                };
                if args.next().is_some() {
                    return Err(invalid("too many arguments"));
                }
                Ok(Command::Export { kind, format })
            }
            "summary" | "stats" => Ok(Command::Summary),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(invalid("unknown command")),
        }
    }
}

fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(Command::parse("").unwrap(), Command::Empty);
        assert_eq!(Command::parse("  list ").unwrap(), Command::List);
        assert_eq!(Command::parse("LS").unwrap(), Command::List);
        assert_eq!(Command::parse("favorites").unwrap(), Command::Favorites);
        assert_eq!(Command::parse("working").unwrap(), Command::Working);
        assert_eq!(Command::parse("?").unwrap(), Command::Help);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_load_paths() {
        assert_eq!(
            Command::parse("load notes.txt").unwrap(),
            Command::Load(PathBuf::from("notes.txt"))
        );
        assert_eq!(
            Command::parse("open \"my contacts.txt\"").unwrap(),
            Command::Load(PathBuf::from("my contacts.txt"))
        );
        assert!(Command::parse("load").is_err());
    }

    #[test]
    fn test_parse_toggles_keep_reference_text() {
        assert_eq!(
            Command::parse("status 2").unwrap(),
            Command::ToggleStatus("2".to_string())
        );
        assert_eq!(
            Command::parse("fav (987) 654-3210").unwrap(),
            Command::ToggleFavorite("(987) 654-3210".to_string())
        );
        assert!(Command::parse("fav").is_err());
    }

    #[test]
    fn test_parse_export() {
        assert_eq!(
            Command::parse("export favorites").unwrap(),
            Command::Export {
                kind: ListKind::Favorites,
                format: None,
            }
        );
        assert_eq!(
            Command::parse("export working text").unwrap(),
            Command::Export {
                kind: ListKind::Working,
                format: Some(ExportFormat::Text),
            }
        );
        assert!(Command::parse("export dead").is_err());
        assert!(Command::parse("export working docx").is_err());
        assert!(Command::parse("export working pdf extra").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let error = Command::parse("dance").unwrap_err();
        assert!(matches!(error, PhoneSiftError::InvalidCommand { .. }));
    }
}
