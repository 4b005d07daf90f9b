//! Menu commands and their argument parsing.

use core::str::FromStr;

use storekeep_catalog::{ParsePriceError, Price};

use crate::error::SessionError;

/// Which menu entry the user picked, before its arguments are known.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Add,
    Update,
    Delete,
    Bundle,
    Show,
    List,
    Exit,
    Assign,
    Bundles,
    History,
    Help,
}

impl CommandKind {
    /// Prompts for the arguments this command takes, in order.
    pub fn arg_prompts(self) -> &'static [&'static str] {
        match self {
            Self::Add => &["product name", "product price"],
            Self::Update => &["product name", "new price"],
            Self::Delete => &["product name"],
            Self::Bundle => &["bundle name", "first product name", "second product name"],
            Self::Assign => &["bundle name", "product name"],
            Self::Show => &["bundle name"],
            Self::List | Self::Exit | Self::Bundles | Self::History | Self::Help => &[],
        }
    }
}

impl FromStr for CommandKind {
    type Err = SessionError;

    /// Accepts the original menu numbers (1-7) and word aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "1" | "add" => Self::Add,
            "2" | "update" => Self::Update,
            "3" | "delete" | "remove" => Self::Delete,
            "4" | "bundle" => Self::Bundle,
            "5" | "show" => Self::Show,
            "6" | "list" => Self::List,
            "7" | "exit" | "quit" => Self::Exit,
            "assign" => Self::Assign,
            "bundles" => Self::Bundles,
            "history" => Self::History,
            "help" | "?" => Self::Help,
            _ => return Err(SessionError::UnknownCommand(s.trim().to_string())),
        };
        Ok(kind)
    }
}

/// A fully parsed command, ready to run against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { name: String, price: Price },
    Update { name: String, price: Price },
    Delete { name: String },
    Bundle { bundle: String, first: String, second: String },
    Assign { bundle: String, product: String },
    Show { bundle: String },
    List,
    Bundles,
    History,
    Help,
    Exit,
}

impl Command {
    /// Build a command from its kind and positional arguments.
    pub fn build(kind: CommandKind, args: Vec<String>) -> Result<Self, SessionError> {
        let prompts = kind.arg_prompts();
        if let Some(extra) = args.get(prompts.len()) {
            return Err(SessionError::UnexpectedArgument(extra.clone()));
        }
        let mut args = args.into_iter();
        let mut next = |i: usize| -> Result<String, SessionError> {
            args.next()
                .filter(|a| !a.trim().is_empty())
                .ok_or(SessionError::MissingArgument(prompts[i]))
        };

        let command = match kind {
            CommandKind::Add => Self::Add {
                name: next(0)?,
                price: parse_price(&next(1)?)?,
            },
            CommandKind::Update => Self::Update {
                name: next(0)?,
                price: parse_price(&next(1)?)?,
            },
            CommandKind::Delete => Self::Delete { name: next(0)? },
            CommandKind::Bundle => Self::Bundle {
                bundle: next(0)?,
                first: next(1)?,
                second: next(2)?,
            },
            CommandKind::Assign => Self::Assign {
                bundle: next(0)?,
                product: next(1)?,
            },
            CommandKind::Show => Self::Show { bundle: next(0)? },
            CommandKind::List => Self::List,
            CommandKind::Bundles => Self::Bundles,
            CommandKind::History => Self::History,
            CommandKind::Help => Self::Help,
            CommandKind::Exit => Self::Exit,
        };
        Ok(command)
    }
}

/// Parse a decimal price, with an optional leading `$`.
pub fn parse_price(raw: &str) -> Result<Price, SessionError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    digits.parse().map_err(|e| match e {
        ParsePriceError::Malformed(_) => SessionError::InvalidPrice(trimmed.to_string()),
        ParsePriceError::Invalid(e) => SessionError::Domain(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storekeep_core::DomainError;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn menu_numbers_and_words_map_to_the_same_kind() {
        assert_eq!("1".parse::<CommandKind>().unwrap(), CommandKind::Add);
        assert_eq!("ADD".parse::<CommandKind>().unwrap(), CommandKind::Add);
        assert_eq!("5".parse::<CommandKind>().unwrap(), CommandKind::Show);
        assert_eq!("quit".parse::<CommandKind>().unwrap(), CommandKind::Exit);
    }

    #[test]
    fn unknown_menu_choice_is_rejected() {
        match "9".parse::<CommandKind>() {
            Err(SessionError::UnknownCommand(c)) => assert_eq!(c, "9"),
            _ => panic!("Expected UnknownCommand"),
        }
    }

    #[test]
    fn build_add_parses_price() {
        let command = Command::build(CommandKind::Add, args(&["Pen", "$1.50"])).unwrap();
        assert_eq!(
            command,
            Command::Add {
                name: "Pen".to_string(),
                price: Price::from_cents(150),
            }
        );
    }

    #[test]
    fn build_reports_first_missing_argument() {
        match Command::build(CommandKind::Bundle, args(&["Kit", "Pen"])) {
            Err(SessionError::MissingArgument(what)) => assert_eq!(what, "second product name"),
            _ => panic!("Expected MissingArgument"),
        }
    }

    #[test]
    fn build_rejects_blank_argument() {
        match Command::build(CommandKind::Delete, args(&["  "])) {
            Err(SessionError::MissingArgument(what)) => assert_eq!(what, "product name"),
            _ => panic!("Expected MissingArgument"),
        }
    }

    #[test]
    fn build_rejects_extra_arguments() {
        match Command::build(CommandKind::List, args(&["now"])) {
            Err(SessionError::UnexpectedArgument(a)) => assert_eq!(a, "now"),
            _ => panic!("Expected UnexpectedArgument"),
        }
    }

    #[test]
    fn parse_price_rejects_garbage() {
        match parse_price("abc") {
            Err(SessionError::InvalidPrice(p)) => assert_eq!(p, "abc"),
            _ => panic!("Expected InvalidPrice"),
        }
    }

    #[test]
    fn parse_price_keeps_cents_exact() {
        assert_eq!(parse_price("$1.10").unwrap(), Price::from_cents(110));
        assert_eq!(parse_price(" 0.29 ").unwrap(), Price::from_cents(29));
    }

    #[test]
    fn parse_price_rejects_fractions_of_a_cent_as_validation() {
        match parse_price("1.005") {
            Err(SessionError::Domain(DomainError::Validation(_))) => {}
            _ => panic!("Expected a validation error"),
        }
    }

    #[test]
    fn parse_price_rejects_negative_amounts_as_validation() {
        match parse_price("-2") {
            Err(SessionError::Domain(DomainError::Validation(_))) => {}
            _ => panic!("Expected a validation error"),
        }
    }
}
