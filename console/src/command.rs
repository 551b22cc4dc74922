//! Line-oriented user actions.

use std::str::FromStr;

use catalog_core::{Field, ProductId};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  refresh                 reload the product list
  edit <id>               copy a row into the form
  set <field> <value>     change name, price, description or image
  clear                   empty the form
  submit                  create or save the product in the form
  delete <id>             delete a product (asks first)
  yes | no                answer the delete confirmation
  theme                   toggle light/dark mode
  show                    redraw the screen
  help                    this text
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Edit(ProductId),
    Set(Field, String),
    Clear,
    Submit,
    Delete(ProductId),
    Answer(bool),
    Theme,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("the id field cannot be edited")]
    ReadOnlyField,

    #[error(transparent)]
    UnknownField(#[from] catalog_core::form::UnknownField),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match verb {
            "" | "show" => Command::Show,
            "refresh" => Command::Refresh,
            "edit" => Command::Edit(ProductId::new(required("edit", rest)?)),
            "delete" => Command::Delete(ProductId::new(required("delete", rest)?)),
            "set" => {
                let (key, value) = rest.split_once(' ').unwrap_or((rest, ""));
                let field: Field = required("set", key)?.parse()?;
                if !field.is_editable() {
                    return Err(CommandError::ReadOnlyField);
                }
                Command::Set(field, value.trim().to_string())
            }
            "clear" => Command::Clear,
            "submit" => Command::Submit,
            "yes" | "y" => Command::Answer(true),
            "no" | "n" => Command::Answer(false),
            "theme" => Command::Theme,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(verb: &'static str, arg: &'a str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(verb))
    } else {
        Ok(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_updates_with_spaces() {
        assert_eq!(
            "set description Blue ink, fine tip".parse::<Command>(),
            Ok(Command::Set(
                Field::Description,
                "Blue ink, fine tip".to_string()
            ))
        );
    }

    #[test]
    fn set_without_value_clears_the_field() {
        assert_eq!(
            "set name".parse::<Command>(),
            Ok(Command::Set(Field::Name, String::new()))
        );
    }

    #[test]
    fn id_field_is_read_only() {
        assert_eq!(
            "set id 4".parse::<Command>(),
            Err(CommandError::ReadOnlyField)
        );
    }

    #[test]
    fn row_actions_need_an_id() {
        assert_eq!(
            "edit 3".parse::<Command>(),
            Ok(Command::Edit(ProductId::new("3")))
        );
        assert_eq!(
            "delete".parse::<Command>(),
            Err(CommandError::MissingArgument("delete"))
        );
    }

    #[test]
    fn answers_and_unknown_verbs() {
        assert_eq!("y".parse::<Command>(), Ok(Command::Answer(true)));
        assert_eq!(" no ".parse::<Command>(), Ok(Command::Answer(false)));
        assert_eq!("".parse::<Command>(), Ok(Command::Show));
        assert!(matches!(
            "frobnicate".parse::<Command>(),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!(
            "set colour red".parse::<Command>(),
            Err(CommandError::UnknownField(_))
        ));
    }
}
