//! Line commands understood by the terminal front end.

use shared::{GuestDetails, WizardStep};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    NextMonth,
    PreviousMonth,
    Day(u32),
    Slot(String),
    Tab(u8),
    Duration(u32),
    Back(WizardStep),
    Step(WizardStep),
    Confirm(GuestDetails),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help' for the list)")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument { command: &'static str, expected: &'static str },
    #[error("'{value}' is not a valid {expected}")]
    InvalidArgument { value: String, expected: &'static str },
    #[error("Use 'confirm <name> | <email>'")]
    MalformedConfirm,
}

pub const HELP_TEXT: &str = "\
Commands:
  next | n               show the next month
  prev | p               show the previous month
  day <n>                pick day n of the shown month
  slot <HH:MM>           pick a time slot
  tab <1-6>              pick a two-hour band (tabbed mode)
  duration <min>         change the appointment length
  back <1|2>             return to an earlier step
  step <1|2|3>           jump to a step
  confirm <name> | <email>
                         confirm the booking
  help                   show this list
  quit | q               leave";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "next" | "n" => Command::NextMonth,
        "prev" | "p" => Command::PreviousMonth,
        "day" | "d" => Command::Day(number_arg("day", rest, "day of the month")?),
        "slot" | "s" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument { command: "slot", expected: "a time like 10:30" });
            }
            Command::Slot(rest.to_string())
        }
        "tab" | "t" => {
            let number: u8 = number_arg("tab", rest, "tab number")?;
            // Tabs are shown 1-based
            let index = number
                .checked_sub(1)
                .ok_or_else(|| CommandError::InvalidArgument { value: rest.to_string(), expected: "tab number" })?;
            Command::Tab(index)
        }
        "duration" => Command::Duration(number_arg("duration", rest, "number of minutes")?),
        "back" | "b" => Command::Back(step_arg("back", rest)?),
        "step" => Command::Step(step_arg("step", rest)?),
        "confirm" | "c" => {
            let (name, email) = rest.split_once('|').ok_or(CommandError::MalformedConfirm)?;
            Command::Confirm(GuestDetails::new(name.trim(), email.trim()))
        }
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn number_arg<T: std::str::FromStr>(command: &'static str, rest: &str, expected: &'static str) -> Result<T, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument { command, expected });
    }
    rest.parse()
        .map_err(|_| CommandError::InvalidArgument { value: rest.to_string(), expected })
}

fn step_arg(command: &'static str, rest: &str) -> Result<WizardStep, CommandError> {
    let number: u8 = number_arg(command, rest, "step number")?;
    WizardStep::from_number(number)
        .ok_or_else(|| CommandError::InvalidArgument { value: rest.to_string(), expected: "step number" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_commands() {
        assert_eq!(parse_command("next").unwrap(), Some(Command::NextMonth));
        assert_eq!(parse_command("  P ").unwrap(), Some(Command::PreviousMonth));
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(parse_command("day 15").unwrap(), Some(Command::Day(15)));
        assert_eq!(parse_command("slot 10:30").unwrap(), Some(Command::Slot("10:30".to_string())));
        assert_eq!(parse_command("duration 45").unwrap(), Some(Command::Duration(45)));
        assert_eq!(parse_command("back 1").unwrap(), Some(Command::Back(WizardStep::DateSelection)));
        assert_eq!(parse_command("step 3").unwrap(), Some(Command::Step(WizardStep::BookingDetails)));
    }

    #[test]
    fn test_tab_is_one_based() {
        assert_eq!(parse_command("tab 1").unwrap(), Some(Command::Tab(0)));
        assert_eq!(parse_command("tab 6").unwrap(), Some(Command::Tab(5)));
        assert!(matches!(parse_command("tab 0"), Err(CommandError::InvalidArgument { .. })));
    }

    #[test]
    fn test_confirm_splits_name_and_email() {
        let command = parse_command("confirm Kovács János | janos@example.com").unwrap();
        assert_eq!(command, Some(Command::Confirm(GuestDetails::new("Kovács János", "janos@example.com"))));

        // Empty fields are left for the guest form to reject
        let command = parse_command("confirm | ").unwrap();
        assert_eq!(command, Some(Command::Confirm(GuestDetails::new("", ""))));

        assert_eq!(parse_command("confirm János"), Err(CommandError::MalformedConfirm));
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(parse_command("book"), Err(CommandError::Unknown("book".to_string())));
        assert!(matches!(parse_command("day"), Err(CommandError::MissingArgument { command: "day", .. })));
        assert!(matches!(parse_command("day x"), Err(CommandError::InvalidArgument { .. })));
        assert!(matches!(parse_command("back 4"), Err(CommandError::InvalidArgument { .. })));
    }
}
