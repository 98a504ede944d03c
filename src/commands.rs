// src/commands.rs
use crate::dashboard::UiEvent;

pub const HELP: &str = "\
Commands:
  <SYMBOL> | select <SYMBOL>   show details and chart for a listed stock
  range <1M|3M|1Y|5Y>          re-plot the current stock for a time range
  refresh                      reload the stocks list
  help                         show this message
  quit                         exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Quit,
    Empty,
}

/// Map one line of terminal input to a command.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Empty);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments: '{}'", line.trim()));
    }

    match (head.to_lowercase().as_str(), arg) {
        ("help" | "?", None) => Ok(Command::Help),
        ("quit" | "exit" | "q", None) => Ok(Command::Quit),
        ("refresh", None) => Ok(Command::Event(UiEvent::RefreshList)),
        ("range", Some(label)) => Ok(Command::Event(UiEvent::SelectRange(label.to_string()))),
        ("range", None) => Err("range needs a label, e.g. 'range 1Y'".to_string()),
        ("select", Some(symbol)) => Ok(Command::Event(UiEvent::SelectSymbol(symbol.to_string()))),
        ("select", None) => Err("select needs a symbol, e.g. 'select AAPL'".to_string()),
        (_, None) => Ok(Command::Event(UiEvent::SelectSymbol(head.to_string()))),
        (_, Some(_)) => Err(format!("unknown command '{}'", head)),
    }
}
