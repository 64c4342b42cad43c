use {
    crate::{
        domain::{SortDirection, SortDirective, SortField},
        engine::Command,
    },
    std::str::FromStr,
};

pub const HELP: &str = "\
commands:
  filter <text>            show assets whose name or symbol contains <text> (no text clears)
  sort <field> [asc|desc]  e.g. `sort price asc`, `sort marketCap-desc`
  refresh                  fetch the market listing again
  live                     toggle the live price channel
  sim                      toggle the price simulation
  show                     redraw now
  help                     this text
  quit                     exit";

/// One line typed by the user, already interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    Command(Command),
    Show,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_input(line: &str) -> UserInput {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" | "show" => UserInput::Show,
        "filter" | "f" => UserInput::Command(Command::SetFilter(rest.to_string())),
        "sort" | "s" => parse_sort(rest),
        "refresh" | "r" => UserInput::Command(Command::Refresh),
        "live" => UserInput::Command(Command::ToggleLiveUpdates),
        "sim" => UserInput::Command(Command::ToggleSimulation),
        "help" | "h" | "?" => UserInput::Help,
        "quit" | "q" | "exit" => UserInput::Quit,
        other => UserInput::Invalid(format!("unknown command '{}' (try `help`)", other)),
    }
}

/// `<field> [dir]` or the select-style `<field>-<dir>`. Direction defaults to descending.
fn parse_sort(args: &str) -> UserInput {
    let mut words = args.split_whitespace();
    let Some(first) = words.next() else {
        return UserInput::Invalid("sort needs a field, e.g. `sort price asc`".into());
    };
    let (field, direction) = match (first.split_once('-'), words.next()) {
        (Some((field, dir)), None) => (field, Some(dir)),
        (_, dir) => (first, dir),
    };

    let Ok(field) = SortField::from_str(field) else {
        return UserInput::Invalid(format!("unknown sort field '{}'", field));
    };
    let direction = match direction.map(SortDirection::from_str) {
        None => SortDirection::default(),
        Some(Ok(dir)) => dir,
        Some(Err(_)) => {
            return UserInput::Invalid("sort direction must be asc or desc".into());
        }
    };

    UserInput::Command(Command::SetSort(SortDirective::new(field, direction)))
}
