//! Command-line parsing
//!
//! Turns `ghl <command> [args...]` into a [`Command`].

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List todos: todos
    Todos,
    /// Create a todo: add <title>
    Add { title: String },
    /// Set the completed flag: done <id> / undo <id>
    SetCompleted { id: String, completed: bool },
    /// Change a title: rename <id> <title>
    Rename { id: String, title: String },
    /// Delete a todo: rm <id>
    Remove { id: String },
    /// List events: events
    Events,
    /// Create an event: event <title> <date> <capacity> [description]
    CreateEvent {
        title: String,
        date: String,
        capacity: i32,
        description: String,
    },
    /// Register for an event: register <event_id> <name> <email>
    Register {
        event_id: String,
        name: String,
        email: String,
    },
    /// List registrations: registrations <event_id>
    Registrations { event_id: String },
    /// Show the dev proxy table, or where one path goes: proxy [--json | <path>]
    Proxy { path: Option<String>, json: bool },
    /// Probe the backend: status
    Status,
    /// Show help: help
    Help,
    /// Unusable input, with the message to print
    Invalid { message: String },
}

fn usage(text: &str) -> Command {
    Command::Invalid {
        message: format!("Usage: ghl {}", text),
    }
}

impl Command {
    /// Parse arguments following the program name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let args: Vec<&str> = args.iter().map(|s| s.as_ref()).collect();

        let Some((cmd, rest)) = args.split_first() else {
            return Command::Todos;
        };

        let name = cmd.to_lowercase();
        match name.as_str() {
            "todos" | "ls" => Command::Todos,
            "add" => {
                let title = rest.join(" ");
                if title.trim().is_empty() {
                    usage("add <title>")
                } else {
                    Command::Add { title }
                }
            }
            "done" | "undo" => match rest {
                [id] => Command::SetCompleted {
                    id: id.to_string(),
                    completed: name == "done",
                },
                _ => usage(&format!("{} <id>", name)),
            },
            "rename" => match rest {
                [id, title @ ..] if !title.is_empty() => Command::Rename {
                    id: id.to_string(),
                    title: title.join(" "),
                },
                _ => usage("rename <id> <title>"),
            },
            "rm" | "delete" => match rest {
                [id] => Command::Remove { id: id.to_string() },
                _ => usage("rm <id>"),
            },
            "events" => Command::Events,
            "event" => match rest {
                [title, date, capacity, description @ ..] => match capacity.parse::<i32>() {
                    Ok(capacity) if capacity > 0 => Command::CreateEvent {
                        title: title.to_string(),
                        date: date.to_string(),
                        capacity,
                        description: description.join(" "),
                    },
                    _ => Command::Invalid {
                        message: format!("Capacity must be a positive number, got '{}'", capacity),
                    },
                },
                _ => usage("event <title> <date> <capacity> [description]"),
            },
            "register" => match rest {
                [event_id, name, email] => Command::Register {
                    event_id: event_id.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                },
                _ => usage("register <event_id> <name> <email>"),
            },
            "registrations" => match rest {
                [event_id] => Command::Registrations {
                    event_id: event_id.to_string(),
                },
                _ => usage("registrations <event_id>"),
            },
            "proxy" => match rest {
                [] => Command::Proxy { path: None, json: false },
                ["--json"] => Command::Proxy { path: None, json: true },
                [path] if !path.starts_with('-') => Command::Proxy {
                    path: Some(path.to_string()),
                    json: false,
                },
                _ => usage("proxy [--json | <path>]"),
            },
            "status" => Command::Status,
            "help" | "--help" | "-h" => Command::Help,
            _ => Command::Invalid {
                message: format!("Unknown command: {}. Run 'ghl help' for usage.", cmd),
            },
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"ghl - todo and event client

Usage: ghl [command]

Commands:
  todos                                   List todos (default)
  add <title>                             Create a todo
  done <id>                               Mark a todo completed
  undo <id>                               Mark a todo not completed
  rename <id> <title>                     Change a todo's title
  rm <id>                                 Delete a todo
  events                                  List events
  event <title> <date> <capacity> [desc]  Create an event
  register <event_id> <name> <email>      Register for an event
  registrations <event_id>                List registrations for an event
  proxy [--json | <path>]                 Show the dev proxy table or route a path
  status                                  Check if the backend is up
  help                                    Show this help message

Set GHL_API_URL to target a backend other than http://localhost:8080."#
    }
}
