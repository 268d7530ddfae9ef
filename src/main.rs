//! ghl: command-line client for the todo and event services
//!
//! Builds the RPC clients once at startup and runs a single command against them.
//!
//! Usage:
//!   ghl               - List todos
//!   ghl add <title>   - Create a todo
//!   ghl events        - List events
//!   ghl proxy [path]  - Show the dev proxy table or route one path
//!   ghl help          - Show help

use std::env;
use std::error::Error;
use std::process::ExitCode;

use ghl::backend::api::BackendClient;
use ghl::commands::Command;
use ghl::config;
use ghl::dev_proxy::ProxyTable;
use ghl::rpc::event::v1::{Event, Registration};
use ghl::rpc::todo::v1::Todo;
use ghl::Clients;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args[..]);

    // Commands that never touch the backend
    let result = match command {
        Command::Help => {
            println!("{}", Command::help_text());
            Ok(())
        }
        Command::Invalid { message } => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
        Command::Proxy { path, json } => show_proxy(path.as_deref(), json),
        command => block_on_run(command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn block_on_run(command: Command) -> Result<(), Box<dyn Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(command))
}

fn show_proxy(path: Option<&str>, json: bool) -> Result<(), Box<dyn Error>> {
    let table = ProxyTable::dev();
    match path {
        Some(path) => match table.upstream_for(path) {
            Some(upstream) => println!("{} -> {}", path, upstream),
            None => println!("{} is served locally", path),
        },
        None if json => println!("{}", serde_json::to_string_pretty(&table)?),
        None => {
            for rule in table.rules() {
                println!("{} -> {}", rule.prefix, rule.upstream);
            }
        }
    }
    Ok(())
}

async fn run(command: Command) -> Result<(), Box<dyn Error>> {
    if let Command::Status = command {
        let backend = BackendClient::new(config::base_url());
        if backend.is_healthy().await {
            println!("Backend at {} is up", config::base_url());
        } else {
            println!("Backend at {} is not reachable", config::base_url());
        }
        return Ok(());
    }

    let clients = Clients::from_env()?;
    tracing::debug!("Using backend {}", clients.transport().base_url());

    match command {
        Command::Todos => {
            let todos = clients.todo.list_todos().await?;
            if todos.is_empty() {
                println!("No todos");
            }
            for todo in &todos {
                print_todo(todo);
            }
        }
        Command::Add { title } => {
            let todo = clients.todo.create_todo(&title).await?;
            print_todo(&todo);
        }
        Command::SetCompleted { id, completed } => {
            let current = find_todo(&clients, &id).await?;
            let todo = clients.todo.update_todo(&id, &current.title, completed).await?;
            print_todo(&todo);
        }
        Command::Rename { id, title } => {
            let current = find_todo(&clients, &id).await?;
            let todo = clients.todo.update_todo(&id, &title, current.completed).await?;
            print_todo(&todo);
        }
        Command::Remove { id } => {
            clients.todo.delete_todo(&id).await?;
            println!("Deleted {}", id);
        }
        Command::Events => {
            let events = clients.event.list_events().await?;
            if events.is_empty() {
                println!("No events");
            }
            for event in &events {
                print_event(event);
            }
        }
        Command::CreateEvent {
            title,
            date,
            capacity,
            description,
        } => {
            let event = clients
                .event
                .create_event(&title, &description, &date, capacity)
                .await?;
            print_event(&event);
        }
        Command::Register {
            event_id,
            name,
            email,
        } => {
            let registration = clients
                .event
                .register_for_event(&event_id, &name, &email)
                .await?;
            print_registration(&registration);
        }
        Command::Registrations { event_id } => {
            let registrations = clients.event.get_event_registrations(&event_id).await?;
            if registrations.is_empty() {
                println!("No registrations");
            }
            for registration in &registrations {
                print_registration(registration);
            }
        }
        Command::Status | Command::Proxy { .. } | Command::Help | Command::Invalid { .. } => {}
    }

    Ok(())
}

// UpdateTodo replaces both fields, so the one not being changed is read first.
async fn find_todo(clients: &Clients, id: &str) -> Result<Todo, Box<dyn Error>> {
    clients
        .todo
        .list_todos()
        .await?
        .into_iter()
        .find(|todo| todo.id == id)
        .ok_or_else(|| format!("todo not found: {}", id).into())
}

fn print_todo(todo: &Todo) {
    let mark = if todo.completed { "x" } else { " " };
    println!("[{}] {}  {}  ({})", mark, todo.id, todo.title, todo.created_at);
}

fn print_event(event: &Event) {
    println!(
        "{}  {}  {}  {}/{}",
        event.id, event.date, event.title, event.registered_count, event.capacity
    );
    if !event.description.is_empty() {
        println!("    {}", event.description);
    }
}

fn print_registration(registration: &Registration) {
    println!(
        "{}  {} <{}>  event {}",
        registration.id, registration.name, registration.email, registration.event_id
    );
}
