//! Scripted console demo of the todo store.
//!
//! Plays a short session against in-memory storage and prints the rendered
//! list after each step. Configure with `TODO_STORAGE_KEY`,
//! `TODO_NOTIFICATION_MS` and `TODO_LOG_LEVEL`.

use composable_todo::{RandomColors, RowAction, TodoConfig, TodoEnvironment, TodoStore};
use composable_todo_core::environment::Notifier;
use composable_todo_testing::InMemoryStorage;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Prints notifications to stdout
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&self, message: &str) {
        println!("  (!) {message}");
    }

    fn dismiss(&self) {
        println!("  (notification dismissed)");
    }
}

fn print_list(title: &str, todos: &TodoStore) {
    println!("\n{title}");
    for line in todos.view().to_string().lines() {
        println!("  {line}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TodoConfig::from_env();

    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    composable_todo_runtime::telemetry::describe_metrics();

    println!("=== Todo Example ===");

    let storage = Arc::new(InMemoryStorage::new());
    let env = TodoEnvironment::new(
        storage.clone(),
        Arc::new(ConsoleNotifier),
        Arc::new(RandomColors),
    )
    .with_config(config.clone());
    let mut todos = TodoStore::open(env);

    print_list("Starting list:", &todos);

    println!("\nCreating todos...");
    todos.submit("Buy milk")?;
    todos.submit("Write documentation")?;
    todos.submit("Deploy to production")?;
    print_list("Todos created:", &todos);

    println!("\nSubmitting a duplicate and an empty todo...");
    if let Err(error) = todos.submit("BUY MILK") {
        println!("  rejected: {error}");
    }
    if let Err(error) = todos.submit("   ") {
        println!("  rejected: {error}");
    }

    println!("\nChecking 'Buy milk'...");
    todos.dispatch("check".parse::<RowAction>()?, 0)?;

    println!("\nEditing 'Write documentation'...");
    if let Some(prefill) = todos.dispatch(RowAction::Edit, 1)? {
        println!("  input pre-filled with {prefill:?}");
    }
    todos.submit("Write the user guide")?;
    print_list("Current status:", &todos);

    println!("\nDeleting 'Deploy to production'...");
    todos.dispatch(RowAction::Delete, 2)?;
    print_list("Final todos:", &todos);

    println!("\nWaiting for the notification to expire...");
    std::thread::sleep(config.notification_duration);
    todos.tick()?;

    println!(
        "\nPersisted under {:?}: {}",
        config.storage_key,
        storage.get(&config.storage_key).unwrap_or_default()
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
