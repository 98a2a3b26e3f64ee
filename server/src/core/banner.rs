//! Startup banner and URL display

use super::config::{DatabaseLocation, is_all_interfaces};
use super::constants::APP_NAME;

/// Print the startup banner with URLs
pub fn print_banner(
    host: &str,
    port: u16,
    environment: &str,
    database: &DatabaseLocation,
    data_dir: &str,
    worker_queue: Option<&str>,
) {
    // Use localhost for display when binding to all interfaces
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };

    // Label width: "Workflow worker:" padded for alignment
    const W: usize = 18;

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{} ({})\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        environment
    );
    println!();
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m http://{}:{}/api/v1",
        "API:", display_host, port
    );
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m http://{}:{}/api/openapi.json",
        "OpenAPI:", display_host, port
    );

    let database = match database {
        DatabaseLocation::DataDir => format!("{}/sqlite", data_dir),
        DatabaseLocation::File(path) => path.display().to_string(),
        DatabaseLocation::Memory => "in-memory".to_string(),
    };
    println!(
        "  \x1b[90m➜  {:<W$} {}\x1b[0m",
        "Database:", database
    );

    match worker_queue {
        Some(queue) => println!(
            "  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
            "Workflow worker:", queue
        ),
        None => println!("  \x1b[90m➜  {:<W$} disabled\x1b[0m", "Workflow worker:"),
    }
    println!();
}
