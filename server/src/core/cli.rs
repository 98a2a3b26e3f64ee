use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_DATABASE_URL, ENV_ENVIRONMENT, ENV_HOST, ENV_PORT};

#[derive(Parser)]
#[command(name = "aipm")]
#[command(version, about = "Project and requirements tracking service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Database connection string (sqlite://path or sqlite::memory:)
    #[arg(long, global = true, env = ENV_DATABASE_URL)]
    pub database_url: Option<String>,

    /// Deployment environment name
    #[arg(long, global = true, env = ENV_ENVIRONMENT)]
    pub environment: Option<String>,

    /// Do not start the in-process workflow worker
    #[arg(long, global = true)]
    pub no_worker: bool,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Run a workflow once and print its result
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum WorkflowCommands {
    /// Execute the echo workflow
    Echo {
        /// Message to echo back
        message: String,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub database_url: Option<String>,
    pub environment: Option<String>,
    pub no_worker: bool,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        config: cli.config,
        database_url: cli.database_url,
        environment: cli.environment,
        no_worker: cli.no_worker,
    };
    (config, cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workflow_echo() {
        let cli = Cli::parse_from(["aipm", "workflow", "echo", "hello world"]);
        match cli.command {
            Some(Commands::Workflow {
                command: WorkflowCommands::Echo { message },
            }) => assert_eq!(message, "hello world"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["aipm", "start", "--port", "9001", "--no-worker"]);
        assert!(matches!(cli.command, Some(Commands::Start)));
        assert_eq!(cli.port, Some(9001));
        assert!(cli.no_worker);
    }
}
