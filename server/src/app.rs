use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands, WorkflowCommands};
use crate::core::config::AppConfig;
use crate::core::shutdown::ShutdownService;
use crate::core::storage::AppStorage;
use crate::core::telemetry;
use crate::data::TransactionalService;
use crate::domain::{WorkflowClient, WorkflowWorker};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub storage: AppStorage,
    pub database: Arc<TransactionalService>,
    pub workflow: Option<WorkflowClient>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        telemetry::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Workflow {
                command: WorkflowCommands::Echo { message },
            }) => Self::run_echo(&cli_config, message).await,
            Some(Commands::Start) | None => {
                let app = Self::init(&cli_config).await?;
                Self::start_server(app).await
            }
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let storage = AppStorage::init().await?;
        let database = Arc::new(TransactionalService::init(&config.database, &storage).await?);
        let shutdown = ShutdownService::new(database.clone());

        Ok(Self {
            shutdown,
            config,
            storage,
            database,
            workflow: None,
        })
    }

    /// Run the echo workflow once against a private worker and print the result
    async fn run_echo(cli: &CliConfig, message: String) -> Result<()> {
        let config = AppConfig::load(cli)?;
        let (worker, client) = WorkflowWorker::new(config.worker.clone());
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        let handle = worker.start(shutdown_rx);

        let result = client.echo(message).await;

        let _ = shutdown_tx.send(true);
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "Workflow worker task failed");
        }

        println!("Workflow result: {}", result?);
        Ok(())
    }

    async fn start_server(mut app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        app.start_background_tasks().await;

        tracing::info!(
            environment = %app.config.environment,
            host = %app.config.server.host,
            port = app.config.server.port,
            "Starting server"
        );

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            &app.config.environment,
            &app.config.database,
            &app.storage.data_dir().display().to_string(),
            app.workflow
                .as_ref()
                .map(|_| app.config.worker.task_queue.as_str()),
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }

    /// Start the WAL checkpointer and, when enabled, the workflow worker
    pub async fn start_background_tasks(&mut self) {
        self.shutdown
            .register(
                self.database
                    .start_checkpoint_task(self.shutdown.subscribe()),
            )
            .await;

        if self.config.worker.enabled {
            let (worker, client) = WorkflowWorker::new(self.config.worker.clone());
            self.shutdown
                .register(worker.start(self.shutdown.subscribe()))
                .await;
            tracing::debug!(
                task_queue = %self.config.worker.task_queue,
                namespace = %self.config.worker.namespace,
                "Workflow worker started"
            );
            self.workflow = Some(client);
        } else {
            tracing::debug!("Workflow worker disabled by config");
        }
    }
}
