use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use propcrm::cli::{
    AdminCommands, WorkspaceCommands, run_init, run_workspace_create, run_workspace_list,
    run_workspace_prefill,
};
use propcrm::config::{ProvisionConfig, ServerConfig};
use propcrm::provision::Provisioner;
use propcrm::server::{AppState, create_router};
use propcrm::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "propcrm")]
#[command(about = "Workspace provisioning for the property CRM", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Manage workspaces
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },

    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8080")]
        port: u16,

        /// Data directory for the catalog and workspace databases
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("propcrm=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init {
                data_dir,
                template_name,
            } => {
                run_init(data_dir, template_name)?;
            }
        },
        Commands::Workspace { command } => match command {
            WorkspaceCommands::Create {
                name,
                data_dir,
                json,
            } => run_workspace_create(data_dir, name, json)?,
            WorkspaceCommands::List { data_dir, json } => run_workspace_list(data_dir, json)?,
            WorkspaceCommands::Prefill { id, data_dir, json } => {
                run_workspace_prefill(data_dir, id, json)?;
            }
        },
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
            };

            let token_file = config.token_path();
            if !token_file.exists() {
                bail!(
                    "Server not initialized. Run 'propcrm admin init' first to create the database and admin token."
                );
            }

            let store = Arc::new(SqliteStore::new(config.db_path())?);
            if !store.has_admin_token()? {
                bail!(
                    "Server not initialized. Run 'propcrm admin init' first to create the database and admin token."
                );
            }

            let provision_config = ProvisionConfig::load(Path::new(&config.data_dir))?;
            info!(
                template = %provision_config.template_workspace_id,
                "Admin token available at {}",
                token_file.display()
            );

            let store: Arc<dyn Store> = store;
            let state = Arc::new(AppState {
                provisioner: Provisioner::new(Arc::clone(&store), provision_config),
                store,
            });

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
