use clap::Subcommand;

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Initialize the server (create database, admin token and template workspace)
    Init {
        /// Data directory for the catalog and workspace databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Display name of the template workspace
        #[arg(long, default_value = "Template")]
        template_name: String,
    },
}

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// Create a workspace and prefill it from the template
    Create {
        /// Display name of the new workspace
        name: String,

        /// Data directory for the catalog and workspace databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List workspaces
    List {
        /// Data directory for the catalog and workspace databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prefill an existing workspace from the template
    Prefill {
        /// Workspace ID
        id: String,

        /// Data directory for the catalog and workspace databases
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
