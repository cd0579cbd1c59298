use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line front-end for the digital asset manager.
#[derive(Parser, Debug)]
#[command(name = "damctl", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Backend base URL
    #[arg(long, env = "DAM_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Auth token sent as `Authorization: Token <token>`
    #[arg(long, env = "DAM_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Role of the account behind the token (Admin, Editor, Viewer)
    #[arg(long, env = "DAM_ROLE", global = true)]
    pub role: Option<String>,

    /// Output JSON instead of TSV
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check credentials and print the account's role
    Login(LoginArgs),

    /// Browse, upload and delete assets
    #[command(subcommand)]
    Assets(AssetsCommand),

    /// Administer users
    #[command(subcommand)]
    Users(UsersCommand),

    /// View and export the activity log
    #[command(subcommand)]
    Logs(LogsCommand),
}

#[derive(Parser, Debug)]
pub struct LoginArgs {
    pub username: String,
    pub password: String,
}

/// Client-side paging and search over the loaded list.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Page to show (clamped to the available range)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value = "10")]
    pub page_size: usize,

    /// Narrow the loaded rows by a case-insensitive substring
    #[arg(long)]
    pub grep: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AssetsCommand {
    /// List assets
    List {
        #[command(flatten)]
        filters: AssetFilterArgs,
        #[command(flatten)]
        paging: PageArgs,
    },

    /// Upload a file as a new asset
    Upload(UploadArgs),

    /// Delete an asset (Admin)
    Delete { id: u64 },

    /// Export matching assets to CSV
    Export {
        #[command(flatten)]
        filters: AssetFilterArgs,
        /// Directory to write the file into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct AssetFilterArgs {
    /// Free-text search
    #[arg(long, default_value = "")]
    pub search: String,

    /// Category (e.g. Images, Videos, "3D Models")
    #[arg(long, default_value = "")]
    pub category: String,
}

#[derive(Parser, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub path: PathBuf,

    /// Asset name (defaults to the file name without extension)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Category (defaults from the detected file kind)
    #[arg(long, default_value = "")]
    pub category: String,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,

    #[arg(long, default_value = "")]
    pub keywords: String,

    /// Hide the asset from other users
    #[arg(long)]
    pub private: bool,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users
    List {
        /// Free-text search sent to the backend
        #[arg(long, default_value = "")]
        search: String,
        #[command(flatten)]
        paging: PageArgs,
    },

    /// Create a user
    Create {
        username: String,
        email: String,
        password: String,
        #[arg(long, default_value = "Viewer")]
        role: String,
    },

    /// Change a user's role
    SetRole { id: u64, role: String },

    /// Delete a user
    Delete { id: u64 },

    /// Export all users to CSV
    Export {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum LogsCommand {
    /// List activity log entries
    List {
        #[command(flatten)]
        filters: LogFilterArgs,
        #[command(flatten)]
        paging: PageArgs,
        /// Print per-action counts instead of rows
        #[arg(long)]
        stats: bool,
    },

    /// Export matching log entries to CSV
    Export {
        #[command(flatten)]
        filters: LogFilterArgs,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct LogFilterArgs {
    /// Username or description
    #[arg(long, default_value = "")]
    pub search: String,

    /// Action type (login, logout, upload, update, delete, view)
    #[arg(long, default_value = "")]
    pub action: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub from: String,

    /// End date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub to: String,
}
