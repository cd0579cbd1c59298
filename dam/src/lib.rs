pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod pager;
pub mod query;
pub mod rest;
pub mod session;
pub mod stats;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

// Client + session
pub use client::Dam;
pub use config::DamConfig;
pub use error::{DamError, Result};
pub use session::Session;

// REST client
pub use rest::DamHttpClient;

// List core
pub use controller::{FetchTicket, ListController, LoadState, Searchable};
pub use pager::{PageMarker, Pager};
pub use query::FilterSet;

// Export
pub use export::{CsvRecord, ExportFile, ExportOutcome, Exporter};

// Records
pub use types::{
    ActivityLog, Asset, AssetKind, Listing, LoginResponse, NewAsset, NewUser, Preview, Resource,
    ResultPage, Role, User,
};

// Statistics
pub use stats::action_counts;
