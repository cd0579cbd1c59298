//! CSV export of a full, unpaged result set.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{DamError, Result};
use crate::query::FilterSet;
use crate::rest::DamHttpClient;
use crate::types::{ActivityLog, Asset, Resource, User};

/// Records that can be written as one CSV row under a fixed header.
pub trait CsvRecord {
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

impl CsvRecord for ActivityLog {
    const HEADERS: &'static [&'static str] =
        &["Timestamp", "User", "Action", "Description", "IP Address"];

    fn row(&self) -> Vec<String> {
        vec![
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            self.username.clone(),
            self.action_type.clone(),
            self.description.clone().unwrap_or_default(),
            self.ip_address.clone().unwrap_or_else(|| "N/A".to_string()),
        ]
    }
}

impl CsvRecord for Asset {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Name",
        "Type",
        "Category",
        "Size (bytes)",
        "Public",
        "Tags",
        "Created",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.file_type.label().to_string(),
            self.category.clone().unwrap_or_default(),
            self.file_size.map(|s| s.to_string()).unwrap_or_default(),
            self.is_public
                .map(|p| (if p { "yes" } else { "no" }).to_string())
                .unwrap_or_default(),
            self.tags.join(", "),
            self.created_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_default(),
        ]
    }
}

impl CsvRecord for User {
    const HEADERS: &'static [&'static str] = &["ID", "Username", "Email", "Role"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            self.email.clone(),
            self.role.to_string(),
        ]
    }
}

/// Render records as CSV with every field quoted.
pub fn to_csv<T: CsvRecord>(items: &[T]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(T::HEADERS)?;
    for item in items {
        wtr.write_record(item.row())?;
    }
    wtr.into_inner().map_err(|e| DamError::Io(e.into_error()))
}

/// `<name>-YYYY-MM-DD.csv`
pub fn file_name(name: &str, date: NaiveDate) -> String {
    format!("{name}-{}.csv", date.format("%Y-%m-%d"))
}

/// A rendered export, ready to be saved.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

impl ExportFile {
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Result of an export attempt, with failures already turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing matched the filters; no file was produced.
    Empty,
    Failed(String),
}

impl ExportOutcome {
    /// Notice to show the user.
    pub fn message(&self) -> String {
        match self {
            ExportOutcome::Written { path, rows } => {
                format!("exported {rows} rows to {}", path.display())
            }
            ExportOutcome::Empty => "No data to export".to_string(),
            ExportOutcome::Failed(msg) => format!("Export failed: {msg}"),
        }
    }
}

/// Fetches every matching record in one request and renders it as CSV.
#[derive(Debug, Clone)]
pub struct Exporter {
    page_size: u32,
}

impl Exporter {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// `Ok(None)` when nothing matched.
    pub async fn fetch_file<T: Resource + CsvRecord>(
        &self,
        client: &DamHttpClient,
        filters: &FilterSet,
        date: NaiveDate,
    ) -> Result<Option<ExportFile>> {
        let listing = client.list::<T>(filters, None, self.page_size).await?;
        if listing.is_empty() {
            return Ok(None);
        }
        let rows = listing.items.len();
        Ok(Some(ExportFile {
            file_name: file_name(T::NAME, date),
            bytes: to_csv(&listing.items)?,
            rows,
        }))
    }

    /// Export into `dir`, named with today's UTC date.
    pub async fn export_to_dir<T: Resource + CsvRecord>(
        &self,
        client: &DamHttpClient,
        filters: &FilterSet,
        dir: &Path,
    ) -> ExportOutcome {
        let today = chrono::Utc::now().date_naive();
        let file = match self.fetch_file::<T>(client, filters, today).await {
            Ok(Some(file)) => file,
            Ok(None) => {
                info!(resource = T::NAME, "nothing to export");
                return ExportOutcome::Empty;
            }
            Err(e) => {
                warn!(resource = T::NAME, error = %e, "export fetch failed");
                return ExportOutcome::Failed(e.user_message());
            }
        };
        match file.write_to(dir) {
            Ok(path) => {
                info!(resource = T::NAME, rows = file.rows, path = %path.display(), "export written");
                ExportOutcome::Written {
                    path,
                    rows: file.rows,
                }
            }
            Err(e) => ExportOutcome::Failed(e.to_string()),
        }
    }
}
