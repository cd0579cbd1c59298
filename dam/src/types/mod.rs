pub mod activity;
pub mod asset;
pub mod enums;
pub mod page;
pub mod user;

use serde::de::DeserializeOwned;

pub use activity::ActivityLog;
pub use asset::{Asset, NewAsset, MAX_UPLOAD_BYTES};
pub use enums::{AssetKind, Preview, Role};
pub use page::{normalize, total_pages, Listing, ResultPage};
pub use user::{LoginResponse, NewUser, User};

/// A record type served by one of the backend's list endpoints.
pub trait Resource: DeserializeOwned {
    /// List endpoint path, with trailing slash.
    const PATH: &'static str;
    /// Short plural name used in logs and export file names.
    const NAME: &'static str;
}

impl Resource for Asset {
    const PATH: &'static str = crate::rest::endpoints::ASSETS_PATH;
    const NAME: &'static str = "assets";
}

impl Resource for User {
    const PATH: &'static str = crate::rest::endpoints::USERS_PATH;
    const NAME: &'static str = "users";
}

impl Resource for ActivityLog {
    const PATH: &'static str = crate::rest::endpoints::ACTIVITY_LOGS_PATH;
    const NAME: &'static str = "activity-logs";
}
