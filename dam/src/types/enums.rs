use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DamError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }

    /// Any authenticated role may list and view.
    pub fn can_view(self) -> bool {
        true
    }

    pub fn can_upload(self) -> bool {
        matches!(self, Role::Admin | Role::Editor)
    }

    pub fn can_delete_assets(self) -> bool {
        self == Role::Admin
    }

    pub fn can_manage_users(self) -> bool {
        self == Role::Admin
    }

    pub fn can_view_activity(self) -> bool {
        self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DamError;

    /// Case-insensitive, whitespace-trimmed ("admin " -> Admin).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            other => Err(DamError::Validation(format!("invalid role: {other:?}"))),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// AssetKind
// ---------------------------------------------------------------------------

const MODEL_EXTENSIONS: &[&str] = &["glb", "gltf", "obj", "fbx", "stl", "dae", "3ds"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "webm", "mkv", "wmv"];
const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "xls", "xlsx", "ppt", "pptx", "csv",
];

/// Closed set of asset file kinds.
///
/// Serialized with the backend's short codes (`3D`, `IMG`, `VID`, `DOC`,
/// `OTH`). Unknown codes read back as [`AssetKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Video,
    Document,
    Model3d,
    Other,
}

/// How a front-end should present an asset of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    InlineImage,
    VideoPlayer,
    ModelViewer,
    DocumentLink,
    DownloadOnly,
}

impl AssetKind {
    /// Sniff the kind from a file name and optional MIME type.
    ///
    /// 3D extensions win over MIME, since browsers report `.glb` and friends
    /// inconsistently.
    pub fn sniff(file_name: &str, mime: Option<&str>) -> Self {
        let ext = extension(file_name);
        let mime = mime.map(str::to_ascii_lowercase).unwrap_or_default();

        if MODEL_EXTENSIONS.contains(&ext.as_str()) {
            AssetKind::Model3d
        } else if mime.starts_with("image/") || IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            AssetKind::Image
        } else if mime.starts_with("video/") || VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            AssetKind::Video
        } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            AssetKind::Document
        } else {
            AssetKind::Other
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            AssetKind::Model3d => "3D",
            AssetKind::Image => "IMG",
            AssetKind::Video => "VID",
            AssetKind::Document => "DOC",
            AssetKind::Other => "OTH",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "3D" | "MODEL" => AssetKind::Model3d,
            "IMG" | "IMAGE" => AssetKind::Image,
            "VID" | "VIDEO" => AssetKind::Video,
            "DOC" | "DOCUMENT" => AssetKind::Document,
            _ => AssetKind::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Model3d => "3D Model",
            AssetKind::Image => "Image",
            AssetKind::Video => "Video",
            AssetKind::Document => "Document",
            AssetKind::Other => "File",
        }
    }

    /// Category pre-filled on upload when the user leaves it blank.
    pub fn default_category(self) -> &'static str {
        match self {
            AssetKind::Model3d => "3D Models",
            AssetKind::Image => "Images",
            AssetKind::Video => "Videos",
            AssetKind::Document => "Documents",
            AssetKind::Other => "Other",
        }
    }

    pub fn preview(self) -> Preview {
        match self {
            AssetKind::Image => Preview::InlineImage,
            AssetKind::Video => Preview::VideoPlayer,
            AssetKind::Model3d => Preview::ModelViewer,
            AssetKind::Document => Preview::DocumentLink,
            AssetKind::Other => Preview::DownloadOnly,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AssetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for AssetKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(AssetKind::from_code(&code))
    }
}

fn extension(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}
