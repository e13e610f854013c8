use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::users::user::{Designation, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Report,
    Certificate,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Report => "report",
            FileKind::Certificate => "certificate",
        }
    }
}

impl std::str::FromStr for FileKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(FileKind::Report),
            "certificate" => Ok(FileKind::Certificate),
            other => anyhow::bail!("unknown file type: {other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Signature {
    pub name: String,
    pub title: String,
}

/// Inline image payload, base64 data with an optional MIME type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbeddedImage {
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Structured record extracted from an uploaded certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CertificateContent {
    /// Extracted field name to value, in stable order.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbeddedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// Body of a stored file. Reports carry sanitized HTML, certificates a
/// structured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FileContent {
    Report(String),
    Certificate(CertificateContent),
}

impl FileContent {
    pub fn kind(&self) -> FileKind {
        match self {
            FileContent::Report(_) => FileKind::Report,
            FileContent::Certificate(_) => FileKind::Certificate,
        }
    }
}

/// A stored report or certificate. Owner identity fields are snapshots
/// taken at creation time and stay as-is even if the owner record
/// changes later.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub user_role: Role,
    pub user_designation: Option<Designation>,
    pub title: String,
    pub kind: FileKind,
    pub category: Option<String>,
    pub signature: Option<Signature>,
    pub content: FileContent,
    pub report_date: Option<String>,
    pub images: Option<Vec<EmbeddedImage>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub downloads_count: i64,
}
