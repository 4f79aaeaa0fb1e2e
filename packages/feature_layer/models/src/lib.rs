#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Response types for `ArcGIS` feature layer endpoints.
//!
//! These mirror the service's JSON exactly (camelCase on the wire) and are
//! only ever produced by deserializing a response.

use serde::{Deserialize, Serialize};

/// Metadata for a single file attached to a feature (an `attachmentInfo`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInfo {
    /// Attachment id, unique within the layer.
    pub id: i64,
    /// MIME type (e.g. `"image/png"`).
    pub content_type: String,
    /// Size in bytes.
    pub size: u64,
    /// File name as uploaded.
    pub name: String,
}

/// Body of `GET <layer>/<featureId>/attachments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAttachmentsResponse {
    /// Attachments of the feature, in service order. Empty when the
    /// feature has none.
    pub attachment_infos: Vec<AttachmentInfo>,
}
