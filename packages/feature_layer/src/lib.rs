#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed operations against `ArcGIS` feature layers
//! (`.../FeatureServer/<layerId>`).
//!
//! Each operation builds its endpoint URL from the layer URL and delegates
//! to an [`arcgis_rest_request::Dispatcher`]. Transport, authentication
//! parameters and error detection all live in the request layer.

pub mod get_attachments;

pub use arcgis_rest_feature_layer_models::{AttachmentInfo, GetAttachmentsResponse};
pub use get_attachments::{GetAttachmentsOptions, attachments_url, get_attachments};
