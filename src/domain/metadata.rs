// SPDX-License-Identifier: MPL-2.0
//! Metadata snapshots supplied by the storage/search backend.
//!
//! Both types mirror the JSON "describe" records served by the blob server.
//! They are immutable once parsed; a new reference always comes with a new
//! snapshot.

use super::reference::ContentReference;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// What kind of object a reference resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    File,
    Directory,
    /// Any other schema type (`permanode`, `claim`, `bytes`, ...).
    Other(String),
    /// The snapshot carried no type at all.
    Unknown,
}

impl ContentKind {
    /// Maps the wire `camliType` field to a kind.
    #[must_use]
    pub fn from_type_name(name: Option<&str>) -> Self {
        match name {
            Some("file") => ContentKind::File,
            Some("directory") => ContentKind::Directory,
            Some(other) => ContentKind::Other(other.to_string()),
            None => ContentKind::Unknown,
        }
    }

    /// Returns true for kinds that carry filesystem-like attributes.
    #[must_use]
    pub fn is_fileish(&self) -> bool {
        matches!(self, ContentKind::File | ContentKind::Directory)
    }
}

/// File attributes of a `file` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Attributes of a `directory` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirInfo {
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Natural pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Snapshot describing the object a reference resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata {
    pub blob_ref: ContentReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    camli_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<DirInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageDimensions>,
}

impl ResolvedMetadata {
    /// Creates an untyped snapshot for `reference`.
    #[must_use]
    pub fn new(reference: ContentReference) -> Self {
        Self {
            blob_ref: reference,
            camli_type: None,
            file: None,
            dir: None,
            image: None,
        }
    }

    /// Marks the snapshot as a file with the given name and size.
    #[must_use]
    pub fn with_file(mut self, file_name: impl Into<String>, size: u64) -> Self {
        self.camli_type = Some("file".to_string());
        self.file = Some(FileInfo {
            file_name: Some(file_name.into()),
            size: Some(size),
            mime_type: None,
        });
        self
    }

    /// Marks the snapshot as a directory with the given name.
    #[must_use]
    pub fn with_directory(mut self, file_name: impl Into<String>) -> Self {
        self.camli_type = Some("directory".to_string());
        self.dir = Some(DirInfo {
            file_name: Some(file_name.into()),
        });
        self
    }

    /// Attaches natural image dimensions.
    #[must_use]
    pub fn with_image(mut self, width: u32, height: u32) -> Self {
        self.image = Some(ImageDimensions { width, height });
        self
    }

    /// Overrides the raw schema type.
    #[must_use]
    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.camli_type = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        ContentKind::from_type_name(self.camli_type.as_deref())
    }

    /// Best display name for the object, regardless of its kind.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        match self.kind() {
            ContentKind::Directory => self.dir.as_ref().and_then(|d| d.file_name.as_deref()),
            _ => self.file.as_ref().and_then(|f| f.file_name.as_deref()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Attribute map of a permanode, every attribute being multi-valued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermanodeAttributes {
    #[serde(default)]
    pub attr: BTreeMap<String, Vec<String>>,
}

/// User-assigned attributes of the named object pointing at the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermanodeMetadata {
    pub blob_ref: ContentReference,
    #[serde(default)]
    pub permanode: PermanodeAttributes,
}

impl PermanodeMetadata {
    #[must_use]
    pub fn new(reference: ContentReference) -> Self {
        Self {
            blob_ref: reference,
            permanode: PermanodeAttributes::default(),
        }
    }

    /// Appends a value to a (possibly new) attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.permanode
            .attr
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// First value of `name`, treating an empty string as absent.
    #[must_use]
    pub fn single_attr(&self, name: &str) -> Option<&str> {
        self.permanode
            .attr
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ContentReference {
        ContentReference::parse("sha1-abc").unwrap()
    }

    #[test]
    fn parses_describe_record_for_image_file() {
        let json = r#"{
            "blobRef": "sha1-abc",
            "camliType": "file",
            "file": { "fileName": "cat.jpg", "size": 1234, "mimeType": "image/jpeg" },
            "image": { "width": 2000, "height": 1500 },
            "someFutureField": true
        }"#;
        let meta = ResolvedMetadata::from_json(json).unwrap();
        assert_eq!(meta.kind(), ContentKind::File);
        assert_eq!(meta.file_name(), Some("cat.jpg"));
        assert_eq!(meta.file.as_ref().and_then(|f| f.size), Some(1234));
        assert_eq!(
            meta.image,
            Some(ImageDimensions {
                width: 2000,
                height: 1500
            })
        );
    }

    #[test]
    fn missing_sections_are_none() {
        let meta = ResolvedMetadata::from_json(r#"{ "blobRef": "sha1-abc" }"#).unwrap();
        assert_eq!(meta.kind(), ContentKind::Unknown);
        assert!(meta.file.is_none());
        assert!(meta.image.is_none());
        assert!(meta.file_name().is_none());
    }

    #[test]
    fn unknown_type_maps_to_other() {
        let meta = ResolvedMetadata::new(reference()).with_type_name("permanode");
        assert_eq!(meta.kind(), ContentKind::Other("permanode".into()));
        assert!(!meta.kind().is_fileish());
    }

    #[test]
    fn directory_name_comes_from_dir_section() {
        let meta = ResolvedMetadata::new(reference()).with_directory("photos");
        assert_eq!(meta.kind(), ContentKind::Directory);
        assert_eq!(meta.file_name(), Some("photos"));
    }

    #[test]
    fn empty_blob_ref_is_rejected() {
        assert!(ResolvedMetadata::from_json(r#"{ "blobRef": "" }"#).is_err());
    }

    #[test]
    fn permanode_single_attr_takes_first_value() {
        let json = r#"{
            "blobRef": "sha1-perm",
            "permanode": { "attr": { "title": ["Holiday", "Older title"] } }
        }"#;
        let perm = PermanodeMetadata::from_json(json).unwrap();
        assert_eq!(perm.single_attr("title"), Some("Holiday"));
        assert_eq!(perm.single_attr("description"), None);
    }

    #[test]
    fn permanode_empty_value_counts_as_absent() {
        let perm = PermanodeMetadata::new(reference()).with_attr("title", "");
        assert_eq!(perm.single_attr("title"), None);
    }
}
