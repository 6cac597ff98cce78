//! Image metadata record
//!
//! The record type the surrounding tooling stores for each analyzed image.
//! The file name serves as the document identifier, so it must not contain
//! path separators.

use crate::domain::record::DocumentRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata captured for one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    /// Document identifier; the image file name
    pub id: String,

    /// Blob storage location once uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_uri: Option<String>,

    /// Full local path the image was read from
    pub local_file_path: String,

    /// File name component of the local path
    pub file_name: String,

    /// Caption produced by image analysis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Tags produced by image analysis
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ImageMetadata {
    /// Builds metadata from a local image path, using the file name as id
    // TODO: file names collide across directories; callers that ingest more
    // than one tree need to disambiguate ids themselves.
    pub fn from_path(image_file_path: impl AsRef<Path>) -> Self {
        let path = image_file_path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            id: file_name.clone(),
            blob_uri: None,
            local_file_path: path.to_string_lossy().into_owned(),
            file_name,
            caption: None,
            tags: Vec::new(),
        }
    }

    /// Stores analysis output into the metadata
    pub fn add_insights(&mut self, caption: Option<String>, tags: Vec<String>) {
        self.caption = caption;
        self.tags = tags;
    }
}

impl DocumentRecord for ImageMetadata {
    fn document_id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for ImageMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{json}"),
            Err(_) => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_uses_file_name_as_id() {
        let metadata = ImageMetadata::from_path("/photos/cats/a.jpg");
        assert_eq!(metadata.id, "a.jpg");
        assert_eq!(metadata.file_name, "a.jpg");
        assert_eq!(metadata.local_file_path, "/photos/cats/a.jpg");
        assert_eq!(metadata.document_id(), "a.jpg");
    }

    #[test]
    fn test_add_insights() {
        let mut metadata = ImageMetadata::from_path("a.jpg");
        metadata.add_insights(
            Some("a cat on a couch".to_string()),
            vec!["cat".to_string(), "couch".to_string()],
        );

        assert_eq!(metadata.caption.as_deref(), Some("a cat on a couch"));
        assert_eq!(metadata.tags, vec!["cat", "couch"]);
    }

    #[test]
    fn test_serializes_id_field_lowercase() {
        let metadata = ImageMetadata::from_path("a.jpg");
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["id"], "a.jpg");
        assert_eq!(json["fileName"], "a.jpg");
    }

    #[test]
    fn test_display_is_json() {
        let metadata = ImageMetadata::from_path("a.jpg");
        let rendered = metadata.to_string();
        assert!(rendered.contains("\"id\":\"a.jpg\""));
    }
}
