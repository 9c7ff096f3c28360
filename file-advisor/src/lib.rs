//! File-conversion advisor.
//!
//! Classifies an uploaded file by MIME type and extension and describes how
//! to convert it locally: a five-step command recipe for images, video,
//! audio, documents and spreadsheets, or a desktop tool recommendation for
//! archives, 3D models and office files. Commands are only ever described,
//! never run.

mod advice;
mod classify;
mod formats;
mod steps;

pub use advice::{build_advice, special_recommendation, unsupported_format_message};
pub use classify::{FileCategory, FileDescriptor, classify, split_name};
pub use formats::{FormatOption, common_formats, resolve_output_format};
pub use steps::{CommandStep, parse_command_steps};

use serde::{Deserialize, Serialize};

/// Metadata of an uploaded file as sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(rename = "size", default)]
    pub size_bytes: u64,
    #[serde(rename = "targetFormat", default, skip_serializing_if = "Option::is_none")]
    pub target_format: Option<String>,
}

impl FileInfo {
    pub fn descriptor(&self) -> FileDescriptor {
        classify(&self.name, &self.mime_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_info_wire_names() {
        let info: FileInfo = serde_json::from_value(serde_json::json!({
            "name": "clip.mov",
            "type": "video/quicktime",
            "size": 20_000_000u64,
            "targetFormat": "mp4"
        }))
        .unwrap();

        assert_eq!(info.mime_type, "video/quicktime");
        assert_eq!(info.size_bytes, 20_000_000);
        assert_eq!(info.target_format.as_deref(), Some("mp4"));
        assert_eq!(info.descriptor().category, FileCategory::Video);
    }

    #[test]
    fn optional_fields_default() {
        let info: FileInfo = serde_json::from_value(serde_json::json!({"name": "a.png"})).unwrap();
        assert_eq!(info.size_bytes, 0);
        assert!(info.target_format.is_none());
    }
}
