//! File classification by MIME type and extension.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad file family used to pick a conversion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Document,
    Spreadsheet,
    Presentation,
    Archive,
    #[serde(rename = "3d")]
    ThreeD,
    Unknown,
}

impl FileCategory {
    /// Document, spreadsheet and presentation files.
    pub fn is_office(self) -> bool {
        matches!(
            self,
            FileCategory::Document | FileCategory::Spreadsheet | FileCategory::Presentation
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Video => "video",
            FileCategory::Audio => "audio",
            FileCategory::Document => "document",
            FileCategory::Spreadsheet => "spreadsheet",
            FileCategory::Presentation => "presentation",
            FileCategory::Archive => "archive",
            FileCategory::ThreeD => "3d",
            FileCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived attributes of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Lowercased text after the last `.`; empty if the name has no dot.
    pub extension: String,
    /// Text before the last `.`; the whole name if there is no dot.
    pub base_name: String,
    pub category: FileCategory,
}

const IMAGE_EXT: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg", "tiff"];
const VIDEO_EXT: &[&str] = &["mp4", "avi", "mov", "mkv", "webm", "flv"];
const AUDIO_EXT: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a", "aac"];
const DOCUMENT_EXT: &[&str] = &["pdf", "doc", "docx", "txt", "rtf", "odt"];
const SPREADSHEET_EXT: &[&str] = &["xls", "xlsx", "csv", "ods"];
const PRESENTATION_EXT: &[&str] = &["ppt", "pptx", "odp"];
const ARCHIVE_EXT: &[&str] = &["zip", "rar", "7z", "tar", "gz", "bz2"];
const MODEL_3D_EXT: &[&str] = &["blend", "obj", "fbx", "stl", "3ds", "dae", "glb", "gltf"];

/// Splits a file name into `(base_name, lowercased extension)`.
pub fn split_name(file_name: &str) -> (String, String) {
    match file_name.rsplit_once('.') {
        Some((base, ext)) => (base.to_string(), ext.to_lowercase()),
        None => (file_name.to_string(), String::new()),
    }
}

/// Classifies a file. The first matching family wins, in the order
/// image, video, audio, document, spreadsheet, presentation, archive, 3d.
pub fn classify(file_name: &str, mime_type: &str) -> FileDescriptor {
    let (base_name, extension) = split_name(file_name);
    let ext = extension.as_str();
    let in_list = |list: &[&str]| list.contains(&ext);

    let category = if mime_type.starts_with("image/") || in_list(IMAGE_EXT) {
        FileCategory::Image
    } else if mime_type.starts_with("video/") || in_list(VIDEO_EXT) {
        FileCategory::Video
    } else if mime_type.starts_with("audio/") || in_list(AUDIO_EXT) {
        FileCategory::Audio
    } else if in_list(DOCUMENT_EXT) || mime_type.contains("document") {
        FileCategory::Document
    } else if in_list(SPREADSHEET_EXT) || mime_type.contains("spreadsheet") {
        FileCategory::Spreadsheet
    } else if in_list(PRESENTATION_EXT) || mime_type.contains("presentation") {
        FileCategory::Presentation
    } else if in_list(ARCHIVE_EXT) {
        FileCategory::Archive
    } else if in_list(MODEL_3D_EXT) {
        FileCategory::ThreeD
    } else {
        FileCategory::Unknown
    };

    FileDescriptor {
        extension,
        base_name,
        category,
    }
}
