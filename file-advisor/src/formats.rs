//! Output format resolution and the per-family target format menus.

use serde::Serialize;

use crate::classify::{FileCategory, classify};

/// Source extensions never offered a conversion, whatever the target.
const BLOCKED_EXTENSIONS: &[&str] = &["exe", "dll", "sys", "bin", "dat", "db"];

/// Picks the format a file should be converted to.
///
/// A non-empty `requested` format is honored unless it equals the source
/// extension (case-insensitive) or the source is a blocked binary type.
/// Without a request, each convertible family has a default that flips to
/// an alternative when the source already has the default extension.
pub fn resolve_output_format(
    extension: &str,
    requested: Option<&str>,
    category: FileCategory,
) -> Option<String> {
    if let Some(target) = requested.filter(|t| !t.is_empty()) {
        if extension.eq_ignore_ascii_case(target) || BLOCKED_EXTENSIONS.contains(&extension) {
            return None;
        }
        return Some(target.to_string());
    }

    let (default, alternative) = match category {
        FileCategory::Image => ("png", "jpg"),
        FileCategory::Video => ("mp4", "mkv"),
        FileCategory::Audio => ("mp3", "wav"),
        FileCategory::Document => ("pdf", "docx"),
        FileCategory::Spreadsheet => ("csv", "xlsx"),
        _ => return None,
    };
    let chosen = if extension == default { alternative } else { default };
    Some(chosen.to_string())
}

/// One entry of a target format menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> FormatOption {
    FormatOption { value, label }
}

const IMAGE_TARGETS: &[FormatOption] = &[
    opt("jpg", "JPEG (.jpg)"),
    opt("png", "PNG (.png)"),
    opt("webp", "WebP (.webp)"),
    opt("gif", "GIF (.gif)"),
    opt("bmp", "BMP (.bmp)"),
    opt("tiff", "TIFF (.tiff)"),
];

const VIDEO_TARGETS: &[FormatOption] = &[
    opt("mp4", "MP4 (.mp4)"),
    opt("webm", "WebM (.webm)"),
    opt("avi", "AVI (.avi)"),
    opt("mov", "QuickTime (.mov)"),
    opt("mkv", "Matroska (.mkv)"),
    opt("gif", "Animated GIF (.gif)"),
];

const AUDIO_TARGETS: &[FormatOption] = &[
    opt("mp3", "MP3 (.mp3)"),
    opt("wav", "WAV (.wav)"),
    opt("ogg", "OGG (.ogg)"),
    opt("flac", "FLAC (.flac)"),
    opt("m4a", "M4A (.m4a)"),
    opt("aac", "AAC (.aac)"),
];

const DOCUMENT_TARGETS: &[FormatOption] = &[
    opt("pdf", "PDF (.pdf)"),
    opt("docx", "Word (.docx)"),
    opt("txt", "Text (.txt)"),
    opt("html", "HTML (.html)"),
    opt("md", "Markdown (.md)"),
];

const SPREADSHEET_TARGETS: &[FormatOption] = &[
    opt("xlsx", "Excel (.xlsx)"),
    opt("csv", "CSV (.csv)"),
    opt("json", "JSON (.json)"),
    opt("xml", "XML (.xml)"),
];

const PRESENTATION_TARGETS: &[FormatOption] = &[
    opt("pptx", "PowerPoint (.pptx)"),
    opt("pdf", "PDF (.pdf)"),
    opt("html", "HTML (.html)"),
];

/// Target formats a client may offer for a file, minus the source format.
///
/// `name` may be empty; the MIME subtype then stands in for the extension.
/// Archives, 3D models and unknown files get no options.
pub fn common_formats(mime_type: &str, name: &str) -> Vec<FormatOption> {
    let descriptor = classify(name, mime_type);
    let source = if descriptor.extension.is_empty() {
        mime_type
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    } else {
        descriptor.extension
    };

    let menu: &[FormatOption] = match descriptor.category {
        FileCategory::Image => IMAGE_TARGETS,
        FileCategory::Video => VIDEO_TARGETS,
        FileCategory::Audio => AUDIO_TARGETS,
        FileCategory::Document => DOCUMENT_TARGETS,
        FileCategory::Spreadsheet => SPREADSHEET_TARGETS,
        FileCategory::Presentation => PRESENTATION_TARGETS,
        FileCategory::Archive | FileCategory::ThreeD | FileCategory::Unknown => &[],
    };

    menu.iter()
        .filter(|f| f.value != source)
        .cloned()
        .collect()
}
