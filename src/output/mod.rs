use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::youtube::TranscriptSegment;

pub mod formatters;

pub use formatters::*;

/// Serialize a transcript and write it to `<stem>.<ext>`.
///
/// Exactly one file is created per call, silently overwriting any existing
/// file at that path. No retry; I/O failures propagate to the caller.
pub fn export_to_file(
    segments: &[TranscriptSegment],
    stem: &Path,
    format: &OutputFormat,
) -> Result<()> {
    let content = match format {
        OutputFormat::Json => format_as_json(segments)?,
        OutputFormat::Txt => format_as_txt(segments),
        OutputFormat::Srt => format_as_srt(segments),
    };

    // Append the extension rather than Path::with_extension, which would
    // clobber anything after a dot in a passed-through identifier.
    let mut file_name: OsString = stem.as_os_str().to_os_string();
    file_name.push(".");
    file_name.push(format.extension());
    let path = PathBuf::from(file_name);

    fs_err::write(&path, content)?;
    Ok(())
}
