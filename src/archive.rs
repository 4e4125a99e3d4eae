//! ZIP archive packing and extraction
//!
//! The batch core works on (filename, bytes) pairs; this module is the
//! collaborator that turns an uploaded archive into such pairs and packs
//! the results back into one archive.

use crate::batch::FileEntry;
use crate::error::Result;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Extract all files from a ZIP archive, in archive order.
///
/// Directory entries are ignored and entry names are flattened to their
/// base name, matching how a drawing set is delivered (one flat folder of
/// sheets).
pub fn extract_entries(bytes: &[u8]) -> Result<Vec<FileEntry>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        if file.is_dir() {
            continue;
        }
        let name = match file.enclosed_name().as_deref().and_then(base_name) {
            Some(name) => name,
            None => continue,
        };
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        entries.push(FileEntry::new(name, bytes));
    }

    Ok(entries)
}

/// Pack (filename, bytes) pairs into a single ZIP archive, in order.
pub fn bundle_entries<'a, I>(files: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, bytes) in files {
        writer.start_file(name, options)?;
        writer.write_all(bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

fn base_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
}
