//! Registry XML reader.
//!
//! Walks the document with `quick_xml` events and keeps only two levels below
//! the root: entries (depth 2) and their fields (depth 3). Field text is kept
//! verbatim, so whitespace and numeric-looking values are not touched. A
//! field's value is the text before its first child element; anything inside
//! or after a child is ignored.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{RegistryError, WallpaperEntry};

/// Element depth of a wallpaper entry (the root is depth 1).
const ENTRY_DEPTH: usize = 2;
/// Element depth of a field inside an entry.
const FIELD_DEPTH: usize = 3;

/// Reads and parses the registry at `path`.
///
/// # Errors
///
/// Returns [`RegistryError::Read`] if the file is missing or unreadable and
/// [`RegistryError::Malformed`] if it is not well-formed XML.
pub fn parse_registry(path: &Path) -> Result<Vec<WallpaperEntry>, RegistryError> {
    tracing::debug!(path = %path.display(), "extracting wallpaper registry");

    let xml = fs::read_to_string(path)
        .map_err(|source| RegistryError::Read { path: path.to_path_buf(), source })?;
    let entries = parse_registry_str(&xml).map_err(|err| err.with_path(path))?;

    tracing::debug!(path = %path.display(), count = entries.len(), "parsed wallpaper registry");
    Ok(entries)
}

/// Parses a registry document held in memory.
///
/// # Errors
///
/// Returns [`RegistryError::Malformed`] if the document is not well-formed.
pub fn parse_registry_str(xml: &str) -> Result<Vec<WallpaperEntry>, RegistryError> {
    let mut reader = Reader::from_str(xml);

    let mut depth = 0usize;
    let mut seen_root = false;
    let mut entries = Vec::new();
    let mut entry: Option<WallpaperEntry> = None;
    let mut field: Option<(String, String)> = None;
    // Set once a child element opens inside the current field.
    let mut field_closed = false;

    loop {
        let event = reader.read_event().map_err(|err| malformed(&reader, err))?;

        match event {
            Event::Start(ref e) => {
                depth += 1;
                match depth {
                    1 => open_root(&reader, &mut seen_root)?,
                    ENTRY_DEPTH => entry = Some(WallpaperEntry::default()),
                    FIELD_DEPTH => {
                        field = Some((tag_name(&reader, e)?, String::new()));
                        field_closed = false;
                    }
                    _ => field_closed = true,
                }
            }
            Event::Empty(ref e) => match depth + 1 {
                1 => open_root(&reader, &mut seen_root)?,
                ENTRY_DEPTH => entries.push(WallpaperEntry::default()),
                FIELD_DEPTH => {
                    let name = tag_name(&reader, e)?;
                    if let Some(current) = entry.as_mut() {
                        current.insert(name, String::new());
                    }
                }
                _ => field_closed = true,
            },
            Event::End(_) => {
                match depth {
                    FIELD_DEPTH => {
                        if let (Some(current), Some((name, text))) = (entry.as_mut(), field.take()) {
                            current.insert(name, text);
                        }
                    }
                    ENTRY_DEPTH => entries.extend(entry.take()),
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(ref t) => {
                if depth == FIELD_DEPTH {
                    let text = t.unescape().map_err(|err| malformed(&reader, err))?;
                    if let Some((_, value)) = field.as_mut().filter(|_| !field_closed) {
                        value.push_str(&text);
                    }
                } else if depth == 0 && !t.iter().all(u8::is_ascii_whitespace) {
                    return Err(malformed_msg(&reader, "text outside of the root element"));
                }
            }
            Event::CData(ref c) => {
                if depth == FIELD_DEPTH {
                    if let Some((_, value)) = field.as_mut().filter(|_| !field_closed) {
                        value.push_str(&String::from_utf8_lossy(c));
                    }
                }
            }
            Event::Eof => break,
            // Declaration, doctype, comments and processing instructions.
            _ => {}
        }
    }

    if depth != 0 {
        return Err(malformed_msg(&reader, "unexpected end of document, unclosed element"));
    }
    if !seen_root {
        return Err(malformed_msg(&reader, "no root element found"));
    }

    Ok(entries)
}

fn open_root(reader: &Reader<&[u8]>, seen_root: &mut bool) -> Result<(), RegistryError> {
    if *seen_root {
        return Err(malformed_msg(reader, "junk after the root element"));
    }
    *seen_root = true;
    Ok(())
}

fn tag_name(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Result<String, RegistryError> {
    std::str::from_utf8(e.name().as_ref())
        .map(str::to_string)
        .map_err(|err| malformed_msg(reader, &err.to_string()))
}

fn malformed(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> RegistryError {
    malformed_msg(reader, &err.to_string())
}

fn malformed_msg(reader: &Reader<&[u8]>, message: &str) -> RegistryError {
    RegistryError::Malformed {
        path: std::path::PathBuf::new(),
        position: reader.buffer_position(),
        message: message.to_string(),
    }
}
