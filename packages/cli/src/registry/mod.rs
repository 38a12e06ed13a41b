//! GNOME wallpaper registry documents.
//!
//! A registry is the XML list read by the desktop's appearance settings
//! (`/usr/share/gnome-background-properties/*.xml`). Each child of the root
//! element is one wallpaper entry, and each child of an entry is one field.
//!
//! - [`parser`] - reads a registry into ordered [`WallpaperEntry`] records
//! - [`writer`] - renders records back into a `gnome-wp-list.dtd` document

mod parser;
mod writer;

use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

pub use parser::{parse_registry, parse_registry_str};
pub use writer::render_registry;

/// Field holding the display name of a wallpaper.
pub const FIELD_NAME: &str = "name";
/// Field holding the image or timed-background path.
pub const FIELD_FILENAME: &str = "filename";
/// Field holding the picture placement option (`zoom`, `centered`, ...).
pub const FIELD_OPTIONS: &str = "options";
/// Field holding the primary background color.
pub const FIELD_PCOLOR: &str = "pcolor";
/// Field holding the secondary background color.
pub const FIELD_SCOLOR: &str = "scolor";
/// Field holding the color shading type.
pub const FIELD_SHADE_TYPE: &str = "shade_type";

/// Errors that can occur while reading or interpreting a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry file is missing or could not be read.
    #[error("Failed to read wallpaper registry {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document is not well-formed XML.
    #[error("Malformed wallpaper registry {} at byte {position}: {message}", .path.display())]
    Malformed { path: PathBuf, position: u64, message: String },
    /// An entry lacks a field that the caller requires.
    #[error("Wallpaper entry #{index} is missing the `{field}` field")]
    MissingField { index: usize, field: &'static str },
}

impl RegistryError {
    /// Attaches the registry path to errors produced from in-memory parsing.
    #[must_use]
    pub fn with_path(self, registry: &Path) -> Self {
        match self {
            Self::Malformed { position, message, .. } => {
                Self::Malformed { path: registry.to_path_buf(), position, message }
            }
            other => other,
        }
    }
}

/// One wallpaper entry: field name to verbatim text, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallpaperEntry {
    fields: Vec<(String, String)>,
}

impl WallpaperEntry {
    /// Creates an entry from `(field, value)` pairs.
    ///
    /// Later duplicates overwrite earlier values but keep the first position.
    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut entry = Self::default();
        for (key, value) in fields {
            entry.insert(key, value);
        }
        entry
    }

    /// Sets a field, replacing the value in place if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Returns the value of a field, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(existing, _)| existing == key).map(|(_, value)| value.as_str())
    }

    /// Returns the display name, if the entry has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> { self.get(FIELD_NAME) }

    /// Iterates over the fields in serialization order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize { self.fields.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    /// Returns a field or a `MissingField` error naming the entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingField`] if the field is absent.
    pub fn require(&self, index: usize, field: &'static str) -> Result<&str, RegistryError> {
        self.get(field).ok_or(RegistryError::MissingField { index, field })
    }
}

impl Serialize for WallpaperEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Validated view of a registry entry carrying every display field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallpaper<'a> {
    pub name: &'a str,
    pub filename: &'a str,
    pub options: &'a str,
    pub shade_type: &'a str,
    pub pcolor: &'a str,
    pub scolor: &'a str,
}

impl<'a> Wallpaper<'a> {
    /// Validates `entry`, the `index`-th (0-based) entry of its registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingField`] for the first absent field.
    pub fn from_entry(index: usize, entry: &'a WallpaperEntry) -> Result<Self, RegistryError> {
        Ok(Self {
            name: entry.require(index, FIELD_NAME)?,
            filename: entry.require(index, FIELD_FILENAME)?,
            options: entry.require(index, FIELD_OPTIONS)?,
            shade_type: entry.require(index, FIELD_SHADE_TYPE)?,
            pcolor: entry.require(index, FIELD_PCOLOR)?,
            scolor: entry.require(index, FIELD_SCOLOR)?,
        })
    }

    /// Whether the entry points at a timed-background document.
    #[must_use]
    pub fn is_timed(&self) -> bool { self.filename.ends_with(".xml") }
}

/// Validates every entry of a registry.
///
/// # Errors
///
/// Returns [`RegistryError::MissingField`] for the first incomplete entry.
pub fn validate(entries: &[WallpaperEntry]) -> Result<Vec<Wallpaper<'_>>, RegistryError> {
    entries.iter().enumerate().map(|(index, entry)| Wallpaper::from_entry(index, entry)).collect()
}

/// Builds the entry registered for a timed background.
#[must_use]
pub fn timed_entry(display_name: &str, timed_document: &Path) -> WallpaperEntry {
    WallpaperEntry::from_fields([
        (FIELD_NAME, display_name.to_string()),
        (FIELD_FILENAME, timed_document.display().to_string()),
        (FIELD_OPTIONS, "zoom".to_string()),
        (FIELD_PCOLOR, "#000000".to_string()),
        (FIELD_SCOLOR, "#000000".to_string()),
        (FIELD_SHADE_TYPE, "solid".to_string()),
    ])
}

/// Drops every entry named like `entry` and appends `entry` at the end.
///
/// # Errors
///
/// Returns [`RegistryError::MissingField`] if `entry` or any existing entry
/// has no `name` field.
pub fn merge(
    existing: Vec<WallpaperEntry>,
    entry: WallpaperEntry,
) -> Result<Vec<WallpaperEntry>, RegistryError> {
    let name = entry
        .name()
        .ok_or(RegistryError::MissingField { index: existing.len(), field: FIELD_NAME })?
        .to_string();

    let mut merged = Vec::with_capacity(existing.len() + 1);
    for (index, current) in existing.into_iter().enumerate() {
        if current.require(index, FIELD_NAME)? == name {
            tracing::debug!(name = %name, index, "replacing existing registry entry");
            continue;
        }
        merged.push(current);
    }
    merged.push(entry);

    Ok(merged)
}
