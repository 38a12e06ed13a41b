//! Registry XML writer.

use quick_xml::escape::escape;

use super::WallpaperEntry;

/// Line terminator used by the GNOME registry files we produce.
const CRLF: &str = "\r\n";

/// Renders entries as a complete `gnome-wp-list.dtd` document.
///
/// Fields are written in entry order with fixed two/four space indentation
/// and CRLF line endings. Text values are XML-escaped.
#[must_use]
pub fn render_registry(entries: &[WallpaperEntry]) -> String {
    let mut out = String::new();

    push_line(&mut out, "", r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    push_line(&mut out, "", r#"<!DOCTYPE wallpapers SYSTEM "gnome-wp-list.dtd">"#);
    push_line(&mut out, "", "<wallpapers>");

    for entry in entries {
        push_line(&mut out, "  ", "<wallpaper>");
        for (key, value) in entry.fields() {
            push_line(&mut out, "    ", &format!("<{key}>{}</{key}>", escape(value)));
        }
        push_line(&mut out, "  ", "</wallpaper>");
    }

    push_line(&mut out, "", "</wallpapers>");
    out
}

fn push_line(out: &mut String, indent: &str, line: &str) {
    out.push_str(indent);
    out.push_str(line);
    out.push_str(CRLF);
}
