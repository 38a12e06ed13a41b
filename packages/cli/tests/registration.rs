//! End-to-end tests for registering a timed background.
//!
//! Every test works inside its own temp directory: the configuration points
//! the backgrounds directory and both registries there.
//!
//! ```bash
//! cargo test -p zbg --test registration
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zbg_lib::background::CycleDuration;
use zbg_lib::config::ZbgConfig;
use zbg_lib::error::ZbgError;
use zbg_lib::registration::{RegisterRequest, register};
use zbg_lib::registry::{RegistryError, parse_registry};

const OTHER_REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE wallpapers SYSTEM "gnome-wp-list.dtd">
<wallpapers>
  <wallpaper deleted="false">
    <name>Zorin Mountain Fog</name>
    <filename>/usr/share/backgrounds/zorin-fog.jpg</filename>
    <options>zoom</options>
    <shade_type>solid</shade_type>
    <pcolor>#ffffff</pcolor>
    <scolor>#000000</scolor>
  </wallpaper>
</wallpapers>
"#;

// ============================================================================
// Helpers
// ============================================================================

struct Sandbox {
    temp: TempDir,
    config: ZbgConfig,
}

impl Sandbox {
    fn new(registry: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let properties = temp.path().join("gnome-background-properties");
        fs::create_dir_all(&properties).unwrap();
        fs::write(properties.join("other.xml"), registry).unwrap();

        let config = ZbgConfig {
            backgrounds_dir: temp.path().join("backgrounds").display().to_string(),
            other_wallpapers: properties.join("other.xml").display().to_string(),
            ..ZbgConfig::default()
        };
        Self { temp, config }
    }

    fn root(&self) -> &Path { self.temp.path() }

    fn backgrounds(&self) -> PathBuf { self.root().join("backgrounds") }

    fn registry(&self) -> PathBuf { self.root().join("gnome-background-properties/other.xml") }

    /// Creates `pictures/<name>` holding `files` and returns it with a trailing slash.
    fn images(&self, name: &str, files: &[&str]) -> String {
        let dir = self.root().join("pictures").join(name);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), file.as_bytes()).unwrap();
        }
        format!("{}/", dir.display())
    }
}

fn request(directory: &str, hours: u64) -> RegisterRequest<'_> {
    RegisterRequest { directory, name: None, cycle: CycleDuration::new(hours, 0, 0) }
}

// ============================================================================
// Successful registration
// ============================================================================

#[test]
fn test_register_installs_images_document_and_entry() {
    let sandbox = Sandbox::new(OTHER_REGISTRY);
    let dir = sandbox.images("mojave", &["mojave_2.jpg", "mojave_1.jpg", "notes.txt"]);

    let registration = register(&request(&dir, 1), &sandbox.config).unwrap();

    let install_dir = sandbox.backgrounds().join("mojave");
    assert_eq!(registration.display_name, "Mojave");
    assert_eq!(registration.image_count, 2);
    assert!(install_dir.join("mojave_1.jpg").exists());
    assert!(install_dir.join("mojave_2.jpg").exists());
    assert!(install_dir.join("notes.txt").exists());

    let first = install_dir.join("mojave_1.jpg").display().to_string();
    let second = install_dir.join("mojave_2.jpg").display().to_string();
    let expected = format!(
        "<background>\r\n\
         \t<starttime>\r\n\
         \t\t<year>2021</year>\r\n\
         \t\t<month>0</month>\r\n\
         \t\t<day>0</day>\r\n\
         \t\t<hour>0</hour>\r\n\
         \t\t<minute>0</minute>\r\n\
         \t\t<second>0</second>\r\n\
         \t</starttime>\r\n\
         \r\n\
         \t<transition type=\"overlay\">\r\n\
         \t\t<duration>1800.0</duration>\r\n\
         \t\t<from>{second}</from>\r\n\
         \t\t<to>{first}</to>\r\n\
         \t</transition>\r\n\
         \r\n\
         \t<transition type=\"overlay\">\r\n\
         \t\t<duration>1800.0</duration>\r\n\
         \t\t<from>{first}</from>\r\n\
         \t\t<to>{second}</to>\r\n\
         \t</transition>\r\n\
         </background>\r\n"
    );
    let timed = fs::read_to_string(install_dir.join("mojave-timed.xml")).unwrap();
    assert_eq!(timed, expected);

    let entries = parse_registry(&sandbox.registry()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name(), Some("Zorin Mountain Fog"));
    assert_eq!(entries[0].get("pcolor"), Some("#ffffff"));
    assert_eq!(entries[1].name(), Some("Mojave"));
    assert_eq!(
        entries[1].get("filename"),
        Some(install_dir.join("mojave-timed.xml").display().to_string().as_str())
    );
    assert_eq!(entries[1].get("options"), Some("zoom"));
    assert_eq!(entries[1].get("shade_type"), Some("solid"));
}

#[test]
fn test_register_writes_crlf_registry() {
    let sandbox = Sandbox::new(OTHER_REGISTRY);
    let dir = sandbox.images("mojave", &["1.png"]);

    register(&request(&dir, 24), &sandbox.config).unwrap();

    let registry = fs::read_to_string(sandbox.registry()).unwrap();
    assert!(registry.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\r\n"));
    assert!(registry.contains("  <wallpaper>\r\n    <name>Mojave</name>\r\n"));
    assert!(registry.ends_with("</wallpapers>\r\n"));
}

#[test]
fn test_register_orders_slides_numerically() {
    let sandbox = Sandbox::new(OTHER_REGISTRY);
    let dir = sandbox.images("mojave", &["bg10.jpg", "bg2.jpg", "bg1.jpg"]);

    let registration = register(&request(&dir, 3), &sandbox.config).unwrap();

    let timed = registration.timed_xml();
    let positions: Vec<usize> = ["bg1.jpg</to>", "bg2.jpg</to>", "bg10.jpg</to>"]
        .iter()
        .map(|needle| timed.find(needle).unwrap())
        .collect();
    assert!(positions[0] < positions[1]);
    assert!(positions[1] < positions[2]);
    assert!(timed.contains("<duration>3600.0</duration>"));
}

#[test]
fn test_register_twice_replaces_entry() {
    let sandbox = Sandbox::new(OTHER_REGISTRY);
    let dir = sandbox.images("mojave", &["1.jpg", "2.jpg"]);

    register(&request(&dir, 24), &sandbox.config).unwrap();
    let again = register(&request(&dir, 12), &sandbox.config).unwrap();

    assert!(again.replaces_existing);
    let entries = parse_registry(&sandbox.registry()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries.iter().filter(|entry| entry.name() == Some("Mojave")).count(), 1);

    let timed = fs::read_to_string(sandbox.backgrounds().join("mojave/mojave-timed.xml")).unwrap();
    assert!(timed.contains("<duration>21600.0</duration>"));
}

#[test]
fn test_register_explicit_name_is_lowercased_for_paths() {
    let sandbox = Sandbox::new(OTHER_REGISTRY);
    let dir = sandbox.images("mojave", &["1.jpg"]);
    let request = RegisterRequest {
        directory: &dir,
        name: Some("DESERT"),
        cycle: CycleDuration::new(24, 0, 0),
    };

    let registration = register(&request, &sandbox.config).unwrap();

    assert_eq!(registration.name, "desert");
    assert_eq!(registration.display_name, "Desert");
    assert!(sandbox.backgrounds().join("desert/desert-timed.xml").exists());
}

#[test]
fn test_register_without_trailing_slash_uses_parent_name() {
    let sandbox = Sandbox::new(OTHER_REGISTRY);
    let dir = sandbox.images("mojave", &["1.jpg"]);
    let without_slash = dir.trim_end_matches('/');

    let registration = register(&request(without_slash, 24), &sandbox.config).unwrap();

    assert_eq!(registration.name, "pictures");
    assert!(sandbox.backgrounds().join("pictures/pictures-timed.xml").exists());
}

// ============================================================================
// Preconditions leave everything untouched
// ============================================================================

fn assert_untouched(sandbox: &Sandbox) {
    assert!(!sandbox.backgrounds().exists());
    assert_eq!(fs::read_to_string(sandbox.registry()).unwrap(), OTHER_REGISTRY);
}

#[test]
fn test_register_without_images_writes_nothing() {
    let sandbox = Sandbox::new(OTHER_REGISTRY);
    let dir = sandbox.images("mojave", &["cover.jpg", "readme.md"]);

    let err = register(&request(&dir, 24), &sandbox.config).unwrap_err();

    assert!(matches!(err, ZbgError::NoMatchingImages(_)));
    assert!(err.is_precondition());
    assert_untouched(&sandbox);
}

#[test]
fn test_register_missing_directory_writes_nothing() {
    let sandbox = Sandbox::new(OTHER_REGISTRY);
    let missing = sandbox.root().join("pictures/nope/").display().to_string();

    let err = register(&request(&missing, 24), &sandbox.config).unwrap_err();

    assert!(matches!(err, ZbgError::DirectoryNotFound(_)));
    assert_untouched(&sandbox);
}

#[test]
fn test_register_with_incomplete_entry_writes_nothing() {
    let registry = "<wallpapers><wallpaper><filename>/a.jpg</filename></wallpaper></wallpapers>";
    let sandbox = Sandbox::new(registry);
    let dir = sandbox.images("mojave", &["1.jpg"]);

    let err = register(&request(&dir, 24), &sandbox.config).unwrap_err();

    assert!(matches!(
        err,
        ZbgError::Registry(RegistryError::MissingField { index: 0, field: "name" })
    ));
    assert!(!sandbox.backgrounds().exists());
    assert_eq!(fs::read_to_string(sandbox.registry()).unwrap(), registry);
}

#[test]
fn test_register_with_malformed_registry_writes_nothing() {
    let registry = "<wallpapers><wallpaper><name>Broken</wallpaper></wallpapers>";
    let sandbox = Sandbox::new(registry);
    let dir = sandbox.images("mojave", &["1.jpg"]);

    let err = register(&request(&dir, 24), &sandbox.config).unwrap_err();

    assert!(matches!(err, ZbgError::Registry(RegistryError::Malformed { .. })));
    assert!(err.to_string().contains("other.xml"));
    assert!(!sandbox.backgrounds().exists());
}

#[test]
fn test_register_with_missing_registry_writes_nothing() {
    let sandbox = Sandbox::new(OTHER_REGISTRY);
    fs::remove_file(sandbox.registry()).unwrap();
    let dir = sandbox.images("mojave", &["1.jpg"]);

    let err = register(&request(&dir, 24), &sandbox.config).unwrap_err();

    assert!(matches!(err, ZbgError::Registry(RegistryError::Read { .. })));
    assert!(!sandbox.backgrounds().exists());
}
