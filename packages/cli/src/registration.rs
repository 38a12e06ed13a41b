//! Timed background registration.
//!
//! Registration runs in two phases:
//!
//! 1. [`plan`] checks the source, the images and the registry, and renders
//!    both documents in memory. It never writes and needs no write access.
//! 2. [`install`] checks write access with [`check_write_access`], then copies
//!    the images, writes the timed document and finally the registry. Both
//!    documents are replaced atomically.

use std::path::{Path, PathBuf};

use crate::background::images::discover_slides;
use crate::background::{self, CycleDuration, TimedBackground};
use crate::config::ZbgConfig;
use crate::error::ZbgError;
use crate::platform::{capitalize, copy_dir_all, derive_background_name, ensure_writable, write_atomic};
use crate::registry::{self, parse_registry, render_registry, timed_entry};

/// What the user asked to register.
#[derive(Debug, Clone, Copy)]
pub struct RegisterRequest<'a> {
    /// Source directory exactly as typed; the name derivation depends on it.
    pub directory: &'a str,
    /// Explicit background name.
    pub name: Option<&'a str>,
    /// Time for one full pass through all images.
    pub cycle: CycleDuration,
}

/// A fully prepared registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Directory the images are copied from.
    pub source: PathBuf,
    /// Lowercase name used for the install directory and document.
    pub name: String,
    /// Capitalized name shown in the appearance settings.
    pub display_name: String,
    /// Directory the images are copied to.
    pub install_dir: PathBuf,
    /// Absolute path of the timed-background document.
    pub timed_document: PathBuf,
    /// Registry receiving the entry.
    pub registry: PathBuf,
    /// Number of slides in the loop.
    pub image_count: usize,
    /// Seconds per slide.
    pub duration: f64,
    /// Whether an entry with the same display name is being replaced.
    pub replaces_existing: bool,
    timed_xml: String,
    registry_xml: String,
}

impl Registration {
    /// The rendered timed-background document.
    #[must_use]
    pub fn timed_xml(&self) -> &str { &self.timed_xml }

    /// The rendered registry document.
    #[must_use]
    pub fn registry_xml(&self) -> &str { &self.registry_xml }
}

/// Checks preconditions and renders both documents without writing anything.
///
/// Write access is not required here; see [`check_write_access`].
///
/// # Errors
///
/// - [`ZbgError::DirectoryNotFound`] / [`ZbgError::NotADirectory`] for a bad source
/// - [`ZbgError::NoMatchingImages`] if the source holds no numbered slides
/// - [`ZbgError::UnnamedBackground`] if no name is given or derivable
/// - [`ZbgError::Registry`] if the registry is unreadable, malformed or has a
///   nameless entry
pub fn plan(request: &RegisterRequest<'_>, config: &ZbgConfig) -> Result<Registration, ZbgError> {
    let source = PathBuf::from(request.directory);
    tracing::debug!(directory = %source.display(), "checking source directory");

    if !source.exists() {
        return Err(ZbgError::DirectoryNotFound(source));
    }
    if !source.is_dir() {
        return Err(ZbgError::NotADirectory(source));
    }

    let backgrounds_dir = std::path::absolute(config.backgrounds_dir())?;
    let registry_path = config.other_wallpapers();

    let slides = discover_slides(&source)?;
    if slides.is_empty() {
        return Err(ZbgError::NoMatchingImages(source));
    }

    let name = match request.name {
        Some(name) => name.to_lowercase(),
        None => derive_background_name(request.directory).unwrap_or_default(),
    };
    if name.is_empty() {
        return Err(ZbgError::UnnamedBackground(request.directory.to_string()));
    }
    let display_name = capitalize(&name);

    let install_dir = background::install_dir(&backgrounds_dir, &name);
    let timed_document = background::timed_document_path(&backgrounds_dir, &name);
    let installed = background::installed_paths(&backgrounds_dir, &name, &slides);
    let timed = TimedBackground::looping(&installed, request.cycle)
        .ok_or_else(|| ZbgError::NoMatchingImages(source.clone()))?;
    let duration = timed.duration().unwrap_or_default();

    let existing = parse_registry(&registry_path)?;
    let replaces_existing = existing.iter().any(|entry| entry.name() == Some(display_name.as_str()));
    let merged = registry::merge(existing, timed_entry(&display_name, &timed_document))?;

    tracing::debug!(
        name = %name,
        images = slides.len(),
        duration,
        replaces_existing,
        "prepared registration"
    );

    Ok(Registration {
        source,
        name,
        display_name,
        install_dir,
        timed_document,
        registry: registry_path,
        image_count: slides.len(),
        duration,
        replaces_existing,
        timed_xml: timed.to_xml(),
        registry_xml: render_registry(&merged),
    })
}

/// Checks that the install directory and the registry directory accept new
/// files.
///
/// # Errors
///
/// Returns [`ZbgError::PrivilegeRequired`] naming the first location that is
/// not writable.
pub fn check_write_access(registration: &Registration) -> Result<(), ZbgError> {
    require_write_access(&registration.install_dir)?;
    require_write_access(registration.registry.parent().unwrap_or_else(|| Path::new(".")))
}

/// Copies the images and writes both documents, in that order.
///
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns [`ZbgError::PrivilegeRequired`] before touching anything if a
/// target is not writable, and [`ZbgError::Install`] naming the path that
/// could not be written.
pub fn install(registration: &Registration) -> Result<u64, ZbgError> {
    check_write_access(registration)?;

    let copied = if same_directory(&registration.source, &registration.install_dir) {
        tracing::info!(dir = %registration.install_dir.display(), "images already in place");
        0
    } else {
        tracing::info!(
            from = %registration.source.display(),
            to = %registration.install_dir.display(),
            "copying images"
        );
        copy_dir_all(&registration.source, &registration.install_dir)
            .map_err(|source| install_error(&registration.install_dir, source))?
    };

    write_atomic(&registration.timed_document, registration.timed_xml.as_bytes())
        .map_err(|source| install_error(&registration.timed_document, source))?;
    tracing::info!(path = %registration.timed_document.display(), "wrote timed background");

    write_atomic(&registration.registry, registration.registry_xml.as_bytes())
        .map_err(|source| install_error(&registration.registry, source))?;
    tracing::info!(path = %registration.registry.display(), "wrote wallpaper registry");

    Ok(copied)
}

/// Plans and installs a registration.
///
/// # Errors
///
/// See [`plan`] and [`install`].
pub fn register(request: &RegisterRequest<'_>, config: &ZbgConfig) -> Result<Registration, ZbgError> {
    let registration = plan(request, config)?;
    install(&registration)?;
    Ok(registration)
}

fn require_write_access(dir: &Path) -> Result<(), ZbgError> {
    ensure_writable(dir).map_err(|source| ZbgError::PrivilegeRequired { path: dir.to_path_buf(), source })
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn install_error(path: &Path, source: std::io::Error) -> ZbgError {
    ZbgError::Install { path: path.to_path_buf(), source }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::registry::parse_registry_str;

    const EMPTY_REGISTRY: &str = "<?xml version=\"1.0\"?>\n<wallpapers>\n</wallpapers>\n";

    struct Fixture {
        _temp: TempDir,
        root: PathBuf,
        config: ZbgConfig,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        fs::create_dir_all(root.join("share/properties")).unwrap();
        fs::write(root.join("share/properties/other.xml"), EMPTY_REGISTRY).unwrap();

        let config = ZbgConfig {
            backgrounds_dir: root.join("share/backgrounds").display().to_string(),
            other_wallpapers: root.join("share/properties/other.xml").display().to_string(),
            ..ZbgConfig::default()
        };
        Fixture { _temp: temp, root, config }
    }

    fn slides_dir(root: &Path, files: &[&str]) -> String {
        let dir = root.join("pics/mojave");
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), file.as_bytes()).unwrap();
        }
        format!("{}/", dir.display())
    }

    #[test]
    fn test_plan_does_not_write() {
        let fx = fixture();
        let dir = slides_dir(&fx.root, &["1.jpg", "2.jpg"]);
        let request = RegisterRequest { directory: &dir, name: None, cycle: CycleDuration::new(1, 0, 0) };

        let registration = plan(&request, &fx.config).unwrap();
        assert_eq!(registration.name, "mojave");
        assert_eq!(registration.display_name, "Mojave");
        assert_eq!(registration.image_count, 2);
        assert!((registration.duration - 1800.0).abs() < f64::EPSILON);
        assert!(!registration.replaces_existing);
        assert!(!fx.root.join("share/backgrounds").exists());
        assert_eq!(
            fs::read_to_string(fx.root.join("share/properties/other.xml")).unwrap(),
            EMPTY_REGISTRY
        );
    }

    #[test]
    fn test_plan_renders_registry_with_new_entry() {
        let fx = fixture();
        let dir = slides_dir(&fx.root, &["1.jpg"]);
        let request =
            RegisterRequest { directory: &dir, name: Some("Desert"), cycle: CycleDuration::default() };

        let registration = plan(&request, &fx.config).unwrap();
        let entries = parse_registry_str(registration.registry_xml()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), Some("Desert"));
        assert_eq!(
            entries[0].get("filename"),
            Some(registration.timed_document.display().to_string().as_str())
        );
        assert!(registration.timed_document.ends_with("desert/desert-timed.xml"));
    }

    #[test]
    fn test_plan_missing_directory() {
        let fx = fixture();
        let missing = fx.root.join("nope").display().to_string();
        let request = RegisterRequest { directory: &missing, name: None, cycle: CycleDuration::default() };

        let err = plan(&request, &fx.config).unwrap_err();
        assert!(matches!(err, ZbgError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_plan_file_instead_of_directory() {
        let fx = fixture();
        let file = fx.root.join("share/properties/other.xml").display().to_string();
        let request = RegisterRequest { directory: &file, name: None, cycle: CycleDuration::default() };

        let err = plan(&request, &fx.config).unwrap_err();
        assert!(matches!(err, ZbgError::NotADirectory(_)));
    }

    #[test]
    fn test_plan_without_slides() {
        let fx = fixture();
        let dir = slides_dir(&fx.root, &["cover.jpg", "notes.txt"]);
        let request = RegisterRequest { directory: &dir, name: None, cycle: CycleDuration::default() };

        let err = plan(&request, &fx.config).unwrap_err();
        assert!(matches!(err, ZbgError::NoMatchingImages(_)));
    }

    #[test]
    fn test_plan_empty_explicit_name() {
        let fx = fixture();
        let dir = slides_dir(&fx.root, &["1.jpg"]);
        let request = RegisterRequest { directory: &dir, name: Some(""), cycle: CycleDuration::default() };

        let err = plan(&request, &fx.config).unwrap_err();
        assert!(matches!(err, ZbgError::UnnamedBackground(_)));
    }

    #[cfg(unix)]
    fn set_mode(dir: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(dir, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn test_plan_succeeds_without_write_access() {
        let fx = fixture();
        let dir = slides_dir(&fx.root, &["1.jpg", "2.jpg"]);
        let share = fx.root.join("share");
        set_mode(&share.join("properties"), 0o555);
        set_mode(&share, 0o555);

        let request = RegisterRequest { directory: &dir, name: None, cycle: CycleDuration::new(1, 0, 0) };
        let planned = plan(&request, &fx.config);

        // Root ignores permission bits, so only unprivileged runs see the denial.
        let denied = tempfile::tempfile_in(&share).is_err();
        let access = planned.as_ref().ok().map(check_write_access);
        let installed = planned.as_ref().ok().map(install);

        set_mode(&share, 0o755);
        set_mode(&share.join("properties"), 0o755);

        let registration = planned.unwrap();
        assert_eq!(registration.image_count, 2);
        if denied {
            assert!(access.unwrap().unwrap_err().needs_elevation());
            assert!(matches!(installed.unwrap(), Err(ZbgError::PrivilegeRequired { .. })));
            assert!(!share.join("backgrounds").exists());
        }
    }

    #[test]
    fn test_check_write_access_on_writable_targets() {
        let fx = fixture();
        let dir = slides_dir(&fx.root, &["1.jpg"]);
        let request = RegisterRequest { directory: &dir, name: None, cycle: CycleDuration::default() };

        let registration = plan(&request, &fx.config).unwrap();
        assert!(check_write_access(&registration).is_ok());
    }

    #[test]
    fn test_install_skips_copy_onto_itself() {
        let fx = fixture();
        let installed = fx.root.join("share/backgrounds/mojave");
        fs::create_dir_all(&installed).unwrap();
        fs::write(installed.join("1.jpg"), b"slide").unwrap();

        let dir = format!("{}/", installed.display());
        let request = RegisterRequest { directory: &dir, name: None, cycle: CycleDuration::default() };

        let registration = register(&request, &fx.config).unwrap();
        assert_eq!(registration.name, "mojave");
        assert_eq!(fs::read(installed.join("1.jpg")).unwrap(), b"slide");
        assert!(installed.join("mojave-timed.xml").exists());
    }
}
