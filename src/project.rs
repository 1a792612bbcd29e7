//! Output naming from project manifests.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

/// Suffix appended to the project name for the output file.
pub const OUTPUT_SUFFIX: &str = "-structure.json";

/// Name used when neither a manifest nor the root has a usable name.
const FALLBACK_NAME: &str = "project";

#[derive(Deserialize)]
struct PackageJson {
    name: Option<String>,
}

#[derive(Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Deserialize)]
struct CargoPackage {
    name: Option<String>,
}

/// Derive the project name for a scan root.
///
/// Tries `package.json` then `Cargo.toml` at the root, falling back to the
/// root's base name. Manifests that cannot be parsed are reported and
/// skipped. The result is always sanitized.
pub fn project_name(root: &Path) -> String {
    let name = if root.is_dir() {
        package_json_name(&root.join("package.json"))
            .or_else(|| cargo_toml_name(&root.join("Cargo.toml")))
    } else {
        None
    };

    let name = name.unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_NAME.to_string())
    });

    sanitize(&name)
}

/// Replace every character outside `[A-Za-z0-9_-]` with `-`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// `<dir>/<name>-structure.json`.
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}{OUTPUT_SUFFIX}"))
}

fn package_json_name(path: &Path) -> Option<String> {
    let source = read_manifest(path)?;
    match serde_json::from_str::<PackageJson>(&source) {
        Ok(manifest) => manifest.name.filter(|name| !name.is_empty()),
        Err(err) => {
            warn!("Unable to parse {}: {err}", path.display());
            None
        }
    }
}

fn cargo_toml_name(path: &Path) -> Option<String> {
    let source = read_manifest(path)?;
    match toml::from_str::<CargoManifest>(&source) {
        Ok(manifest) => manifest
            .package
            .and_then(|package| package.name)
            .filter(|name| !name.is_empty()),
        Err(err) => {
            warn!("Unable to parse {}: {err}", path.display());
            None
        }
    }
}

fn read_manifest(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(source) => {
            debug!(path = %path.display(), "reading manifest");
            Some(source)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            warn!("Unable to read {}: {err}", path.display());
            None
        }
    }
}
