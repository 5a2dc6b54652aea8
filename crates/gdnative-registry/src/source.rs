//! Loading source units from text or from a package directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use gdnative_core::{ScanError, ScanResult};

use crate::config::ScanConfig;

/// Parsed units that are scanned together as one package.
#[derive(Debug, Default)]
pub struct SourceSet {
    origins: Vec<String>,
    units: Vec<syn::File>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding one unit parsed from `source`.
    pub fn from_source(origin: impl Into<String>, source: &str) -> ScanResult<Self> {
        let mut set = Self::new();
        set.add_source(origin, source)?;
        Ok(set)
    }

    /// Parse `source` and add it to the set.
    pub fn add_source(&mut self, origin: impl Into<String>, source: &str) -> ScanResult<()> {
        let origin = origin.into();
        let unit = syn::parse_file(source).map_err(|err| ScanError::parse(origin.clone(), err))?;
        self.origins.push(origin);
        self.units.push(unit);
        Ok(())
    }

    /// Load every `.rs` file directly inside `dir`, in file name order.
    ///
    /// Generated files (see [`ScanConfig::is_generated`]) and
    /// subdirectories are skipped.
    pub fn load_dir(dir: impl AsRef<Path>, config: &ScanConfig) -> ScanResult<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|err| ScanError::io(dir.display().to_string(), &err))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|err| ScanError::io(dir.display().to_string(), &err))?
                .path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "rs") {
                continue;
            }
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if config.is_generated(&file_name) {
                debug!(file = %file_name, "skipping generated file");
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let mut set = Self::new();
        for path in paths {
            let origin = path.display().to_string();
            let source = fs::read_to_string(&path).map_err(|err| ScanError::io(origin.clone(), &err))?;
            debug!(file = %origin, "loaded source");
            set.add_source(origin, &source)?;
        }
        Ok(set)
    }

    pub fn units(&self) -> &[syn::File] {
        &self.units
    }

    /// Where each unit came from, in the same order as [`units`](Self::units).
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_name_the_origin() {
        let err = SourceSet::from_source("broken.rs", "fn (").unwrap_err();
        match err {
            ScanError::Parse { origin, .. } => assert_eq!(origin, "broken.rs"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_dir_is_an_io_error() {
        let err = SourceSet::load_dir("/definitely/not/here", &ScanConfig::default()).unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
