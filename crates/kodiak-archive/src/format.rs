//! Archive format detection.

use std::fmt;
use std::path::Path;

/// Archive container formats understood by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// ZIP archive.
    Zip,
    /// Uncompressed tar archive.
    Tar,
    /// gzip-compressed tar archive.
    TarGz,
}

/// Recognised archive extensions.
const EXTENSIONS: [(&str, ArchiveFormat); 4] = [
    (".tar.gz", ArchiveFormat::TarGz),
    (".tgz", ArchiveFormat::TarGz),
    (".tar", ArchiveFormat::Tar),
    (".zip", ArchiveFormat::Zip),
];

/// Extensions (with leading dot) that are treated as archives.
#[must_use]
pub fn supported_extensions() -> Vec<&'static str> {
    EXTENSIONS.iter().map(|(ext, _)| *ext).collect()
}

/// Every recognised extension paired with the format it selects.
#[must_use]
pub fn extension_formats() -> &'static [(&'static str, ArchiveFormat)] {
    &EXTENSIONS
}

impl ArchiveFormat {
    /// Detect the format from a file name, ignoring ASCII case.
    ///
    /// A bare extension such as `".zip"` is not an archive name.
    #[must_use]
    pub fn detect(name: &str) -> Option<Self> {
        split_extension(name).map(|(_, format)| format)
    }

    /// Detect the format from the final component of `path`.
    #[must_use]
    pub fn detect_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::detect)
    }

    /// Remove the archive extension, e.g. `"HW4.tar.gz"` becomes `"HW4"`.
    #[must_use]
    pub fn strip_extension(name: &str) -> Option<&str> {
        split_extension(name).map(|(stem, _)| stem)
    }

    /// Canonical extension written for newly created archives.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Zip => ".zip",
            Self::Tar => ".tar",
            Self::TarGz => ".tar.gz",
        }
    }

    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Zip => "ZIP",
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn split_extension(name: &str) -> Option<(&str, ArchiveFormat)> {
    let lower = name.to_ascii_lowercase();
    EXTENSIONS.iter().find_map(|(ext, format)| {
        if lower.len() > ext.len() && lower.ends_with(ext) {
            Some((&name[..name.len() - ext.len()], *format))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(ArchiveFormat::detect("HW4.zip"), Some(ArchiveFormat::Zip));
        assert_eq!(ArchiveFormat::detect("HW4.ZIP"), Some(ArchiveFormat::Zip));
        assert_eq!(ArchiveFormat::detect("HW4.tar"), Some(ArchiveFormat::Tar));
        assert_eq!(ArchiveFormat::detect("HW4.tar.gz"), Some(ArchiveFormat::TarGz));
        assert_eq!(ArchiveFormat::detect("HW4.tgz"), Some(ArchiveFormat::TarGz));
        assert_eq!(ArchiveFormat::detect("HW4.pdf"), None);
        assert_eq!(ArchiveFormat::detect(".zip"), None);
        assert_eq!(ArchiveFormat::detect("HW4"), None);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(ArchiveFormat::strip_extension("HW4.tar.gz"), Some("HW4"));
        assert_eq!(
            ArchiveFormat::strip_extension("EGillotti - Homework 6.Zip"),
            Some("EGillotti - Homework 6")
        );
        assert_eq!(ArchiveFormat::strip_extension("notes.txt"), None);
    }

    #[test]
    fn test_supported_extensions() {
        let extensions = supported_extensions();
        assert!(extensions.contains(&".zip"));
        assert!(extensions.contains(&".tar.gz"));
        assert_eq!(extensions.len(), 4);
    }
}
