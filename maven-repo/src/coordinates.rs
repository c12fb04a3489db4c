//! Maven coordinates and the Maven 2 repository layout.
//!
//! A file in a Maven 2 repository lives at
//! `group/as/dirs/artifactId/version/artifactId-version[-classifier].extension`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The (groupId, artifactId, version, classifier, extension) tuple identifying
/// one artifact file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    pub extension: String,
}

impl Coordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        classifier: Option<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: classifier.filter(|c| !c.is_empty()),
            extension: extension.into(),
        }
    }

    /// The repository-relative path of this artifact file.
    pub fn to_relative_path(&self) -> String {
        coordinates_to_relative_path(
            &self.group_id,
            &self.artifact_id,
            &self.version,
            self.classifier.as_deref(),
            &self.extension,
        )
    }

    /// The file name component of [`Coordinates::to_relative_path`].
    pub fn file_name(&self) -> String {
        match self.classifier.as_deref() {
            Some(classifier) if !classifier.is_empty() => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, classifier, self.extension
            ),
            _ => format!("{}-{}.{}", self.artifact_id, self.version, self.extension),
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        write!(f, "@{}", self.extension)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("path is empty")]
    Empty,
    #[error("path has too few segments: {0}")]
    TooShort(String),
    #[error("path contains an invalid segment: {0}")]
    InvalidSegment(String),
    #[error("file name '{file}' does not match {artifact_id}-{version}")]
    FileNameMismatch {
        file: String,
        artifact_id: String,
        version: String,
    },
    #[error("file name has no extension: {0}")]
    MissingExtension(String),
}

/// Compute the Maven 2 layout path for the given coordinates.
///
/// Pure function, no I/O. Two coordinates that differ only by version always
/// map to different paths since the version is its own directory.
pub fn coordinates_to_relative_path(
    group_id: &str,
    artifact_id: &str,
    version: &str,
    classifier: Option<&str>,
    extension: &str,
) -> String {
    let group_path = group_id.replace('.', "/");
    let file = match classifier {
        Some(classifier) if !classifier.is_empty() => {
            format!("{artifact_id}-{version}-{classifier}.{extension}")
        }
        _ => format!("{artifact_id}-{version}.{extension}"),
    };

    format!("{group_path}/{artifact_id}/{version}/{file}")
}

/// Parse a Maven 2 layout path back into coordinates.
pub fn relative_path_to_coordinates(path: &str) -> Result<Coordinates, LayoutError> {
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        return Err(LayoutError::Empty);
    }

    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 4 {
        return Err(LayoutError::TooShort(path.to_string()));
    }
    if let Some(bad) = segments
        .iter()
        .find(|s| s.is_empty() || **s == "." || **s == ".." || s.contains('\\'))
    {
        return Err(LayoutError::InvalidSegment(bad.to_string()));
    }

    let (file, rest) = segments.split_last().ok_or(LayoutError::Empty)?;
    let (version, rest) = rest.split_last().ok_or(LayoutError::Empty)?;
    let (artifact_id, group_segments) = rest.split_last().ok_or(LayoutError::Empty)?;

    let prefix = format!("{artifact_id}-{version}");
    let remainder = file
        .strip_prefix(&prefix)
        .ok_or_else(|| LayoutError::FileNameMismatch {
            file: file.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        })?;

    let (classifier, extension) = if let Some(tail) = remainder.strip_prefix('-') {
        match tail.split_once('.') {
            Some((classifier, extension)) if !classifier.is_empty() => {
                (Some(classifier.to_string()), extension)
            }
            _ => return Err(LayoutError::MissingExtension(file.to_string())),
        }
    } else if let Some(extension) = remainder.strip_prefix('.') {
        (None, extension)
    } else {
        return Err(LayoutError::FileNameMismatch {
            file: file.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        });
    };

    if extension.is_empty() {
        return Err(LayoutError::MissingExtension(file.to_string()));
    }

    Ok(Coordinates::new(
        group_segments.join("."),
        *artifact_id,
        *version,
        classifier,
        extension,
    ))
}
