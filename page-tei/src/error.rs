//! Error types for conversion operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an export or writing TEI.
///
/// Conditions inside the annotation engine are never errors; they are reported
/// as [`ConversionWarning`](crate::annotation::ConversionWarning)s instead.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source document is not well-formed XML
    #[error("XML parsing error: {0}")]
    Xml(String),
    /// A required element is absent
    #[error("Missing <{0}> element")]
    MissingElement(String),
    /// A required attribute is absent
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },
    /// Tag name or deepness table could not be loaded
    #[error("Invalid tag table: {0}")]
    TagTable(String),
    /// Export discovery pattern was rejected
    #[error("Invalid search pattern: {0}")]
    Pattern(String),
    /// Filesystem access failed
    #[error("Error accessing '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Wraps an error with the file it originated from
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        ConvertError::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    /// Attach the originating file to an error.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            // Already located errors keep their innermost path
            err @ (ConvertError::InFile { .. } | ConvertError::Io { .. }) => err,
            err => ConvertError::InFile {
                path: path.into(),
                source: Box::new(err),
            },
        }
    }
}
