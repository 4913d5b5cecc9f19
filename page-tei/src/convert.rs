//! Export conversion pipeline.
//!
//! Ties the readers, the TEI builder and the serializer together. A single
//! export is turned into a [`TeiDocument`] with [`convert_export`];
//! [`convert_folder`] finds every export below a folder, converts each one and
//! writes `<output>/<export folder name>.xml`.
//!
//! One [`TagTables`] instance is shared by a whole batch, so ranks allocated
//! for unknown tags stay consistent across documents.

use crate::annotation::{IgnoreWarnings, TagTables, TracingWarnings, WarningSink};
use crate::error::ConvertError;
use crate::page::{read_mets, read_page};
use crate::tei::{validate, TeiDocument, DEFAULT_PUBLISHER};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the manifest file that marks an export folder.
pub const METS_FILE_NAME: &str = "mets.xml";

/// Settings for a conversion run.
///
/// ```ignore
/// let options = ConvertOptions::default()
///     .with_publisher("Staatsarchiv")
///     .with_ignore_warnings(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Content of `teiHeader/fileDesc/publicationStmt/publisher`.
    pub publisher: String,
    /// Drop annotation warnings instead of logging them.
    pub ignore_warnings: bool,
    /// Re-parse each written document and log a warning when it is not well-formed.
    pub validate: bool,
    /// Extension of the written files, without the dot.
    pub extension: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            publisher: DEFAULT_PUBLISHER.to_string(),
            ignore_warnings: false,
            validate: true,
            extension: "xml".to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    pub fn with_ignore_warnings(mut self, ignore: bool) -> Self {
        self.ignore_warnings = ignore;
        self
    }

    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Outcome of one converted export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Warnings logged while rendering lines; zero when warnings are ignored.
    pub warnings: usize,
    /// `None` when validation was disabled.
    pub valid: Option<bool>,
}

/// Outcome of a folder conversion.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ExportReport>,
    pub failed: Vec<(PathBuf, ConvertError)>,
    /// Outputs written by more than one export in this run; the last one wins.
    pub overwritten: Vec<PathBuf>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn invalid(&self) -> impl Iterator<Item = &ExportReport> {
        self.converted.iter().filter(|r| r.valid == Some(false))
    }
}

/// Build the TEI document for the export described by `mets_path`.
///
/// Page files are resolved against the manifest's folder and processed in
/// manifest order.
///
/// # Errors
///
/// Returns [`ConvertError`] if the manifest or any page cannot be read or
/// lacks required data. Annotation problems go to `sink` instead.
pub fn convert_export(
    mets_path: &Path,
    tables: &TagTables,
    sink: &mut dyn WarningSink,
    publisher: &str,
) -> Result<TeiDocument, ConvertError> {
    let manifest = read_mets(mets_path)?;
    let base = mets_path.parent().unwrap_or_else(|| Path::new(""));

    let mut tei = TeiDocument::new(&manifest.metadata, publisher);
    for (i, path) in manifest.page_paths(base).iter().enumerate() {
        let page = read_page(path)?;
        let _page = tracing::debug_span!("page", file = %path.display()).entered();
        tei.add_page(&page, i + 1, tables, sink);
    }
    Ok(tei)
}

/// Every `mets.xml` at or below `root`, sorted.
pub fn discover_exports(root: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let root_str = root.to_str().ok_or_else(|| {
        ConvertError::Pattern(format!("path is not valid UTF-8: {}", root.display()))
    })?;
    let pattern = format!(
        "{}/**/{METS_FILE_NAME}",
        glob::Pattern::escape(root_str.trim_end_matches('/'))
    );

    let entries = glob::glob(&pattern).map_err(|e| ConvertError::Pattern(e.to_string()))?;
    let mut found = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => found.push(path),
            Err(err) => tracing::warn!("skipping {}: {}", err.path().display(), err.error()),
        }
    }
    found.sort();
    Ok(found)
}

/// Output file for an export: named after the folder holding its manifest.
pub fn output_path_for(mets_path: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let stem = mets_path
        .parent()
        .and_then(Path::file_name)
        .or_else(|| mets_path.file_stem())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mets".to_string());
    output_dir.join(format!("{stem}.{extension}"))
}

/// Convert one export and write it into `output_dir`.
pub fn convert_to_file(
    mets_path: &Path,
    output_dir: &Path,
    tables: &TagTables,
    options: &ConvertOptions,
) -> Result<ExportReport, ConvertError> {
    let mut logged = TracingWarnings::default();
    let mut ignored = IgnoreWarnings;
    let sink: &mut dyn WarningSink = if options.ignore_warnings {
        &mut ignored
    } else {
        &mut logged
    };
    let tei = convert_export(mets_path, tables, sink, &options.publisher)?;
    let xml = tei.to_xml();

    let valid = options.validate.then(|| match validate(&xml) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("INVALID XML: {err}");
            false
        }
    });

    let output = output_path_for(mets_path, output_dir, &options.extension);
    fs::write(&output, xml).map_err(|e| ConvertError::io(&output, e))?;
    tracing::info!(output = %output.display(), warnings = logged.emitted, "written");

    Ok(ExportReport {
        source: mets_path.to_path_buf(),
        output,
        warnings: logged.emitted,
        valid,
    })
}

/// Convert every export below `input` into `output`.
///
/// A failing export is recorded in the report and does not stop the batch.
///
/// # Errors
///
/// Returns [`ConvertError`] only if the output folder cannot be created or the
/// input folder cannot be searched.
pub fn convert_folder(
    input: &Path,
    output: &Path,
    tables: &TagTables,
    options: &ConvertOptions,
) -> Result<BatchReport, ConvertError> {
    fs::create_dir_all(output).map_err(|e| ConvertError::io(output, e))?;

    let exports = discover_exports(input)?;
    if exports.is_empty() {
        tracing::warn!("no {METS_FILE_NAME} found below {}", input.display());
    }

    let mut report = BatchReport::default();
    let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();
    for mets in exports {
        let _export = tracing::info_span!("export", mets = %mets.display()).entered();
        match convert_to_file(&mets, output, tables, options) {
            Ok(done) => {
                if let Some(previous) = written.insert(done.output.clone(), mets.clone()) {
                    tracing::warn!(
                        "{} overwrites the output of {}",
                        done.output.display(),
                        previous.display()
                    );
                    report.overwritten.push(done.output.clone());
                }
                report.converted.push(done);
            }
            Err(err) => {
                tracing::error!("{err}");
                report.failed.push((mets, err));
            }
        }
    }
    Ok(report)
}
