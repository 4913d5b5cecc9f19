//! Shared configuration loader for page2tei.
//!
//! `defaults/page-tei.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`PageTeiConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use page_tei::{ConvertError, ConvertOptions, NameTable, RankTable, TagTables};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/page-tei.default.toml");

/// Top-level configuration consumed by page2tei.
#[derive(Debug, Clone, Deserialize)]
pub struct PageTeiConfig {
    pub tags: TagsConfig,
    pub convert: ConvertConfig,
    pub output: OutputConfig,
}

/// Tag name conversion and deepness tables.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsConfig {
    #[serde(default)]
    pub names: Vec<NameMapping>,
    #[serde(default)]
    pub deepness: Vec<DeepnessEntry>,
    /// JSON name table replacing `names`
    #[serde(default)]
    pub names_file: Option<PathBuf>,
    /// JSON deepness table replacing `deepness`
    #[serde(default)]
    pub deepness_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameMapping {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeepnessEntry {
    pub name: String,
    pub rank: i64,
}

impl TagsConfig {
    pub fn name_table(&self) -> Result<NameTable, ConvertError> {
        match &self.names_file {
            Some(path) => NameTable::from_json_file(path),
            None => Ok(NameTable::new(
                self.names
                    .iter()
                    .map(|m| (m.source.clone(), m.target.clone()))
                    .collect::<HashMap<_, _>>(),
            )),
        }
    }

    pub fn rank_table(&self) -> Result<RankTable, ConvertError> {
        match &self.deepness_file {
            Some(path) => RankTable::from_json_file(path),
            None => Ok(RankTable::new(
                self.deepness
                    .iter()
                    .map(|d| (d.name.clone(), d.rank))
                    .collect::<HashMap<_, _>>(),
            )),
        }
    }

    /// Both tables, ready to be shared by a conversion run.
    pub fn tag_tables(&self) -> Result<TagTables, ConvertError> {
        Ok(TagTables::new(self.name_table()?, self.rank_table()?))
    }
}

/// Conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub ignore_warnings: bool,
    pub publisher: String,
    pub validate: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub extension: String,
}

impl PageTeiConfig {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::default()
            .with_publisher(self.convert.publisher.clone())
            .with_ignore_warnings(self.convert.ignore_warnings)
            .with_validate(self.convert.validate)
            .with_extension(self.output.extension.trim_start_matches('.'))
    }
}

/// Layers `page2tei.toml` files and command-line flags over the embedded
/// defaults.
///
/// Tag tables are arrays of tables, so a layer that sets `[[tags.names]]` or
/// `[[tags.deepness]]` replaces the whole table rather than merging entries.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from `defaults/page-tei.default.toml` (the Transkribus tables).
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a file named with `--config`; `build` fails if it is missing.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Layer a file that may be absent, such as `page2tei.toml` in the
    /// working directory.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `convert.ignore_warnings` or
    /// `tags.names_file`. Overrides win over every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers into a [`PageTeiConfig`]. JSON table files named in
    /// `tags` are not read here; see [`TagsConfig::tag_tables`].
    pub fn build(self) -> Result<PageTeiConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The shipped settings: Transkribus tag tables, `tranScriptorium` as
/// publisher, validation on.
pub fn load_defaults() -> Result<PageTeiConfig, ConfigError> {
    Loader::new().build()
}
