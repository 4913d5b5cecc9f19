//! Shared helpers for the integration tests.

use page_tei::{NameTable, RankTable, TagTables};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Path of a file below `tests/fixtures`.
pub fn fixture(relative: impl AsRef<Path>) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// The tables page2tei ships as defaults.
pub fn transkribus_tables() -> TagTables {
    let names = [
        ("textStyle", "hi"),
        ("abbrev", "choice"),
        ("sic", "choice"),
        ("person", "persName"),
        ("place", "placeName"),
        ("organization", "orgName"),
    ];
    let ranks = [
        ("textStyle", 1),
        ("abbrev", 2),
        ("sic", 2),
        ("date", 3),
        ("person", 4),
        ("place", 4),
        ("organization", 4),
    ];
    TagTables::new(
        NameTable::new(
            names
                .iter()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect::<HashMap<_, _>>(),
        ),
        RankTable::new(
            ranks
                .iter()
                .map(|(n, r)| (n.to_string(), *r))
                .collect::<HashMap<_, _>>(),
        ),
    )
}

/// Tables with the given ranks and no name conversion.
pub fn ranked_tables(ranks: &[(&str, i64)]) -> TagTables {
    TagTables::new(
        NameTable::default(),
        RankTable::new(
            ranks
                .iter()
                .map(|(n, r)| (n.to_string(), *r))
                .collect::<HashMap<_, _>>(),
        ),
    )
}
