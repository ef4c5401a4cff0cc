//! Generate conversion tables from charmap mapping files.

mod error;

use std::path::{Path, PathBuf};

use read_charmaps::{Charmap, ParseError};
use serde::Deserialize;
use write_charmaps::{compile, compile_encoder, CompileError, Table};

pub use error::ErrorReport;

/// Which table to build for a charmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    /// The extended ASCII table used to decode the legacy encoding.
    #[default]
    ExtendedAscii,
    /// The state machine used to encode Unicode back to the legacy encoding.
    Encoder,
}

/// A list of charmaps to compile, read from a toml file.
#[derive(Debug, Deserialize)]
pub struct CodegenPlan {
    #[serde(default)]
    pub charmap: Vec<CodegenOp>,
}

/// One charmap in a [`CodegenPlan`].
#[derive(Debug, Deserialize)]
pub struct CodegenOp {
    pub source: PathBuf,
    pub target: PathBuf,
    #[serde(default)]
    pub kind: OutputKind,
}

/// An error generating a single table.
#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
    Compile(CompileError),
}

impl Error {
    /// `true` if the charmap should be skipped with a warning.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Compile(e) if e.is_unsupported())
    }

    /// Convert to a diagnostic, labelling the source line for parse errors.
    pub fn into_report(self, path: &Path, text: String) -> ErrorReport {
        match self {
            Error::Parse(error) => ErrorReport::from_parse_error(&error, path, text),
            Error::Compile(error) => {
                ErrorReport::message(format!("{}: {error}", path.display()))
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(error) => error.fmt(f),
            Error::Compile(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl CodegenPlan {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Parse the contents of a mapping file and compile the requested table.
pub fn generate_table(text: &str, name: &str, kind: OutputKind) -> Result<Table, Error> {
    let charmap = Charmap::read_named(text, name).map_err(Error::Parse)?;
    let table = match kind {
        OutputKind::ExtendedAscii => compile(&charmap),
        OutputKind::Encoder => compile_encoder(&charmap),
    };
    table.map_err(Error::Compile)
}

/// Format bytes as rows of hex, sixteen to a line.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, row) in bytes.chunks(16).enumerate() {
        out.push_str(&format!("{:06x}:", i * 16));
        for byte in row {
            out.push_str(&format!(" {byte:02x}"));
        }
        out.push('\n');
    }
    out
}
