//! Where schema definitions came from.

use std::path::Path;
use std::path::PathBuf;

/// A 1-based line and column within a schema source file.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FilePosition {
    pub file: PathBuf,
    pub line: usize,
    pub col: usize,
}

impl FilePosition {
    pub(crate) fn from_pos(file: impl AsRef<Path>, pos: graphql_parser::Pos) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            line: pos.line,
            col: pos.column,
        }
    }
}

impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.col)
    }
}

/// Either a position in loaded SDL, or a definition GraphQL provides
/// implicitly (`Int`, `@skip`, ...).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SchemaDefLocation {
    GraphQLBuiltIn,
    Schema(FilePosition),
}

impl From<FilePosition> for SchemaDefLocation {
    fn from(value: FilePosition) -> Self {
        Self::Schema(value)
    }
}

impl std::fmt::Display for SchemaDefLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphQLBuiltIn => f.write_str("<built-in>"),
            Self::Schema(pos) => pos.fmt(f),
        }
    }
}
