use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of a single extraction run.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("usage: go-extractor <file.go>")]
    Usage,

    #[error("cannot read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is {size} bytes, limit is {limit}", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("error parsing {}: syntax error at {line}:{column}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("cannot load Go grammar")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("error encoding JSON")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
