//! Error types for the notepad editor crate.
//!
//! Edit primitives never fail loudly: a rejected insert or delete hands back
//! the caller's coordinate unchanged. [`BufferError`] names the reason so it
//! can be logged. File I/O on the other hand is reported through
//! [`EditorError`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during editor operations.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The source file could not be opened or read.
    #[error("Cannot open '{}': {source}", .path.display())]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination file could not be created or written.
    #[error("Cannot write '{}': {source}", .path.display())]
    CannotWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file content is not valid UTF-8.
    #[error("'{}' is not valid UTF-8 text", .path.display())]
    InvalidEncoding { path: PathBuf },

    /// Save was requested for a document that has never been given a path.
    #[error("Document has no file path")]
    NoFilePath,
}

/// Reasons an edit primitive rejects its target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The target row does not exist.
    #[error("Row out of bounds: {row} (rows: {total})")]
    RowOutOfBounds { row: usize, total: usize },

    /// The target column lies past the end of the row.
    #[error("Column out of bounds: {column} (length: {length})")]
    ColumnOutOfBounds { column: usize, length: usize },

    /// An empty document only accepts its first character at the origin.
    #[error("Empty document only accepts edits at (0, 0), got ({column}, {row})")]
    NotAtOrigin { column: usize, row: usize },

    /// There is no character before the start of the document.
    #[error("Nothing to delete before the start of the document")]
    StartOfDocument,

    /// The character cannot be stored inside a row.
    #[error("Character {ch:?} cannot be stored in a row")]
    UnsupportedChar { ch: char },
}

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Result type alias for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;
