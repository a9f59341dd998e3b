use rusqlite::Error as RusqliteError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Msi64Error {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error), // Converts io::Error into Msi64Error automatically

    #[error("Database error: {0}")]
    DatabaseError(#[from] RusqliteError), // Converts rusqlite::Error automatically

    #[error("Can't find file {0}")]
    OpenError(String),

    #[error("Not a package database (no AppSearch table): {0}")]
    UnusablePackage(String),

    #[error("Error: {0}")]
    Error(String), // Allows custom application errors
}

impl Msi64Error {
    /// Process exit code reported for this error.
    ///
    /// Usage errors never reach here - clap exits with 2 on its own.
    pub fn exit_code(&self) -> i32 {
        match self {
            Msi64Error::OpenError(_) => 6,
            Msi64Error::UnusablePackage(_) => 5,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Msi64Error::OpenError("a.msi".into()).exit_code(), 6);
        assert_eq!(Msi64Error::UnusablePackage("a.msi".into()).exit_code(), 5);
        assert_eq!(Msi64Error::Error("boom".into()).exit_code(), 1);
        assert_eq!(
            Msi64Error::DatabaseError(rusqlite::Error::InvalidQuery).exit_code(),
            1
        );
    }

    #[test]
    fn test_open_error_message_names_the_file() {
        let err = Msi64Error::OpenError("product.msi".into());
        assert_eq!(format!("{}", err), "Can't find file product.msi");
    }
}
