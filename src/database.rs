use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

use crate::error::Msi64Error;

/// Read/write handle to a package database.
///
/// The database is externally owned - msi64 never creates it and never
/// creates or drops tables in it. Opening validates that the path names an
/// existing file and that the store actually carries an `AppSearch` table
/// before any mutation is attempted.
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    pub fn open(path_arg: &str) -> Result<Self, Msi64Error> {
        let path_arg = path_arg.trim();
        let path = Path::new(path_arg);

        if !path.is_file() {
            return Err(Msi64Error::OpenError(path_arg.to_owned()));
        }

        // Canonicalize using Dunce (de-UNC) to strip the "UNC" (e.g., \\?\C) on Windows
        let canonical_path = dunce::canonicalize(path)
            .map_err(|_| Msi64Error::OpenError(path_arg.to_owned()))?;

        // Open without SQLITE_OPEN_CREATE so a bad path can't leave an empty
        // database behind
        let conn = Connection::open_with_flags(
            &canonical_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE,
        )
        .map_err(|_| Msi64Error::OpenError(path_arg.to_owned()))?;

        let db = Database {
            conn,
            path: canonical_path,
        };
        db.ensure_package()?;

        Ok(db)
    }

    /// Confirms the opened store is a package database.
    ///
    /// SQLite opens lazily, so a corrupt or non-database file only fails on
    /// first query - that failure is still an open error. A database that
    /// reads fine but has no `AppSearch` table is a different condition: the
    /// handle is real but unusable for patching.
    fn ensure_package(&self) -> Result<(), Msi64Error> {
        let has_app_search: bool = self
            .conn()
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='AppSearch'",
                [],
                |row| row.get::<_, i32>(0),
            )
            .map(|count| count > 0)
            .map_err(|_| Msi64Error::OpenError(self.path.display().to_string()))?;

        if !has_app_search {
            return Err(Msi64Error::UnusablePackage(self.path.display().to_string()));
        }

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        Database {
            conn,
            path: PathBuf::from(":memory:"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_missing_file_is_open_error() {
        let result = Database::open("no-such-package.msi");
        assert!(matches!(result, Err(Msi64Error::OpenError(_))));
    }

    #[test]
    fn test_open_non_database_file_is_open_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a database at all").unwrap();

        let result = Database::open(file.path().to_str().unwrap());
        assert!(matches!(result, Err(Msi64Error::OpenError(_))));
    }

    #[test]
    fn test_open_database_without_app_search_is_unusable() {
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let conn = Connection::open(file.path()).unwrap();
            conn.execute("CREATE TABLE Property (Property TEXT, Value TEXT)", [])
                .unwrap();
        }

        let result = Database::open(file.path().to_str().unwrap());
        assert!(matches!(result, Err(Msi64Error::UnusablePackage(_))));
    }

    #[test]
    fn test_open_package_database() {
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let conn = Connection::open(file.path()).unwrap();
            conn.execute_batch(test_support::CREATE_PACKAGE_TABLES_SQL)
                .unwrap();
        }

        let db = Database::open(file.path().to_str().unwrap()).unwrap();
        assert!(db.path().is_absolute());
    }

    #[test]
    fn test_open_trims_path_argument() {
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let conn = Connection::open(file.path()).unwrap();
            conn.execute_batch(test_support::CREATE_PACKAGE_TABLES_SQL)
                .unwrap();
        }

        let padded = format!("  {}  ", file.path().display());
        assert!(Database::open(&padded).is_ok());
    }
}
