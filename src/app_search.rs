use rusqlite::Transaction;

use crate::error::Msi64Error;

/// Marker that tags a search property as targeting the 64-bit registry view.
const WIDE_MARKER: &str = "_X64";

/// One row of the package's `AppSearch` table. Read-only: the property name
/// drives the marker test and the signature links to the locator row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchProperty {
    property: String,
    signature: String,
}

impl SearchProperty {
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// True when the property name carries the 64-bit marker.
    ///
    /// A marker at position 0 does not count. The tool this replaces used a
    /// search primitive whose "found at the start" result was
    /// indistinguishable from "not found", so a property literally named
    /// "_X64" was never patched. Kept as-is.
    pub fn is_wide(&self) -> bool {
        matches!(self.property.find(WIDE_MARKER), Some(pos) if pos > 0)
    }

    /// One pass over every `AppSearch` row, in table order.
    pub fn for_each<F>(tx: &Transaction, mut func: F) -> Result<(), Msi64Error>
    where
        F: FnMut(&SearchProperty) -> Result<(), Msi64Error>,
    {
        let mut stmt = tx.prepare("SELECT Property, Signature_ FROM AppSearch")?;

        let rows = stmt.query_map([], |row| {
            Ok(SearchProperty {
                property: row.get::<_, String>(0)?,
                signature: row.get::<_, String>(1)?,
            })
        })?;

        for row in rows {
            let search_property = row?;
            func(&search_property)?;
        }

        Ok(())
    }
}
