use rusqlite::{named_params, OptionalExtension, Transaction};

use crate::error::Msi64Error;

/// msidbLocatorType64bit - the type flag marking a locator as 64-bit aware.
pub const LOCATOR_TYPE_64BIT: i64 = 16;

/// One row of the package's `RegLocator` table, keyed by signature.
/// The registry root/key/name columns are never touched, so only the
/// signature and the type column are fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegLocator {
    signature: String,
    locator_type: i64,
}

impl RegLocator {
    pub fn get_by_signature(
        tx: &Transaction,
        signature: &str,
    ) -> Result<Option<Self>, Msi64Error> {
        tx.query_row(
            "SELECT Signature_, Type FROM RegLocator WHERE Signature_ = ?",
            [signature],
            |row| {
                Ok(RegLocator {
                    signature: row.get(0)?,
                    locator_type: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(Msi64Error::DatabaseError)
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn locator_type(&self) -> i64 {
        self.locator_type
    }

    /// Locator types already carrying the 64-bit flag are never touched.
    pub fn is_wide(&self) -> bool {
        self.locator_type >= LOCATOR_TYPE_64BIT
    }

    /// Adds the 64-bit flag to the stored locator type.
    ///
    /// Callers check [`RegLocator::is_wide`] first; plain addition is safe
    /// because every unflagged type value is below the flag bit.
    pub fn add_wide_flag(&mut self, tx: &Transaction) -> Result<(), Msi64Error> {
        let new_type = self.locator_type + LOCATOR_TYPE_64BIT;

        tx.execute(
            "UPDATE RegLocator
             SET Type = :locator_type
             WHERE Signature_ = :signature",
            named_params! {
                ":locator_type": new_type,
                ":signature":    self.signature,
            },
        )?;

        self.locator_type = new_type;
        Ok(())
    }
}
