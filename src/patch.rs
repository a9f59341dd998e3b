use std::fmt;

use log::{debug, info};

use crate::app_search::SearchProperty;
use crate::database::Database;
use crate::error::Msi64Error;
use crate::reg_locator::RegLocator;

/// Outcome counts for one patch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PatchSummary {
    pub examined: u32,
    pub patched: u32,
    pub already_flagged: u32,
    pub missing: u32,
}

impl fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Examined {} search properties: {} patched, {} already 64-bit, {} missing",
            self.examined, self.patched, self.already_flagged, self.missing
        )
    }
}

/// Marks every 64-bit search property's locator row as a 64-bit locator.
///
/// All mutations happen inside one transaction committed at the end, so an
/// interrupted run leaves the package untouched. A search property whose
/// signature resolves to no locator row is reported and skipped; it never
/// aborts the run.
pub fn patch_package(db: &mut Database) -> Result<PatchSummary, Msi64Error> {
    let mut summary = PatchSummary::default();

    let tx = db.conn_mut().transaction()?;

    SearchProperty::for_each(&tx, |prop| {
        summary.examined += 1;

        if !prop.is_wide() {
            return Ok(());
        }

        match RegLocator::get_by_signature(&tx, prop.signature())? {
            None => {
                println!(
                    "Unable to find {} entry in RegLocator table",
                    prop.property()
                );
                summary.missing += 1;
            }
            Some(mut locator) => {
                if locator.is_wide() {
                    debug!(
                        "{}: locator {} already 64-bit (type {})",
                        prop.property(),
                        locator.signature(),
                        locator.locator_type()
                    );
                    summary.already_flagged += 1;
                } else {
                    locator.add_wide_flag(&tx)?;
                    debug!(
                        "{}: marked locator {} 64-bit (type {})",
                        prop.property(),
                        locator.signature(),
                        locator.locator_type()
                    );
                    summary.patched += 1;
                }
            }
        }

        Ok(())
    })?;

    tx.commit()?;

    info!("{}", summary);
    Ok(summary)
}
