use clap::Parser;
use log::info;

use crate::database::Database;
use crate::error::Msi64Error;
use crate::patch;

#[derive(Parser, Debug)]
#[command(
    name = "msi64",
    version,
    about = "Marks 64-bit registry search locators in installer package databases"
)]
pub struct Cli {
    /// Path to the package database to patch
    pub package: String,
}

impl Cli {
    pub fn handle_command_line() -> Result<(), Msi64Error> {
        let args = Cli::parse();

        Self::patch_package(&args.package)
    }

    fn patch_package(path: &str) -> Result<(), Msi64Error> {
        let mut db = Database::open(path)?;
        info!("Patching package database at {}", db.path().display());

        let summary = patch::patch_package(&mut db)?;
        println!("{}", summary);

        Ok(())
    }
}
