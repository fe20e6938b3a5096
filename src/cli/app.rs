use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "frmdump")]
#[command(about = "Reconstruct CREATE TABLE/CREATE VIEW DDL from a MySQL/MariaDB .frm file")]
#[command(version)]
pub struct Cli {
    /// Path to the .frm file to decode
    pub path: PathBuf,
}
