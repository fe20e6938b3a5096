#[cfg(not(feature = "cli"))]
compile_error!("The `frmdump` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::io::Write;
use std::process;

use frm::cli;
use frm::cli::app::Cli;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    if let Err(e) = cli::dump::execute(&cli.path, &mut stdout) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
