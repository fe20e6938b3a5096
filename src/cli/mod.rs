//! CLI for the `frmdump` binary.
//!
//! The binary takes a single positional path to a `.frm` file, decodes it,
//! and prints the reconstructed DDL twice: once bare, once with a
//! comment-header banner. [`app::Cli`] is the clap derive struct parsed in
//! `main.rs`; [`dump`] does the actual read-decode-render-print work behind
//! a `writer: &mut dyn Write` so tests can capture output without touching
//! stdout.
//!
//! The `wprintln!` macro wraps `writeln!` to convert `io::Error` into
//! `FrmError`.

pub mod app;
pub mod dump;

/// Write a line to the given writer, converting io::Error to FrmError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::FrmError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::FrmError::Io(e.to_string()))
    };
}

pub(crate) use wprintln;
