//! MySQL/MariaDB `.frm` metadata file decoder.
//!
//! `frmdump` (library name `frm`) reconstructs the `CREATE TABLE` or
//! `CREATE VIEW` statement that produced a `.frm` file. The format predates
//! MySQL 8.0's data dictionary: it is a dense, fixed-offset binary layout
//! with no self-describing schema, so every column type has its own
//! on-disk default-value encoding (two's-complement integers, IEEE floats,
//! packed-BCD decimals, packed time/datetime variants, charset-encoded
//! strings, enum/set bitmaps).
//!
//! # CLI Reference
//!
//! ```text
//! frmdump <path/to/table.frm>
//! ```
//!
//! Prints the reconstructed DDL twice: once bare, once preceded by a
//! header comment naming the table and the MySQL version that wrote it.
//!
//! # Library API
//!
//! ```toml
//! [dependencies]
//! frm = { package = "frmdump", version = "0.1" }
//! ```
//!
//! ## Quick example
//!
//! ```no_run
//! use frm::schema::parse;
//!
//! let bytes = std::fs::read("table.frm").unwrap();
//! let schema = parse("table.frm", &bytes).unwrap();
//! println!("{}", schema.render());
//! ```
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bytes`] | Bounds-checked little/big-endian integer reads, zero-fill |
//! | [`ident`] | MySQL filename <-> identifier `@xxxx` escape codec |
//! | [`charset`] | Charset Transcoder: MySQL charset name -> UTF-8 |
//! | [`collation`] | Collation id -> (charset, collation, maxlen, is_default) registry |
//! | [`constants`] | MySQL type codes, legacy db types, flag bitsets, enum name maps |
//! | [`table`] | Table-flavour decoder: FileInfo, FormInfo, columns, keys, options |
//! | [`view`] | View-flavour decoder: `key=value` text, MD5 validation |
//! | [`schema`] | Front-end dispatch and the `Schema` tagged union |
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | on | Builds the `frmdump` binary (adds `clap`, `colored`). |

pub mod bytes;
pub mod charset;
pub mod collation;
#[cfg(feature = "cli")]
pub mod cli;
pub mod constants;
pub mod ident;
pub mod schema;
pub mod table;
pub mod view;

use thiserror::Error;

/// Errors returned while decoding a `.frm` file.
#[derive(Error, Debug)]
pub enum FrmError {
    /// An I/O error occurred reading the input file (CLI only; the core
    /// decoder never performs I/O).
    #[error("I/O error: {0}")]
    Io(String),

    /// The input did not begin with the table or view magic.
    #[error("invalid .frm format: {0}")]
    InvalidFormat(String),

    /// A fixed read or derived region exceeded the input length.
    #[error("truncated .frm data: {0}")]
    Truncated(String),

    /// A collation id has no entry in the Collation Registry.
    #[error("unknown collation id: {0}")]
    UnknownCollation(u8),

    /// A MySQL type code is outside the supported set.
    #[error("unknown MySQL type code: {0}")]
    UnknownType(u8),

    /// An `@xxxx` escape sequence in a filename-derived identifier was malformed.
    #[error("malformed identifier: {0}")]
    BadIdentifier(String),

    /// An ENUM default index exceeded the column's declared label count.
    #[error("enum default out of range: {0}")]
    EnumOutOfRange(String),

    /// A default value is unsupported for this column type (BLOB, JSON,
    /// GEOMETRY, pre-4.1 DATE, or a TIME/DATETIME fractional scale > 6).
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A view's computed MD5 did not match its stored MD5.
    #[error("view checksum mismatch: {0}")]
    Mismatch(String),

    /// The key/index section's header counts are inconsistent with the
    /// region's byte length.
    #[error("malformed key section: {0}")]
    MalformedKeySection(String),
}
