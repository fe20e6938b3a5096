use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::cli::wprintln;
use crate::schema;
use crate::FrmError;

/// Read and decode `path`, printing `render()` and `render_with_header()`
/// to `writer` per the CLI contract: a bare dump followed by a
/// header-annotated one.
pub fn execute(path: &Path, writer: &mut dyn Write) -> Result<(), FrmError> {
    let data = std::fs::read(path)
        .map_err(|e| FrmError::Io(format!("cannot read {}: {}", path.display(), e)))?;
    let path_str = path.to_string_lossy();
    let schema = schema::parse(&path_str, &data)?;

    wprintln!(writer, "{}", "====WITHOUT HEADER:".bold())?;
    wprintln!(writer, "{}", schema.render())?;
    wprintln!(writer, "{}", "====WITH HEADER:".bold())?;
    wprintln!(writer, "{}", schema.render_with_header())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_io_error_for_missing_file() {
        let mut out = Vec::new();
        let err = execute(Path::new("/nonexistent/path/table.frm"), &mut out).unwrap_err();
        assert!(matches!(err, FrmError::Io(_)));
    }
}
