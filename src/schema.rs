//! Front-end dispatch (C14): sniff the magic bytes and hand off to the
//! table or view decoder, wrapping the result in one tagged `Schema`.

use crate::table::Table;
use crate::view::View;
use crate::FrmError;

const TABLE_MAGIC: [u8; 2] = [0xFE, 0x01];
const VIEW_MAGIC: &[u8] = b"TYPE=VIEW";

/// The two `.frm` flavours, unified behind `render()`/`render_with_header()`.
#[derive(Debug, Clone)]
pub enum Schema {
    Table(Table),
    View(View),
}

impl Schema {
    pub fn render(&self) -> String {
        match self {
            Schema::Table(t) => t.render(),
            Schema::View(v) => v.render(),
        }
    }

    pub fn render_with_header(&self) -> String {
        match self {
            Schema::Table(t) => t.render_with_header(),
            Schema::View(v) => v.render_with_header(),
        }
    }
}

/// Dispatch on the first 9 bytes: `FE 01` is the table magic, ASCII
/// `TYPE=VIEW` is the view marker. Anything else is `InvalidFormat`.
pub fn parse(path: &str, data: &[u8]) -> Result<Schema, FrmError> {
    if data.len() < 9 {
        return Err(FrmError::Truncated(format!(
            "input too short to contain a format marker: need 9, have {}",
            data.len()
        )));
    }
    if data[0..2] == TABLE_MAGIC {
        Ok(Schema::Table(Table::decode(path, data)?))
    } else if &data[0..9] == VIEW_MAGIC {
        Ok(Schema::View(View::decode(path, data)?))
    } else {
        Err(FrmError::InvalidFormat(
            "missing table (FE 01) or view (TYPE=VIEW) magic".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_input() {
        assert!(matches!(parse("x.frm", b"short"), Err(FrmError::Truncated(_))));
    }

    #[test]
    fn rejects_unknown_magic() {
        let data = b"NOT A VALID FRM FILE HEADER AT ALL";
        assert!(matches!(parse("x.frm", data), Err(FrmError::InvalidFormat(_))));
    }

    #[test]
    fn dispatches_to_view_decoder() {
        let body = "select 1";
        let digest = format!("{:x}", md5::compute(body.as_bytes()));
        let data = format!("TYPE=VIEW\nquery={}\nmd5={}\n", body, digest);
        let schema = parse("v.frm", data.as_bytes()).unwrap();
        assert!(matches!(schema, Schema::View(_)));
    }
}
