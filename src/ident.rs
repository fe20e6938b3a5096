//! MySQL filename <-> identifier mapping.
//!
//! <https://dev.mysql.com/doc/refman/8.0/en/identifier-mapping.html>
//!
//! Non-ASCII and non-word characters in an identifier are written to disk
//! as `@xxxx`, four lowercase hex digits naming a Unicode code point in
//! `0x0001..=0xFFFF`. The basename of a `.frm` file (with the extension
//! stripped) is encoded this way, so recovering the original table/view
//! name requires reversing the mapping.

use crate::FrmError;

/// `path`'s basename minus the `.frm` extension, still filename-encoded
/// (callers run it through [`decode_filename`] to recover the identifier).
pub(crate) fn frm_stem(path: &str) -> String {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    base.strip_suffix(".frm").unwrap_or(base).to_string()
}

/// Decode a `.frm` basename back into the original identifier.
pub fn decode_filename(encoded: &str) -> Result<String, FrmError> {
    let mut parts = encoded.split('@');
    let mut decoded = parts.next().unwrap_or("").to_string();
    for part in parts {
        if part.len() < 4 {
            return Err(FrmError::BadIdentifier(format!(
                "segment too short for @xxxx escape: {:?}",
                part
            )));
        }
        let (hex_part, rest) = part.split_at(4);
        let codepoint = u32::from_str_radix(hex_part, 16).map_err(|_| {
            FrmError::BadIdentifier(format!("invalid hex escape: {:?}", hex_part))
        })?;
        let ch = char::from_u32(codepoint).ok_or_else(|| {
            FrmError::BadIdentifier(format!("escape is not a valid codepoint: {:04x}", codepoint))
        })?;
        decoded.push(ch);
        decoded.push_str(rest);
    }
    Ok(decoded)
}

/// Encode an identifier into MySQL's on-disk filename form.
pub fn encode_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push_str(&format!("@{:04x}", c as u32));
        }
    }
    out
}
