//! Charset Transcoder: decode MySQL-charset-encoded bytes into UTF-8.
//!
//! MySQL's on-disk charset names don't line up 1:1 with `encoding_rs`
//! labels, and a couple (`utf8mb4`, `utf32`) need special handling, so this
//! module owns the mapping rather than exposing `encoding_rs` directly.
//!
//! Transcode failures are recovered locally by every caller (column
//! defaults and labels fall back to the raw bytes, lossily interpreted as
//! Latin-1, rather than aborting the whole parse) — see `decode_lossy`.

use encoding_rs::Encoding;

/// Decode `bytes` as `charset_name`, failing if the bytes are not valid in
/// that encoding.
pub fn decode(bytes: &[u8], charset_name: &str) -> Result<String, String> {
    match charset_name {
        "utf32" => decode_utf32_be(bytes),
        _ => {
            let enc = lookup(charset_name)
                .ok_or_else(|| format!("no transcoder for charset {:?}", charset_name))?;
            let (cow, _, had_errors) = enc.decode(bytes);
            if had_errors {
                Err(format!("invalid {} byte sequence", charset_name))
            } else {
                Ok(cow.into_owned())
            }
        }
    }
}

/// Decode `bytes` as `charset_name`, falling back to a lossy Latin-1
/// interpretation (one byte -> one codepoint, never fails) if the charset
/// is unknown or the bytes are invalid in it.
pub fn decode_lossy(bytes: &[u8], charset_name: &str) -> String {
    decode(bytes, charset_name).unwrap_or_else(|_| bytes.iter().map(|&b| b as char).collect())
}

fn lookup(charset_name: &str) -> Option<&'static Encoding> {
    match charset_name {
        "binary" | "ascii" => Some(encoding_rs::WINDOWS_1252),
        "utf8" | "utf8mb4" | "utf8mb3" => Some(encoding_rs::UTF_8),
        "latin1" => Some(encoding_rs::WINDOWS_1252),
        "gbk" => Some(encoding_rs::GBK),
        "big5" => Some(encoding_rs::BIG5),
        "ujis" | "eucjpms" => Some(encoding_rs::EUC_JP),
        "sjis" | "cp932" => Some(encoding_rs::SHIFT_JIS),
        "ucs2" | "utf16" => Some(encoding_rs::UTF_16BE),
        "koi8r" => Some(encoding_rs::KOI8_R),
        "greek" => Some(encoding_rs::ISO_8859_7),
        "hebrew" => Some(encoding_rs::WINDOWS_1255),
        "cp1251" => Some(encoding_rs::WINDOWS_1251),
        "cp1250" => Some(encoding_rs::WINDOWS_1250),
        "euckr" => Some(encoding_rs::EUC_KR),
        "gb2312" => Some(encoding_rs::GBK),
        "latin2" => Some(encoding_rs::ISO_8859_2),
        _ => None,
    }
}

fn decode_utf32_be(bytes: &[u8]) -> Result<String, String> {
    if bytes.len() % 4 != 0 {
        return Err("utf32 byte length not a multiple of 4".to_string());
    }
    let mut out = String::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        let cp = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let ch = char::from_u32(cp).ok_or_else(|| format!("invalid utf32 codepoint {:#x}", cp))?;
        out.push(ch);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_ascii() {
        assert_eq!(decode(b"hello", "utf8").unwrap(), "hello");
    }

    #[test]
    fn decodes_latin1_high_byte() {
        // 0xE9 in cp1252/latin1 is 'é'
        assert_eq!(decode(&[0xE9], "latin1").unwrap(), "\u{e9}");
    }

    #[test]
    fn decodes_utf32_be() {
        let bytes = [0x00, 0x00, 0x00, 0x41]; // 'A'
        assert_eq!(decode(&bytes, "utf32").unwrap(), "A");
    }

    #[test]
    fn unknown_charset_falls_back_lossy() {
        assert_eq!(decode_lossy(&[0x41, 0x42], "bogus"), "AB");
    }
}
