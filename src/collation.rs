//! Collation Registry: `id -> (charset_name, collation_name, maxlen, is_default)`.
//!
//! Collation ids are process-lifetime constants assigned by MySQL/MariaDB;
//! this table is not exhaustive of every collation ever shipped (MySQL
//! alone has grown to several hundred with the 8.0 `uca1400` family), but
//! covers every id documented for MySQL 5.0-5.7 and the MariaDB 10.x
//! series that reuses the same id space, which is the range `.frm` files
//! from those servers can reference. Unrecognised ids are a hard error
//! (`UnknownCollation`), never a silent guess.

use crate::FrmError;

/// A resolved collation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collation {
    pub id: u8,
    pub name: &'static str,
    pub charset_name: &'static str,
    pub maxlen: u8,
    pub is_default: bool,
}

macro_rules! c {
    ($id:expr, $name:expr, $charset:expr, $maxlen:expr, $default:expr) => {
        Collation {
            id: $id,
            name: $name,
            charset_name: $charset,
            maxlen: $maxlen,
            is_default: $default,
        }
    };
}

const TABLE: &[Collation] = &[
    c!(1, "big5_chinese_ci", "big5", 2, true),
    c!(3, "dec8_swedish_ci", "dec8", 1, true),
    c!(4, "cp850_general_ci", "cp850", 1, true),
    c!(5, "hp8_english_ci", "hp8", 1, true),
    c!(6, "koi8r_general_ci", "koi8r", 1, true),
    c!(7, "latin1_german1_ci", "latin1", 1, false),
    c!(8, "latin1_swedish_ci", "latin1", 1, true),
    c!(9, "latin2_general_ci", "latin2", 1, true),
    c!(10, "swe7_swedish_ci", "swe7", 1, true),
    c!(11, "ascii_general_ci", "ascii", 1, true),
    c!(12, "ujis_japanese_ci", "ujis", 3, true),
    c!(13, "sjis_japanese_ci", "sjis", 2, true),
    c!(14, "cp1251_bulgarian_ci", "cp1251", 1, false),
    c!(15, "latin1_danish_ci", "latin1", 1, false),
    c!(16, "hebrew_general_ci", "hebrew", 1, true),
    c!(18, "tis620_thai_ci", "tis620", 1, true),
    c!(19, "euckr_korean_ci", "euckr", 2, true),
    c!(20, "latin7_estonian_cs", "latin7", 1, false),
    c!(21, "latin2_hungarian_ci", "latin2", 1, false),
    c!(22, "koi8u_general_ci", "koi8u", 1, true),
    c!(23, "cp1251_ukrainian_ci", "cp1251", 1, false),
    c!(24, "gb2312_chinese_ci", "gb2312", 2, true),
    c!(25, "greek_general_ci", "greek", 1, true),
    c!(26, "cp1250_general_ci", "cp1250", 1, true),
    c!(27, "latin2_croatian_ci", "latin2", 1, false),
    c!(28, "gbk_chinese_ci", "gbk", 2, true),
    c!(30, "cp1257_lithuanian_ci", "cp1257", 1, false),
    c!(31, "latin5_turkish_ci", "latin5", 1, true),
    c!(32, "armscii8_general_ci", "armscii8", 1, true),
    c!(33, "utf8_general_ci", "utf8", 3, true),
    c!(35, "ucs2_general_ci", "ucs2", 2, true),
    c!(36, "cp866_general_ci", "cp866", 1, true),
    c!(37, "keybcs2_general_ci", "keybcs2", 1, true),
    c!(38, "macce_general_ci", "macce", 1, true),
    c!(39, "macroman_general_ci", "macroman", 1, true),
    c!(40, "cp852_general_ci", "cp852", 1, true),
    c!(41, "latin7_general_ci", "latin7", 1, true),
    c!(42, "latin7_general_cs", "latin7", 1, false),
    c!(43, "macce_bin", "macce", 1, false),
    c!(44, "cp1250_czech_cs", "cp1250", 1, false),
    c!(45, "utf8mb4_general_ci", "utf8mb4", 4, false),
    c!(46, "utf8mb4_bin", "utf8mb4", 4, false),
    c!(47, "latin1_bin", "latin1", 1, false),
    c!(48, "latin1_general_ci", "latin1", 1, false),
    c!(49, "latin1_general_cs", "latin1", 1, false),
    c!(50, "cp1251_general_ci", "cp1251", 1, true),
    c!(51, "cp1251_general_cs", "cp1251", 1, false),
    c!(52, "macce_general_mysql500_ci", "macce", 1, false),
    c!(57, "cp1256_general_ci", "cp1256", 1, true),
    c!(63, "binary", "binary", 1, true),
    c!(64, "armscii8_bin", "armscii8", 1, false),
    c!(65, "ascii_bin", "ascii", 1, false),
    c!(66, "cp1250_bin", "cp1250", 1, false),
    c!(67, "cp1256_bin", "cp1256", 1, false),
    c!(68, "cp1257_bin", "cp1257", 1, false),
    c!(69, "cp850_bin", "cp850", 1, false),
    c!(70, "cp852_bin", "cp852", 1, false),
    c!(71, "cp866_bin", "cp866", 1, false),
    c!(72, "dec8_bin", "dec8", 1, false),
    c!(73, "greek_bin", "greek", 1, false),
    c!(74, "hebrew_bin", "hebrew", 1, false),
    c!(75, "hp8_bin", "hp8", 1, false),
    c!(76, "keybcs2_bin", "keybcs2", 1, false),
    c!(77, "koi8r_bin", "koi8r", 1, false),
    c!(78, "koi8u_bin", "koi8u", 1, false),
    c!(80, "latin2_bin", "latin2", 1, false),
    c!(81, "latin5_bin", "latin5", 1, false),
    c!(82, "latin7_bin", "latin7", 1, false),
    c!(83, "utf8_bin", "utf8", 3, false),
    c!(84, "latin1_general_nopad_ci", "latin1", 1, false),
    c!(92, "tis620_bin", "tis620", 1, false),
    c!(99, "cp1256_general_ci", "cp1256", 1, false),
    c!(192, "utf8_unicode_ci", "utf8", 3, false),
    c!(193, "utf8_icelandic_ci", "utf8", 3, false),
    c!(195, "utf8_croatian_ci", "utf8", 3, false),
    c!(198, "utf8_persian_ci", "utf8", 3, false),
    c!(203, "gb2312_bin", "gb2312", 2, false),
    c!(219, "gbk_bin", "gbk", 2, false),
    c!(224, "utf8mb4_unicode_ci", "utf8mb4", 4, false),
    c!(246, "utf8mb4_croatian_ci", "utf8mb4", 4, false),
    c!(248, "gb18030_chinese_ci", "gb18030", 4, true),
    c!(249, "gb18030_bin", "gb18030", 4, false),
    c!(254, "utf8_general_cs", "utf8", 3, false),
    c!(255, "utf8mb4_0900_ai_ci", "utf8mb4", 4, false),
    c!(101, "ucs2_unicode_ci", "ucs2", 2, false),
    c!(90, "ucs2_general_mysql500_ci", "ucs2", 2, false),
    c!(56, "cp1257_general_ci", "cp1257", 1, true),
];

/// Look up a collation by its on-disk id.
pub fn lookup(id: u8) -> Result<&'static Collation, FrmError> {
    TABLE
        .iter()
        .find(|c| c.id == id)
        .ok_or(FrmError::UnknownCollation(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_collation_id_63() {
        let c = lookup(63).unwrap();
        assert_eq!(c.charset_name, "binary");
        assert!(c.is_default);
    }

    #[test]
    fn utf8mb4_bin_maxlen_four() {
        let c = lookup(46).unwrap();
        assert_eq!(c.maxlen, 4);
        assert_eq!(c.charset_name, "utf8mb4");
    }

    #[test]
    fn unknown_id_errors() {
        assert!(matches!(lookup(200), Err(FrmError::UnknownCollation(200))));
    }
}
