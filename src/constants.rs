//! MySQL internal type codes, legacy storage-engine ids, and the flag
//! bitsets used throughout `.frm` decoding.
//!
//! Values and bit positions are taken from MySQL's `sql/field.h`,
//! `sql/handler.h`, and `my_base.h` (the headers that defined the wire
//! format these files serialize).

use crate::FrmError;

// ── Field type codes (sql/field.h enum_field_types) ──

/// MySQL internal column type code, as stored at metadata offset `+13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MySQLType {
    Decimal,
    Tiny,
    Short,
    Long,
    Float,
    Double,
    Null,
    Timestamp,
    LongLong,
    Int24,
    Date,
    Time,
    DateTime,
    Year,
    NewDate,
    VarChar,
    Bit,
    Timestamp2,
    DateTime2,
    Time2,
    Json,
    NewDecimal,
    Enum,
    Set,
    TinyBlob,
    MediumBlob,
    LongBlob,
    Blob,
    VarString,
    String,
    Geometry,
}

impl MySQLType {
    pub fn from_code(code: u8) -> Result<Self, FrmError> {
        use MySQLType::*;
        Ok(match code {
            0 => Decimal,
            1 => Tiny,
            2 => Short,
            3 => Long,
            4 => Float,
            5 => Double,
            6 => Null,
            7 => Timestamp,
            8 => LongLong,
            9 => Int24,
            10 => Date,
            11 => Time,
            12 => DateTime,
            13 => Year,
            14 => NewDate,
            15 => VarChar,
            16 => Bit,
            17 => Timestamp2,
            18 => DateTime2,
            19 => Time2,
            245 => Json,
            246 => NewDecimal,
            247 => Enum,
            248 => Set,
            249 => TinyBlob,
            250 => MediumBlob,
            251 => LongBlob,
            252 => Blob,
            253 => VarString,
            254 => String,
            255 => Geometry,
            other => return Err(FrmError::UnknownType(other)),
        })
    }

    /// The bare type-name prefix used in rendered DDL (before any
    /// `(length[,scale])` suffix).
    pub fn name_prefix(self) -> &'static str {
        use MySQLType::*;
        match self {
            Decimal | NewDecimal => "decimal",
            Tiny => "tinyint",
            Short => "smallint",
            Long => "int",
            Float => "float",
            Double => "double",
            Null => "null",
            Timestamp | Timestamp2 => "timestamp",
            LongLong => "bigint",
            Int24 => "mediumint",
            Date | NewDate => "date",
            Time | Time2 => "time",
            DateTime | DateTime2 => "datetime",
            Year => "year",
            // VarChar/VarString are rendered as "var" + {"char","binary"}
            // depending on charset (see table::column); String the same
            // without the "var" prefix, i.e. plain "char"/"binary".
            VarChar => "var",
            Bit => "bit",
            Json => "json",
            Enum => "enum",
            Set => "set",
            TinyBlob => "tiny",
            MediumBlob => "medium",
            LongBlob => "long",
            Blob => "",
            VarString => "var",
            String => "",
            Geometry => "geometry",
        }
    }

    /// Index key-prefix policy: whether an index part on this column type
    /// may, must, or must never carry an explicit prefix length.
    pub fn key_prefix(self) -> KeyPrefix {
        use MySQLType::*;
        match self {
            VarChar | VarString | String => KeyPrefix::Maybe,
            TinyBlob | MediumBlob | LongBlob | Blob | Geometry => KeyPrefix::Always,
            _ => KeyPrefix::None,
        }
    }
}

/// Index key-part prefix-length policy for a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    None,
    Maybe,
    Always,
}

// ── Legacy storage-engine type codes (frm_file_info +0x03) ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyDbType(pub u8);

impl LegacyDbType {
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "UNKNOWN",
            1 => "DIAB_ISAM",
            2 => "HASH",
            3 => "MISAM",
            4 => "PISAM",
            5 => "RMS_ISAM",
            6 => "HEAP",
            7 => "ISAM",
            8 => "MRG_ISAM",
            9 => "MyISAM",
            10 => "MRG_MYISAM",
            11 => "BERKELEYDB",
            12 => "InnoDB",
            13 => "GEMINI",
            14 => "NDBCLUSTER",
            15 => "EXAMPLE_DB",
            16 => "ARCHIVE_DB",
            17 => "CSV",
            18 => "FEDERATED",
            19 => "BLACKHOLE",
            20 => "PARTITION_DB",
            21 => "BINLOG",
            22 => "SOLID",
            23 => "PBXT",
            24 => "TABLE_FUNCTION",
            25 => "MEMCACHE",
            26 => "FALCON",
            27 => "MARIA",
            28 => "PERFORMANCE_SCHEMA",
            42 => "FIRST_DYNAMIC",
            127 => "DEFAULT",
            _ => "UNKNOWN",
        }
    }
}

// ── Field flags (sql/field.h, the FIELDFLAG_* family) ──

/// Bitset of column-metadata flags stored at offset `+8` of a column's
/// 17-byte metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFlag(pub u16);

impl FieldFlag {
    pub const DECIMAL: u16 = 1;
    /// Alias of `DECIMAL`: on integer types this bit is the *signed*
    /// marker (clear = signed, set = unsigned), reusing the same bit
    /// position the decimal type uses for something unrelated.
    pub const UNSIGNED: u16 = 1;
    pub const NUMBER: u16 = 2;
    pub const ZEROFILL: u16 = 4;
    pub const PACK: u16 = 120;
    pub const INTERVAL: u16 = 256;
    pub const BITFIELD: u16 = 512;
    pub const BLOB: u16 = 1024;
    pub const GEOM: u16 = 2048;
    pub const JSON: u16 = 4096;
    pub const TREAT_BIT_AS_CHAR: u16 = 4096;
    pub const NO_DEFAULT: u16 = 16384;
    pub const MAYBE_NULL: u16 = 32768;
    pub const HEX_ESCAPE: u32 = 0x10000;
    pub const DEC_SHIFT: u16 = 8;
    pub const MAX_DEC: u16 = 31;

    pub fn has(self, bit: u16) -> bool {
        self.0 & bit != 0
    }

    /// `scale := (flags >> FF_DEC_SHIFT) & FF_MAX_DEC`.
    pub fn scale(self) -> u8 {
        ((self.0 >> Self::DEC_SHIFT) & Self::MAX_DEC) as u8
    }
}

// ── Utype (unireg_check) ──

/// MySQL's internal "unireg_check" column-behaviour tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utype {
    None,
    Date,
    Shield,
    NoEmpty,
    CaseUp,
    Pnr,
    Bgnr,
    Pgnr,
    Yes,
    No,
    Rel,
    Check,
    Empty,
    UnknownField,
    CaseDn,
    NextNumber,
    IntervalField,
    BitField,
    TimestampOldField,
    Capitalize,
    BlobField,
    TimestampDnField,
    TimestampUnField,
    TimestampDnunField,
}

impl Utype {
    pub fn from_code(code: u8) -> Result<Self, FrmError> {
        use Utype::*;
        const VARIANTS: &[Utype] = &[
            None,
            Date,
            Shield,
            NoEmpty,
            CaseUp,
            Pnr,
            Bgnr,
            Pgnr,
            Yes,
            No,
            Rel,
            Check,
            Empty,
            UnknownField,
            CaseDn,
            NextNumber,
            IntervalField,
            BitField,
            TimestampOldField,
            Capitalize,
            BlobField,
            TimestampDnField,
            TimestampUnField,
            TimestampDnunField,
        ];
        VARIANTS
            .get(code as usize)
            .copied()
            .ok_or_else(|| FrmError::Unsupported(format!("unknown unireg_check code {}", code)))
    }
}

// ── Geometry sub-types (+14 when type code is GEOMETRY) ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Geometry,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub fn from_code(code: u8) -> Result<Self, FrmError> {
        use GeometryType::*;
        Ok(match code {
            0 => Geometry,
            1 => Point,
            2 => LineString,
            3 => Polygon,
            4 => MultiPoint,
            5 => MultiLineString,
            6 => MultiPolygon,
            7 => GeometryCollection,
            other => {
                return Err(FrmError::Unsupported(format!(
                    "unknown geometry sub-type {}",
                    other
                )))
            }
        })
    }

    pub fn name(self) -> &'static str {
        use GeometryType::*;
        match self {
            Geometry => "geometry",
            Point => "point",
            LineString => "linestring",
            Polygon => "polygon",
            MultiPoint => "multipoint",
            MultiLineString => "multilinestring",
            MultiPolygon => "multipolygon",
            GeometryCollection => "geometrycollection",
        }
    }
}

// ── Handler options (frm_file_info +0x1E, HA_OPTION_* in handler.h) ──

/// Bitset of table-level handler option flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerOption(pub u16);

impl HandlerOption {
    pub const PACK_RECORD: u16 = 1;
    pub const PACK_KEYS: u16 = 2;
    pub const COMPRESS_RECORD: u16 = 4;
    pub const LONG_BLOB_PTR: u16 = 8;
    pub const TMP_TABLE: u16 = 16;
    pub const CHECKSUM: u16 = 32;
    pub const DELAY_KEY_WRITE: u16 = 64;
    pub const NO_PACK_KEYS: u16 = 128;
    pub const CREATE_FROM_ENGINE: u16 = 256;
    pub const RELIES_ON_SQL_LAYER: u16 = 512;
    pub const NULL_FIELDS: u16 = 1024;
    pub const PAGE_CHECKSUM: u16 = 2048;
    pub const STATS_PERSISTENT: u16 = 4096;
    pub const NO_STATS_PERSISTENT: u16 = 8192;
    pub const TEMP_COMPRESS_RECORD: u16 = 16384;
    pub const READ_ONLY_DATA: u16 = 32768;

    pub fn has(self, bit: u16) -> bool {
        self.0 & bit != 0
    }
}

// ── Row formats (frm_file_info +0x28) ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowType(pub u8);

impl RowType {
    pub fn name(self) -> &'static str {
        // TokuDB remaps three codes to names that don't match their
        // nominal position in the iota sequence (sql/handler.h row_type).
        match self.0 {
            14 => "TOKUDB_ZLIB",
            12 => "TOKUDB_QUICKLZ",
            13 => "TOKUDB_LZMA",
            0 => "",
            1 => "FIXED",
            2 => "DYNAMIC",
            3 => "COMPRESSED",
            4 => "REDUNDANT",
            5 => "COMPACT",
            _ => "?",
        }
    }
}

// ── Key flags (my_base.h HA_*) ──

/// Bitset of per-key flags, XOR'd with `HA_NOSAME` on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HaKeyFlag(pub u16);

impl HaKeyFlag {
    pub const NOSAME: u16 = 1;
    pub const PACK_KEY: u16 = 2;
    pub const AUTO_KEY: u16 = 16;
    pub const BINARY_PACK_KEY: u16 = 32;
    pub const FULLTEXT: u16 = 128;
    pub const UNIQUE_CHECK: u16 = 256;
    pub const SPATIAL: u16 = 1024;
    pub const NULL_ARE_EQUAL: u16 = 2048;
    pub const USES_COMMENT: u16 = 4096;
    pub const GENERATED_KEY: u16 = 8192;
    pub const USES_PARSER: u16 = 16384;

    pub fn has(self, bit: u16) -> bool {
        self.0 & bit != 0
    }
}

/// Index algorithm, stored per-key at metadata offset `+5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HaKeyAlgo(pub u8);

impl HaKeyAlgo {
    pub const UNDEF: u8 = 0;
    pub const BTREE: u8 = 1;
    pub const RTREE: u8 = 2;
    pub const HASH: u8 = 3;
    pub const FULLTEXT: u8 = 4;

    pub fn name(self) -> &'static str {
        match self.0 {
            Self::UNDEF => "",
            Self::BTREE => "BTREE",
            Self::RTREE => "RTREE",
            Self::HASH => "HASH",
            Self::FULLTEXT => "FULLTEXT",
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_type_from_code_covers_extended_range() {
        assert_eq!(MySQLType::from_code(246).unwrap(), MySQLType::NewDecimal);
        assert_eq!(MySQLType::from_code(255).unwrap(), MySQLType::Geometry);
        assert!(MySQLType::from_code(240).is_err());
    }

    #[test]
    fn field_flag_scale_extraction() {
        // scale=3 packed at bits 8..13: 3 << 8 = 0x0300
        let flags = FieldFlag(0x0300 | FieldFlag::MAYBE_NULL);
        assert_eq!(flags.scale(), 3);
        assert!(flags.has(FieldFlag::MAYBE_NULL));
    }

    #[test]
    fn key_prefix_policy_matches_type() {
        assert_eq!(MySQLType::VarChar.key_prefix(), KeyPrefix::Maybe);
        assert_eq!(MySQLType::Blob.key_prefix(), KeyPrefix::Always);
        assert_eq!(MySQLType::Long.key_prefix(), KeyPrefix::None);
    }

    #[test]
    fn row_type_tokudb_remap() {
        assert_eq!(RowType(14).name(), "TOKUDB_ZLIB");
        assert_eq!(RowType(12).name(), "TOKUDB_QUICKLZ");
        assert_eq!(RowType(13).name(), "TOKUDB_LZMA");
    }
}
