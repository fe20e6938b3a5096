//! Column decoder (C10): the per-column metadata record and the
//! per-MySQL-type default-value decoder. This is the largest and most
//! fiddly component — every column type has its own on-disk default
//! encoding and its own rendering rules for the type name suffix.

use crate::bytes::{read_u24_be, read_u24_le, read_uint_be, read_uint_le, zfill, DIGITS_TO_BYTES};
use crate::charset;
use crate::collation::Collation;
use crate::constants::{FieldFlag, GeometryType, MySQLType, Utype};
use crate::table::region::{CommentsCursor, DefaultsCursor};
use crate::FrmError;

/// A decoded column: its fully-rendered type name and, if present, its
/// fully-rendered (already-quoted where applicable) default value.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub ordinal: u16,
    pub type_code: MySQLType,
    pub type_name: String,
    pub length: u16,
    pub flags: FieldFlag,
    pub utype: Utype,
    pub scale: u8,
    pub sub_type: Option<GeometryType>,
    pub collation: &'static Collation,
    pub default: Option<String>,
    pub labels: Option<Vec<String>>,
    pub comment: String,
}

impl Column {
    /// Render this column's line inside the `CREATE TABLE` body, e.g.
    /// `` `id` int(11) NOT NULL AUTO_INCREMENT ``.
    pub fn render(&self) -> String {
        let mut out = format!("`{}` {}", self.name.replace('`', "``"), self.type_name);
        if let Some(default) = &self.default {
            out.push_str(" DEFAULT ");
            out.push_str(default);
        }
        if !self.comment.is_empty() {
            out.push_str(&format!(" COMMENT '{}'", self.comment.replace('\'', "\\'")));
        }
        out
    }
}

/// Per-column decode inputs that don't change across the column sequence.
pub struct ColumnContext<'a> {
    pub table_collation: &'static Collation,
    pub null_bitmap: &'a [u8],
    pub labels_groups: &'a [Vec<Vec<u8>>],
}

/// Decode one column's 17-byte metadata record, threading the shared
/// `null_bit` cursor explicitly across the whole column sequence (each
/// maybe-null column consumes exactly one bit, in declaration order).
pub fn decode(
    name: String,
    ordinal: u16,
    metadata: &[u8],
    ctx: &ColumnContext,
    null_bit: &mut u32,
    comments: &mut CommentsCursor,
    defaults: &mut DefaultsCursor,
) -> Result<Column, FrmError> {
    if metadata.len() < 17 {
        return Err(FrmError::Truncated(format!(
            "column metadata record: need 17 bytes, have {}",
            metadata.len()
        )));
    }
    let length = read_uint_le(&metadata[3..5], 2)? as u16;
    let defaults_offset_hint = read_u24_le(&metadata[5..8])?.wrapping_sub(1);
    let flags = FieldFlag(read_uint_le(&metadata[8..10], 2)? as u16);
    let utype = Utype::from_code(metadata[10])?;
    let type_code = MySQLType::from_code(metadata[13])?;

    let (collation, sub_type) = if type_code == MySQLType::Geometry {
        (
            crate::collation::lookup(63)?,
            Some(GeometryType::from_code(metadata[14])?),
        )
    } else {
        let id = ((metadata[11] as u16) << 8 | metadata[14] as u16) as u8;
        (crate::collation::lookup(id)?, None)
    };

    let labels = if matches!(type_code, MySQLType::Enum | MySQLType::Set) {
        let label_id = metadata[12] as i32 - 1;
        if label_id >= 0 {
            ctx.labels_groups
                .get(label_id as usize)
                .map(|group| {
                    group
                        .iter()
                        .map(|raw| charset::decode_lossy(raw, collation.charset_name))
                        .collect()
                })
        } else {
            None
        }
    } else {
        None
    };

    defaults.seek(defaults_offset_hint);

    let comment_length = read_uint_le(&metadata[15..17], 2)? as u32;

    let mut column = Column {
        name,
        ordinal,
        type_code,
        type_name: String::new(),
        length,
        flags,
        utype,
        scale: flags.scale(),
        sub_type,
        collation,
        default: None,
        labels,
        comment: String::new(),
    };

    let has_default = has_defaults(&column, ctx.null_bitmap, null_bit);
    decode_types(&mut column, ctx.table_collation, defaults, has_default)?;

    let comment_bytes = comments.next(comment_length)?;
    column.comment = charset::decode_lossy(comment_bytes, collation.charset_name);

    Ok(column)
}

/// Whether this column has a stored default to decode, per the presence
/// rule in the invariants: `FF_NO_DEFAULT` unset, not an auto-increment
/// column, and (for maybe-null columns) its null-bit is clear. A set
/// null-bit means the default is the literal `NULL` instead.
fn has_defaults(column: &mut Column, null_bitmap: &[u8], null_bit: &mut u32) -> bool {
    if column.flags.has(FieldFlag::NO_DEFAULT) || column.utype == Utype::NextNumber {
        return false;
    }
    if column.flags.has(FieldFlag::MAYBE_NULL) {
        let bit = *null_bit;
        let byte = null_bitmap.get((bit / 8) as usize).copied().unwrap_or(0);
        let is_null = byte & (1 << (bit % 8)) != 0;
        *null_bit += 1;
        if is_null && column.utype != Utype::BlobField {
            column.default = Some("NULL".to_string());
            return false;
        }
    }
    column.utype != Utype::BlobField
}

fn format_charset(column: &mut Column, table_collation: &'static Collation) {
    if column.collation.id != table_collation.id && column.collation.charset_name != "binary" {
        column
            .type_name
            .push_str(&format!(" CHARACTER SET {}", column.collation.charset_name));
    }
    if !column.collation.is_default {
        column
            .type_name
            .push_str(&format!(" COLLATE {}", column.collation.name));
    }
}

fn decode_types(
    column: &mut Column,
    table_collation: &'static Collation,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    use MySQLType::*;
    column.type_name = column.type_code.name_prefix().to_string();
    match column.type_code {
        Decimal | NewDecimal => decode_decimal(column, defaults, has_default)?,
        Tiny | Short | Long | LongLong | Int24 => decode_integer(column, defaults, has_default)?,
        Float | Double => decode_real(column, defaults, has_default)?,
        String | VarString | VarChar => decode_chars(column, table_collation, defaults, has_default)?,
        Enum => decode_enum(column, table_collation, defaults, has_default)?,
        Set => decode_set(column, table_collation, defaults, has_default)?,
        Json => decode_json(column, has_default)?,
        TinyBlob | MediumBlob | LongBlob | Blob => decode_blob(column, table_collation, has_default)?,
        Bit => decode_bit(column, defaults, has_default)?,
        Time | Time2 => decode_time(column, defaults, has_default)?,
        Timestamp | Timestamp2 => decode_timestamp(column, defaults, has_default)?,
        DateTime | DateTime2 => decode_datetime(column, defaults, has_default)?,
        Year => decode_year(column, defaults, has_default)?,
        Date | NewDate => decode_date(column, defaults, has_default)?,
        Geometry => decode_geometry(column, has_default)?,
        Null => {}
    }
    if !column.flags.has(FieldFlag::MAYBE_NULL) {
        column.type_name.push_str(" NOT NULL");
    }
    if column.utype == Utype::NextNumber {
        column.type_name.push_str(" AUTO_INCREMENT");
    }
    Ok(())
}

// ── DECIMAL / NEWDECIMAL ──

fn decode_decimal(
    column: &mut Column,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    let mut precision = column.length;
    if column.scale != 0 {
        precision = precision.wrapping_sub(1);
    }
    if precision != 0 {
        precision = precision.wrapping_sub(1);
    }
    column
        .type_name
        .push_str(&format!("({},{})", precision, column.scale));
    if !has_default {
        return Ok(());
    }
    let data = defaults.remaining();
    if column.type_code == MySQLType::Decimal {
        if data.len() < column.length as usize {
            return Err(FrmError::Truncated("DECIMAL default".to_string()));
        }
        let raw = &data[..column.length as usize];
        column.default = Some(format!("'{}'", String::from_utf8_lossy(raw)));
        return Ok(());
    }
    column.default = Some(decode_newdecimal_default(data, precision, column.scale)?);
    Ok(())
}

fn decode_newdecimal_default(data: &[u8], precision: u16, scale: u8) -> Result<String, FrmError> {
    let (int_length, frac_length) = calculate_decimal_lengths(precision as i32, scale as i32);
    let total = int_length + frac_length;
    if data.len() < total {
        return Err(FrmError::Truncated("NEWDECIMAL default".to_string()));
    }
    let mut buf = data[..total].to_vec();
    let negative = buf[0] & 0x80 == 0;
    buf[0] ^= 0x80;

    let mut out = String::from("'");
    if negative {
        out.push('-');
    }
    if int_length > 0 {
        let integer_part = decode_decimal_groups(&buf[..int_length], negative);
        let trimmed = integer_part.trim_start_matches('0');
        out.push_str(if trimmed.is_empty() { "0" } else { trimmed });
    } else {
        out.push('0');
    }
    if frac_length > 0 {
        let frac_part = decode_decimal_groups(&buf[buf.len() - frac_length..], negative);
        out.push('.');
        out.push_str(&zfill(&frac_part, scale as usize));
    }
    out.push('\'');
    Ok(out)
}

fn calculate_decimal_lengths(precision: i32, scale: i32) -> (usize, usize) {
    let int_digits = precision - scale;
    let int_length = (int_digits / 9) as usize * 4 + DIGITS_TO_BYTES[(int_digits % 9) as usize];
    let frac_length = (scale / 9) as usize * 4 + DIGITS_TO_BYTES[(scale % 9) as usize];
    (int_length, frac_length)
}

/// Decode a run of bytes as concatenated big-endian 9-digit decimal
/// groups. Mirrors the source encoding exactly: a short trailing group is
/// zero- (or `0xFF`-, if inverting) padded up to 4 bytes, and each group's
/// digits are emitted without zero-filling to 9 digits — only the
/// assembled integer part's leading zeros are stripped by the caller.
fn decode_decimal_groups(data: &[u8], invert: bool) -> String {
    let modcheck = data.len() % 4;
    let padded;
    let data = if modcheck != 0 {
        let pad = 4 - modcheck;
        let pad_char = if invert { 0xFFu8 } else { 0x00u8 };
        let mut v = data[..data.len() - modcheck].to_vec();
        v.extend(std::iter::repeat(pad_char).take(pad));
        v.extend_from_slice(&data[data.len() - modcheck..]);
        padded = v;
        &padded[..]
    } else {
        data
    };
    let mut parts = Vec::new();
    for chunk in data.chunks_exact(4) {
        let mut num = i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        if invert {
            num = !num;
        }
        parts.push(num.to_string());
    }
    parts.join("")
}

// ── TINY / SHORT / INT24 / LONG / LONGLONG ──

fn decode_integer(
    column: &mut Column,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    if column.length > 0 {
        column.type_name.push_str(&format!("({})", column.length));
    }
    let is_signed = column.flags.has(FieldFlag::DECIMAL);
    if !is_signed {
        column.type_name.push_str(" unsigned");
    }
    if column.flags.has(FieldFlag::ZEROFILL) {
        column.type_name.push_str(" zerofill");
    }
    if !has_default {
        return Ok(());
    }
    let data = defaults.remaining();
    let rendered = match column.type_code {
        MySQLType::Tiny => {
            if data.is_empty() {
                return Err(FrmError::Truncated("TINY default".to_string()));
            }
            if is_signed {
                (data[0] as i8).to_string()
            } else {
                data[0].to_string()
            }
        }
        MySQLType::Short => {
            let v = read_uint_le(data, 2)?;
            if is_signed {
                (v as u16 as i16).to_string()
            } else {
                (v as u16).to_string()
            }
        }
        MySQLType::Int24 => {
            let v = read_u24_le(data)?;
            if is_signed {
                sign_extend_i24(v).to_string()
            } else {
                v.to_string()
            }
        }
        MySQLType::Long => {
            let v = read_uint_le(data, 4)?;
            if is_signed {
                (v as u32 as i32).to_string()
            } else {
                (v as u32).to_string()
            }
        }
        MySQLType::LongLong => {
            let v = read_uint_le(data, 8)?;
            if is_signed {
                (v as i64).to_string()
            } else {
                v.to_string()
            }
        }
        other => {
            return Err(FrmError::Unsupported(format!(
                "{:?} is not an integer type",
                other
            )))
        }
    };
    column.default = Some(format!("'{}'", rendered));
    Ok(())
}

fn sign_extend_i24(v: u32) -> i32 {
    if v & 0x0080_0000 != 0 {
        (v | 0xFF00_0000) as i32
    } else {
        v as i32
    }
}

// ── FLOAT / DOUBLE ──

fn decode_real(
    column: &mut Column,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    if (column.scale as u16) < FieldFlag::MAX_DEC {
        column
            .type_name
            .push_str(&format!("({},{})", column.length, column.scale));
    }
    let is_signed = column.flags.has(FieldFlag::DECIMAL);
    if !is_signed {
        column.type_name.push_str(" unsigned");
    }
    if column.flags.has(FieldFlag::ZEROFILL) {
        column.type_name.push_str(" zerofill");
    }
    if !has_default {
        return Ok(());
    }
    let data = defaults.remaining();
    let value: f64 = match column.type_code {
        MySQLType::Float => {
            if data.len() < 4 {
                return Err(FrmError::Truncated("FLOAT default".to_string()));
            }
            f32::from_le_bytes([data[0], data[1], data[2], data[3]]) as f64
        }
        MySQLType::Double => {
            if data.len() < 8 {
                return Err(FrmError::Truncated("DOUBLE default".to_string()));
            }
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(&data[..8]);
            f64::from_le_bytes(bytes)
        }
        other => return Err(FrmError::Unsupported(format!("{:?} is not real", other))),
    };
    let rendered = if column.scale as u16 >= FieldFlag::MAX_DEC {
        format_g(value, 6)
    } else {
        let max_scale = (column.length as usize).min(16).max(1);
        let formatted = format_g(value, max_scale);
        match formatted.split_once('.') {
            Some((int_part, dec_part)) => {
                if column.scale > 0 {
                    format!("{}.{}", int_part, pad_right_zeros(dec_part, column.scale as usize))
                } else {
                    int_part.to_string()
                }
            }
            None if column.scale > 0 => {
                format!("{}.{}", formatted, "0".repeat(column.scale as usize))
            }
            None => formatted,
        }
    };
    column.default = Some(format!("'{}'", rendered));
    Ok(())
}

/// Render `value` the way `%.*g` (shortest of `%e`/`%f` at `precision`
/// significant digits, trailing fractional zeros stripped) would.
fn format_g(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp_str) = sci.split_once('e').expect("exp format always has 'e'");
    let exponent: i32 = exp_str.parse().expect("exponent is a valid integer");
    if exponent < -4 || exponent >= precision as i32 {
        let mantissa = trim_trailing_zeros(mantissa);
        format!(
            "{}e{}{:02}",
            mantissa,
            if exponent < 0 { "-" } else { "+" },
            exponent.abs()
        )
    } else {
        let digits = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_trailing_zeros(&format!("{:.*}", digits, value))
    }
}

fn trim_trailing_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Pad `s` with trailing `'0'` until it is at least `width` characters
/// long -- the mirror of [`zfill`], which pads on the left.
fn pad_right_zeros(s: &str, width: usize) -> String {
    if s.len() >= width {
        s.to_string()
    } else {
        let mut out = s.to_string();
        out.push_str(&"0".repeat(width - s.len()));
        out
    }
}

// ── STRING / VAR_STRING / VARCHAR ──

fn decode_chars(
    column: &mut Column,
    table_collation: &'static Collation,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    let is_binary = column.collation.charset_name == "binary";
    column
        .type_name
        .push_str(if is_binary { "binary" } else { "char" });
    column.type_name.push_str(&format!(
        "({})",
        column.length / column.collation.maxlen as u16
    ));
    format_charset(column, table_collation);
    if !has_default {
        return Ok(());
    }
    let data = defaults.remaining();
    let raw: &[u8] = match column.type_code {
        MySQLType::String | MySQLType::VarString => {
            if data.len() < column.length as usize {
                return Err(FrmError::Truncated("CHAR/VARCHAR(4.1) default".to_string()));
            }
            &data[..column.length as usize]
        }
        MySQLType::VarChar => {
            let (len, prefix) = if column.length < 256 {
                (*data.first().unwrap_or(&0) as usize, 1)
            } else {
                (read_uint_le(data, 2)? as usize, 2)
            };
            if data.len() < prefix + len {
                return Err(FrmError::Truncated("VARCHAR default".to_string()));
            }
            &data[prefix..prefix + len]
        }
        other => return Err(FrmError::Unsupported(format!("{:?} is not chars", other))),
    };
    let decoded = if is_binary && column.type_code != MySQLType::VarString {
        raw.iter()
            .map(|&b| {
                if b == 0 {
                    "\\0".to_string()
                } else {
                    (b as char).to_string()
                }
            })
            .collect::<String>()
    } else {
        charset::decode_lossy(raw, column.collation.charset_name)
    };
    column.default = Some(format!("'{}'", decoded.trim_end_matches(' ')));
    Ok(())
}

// ── ENUM / SET ──

fn decode_enum(
    column: &mut Column,
    table_collation: &'static Collation,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    let labels = column.labels.clone().unwrap_or_default();
    column
        .type_name
        .push_str(&format!("({})", quote_labels(&labels)));
    format_charset(column, table_collation);
    if !has_default {
        return Ok(());
    }
    let data = defaults.remaining();
    let raw = if labels.len() < 256 {
        *data.first().ok_or_else(|| FrmError::Truncated("ENUM default".to_string()))? as u16
    } else {
        read_uint_le(data, 2)? as u16
    };
    // Matches the source encoding's own wraparound: index 0 underflows to
    // u16::MAX, which then fails the range check below rather than being
    // treated as a NULL sentinel.
    let offset = raw.wrapping_sub(1) as usize;
    let label = labels.get(offset).ok_or_else(|| {
        FrmError::EnumOutOfRange(format!(
            "enum default offset {} out of range {}",
            offset,
            labels.len()
        ))
    })?;
    column.default = Some(format!("'{}'", label));
    Ok(())
}

fn decode_set(
    column: &mut Column,
    table_collation: &'static Collation,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    let labels = column.labels.clone().unwrap_or_default();
    column
        .type_name
        .push_str(&format!("({})", quote_labels(&labels)));
    format_charset(column, table_collation);
    if !has_default {
        return Ok(());
    }
    let n_bytes = {
        let n = (labels.len() + 7) / 8;
        if n > 4 {
            8
        } else {
            n
        }
    };
    let data = defaults.remaining();
    let bits = match n_bytes {
        1 | 2 | 4 | 8 => read_uint_le(data, n_bytes)?,
        3 => read_u24_le(data)? as u64,
        _ => {
            return Err(FrmError::Unsupported(
                "sets cannot have more than 64 elements".to_string(),
            ))
        }
    };
    let mut names = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        if bits & (1 << i) != 0 {
            names.push(label.clone());
        }
    }
    column.default = Some(format!("'{}'", names.join(",")));
    Ok(())
}

fn quote_labels(labels: &[String]) -> String {
    labels
        .iter()
        .map(|l| format!("'{}'", l))
        .collect::<Vec<_>>()
        .join(",")
}

// ── JSON / BLOB ──

fn decode_json(column: &mut Column, has_default: bool) -> Result<(), FrmError> {
    if has_default {
        return Err(FrmError::Unsupported("json default".to_string()));
    }
    column.default = Some("NULL".to_string());
    Ok(())
}

fn decode_blob(
    column: &mut Column,
    table_collation: &'static Collation,
    has_default: bool,
) -> Result<(), FrmError> {
    let is_binary = column.collation.charset_name == "binary";
    column
        .type_name
        .push_str(if is_binary { "blob" } else { "text" });
    format_charset(column, table_collation);
    if has_default {
        return Err(FrmError::Unsupported("blob default".to_string()));
    }
    Ok(())
}

// ── BIT ──

fn decode_bit(
    column: &mut Column,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    column.type_name.push_str(&format!("({})", column.length));
    if !has_default {
        return Ok(());
    }
    let n_bytes = ((column.length as usize) + 7) / 8;
    let data = defaults.remaining();
    if data.len() < n_bytes {
        return Err(FrmError::Truncated("BIT default".to_string()));
    }
    let mut padded = vec![0u8; 8 - n_bytes];
    padded.extend_from_slice(&data[..n_bytes]);
    let value = read_uint_be(&padded, 8)?;
    column.default = Some(format!("b'{:b}'", value));
    Ok(())
}

// ── TIME / TIME2 ──

const HIRES_TIME_BYTES: [usize; 7] = [3, 4, 4, 5, 5, 5, 6];
const TIME_MAX_VALUE_SECONDS: i64 = 838 * 3600 + 59 * 60 + 59;

fn decode_time(
    column: &mut Column,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    let scale = column.length as i32 - 10 - 1;
    if scale > 0 {
        column.type_name.push_str(&format!("({})", scale));
    }
    if !has_default {
        return Ok(());
    }
    let data = defaults.remaining();
    column.default = Some(if column.type_code == MySQLType::Time2 {
        decode_time2_default(data, scale.max(0) as usize)?
    } else if scale <= 0 {
        let v = read_u24_le(data)?;
        let h = v / 10000;
        let m = (v / 100) % 100;
        let s = v % 100;
        format!("'{:02}:{:02}:{:02}'", h, m, s)
    } else {
        decode_time_hires_default(data, scale as usize)?
    });
    Ok(())
}

fn decode_time_hires_default(data: &[u8], scale: usize) -> Result<String, FrmError> {
    if scale > 6 {
        return Err(FrmError::Unsupported(format!(
            "TIME(N) scale {} exceeds 6",
            scale
        )));
    }
    let width = HIRES_TIME_BYTES[scale];
    let raw = read_uint_be(data, width)? as i64;
    let zero_point_micros = (TIME_MAX_VALUE_SECONDS + 1) * 1_000_000;
    let zero_point = sec_part_shift(zero_point_micros, scale);
    let unshifted = raw - zero_point;
    let micros = sec_part_unshift(unshifted, scale);
    let negative = micros < 0;
    let mut micros = micros.unsigned_abs();
    let usec = micros % 1_000_000;
    micros /= 1_000_000;
    let sec = micros % 60;
    micros /= 60;
    let minute = micros % 60;
    let hour = micros / 60;
    let frac = zfill(&usec.to_string(), 6);
    let frac = &frac[..scale];
    Ok(format!(
        "'{}{:02}:{:02}:{:02}.{}'",
        if negative { "-" } else { "" },
        hour,
        minute,
        sec,
        frac
    ))
}

fn sec_part_shift(v: i64, digits: usize) -> i64 {
    v / 10i64.pow((6 - digits) as u32)
}

fn sec_part_unshift(v: i64, digits: usize) -> i64 {
    v * 10i64.pow((6 - digits) as u32)
}

fn decode_time2_default(data: &[u8], scale: usize) -> Result<String, FrmError> {
    if data.len() < 3 {
        return Err(FrmError::Truncated("TIME2 default".to_string()));
    }
    let negative = data[0] & 0x80 == 0;
    let mut hms = [0u8; 3];
    hms.copy_from_slice(&data[..3]);
    hms[0] = hms[0].wrapping_sub(0x80);
    let mut v = i32::from_be_bytes([0, hms[0], hms[1], hms[2]]);
    if negative {
        v = !v;
    }
    let hour = (v >> 12) & 0x3FF;
    let minute = (v >> 6) & 0x3F;
    let second = v & 0x3F;
    let mut out = format!("{}{:02}:{:02}:{:02}", if negative { "-" } else { "" }, hour, minute, second);
    if scale > 0 {
        let n_bytes = DIGITS_TO_BYTES[scale];
        if data.len() < 3 + n_bytes {
            return Err(FrmError::Truncated("TIME2 fractional part".to_string()));
        }
        let frac_raw = &data[3..3 + n_bytes];
        let pad_char = if negative { 0xFFu8 } else { 0x00u8 };
        let mut padded = vec![pad_char; 4 - n_bytes];
        padded.extend_from_slice(frac_raw);
        let frac_value = i32::from_be_bytes([padded[0], padded[1], padded[2], padded[3]]);
        let frac = frac_value.unsigned_abs();
        let frac_str = zfill(&frac.to_string(), scale);
        out.push('.');
        out.push_str(&frac_str[..scale.min(frac_str.len())]);
    }
    Ok(format!("'{}'", out))
}

// ── TIMESTAMP / TIMESTAMP2 ──

fn decode_timestamp(
    column: &mut Column,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    let scale = column.length as i32 - 19 - 1;
    if scale > 0 {
        column.type_name.push_str(&format!("({})", scale));
    }
    if column.flags.has(FieldFlag::MAYBE_NULL) {
        column.type_name.push_str(" NULL");
    }
    if !has_default {
        return Ok(());
    }
    let scale_str = if scale > 0 {
        format!("({})", scale)
    } else {
        String::new()
    };
    let data = defaults.remaining();
    column.default = Some(match column.utype {
        Utype::TimestampDnField => format!("CURRENT_TIMESTAMP{}", scale_str),
        Utype::TimestampUnField => format!(
            "{} ON UPDATE CURRENT_TIMESTAMP{}",
            decode_timestamp_value(data, scale.max(0) as usize)?,
            scale_str
        ),
        Utype::TimestampDnunField => format!(
            "CURRENT_TIMESTAMP{0} ON UPDATE CURRENT_TIMESTAMP{0}",
            scale_str
        ),
        _ => decode_timestamp_value(data, scale.max(0) as usize)?,
    });
    Ok(())
}

fn decode_timestamp_value(data: &[u8], scale: usize) -> Result<String, FrmError> {
    let epoch = read_uint_be(data, 4)? as u32;
    let base = if epoch == 0 {
        "0000-00-00 00:00:00".to_string()
    } else {
        unix_epoch_to_datetime(epoch as i64)
    };
    if scale == 0 {
        return Ok(format!("'{}'", base));
    }
    let n_bytes = DIGITS_TO_BYTES[scale];
    if data.len() < 4 + n_bytes {
        return Err(FrmError::Truncated("TIMESTAMP2 fractional part".to_string()));
    }
    let frac = match n_bytes {
        1 => data[4] as u32,
        2 => read_uint_be(&data[4..6], 2)? as u32,
        3 => read_u24_be(&data[4..7])?,
        _ => return Err(FrmError::Unsupported("invalid scale for TIMESTAMP2".to_string())),
    };
    Ok(format!("'{}.{}'", base, zfill(&frac.to_string(), scale)))
}

/// Render a UNIX epoch second count as `YYYY-MM-DD HH:MM:SS` UTC, without
/// pulling in a full calendar/timezone crate for a single conversion.
fn unix_epoch_to_datetime(epoch: i64) -> String {
    const SECS_PER_DAY: i64 = 86400;
    let days = epoch.div_euclid(SECS_PER_DAY);
    let secs_of_day = epoch.rem_euclid(SECS_PER_DAY);
    let (year, month, day) = civil_from_days(days);
    let hour = secs_of_day / 3600;
    let minute = (secs_of_day % 3600) / 60;
    let second = secs_of_day % 60;
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, month, day, hour, minute, second
    )
}

/// Howard Hinnant's `civil_from_days`: days-since-epoch to (year, month, day).
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

// ── DATETIME / DATETIME2 ──

fn decode_datetime(
    column: &mut Column,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    let scale = column.length as i32 - 19 - 1;
    if scale > 0 {
        column.type_name.push_str(&format!("({})", scale));
    }
    if !has_default {
        return Ok(());
    }
    let data = defaults.remaining();
    column.default = Some(if column.type_code == MySQLType::DateTime2 {
        decode_datetime2_default(data, scale.max(0) as usize)?
    } else if scale <= 0 {
        decode_datetime_default(data)?
    } else {
        decode_datetime_hires_default(data, scale as usize)?
    });
    Ok(())
}

fn decode_datetime_default(data: &[u8]) -> Result<String, FrmError> {
    let mut value = read_uint_le(data, 8)?;
    let second = value % 100;
    value /= 100;
    let minute = value % 100;
    value /= 100;
    let hour = value % 100;
    value /= 100;
    let day = value % 100;
    value /= 100;
    let month = value % 100;
    value /= 100;
    let year = value % 10000;
    Ok(format!(
        "'{:04}-{:02}-{:02} {:02}:{:02}:{:02}'",
        year, month, day, hour, minute, second
    ))
}

fn decode_datetime_hires_default(data: &[u8], scale: usize) -> Result<String, FrmError> {
    let raw = read_uint_le(data, 8)?;
    let mut value = sec_part_unshift(raw as i64, scale) as u64;
    let usec = value % 1_000_000;
    value /= 1_000_000;
    let second = value % 60;
    value /= 60;
    let minute = value % 60;
    value /= 60;
    let hour = value % 24;
    value /= 24;
    let day = value % 32;
    value /= 32;
    let month = value % 13;
    value /= 13;
    let year = value;
    let frac = &zfill(&usec.to_string(), 6)[..scale];
    Ok(format!(
        "'{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{}'",
        year, month, day, hour, minute, second, frac
    ))
}

fn decode_datetime2_default(data: &[u8], scale: usize) -> Result<String, FrmError> {
    if data.len() < 5 {
        return Err(FrmError::Truncated("DATETIME2 default".to_string()));
    }
    let ymdhms = read_uint_be(&data[..5], 5)?;
    let ymd = ymdhms >> 17;
    let day = ymd & 0x1F;
    let ym = (ymd >> 5) & 0x1FFFF;
    let month = ym % 13;
    let year = ym / 13;
    let hms = ymdhms & 0x1FFFF;
    let second = hms & 0x3F;
    let minute = (hms >> 6) & 0x3F;
    let hour = hms >> 12;
    let mut out = format!(
        "{}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, month, day, hour, minute, second
    );
    if scale > 0 {
        let n_bytes = DIGITS_TO_BYTES[scale];
        if data.len() < 5 + n_bytes {
            return Err(FrmError::Truncated("DATETIME2 fractional part".to_string()));
        }
        let mut padded = vec![0u8; 4 - n_bytes];
        padded.extend_from_slice(&data[5..5 + n_bytes]);
        let micros = read_uint_be(&padded, 4)?;
        out.push('.');
        out.push_str(&zfill(&micros.to_string(), scale));
    }
    Ok(format!("'{}'", out))
}

// ── YEAR ──

fn decode_year(
    column: &mut Column,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    column.type_name.push_str(&format!("({})", column.length));
    if !has_default {
        return Ok(());
    }
    let data = defaults.remaining();
    if data.is_empty() {
        return Err(FrmError::Truncated("YEAR default".to_string()));
    }
    column.default = Some(format!("'{}'", data[0] as u16 + 1900));
    Ok(())
}

// ── DATE / NEWDATE ──

fn decode_date(
    column: &mut Column,
    defaults: &mut DefaultsCursor,
    has_default: bool,
) -> Result<(), FrmError> {
    if column.type_code == MySQLType::Date {
        if has_default {
            return Err(FrmError::Unsupported("pre-4.1 DATE default".to_string()));
        }
        return Ok(());
    }
    if !has_default {
        return Ok(());
    }
    let data = defaults.remaining();
    let v = read_u24_le(data)?;
    let year = v >> 9;
    let month = (v >> 5) & 0xF;
    let day = v & 0x1F;
    column.default = Some(format!("'{:04}-{:02}-{:02}'", year, month, day));
    Ok(())
}

// ── GEOMETRY ──

fn decode_geometry(column: &mut Column, has_default: bool) -> Result<(), FrmError> {
    column.type_name = column
        .sub_type
        .map(|t| t.name().to_string())
        .unwrap_or_else(|| "geometry".to_string());
    if has_default {
        return Err(FrmError::Unsupported(
            "GEOMETRY columns cannot have a default value".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_lengths_match_example() {
        assert_eq!(calculate_decimal_lengths(10, 2), (4, 1));
    }

    #[test]
    fn newdecimal_default_renders_negative() {
        // DECIMAL(10,2) default -12345.67: int_length=4 (one group), frac_length=1.
        let int_word: i32 = 12345;
        let mut buf = int_word.to_be_bytes().to_vec();
        buf.push(67);
        // negative encoding: flip top bit of byte0, then invert all bytes
        buf[0] ^= 0x80;
        for b in buf.iter_mut() {
            *b = !*b;
        }
        // re-flip byte0's top bit back the way decode_newdecimal_default expects on input
        buf[0] ^= 0x80;
        let rendered = decode_newdecimal_default(&buf, 10, 2).unwrap();
        assert_eq!(rendered, "'-12345.67'");
    }

    #[test]
    fn integer_default_signed_tiny() {
        let mut col = Column {
            name: "n".into(),
            ordinal: 0,
            type_code: MySQLType::Tiny,
            type_name: String::new(),
            length: 4,
            flags: FieldFlag(FieldFlag::DECIMAL),
            utype: Utype::None,
            scale: 0,
            sub_type: None,
            collation: crate::collation::lookup(8).unwrap(),
            default: None,
            labels: None,
            comment: String::new(),
        };
        let data = [0xFBu8]; // -5
        let region = data.to_vec();
        let mut cur = DefaultsCursor::new(&region);
        decode_integer(&mut col, &mut cur, true).unwrap();
        assert_eq!(col.default.unwrap(), "'-5'");
    }

    #[test]
    fn bit_default_renders_binary_literal() {
        let mut col = Column {
            name: "b".into(),
            ordinal: 0,
            type_code: MySQLType::Bit,
            type_name: String::new(),
            length: 9,
            flags: FieldFlag(0),
            utype: Utype::None,
            scale: 0,
            sub_type: None,
            collation: crate::collation::lookup(63).unwrap(),
            default: None,
            labels: None,
            comment: String::new(),
        };
        let region = vec![0x01, 0x01]; // value 0b1_00000001 = 257
        let mut cur = DefaultsCursor::new(&region);
        decode_bit(&mut col, &mut cur, true).unwrap();
        assert_eq!(col.default.unwrap(), "b'100000001'");
    }

    #[test]
    fn timestamp_hires_type_name_carries_scale() {
        let mut col = Column {
            name: "t".into(),
            ordinal: 0,
            type_code: MySQLType::Timestamp2,
            type_name: "timestamp".to_string(),
            length: 23, // 19 + 1 + scale(3)
            flags: FieldFlag(0),
            utype: Utype::None,
            scale: 0,
            sub_type: None,
            collation: crate::collation::lookup(63).unwrap(),
            default: None,
            labels: None,
            comment: String::new(),
        };
        let region = vec![0u8; 6]; // 4-byte epoch + 2-byte (scale=3 -> DIGITS_TO_BYTES[3]=2) fraction
        let mut cur = DefaultsCursor::new(&region);
        decode_timestamp(&mut col, &mut cur, false).unwrap();
        assert_eq!(col.type_name, "timestamp(3)");
    }

    #[test]
    fn real_no_scale_uses_shortest_g_representation() {
        let mut col = Column {
            name: "d".into(),
            ordinal: 0,
            type_code: MySQLType::Double,
            type_name: String::new(),
            length: 0,
            flags: FieldFlag(FieldFlag::DECIMAL),
            utype: Utype::None,
            scale: FieldFlag::MAX_DEC as u8,
            sub_type: None,
            collation: crate::collation::lookup(63).unwrap(),
            default: None,
            labels: None,
            comment: String::new(),
        };
        let region = 1234.5f64.to_le_bytes().to_vec();
        let mut cur = DefaultsCursor::new(&region);
        decode_real(&mut col, &mut cur, true).unwrap();
        assert_eq!(col.default.unwrap(), "'1234.5'");
    }

    #[test]
    fn real_with_scale_zero_pads_to_declared_precision() {
        let mut col = Column {
            name: "d".into(),
            ordinal: 0,
            type_code: MySQLType::Double,
            type_name: String::new(),
            length: 10,
            flags: FieldFlag(FieldFlag::DECIMAL),
            utype: Utype::None,
            scale: 2,
            sub_type: None,
            collation: crate::collation::lookup(63).unwrap(),
            default: None,
            labels: None,
            comment: String::new(),
        };
        let region = 1234.5f64.to_le_bytes().to_vec();
        let mut cur = DefaultsCursor::new(&region);
        decode_real(&mut col, &mut cur, true).unwrap();
        assert_eq!(col.default.unwrap(), "'1234.50'");
    }

    #[test]
    fn newdate_default_roundtrip() {
        let mut col = Column {
            name: "d".into(),
            ordinal: 0,
            type_code: MySQLType::NewDate,
            type_name: String::new(),
            length: 0,
            flags: FieldFlag(0),
            utype: Utype::None,
            scale: 0,
            sub_type: None,
            collation: crate::collation::lookup(63).unwrap(),
            default: None,
            labels: None,
            comment: String::new(),
        };
        // 2024-03-15: (2024<<9) | (3<<5) | 15
        let v: u32 = (2024 << 9) | (3 << 5) | 15;
        let region = v.to_le_bytes()[..3].to_vec();
        let mut cur = DefaultsCursor::new(&region);
        decode_date(&mut col, &mut cur, true).unwrap();
        assert_eq!(col.default.unwrap(), "'2024-03-15'");
    }
}
