//! Key/index section (C11): `PRIMARY`/`UNIQUE`/`FULLTEXT`/`SPATIAL`/plain
//! `KEY` clauses, decoded from the fixed-width key-info region that
//! `FileInfo::key_info_offset`/`keys_data_length` point at.
//!
//! Unlike the column section, a key's flag word is XORed with `HA_NOSAME`
//! up front before any bit is tested; `is_unique` is then the *negation*
//! of the resulting `HA_NOSAME` bit. Losing that XOR is an easy mistake
//! to make, and dropping the resulting `is_unique` computation entirely
//! is an easier one still.

use crate::bytes::read_uint_le;
use crate::constants::{HaKeyAlgo, HaKeyFlag, KeyPrefix};
use crate::table::column::Column;
use crate::table::region::ExtraCursor;
use crate::FrmError;

const BYTES_PER_KEY: u32 = 8;
const BYTES_PER_KEY_PART: u32 = 9;

/// One column reference within a key, by index into the table's decoded
/// column list (1-based on disk, stored here already converted to 0-based).
#[derive(Debug, Clone)]
pub struct KeyPart {
    pub column_index: usize,
    pub length: u16,
}

#[derive(Debug, Clone)]
pub struct Key {
    pub name: String,
    pub parts: Vec<KeyPart>,
    pub algorithm: HaKeyAlgo,
    pub block_size: u16,
    pub parser: String,
    pub comment: String,
    pub index_type: &'static str,
    pub is_unique: bool,
}

impl Key {
    /// Render one part's `` `col`(prefix) `` fragment; FULLTEXT/SPATIAL
    /// indexes never carry a prefix length regardless of column type.
    fn format_key_part(&self, part: &KeyPart, columns: &[Column]) -> String {
        let column = &columns[part.column_index];
        let value = format!("`{}`", column.name.replace('`', "``"));
        if self.index_type == "FULLTEXT" || self.index_type == "SPATIAL" {
            return value;
        }
        let key_prefix = column.type_code.key_prefix();
        let needs_prefix = match key_prefix {
            KeyPrefix::Maybe => part.length != column.length,
            KeyPrefix::Always => true,
            KeyPrefix::None => false,
        };
        if needs_prefix {
            let maxlen = column.collation.maxlen.max(1) as u16;
            format!("{}({})", value, part.length / maxlen)
        } else {
            value
        }
    }

    /// Render the full `KEY ... (parts) USING ... COMMENT ...` clause.
    pub fn render(&self, columns: &[Column]) -> String {
        let mut components = Vec::new();
        if self.name == "PRIMARY" {
            components.push("PRIMARY KEY".to_string());
        } else if self.is_unique {
            components.push("UNIQUE KEY".to_string());
        } else if self.index_type == "FULLTEXT" {
            components.push("FULLTEXT KEY".to_string());
        } else if self.index_type == "SPATIAL" {
            components.push("SPATIAL KEY".to_string());
        } else {
            components.push("KEY".to_string());
        }

        if !self.name.is_empty() && self.name != "PRIMARY" {
            components.push(format!("`{}`", self.name.replace('`', "``")));
        }

        let parts: Vec<String> = self
            .parts
            .iter()
            .map(|p| self.format_key_part(p, columns))
            .collect();
        components.push(format!("({})", parts.join(",")));

        if self.algorithm.0 != HaKeyAlgo::UNDEF {
            components.push(format!("USING {}", self.algorithm.name()));
        }
        if self.block_size > 0 {
            components.push(format!("KEY_BLOCK_SIZE={}", self.block_size));
        }
        if !self.comment.is_empty() {
            components.push(format!("COMMENT '{}'", self.comment.replace('\'', "\\'")));
        }
        if !self.parser.is_empty() && self.parser != "True" {
            components.push(format!("/*!50100 WITH PARSER `{}` */ ", self.parser));
        }
        components.join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct Keys {
    pub items: Vec<Key>,
    /// Pre-joined, comma-separated key clauses, ready to slot into the
    /// `CREATE TABLE` body right after the column list.
    pub combined: String,
}

impl Keys {
    pub fn decode(
        data: &[u8],
        columns: &[Column],
        table_extra: &mut ExtraCursor,
    ) -> Result<Self, FrmError> {
        if data.is_empty() {
            return Ok(Keys {
                items: Vec::new(),
                combined: String::new(),
            });
        }
        let mut count = data[0] as u32;
        let part_count: u32;
        if count < 128 {
            part_count = *data
                .get(1)
                .ok_or_else(|| FrmError::MalformedKeySection("truncated key count".to_string()))?
                as u32;
        } else {
            let high = *data
                .get(1)
                .ok_or_else(|| FrmError::MalformedKeySection("truncated key count".to_string()))?
                as u32;
            count = (count & 0x7F) | (high << 7);
            part_count = read_uint_le(&data[2..], 2)? as u32;
        }
        let extra_length = read_uint_le(&data[4..], 2)? as u32;
        let mut cursor: usize = 6;

        let extra_offset =
            cursor as u32 + count * BYTES_PER_KEY + part_count * BYTES_PER_KEY_PART;
        let extra_end = extra_offset + extra_length;
        if (data.len() as u32) < extra_end {
            return Err(FrmError::MalformedKeySection(format!(
                "key names/comments region exceeds key section: need {}, have {}",
                extra_end,
                data.len()
            )));
        }
        let extra_info = &data[extra_offset as usize..extra_end as usize];
        let (names, comments_data) = decode_names_comments(extra_info);

        let mut key_comments = KeyComments::new(comments_data);
        let mut items = Vec::with_capacity(names.len());
        let mut combined = Vec::with_capacity(names.len());
        for name in names {
            let key = decode_one(
                data,
                &mut cursor,
                name,
                columns,
                &mut key_comments,
                table_extra,
            )?;
            combined.push(key.render(columns));
            items.push(key);
        }
        Ok(Keys {
            items,
            combined: combined.join(","),
        })
    }
}

fn decode_one(
    data: &[u8],
    cursor: &mut usize,
    name: String,
    columns: &[Column],
    key_comments: &mut KeyComments,
    table_extra: &mut ExtraCursor,
) -> Result<Key, FrmError> {
    let rec = data.get(*cursor..).unwrap_or(&[]);
    if rec.len() < 8 {
        return Err(FrmError::MalformedKeySection(
            "truncated key record".to_string(),
        ));
    }
    let raw_flags = read_uint_le(rec, 2)? as u16;
    let flags = HaKeyFlag(raw_flags ^ HaKeyFlag::NOSAME);
    let parts_count = rec[4];
    let algorithm = HaKeyAlgo(rec[5]);
    let block_size = read_uint_le(&rec[6..], 2)? as u16;
    *cursor += 8;

    let is_unique = !flags.has(HaKeyFlag::NOSAME);

    let comment = if flags.has(HaKeyFlag::USES_COMMENT) {
        key_comments.decode()?
    } else {
        String::new()
    };
    let parser = if flags.has(HaKeyFlag::USES_PARSER) {
        table_extra.decode_parser()
    } else {
        String::new()
    };

    let parts = decode_parts(data, cursor, parts_count, columns)?;

    let index_type = if flags.has(HaKeyFlag::FULLTEXT) {
        "FULLTEXT"
    } else if flags.has(HaKeyFlag::SPATIAL) {
        "SPATIAL"
    } else if algorithm.0 == HaKeyAlgo::HASH {
        "HASH"
    } else {
        "BTREE"
    };

    Ok(Key {
        name,
        parts,
        algorithm,
        block_size,
        parser,
        comment,
        index_type,
        is_unique,
    })
}

fn decode_parts(
    data: &[u8],
    cursor: &mut usize,
    parts_count: u8,
    columns: &[Column],
) -> Result<Vec<KeyPart>, FrmError> {
    let mut parts = Vec::with_capacity(parts_count as usize);
    for _ in 0..parts_count {
        let rec = data.get(*cursor..).unwrap_or(&[]);
        if rec.len() < 9 {
            return Err(FrmError::MalformedKeySection(
                "truncated key part record".to_string(),
            ));
        }
        let fieldnr = (read_uint_le(rec, 2)? as u16) & 0x3FFF;
        let length = read_uint_le(&rec[7..], 2)? as u16;
        *cursor += 9;
        let column_index = (fieldnr as usize)
            .checked_sub(1)
            .ok_or_else(|| FrmError::MalformedKeySection("key part field number is 0".to_string()))?;
        if column_index >= columns.len() {
            return Err(FrmError::MalformedKeySection(format!(
                "key part references column {} but only {} columns exist",
                fieldnr,
                columns.len()
            )));
        }
        parts.push(KeyPart {
            column_index,
            length,
        });
    }
    Ok(parts)
}

/// Split the trailing names/comments blob: `name1\xFFname2\xFF...\x00comments`.
/// Names are `0xFF`-joined after trimming leading/trailing `0xFF` padding;
/// everything after the first `0x00` belongs to the comments cursor.
fn decode_names_comments(extra_info: &[u8]) -> (Vec<String>, &[u8]) {
    let (names_part, comments) = match extra_info.iter().position(|&b| b == 0x00) {
        Some(idx) => (&extra_info[..idx], &extra_info[idx + 1..]),
        None => (extra_info, &extra_info[extra_info.len()..]),
    };
    let trimmed = trim_0xff(names_part);
    let names = trimmed
        .split(|&b| b == 0xFF)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect();
    (names, comments)
}

fn trim_0xff(data: &[u8]) -> &[u8] {
    let start = data.iter().position(|&b| b != 0xFF).unwrap_or(data.len());
    let end = data.iter().rposition(|&b| b != 0xFF).map_or(start, |i| i + 1);
    &data[start..end]
}

/// Lazy reader over the key-comments blob: each comment is a `u16_LE`
/// length-prefixed UTF-8 run, consumed in key-declaration order.
struct KeyComments<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> KeyComments<'a> {
    fn new(data: &'a [u8]) -> Self {
        KeyComments { data, offset: 0 }
    }

    fn decode(&mut self) -> Result<String, FrmError> {
        if self.data.is_empty() {
            return Ok(String::new());
        }
        let rest = &self.data[self.offset..];
        let length = read_uint_le(rest, 2)? as usize;
        if rest.len() < 2 + length {
            return Err(FrmError::Truncated(
                "key comments region exceeds its data".to_string(),
            ));
        }
        let comment = String::from_utf8_lossy(&rest[2..2 + length]).into_owned();
        self.offset += 2 + length;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collation;
    use crate::constants::{FieldFlag, MySQLType, Utype};

    fn test_column(name: &str, length: u16) -> Column {
        Column {
            name: name.to_string(),
            ordinal: 0,
            type_code: MySQLType::VarChar,
            type_name: "varchar(255)".to_string(),
            length,
            flags: FieldFlag(0),
            utype: Utype::None,
            scale: 0,
            sub_type: None,
            collation: collation::lookup(8).unwrap(),
            default: None,
            labels: None,
            comment: String::new(),
        }
    }

    #[test]
    fn trims_0xff_padding_around_names() {
        let data = [0xFF, b'a', 0xFF, b'b', 0xFF];
        assert_eq!(trim_0xff(&data), [b'a', 0xFF, b'b']);
    }

    #[test]
    fn splits_names_and_comments() {
        let mut extra = Vec::new();
        extra.extend_from_slice(b"id");
        extra.push(0xFF);
        extra.extend_from_slice(b"name");
        extra.push(0x00);
        extra.extend_from_slice(b"trailing comment bytes");
        let (names, comments) = decode_names_comments(&extra);
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(comments, b"trailing comment bytes");
    }

    #[test]
    fn is_unique_negates_post_xor_nosame_bit() {
        // raw NOSAME bit set on disk -> XOR clears it -> is_unique = !false = true
        let unique_flags = HaKeyFlag(HaKeyFlag::NOSAME ^ HaKeyFlag::NOSAME);
        assert!(!unique_flags.has(HaKeyFlag::NOSAME));
        // raw NOSAME bit clear on disk -> XOR sets it -> is_unique = !true = false
        let non_unique_flags = HaKeyFlag(0u16 ^ HaKeyFlag::NOSAME);
        assert!(non_unique_flags.has(HaKeyFlag::NOSAME));
    }

    #[test]
    fn renders_primary_key_clause() {
        let columns = vec![test_column("id", 11)];
        let key = Key {
            name: "PRIMARY".to_string(),
            parts: vec![KeyPart {
                column_index: 0,
                length: 11,
            }],
            algorithm: HaKeyAlgo(HaKeyAlgo::UNDEF),
            block_size: 0,
            parser: String::new(),
            comment: String::new(),
            index_type: "BTREE",
            is_unique: true,
        };
        assert_eq!(key.render(&columns), "PRIMARY KEY (`id`)");
    }

    #[test]
    fn renders_prefix_length_for_maybe_prefix_columns() {
        let columns = vec![test_column("name", 255)];
        let key = Key {
            name: "idx_name".to_string(),
            parts: vec![KeyPart {
                column_index: 0,
                length: 20,
            }],
            algorithm: HaKeyAlgo(HaKeyAlgo::UNDEF),
            block_size: 0,
            parser: String::new(),
            comment: String::new(),
            index_type: "BTREE",
            is_unique: false,
        };
        assert_eq!(key.render(&columns), "KEY `idx_name` (`name`(20))");
    }

    #[test]
    fn drops_placeholder_parser_name() {
        let columns = vec![test_column("id", 11)];
        let key = Key {
            name: "idx".to_string(),
            parts: vec![KeyPart {
                column_index: 0,
                length: 11,
            }],
            algorithm: HaKeyAlgo(HaKeyAlgo::UNDEF),
            block_size: 0,
            parser: "True".to_string(),
            comment: String::new(),
            index_type: "BTREE",
            is_unique: false,
        };
        assert!(!key.render(&columns).contains("WITH PARSER"));
    }
}
