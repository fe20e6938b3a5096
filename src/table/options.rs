//! Table-level options: `CONNECTION`, `ENGINE`, charset/collation, row
//! limits, `COMMENT`, and the partitioning clause. Most come straight off
//! the FileInfo header; `CONNECTION`/`ENGINE`/partitions are parsed lazily
//! out of the extras region because their presence and lengths are
//! themselves stored inline (C9).

use crate::bytes::read_uint_le;
use crate::collation::Collation;
use crate::constants::{HandlerOption, RowType};
use crate::table::file_info::FileInfo;
use crate::table::region::ExtraCursor;
use crate::FrmError;

#[derive(Debug, Clone)]
pub struct Options {
    pub connection: String,
    pub engine: String,
    pub collation: &'static Collation,
    pub min_rows: u32,
    pub max_rows: u32,
    pub avg_row_length: u32,
    pub row_format: RowType,
    pub key_block_size: u16,
    pub comment: String,
    pub partitions: String,
    pub handler_options: HandlerOption,
}

impl Options {
    pub fn new(file_info: &FileInfo, collation: &'static Collation) -> Self {
        Options {
            connection: String::new(),
            engine: String::new(),
            collation,
            min_rows: file_info.min_rows,
            max_rows: file_info.max_rows,
            avg_row_length: file_info.avg_row_length,
            row_format: file_info.row_type,
            key_block_size: file_info.key_block_size,
            comment: String::new(),
            partitions: String::new(),
            handler_options: file_info.handler_options,
        }
    }

    /// Walk the extras region, filling in `connection`/`engine`/`partitions`
    /// and leaving `extra`'s cursor positioned right after whatever was
    /// consumed — the fulltext-parser names decoded later (per key) and a
    /// sentinel-length table comment both read from that same cursor.
    ///
    /// Mirrors the on-disk layout: a `u16` connection-string length prefix,
    /// a `u16` engine-string length prefix, a `u16` reserved gap, then a
    /// `u32` partition-expression length prefix.
    pub fn decode_extras(
        &mut self,
        extra: &mut ExtraCursor,
        engine_code: u8,
        partition_engine_code: u8,
        engine_name: impl Fn(u8) -> &'static str,
    ) -> Result<(), FrmError> {
        const SKIP_LENGTH: usize = 2; // null byte + autopartition flag
        let data = extra.data;
        if data.len() <= 2 {
            return Ok(());
        }
        let connection_length = read_uint_le(data, 2)? as usize;
        let engine_length_offset = 2 + connection_length;
        if data.len() < engine_length_offset {
            return Err(FrmError::Truncated(
                "extras: connection string exceeds region".to_string(),
            ));
        }
        self.connection = String::from_utf8_lossy(&data[2..engine_length_offset]).into_owned();

        let engine_offset = engine_length_offset + 2;
        if data.len() < engine_offset {
            extra.offset = engine_length_offset + SKIP_LENGTH;
            return Ok(());
        }
        let engine_length =
            read_uint_le(&data[engine_length_offset..engine_length_offset + 2], 2)? as usize;
        let partition_length_offset = engine_offset + engine_length;
        if data.len() < partition_length_offset {
            return Err(FrmError::Truncated(
                "extras: engine string exceeds region".to_string(),
            ));
        }
        let engine = String::from_utf8_lossy(&data[engine_offset..partition_length_offset]);
        self.engine = if engine.is_empty() {
            engine_name(engine_code).to_string()
        } else if engine == "partion" {
            // MariaDB's literal misspelling (missing "t"); preserved verbatim
            // rather than corrected, matching the marker the format actually uses.
            engine_name(partition_engine_code).to_string()
        } else {
            engine.into_owned()
        };

        let partition_offset = partition_length_offset + 4;
        if data.len() <= partition_offset {
            extra.offset = partition_length_offset + SKIP_LENGTH;
            return Ok(());
        }
        let partition_length = read_uint_le(
            &data[partition_length_offset..partition_length_offset + 4],
            4,
        )? as usize;
        if data.len() < partition_offset + partition_length {
            return Err(FrmError::Truncated(
                "extras: partition expression exceeds region".to_string(),
            ));
        }
        self.partitions =
            String::from_utf8_lossy(&data[partition_offset..partition_offset + partition_length])
                .into_owned();
        extra.offset = partition_offset + partition_length + SKIP_LENGTH;
        Ok(())
    }

    /// Render the fixed-order option clause following the table's `)`.
    pub fn render(&self) -> String {
        let mut parts = Vec::new();
        if !self.connection.is_empty() {
            parts.push(format!("CONNECTION='{}'", self.connection));
        }
        if !self.engine.is_empty() {
            parts.push(format!("ENGINE={}", self.engine));
        }
        if !self.collation.name.is_empty() {
            parts.push(format!("DEFAULT CHARSET={}", self.collation.charset_name));
            if !self.collation.is_default {
                parts.push(format!("COLLATE={}", self.collation.name));
            }
        }
        if self.min_rows != 0 {
            parts.push(format!("MIN_ROWS={}", self.min_rows));
        }
        if self.max_rows != 0 {
            parts.push(format!("MAX_ROWS={}", self.max_rows));
        }
        if self.avg_row_length != 0 {
            parts.push(format!("AVG_ROW_LENGTH={}", self.avg_row_length));
        }
        if self.key_block_size != 0 {
            parts.push(format!("KEY_BLOCK_SIZE={}", self.key_block_size));
        }
        if !self.comment.is_empty() {
            parts.push(format!("COMMENT='{}'", self.comment));
        }
        if !self.partitions.is_empty() {
            parts.push(format!("/*!50100 {} */", self.partitions));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collation;

    #[test]
    fn renders_charset_and_collation_when_non_default() {
        let c = collation::lookup(46).unwrap(); // utf8mb4_bin, not default
        let opts = Options {
            connection: String::new(),
            engine: "InnoDB".to_string(),
            collation: c,
            min_rows: 0,
            max_rows: 0,
            avg_row_length: 0,
            row_format: RowType(0),
            key_block_size: 0,
            comment: String::new(),
            partitions: String::new(),
            handler_options: HandlerOption(0),
        };
        assert_eq!(
            opts.render(),
            "ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_bin"
        );
    }

    #[test]
    fn skips_zero_and_empty_fields() {
        let c = collation::lookup(8).unwrap(); // latin1_swedish_ci, default
        let opts = Options {
            connection: String::new(),
            engine: String::new(),
            collation: c,
            min_rows: 0,
            max_rows: 0,
            avg_row_length: 0,
            row_format: RowType(0),
            key_block_size: 0,
            comment: String::new(),
            partitions: String::new(),
            handler_options: HandlerOption(0),
        };
        assert_eq!(opts.render(), "DEFAULT CHARSET=latin1");
    }

    #[test]
    fn partion_misspelling_falls_back_to_partition_engine() {
        let c = collation::lookup(8).unwrap();
        let mut opts = Options::new(
            &crate::table::file_info::FileInfo {
                version: 10,
                engine: crate::constants::LegacyDbType(9),
                names_length: 0,
                key_info_offset: 0,
                tmp_key_info_length: 0,
                record_length: 0,
                max_rows: 0,
                min_rows: 0,
                key_info_length: 0,
                handler_options: HandlerOption(0),
                avg_row_length: 0,
                charset: c,
                row_type: RowType(0),
                extended_key_info_length: 0,
                mysql_version: crate::table::file_info::MySQLVersion {
                    major: 0,
                    minor: 0,
                    release: 0,
                },
                extra_info_length: 0,
                partition_engine: crate::constants::LegacyDbType(12),
                key_block_size: 0,
                keys_data_length: 0,
                defaults_data_offset: 0,
                extra_data_offset: 0,
                form: crate::table::file_info::FormInfo {
                    offset: 0,
                    screens_length: 0,
                    column_count: 0,
                    null_fields: 0,
                    names_length: 0,
                    labels_length: 0,
                    comments_length: 0,
                    table_comment_length: 0,
                },
            },
            c,
        );
        // connection_length=0, engine="partion" (7 bytes), no partition expr
        let mut extra_data = Vec::new();
        extra_data.extend_from_slice(&0u16.to_le_bytes());
        extra_data.extend_from_slice(&7u16.to_le_bytes());
        extra_data.extend_from_slice(b"partion");
        let mut extra = crate::table::region::ExtraCursor::new(&extra_data);
        opts.decode_extras(&mut extra, 9, 12, |code| match code {
            9 => "MyISAM",
            12 => "InnoDB",
            _ => "UNKNOWN",
        })
        .unwrap();
        assert_eq!(opts.engine, "InnoDB");
    }
}
