//! Table-flavour `.frm` decoder: wires FileInfo/FormInfo (C6-C7), the
//! region derivations (C8), options (C9), columns (C10), and keys (C11)
//! together into the assembled `CREATE TABLE` text (C12).

pub mod column;
pub mod file_info;
pub mod keys;
pub mod options;
pub mod region;

use crate::constants::LegacyDbType;
use crate::ident;
use crate::table::column::{Column, ColumnContext};
use crate::table::file_info::{FileInfo, MySQLVersion, FORM_INFO_LENGTH};
use crate::table::keys::Keys;
use crate::table::options::Options;
use crate::table::region::{CommentsCursor, DefaultsCursor, ExtraCursor, Region};
use crate::FrmError;

/// A decoded table-flavour `.frm`: its name, the MySQL version that wrote
/// it, its column list, its key list, and its table-level options.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub mysql_version: MySQLVersion,
    pub columns: Vec<Column>,
    pub keys: Keys,
    pub options: Options,
}

impl Table {
    pub fn decode(path: &str, data: &[u8]) -> Result<Self, FrmError> {
        let file_info = FileInfo::read(data)?;
        let name = ident::decode_filename(&ident::frm_stem(path))?;

        let mut options = Options::new(&file_info, file_info.charset);

        let keys_region = Region::new(
            data,
            file_info.key_info_offset as u32,
            file_info.keys_data_length,
        )?;
        let defaults_region = Region::new(
            data,
            file_info.defaults_data_offset,
            file_info.record_length as u32,
        )?;
        let extra_region = Region::new(
            data,
            file_info.extra_data_offset,
            file_info.extra_info_length,
        )?;

        let metadata_offset =
            file_info.form.offset + FORM_INFO_LENGTH + file_info.form.screens_length as u32;
        let metadata_region = Region::new(
            data,
            metadata_offset,
            17 * file_info.form.column_count as u32,
        )?;
        let names_region = Region::new(
            data,
            metadata_region.end(),
            file_info.form.names_length as u32,
        )?;
        let names = region::split_names(names_region.data);
        let labels_region = Region::new(
            data,
            names_region.end(),
            file_info.form.labels_length as u32,
        )?;
        let labels_groups = region::split_labels(labels_region.data);
        let comments_region = Region::new(
            data,
            labels_region.end(),
            file_info.form.comments_length as u32,
        )?;
        let mut comments_cursor = CommentsCursor::new(comments_region.data);

        let null_bitmap_len = ((file_info.form.null_fields as usize + 1 + 7) / 8).min(defaults_region.data.len());
        let null_bitmap = &defaults_region.data[..null_bitmap_len];
        let mut defaults_cursor = DefaultsCursor::new(defaults_region.data);

        let mut null_bit: u32 = if file_info
            .handler_options
            .has(crate::constants::HandlerOption::PACK_RECORD)
        {
            0
        } else {
            1
        };

        let mut extra_cursor = ExtraCursor::new(extra_region.data);
        options.decode_extras(
            &mut extra_cursor,
            file_info.engine.0,
            file_info.partition_engine.0,
            |code| LegacyDbType(code).name(),
        )?;

        if file_info.form.table_comment_length != 0xFF {
            let offset = file_info.form.offset as usize + 47;
            let length = file_info.form.table_comment_length as usize;
            if data.len() < offset + length {
                return Err(FrmError::Truncated(
                    "table comment exceeds file length".to_string(),
                ));
            }
            options.comment =
                String::from_utf8_lossy(&data[offset..offset + length]).into_owned();
        } else {
            options.comment = extra_cursor.decode_table_comment()?;
        }

        let ctx = ColumnContext {
            table_collation: file_info.charset,
            null_bitmap,
            labels_groups: &labels_groups,
        };
        let mut columns = Vec::with_capacity(names.len());
        for (ordinal, name) in names.into_iter().enumerate() {
            let metadata = &metadata_region.data[ordinal * 17..ordinal * 17 + 17];
            let column = column::decode(
                name,
                ordinal as u16,
                metadata,
                &ctx,
                &mut null_bit,
                &mut comments_cursor,
                &mut defaults_cursor,
            )?;
            columns.push(column);
        }

        let keys = Keys::decode(keys_region.data, &columns, &mut extra_cursor)?;

        Ok(Table {
            name,
            mysql_version: file_info.mysql_version,
            columns,
            keys,
            options,
        })
    }

    /// Compose the `CREATE TABLE` statement: column clauses and key
    /// clauses joined by commas inside one parenthesized body, followed by
    /// the fixed-order option clause.
    pub fn render(&self) -> String {
        let columns_combined: Vec<String> = self.columns.iter().map(Column::render).collect();
        let body = if self.keys.combined.is_empty() {
            columns_combined.join(",")
        } else {
            format!("{},{}", columns_combined.join(","), self.keys.combined)
        };
        format!(
            "CREATE TABLE `{}` ({}) {};",
            self.name.replace('`', "``"),
            body,
            self.options.render()
        )
    }

    pub fn render_with_header(&self) -> String {
        format!(
            "--\n-- Table structure for table `{}`\n-- Created with MySQL Version {}\n--\n{}",
            self.name.replace('`', "``"),
            self.mysql_version.render(),
            self.render()
        )
    }
}

