//! FileInfo: the fixed 64-byte header of a table-flavour `.frm`, plus the
//! 288-byte FormInfo block it points to.
//!
//! <https://dbsake.readthedocs.io/en/latest/appendix/frm_format.html#frm-fileinfo-section>

use crate::bytes::read_uint_le;
use crate::collation::{self, Collation};
use crate::constants::{HandlerOption, LegacyDbType, RowType};
use crate::FrmError;

pub const FILE_INFO_LENGTH: usize = 64;
pub const FORM_INFO_LENGTH: u32 = 288;

/// MySQL version encoded as a 4-byte little-endian integer:
/// `MYSQL_VERSION_ID = major*10000 + minor*100 + release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MySQLVersion {
    pub major: u32,
    pub minor: u32,
    pub release: u32,
}

impl MySQLVersion {
    pub fn from_le_bytes(data: &[u8]) -> Result<Self, FrmError> {
        let id = read_uint_le(data, 4)? as u32;
        Ok(MySQLVersion {
            major: id / 10000,
            minor: id % 1000 / 100,
            release: id % 100,
        })
    }

    pub fn render(&self) -> String {
        if self.major == 0 && self.minor == 0 && self.release == 0 {
            "< 5.0".to_string()
        } else {
            format!("{}.{}.{}", self.major, self.minor, self.release)
        }
    }
}

/// The 288-byte FormInfo block describing the columns portion.
#[derive(Debug, Clone, Copy)]
pub struct FormInfo {
    pub offset: u32,
    pub screens_length: u16,
    pub column_count: u16,
    pub null_fields: u16,
    pub names_length: u16,
    pub labels_length: u16,
    pub comments_length: u16,
    pub table_comment_length: u8,
}

impl FormInfo {
    fn read(file: &[u8], names_length: u16) -> Result<Self, FrmError> {
        let offset_start = FILE_INFO_LENGTH + names_length as usize;
        let offset_end = offset_start + 4;
        if file.len() < offset_end {
            return Err(FrmError::Truncated(format!(
                "form info offset exceeds file length: need {}",
                offset_end
            )));
        }
        let offset = read_uint_le(&file[offset_start..offset_end], 4)? as u32;
        let block_end = offset as usize + FORM_INFO_LENGTH as usize;
        if file.len() < block_end {
            return Err(FrmError::Truncated(format!(
                "form info block exceeds file length: need {}",
                block_end
            )));
        }
        let at = |off: u32, width: usize| -> Result<u64, FrmError> {
            let start = offset as usize + off as usize;
            read_uint_le(&file[start..start + width], width)
        };
        Ok(FormInfo {
            offset,
            screens_length: at(260, 2)? as u16,
            column_count: at(258, 2)? as u16,
            null_fields: at(282, 2)? as u16,
            names_length: at(268, 2)? as u16,
            labels_length: at(274, 2)? as u16,
            comments_length: at(284, 2)? as u16,
            table_comment_length: file[offset as usize + 46],
        })
    }
}

/// The fixed 64-byte header, plus the derived region offsets that hang off
/// its fields and the embedded FormInfo block.
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub version: u8,
    pub engine: LegacyDbType,
    pub names_length: u16,
    pub key_info_offset: u16,
    pub tmp_key_info_length: u16,
    pub record_length: u16,
    pub max_rows: u32,
    pub min_rows: u32,
    pub key_info_length: u16,
    pub handler_options: HandlerOption,
    pub avg_row_length: u32,
    pub charset: &'static Collation,
    pub row_type: RowType,
    pub extended_key_info_length: u32,
    pub mysql_version: MySQLVersion,
    pub extra_info_length: u32,
    pub partition_engine: LegacyDbType,
    pub key_block_size: u16,

    pub keys_data_length: u32,
    pub defaults_data_offset: u32,
    pub extra_data_offset: u32,

    pub form: FormInfo,
}

impl FileInfo {
    pub fn read(file: &[u8]) -> Result<Self, FrmError> {
        if file.len() < FILE_INFO_LENGTH {
            return Err(FrmError::Truncated(format!(
                "file too short for FileInfo header: need {}, have {}",
                FILE_INFO_LENGTH,
                file.len()
            )));
        }
        if &file[0x00..0x02] != [0xFE, 0x01] {
            return Err(FrmError::InvalidFormat(
                "missing table magic FE 01".to_string(),
            ));
        }
        let u16_at = |off: usize| -> Result<u16, FrmError> { Ok(read_uint_le(&file[off..off + 2], 2)? as u16) };
        let u32_at = |off: usize| -> Result<u32, FrmError> { Ok(read_uint_le(&file[off..off + 4], 4)? as u32) };

        let charset = collation::lookup(file[0x26])?;
        let tmp_key_info_length = u16_at(0x0E)?;
        let extended_key_info_length = u32_at(0x2F)?;
        let key_info_offset = u16_at(0x06)?;
        let record_length = u16_at(0x10)?;
        let extra_info_length = u32_at(0x37)?;

        let keys_data_length = if tmp_key_info_length == 0xFFFF {
            extended_key_info_length
        } else {
            tmp_key_info_length as u32
        };
        let defaults_data_offset = key_info_offset as u32 + keys_data_length;
        let extra_data_offset = defaults_data_offset + record_length as u32;

        let names_length = u16_at(0x04)?;
        let form = FormInfo::read(file, names_length)?;

        Ok(FileInfo {
            version: file[0x02],
            engine: LegacyDbType(file[0x03]),
            names_length,
            key_info_offset,
            tmp_key_info_length,
            record_length,
            max_rows: u32_at(0x12)?,
            min_rows: u32_at(0x16)?,
            key_info_length: u16_at(0x1C)?,
            handler_options: HandlerOption(u16_at(0x1E)?),
            avg_row_length: u32_at(0x22)?,
            charset,
            row_type: RowType(file[0x28]),
            extended_key_info_length,
            mysql_version: MySQLVersion::from_le_bytes(&file[0x33..0x37])?,
            extra_info_length,
            partition_engine: LegacyDbType(file[0x3D]),
            key_block_size: u16_at(0x3E)?,
            keys_data_length,
            defaults_data_offset,
            extra_data_offset,
            form,
        })
    }
}
