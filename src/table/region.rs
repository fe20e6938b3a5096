//! Region slices: bounds-checked views into the raw `.frm` byte buffer.
//!
//! Every multi-byte section of a table-flavour `.frm` (the key/index
//! section, the defaults record, the extras region, the column metadata
//! and its names/labels/comments) is just a `(offset, length)` pair into
//! the file. This module owns deriving those pairs and turning them into
//! bounds-checked slices; it never interprets the bytes itself.

use crate::FrmError;

/// A bounds-checked, read-only view into the file buffer.
#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    pub data: &'a [u8],
    pub offset: u32,
    pub length: u32,
}

impl<'a> Region<'a> {
    pub fn new(file: &'a [u8], offset: u32, length: u32) -> Result<Self, FrmError> {
        let end = offset as usize + length as usize;
        if file.len() < end {
            return Err(FrmError::Truncated(format!(
                "region [{}, {}) exceeds file length {}",
                offset, end, file.len()
            )));
        }
        Ok(Region {
            data: &file[offset as usize..end],
            offset,
            length,
        })
    }

    pub fn end(&self) -> u32 {
        self.offset + self.length
    }
}

/// Split the column-names region into its `0xFF`-separated items.
///
/// The region is `[0x01, name1, 0xFF, name2, 0xFF, ..., 0x00, 0x00]`-shaped
/// in practice: a leading marker byte and a two-byte trailer surround the
/// `0xFF`-joined list.
pub fn split_names(data: &[u8]) -> Vec<String> {
    if data.len() < 3 {
        return Vec::new();
    }
    data[1..data.len() - 2]
        .split(|&b| b == 0xFF)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

/// Split the ENUM/SET labels region into per-column label groups.
///
/// Groups are `0x00`-separated; within a group the leading and trailing
/// marker byte are dropped and the remainder is `0xFF`-separated label
/// bytes (raw, not yet charset-decoded).
pub fn split_labels(data: &[u8]) -> Vec<Vec<Vec<u8>>> {
    if data.is_empty() {
        return Vec::new();
    }
    let trimmed = &data[..data.len() - 1];
    trimmed
        .split(|&b| b == 0x00)
        .map(|group| {
            if group.len() < 2 {
                return Vec::new();
            }
            group[1..group.len() - 1]
                .split(|&b| b == 0xFF)
                .map(|s| s.to_vec())
                .collect()
        })
        .collect()
}

/// Cursor over the per-column comments region: each comment is a raw byte
/// run of caller-supplied length, consumed in column order.
pub struct CommentsCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> CommentsCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        CommentsCursor { data, offset: 0 }
    }

    pub fn next(&mut self, length: u32) -> Result<&'a [u8], FrmError> {
        if self.data.is_empty() {
            return Ok(&[]);
        }
        let length = length as usize;
        if self.data.len() < self.offset + length {
            return Err(FrmError::Truncated(format!(
                "comments region: need {} bytes at offset {}, have {}",
                length,
                self.offset,
                self.data.len()
            )));
        }
        let slice = &self.data[self.offset..self.offset + length];
        self.offset += length;
        Ok(slice)
    }
}

/// Cursor over the defaults region. Unlike the other regions this one is
/// *rewound* per column: the column's own metadata record carries the byte
/// offset its default lives at, so the cursor is set explicitly rather
/// than simply advancing.
pub struct DefaultsCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> DefaultsCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        DefaultsCursor { data, offset: 0 }
    }

    pub fn seek(&mut self, offset: u32) {
        self.offset = offset as usize;
    }

    /// Remaining bytes from the current cursor position onward.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset.min(self.data.len())..]
    }
}

/// Cursor over the table-level extras region (CONNECTION / ENGINE /
/// partition expression / fulltext parser names / table comment).
pub struct ExtraCursor<'a> {
    pub data: &'a [u8],
    pub offset: usize,
}

impl<'a> ExtraCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ExtraCursor { data, offset: 0 }
    }

    /// Read a NUL-terminated string starting at the current offset,
    /// advancing past the terminator. Returns `""` if no terminator is
    /// found before the end of the region.
    pub fn decode_parser(&mut self) -> String {
        let data = &self.data[self.offset.min(self.data.len())..];
        match data.iter().position(|&b| b == 0) {
            Some(idx) => {
                self.offset += idx + 1;
                String::from_utf8_lossy(&data[..idx]).into_owned()
            }
            None => String::new(),
        }
    }

    /// Read a `u16_LE`-length-prefixed string at the current offset.
    pub fn decode_table_comment(&self) -> Result<String, FrmError> {
        let data = &self.data[self.offset.min(self.data.len())..];
        let length = crate::bytes::read_uint_le(data, 2)? as usize;
        if data.len() < 2 + length {
            return Err(FrmError::Truncated(
                "extras: table comment exceeds region".to_string(),
            ));
        }
        Ok(String::from_utf8_lossy(&data[2..2 + length]).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_names_region() {
        let data = [0x01, b'i', b'd', 0xFF, b'n', b'a', b'm', b'e', 0x00, 0x00];
        assert_eq!(split_names(&data), vec!["id", "name"]);
    }

    #[test]
    fn splits_label_groups() {
        // one group: marker, "a", 0xFF, "b", marker
        let data = [0x00, b'a', 0xFF, b'b', 0x00, 0xFF];
        let groups = split_labels(&data);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn comments_cursor_reads_sequentially() {
        let data = b"helloworld";
        let mut cur = CommentsCursor::new(data);
        assert_eq!(cur.next(5).unwrap(), b"hello");
        assert_eq!(cur.next(5).unwrap(), b"world");
        assert!(cur.next(1).is_err());
    }

    #[test]
    fn extra_cursor_parses_nul_terminated() {
        let data = b"parser_name\0trailing";
        let mut cur = ExtraCursor::new(data);
        assert_eq!(cur.decode_parser(), "parser_name");
    }
}
