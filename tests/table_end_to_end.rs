//! End-to-end byte-buffer fixtures exercising the full decode pipeline
//! (FileInfo -> FormInfo -> columns -> keys -> options -> render), built
//! by hand at the exact on-disk offsets rather than loaded from a golden
//! file.

use frm::schema;
use frm::FrmError;

/// `CREATE TABLE `t` (`id` int(11) NOT NULL AUTO_INCREMENT,`n` int(11) NOT
/// NULL DEFAULT '7',PRIMARY KEY (`id`)) ENGINE=InnoDB DEFAULT CHARSET=utf8;`
///
/// Layout: 64-byte header, a 4-byte FormInfo pointer, the 288-byte FormInfo
/// block, two 17-byte column metadata records, the names region, the key
/// section (one key, one part), the defaults region (a null bitmap byte
/// plus `n`'s 4-byte default), and a minimal extras region that falls back
/// to the header's engine code.
fn tiny_int_pk_fixture() -> Vec<u8> {
    const FORM_OFFSET: u32 = 68;
    const METADATA_OFFSET: u32 = FORM_OFFSET + 288;
    const NAMES_LEN: u32 = 7; // [0x01]"id"[0xFF]"n"[0x00][0x00]
    const NAMES_OFFSET: u32 = METADATA_OFFSET + 17 * 2;
    const KEYS_OFFSET: u32 = NAMES_OFFSET + NAMES_LEN;
    const KEYS_LEN: u32 = 31;
    const DEFAULTS_OFFSET: u32 = KEYS_OFFSET + KEYS_LEN;
    const RECORD_LEN: u32 = 5; // 1 null-bitmap byte + 4-byte int default
    const EXTRA_OFFSET: u32 = DEFAULTS_OFFSET + RECORD_LEN;
    const EXTRA_LEN: u32 = 6;
    const TOTAL: u32 = EXTRA_OFFSET + EXTRA_LEN;

    let mut data = vec![0u8; TOTAL as usize];

    // FileInfo header
    data[0x00] = 0xFE;
    data[0x01] = 0x01;
    data[0x02] = 10; // version
    data[0x03] = 12; // engine: InnoDB
    data[0x04..0x06].copy_from_slice(&0u16.to_le_bytes()); // names_length (form pointer offset)
    data[0x06..0x08].copy_from_slice(&(KEYS_OFFSET as u16).to_le_bytes()); // key_info_offset
    data[0x0E..0x10].copy_from_slice(&(KEYS_LEN as u16).to_le_bytes()); // tmp_key_info_length
    data[0x10..0x12].copy_from_slice(&(RECORD_LEN as u16).to_le_bytes()); // record_length
    data[0x26] = 33; // utf8_general_ci
    data[0x37..0x3B].copy_from_slice(&EXTRA_LEN.to_le_bytes()); // extra_info_length

    // FormInfo pointer, right after the header since names_length == 0
    data[64..68].copy_from_slice(&FORM_OFFSET.to_le_bytes());

    // FormInfo block fields (all offsets relative to FORM_OFFSET)
    let form = |off: u32| FORM_OFFSET as usize + off as usize;
    data[form(46)] = 0; // table_comment_length (direct, empty)
    data[form(258)..form(258) + 2].copy_from_slice(&2u16.to_le_bytes()); // column_count
    data[form(260)..form(260) + 2].copy_from_slice(&0u16.to_le_bytes()); // screens_length
    data[form(268)..form(268) + 2].copy_from_slice(&(NAMES_LEN as u16).to_le_bytes()); // names_length
    data[form(274)..form(274) + 2].copy_from_slice(&0u16.to_le_bytes()); // labels_length
    data[form(282)..form(282) + 2].copy_from_slice(&0u16.to_le_bytes()); // null_fields
    data[form(284)..form(284) + 2].copy_from_slice(&0u16.to_le_bytes()); // comments_length

    // Column metadata: `id` (ordinal 0)
    let id_meta = METADATA_OFFSET as usize;
    data[id_meta + 3..id_meta + 5].copy_from_slice(&11u16.to_le_bytes()); // length
    data[id_meta + 8..id_meta + 10].copy_from_slice(&1u16.to_le_bytes()); // flags: signed
    data[id_meta + 10] = 15; // utype: NextNumber (AUTO_INCREMENT)
    data[id_meta + 13] = 3; // type_code: Long
    data[id_meta + 14] = 33; // collation low byte

    // Column metadata: `n` (ordinal 1)
    let n_meta = id_meta + 17;
    data[n_meta + 3..n_meta + 5].copy_from_slice(&11u16.to_le_bytes()); // length
    data[n_meta + 5..n_meta + 8].copy_from_slice(&[2, 0, 0]); // defaults offset hint (1+1)
    data[n_meta + 8..n_meta + 10].copy_from_slice(&1u16.to_le_bytes()); // flags: signed
    data[n_meta + 13] = 3; // type_code: Long
    data[n_meta + 14] = 33; // collation low byte

    // Names region
    let names = NAMES_OFFSET as usize;
    data[names] = 0x01;
    data[names + 1..names + 3].copy_from_slice(b"id");
    data[names + 3] = 0xFF;
    data[names + 4] = b'n';
    data[names + 5] = 0x00;
    data[names + 6] = 0x00;

    // Keys region: one PRIMARY KEY over one part
    let keys = KEYS_OFFSET as usize;
    data[keys] = 1; // count
    data[keys + 1] = 1; // part_count
    data[keys + 4..keys + 6].copy_from_slice(&8u16.to_le_bytes()); // extra_length
    data[keys + 6..keys + 8].copy_from_slice(&1u16.to_le_bytes()); // raw flags (NOSAME set -> unique)
    data[keys + 10] = 1; // parts_count
    data[keys + 14..keys + 16].copy_from_slice(&1u16.to_le_bytes()); // fieldnr = 1 (`id`)
    data[keys + 21..keys + 23].copy_from_slice(&11u16.to_le_bytes()); // part length
    data[keys + 23..keys + 30].copy_from_slice(b"PRIMARY");
    data[keys + 30] = 0x00;

    // Defaults region: null bitmap byte + `n`'s int default (7)
    let defaults = DEFAULTS_OFFSET as usize;
    data[defaults] = 0;
    data[defaults + 1..defaults + 5].copy_from_slice(&7i32.to_le_bytes());

    // Extras region: all-zero falls back to the header's engine code
    debug_assert_eq!(data.len(), TOTAL as usize);
    let _ = EXTRA_OFFSET;

    data
}

#[test]
fn tiny_int_pk_renders_expected_ddl() {
    let data = tiny_int_pk_fixture();
    let schema = schema::parse("t.frm", &data).unwrap();
    assert_eq!(
        schema.render(),
        "CREATE TABLE `t` (`id` int(11) NOT NULL AUTO_INCREMENT,`n` int(11) NOT NULL DEFAULT '7',PRIMARY KEY (`id`)) ENGINE=InnoDB DEFAULT CHARSET=utf8;"
    );
}

#[test]
fn truncating_the_fixture_errors_instead_of_panicking() {
    let data = tiny_int_pk_fixture();
    for cut in [64usize, 100, 200, data.len() - 1] {
        let truncated = &data[..cut];
        match schema::parse("t.frm", truncated) {
            Ok(_) => panic!("truncated input at {} unexpectedly parsed", cut),
            Err(FrmError::Truncated(_)) | Err(FrmError::MalformedKeySection(_)) => {}
            Err(other) => panic!("unexpected error kind at {}: {:?}", cut, other),
        }
    }
}

#[test]
fn flipping_bytes_never_panics() {
    let base = tiny_int_pk_fixture();
    for i in 0..base.len() {
        let mut mutated = base.clone();
        mutated[i] ^= 0xFF;
        // Must either decode successfully or return one of the declared
        // error kinds -- never panic, never read out of bounds.
        let _ = schema::parse("t.frm", &mutated);
    }
}

#[test]
fn view_basic_round_trips_through_schema_dispatch() {
    let body = "select 1 AS `x`";
    let digest = format!("{:x}", md5::compute(body.as_bytes()));
    let text = format!(
        "TYPE=VIEW\nquery={}\nmd5={}\nalgorithm=0\ndefiner_user=root\ndefiner_host=localhost\nsuid=1\n",
        body, digest
    );
    let schema = schema::parse("v.frm", text.as_bytes()).unwrap();
    assert_eq!(
        schema.render(),
        "CREATE ALGORITHM=UNDEFINED DEFINER=`root`@`localhost` SQL SECURITY DEFINER VIEW `v` AS select 1 AS `x`;"
    );
}
