//! View-flavour `.frm` decoder (C13): the `TYPE=VIEW` file is plain ASCII
//! `key=value` lines rather than the table flavour's dense binary layout.
//! MD5-validates the unescaped `query` body against the stored digest.

use crate::ident;
use crate::FrmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Undefined,
    TmpTable,
    Merge,
}

impl Algorithm {
    fn parse(value: &str) -> Self {
        match value {
            "1" => Algorithm::TmpTable,
            "2" => Algorithm::Merge,
            _ => Algorithm::Undefined,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Algorithm::Undefined => "UNDEFINED",
            Algorithm::TmpTable => "TMPTABLE",
            Algorithm::Merge => "MERGE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuidType {
    Invoker,
    Definer,
    Default,
}

impl SuidType {
    fn parse(value: &str) -> Self {
        match value {
            "1" => SuidType::Definer,
            "2" => SuidType::Default,
            _ => SuidType::Invoker,
        }
    }

    fn name(self) -> &'static str {
        match self {
            SuidType::Invoker => "INVOKER",
            SuidType::Definer => "DEFINER",
            SuidType::Default => "DEFAULT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOption {
    None,
    Local,
    Cascaded,
}

impl CheckOption {
    fn parse(value: &str) -> Self {
        match value {
            "1" => CheckOption::Local,
            "2" => CheckOption::Cascaded,
            _ => CheckOption::None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            CheckOption::None => "NONE",
            CheckOption::Local => "LOCAL",
            CheckOption::Cascaded => "CASCADED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct View {
    pub name: String,
    pub algorithm: Algorithm,
    pub definer_user: String,
    pub definer_host: String,
    pub suid: SuidType,
    pub body: String,
    pub check_option: CheckOption,
    pub stored_md5: String,
    pub computed_md5: String,
    /// Raw `timestamp=` value, kept as the literal `YYYY-MM-DD HH:MM:SS`
    /// text rather than parsed into a calendar type — nothing in this
    /// decoder needs to do arithmetic on it, only print it back.
    pub timestamp: String,
}

impl View {
    pub fn decode(path: &str, data: &[u8]) -> Result<Self, FrmError> {
        let text = String::from_utf8_lossy(data);

        let mut algorithm = Algorithm::Undefined;
        let mut definer_user = String::new();
        let mut definer_host = String::new();
        let mut suid = SuidType::Invoker;
        let mut body = String::new();
        let mut check_option = CheckOption::None;
        let mut stored_md5 = String::new();
        let mut timestamp = String::new();

        for line in text.split('\n') {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            match key {
                "query" => body = unescape(value),
                "md5" => stored_md5 = value.to_string(),
                "algorithm" => algorithm = Algorithm::parse(value),
                "definer_user" => definer_user = value.to_string(),
                "definer_host" => definer_host = value.to_string(),
                "suid" => suid = SuidType::parse(value),
                "with_check_option" => check_option = CheckOption::parse(value),
                "timestamp" => timestamp = value.to_string(),
                // updatable / create-version / source / client_cs_name /
                // connection_cl_name / view_body_utf8: not rendered.
                _ => {}
            }
        }

        let name = ident::decode_filename(&ident::frm_stem(path))?;
        let computed_md5 = format!("{:x}", md5::compute(body.as_bytes()));
        if stored_md5 != computed_md5 {
            return Err(FrmError::Mismatch(format!(
                "view checksum mismatch: stored {}, computed {}",
                stored_md5, computed_md5
            )));
        }

        Ok(View {
            name,
            algorithm,
            definer_user,
            definer_host,
            suid,
            body,
            check_option,
            stored_md5,
            computed_md5,
            timestamp,
        })
    }

    pub fn render(&self) -> String {
        let security = if self.suid.name() != "DEFAULT" {
            self.suid.name()
        } else {
            "DEFINER"
        };
        let mut out = format!(
            "CREATE ALGORITHM={} DEFINER=`{}`@`{}` SQL SECURITY {} VIEW `{}` AS {}",
            self.algorithm.name(),
            self.definer_user,
            self.definer_host,
            security,
            self.name.replace('`', "``"),
            self.body
        );
        if self.check_option != CheckOption::None {
            out.push_str(&format!(" WITH {} CHECK OPTION", self.check_option.name()));
        }
        out.push(';');
        out
    }

    pub fn render_with_header(&self) -> String {
        format!(
            "--\n-- View: {}\n-- Timestamp: {}\n-- Stored MD5: {}\n-- Computed MD5: {}\n--\n{}",
            self.name, self.timestamp, self.stored_md5, self.computed_md5, self.render()
        )
    }
}

/// Reverse the escaping MySQL applies to a view's stored `query=` line:
/// `\b \t \n \r \\` pass through unchanged (both characters kept), `\s`
/// becomes a literal space, and `\"`/`\'` drop their backslash.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                out.push(' ');
            }
            Some('"') => {
                chars.next();
                out.push('"');
            }
            Some('\'') => {
                chars.next();
                out.push('\'');
            }
            Some(&next) if matches!(next, 'b' | 't' | 'n' | 'r' | '\\') => {
                chars.next();
                out.push('\\');
                out.push(next);
            }
            _ => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_maps_s_to_space() {
        assert_eq!(unescape(r"select\s1"), "select 1");
    }

    #[test]
    fn unescape_drops_backslash_from_quotes() {
        assert_eq!(unescape(r#"a\"b\'c"#), "a\"b'c");
    }

    #[test]
    fn unescape_leaves_named_escapes_intact() {
        assert_eq!(unescape(r"line1\nline2"), "line1\\nline2");
    }

    #[test]
    fn decode_rejects_md5_mismatch() {
        let data = b"TYPE=VIEW\nquery=select 1\nmd5=deadbeef\nalgorithm=0\ndefiner_user=root\ndefiner_host=localhost\nsuid=1\n";
        let err = View::decode("v.frm", data).unwrap_err();
        assert!(matches!(err, FrmError::Mismatch(_)));
    }

    #[test]
    fn decode_accepts_matching_md5_and_renders() {
        let body = "select 1 AS `x`";
        let digest = format!("{:x}", md5::compute(body.as_bytes()));
        let data = format!(
            "TYPE=VIEW\nquery={}\nmd5={}\nalgorithm=0\ndefiner_user=root\ndefiner_host=localhost\nsuid=1\n",
            body, digest
        );
        let view = View::decode("v.frm", data.as_bytes()).unwrap();
        assert_eq!(
            view.render(),
            "CREATE ALGORITHM=UNDEFINED DEFINER=`root`@`localhost` SQL SECURITY DEFINER VIEW `v` AS select 1 AS `x`;"
        );
    }
}
