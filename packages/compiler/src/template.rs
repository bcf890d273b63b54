//! Source fragments emitted by the compiler.
//!
//! Rendering is a pure function of its input. Every fragment is a piece of a
//! single `register` function; only the concatenation of a preamble, any
//! number of entries and an epilogue is valid Rust.

use chrono::{DateTime, Datelike, Timelike, Utc};
use embedfs_core::ZERO_TIME;

/// One fragment of generated source, with the data it renders.
#[derive(Debug, Clone, Copy)]
pub enum Template<'a> {
    /// Header, signature and mount lookup.
    Preamble { mount_path: &'a str },
    /// A `Mount::add_dir` call.
    Directory {
        path: &'a str,
        mod_time: DateTime<Utc>,
    },
    /// A `Mount::add_file` call with the payload inlined.
    File {
        path: &'a str,
        size: u64,
        mod_time: DateTime<Utc>,
        data: &'a [u8],
    },
    /// Closes the function.
    Epilogue,
}

/// Render a fragment.
pub fn render(template: &Template<'_>) -> String {
    match *template {
        Template::Preamble { mount_path } => format!(
            "/// Code generated by embedfs. DO NOT EDIT.\n\
             #[allow(unused_variables)]\n\
             pub fn register(vfs: &mut embedfs_core::Vfs) -> embedfs_core::Result<()> {{\n\
             let m = match vfs.mount_mut({path:?}) {{\n\
             Some(m) => m,\n\
             None => panic!(\"embedfs: mount point {{:?}} is not registered\", {path:?}),\n\
             }};\n",
            path = mount_path
        ),
        Template::Directory { path, mod_time } => format!(
            "m.add_dir({:?}, embedfs_core::NodeInfo {{ is_dir: true, size: 0, mod_time: {} }})?;\n",
            path,
            time_expr(mod_time)
        ),
        Template::File {
            path,
            size,
            mod_time,
            data,
        } => format!(
            "m.add_file({:?}, embedfs_core::NodeInfo {{ is_dir: false, size: {}, mod_time: {} }}, {})?;\n",
            path,
            size,
            time_expr(mod_time),
            payload_expr(data)
        ),
        Template::Epilogue => "Ok(())\n}\n".to_string(),
    }
}

/// Expression rebuilding a timestamp in UTC.
pub fn time_expr(t: DateTime<Utc>) -> String {
    if t == ZERO_TIME {
        return "embedfs_core::ZERO_TIME".to_string();
    }
    format!(
        "embedfs_core::utc_date({}, {}, {}, {}, {}, {}, {})",
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second(),
        t.nanosecond()
    )
}

/// Byte-string literal holding `data`, or the empty payload constant.
pub fn payload_expr(data: &[u8]) -> String {
    if data.is_empty() {
        return "embedfs_core::Payload::EMPTY".to_string();
    }
    let mut literal = String::with_capacity(data.len() + 3);
    literal.push_str("b\"");
    for &byte in data {
        for escaped in std::ascii::escape_default(byte) {
            literal.push(escaped as char);
        }
    }
    literal.push('"');
    literal
}

/// Render a sequence of fragments into one buffer.
pub fn render_all<'a>(templates: impl IntoIterator<Item = Template<'a>>) -> String {
    let mut out = String::new();
    for template in templates {
        out.push_str(&render(&template));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedfs_core::utc_date;

    #[test]
    fn time_renders_fields() {
        let t = utc_date(2024, 3, 9, 7, 5, 1, 42);
        assert_eq!(
            time_expr(t),
            "embedfs_core::utc_date(2024, 3, 9, 7, 5, 1, 42)"
        );
        assert_eq!(time_expr(ZERO_TIME), "embedfs_core::ZERO_TIME");
    }

    #[test]
    fn payload_escapes_bytes() {
        assert_eq!(payload_expr(b"hi"), "b\"hi\"");
        assert_eq!(payload_expr(b"a\"b\\\n"), "b\"a\\\"b\\\\\\n\"");
        assert_eq!(payload_expr(&[0x1F, 0x8B, 0x08]), "b\"\\x1f\\x8b\\x08\"");
        assert_eq!(payload_expr(b""), "embedfs_core::Payload::EMPTY");
    }

    #[test]
    fn directory_fragment() {
        let out = render(&Template::Directory {
            path: "/app/a",
            mod_time: ZERO_TIME,
        });
        assert_eq!(
            out,
            "m.add_dir(\"/app/a\", embedfs_core::NodeInfo { is_dir: true, size: 0, mod_time: embedfs_core::ZERO_TIME })?;\n"
        );
    }

    #[test]
    fn file_fragment() {
        let out = render(&Template::File {
            path: "/app/a/b.txt",
            size: 2,
            mod_time: ZERO_TIME,
            data: b"hi",
        });
        assert!(out.starts_with("m.add_file(\"/app/a/b.txt\""));
        assert!(out.contains("is_dir: false, size: 2"));
        assert!(out.ends_with(", b\"hi\")?;\n"));
    }

    #[test]
    fn paths_are_quoted() {
        let out = render(&Template::Directory {
            path: "/app/quote\"d",
            mod_time: ZERO_TIME,
        });
        assert!(out.contains("\"/app/quote\\\"d\""));
    }

    #[test]
    fn preamble_and_epilogue_parse_together() {
        let source = render_all([
            Template::Preamble { mount_path: "/app" },
            Template::Epilogue,
        ]);
        assert!(source.contains("vfs.mount_mut(\"/app\")"));
        assert!(source.contains("panic!"));
        syn::parse_file(&source).unwrap();
    }
}
