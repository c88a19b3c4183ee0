use std::io::{self, Write};

/// Timestamp line written after the header comment, e.g. `#Fri Oct 16 09:30:00 +02:00 2026`.
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Z %Y";

/// Write entries in `.properties` format.
///
/// Output is plain ASCII: characters outside the printable range are written
/// as `\uXXXX` escapes, so it reads back unchanged through the parser.
pub fn write_properties<'a, W: Write>(
    writer: &mut W,
    comments: Option<&str>,
    entries: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> io::Result<()> {
    if let Some(comments) = comments {
        write_comments(writer, comments)?;
    }
    writeln!(writer, "#{}", chrono::Local::now().format(TIMESTAMP_FORMAT))?;

    for (key, value) in entries {
        writeln!(writer, "{}={}", escape(key, true), escape(value, false))?;
    }

    writer.flush()
}

fn write_comments<W: Write>(writer: &mut W, comments: &str) -> io::Result<()> {
    for (idx, line) in comments.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut escaped = String::with_capacity(line.len());
        for c in line.chars() {
            if c.is_ascii() && !c.is_ascii_control() {
                escaped.push(c);
            } else {
                push_unicode_escape(&mut escaped, c);
            }
        }

        // Continuation lines that already look like comments are kept as-is
        if idx > 0 && escaped.starts_with(['#', '!']) {
            writeln!(writer, "{escaped}")?;
        } else {
            writeln!(writer, "#{escaped}")?;
        }
    }
    Ok(())
}

/// Escape a key (`escape_space = true`) or a value for output.
///
/// Values only escape a leading space, since the parser would otherwise
/// swallow it as separator whitespace.
fn escape(s: &str, escape_space: bool) -> String {
    let mut out = String::with_capacity(s.len() * 2);

    for (idx, c) in s.chars().enumerate() {
        match c {
            ' ' if idx == 0 || escape_space => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }

    out
}

fn push_unicode_escape(out: &mut String, c: char) {
    let mut buf = [0u16; 2];
    for unit in c.encode_utf16(&mut buf) {
        out.push_str(&format!("\\u{unit:04X}"));
    }
}
