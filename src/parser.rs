use terrors::OneOf;

use crate::error::DecodeError;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse `.properties` text, handing each entry to `sink` in file order.
///
/// Follows the `java.util.Properties` grammar:
///   - Lines starting with `#` or `!` are comments. Blank lines are ignored.
///   - The key ends at the first unescaped `=`, `:` or whitespace.
///   - A line ending in an odd number of backslashes continues on the next line.
///   - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded; any other
///     escaped character stands for itself.
///
/// Entries before a malformed `\u` escape have already reached `sink` when
/// the error is returned.
pub fn parse(input: &str, mut sink: impl FnMut(String, String)) -> Result<(), OneOf<(DecodeError,)>> {
    let normalized = input.replace("\r\n", "\n");
    let mut lines = normalized.split(['\n', '\r']).enumerate();

    while let Some((idx, line)) = lines.next() {
        let line = line.trim_start_matches(WHITESPACE);

        // Skip blanks and comments
        if line.is_empty() || line.starts_with(['#', '!']) {
            continue;
        }

        // Join continuation lines into one logical line
        let mut logical = String::new();
        let mut current = line;
        loop {
            if !continues(current) {
                logical.push_str(current);
                break;
            }
            logical.push_str(&current[..current.len() - 1]);
            match lines.next() {
                Some((_, next)) => current = next.trim_start_matches(WHITESPACE),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        let key = unescape(key, idx + 1)?;
        let value = unescape(value, idx + 1)?;
        sink(key, value);
    }

    Ok(())
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut has_sep = false;
    let mut escaped = false;

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                has_sep = true;
                break;
            }
            ' ' | '\t' | '\x0c' => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    // Whitespace, then at most one separator, then whitespace again
    let mut rest = line.get(key_end + 1..).unwrap_or("");
    loop {
        rest = rest.trim_start_matches(WHITESPACE);
        match rest.strip_prefix(['=', ':']) {
            Some(after) if !has_sep => {
                has_sep = true;
                rest = after;
            }
            _ => break,
        }
    }

    (&line[..key_end], rest)
}

fn unescape(raw: &str, line: usize) -> Result<String, OneOf<(DecodeError,)>> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    // \u escapes are UTF-16 code units, so decode through UTF-16 to pair surrogates
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut buf = [0u16; 2];
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let c = if c != '\\' {
            c
        } else {
            match chars.next() {
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                        return Err(OneOf::new(DecodeError::MalformedEscape { line }));
                    }
                    let unit = u16::from_str_radix(&hex, 16)
                        .map_err(|_| OneOf::new(DecodeError::MalformedEscape { line }))?;
                    units.push(unit);
                    continue;
                }
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\x0c',
                Some(other) => other,
                None => break,
            }
        };
        units.extend_from_slice(c.encode_utf16(&mut buf));
    }

    Ok(String::from_utf16_lossy(&units))
}
