//! String literal decoding.

/// Decodes a quoted string token (quotes included).
///
/// The lexer already validated the escape syntax, so only surrogate
/// handling can fail here.
pub(crate) fn decode_string(raw: &str) -> Result<String, String> {
    let body = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .map_err(|_| format!("invalid unicode escape `\\u{hex}`"))?;
                let decoded = char::from_u32(code)
                    .ok_or_else(|| format!("unicode escape `\\u{hex}` is not a scalar value"))?;
                out.push(decoded);
            }
            Some(other) => return Err(format!("invalid escape sequence `\\{other}`")),
            None => return Err("unterminated escape sequence".to_string()),
        }
    }

    Ok(out)
}

/// Decodes a block string token (triple quotes included), removing the
/// common indentation and leading/trailing blank lines.
pub(crate) fn decode_block_string(raw: &str) -> String {
    let body = raw[3..raw.len() - 3].replace(r#"\""""#, r#"""""#);
    let lines: Vec<&str> = body.split("\r\n").flat_map(|l| l.split(['\n', '\r'])).collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            (indent < line.len()).then_some(indent)
        })
        .min()
        .unwrap_or(0);

    let mut lines: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| match i {
            0 => *line,
            _ if line.len() >= common_indent => &line[common_indent..],
            _ => "",
        })
        .collect();

    let is_blank = |l: &&str| l.trim_matches([' ', '\t']).is_empty();
    while lines.first().is_some_and(is_blank) {
        lines.remove(0);
    }
    while lines.last().is_some_and(is_blank) {
        lines.pop();
    }

    lines.join("\n")
}
