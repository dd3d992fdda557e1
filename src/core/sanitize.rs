// src/core/sanitize.rs

/// Decode the name part of an entity (`amp`, `#8211`, `#x41`).
pub fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "minus" => '\u{2212}',
        "thinsp" | "ensp" | "emsp" => ' ',
        _ => return None,
    };
    Some(ch)
}

/// Decode entities in attribute values or text; unknown ones are left as-is.
pub fn normalize_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => { out.push(ch); rest = &tail[semi + 1..]; }
            None => { out.push('&'); rest = tail; }
        }
    }
    out.push_str(rest);
    out
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// File-system friendly stem: spaces become '_', other punctuation is dropped.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

/// Remove any `[ ... ]` bracket tags (footnote markers like `[a]`, `[12]`).
/// Greedy within each bracket pair, no nesting.
pub fn strip_brackets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_bracket = false;
    for ch in s.chars() {
        match ch {
            '[' => in_bracket = true,
            ']' => in_bracket = false,
            _ if !in_bracket => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Parse a table count like `1,044`, `12[a]` or `—` (dash counts as zero).
pub fn parse_count(s: &str) -> Option<u32> {
    let cleaned: String = strip_brackets(s)
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{a0}'))
        .collect();
    if cleaned.is_empty() || matches!(cleaned.as_str(), "-" | "\u{2013}" | "\u{2014}") {
        return Some(0);
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_numeric_and_named() {
        assert_eq!(normalize_entities("A&amp;B &#39;q&#39; &#x2013; &bogus; &"), "A&B 'q' \u{2013} &bogus; &");
    }

    #[test]
    fn filename_stems() {
        assert_eq!(sanitize_filename("Modern pentathlon", "sport"), "Modern_pentathlon");
        assert_eq!(sanitize_filename("  ?? ", "sport"), "sport");
        assert_eq!(sanitize_filename("Beach/Volley", "x"), "BeachVolley");
    }

    #[test]
    fn counts_tolerate_separators_and_footnotes() {
        assert_eq!(parse_count("1,044"), Some(1044));
        assert_eq!(parse_count("12[a]"), Some(12));
        assert_eq!(parse_count(" \u{2013} "), Some(0));
        assert_eq!(parse_count(""), Some(0));
        assert_eq!(parse_count("n/a"), None);
    }
}
