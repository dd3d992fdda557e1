// src/core/html.rs
// Case-insensitive tag scanning over raw HTML.
// Only ASCII is folded, so byte offsets found in the lowercased copy are
// valid in the original document.

use super::sanitize::normalize_entities;

pub fn to_lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

#[inline]
fn is_name_end(b: Option<&u8>) -> bool {
    matches!(b, None | Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n'))
}

/// Index just past the `>` closing the tag that starts at `start` (a `<`).
/// Quoted attribute values may contain `>`.
pub fn opener_end(b: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    let mut in_s = false; // '
    let mut in_d = false; // "
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}

/// A document plus its lowercased twin, for repeated scans.
pub struct Scanner<'a> {
    src: &'a str,
    lc: String,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, lc: to_lower(src) }
    }

    /// Offset of the next `needle` (matched case-insensitively) at or after `from`.
    pub fn find(&self, needle: &str, from: usize) -> Option<usize> {
        let needle = to_lower(needle);
        Some(self.lc.get(from..)?.find(&needle)? + from)
    }

    /// Offset of the next `<tag` whose name ends right there (`<a` never matches `<abbr`).
    pub fn find_open(&self, tag: &str, from: usize) -> Option<usize> {
        let pat = join!("<", &to_lower(tag));
        let mut pos = from;
        loop {
            let at = self.lc.get(pos..)?.find(&pat)? + pos;
            if is_name_end(self.lc.as_bytes().get(at + pat.len())) {
                return Some(at);
            }
            pos = at + 1;
        }
    }

    /// Offset of the last `<tag` that starts before `before`.
    pub fn rfind_open(&self, tag: &str, before: usize) -> Option<usize> {
        let pat = join!("<", &to_lower(tag));
        let mut end = before.min(self.lc.len());
        loop {
            let at = self.lc.get(..end)?.rfind(&pat)?;
            if is_name_end(self.lc.as_bytes().get(at + pat.len())) {
                return Some(at);
            }
            end = at;
        }
    }

    fn find_close(&self, tag: &str, from: usize) -> Option<usize> {
        let pat = join!("</", &to_lower(tag));
        let mut pos = from;
        loop {
            let at = self.lc.get(pos..)?.find(&pat)? + pos;
            if is_name_end(self.lc.as_bytes().get(at + pat.len())) {
                return Some(at);
            }
            pos = at + 1;
        }
    }

    /// The next complete `<tag ...> ... </tag>` starting at or after `from`,
    /// honouring nested tags of the same name. Returns `(start, end)` with
    /// `end` just past the matching closing tag; `None` if unclosed.
    pub fn block(&self, tag: &str, from: usize) -> Option<(usize, usize)> {
        let start = self.find_open(tag, from)?;
        self.block_at(tag, start)
    }

    /// Like [`Scanner::block`] but `start` must already point at `<tag`.
    pub fn block_at(&self, tag: &str, start: usize) -> Option<(usize, usize)> {
        let b = self.src.as_bytes();
        let mut depth = 0usize;
        let mut pos = start;
        loop {
            let close = self.find_close(tag, pos)?;
            match self.find_open(tag, pos) {
                Some(open) if open < close => {
                    depth += 1;
                    pos = opener_end(b, open)?;
                }
                _ => {
                    let end = opener_end(b, close)?;
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some((start, end));
                    }
                    pos = end;
                }
            }
        }
    }

    /// Consecutive `tag` blocks in document order (nested blocks of the same
    /// tag are part of their parent, not yielded separately). An opener
    /// with no matching close is skipped.
    pub fn blocks<'s>(&'s self, tag: &'s str) -> impl Iterator<Item = &'a str> + 's {
        let mut pos = 0usize;
        std::iter::from_fn(move || {
            loop {
                let s = self.find_open(tag, pos)?;
                match self.block_at(tag, s) {
                    Some((s, e)) => {
                        pos = e;
                        return Some(&self.src[s..e]);
                    }
                    None => pos = s + 1,
                }
            }
        })
    }

    /// Opening tags `<tag ...>` in document order; no matching close needed.
    pub fn openers<'s>(&'s self, tag: &'s str) -> impl Iterator<Item = &'a str> + 's {
        let b = self.src.as_bytes();
        let mut pos = 0usize;
        std::iter::from_fn(move || {
            let s = self.find_open(tag, pos)?;
            let e = opener_end(b, s)?;
            pos = e;
            Some(&self.src[s..e])
        })
    }
}

/// `<th>` and `<td>` blocks of a table row, in document order.
pub fn cells(row: &str) -> Vec<&str> {
    let sc = Scanner::new(row);
    let mut out = Vec::new();
    let mut pos = 0usize;
    loop {
        let next = match (sc.find_open("td", pos), sc.find_open("th", pos)) {
            (Some(d), Some(h)) if h < d => Some((h, "th")),
            (Some(d), _) => Some((d, "td")),
            (None, Some(h)) => Some((h, "th")),
            (None, None) => None,
        };
        let Some((at, tag)) = next else { break };
        match sc.block_at(tag, at) {
            Some((s, e)) => { out.push(&row[s..e]); pos = e; }
            None => pos = at + 1,
        }
    }
    out
}

/// The opening tag of a block, `<td class="x">` of `<td class="x">..</td>`.
pub fn opener(block: &str) -> &str {
    match opener_end(block.as_bytes(), 0) {
        Some(e) => &block[..e],
        None => block,
    }
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return INNER (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(oe) = opener_end(block.as_bytes(), 0) {
        if let Some(cs) = block.rfind("</") {
            if cs >= oe {
                return &block[oe..cs];
            }
        }
        return &block[oe..];
    }
    ""
}

/// Attribute value from an opening tag, entity-decoded.
/// Handles double, single and unquoted values; names match case-insensitively.
pub fn attr(opener: &str, name: &str) -> Option<String> {
    let b = opener.as_bytes();
    let n = b.len();
    // skip '<' + tag name
    let mut i = 1;
    while i < n && !matches!(b[i], b' ' | b'\t' | b'\r' | b'\n' | b'>' | b'/') { i += 1; }

    while i < n {
        while i < n && matches!(b[i], b' ' | b'\t' | b'\r' | b'\n' | b'/') { i += 1; }
        if i >= n || b[i] == b'>' { return None; }

        let name_start = i;
        while i < n && !matches!(b[i], b'=' | b' ' | b'\t' | b'\r' | b'\n' | b'>' | b'/') { i += 1; }
        let attr_name = &opener[name_start..i];

        while i < n && matches!(b[i], b' ' | b'\t' | b'\r' | b'\n') { i += 1; }
        let value = if i < n && b[i] == b'=' {
            i += 1;
            while i < n && matches!(b[i], b' ' | b'\t' | b'\r' | b'\n') { i += 1; }
            match b.get(i) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let vs = i + 1;
                    let ve = opener[vs..].find(q as char).map(|e| vs + e).unwrap_or(n);
                    i = (ve + 1).min(n);
                    &opener[vs..ve]
                }
                _ => {
                    let vs = i;
                    while i < n && !matches!(b[i], b' ' | b'\t' | b'\r' | b'\n' | b'>') { i += 1; }
                    &opener[vs..i]
                }
            }
        } else {
            ""
        };

        if attr_name.eq_ignore_ascii_case(name) {
            return Some(normalize_entities(value));
        }
    }
    None
}

/// Does the opening tag carry `class` among its class tokens?
pub fn has_class(opener: &str, class: &str) -> bool {
    attr(opener, "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// Remove all HTML tags, decode entities, collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    super::vischars::visible_text(s.as_ref())
}
