// src/core/vischars.rs
// Visible-text character iterator over an HTML fragment.
// Skips tags (<...>, quote-aware), comments and the bodies of <script>/<style>,
// decodes entities (&amp; &#8211; ...), collapses ASCII whitespace to a single ' '.

use super::sanitize::decode_entity;

pub struct VisChars<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
}

impl<'a> VisChars<'a> {
    pub fn new(s: &'a str) -> Self { Self { s, b: s.as_bytes(), i: 0, n: s.len() } }

    #[inline]
    fn skip_tag(&mut self) {
        // called when current byte is '<'
        if self.s[self.i..].starts_with("<!--") {
            self.i = match self.s[self.i + 4..].find("-->") {
                Some(off) => self.i + 4 + off + 3,
                None => self.n,
            };
            return;
        }

        let raw = self.raw_element_name();
        self.i = super::html::opener_end(self.b, self.i).unwrap_or(self.n);

        // Text inside script/style is never visible.
        if let Some(name) = raw {
            let close = join!("</", name);
            let lc_rest = self.s[self.i..].to_ascii_lowercase();
            self.i = match lc_rest.find(&close) {
                Some(off) => {
                    let at = self.i + off;
                    super::html::opener_end(self.b, at).unwrap_or(self.n)
                }
                None => self.n,
            };
        }
    }

    /// `Some("script")` / `Some("style")` when the tag at `i` opens one of them.
    fn raw_element_name(&self) -> Option<&'static str> {
        let rest = &self.b[self.i + 1..];
        for name in ["script", "style"] {
            let len = name.len();
            if rest.len() > len
                && rest[..len].eq_ignore_ascii_case(name.as_bytes())
                && matches!(rest[len], b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n')
            {
                return Some(name);
            }
        }
        None
    }

    /// Called when current byte is '&'. Returns the decoded char, or `None`
    /// (leaving `i` untouched) when this is a bare ampersand.
    #[inline]
    fn take_entity(&mut self) -> Option<char> {
        let window_end = (self.i + 12).min(self.n);
        let semi = self.b[self.i + 1..window_end].iter().position(|&c| c == b';')?;
        let name = &self.s[self.i + 1..self.i + 1 + semi];
        let ch = decode_entity(name)?;
        self.i += semi + 2;
        Some(ch)
    }

    #[inline]
    fn next_char(&mut self) -> Option<char> {
        if self.i >= self.n { return None; }
        let c = self.b[self.i];
        if c < 0x80 { self.i += 1; Some(c as char) }
        else {
            let ch = self.s[self.i..].chars().next()?;
            self.i += ch.len_utf8();
            Some(ch)
        }
    }

    #[inline]
    fn skip_ws(&mut self) {
        while self.i < self.n {
            match self.b[self.i] { b' ' | b'\t' | b'\r' | b'\n' => self.i += 1, _ => break }
        }
    }
}

impl<'a> Iterator for VisChars<'a> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.n {
            match self.b[self.i] {
                b'<' => { self.skip_tag(); continue; }
                b'&' => {
                    match self.take_entity() {
                        Some(ch) if ch.is_whitespace() => { self.skip_ws(); return Some(' '); }
                        Some(ch) => return Some(ch),
                        None => { self.i += 1; return Some('&'); }
                    }
                }
                b' ' | b'\t' | b'\r' | b'\n' => {
                    // collapse consecutive whitespace to a single space
                    self.skip_ws();
                    return Some(' ');
                }
                _ => return self.next_char(),
            }
        }
        None
    }
}

/// Visible text of an HTML fragment, whitespace-collapsed and trimmed.
pub fn visible_text(fragment: &str) -> String {
    let mut out: String = VisChars::new(fragment).collect();
    // Tags between two spaces can leave doubles behind.
    out = super::sanitize::normalize_ws(&out);
    out
}
