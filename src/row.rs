//! # Row
//!
//! A single line of the document: the raw bytes the user typed, the bytes as rendered (tabs
//! expanded to spaces), and a parallel highlight tag per rendered byte.
//!
//! Unicode normalization and variable-width glyphs are out of scope: one byte of `chars` always
//! renders to exactly one byte of `render`, except for tabs, which expand to one or more spaces.
//! This keeps cursor/column math a single linear pass with no grapheme bookkeeping.

use std::fmt::Write as _;

use crate::ansi_escape::{RESET_FMT, REVERSE_VIDEO};
use crate::error::Error;
use crate::syntax::{HlFlags, KeywordKind, Syntax};

/// Highlight classification of a single rendered byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HlTag {
    Normal,
    Number,
    String,
    Comment,
    KeywordStrong,
    KeywordRegular,
    Match,
}

impl HlTag {
    /// The ANSI foreground escape sequence for this tag, per the fixed color assignment: red for
    /// strings, yellow for comments, cyan for numbers, magenta for regular keywords, blue for
    /// strong keywords and search matches, default otherwise.
    fn ansi_code(self) -> &'static str {
        use crate::ansi_escape::{FG_BLUE, FG_CYAN, FG_DEFAULT, FG_MAGENTA, FG_RED, FG_YELLOW};
        match self {
            Self::Normal => FG_DEFAULT,
            Self::Number => FG_CYAN,
            Self::String => FG_RED,
            Self::Comment => FG_YELLOW,
            Self::KeywordRegular => FG_MAGENTA,
            Self::KeywordStrong | Self::Match => FG_BLUE,
        }
    }
}

/// A line of the document.
#[derive(Default)]
pub struct Row {
    /// The raw bytes of the line, as the user typed them.
    pub chars: Vec<u8>,
    /// `chars` with tabs expanded to spaces; one byte of `render` per rendered column.
    render: Vec<u8>,
    /// Highlight tag for each byte of `render`.
    hl: Vec<HlTag>,
    /// Whether this row ends inside an unterminated block comment; carried to the next row so the
    /// highlighter can continue the comment across the line break.
    pub ends_in_open_comment: bool,
    /// The rendered-column range currently matched by an in-progress search, if any.
    pub match_segment: Option<std::ops::Range<usize>>,
}

impl Row {
    /// Create a new row containing `chars`, with empty render/highlight state.
    pub fn new(chars: Vec<u8>) -> Self { Self { chars, ..Self::default() } }

    /// Number of rendered columns.
    pub fn render_len(&self) -> usize { self.render.len() }

    /// Rendered column corresponding to a `chars` byte offset, expanding tabs along the way.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let mut rx = 0;
        for &b in self.chars.iter().take(cx) {
            rx += if b == b'\t' { tab_stop - (rx % tab_stop) } else { 1 };
        }
        rx
    }

    /// Re-derive `render` and `hl` from `chars`. `prev_ends_in_open_comment` is the previous
    /// row's `ends_in_open_comment` flag; returns this row's own flag so the caller can decide
    /// whether to cascade the update to the next row.
    pub fn update(
        &mut self,
        syntax: Option<&Syntax>,
        prev_ends_in_open_comment: bool,
        tab_stop: usize,
    ) -> bool {
        self.render.clear();
        for &b in &self.chars {
            if b == b'\t' {
                let n = tab_stop - (self.render.len() % tab_stop);
                self.render.resize(self.render.len() + n, b' ');
            } else {
                self.render.push(b);
            }
        }
        self.update_syntax(syntax, prev_ends_in_open_comment)
    }

    /// Re-scan `render` and populate `hl`, following the scanner rules: an unterminated block
    /// comment carries forward via `ends_in_open_comment`; single-line strings, line comments,
    /// numbers and keywords are otherwise scoped to one row.
    fn update_syntax(&mut self, syntax: Option<&Syntax>, prev_ends_in_open_comment: bool) -> bool {
        self.hl = vec![HlTag::Normal; self.render.len()];
        let Some(syntax) = syntax else {
            self.ends_in_open_comment = false;
            return false;
        };

        let line = self.render.clone();
        let mut in_comment = prev_ends_in_open_comment && syntax.flags.contains(HlFlags::COMMENTS);
        let mut in_quote: Option<u8> = None;
        let mut prev_sep = true;
        let mut i = 0;

        while i < line.len() {
            if syntax.flags.contains(HlFlags::COMMENTS) {
                if !in_comment && in_quote.is_none() && line[i..].starts_with(b"//") {
                    self.hl[i..].fill(HlTag::Comment);
                    break;
                }
                if in_comment && in_quote.is_none() {
                    if line[i..].starts_with(b"*/") {
                        self.hl[i] = HlTag::Comment;
                        self.hl[i + 1] = HlTag::Comment;
                        i += 2;
                        in_comment = false;
                        prev_sep = true;
                        continue;
                    }
                    self.hl[i] = HlTag::Comment;
                    i += 1;
                    continue;
                }
                if !in_comment && in_quote.is_none() && line[i..].starts_with(b"/*") {
                    self.hl[i] = HlTag::Comment;
                    self.hl[i + 1] = HlTag::Comment;
                    i += 2;
                    in_comment = true;
                    continue;
                }
            }

            if syntax.flags.contains(HlFlags::STRINGS) {
                let c = line[i];
                if let Some(quote) = in_quote {
                    self.hl[i] = HlTag::String;
                    if c == b'\\' && i + 1 < line.len() {
                        self.hl[i + 1] = HlTag::String;
                        i += 2;
                        continue;
                    }
                    if c == quote {
                        in_quote = None;
                    }
                    i += 1;
                    continue;
                } else if c == b'"' || c == b'\'' {
                    in_quote = Some(c);
                    self.hl[i] = HlTag::String;
                    i += 1;
                    continue;
                }
            }

            if syntax.flags.contains(HlFlags::NUMBERS)
                && line[i].is_ascii_digit()
                && (prev_sep || (i > 0 && self.hl[i - 1] == HlTag::Number))
            {
                self.hl[i] = HlTag::Number;
                prev_sep = false;
                i += 1;
                continue;
            }

            if prev_sep {
                if let Some((kind, len)) = match_keyword(syntax, &line[i..]) {
                    let tag = match kind {
                        KeywordKind::Strong => HlTag::KeywordStrong,
                        KeywordKind::Regular => HlTag::KeywordRegular,
                    };
                    self.hl[i..i + len].fill(tag);
                    i += len;
                    prev_sep = false;
                    continue;
                }
            }

            prev_sep = is_sep(line[i]);
            i += 1;
        }

        // A string never continues past the end of its row.
        self.ends_in_open_comment = in_comment;
        self.ends_in_open_comment
    }

    /// Write this row's rendered bytes, from rendered column `offset` up to `max_len` bytes, into
    /// `buffer`, emitting color-change escapes as `hl` changes and resetting at the end.
    pub fn draw(&self, offset: usize, max_len: usize, buffer: &mut String) -> Result<(), Error> {
        let mut current = HlTag::Normal;
        let end = (offset + max_len).min(self.render.len());
        for rx in offset..end {
            let c = self.render[rx];
            let mut tag = self.hl[rx];
            if c.is_ascii_control() {
                let rendered = if c <= 26 { (b'@' + c) as char } else { '?' };
                write!(buffer, "{REVERSE_VIDEO}{rendered}{RESET_FMT}")?;
                if current != HlTag::Normal {
                    buffer.push_str(current.ansi_code());
                }
                continue;
            }
            if let Some(match_segment) = &self.match_segment {
                if match_segment.contains(&rx) {
                    tag = HlTag::Match;
                } else if rx == match_segment.end {
                    buffer.push_str(RESET_FMT);
                    current = HlTag::Normal;
                }
            }
            if current != tag {
                buffer.push_str(tag.ansi_code());
                current = tag;
            }
            buffer.push(c as char);
        }
        buffer.push_str(RESET_FMT);
        Ok(())
    }
}

/// Match a keyword at the start of `s`, honoring the whitespace/punctuation boundary the original
/// scanner uses: a keyword only matches if the byte following it is a separator.
fn match_keyword(syntax: &Syntax, s: &[u8]) -> Option<(KeywordKind, usize)> {
    syntax.keywords.iter().find_map(|&(kw, kind)| {
        let len = kw.len();
        (s.len() >= len && &s[..len] == kw.as_bytes() && s.get(len).copied().is_none_or(is_sep))
            .then_some((kind, len))
    })
}

/// A byte that ends a keyword or a number run: whitespace, NUL, or one of `,.()+-/*=~%<>[];`.
const fn is_sep(c: u8) -> bool {
    c.is_ascii_whitespace() || c == 0 || matches!(c, b',' | b'.' | b'(' | b')' | b'+' | b'-' | b'/' | b'*' | b'=' | b'~' | b'%' | b'<' | b'>' | b'[' | b']' | b';')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax;

    fn c_syntax() -> &'static Syntax { syntax::find("t.c").expect("C descriptor must exist") }

    #[test]
    fn tab_expansion() {
        let mut row = Row::new(b"a\tb".to_vec());
        row.update(None, false, 4);
        assert_eq!(row.render, b"a   b");
    }

    #[test]
    fn render_and_hl_same_length() {
        let mut row = Row::new(b"a\tbc".to_vec());
        row.update(Some(c_syntax()), false, 8);
        assert_eq!(row.render_len(), row.hl.len());
    }

    #[test]
    fn highlights_keyword_number_and_comment() {
        let mut row = Row::new(b"int x = 42; /* note */ y".to_vec());
        row.update(Some(c_syntax()), false, 8);
        assert_eq!(row.hl[0..3], [HlTag::KeywordRegular; 3]);
        let num_start = b"int x = ".len();
        assert_eq!(row.hl[num_start], HlTag::Number);
        let comment_start = b"int x = 42; ".len();
        assert_eq!(row.hl[comment_start], HlTag::Comment);
        assert_eq!(row.hl[comment_start + "/* note */".len() - 1], HlTag::Comment);
        assert!(!row.ends_in_open_comment);
    }

    #[test]
    fn digits_inside_an_identifier_are_not_numbers() {
        let mut row = Row::new(b"x42 = 42".to_vec());
        row.update(Some(c_syntax()), false, 8);
        assert!(row.hl[0..3].iter().all(|t| *t == HlTag::Normal));
        let num_start = b"x42 = ".len();
        assert_eq!(row.hl[num_start..num_start + 2], [HlTag::Number; 2]);
    }

    #[test]
    fn strong_keyword_is_distinct_from_regular() {
        let mut row = Row::new(b"if (x) {}".to_vec());
        row.update(Some(c_syntax()), false, 8);
        assert_eq!(row.hl[0..2], [HlTag::KeywordStrong; 2]);
    }

    #[test]
    fn block_comment_spans_rows() {
        let mut row0 = Row::new(b"/* open".to_vec());
        let open0 = row0.update(Some(c_syntax()), false, 8);
        assert!(open0);
        assert!(row0.hl.iter().all(|t| *t == HlTag::Comment));

        let mut row1 = Row::new(b"still */ int z".to_vec());
        let open1 = row1.update(Some(c_syntax()), open0, 8);
        assert!(!open1);
        assert!(row1.hl[.."still */".len()].iter().all(|t| *t == HlTag::Comment));
        assert_eq!(row1.hl["still */ ".len().."still */ ".len() + 3], [HlTag::KeywordRegular; 3]);
    }

    #[test]
    fn string_does_not_continue_across_rows() {
        let mut row = Row::new(b"\"unterminated".to_vec());
        let ends_open = row.update(Some(c_syntax()), false, 8);
        assert!(!ends_open);
        assert!(row.hl.iter().all(|t| *t == HlTag::String));
    }

    #[test]
    fn no_syntax_means_all_normal() {
        let mut row = Row::new(b"int x".to_vec());
        row.update(None, false, 8);
        assert!(row.hl.iter().all(|t| *t == HlTag::Normal));
    }

    #[test]
    fn draw_emits_reset_at_end() {
        let mut row = Row::new(b"hi".to_vec());
        row.update(None, false, 8);
        let mut buffer = String::new();
        row.draw(0, 2, &mut buffer).expect("draw should not fail");
        assert_eq!(buffer, format!("hi{RESET_FMT}"));
    }
}
