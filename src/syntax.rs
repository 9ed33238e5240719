//! # Syntax highlighting descriptors
//!
//! A small, process-wide table of language descriptors, matched against a file's extension. There
//! is no on-disk format and no runtime registration: the table below is the entire set of
//! languages the highlighter knows about.

use bitflags::bitflags;

bitflags! {
    /// Which categories of tokens a descriptor asks the highlighter to recognize.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct HlFlags: u8 {
        const NUMBERS           = 0b0000_0001;
        const STRINGS           = 0b0000_0010;
        const COMMENTS          = 0b0000_0100;
        const KEYWORDS_STRONG   = 0b0000_1000;
        const KEYWORDS_REGULAR  = 0b0001_0000;
    }
}

/// Whether a keyword is highlighted as "strong" (control-flow, structural) or "regular" (commonly
/// a built-in type name). In the source descriptor table, a trailing `|` on a keyword marks it
/// regular; everything else defaults to strong.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeywordKind {
    Strong,
    Regular,
}

/// A single language descriptor: the languages's name, the file extensions that select it, its
/// keyword list, and which highlight categories apply.
#[derive(Clone, Copy, Debug)]
pub struct Syntax {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub keywords: &'static [(&'static str, KeywordKind)],
    pub flags: HlFlags,
}

const C_EXTENSIONS: &[&str] = &[".c", ".h", ".cpp"];

const C_KEYWORDS: &[(&str, KeywordKind)] = &[
    ("switch", KeywordKind::Strong),
    ("if", KeywordKind::Strong),
    ("while", KeywordKind::Strong),
    ("do", KeywordKind::Strong),
    ("for", KeywordKind::Strong),
    ("break", KeywordKind::Strong),
    ("continue", KeywordKind::Strong),
    ("return", KeywordKind::Strong),
    ("else", KeywordKind::Strong),
    ("enum", KeywordKind::Strong),
    ("struct", KeywordKind::Strong),
    ("union", KeywordKind::Strong),
    ("typedef", KeywordKind::Strong),
    ("register", KeywordKind::Strong),
    ("extern", KeywordKind::Strong),
    ("static", KeywordKind::Strong),
    ("class", KeywordKind::Strong),
    ("case", KeywordKind::Strong),
    ("volatile", KeywordKind::Strong),
    ("default", KeywordKind::Strong),
    ("goto", KeywordKind::Strong),
    ("const", KeywordKind::Regular),
    ("int", KeywordKind::Regular),
    ("long", KeywordKind::Regular),
    ("double", KeywordKind::Regular),
    ("float", KeywordKind::Regular),
    ("char", KeywordKind::Regular),
    ("unsigned", KeywordKind::Regular),
    ("signed", KeywordKind::Regular),
    ("void", KeywordKind::Regular),
    ("auto", KeywordKind::Regular),
];

const TEXT_EXTENSIONS: &[&str] = &[".txt", ".inf"];

/// The process-wide syntax table. Checked top to bottom; the first descriptor whose extension
/// list contains the file's extension wins.
pub const DATABASE: &[Syntax] = &[
    Syntax {
        name: "C",
        extensions: C_EXTENSIONS,
        keywords: C_KEYWORDS,
        flags: HlFlags::NUMBERS
            .union(HlFlags::STRINGS)
            .union(HlFlags::COMMENTS)
            .union(HlFlags::KEYWORDS_STRONG)
            .union(HlFlags::KEYWORDS_REGULAR),
    },
    Syntax { name: "Text file", extensions: TEXT_EXTENSIONS, keywords: &[], flags: HlFlags::empty() },
];

/// Find the descriptor matching a file name's extension, if any.
pub fn find(file_name: &str) -> Option<&'static Syntax> {
    DATABASE.iter().find(|syntax| syntax.extensions.iter().any(|ext| file_name.ends_with(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_c_family_by_extension() {
        let syntax = find("main.c").expect("should match the C descriptor");
        assert_eq!(syntax.name, "C");
        assert!(syntax.flags.contains(HlFlags::KEYWORDS_STRONG));
    }

    #[test]
    fn finds_text_by_extension() {
        let syntax = find("notes.txt").expect("should match the text descriptor");
        assert_eq!(syntax.name, "Text file");
        assert!(syntax.flags.is_empty());
    }

    #[test]
    fn unknown_extension_matches_nothing() {
        assert!(find("build.rs").is_none());
    }
}
