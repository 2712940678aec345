//! Character classes of XML 1.0 (fifth edition)

/// `Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`
///
/// https://www.w3.org/TR/REC-xml/#NT-Char
pub const CHAR_RANGES: &[(char, char)] = &[
    ('\u{9}', '\u{a}'),
    ('\u{d}', '\u{d}'),
    ('\u{20}', '\u{D7FF}'),
    ('\u{E000}', '\u{FFFD}'),
    ('\u{10000}', '\u{10FFFF}'),
];

/// https://www.w3.org/TR/REC-xml/#NT-NameStartChar
pub const NAME_START_CHAR_RANGES: &[(char, char)] = &[
    (':', ':'),
    ('A', 'Z'),
    ('_', '_'),
    ('a', 'z'),
    ('\u{c0}', '\u{d6}'),
    ('\u{d8}', '\u{f6}'),
    ('\u{f8}', '\u{2ff}'),
    ('\u{370}', '\u{37d}'),
    ('\u{37f}', '\u{1fff}'),
    ('\u{200c}', '\u{200d}'),
    ('\u{2070}', '\u{218f}'),
    ('\u{2C00}', '\u{2FEF}'),
    ('\u{3001}', '\u{D7FF}'),
    ('\u{F900}', '\u{FDCF}'),
    ('\u{FDF0}', '\u{FFFD}'),
    ('\u{10000}', '\u{EFFFF}'),
];

/// https://www.w3.org/TR/REC-xml/#NT-NameChar
pub const NAME_CHAR_RANGES: &[(char, char)] = &[
    ('-', '.'),
    ('0', ':'),
    ('A', 'Z'),
    ('_', '_'),
    ('a', 'z'),
    ('\u{b7}', '\u{b7}'),
    ('\u{c0}', '\u{d6}'),
    ('\u{d8}', '\u{f6}'),
    ('\u{f8}', '\u{37d}'),
    ('\u{37f}', '\u{1fff}'),
    ('\u{200c}', '\u{200d}'),
    ('\u{203f}', '\u{2040}'),
    ('\u{2070}', '\u{218f}'),
    ('\u{2C00}', '\u{2FEF}'),
    ('\u{3001}', '\u{D7FF}'),
    ('\u{F900}', '\u{FDCF}'),
    ('\u{FDF0}', '\u{FFFD}'),
    ('\u{10000}', '\u{EFFFF}'),
];

fn search_table(c: char, table: &[(char, char)]) -> bool {
    table
        .binary_search_by(|&(start, end)| {
            if c < start {
                std::cmp::Ordering::Greater
            } else if c > end {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

pub trait XmlAsciiChar {
    /// https://www.w3.org/TR/REC-xml/#NT-S
    fn is_xml_whitespace(&self) -> bool;
}

pub trait XmlChar: XmlAsciiChar {
    /// https://www.w3.org/TR/REC-xml/#NT-NameStartChar
    fn is_xml_name_start_char(&self) -> bool;

    /// https://www.w3.org/TR/REC-xml/#NT-NameChar
    fn is_xml_name_char(&self) -> bool;

    /// https://www.w3.org/TR/REC-xml/#NT-Char
    fn is_xml_char(&self) -> bool;

    /// `PubidChar ::= #x20 | #xD | #xA | [a-zA-Z0-9] | [-'()+,./:=?;!*#@$_%]`
    fn is_xml_pubid_char(&self) -> bool;
}

impl XmlAsciiChar for u8 {
    #[inline]
    fn is_xml_whitespace(&self) -> bool {
        matches!(*self, b'\x20' | b'\x0A' | b'\x09' | b'\x0D')
    }
}

impl XmlAsciiChar for char {
    #[inline]
    fn is_xml_whitespace(&self) -> bool {
        matches!(*self, '\x20' | '\x0A' | '\x09' | '\x0D')
    }
}

impl XmlChar for char {
    #[inline]
    fn is_xml_name_start_char(&self) -> bool {
        if self.is_ascii() {
            matches!(*self, ':' | '_' | 'A'..='Z' | 'a'..='z')
        } else {
            search_table(*self, NAME_START_CHAR_RANGES)
        }
    }

    #[inline]
    fn is_xml_name_char(&self) -> bool {
        if self.is_ascii() {
            matches!(*self, '-' | '.' | '0'..=':' | '_' | 'A'..='Z' | 'a'..='z')
        } else {
            search_table(*self, NAME_CHAR_RANGES)
        }
    }

    #[inline]
    fn is_xml_char(&self) -> bool {
        if self.is_ascii() {
            *self >= '\u{20}' || self.is_xml_whitespace()
        } else {
            search_table(*self, CHAR_RANGES)
        }
    }

    fn is_xml_pubid_char(&self) -> bool {
        matches!(
            *self,
            '\x20' | '\x0D' | '\x0A'
                | 'a'..='z'
                | 'A'..='Z'
                | '0'..='9'
                | '-' | '\'' | '(' | ')' | '+' | ',' | '.' | '/' | ':'
                | '=' | '?' | ';' | '!' | '*' | '#' | '@' | '$' | '_' | '%'
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted(table: &[(char, char)]) {
        for window in table.windows(2) {
            assert!(window[0].0 <= window[0].1);
            assert!(window[0].1 < window[1].0, "{:?}", window);
        }
    }

    #[test]
    fn tables_are_sorted_and_disjoint() {
        assert_sorted(CHAR_RANGES);
        assert_sorted(NAME_START_CHAR_RANGES);
        assert_sorted(NAME_CHAR_RANGES);
    }

    #[test]
    fn ascii_fast_path_agrees_with_tables() {
        for c in (0u8..0x80).map(char::from) {
            assert_eq!(
                c.is_xml_name_start_char(),
                search_table(c, NAME_START_CHAR_RANGES),
                "{:?}",
                c
            );
            assert_eq!(
                c.is_xml_name_char(),
                search_table(c, NAME_CHAR_RANGES),
                "{:?}",
                c
            );
            assert_eq!(c.is_xml_char(), search_table(c, CHAR_RANGES), "{:?}", c);
        }
    }

    #[test]
    fn name_chars() {
        assert!('a'.is_xml_name_start_char());
        assert!(':'.is_xml_name_start_char());
        assert!(!'-'.is_xml_name_start_char());
        assert!('-'.is_xml_name_char());
        assert!('\u{b7}'.is_xml_name_char());
        assert!(!'\u{b7}'.is_xml_name_start_char());
        assert!('\u{3001}'.is_xml_name_start_char());
        assert!(!'\u{d7}'.is_xml_name_char());
    }

    #[test]
    fn chars() {
        assert!('\t'.is_xml_char());
        assert!(!'\u{0}'.is_xml_char());
        assert!(!'\u{FFFE}'.is_xml_char());
        assert!('\u{10000}'.is_xml_char());
        assert!('\u{20}'.is_xml_whitespace());
        assert!(!'\u{a0}'.is_xml_whitespace());
        assert!(b'\r'.is_xml_whitespace());
    }

    #[test]
    fn pubid_chars() {
        assert!('%'.is_xml_pubid_char());
        assert!('\''.is_xml_pubid_char());
        assert!(!'"'.is_xml_pubid_char());
        assert!(!'<'.is_xml_pubid_char());
    }
}
