use std::fmt::Formatter;
use std::{fmt, io};

pub type DtdResult<T> = std::result::Result<T, DtdError>;

/// Fatal error while reading a DTD
pub struct DtdError {
    reason: Reason,
    offset: usize,
    position: Option<(usize, usize)>,
}

impl DtdError {
    pub fn new(reason: Reason, offset: usize) -> Self {
        Self {
            reason,
            offset,
            position: None,
        }
    }

    pub fn io(err: io::Error) -> Self {
        Self::new(Reason::Io(err), 0)
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// Byte offset into the DTD text
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line and column, known once the error left the reader
    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }

    pub(crate) fn locate(mut self, input: &str) -> Self {
        if matches!(self.reason, Reason::Io(_)) || self.offset > input.len() {
            return self;
        }

        let before = &input.as_bytes()[..self.offset];
        let line = memchr::memchr_iter(b'\n', before).count() + 1;
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);
        let column = input[line_start..self.offset].chars().count() + 1;
        self.position = Some((line, column));
        self
    }
}

#[derive(Debug)]
pub enum Reason {
    Io(io::Error),

    // not-wf
    UnexpectedEof,
    ExpectToken(&'static str),
    ExpectWhitespace,
    IllegalNameStartChar(char),
    IllegalPubidChar(char),
    /// Processing Instruction target should not be `xml` (case-insensitive)
    InvalidPITarget,
    CommentDoubleHyphen,
    /// Content particle group uses both `,` and `|`
    MixedSeparators,
    /// `(#PCDATA | name ...)` must be followed by `*`
    MixedContentNotRepeated,

    // invalid
    DuplicateElement(String),

    // unsupported
    ParameterEntityReference,
    ConditionalSection,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Io(err) => write!(f, "I/O error: {}", err),
            Reason::UnexpectedEof => f.write_str("unexpected end of file"),
            Reason::ExpectToken(token) => write!(f, "expected {}", token),
            Reason::ExpectWhitespace => f.write_str("expected whitespace"),
            Reason::IllegalNameStartChar(c) => write!(f, "{:?} cannot start a name", c),
            Reason::IllegalPubidChar(c) => {
                write!(f, "{:?} is not allowed in a public identifier", c)
            }
            Reason::InvalidPITarget => {
                f.write_str("processing instruction target must not be `xml`")
            }
            Reason::CommentDoubleHyphen => f.write_str("`--` is not allowed inside comments"),
            Reason::MixedSeparators => {
                f.write_str("content particles must be separated either by `,` or by `|`")
            }
            Reason::MixedContentNotRepeated => {
                f.write_str("mixed content with element names must end with `)*`")
            }
            Reason::DuplicateElement(name) => {
                write!(f, "element type `{}` is declared more than once", name)
            }
            Reason::ParameterEntityReference => {
                f.write_str("parameter entity references are not supported")
            }
            Reason::ConditionalSection => f.write_str("conditional sections are not supported"),
        }
    }
}

impl fmt::Debug for DtdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DtdError")
            .field("offset", &self.offset)
            .field("position", &self.position)
            .field("reason", &self.reason)
            .finish()
    }
}

impl fmt::Display for DtdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (&self.reason, self.position) {
            (Reason::Io(_), _) => fmt::Display::fmt(&self.reason, f),
            (reason, Some((line, column))) => write!(f, "{} at {}:{}", reason, line, column),
            (reason, None) => write!(f, "{} at byte {}", reason, self.offset),
        }
    }
}

impl std::error::Error for DtdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.reason {
            Reason::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DtdError {
    fn from(err: io::Error) -> Self {
        DtdError::io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_counts_lines_and_chars() {
        let input = "<!ELEMENT a EMPTY>\n<!ELEMENT ä? ANY>";
        let offset = input.find('?').unwrap();
        let err = DtdError::new(Reason::ExpectWhitespace, offset).locate(input);
        assert_eq!(Some((2, 12)), err.position());
        assert_eq!("expected whitespace at 2:12", err.to_string());
    }

    #[test]
    fn unlocated_error_shows_offset() {
        let err = DtdError::new(Reason::ConditionalSection, 7);
        assert_eq!(
            "conditional sections are not supported at byte 7",
            err.to_string()
        );
    }
}
