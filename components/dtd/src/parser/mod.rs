use crate::error::DtdResult;

pub mod core;
pub mod string;

pub trait Parser<'a> {
    type Attribute;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)>;
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Cursor<'a> {
    rest: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            offset: 0,
        }
    }

    pub fn next_byte(&self, i: usize) -> Option<u8> {
        self.rest.as_bytes().get(i).copied()
    }

    #[inline]
    pub fn has_next_byte(&self, pat: u8) -> bool {
        self.rest.as_bytes().first() == Some(&pat)
    }

    #[inline]
    pub fn has_next_str(&self, pat: impl AsRef<str>) -> bool {
        self.rest.starts_with(pat.as_ref())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn rest_bytes(&self) -> &'a [u8] {
        self.rest.as_bytes()
    }

    pub fn is_at_end(&self) -> bool {
        self.rest.is_empty()
    }

    /// Skip `bytes` bytes. `bytes` must lie on a char boundary.
    pub fn advance(&self, bytes: usize) -> Self {
        self.advance2(bytes).1
    }

    /// Split off the next `bytes` bytes.
    pub fn advance2(&self, bytes: usize) -> (&'a str, Self) {
        let (diff, rest) = self.rest.split_at(bytes);
        (
            diff,
            Self {
                rest,
                offset: self.offset + bytes,
            },
        )
    }
}
