use crate::error::{DtdError, DtdResult, Reason};
use crate::parser::{Cursor, Parser};

pub fn lit(lit: &'static str) -> Lit {
    Lit { lit }
}

pub struct Lit {
    lit: &'static str,
}

impl<'a> Parser<'a> for Lit {
    type Attribute = ();

    fn parse(&self, cur: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        if cur.has_next_str(self.lit) {
            Ok(((), cur.advance(self.lit.len())))
        } else if cur.is_at_end() {
            Err(DtdError::new(Reason::UnexpectedEof, cur.offset()))
        } else {
            Err(DtdError::new(Reason::ExpectToken(self.lit), cur.offset()))
        }
    }
}

/// One or more chars matching `predicate`
pub fn chars<P: Fn(char) -> bool>(expected: &'static str, predicate: P) -> Chars<P> {
    Chars {
        expected,
        predicate,
    }
}

pub struct Chars<P: Fn(char) -> bool> {
    expected: &'static str,
    predicate: P,
}

impl<'a, P: Fn(char) -> bool> Parser<'a> for Chars<P> {
    type Attribute = &'a str;

    fn parse(&self, cur: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let size = cur
            .rest()
            .char_indices()
            .find(|&(_, c)| !(self.predicate)(c))
            .map(|(i, _)| i)
            .unwrap_or_else(|| cur.rest().len());
        if size > 0 {
            Ok(cur.advance2(size))
        } else if cur.is_at_end() {
            Err(DtdError::new(Reason::UnexpectedEof, cur.offset()))
        } else {
            Err(DtdError::new(Reason::ExpectToken(self.expected), cur.offset()))
        }
    }
}
