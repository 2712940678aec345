use crate::error::{DtdError, DtdResult};
use crate::parser::{Cursor, Parser};

pub fn optional<'a, T: Parser<'a>>(parser: T) -> Optional<T> {
    Optional(parser)
}

pub struct Optional<T>(T);

impl<'a, T: Parser<'a>> Parser<'a> for Optional<T> {
    type Attribute = Option<T::Attribute>;

    fn parse(&self, cur: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        match self.0.parse(cur) {
            Ok((attr, cur)) => Ok((Some(attr), cur)),
            Err(_) => Ok((None, cur)),
        }
    }
}

pub fn kleene<'a, T: Parser<'a>>(parser: T) -> Kleene<T> {
    Kleene(parser)
}

pub struct Kleene<T>(T);

impl<'a, T: Parser<'a>> Parser<'a> for Kleene<T> {
    type Attribute = Vec<T::Attribute>;

    fn parse(&self, mut cur: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let mut res = vec![];
        while let Ok((attr, cursor)) = self.0.parse(cur) {
            cur = cursor;
            res.push(attr);
        }
        Ok((res, cur))
    }
}

/// Replace the error of `parser`
#[inline]
pub fn map_error<'a, T: Parser<'a>, F: Fn(DtdError) -> DtdError>(
    parser: T,
    f: F,
) -> MapError<T, F> {
    MapError(parser, f)
}

pub struct MapError<T, F>(T, F);

impl<'a, T: Parser<'a>, F: Fn(DtdError) -> DtdError> Parser<'a> for MapError<T, F> {
    type Attribute = T::Attribute;

    fn parse(&self, cur: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        self.0.parse(cur).map_err(&self.1)
    }
}

macro_rules! def_seq {
    ($($i:tt: $t:ident),+ $(,)?) => {
        impl<'a, $($t: Parser<'a>),*> Parser<'a> for ($($t),*,) {
            type Attribute = ($($t::Attribute),*,);

            #[allow(non_snake_case)]
            fn parse(&self, cur: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
                $(let ($t, cur) = self.$i.parse(cur)?;)*
                Ok((($($t),*,), cur))
            }
        }
    };
}

def_seq!(0: T1);
def_seq!(0: T1, 1: T2);
def_seq!(0: T1, 1: T2, 2: T3);
def_seq!(0: T1, 1: T2, 2: T3, 3: T4);
def_seq!(0: T1, 1: T2, 2: T3, 3: T4, 4: T5);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::string::lit;

    #[test]
    fn optional_keeps_cursor_on_error() {
        let cursor = Cursor::new("ANY");
        let (attr, rest) = optional(lit("EMPTY")).parse(cursor).unwrap();
        assert_eq!(None, attr);
        assert_eq!(cursor, rest);
    }

    #[test]
    fn kleene_collects_repetitions() {
        let (attrs, rest) = kleene(lit("ab")).parse(Cursor::new("ababa")).unwrap();
        assert_eq!(2, attrs.len());
        assert_eq!("a", rest.rest());
    }
}
