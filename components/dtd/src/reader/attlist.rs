// 3.3 Attribute-List Declarations

use crate::decl::{AttType, AttributeDecl, DefaultDecl};
use crate::error::{DtdResult, Reason};
use crate::parser::core::{kleene, optional};
use crate::parser::string::lit;
use crate::parser::{Cursor, Parser};
use crate::reader::{error, skip_whitespace, NameToken, NmtokenToken, QuotedToken, SToken};

/// AttlistDecl ::= '<!ATTLIST' S Name AttDef* S? '>'
///
/// Returns the element name and the attribute definitions in document order.
pub(crate) struct AttlistDeclToken;

impl<'a> Parser<'a> for AttlistDeclToken {
    type Attribute = (&'a str, Vec<AttributeDecl>);

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = lit("<!ATTLIST").parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;
        let (element, mut cursor) = NameToken.parse(cursor)?;

        let mut attributes = vec![];
        loop {
            let next = skip_whitespace(cursor);
            if next.has_next_byte(b'>') {
                return Ok(((element, attributes), next.advance(1)));
            }
            let (attribute, rest) = AttDefToken.parse(cursor)?;
            attributes.push(attribute);
            cursor = rest;
        }
    }
}

/// AttDef ::= S Name S AttType S DefaultDecl
struct AttDefToken;

impl<'a> Parser<'a> for AttDefToken {
    type Attribute = AttributeDecl;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = SToken.parse(cursor)?;
        let (name, cursor) = NameToken.parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;
        let (ty, cursor) = AttTypeToken.parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;
        let (default, cursor) = DefaultDeclToken.parse(cursor)?;
        Ok((AttributeDecl::new(name, ty, default), cursor))
    }
}

// 3.3.1 Attribute Types

/// AttType ::= StringType | TokenizedType | EnumeratedType
struct AttTypeToken;

impl<'a> Parser<'a> for AttTypeToken {
    type Attribute = AttType;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        // longest keywords first
        let keywords = [
            ("CDATA", AttType::CData),
            ("IDREFS", AttType::IdRefs),
            ("IDREF", AttType::IdRef),
            ("ID", AttType::Id),
            ("ENTITIES", AttType::Entities),
            ("ENTITY", AttType::Entity),
            ("NMTOKENS", AttType::NmTokens),
            ("NMTOKEN", AttType::NmToken),
        ];
        for (keyword, ty) in keywords {
            if cursor.has_next_str(keyword) {
                return Ok((ty, cursor.advance(keyword.len())));
            }
        }

        if cursor.has_next_str("NOTATION") {
            let (_, cursor) = SToken.parse(cursor.advance(8))?;
            let (names, cursor) = enumeration(cursor, NameToken)?;
            Ok((AttType::Notation(names), cursor))
        } else if cursor.has_next_byte(b'(') {
            let (tokens, cursor) = enumeration(cursor, NmtokenToken)?;
            Ok((AttType::Enumeration(tokens), cursor))
        } else if cursor.has_next_byte(b'%') {
            error(Reason::ParameterEntityReference, cursor)
        } else if cursor.is_at_end() {
            error(Reason::UnexpectedEof, cursor)
        } else {
            error(Reason::ExpectToken("attribute type"), cursor)
        }
    }
}

/// '(' S? token (S? '|' S? token)* S? ')'
fn enumeration<'a, P>(cursor: Cursor<'a>, token: P) -> DtdResult<(Vec<String>, Cursor<'a>)>
where
    P: Parser<'a, Attribute = &'a str> + Copy,
{
    let (_, cursor) = lit("(").parse(cursor)?;
    let (first, cursor) = token.parse(skip_whitespace(cursor))?;
    let (rest, cursor) =
        kleene((optional(SToken), lit("|"), optional(SToken), token)).parse(cursor)?;
    let (_, cursor) = lit(")").parse(skip_whitespace(cursor))?;

    let values = std::iter::once(first)
        .chain(rest.into_iter().map(|(_, _, _, value)| value))
        .map(String::from)
        .collect();
    Ok((values, cursor))
}

// 3.3.2 Attribute Defaults

/// DefaultDecl ::= '#REQUIRED' | '#IMPLIED' | (('#FIXED' S)? AttValue)
struct DefaultDeclToken;

impl<'a> Parser<'a> for DefaultDeclToken {
    type Attribute = DefaultDecl;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        if cursor.has_next_str("#REQUIRED") {
            Ok((DefaultDecl::Required, cursor.advance(9)))
        } else if cursor.has_next_str("#IMPLIED") {
            Ok((DefaultDecl::Implied, cursor.advance(8)))
        } else if cursor.has_next_str("#FIXED") {
            let (_, cursor) = SToken.parse(cursor.advance(6))?;
            let (value, cursor) = QuotedToken.parse(cursor)?;
            Ok((DefaultDecl::Fixed(value.to_string()), cursor))
        } else {
            let (value, cursor) = QuotedToken.parse(cursor)?;
            Ok((DefaultDecl::Value(value.to_string()), cursor))
        }
    }
}
