//! Tokens of the external subset grammar
//!
//! extSubsetDecl ::= ( markupdecl | conditionalSect | DeclSep)*

use memchr::memmem;
use xrs_chars::{XmlAsciiChar, XmlChar};

use crate::decl::{AttributeDecl, ElementDecl};
use crate::error::{DtdError, DtdResult, Reason};
use crate::parser::core::map_error;
use crate::parser::string::{chars, lit};
use crate::parser::{Cursor, Parser};
use crate::reader::attlist::AttlistDeclToken;
use crate::reader::element::ElementDeclToken;
use crate::reader::entity::{EntityDeclToken, NotationDeclToken};

pub mod attlist;
pub mod element;
pub mod entity;

/// Entry of the external subset
#[derive(Clone, Debug, PartialEq)]
pub enum MarkupDecl<'a> {
    Element(ElementDecl),
    AttList {
        element: &'a str,
        attributes: Vec<AttributeDecl>,
    },
    Entity(&'a str),
    Notation(&'a str),
    PI(&'a str),
    Comment(&'a str),
}

pub(crate) fn error<T>(reason: Reason, cursor: Cursor) -> DtdResult<T> {
    Err(DtdError::new(reason, cursor.offset()))
}

// 2.3 Common Syntactic Constructs

/// White Space
///
/// ```text
/// S ::= (#x20 | #x9 | #xD | #xA)+
/// ```
///
#[derive(Copy, Clone)]
pub(crate) struct SToken;

impl<'a> Parser<'a> for SToken {
    type Attribute = ();

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let size = cursor
            .rest_bytes()
            .iter()
            .take_while(|c| c.is_xml_whitespace())
            .count();
        if size > 0 {
            Ok(((), cursor.advance(size)))
        } else if cursor.has_next_byte(b'%') {
            error(Reason::ParameterEntityReference, cursor)
        } else {
            error(Reason::ExpectWhitespace, cursor)
        }
    }
}

/// Skip optional white space
pub(crate) fn skip_whitespace(cursor: Cursor) -> Cursor {
    match SToken.parse(cursor) {
        Ok((_, cursor)) => cursor,
        Err(_) => cursor,
    }
}

/// Name ::= NameStartChar (NameChar)*
#[derive(Copy, Clone)]
pub(crate) struct NameToken;

impl<'a> Parser<'a> for NameToken {
    type Attribute = &'a str;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let mut chars = cursor.rest().char_indices();

        match chars.next() {
            Some((_, c)) if c.is_xml_name_start_char() => {}
            Some((_, '%')) => return error(Reason::ParameterEntityReference, cursor),
            Some((_, c)) => return error(Reason::IllegalNameStartChar(c), cursor),
            None => return error(Reason::UnexpectedEof, cursor),
        }

        let end = chars
            .find(|(_, c)| !c.is_xml_name_char())
            .map(|(i, _)| i)
            .unwrap_or_else(|| cursor.rest().len());
        Ok(cursor.advance2(end))
    }
}

/// Nmtoken ::= (NameChar)+
#[derive(Copy, Clone)]
pub(crate) struct NmtokenToken;

impl<'a> Parser<'a> for NmtokenToken {
    type Attribute = &'a str;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        if cursor.has_next_byte(b'%') {
            return error(Reason::ParameterEntityReference, cursor);
        }
        chars("name token", |c| c.is_xml_name_char()).parse(cursor)
    }
}

/// Literal in `"` or `'`
///
/// Used for `AttValue`, `EntityValue`, `SystemLiteral` and `PubidLiteral`.
/// References inside are not expanded.
pub(crate) struct QuotedToken;

impl<'a> Parser<'a> for QuotedToken {
    type Attribute = &'a str;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let quote = match cursor.next_byte(0) {
            Some(quote @ (b'"' | b'\'')) => quote,
            Some(b'%') => return error(Reason::ParameterEntityReference, cursor),
            Some(_) => return error(Reason::ExpectToken("quoted literal"), cursor),
            None => return error(Reason::UnexpectedEof, cursor),
        };

        let start = cursor.advance(1);
        match memchr::memchr(quote, start.rest_bytes()) {
            Some(end) => {
                let (value, rest) = start.advance2(end);
                Ok((value, rest.advance(1)))
            }
            None => error(Reason::UnexpectedEof, start),
        }
    }
}

/// PubidLiteral ::= '"' PubidChar* '"' | "'" (PubidChar - "'")* "'"
pub(crate) struct PubidLiteralToken;

impl<'a> Parser<'a> for PubidLiteralToken {
    type Attribute = &'a str;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (literal, rest) = QuotedToken.parse(cursor)?;
        if let Some((i, c)) = literal.char_indices().find(|(_, c)| !c.is_xml_pubid_char()) {
            return error(Reason::IllegalPubidChar(c), cursor.advance(1 + i));
        }
        Ok((literal, rest))
    }
}

/// Characters up to (excluding) `terminator`
pub(crate) fn terminated<'a>(
    cursor: Cursor<'a>,
    terminator: &str,
) -> DtdResult<(&'a str, Cursor<'a>)> {
    match memmem::find(cursor.rest_bytes(), terminator.as_bytes()) {
        Some(pos) => Ok(cursor.advance2(pos)),
        None => error(Reason::UnexpectedEof, cursor),
    }
}

// 2.5 Comments

/// Comment ::= '<!--' ((Char - '-') | ('-' (Char - '-')))* '-->'
pub(crate) struct CommentToken;

impl<'a> Parser<'a> for CommentToken {
    type Attribute = &'a str;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = lit("<!--").parse(cursor)?;
        let (comment, cursor) = terminated(cursor, "--")?;
        let (_, cursor) = map_error(lit("-->"), |err| {
            DtdError::new(Reason::CommentDoubleHyphen, err.offset())
        })
        .parse(cursor)?;
        Ok((comment, cursor))
    }
}

// 2.6 Processing Instructions

/// PI ::= '<?' PITarget (S (Char* - (Char* '?>' Char*)))? '?>'
/// PITarget ::= Name - (('X' | 'x') ('M' | 'm') ('L' | 'l'))
pub(crate) struct PIToken;

impl<'a> Parser<'a> for PIToken {
    type Attribute = &'a str;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = lit("<?").parse(cursor)?;
        let (target, after_target) = NameToken.parse(cursor)?;
        if target.eq_ignore_ascii_case("xml") {
            return error(Reason::InvalidPITarget, cursor);
        }
        let cursor = if after_target.has_next_str("?>") {
            after_target
        } else {
            let (_, cursor) = SToken.parse(after_target)?;
            terminated(cursor, "?>")?.1
        };
        let (_, cursor) = lit("?>").parse(cursor)?;
        Ok((target, cursor))
    }
}

// 4.3.1 The Text Declaration

/// TextDecl ::= '<?xml' VersionInfo? EncodingDecl S? '?>'
///
/// The declaration is skipped: the DTD is always read as UTF-8.
pub(crate) struct TextDeclToken;

impl<'a> Parser<'a> for TextDeclToken {
    type Attribute = &'a str;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = lit("<?xml").parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;
        let (decl, cursor) = terminated(cursor, "?>")?;
        let (_, cursor) = lit("?>").parse(cursor)?;
        Ok((decl, cursor))
    }
}

// 2.8 Prolog and Document Type Declaration

/// Markup Declaration
///
/// markupdecl ::= elementdecl | AttlistDecl | EntityDecl | NotationDecl | PI | Comment
///
/// Leading white space (`DeclSep`) must already be skipped.
pub(crate) struct MarkupDeclToken;

impl<'a> Parser<'a> for MarkupDeclToken {
    type Attribute = MarkupDecl<'a>;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        if cursor.has_next_str("<!ELEMENT") {
            let (decl, cursor) = ElementDeclToken.parse(cursor)?;
            Ok((MarkupDecl::Element(decl), cursor))
        } else if cursor.has_next_str("<!ATTLIST") {
            let ((element, attributes), cursor) = AttlistDeclToken.parse(cursor)?;
            Ok((
                MarkupDecl::AttList {
                    element,
                    attributes,
                },
                cursor,
            ))
        } else if cursor.has_next_str("<!ENTITY") {
            let (name, cursor) = EntityDeclToken.parse(cursor)?;
            Ok((MarkupDecl::Entity(name), cursor))
        } else if cursor.has_next_str("<!NOTATION") {
            let (name, cursor) = NotationDeclToken.parse(cursor)?;
            Ok((MarkupDecl::Notation(name), cursor))
        } else if cursor.has_next_str("<!--") {
            let (comment, cursor) = CommentToken.parse(cursor)?;
            Ok((MarkupDecl::Comment(comment), cursor))
        } else if cursor.has_next_str("<![") {
            error(Reason::ConditionalSection, cursor)
        } else if cursor.has_next_str("<?") {
            let (target, cursor) = PIToken.parse(cursor)?;
            Ok((MarkupDecl::PI(target), cursor))
        } else if cursor.has_next_byte(b'%') {
            error(Reason::ParameterEntityReference, cursor)
        } else if cursor.is_at_end() {
            error(Reason::UnexpectedEof, cursor)
        } else {
            error(Reason::ExpectToken("markup declaration"), cursor)
        }
    }
}
