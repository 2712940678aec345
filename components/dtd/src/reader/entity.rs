// 4.2 Entity Declarations and 4.7 Notation Declarations
//
// Declarations are checked for well-formedness and skipped. Entity
// references are never expanded.

use crate::error::{DtdResult, Reason};
use crate::parser::core::optional;
use crate::parser::string::lit;
use crate::parser::{Cursor, Parser};
use crate::reader::{error, skip_whitespace, NameToken, PubidLiteralToken, QuotedToken, SToken};

/// EntityDecl ::= GEDecl | PEDecl
///
/// GEDecl ::= '<!ENTITY' S Name S EntityDef S? '>'
/// PEDecl ::= '<!ENTITY' S '%' S Name S PEDef S? '>'
pub(crate) struct EntityDeclToken;

impl<'a> Parser<'a> for EntityDeclToken {
    type Attribute = &'a str;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = lit("<!ENTITY").parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;
        let parameter = cursor.has_next_byte(b'%');
        let cursor = if parameter {
            SToken.parse(cursor.advance(1))?.1
        } else {
            cursor
        };
        let (name, cursor) = NameToken.parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;

        let cursor = if cursor.has_next_byte(b'"') || cursor.has_next_byte(b'\'') {
            QuotedToken.parse(cursor)?.1
        } else {
            let (_, cursor) = ExternalIdToken::new().parse(cursor)?;
            if parameter {
                cursor
            } else {
                // NDataDecl ::= S 'NDATA' S Name
                optional((SToken, lit("NDATA"), SToken, NameToken))
                    .parse(cursor)?
                    .1
            }
        };

        let (_, cursor) = lit(">").parse(skip_whitespace(cursor))?;
        Ok((name, cursor))
    }
}

/// ExternalID ::= 'SYSTEM' S SystemLiteral | 'PUBLIC' S PubidLiteral S SystemLiteral
///
/// With `public_id` the system literal may be left out after `PUBLIC`:
///
/// ```text
/// PublicID ::= 'PUBLIC' S PubidLiteral
/// ```
struct ExternalIdToken {
    public_id: bool,
}

impl ExternalIdToken {
    fn new() -> Self {
        Self { public_id: false }
    }

    fn or_public_id() -> Self {
        Self { public_id: true }
    }
}

impl<'a> Parser<'a> for ExternalIdToken {
    type Attribute = (Option<&'a str>, Option<&'a str>);

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        if cursor.has_next_str("SYSTEM") {
            let (_, cursor) = SToken.parse(cursor.advance(6))?;
            let (system, cursor) = QuotedToken.parse(cursor)?;
            Ok(((None, Some(system)), cursor))
        } else if cursor.has_next_str("PUBLIC") {
            let (_, cursor) = SToken.parse(cursor.advance(6))?;
            let (public, cursor) = PubidLiteralToken.parse(cursor)?;
            let (system, cursor) = if self.public_id {
                let (system, cursor) = optional((SToken, QuotedToken)).parse(cursor)?;
                (system.map(|(_, system)| system), cursor)
            } else {
                let (_, cursor) = SToken.parse(cursor)?;
                let (system, cursor) = QuotedToken.parse(cursor)?;
                (Some(system), cursor)
            };
            Ok(((Some(public), system), cursor))
        } else if cursor.has_next_byte(b'%') {
            error(Reason::ParameterEntityReference, cursor)
        } else if cursor.is_at_end() {
            error(Reason::UnexpectedEof, cursor)
        } else {
            error(Reason::ExpectToken("SYSTEM or PUBLIC"), cursor)
        }
    }
}

/// NotationDecl ::= '<!NOTATION' S Name S (ExternalID | PublicID) S? '>'
pub(crate) struct NotationDeclToken;

impl<'a> Parser<'a> for NotationDeclToken {
    type Attribute = &'a str;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = lit("<!NOTATION").parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;
        let (name, cursor) = NameToken.parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;
        let (_, cursor) = ExternalIdToken::or_public_id().parse(cursor)?;
        let (_, cursor) = lit(">").parse(skip_whitespace(cursor))?;
        Ok((name, cursor))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn entity(input: &str) -> DtdResult<&str> {
        EntityDeclToken
            .parse(Cursor::new(input))
            .map(|(name, _)| name)
    }

    fn notation(input: &str) -> DtdResult<&str> {
        NotationDeclToken
            .parse(Cursor::new(input))
            .map(|(name, _)| name)
    }

    #[test]
    fn internal_entities() {
        assert_eq!("copy", entity("<!ENTITY copy \"&#169;\">").unwrap());
        assert_eq!("inline", entity("<!ENTITY % inline '#PCDATA|em' >").unwrap());
    }

    #[test]
    fn external_entities() {
        assert_eq!(
            "chapter",
            entity("<!ENTITY chapter SYSTEM \"chapter.xml\">").unwrap()
        );
        assert_eq!(
            "logo",
            entity("<!ENTITY logo PUBLIC '-//ACME//Logo//EN' 'logo.gif' NDATA gif>").unwrap()
        );
        assert_eq!(
            "mod",
            entity("<!ENTITY % mod SYSTEM 'mod.ent'>").unwrap()
        );
    }

    #[test]
    fn parameter_entity_cannot_be_unparsed() {
        assert_matches!(
            entity("<!ENTITY % mod SYSTEM 'mod.ent' NDATA gif>")
                .unwrap_err()
                .reason(),
            Reason::ExpectToken(">")
        );
    }

    #[test]
    fn external_id_requires_system_literal() {
        assert_matches!(
            entity("<!ENTITY e PUBLIC '-//ACME//E//EN'>").unwrap_err().reason(),
            Reason::ExpectWhitespace
        );
    }

    #[test]
    fn notations() {
        assert_eq!("gif", notation("<!NOTATION gif SYSTEM 'image/gif'>").unwrap());
        assert_eq!(
            "png",
            notation("<!NOTATION png PUBLIC '-//W3C//NOTATION PNG//EN'>").unwrap()
        );
        assert_eq!(
            "svg",
            notation("<!NOTATION svg PUBLIC '-//W3C//SVG//EN' 'svg.dtd' >").unwrap()
        );
    }
}
