// 3.2 Element Type Declarations

use crate::decl::{ContentParticle, ContentSpec, ElementDecl, Occurrence};
use crate::error::{DtdResult, Reason};
use crate::parser::string::lit;
use crate::parser::{Cursor, Parser};
use crate::reader::{error, skip_whitespace, NameToken, SToken};

/// elementdecl ::= '<!ELEMENT' S Name S contentspec S? '>'
pub(crate) struct ElementDeclToken;

impl<'a> Parser<'a> for ElementDeclToken {
    type Attribute = ElementDecl;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = lit("<!ELEMENT").parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;
        let (name, cursor) = NameToken.parse(cursor)?;
        let (_, cursor) = SToken.parse(cursor)?;
        let (content, cursor) = ContentSpecToken.parse(cursor)?;
        let (_, cursor) = lit(">").parse(skip_whitespace(cursor))?;
        Ok((ElementDecl::new(name, content), cursor))
    }
}

/// contentspec ::= 'EMPTY' | 'ANY' | Mixed | children
pub(crate) struct ContentSpecToken;

impl<'a> Parser<'a> for ContentSpecToken {
    type Attribute = ContentSpec;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        if cursor.has_next_str("EMPTY") {
            Ok((ContentSpec::Empty, cursor.advance(5)))
        } else if cursor.has_next_str("ANY") {
            Ok((ContentSpec::Any, cursor.advance(3)))
        } else if cursor.has_next_byte(b'(') {
            let (model, cursor) = if skip_whitespace(cursor.advance(1)).has_next_str("#PCDATA") {
                MixedToken.parse(cursor)?
            } else {
                GroupToken.parse(cursor)?
            };
            Ok((ContentSpec::Model(model), cursor))
        } else if cursor.has_next_byte(b'%') {
            error(Reason::ParameterEntityReference, cursor)
        } else if cursor.is_at_end() {
            error(Reason::UnexpectedEof, cursor)
        } else {
            error(Reason::ExpectToken("EMPTY, ANY or `(`"), cursor)
        }
    }
}

// 3.2.1 Element Content

/// Occurrence suffix of a content particle
///
/// No white space is allowed before the suffix.
struct OccurrenceToken;

impl<'a> Parser<'a> for OccurrenceToken {
    type Attribute = Occurrence;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let occurrence = match cursor.next_byte(0) {
            Some(b'?') => Occurrence::Optional,
            Some(b'*') => Occurrence::ZeroOrMore,
            Some(b'+') => Occurrence::OneOrMore,
            _ => return Ok((Occurrence::Once, cursor)),
        };
        Ok((occurrence, cursor.advance(1)))
    }
}

/// cp ::= (Name | choice | seq) ('?' | '*' | '+')?
struct CpToken;

impl<'a> Parser<'a> for CpToken {
    type Attribute = ContentParticle;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        if cursor.has_next_byte(b'(') {
            return GroupToken.parse(cursor);
        }

        let (name, cursor) = NameToken.parse(cursor)?;
        let (occurrence, cursor) = OccurrenceToken.parse(cursor)?;
        Ok((
            ContentParticle::element(name).with_occurrence(occurrence),
            cursor,
        ))
    }
}

/// Choice or sequence including its occurrence suffix
///
/// choice ::= '(' S? cp ( S? '|' S? cp )+ S? ')'
/// seq    ::= '(' S? cp ( S? ',' S? cp )* S? ')'
struct GroupToken;

impl<'a> Parser<'a> for GroupToken {
    type Attribute = ContentParticle;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = lit("(").parse(cursor)?;
        let (first, mut cursor) = CpToken.parse(skip_whitespace(cursor))?;

        let mut rest = vec![];
        let mut separator = None;
        loop {
            let next = skip_whitespace(cursor);
            match next.next_byte(0) {
                Some(b')') => {
                    cursor = next.advance(1);
                    break;
                }
                Some(sep @ (b',' | b'|')) => {
                    if *separator.get_or_insert(sep) != sep {
                        return error(Reason::MixedSeparators, next);
                    }
                    let (member, after) = CpToken.parse(skip_whitespace(next.advance(1)))?;
                    rest.push(member);
                    cursor = after;
                }
                Some(b'%') => return error(Reason::ParameterEntityReference, next),
                Some(_) => return error(Reason::ExpectToken("`,`, `|` or `)`"), next),
                None => return error(Reason::UnexpectedEof, next),
            }
        }

        let (occurrence, cursor) = OccurrenceToken.parse(cursor)?;
        let group = if rest.is_empty() {
            let combined = first.occurrence().combine(occurrence);
            first.with_occurrence(combined)
        } else {
            let join: fn(ContentParticle, ContentParticle) -> ContentParticle =
                if separator == Some(b'|') {
                    ContentParticle::choice
                } else {
                    ContentParticle::seq
                };
            ContentParticle::nest(first, rest, join).with_occurrence(occurrence)
        };
        Ok((group, cursor))
    }
}

// 3.2.2 Mixed Content

/// Mixed ::= '(' S? '#PCDATA' (S? '|' S? Name)* S? ')*' | '(' S? '#PCDATA' S? ')'
///
/// `(#PCDATA)*` is accepted as well.
struct MixedToken;

impl<'a> Parser<'a> for MixedToken {
    type Attribute = ContentParticle;

    fn parse(&self, cursor: Cursor<'a>) -> DtdResult<(Self::Attribute, Cursor<'a>)> {
        let (_, cursor) = lit("(").parse(cursor)?;
        let (_, mut cursor) = lit("#PCDATA").parse(skip_whitespace(cursor))?;

        let mut names = vec![];
        loop {
            let next = skip_whitespace(cursor);
            if !next.has_next_byte(b'|') {
                cursor = next;
                break;
            }
            let (name, rest) = NameToken.parse(skip_whitespace(next.advance(1)))?;
            names.push(name);
            cursor = rest;
        }

        let (_, cursor) = lit(")").parse(cursor)?;
        let repeated = cursor.has_next_byte(b'*');
        let cursor = if repeated { cursor.advance(1) } else { cursor };

        if names.is_empty() {
            let occurrence = if repeated {
                Occurrence::ZeroOrMore
            } else {
                Occurrence::Once
            };
            Ok((ContentParticle::pcdata().with_occurrence(occurrence), cursor))
        } else if repeated {
            Ok((ContentParticle::mixed(names), cursor))
        } else {
            error(Reason::MixedContentNotRepeated, cursor)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::decl::Particle;

    fn content(input: &str) -> DtdResult<ContentSpec> {
        ContentSpecToken
            .parse(Cursor::new(input))
            .map(|(spec, _)| spec)
    }

    fn model(input: &str) -> ContentParticle {
        match content(input).unwrap() {
            ContentSpec::Model(model) => model,
            spec => panic!("expected content model, got {:?}", spec),
        }
    }

    fn el(name: &str) -> ContentParticle {
        ContentParticle::element(name)
    }

    #[test]
    fn element_decl() {
        let (decl, rest) = ElementDeclToken
            .parse(Cursor::new("<!ELEMENT br EMPTY >tail"))
            .unwrap();
        assert_eq!("br", decl.name());
        assert!(decl.is_empty());
        assert_eq!("tail", rest.rest());
    }

    #[test]
    fn empty_and_any() {
        assert_eq!(ContentSpec::Empty, content("EMPTY").unwrap());
        assert_eq!(ContentSpec::Any, content("ANY").unwrap());
    }

    #[test]
    fn sequence_nests_to_the_right() {
        assert_eq!(
            ContentParticle::seq(
                el("front"),
                ContentParticle::seq(el("body"), el("back").with_occurrence(Occurrence::Optional)),
            ),
            model("(front, body, back?)")
        );
    }

    #[test]
    fn nested_groups() {
        let expected = ContentParticle::seq(
            el("head"),
            ContentParticle::seq(
                ContentParticle::choice(el("p"), ContentParticle::choice(el("list"), el("note")))
                    .with_occurrence(Occurrence::ZeroOrMore),
                el("div2").with_occurrence(Occurrence::ZeroOrMore),
            ),
        );
        assert_eq!(expected, model("(head, (p | list | note)*, div2*)"));
        assert_eq!(expected, model("( head ,( p|list|note )*,div2* )"));
    }

    #[test]
    fn group_occurrence() {
        let choice = model("(a | b)+");
        assert!(choice.is_choice());
        assert_eq!(Occurrence::OneOrMore, choice.occurrence());
    }

    #[test]
    fn single_member_group() {
        assert_eq!(el("a").with_occurrence(Occurrence::OneOrMore), model("(a)+"));
        assert_eq!(el("a").with_occurrence(Occurrence::ZeroOrMore), model("(a?)+"));
        assert_eq!(el("a").with_occurrence(Occurrence::Optional), model("(a?)"));
    }

    #[test]
    fn mixed_content() {
        assert_eq!(ContentParticle::pcdata(), model("(#PCDATA)"));
        assert_eq!(ContentParticle::pcdata(), model("( #PCDATA )"));
        assert_eq!(
            ContentParticle::pcdata().with_occurrence(Occurrence::ZeroOrMore),
            model("(#PCDATA)*")
        );

        let mixed = model("(#PCDATA | em | strong)*");
        assert_eq!(Occurrence::ZeroOrMore, mixed.occurrence());
        match mixed.particle() {
            Particle::Choice(left, right) => {
                assert!(left.is_pcdata());
                assert_eq!(
                    &ContentParticle::choice(el("em"), el("strong")),
                    right.as_ref()
                );
            }
            particle => panic!("expected choice, got {:?}", particle),
        }
    }

    #[test]
    fn mixed_content_must_repeat() {
        assert_matches!(
            content("(#PCDATA | em)").unwrap_err().reason(),
            Reason::MixedContentNotRepeated
        );
    }

    #[test]
    fn mixed_separators() {
        let err = content("(a, b | c)").unwrap_err();
        assert_matches!(err.reason(), Reason::MixedSeparators);
        assert_eq!(6, err.offset());
    }

    #[test]
    fn parameter_entities_are_unsupported() {
        assert_matches!(
            content("%content;").unwrap_err().reason(),
            Reason::ParameterEntityReference
        );
        assert_matches!(
            content("(a, %more;)").unwrap_err().reason(),
            Reason::ParameterEntityReference
        );
    }

    #[test]
    fn unterminated_group() {
        assert_matches!(content("(a, b").unwrap_err().reason(), Reason::UnexpectedEof);
    }
}
