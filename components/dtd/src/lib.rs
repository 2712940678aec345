//! Reader for XML Document Type Definitions
//!
//! Reads the external subset syntax: element type declarations, attribute-list
//! declarations, entity and notation declarations, comments and processing
//! instructions. Entities are declared but never expanded, so parameter entity
//! references and conditional sections are rejected.
//!
//! ```
//! use xml_dtd::{ContentSpec, Dtd};
//!
//! let dtd = Dtd::parse(
//!     "<!ELEMENT book (title, author+)>
//!      <!ATTLIST book id ID #REQUIRED>
//!      <!ELEMENT title (#PCDATA)>
//!      <!ELEMENT author (#PCDATA)>",
//! )
//! .unwrap();
//! assert_eq!(3, dtd.elements().len());
//! assert!(dtd.element("book").unwrap().attribute("id").unwrap().is_required());
//! assert!(matches!(dtd.element("title").unwrap().content(), ContentSpec::Model(_)));
//! ```

use std::collections::HashMap;
use std::io;

use xrs_chars::XmlAsciiChar;

pub use crate::decl::{
    AttType, AttributeDecl, ContentParticle, ContentSpec, DefaultDecl, ElementDecl, Occurrence,
    Particle,
};
pub use crate::error::{DtdError, DtdResult, Reason};
use crate::parser::{Cursor, Parser};
use crate::reader::{skip_whitespace, MarkupDecl, MarkupDeclToken, TextDeclToken};

mod decl;
mod error;
mod parser;
mod reader;

/// Element declarations of a DTD in declaration order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dtd {
    elements: Vec<ElementDecl>,
}

impl Dtd {
    pub fn parse(input: &str) -> DtdResult<Dtd> {
        Self::parse_decls(input).map_err(|err| err.locate(input))
    }

    /// Read a complete DTD from `reader`
    ///
    /// The DTD must be encoded in UTF-8.
    pub fn from_reader<R: io::Read>(mut reader: R) -> DtdResult<Dtd> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    pub fn elements(&self) -> &[ElementDecl] {
        &self.elements
    }

    pub fn element(&self, name: &str) -> Option<&ElementDecl> {
        self.elements.iter().find(|element| element.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn parse_decls(input: &str) -> DtdResult<Dtd> {
        let mut cursor = Cursor::new(input);
        if cursor.has_next_str("\u{FEFF}") {
            cursor = cursor.advance(3);
        }
        let text_decl = cursor.has_next_str("<?xml")
            && cursor.next_byte(5).map_or(false, |c| c.is_xml_whitespace());
        if text_decl {
            let (decl, rest) = TextDeclToken.parse(cursor)?;
            log::debug!("skipped text declaration `{}`", decl.trim());
            cursor = rest;
        }

        let mut builder = DtdBuilder::default();
        loop {
            cursor = skip_whitespace(cursor);
            if cursor.is_at_end() {
                break;
            }
            let (decl, rest) = MarkupDeclToken.parse(cursor)?;
            builder.add(decl, cursor)?;
            cursor = rest;
        }
        Ok(builder.build())
    }
}

#[derive(Default)]
struct DtdBuilder<'a> {
    elements: Vec<ElementDecl>,
    index: HashMap<String, usize>,
    attlists: Vec<(&'a str, Vec<AttributeDecl>)>,
}

impl<'a> DtdBuilder<'a> {
    fn add(&mut self, decl: MarkupDecl<'a>, cursor: Cursor<'a>) -> DtdResult<()> {
        match decl {
            MarkupDecl::Element(element) => {
                if self.index.contains_key(element.name()) {
                    return Err(DtdError::new(
                        Reason::DuplicateElement(element.name().to_string()),
                        cursor.offset(),
                    ));
                }
                self.index
                    .insert(element.name().to_string(), self.elements.len());
                self.elements.push(element);
            }
            MarkupDecl::AttList {
                element,
                attributes,
            } => self.attlists.push((element, attributes)),
            MarkupDecl::Entity(name) => log::debug!("skipped entity declaration `{}`", name),
            MarkupDecl::Notation(name) => log::debug!("skipped notation declaration `{}`", name),
            MarkupDecl::PI(target) => log::debug!("skipped processing instruction `{}`", target),
            MarkupDecl::Comment(_) => {}
        }
        Ok(())
    }

    fn build(mut self) -> Dtd {
        for (name, attributes) in self.attlists {
            let element = match self.index.get(name) {
                Some(&i) => &mut self.elements[i],
                None => {
                    log::warn!("ignored attribute list of undeclared element `{}`", name);
                    continue;
                }
            };
            for attribute in attributes {
                if element.attribute(attribute.name()).is_some() {
                    log::warn!(
                        "ignored second declaration of attribute `{}` of element `{}`",
                        attribute.name(),
                        name
                    );
                } else {
                    element.push_attribute(attribute);
                }
            }
        }

        Dtd {
            elements: self.elements,
        }
    }
}
