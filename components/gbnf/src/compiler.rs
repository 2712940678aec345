//! Element and attribute productions

use std::collections::HashMap;
use std::io;

use xml_dtd::{ContentParticle, ContentSpec, Dtd, ElementDecl, Particle};

use crate::content::ContentLowering;
use crate::error::{Error, Result};
use crate::ident::{attribute_symbol, element_symbol};
use crate::write::{GrammarWriter, UnicodeWrite};

/// Productions for the elements of a checked DTD
pub struct Compiler<'d> {
    dtd: &'d Dtd,
    root: &'d ElementDecl,
    /// Content admitted by `ANY`
    any: ContentParticle,
}

impl<'d> Compiler<'d> {
    /// Check that every element and attribute gets its own grammar symbol and
    /// that content models only refer to declared elements
    ///
    /// The first declared element becomes the document element. A DTD does
    /// not name its document element, so this is a heuristic.
    pub fn new(dtd: &'d Dtd) -> Result<Self> {
        let root = dtd.elements().first().ok_or_else(Error::new_no_elements)?;

        let mut elements = HashMap::new();
        for element in dtd.elements() {
            let symbol = element_symbol(element.name());
            if let Some(first) = elements.insert(symbol.clone(), element.name()) {
                return Err(Error::new_symbol_collision(symbol, first, element.name()));
            }

            let mut attributes = HashMap::new();
            for attribute in element.attributes() {
                let symbol = attribute_symbol(element.name(), attribute.name());
                if let Some(first) = attributes.insert(symbol.clone(), attribute.name()) {
                    return Err(Error::new_symbol_collision(symbol, first, attribute.name()));
                }
            }

            if let ContentSpec::Model(model) = element.content() {
                check_references(dtd, element, model)?;
            }
        }

        Ok(Self {
            dtd,
            root,
            any: ContentParticle::mixed(dtd.elements().iter().map(|element| element.name())),
        })
    }

    pub fn root(&self) -> &'d ElementDecl {
        self.root
    }

    pub fn write_elements<W: UnicodeWrite>(
        &self,
        out: &mut GrammarWriter<W>,
        lowering: &ContentLowering,
    ) -> io::Result<()> {
        out.section("Element Schema")?;
        for element in self.dtd.elements() {
            self.write_element(out, lowering, element)?;
        }
        Ok(())
    }

    fn write_element<W: UnicodeWrite>(
        &self,
        out: &mut GrammarWriter<W>,
        lowering: &ContentLowering,
        element: &ElementDecl,
    ) -> io::Result<()> {
        let symbol = element_symbol(element.name());
        let indent = symbol.len() + 5;
        out.str(&format!("{} ::= \"<{}\" ", symbol, element.name()))?;

        if !element.attributes().is_empty() {
            out.str("(\n")?;
            for attribute in element.attributes() {
                out.indent(indent + 2)?;
                out.str(&format!(
                    "(S {})",
                    attribute_symbol(element.name(), attribute.name())
                ))?;
                if !attribute.is_required() {
                    out.str("?")?;
                }
                out.newline()?;
            }
            out.indent(indent)?;
            out.str(") ")?;
        }

        match element.content() {
            ContentSpec::Empty => out.str("S? \"/>\"\n")?,
            ContentSpec::Any => {
                log::debug!(
                    "content of `{}` is ANY, allowing character data and all {} elements",
                    element.name(),
                    self.dtd.elements().len()
                );
                write_content(out, lowering, element, &self.any, indent)?
            }
            ContentSpec::Model(model) => write_content(out, lowering, element, model, indent)?,
        }

        for attribute in element.attributes() {
            out.rule(
                &attribute_symbol(element.name(), attribute.name()),
                format!("\"{}\" Eq AttValue", attribute.name()),
            )?;
        }
        Ok(())
    }

    /// `doctypedecl` and the start symbol `root`
    pub fn write_root<W: UnicodeWrite>(&self, out: &mut GrammarWriter<W>) -> io::Result<()> {
        out.section("Document Type Definition")?;
        out.rule(
            "doctypedecl",
            format!("\"<!DOCTYPE\" S \"{}\" S? \">\"", self.root.name()),
        )?;
        out.newline()?;
        out.rule("root", format!("prolog {}", element_symbol(self.root.name())))
    }
}

fn write_content<W: UnicodeWrite>(
    out: &mut GrammarWriter<W>,
    lowering: &ContentLowering,
    element: &ElementDecl,
    model: &ContentParticle,
    indent: usize,
) -> io::Result<()> {
    out.str("S? \">\" (\n")?;
    lowering.lower(out, model, indent + 2, !model.is_pcdata())?;
    out.newline()?;
    out.indent(indent)?;
    out.str(&format!(") \"</{}\" S? \">\"\n", element.name()))
}

fn check_references(dtd: &Dtd, element: &ElementDecl, node: &ContentParticle) -> Result<()> {
    match node.particle() {
        Particle::Element(name) if dtd.element(name).is_none() => {
            Err(Error::new_undeclared_element(element.name(), name.as_str()))
        }
        Particle::Element(_) | Particle::PcData => Ok(()),
        Particle::Seq(left, right) | Particle::Choice(left, right) => {
            check_references(dtd, element, left)?;
            check_references(dtd, element, right)
        }
    }
}
