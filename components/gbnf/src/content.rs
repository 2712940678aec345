//! Lowering of content models to grammar expressions

use std::io;

use xml_dtd::{ContentParticle, Occurrence, Particle};

use crate::ident::element_symbol;
use crate::preamble::MiscSet;
use crate::write::{GrammarWriter, UnicodeWrite};

/// Suffix of a grammar term for an occurrence marker
pub fn occurrence_suffix(occurrence: Occurrence) -> &'static str {
    match occurrence {
        Occurrence::Once => "",
        Occurrence::Optional => "?",
        Occurrence::ZeroOrMore => "*",
        Occurrence::OneOrMore => "+",
    }
}

/// Writes content model trees, allowing misc between all child elements
pub struct ContentLowering<'m> {
    misc: &'m MiscSet,
    allow_cdata: bool,
}

impl<'m> ContentLowering<'m> {
    pub fn new(misc: &'m MiscSet, allow_cdata: bool) -> Self {
        Self { misc, allow_cdata }
    }

    /// Write `node` starting at column `indent`
    ///
    /// With `new_group` the node is parenthesized and surrounded by misc.
    /// The last line is left open.
    pub fn lower<W: UnicodeWrite>(
        &self,
        out: &mut GrammarWriter<W>,
        node: &ContentParticle,
        indent: usize,
        new_group: bool,
    ) -> io::Result<()> {
        let inner = if new_group { indent + 2 } else { indent };
        if new_group {
            out.indent(indent)?;
            out.str("(\n")?;
            self.misc_star(out, inner)?;
            out.newline()?;
        }

        match node.particle() {
            Particle::Element(name) => {
                out.indent(inner)?;
                out.str(&element_symbol(name))?;
            }
            Particle::PcData => {
                out.indent(inner)?;
                self.character_data(out)?;
            }
            Particle::Seq(left, right) => {
                self.lower(out, left, inner, needs_group(left, left.is_choice()))?;
                out.newline()?;
                self.misc_star(out, inner)?;
                out.newline()?;
                self.lower(out, right, inner, needs_group(right, right.is_choice()))?;
            }
            Particle::Choice(left, right) => {
                self.lower(out, left, inner, needs_group(left, left.is_seq()))?;
                out.str(" |\n")?;
                self.lower(out, right, inner, needs_group(right, right.is_seq()))?;
            }
        }

        if new_group {
            out.newline()?;
            self.misc_star(out, inner)?;
            out.newline()?;
            out.indent(indent)?;
            out.str(")")?;
        }
        // character data repeats by itself
        if !node.is_pcdata() {
            out.str(occurrence_suffix(node.occurrence()))?;
        }
        Ok(())
    }

    fn misc_star<W: UnicodeWrite>(
        &self,
        out: &mut GrammarWriter<W>,
        indent: usize,
    ) -> io::Result<()> {
        out.indent(indent)?;
        out.str("(")?;
        out.str(&self.misc.to_string())?;
        out.str(")*")
    }

    /// CharData? ((Reference | misc markup | CDSect) CharData?)*
    fn character_data<W: UnicodeWrite>(&self, out: &mut GrammarWriter<W>) -> io::Result<()> {
        let mut markup = vec!["Reference"];
        markup.extend_from_slice(self.misc.markup());
        if self.allow_cdata {
            markup.push("CDSect");
        }
        out.str("(CharData? ((")?;
        out.str(&markup.join(" | "))?;
        out.str(") CharData?)*)")
    }
}

/// A group is parenthesized when its context asks for it or an occurrence
/// marker has to apply to the whole group
fn needs_group(node: &ContentParticle, context: bool) -> bool {
    context || ((node.is_seq() || node.is_choice()) && node.occurrence() != Occurrence::Once)
}
