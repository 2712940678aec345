//! Translate XML Document Type Definitions into GBNF grammars
//!
//! The generated grammar only admits XML documents whose elements follow the
//! content models and attribute lists of the DTD. It is meant to constrain
//! the output of a language model during decoding.
//!
//! The document element is the first element declared in the DTD.
//!
//! ```
//! use xml_dtd::Dtd;
//! use xrs_gbnf::{generate_grammar, GrammarConfig};
//!
//! let dtd = Dtd::parse(
//!     "<!ELEMENT book (title, author+)>
//!      <!ATTLIST book id ID #REQUIRED>
//!      <!ELEMENT title (#PCDATA)>
//!      <!ELEMENT author (#PCDATA)>",
//! )
//! .unwrap();
//! let grammar = generate_grammar(&dtd, &GrammarConfig::default()).unwrap();
//! assert!(grammar.ends_with("root ::= prolog element-book\n"));
//! ```

use xml_dtd::Dtd;

use crate::compiler::Compiler;
pub use crate::config::{GrammarConfig, Usage};
use crate::content::ContentLowering;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::ident::grammar_ident;
use crate::preamble::write_preamble;
pub use crate::preamble::MiscSet;
use crate::write::GrammarWriter;
pub use crate::write::{UnicodeWrite, Utf8Writer};

pub mod charclass;
mod compiler;
pub mod config;
pub mod content;
mod error;
mod ident;
pub mod preamble;
pub mod write;

/// Write the grammar for `dtd` to `writer`
///
/// The DTD is checked before anything is written.
pub fn write_grammar<W: UnicodeWrite>(dtd: &Dtd, config: &GrammarConfig, writer: W) -> Result<()> {
    let compiler = Compiler::new(dtd)?;
    log::debug!(
        "translating {} elements with document element `{}`",
        dtd.elements().len(),
        compiler.root().name()
    );

    let mut out = GrammarWriter::new(writer);
    let misc = write_preamble(&mut out, config)?;
    compiler.write_elements(&mut out, &ContentLowering::new(&misc, config.allow_cdata))?;
    compiler.write_root(&mut out)?;
    out.flush()?;
    Ok(())
}

/// Grammar for `dtd` as a string
pub fn generate_grammar(dtd: &Dtd, config: &GrammarConfig) -> Result<String> {
    let mut grammar = String::new();
    write_grammar(dtd, config, &mut grammar)?;
    Ok(grammar)
}
