//! Productions for the generic lexical structure of XML documents

use std::fmt;
use std::io;

use xrs_chars::{CHAR_RANGES, NAME_CHAR_RANGES, NAME_START_CHAR_RANGES};

use crate::charclass::CharClass;
use crate::config::{GrammarConfig, Usage};
use crate::write::{GrammarWriter, UnicodeWrite};

/// Symbols allowed between markup: `S`, then `Comment` and `PI` when enabled
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MiscSet {
    symbols: Vec<&'static str>,
}

impl MiscSet {
    pub fn new(config: &GrammarConfig) -> Self {
        let mut symbols = vec!["S"];
        if config.allow_comments {
            symbols.push("Comment");
        }
        if config.allow_pi {
            symbols.push("PI");
        }
        Self { symbols }
    }

    pub fn symbols(&self) -> &[&'static str] {
        &self.symbols
    }

    /// Misc symbols other than white space
    pub fn markup(&self) -> &[&'static str] {
        &self.symbols[1..]
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(&symbol)
    }
}

impl fmt::Display for MiscSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols.join(" | "))
    }
}

/// Write all productions up to the element schema
///
/// Returns the misc set the element productions interleave with content.
pub fn write_preamble<W: UnicodeWrite>(
    out: &mut GrammarWriter<W>,
    config: &GrammarConfig,
) -> io::Result<MiscSet> {
    let misc = MiscSet::new(config);

    out.comment("Character Range")?;
    out.comment("Diverges from XML by leaving out '-' (\\x2D) '>' (\\x3E) '?' (\\x3F) and ']' (\\x5D).")?;
    out.comment("Grammars can only add alternatives, so productions allowing them add them back.")?;
    out.alternatives(
        "Char",
        &CharClass::new(CHAR_RANGES)
            .without(&['-', '>', '?', ']'])
            .alternatives(),
    )?;

    out.section("White Space")?;
    out.rule("S", "( \"\\x20\" | \"\\x09\" | \"\\x0D\" | \"\\x0A\" )+")?;

    out.section("Names and Tokens")?;
    out.alternatives(
        "NameStartChar",
        &CharClass::new(NAME_START_CHAR_RANGES).alternatives(),
    )?;
    let name_chars = std::iter::once("NameStartChar".to_string())
        .chain(
            CharClass::new(NAME_CHAR_RANGES)
                .minus(NAME_START_CHAR_RANGES)
                .alternatives(),
        )
        .collect::<Vec<_>>();
    out.alternatives("NameChar", &name_chars)?;
    out.rule("Name", "NameStartChar (NameChar)*")?;
    out.rule("Names", "Name (\"\\x20\" Name)*")?;
    out.rule("Nmtoken", "(NameChar)+")?;
    out.rule("Nmtokens", "Nmtoken (\"\\x20\" Nmtoken)*")?;

    out.section("Literals")?;
    out.alternatives(
        "AttValue",
        &[
            "( \"\\x22\" ([^<&\\x22] | Reference)* \"\\x22\" )",
            "( \"\\x27\" ([^<&\\x27] | Reference)* \"\\x27\" )",
        ],
    )?;

    out.section("Character Reference")?;
    out.rule("CharRef", "(\"&#\" [0-9]+ \";\") | (\"&#x\" [0-9a-fA-F]+ \";\")")?;

    out.section("Entity Reference")?;
    out.rule("Reference", "EntityRef | CharRef")?;
    out.rule("EntityRef", "\"&\" Name \";\"")?;

    out.section("Character Data")?;
    out.rule("CharData", "((\"]]\" [^>]) | [^<&])*")?;

    if config.allow_comments {
        out.section("Comments")?;
        out.rule("commentChar", "Char | [>?\\x5D]")?;
        out.rule(
            "Comment",
            "\"<!--\" (commentChar | (\"-\" commentChar))* \"-->\"",
        )?;
    }

    if config.allow_pi {
        write_pi(out)?;
    }

    if config.allow_cdata {
        out.section("CDATA Sections")?;
        out.rule("cdChar", "Char | [?\\x2D]")?;
        out.rule("CDSect", "CDStart CData CDEnd")?;
        out.rule("CDStart", "\"<![CDATA[\"")?;
        out.rule(
            "CData",
            "((cdChar | \">\") | \"]\" (cdChar | \">\" | (\"]\" cdChar)))*",
        )?;
        out.rule("CDEnd", "\"]]>\"")?;
    }

    out.section("Prolog")?;
    out.rule("prolog", prolog(config))?;
    out.rule(
        "XMLDecl",
        "\"<?xml\" VersionInfo EncodingDecl? SDDecl? S? \"?>\"",
    )?;
    out.rule(
        "VersionInfo",
        "S \"version\" Eq ( (\"\\x27\" VersionNum \"\\x27\") | (\"\\x22\" VersionNum \"\\x22\") )",
    )?;
    out.rule("Eq", "S? \"=\" S?")?;
    out.rule("VersionNum", "\"1.0\"")?;
    out.rule("Misc", &misc)?;

    out.section("Standalone Document Declaration")?;
    out.rule(
        "SDDecl",
        "S \"standalone\" Eq ( (\"\\x27\" (\"yes\" | \"no\") \"\\x27\") | (\"\\x22\" (\"yes\" | \"no\") \"\\x22\") )",
    )?;

    out.section("Encoding Declaration")?;
    out.rule(
        "EncodingDecl",
        "S \"encoding\" Eq ( (\"\\x22\" EncName \"\\x22\") | (\"\\x27\" EncName \"\\x27\") )",
    )?;
    out.rule("EncName", "[A-Za-z] ([A-Za-z0-9._] | \"-\")*")?;

    Ok(misc)
}

/// PI ::= '<?' PITarget (S (Char* - (Char* '?>' Char*)))? '?>'
///
/// The target must not spell `xml` in any case. Names starting with other
/// chars are covered by `piTargetStart`, names sharing a prefix with `xml`
/// leave it at `piTargetM` or `piTargetL` or continue past the third char.
fn write_pi<W: UnicodeWrite>(out: &mut GrammarWriter<W>) -> io::Result<()> {
    out.section("Processing Instructions")?;
    out.rule("piChar", "Char | [\\x2D\\x5D]")?;
    out.rule(
        "PI",
        "\"<?\" PITarget (S ((\"?\" piChar) | piChar | \">\")*)? \"?>\"",
    )?;
    out.alternatives(
        "PITarget",
        &[
            "piTargetStart (NameChar)*",
            "[Xx] (piTargetM (NameChar)*)?",
            "[Xx] [Mm] (piTargetL (NameChar)*)?",
            "[Xx] [Mm] [Ll] (NameChar)+",
        ],
    )?;
    out.alternatives(
        "piTargetStart",
        &CharClass::new(NAME_START_CHAR_RANGES)
            .without(&['X', 'x'])
            .alternatives(),
    )?;
    out.alternatives(
        "piTargetM",
        &CharClass::new(NAME_CHAR_RANGES)
            .without(&['M', 'm'])
            .alternatives(),
    )?;
    out.alternatives(
        "piTargetL",
        &CharClass::new(NAME_CHAR_RANGES)
            .without(&['L', 'l'])
            .alternatives(),
    )
}

fn prolog(config: &GrammarConfig) -> String {
    let xml_decl = match config.xml_header {
        Usage::Required => "XMLDecl Misc*",
        Usage::Allowed => "XMLDecl? Misc*",
        Usage::Forbidden => "Misc*",
    };
    match config.doctype {
        Usage::Required => format!("{} doctypedecl Misc*", xml_decl),
        Usage::Allowed => format!("{} (doctypedecl Misc*)?", xml_decl),
        Usage::Forbidden => xml_decl.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preamble(config: &GrammarConfig) -> (String, MiscSet) {
        let mut out = String::new();
        let misc = write_preamble(&mut GrammarWriter::new(&mut out), config).unwrap();
        (out, misc)
    }

    fn rule<'a>(grammar: &'a str, symbol: &str) -> Option<&'a str> {
        let head = format!("{} ::= ", symbol);
        grammar
            .lines()
            .find_map(|line| line.strip_prefix(head.as_str()))
    }

    #[test]
    fn misc_set_order() {
        let all = GrammarConfig {
            allow_comments: true,
            allow_pi: true,
            ..GrammarConfig::default()
        };
        assert_eq!(&["S", "Comment", "PI"], MiscSet::new(&all).symbols());
        assert_eq!(&["Comment", "PI"], MiscSet::new(&all).markup());
        assert_eq!(
            &["S"],
            MiscSet::new(&GrammarConfig::default()).symbols()
        );
        assert_eq!("S | Comment | PI", MiscSet::new(&all).to_string());
        assert!(MiscSet::new(&all).contains("PI"));
        assert!(!MiscSet::new(&GrammarConfig::default()).contains("Comment"));
    }

    #[test]
    fn defaults() {
        let (grammar, misc) = preamble(&GrammarConfig::default());
        assert!(grammar.starts_with("# Character Range\n"));
        assert_eq!(Some("S"), rule(&grammar, "Misc"));
        assert_eq!(Some("XMLDecl? Misc* doctypedecl Misc*"), rule(&grammar, "prolog"));
        assert_eq!(None, rule(&grammar, "Comment"));
        assert_eq!(None, rule(&grammar, "PI"));
        assert_eq!(Some("CDStart CData CDEnd"), rule(&grammar, "CDSect"));
        assert_eq!(
            Some("[A-Za-z] ([A-Za-z0-9._] | \"-\")*"),
            rule(&grammar, "EncName")
        );
        assert_eq!(MiscSet::new(&GrammarConfig::default()), misc);
    }

    #[test]
    fn optional_sections() {
        let (grammar, _) = preamble(&GrammarConfig {
            allow_comments: true,
            allow_pi: true,
            allow_cdata: false,
            ..GrammarConfig::default()
        });
        assert_eq!(Some("S | Comment | PI"), rule(&grammar, "Misc"));
        assert!(rule(&grammar, "Comment").is_some());
        assert!(rule(&grammar, "PI").is_some());
        assert!(rule(&grammar, "piTargetStart").is_some());
        assert_eq!(None, rule(&grammar, "CDSect"));
        assert_eq!(None, rule(&grammar, "cdChar"));
    }

    #[test]
    fn prolog_switches() {
        let cases = [
            (Usage::Required, Usage::Required, "XMLDecl Misc* doctypedecl Misc*"),
            (Usage::Allowed, Usage::Allowed, "XMLDecl? Misc* (doctypedecl Misc*)?"),
            (Usage::Forbidden, Usage::Forbidden, "Misc*"),
            (Usage::Forbidden, Usage::Required, "Misc* doctypedecl Misc*"),
            (Usage::Required, Usage::Forbidden, "XMLDecl Misc*"),
        ];
        for (xml_header, doctype, expected) in cases {
            let config = GrammarConfig {
                xml_header,
                doctype,
                ..GrammarConfig::default()
            };
            assert_eq!(expected, prolog(&config));
        }
    }

    #[test]
    fn name_char_extends_name_start_char() {
        let (grammar, _) = preamble(&GrammarConfig::default());
        assert_eq!(
            Some("NameStartChar | [\\x2D-\\x2E] | [0-9] | \"\\xB7\" | [\\u0300-\\u036F] |"),
            rule(&grammar, "NameChar")
        );
    }
}
