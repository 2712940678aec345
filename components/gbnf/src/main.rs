//! dtd2gbnf: translate a DTD into a GBNF grammar

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use xml_dtd::Dtd;
use xrs_gbnf::{generate_grammar, GrammarConfig, Usage};

/// Translate an XML Document Type Definition into a GBNF grammar
///
/// The first element declared in the DTD becomes the document element.
#[derive(Parser)]
#[command(name = "dtd2gbnf")]
#[command(version)]
struct Cli {
    /// DTD to read (`-` for stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Grammar file to write (`-` for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// JSON file with grammar options, overridden by the flags below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Allow comments between markup
    #[arg(long, overrides_with = "no_allow_comments")]
    allow_comments: bool,
    #[arg(long, overrides_with = "allow_comments", hide = true)]
    no_allow_comments: bool,

    /// Allow processing instructions between markup
    #[arg(long, overrides_with = "no_allow_pi")]
    allow_pi: bool,
    #[arg(long, overrides_with = "allow_pi", hide = true)]
    no_allow_pi: bool,

    /// Allow CDATA sections in mixed content [default]
    #[arg(long, overrides_with = "no_allow_cdata")]
    allow_cdata: bool,
    /// Forbid CDATA sections
    #[arg(long, overrides_with = "allow_cdata")]
    no_allow_cdata: bool,

    /// XML declaration: REQUIRED, ALLOWED or FORBIDDEN [default: ALLOWED]
    #[arg(long, value_name = "USAGE", value_parser = parse_usage)]
    xml_header: Option<Usage>,

    /// Document type declaration: REQUIRED, ALLOWED or FORBIDDEN [default: REQUIRED]
    #[arg(long, value_name = "USAGE", value_parser = parse_usage)]
    doctype: Option<Usage>,

    /// Log what the translation does
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn grammar_config(&self) -> Result<GrammarConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("cannot open config file {}", path.display()))?;
                GrammarConfig::from_json(BufReader::new(file))
                    .with_context(|| format!("cannot read config file {}", path.display()))?
            }
            None => GrammarConfig::default(),
        };

        if let Some(allow) = switch(self.allow_comments, self.no_allow_comments) {
            config.allow_comments = allow;
        }
        if let Some(allow) = switch(self.allow_pi, self.no_allow_pi) {
            config.allow_pi = allow;
        }
        if let Some(allow) = switch(self.allow_cdata, self.no_allow_cdata) {
            config.allow_cdata = allow;
        }
        if let Some(usage) = self.xml_header {
            config.xml_header = usage;
        }
        if let Some(usage) = self.doctype {
            config.doctype = usage;
        }
        Ok(config)
    }
}

fn parse_usage(value: &str) -> std::result::Result<Usage, String> {
    value.parse().map_err(|err: xrs_gbnf::Error| err.to_string())
}

fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_dtd(path: &Path) -> Result<Dtd> {
    if is_stdio(path) {
        debug!("reading DTD from stdin");
        Dtd::from_reader(io::stdin().lock()).context("cannot read DTD from stdin")
    } else {
        debug!("reading DTD from {}", path.display());
        let file =
            File::open(path).with_context(|| format!("cannot open DTD {}", path.display()))?;
        Dtd::from_reader(BufReader::new(file))
            .with_context(|| format!("cannot read DTD {}", path.display()))
    }
}

fn write_output(path: &Path, grammar: &str) -> Result<()> {
    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(grammar.as_bytes())?;
        stdout.flush().context("cannot write grammar to stdout")
    } else {
        let file = File::create(path)
            .with_context(|| format!("cannot create grammar file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(grammar.as_bytes())?;
        writer
            .flush()
            .with_context(|| format!("cannot write grammar file {}", path.display()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = cli.grammar_config()?;
    info!("grammar options: {:?}", config);

    let dtd = read_dtd(&cli.input)?;
    // nothing is written unless the whole grammar could be generated
    let grammar = generate_grammar(&dtd, &config).context("cannot translate DTD")?;
    write_output(&cli.output, &grammar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> GrammarConfig {
        Cli::try_parse_from(std::iter::once("dtd2gbnf").chain(args.iter().copied()))
            .unwrap()
            .grammar_config()
            .unwrap()
    }

    #[test]
    fn defaults() {
        assert_eq!(GrammarConfig::default(), config(&[]));
    }

    #[test]
    fn last_switch_wins() {
        let config = config(&["--allow-pi", "--no-allow-pi", "--no-allow-cdata", "--allow-cdata"]);
        assert!(!config.allow_pi);
        assert!(config.allow_cdata);
    }

    #[test]
    fn usages() {
        let config = config(&["--xml-header", "required", "--doctype", "FORBIDDEN"]);
        assert_eq!(Usage::Required, config.xml_header);
        assert_eq!(Usage::Forbidden, config.doctype);
        assert!(Cli::try_parse_from(["dtd2gbnf", "--doctype", "never"]).is_err());
    }
}
