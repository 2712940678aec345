//! Options of a translation run

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Whether an optional part of the document prolog may appear
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Usage {
    Required,
    Allowed,
    Forbidden,
}

impl Usage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Usage::Required => "REQUIRED",
            Usage::Allowed => "ALLOWED",
            Usage::Forbidden => "FORBIDDEN",
        }
    }
}

impl FromStr for Usage {
    type Err = Error;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self> {
        [Usage::Required, Usage::Allowed, Usage::Forbidden]
            .into_iter()
            .find(|usage| usage.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::new_config(format!(
                    "unknown usage `{}`, expected REQUIRED, ALLOWED or FORBIDDEN",
                    s
                ))
            })
    }
}

impl TryFrom<String> for Usage {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Switches deciding which XML constructs the grammar admits
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrammarConfig {
    /// `<!-- ... -->` between markup
    pub allow_comments: bool,
    /// `<?target ...?>` between markup
    pub allow_pi: bool,
    /// `<![CDATA[...]]>` inside mixed content
    pub allow_cdata: bool,
    /// `<?xml version="1.0"?>` in front of the document
    pub xml_header: Usage,
    /// `<!DOCTYPE root>` in front of the document element
    pub doctype: Usage,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            allow_comments: false,
            allow_pi: false,
            allow_cdata: true,
            xml_header: Usage::Allowed,
            doctype: Usage::Required,
        }
    }
}

impl GrammarConfig {
    /// Read a JSON object with any of the fields, the rest keep their defaults
    pub fn from_json<R: io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
