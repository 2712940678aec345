use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::ops::Deref;

use xml_dtd::DtdError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
enum Repr {
    Io(io::Error),
    Dtd(DtdError),
    Config(String),
    Json(serde_json::Error),
    NoElements,
    SymbolCollision {
        symbol: String,
        first: String,
        second: String,
    },
    UndeclaredElement {
        element: String,
        reference: String,
    },
}

/// Category of an [`Error`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    /// DTD cannot be parsed
    Dtd,
    /// Unknown option value or malformed configuration file
    Config,
    /// DTD declares no element
    NoElements,
    /// Two names map to the same grammar symbol
    SymbolCollision,
    /// Content model refers to an element without declaration
    UndeclaredElement,
}

pub struct Error(Box<Repr>);

impl Error {
    pub fn new_config(message: impl Into<String>) -> Self {
        Self(Box::new(Repr::Config(message.into())))
    }

    pub(crate) fn new_no_elements() -> Self {
        Self(Box::new(Repr::NoElements))
    }

    pub(crate) fn new_symbol_collision(
        symbol: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self(Box::new(Repr::SymbolCollision {
            symbol: symbol.into(),
            first: first.into(),
            second: second.into(),
        }))
    }

    pub(crate) fn new_undeclared_element(
        element: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self(Box::new(Repr::UndeclaredElement {
            element: element.into(),
            reference: reference.into(),
        }))
    }

    pub fn kind(&self) -> ErrorKind {
        match self.0.deref() {
            Repr::Io(_) => ErrorKind::Io,
            Repr::Dtd(_) => ErrorKind::Dtd,
            Repr::Config(_) | Repr::Json(_) => ErrorKind::Config,
            Repr::NoElements => ErrorKind::NoElements,
            Repr::SymbolCollision { .. } => ErrorKind::SymbolCollision,
            Repr::UndeclaredElement { .. } => ErrorKind::UndeclaredElement,
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0.deref() {
            Repr::Io(err) => write!(f, "i/o error: {}", err),
            Repr::Dtd(err) => write!(f, "invalid DTD: {}", err),
            Repr::Config(msg) => write!(f, "invalid configuration: {}", msg),
            Repr::Json(err) => write!(f, "invalid configuration file: {}", err),
            Repr::NoElements => f.write_str("DTD does not declare any element"),
            Repr::SymbolCollision {
                symbol,
                first,
                second,
            } => write!(
                f,
                "`{}` and `{}` both map to grammar symbol `{}`",
                first, second, symbol
            ),
            Repr::UndeclaredElement { element, reference } => write!(
                f,
                "content model of `{}` refers to undeclared element `{}`",
                element, reference
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.0.deref() {
            Repr::Io(err) => Some(err),
            Repr::Dtd(err) => Some(err),
            Repr::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self(Box::new(Repr::Io(err)))
    }
}

impl From<DtdError> for Error {
    fn from(err: DtdError) -> Self {
        Self(Box::new(Repr::Dtd(err)))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self(Box::new(Repr::Json(err)))
    }
}
