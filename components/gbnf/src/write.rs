use std::{fmt, io};

/// Sink for UTF-8 text
pub trait UnicodeWrite {
    fn write_all(&mut self, s: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    fn write_fmt(&mut self, fmt: fmt::Arguments<'_>) -> io::Result<()> {
        struct PersistErrorWrapper<'a, T: 'a + ?Sized> {
            writer: &'a mut T,
            err: Option<io::Error>,
        }

        impl<'a, T: 'a + ?Sized + UnicodeWrite> fmt::Write for PersistErrorWrapper<'a, T> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                self.writer.write_all(s).map_err(|err| {
                    self.err = Some(err);
                    fmt::Error
                })
            }
        }

        let mut writer = PersistErrorWrapper {
            writer: self,
            err: None,
        };
        fmt::write(&mut writer, fmt).map_err(|_| match writer.err {
            Some(err) => err,
            None => io::Error::new(io::ErrorKind::Other, "formatter error"),
        })
    }
}

impl UnicodeWrite for &mut String {
    fn write_all(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn write_fmt(&mut self, fmt: fmt::Arguments<'_>) -> io::Result<()> {
        fmt::write(self, fmt).map_err(|_| io::Error::new(io::ErrorKind::Other, "formatter error"))
    }
}

impl<T: ?Sized + UnicodeWrite> UnicodeWrite for &mut T {
    fn write_all(&mut self, s: &str) -> io::Result<()> {
        (**self).write_all(s)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn write_fmt(&mut self, fmt: fmt::Arguments<'_>) -> io::Result<()> {
        (**self).write_fmt(fmt)
    }
}

/// UTF-8 encoding adapter for byte sinks
pub struct Utf8Writer<T: io::Write>(T);

impl<T: io::Write> Utf8Writer<T> {
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: io::Write> UnicodeWrite for Utf8Writer<T> {
    fn write_all(&mut self, s: &str) -> io::Result<()> {
        self.0.write_all(s.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }

    fn write_fmt(&mut self, fmt: fmt::Arguments<'_>) -> io::Result<()> {
        self.0.write_fmt(fmt)
    }
}

/// Line oriented writer for grammar productions
pub struct GrammarWriter<W: UnicodeWrite> {
    writer: W,
}

/// Productions are wrapped after an alternative once a line exceeds this width
const LINE_WIDTH: usize = 80;

impl<W: UnicodeWrite> GrammarWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn str(&mut self, s: &str) -> io::Result<()> {
        self.writer.write_all(s)
    }

    pub fn newline(&mut self) -> io::Result<()> {
        self.writer.write_all("\n")
    }

    pub fn indent(&mut self, width: usize) -> io::Result<()> {
        write!(self.writer, "{:width$}", "", width = width)
    }

    /// Block header, preceded by an empty line
    pub fn section(&mut self, title: &str) -> io::Result<()> {
        write!(self.writer, "\n# {}\n", title)
    }

    pub fn comment(&mut self, text: &str) -> io::Result<()> {
        write!(self.writer, "# {}\n", text)
    }

    pub fn rule(&mut self, symbol: &str, expression: impl fmt::Display) -> io::Result<()> {
        write!(self.writer, "{} ::= {}\n", symbol, expression)
    }

    /// `symbol ::= a | b | ...`, continuing on aligned lines when too long
    pub fn alternatives<S: AsRef<str>>(
        &mut self,
        symbol: &str,
        alternatives: &[S],
    ) -> io::Result<()> {
        let head = format!("{} ::= ", symbol);
        self.str(&head)?;

        let mut column = head.len();
        for (i, alternative) in alternatives.iter().enumerate() {
            let alternative = alternative.as_ref();
            if i > 0 {
                // room for " | " before and " |" after
                if column + 3 + alternative.len() + 2 > LINE_WIDTH {
                    self.str(" |\n")?;
                    self.indent(head.len())?;
                    column = head.len();
                } else {
                    self.str(" | ")?;
                    column += 3;
                }
            }
            self.str(alternative)?;
            column += alternative.len();
        }
        self.newline()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_sink() {
        let mut out = String::new();
        let mut writer = GrammarWriter::new(&mut out);
        writer.section("White Space").unwrap();
        writer.rule("S", "\"\\x20\"+").unwrap();
        writer.indent(2).unwrap();
        writer.str("x").unwrap();
        assert_eq!("\n# White Space\nS ::= \"\\x20\"+\n  x", out);
    }

    #[test]
    fn wraps_long_alternations() {
        let mut out = String::new();
        let alternatives: Vec<String> = (0..12)
            .map(|i| format!("[\\u{:04X}-\\u{:04X}]", i, i + 1))
            .collect();
        GrammarWriter::new(&mut out)
            .alternatives("Class", &alternatives)
            .unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("Class ::= [\\u0000-\\u0001] | "));
        for line in &lines {
            assert!(line.len() <= LINE_WIDTH, "{}", line);
        }
        for line in &lines[..lines.len() - 1] {
            assert!(line.ends_with(" |"), "{}", line);
        }
        for line in &lines[1..] {
            assert!(line.starts_with("          [\\u"), "{}", line);
        }
        assert_eq!(
            alternatives.join(" | "),
            out["Class ::= ".len()..].split_whitespace().collect::<Vec<_>>().join(" ")
        );
    }

    #[test]
    fn utf8_writer() {
        let mut writer = Utf8Writer::new(Vec::new());
        write!(writer, "Name ::= {}", "\"ä\"").unwrap();
        writer.flush().unwrap();
        assert_eq!("Name ::= \"ä\"".as_bytes(), &writer.into_inner()[..]);
    }
}
