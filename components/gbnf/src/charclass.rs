//! Character classes rendered as grammar alternatives

/// Sorted, disjoint code point ranges
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharClass {
    ranges: Vec<(u32, u32)>,
}

impl CharClass {
    pub fn new(table: &[(char, char)]) -> Self {
        Self {
            ranges: table
                .iter()
                .map(|&(start, end)| (start as u32, end as u32))
                .collect(),
        }
    }

    /// Remove every code point of `table`
    pub fn minus(self, table: &[(char, char)]) -> Self {
        let mut ranges = self.ranges;
        for &(cut_start, cut_end) in table {
            let (cut_start, cut_end) = (cut_start as u32, cut_end as u32);
            ranges = ranges
                .into_iter()
                .flat_map(|(start, end)| {
                    let below = (start < cut_start).then(|| (start, end.min(cut_start - 1)));
                    let above = (end > cut_end).then(|| (start.max(cut_end + 1), end));
                    if end < cut_start || start > cut_end {
                        vec![(start, end)]
                    } else {
                        below.into_iter().chain(above).collect()
                    }
                })
                .collect();
        }
        Self { ranges }
    }

    /// Remove single chars
    pub fn without(self, chars: &[char]) -> Self {
        let table: Vec<(char, char)> = chars.iter().map(|&c| (c, c)).collect();
        self.minus(&table)
    }

    pub fn contains(&self, c: char) -> bool {
        let c = c as u32;
        self.ranges
            .iter()
            .any(|&(start, end)| start <= c && c <= end)
    }

    /// One grammar term per range: `"x"` for single chars, `[a-z]` otherwise
    pub fn alternatives(&self) -> Vec<String> {
        self.ranges
            .iter()
            .map(|&(start, end)| {
                if start == end {
                    format!("\"{}\"", literal(start))
                } else {
                    format!("[{}-{}]", class_endpoint(start), class_endpoint(end))
                }
            })
            .collect()
    }
}

fn escape(c: u32) -> String {
    if c <= 0xFF {
        format!("\\x{:02X}", c)
    } else if c <= 0xFFFF {
        format!("\\u{:04X}", c)
    } else {
        format!("\\U{:08X}", c)
    }
}

fn literal(c: u32) -> String {
    match char::from_u32(c) {
        Some(c) if c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '.' | '-') => c.to_string(),
        _ => escape(c),
    }
}

fn class_endpoint(c: u32) -> String {
    match char::from_u32(c) {
        Some(c) if c.is_ascii_alphanumeric() => c.to_string(),
        _ => escape(c),
    }
}
