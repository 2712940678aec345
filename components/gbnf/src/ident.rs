/// Grammar identifier for an XML name
///
/// Lower cases the name and keeps only the ASCII letters `a` to `z`, so
/// different XML names may share an identifier.
pub fn grammar_ident(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// `element-<ident>`
pub fn element_symbol(element: &str) -> String {
    format!("element-{}", grammar_ident(element))
}

/// `element-<ident>-attribute-<ident>`
pub fn attribute_symbol(element: &str, attribute: &str) -> String {
    format!(
        "element-{}-attribute-{}",
        grammar_ident(element),
        grammar_ident(attribute)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_lower_case_letters() {
        assert_eq!("book", grammar_ident("book"));
        assert_eq!("xmllang", grammar_ident("xml:lang"));
        assert_eq!("headingtitle", grammar_ident("Heading-Title_2"));
        assert_eq!("", grammar_ident("_1"));
    }

    #[test]
    fn symbols() {
        assert_eq!("element-book", element_symbol("book"));
        assert_eq!("element-", element_symbol("_"));
        assert_eq!(
            "element-htmlhead-attribute-xmllang",
            attribute_symbol("html:head", "xml:lang")
        );
    }

    #[test]
    fn folds_non_ascii() {
        assert_eq!("k", grammar_ident("\u{212A}"));
        assert_eq!("strae", grammar_ident("STRAßE"));
    }
}
