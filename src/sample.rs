//! Built-in demo document

/// XML shown when no file is given: a declaration, a comment, an entity
/// reference and a namespaced element. The last line ends with a single
/// space and no newline.
pub const SAMPLE_XML: &str = "<?xml version=\"1.0\"?>\n\
<!-- a <comment> -->\n\
<DocumentRoot attribute=\"value\">\n    \
Some &gt;text&lt;...\n    \
<ns:tag>content</ns:tag>\n\
</DocumentRoot> ";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let lines: Vec<&str> = SAMPLE_XML.split('\n').collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "<!-- a <comment> -->");
        assert_eq!(lines[3], "    Some &gt;text&lt;...");
        assert_eq!(lines[4], "    <ns:tag>content</ns:tag>");
        assert_eq!(lines[5], "</DocumentRoot> ");
    }
}
