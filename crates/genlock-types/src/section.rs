use serde::{Deserialize, Serialize};

/// Marker line opening every header section.
pub const GENERATED_MARKER: &str = "// Code generated by genlock, DO NOT EDIT.";

/// A named piece of generated file content.
///
/// A file's bytes are the concatenation of its sections in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Template name, used for diagnostics only.
    pub name: String,
    /// Rendered text of the section.
    pub source: String,
}

impl Section {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Standard file header: generated-code marker, optional title, and the
    /// package clause.
    pub fn header(title: &str, package: &str) -> Self {
        let mut source = String::from(GENERATED_MARKER);
        source.push('\n');
        if !title.is_empty() {
            source.push_str("//\n// ");
            source.push_str(title);
            source.push('\n');
        }
        source.push_str("\npackage ");
        source.push_str(package);
        source.push('\n');
        Self::new("source-header", source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_without_title() {
        let section = Section::header("", "foo");
        assert_eq!(
            section.source,
            "// Code generated by genlock, DO NOT EDIT.\n\npackage foo\n"
        );
        assert_eq!(section.name, "source-header");
    }

    #[test]
    fn header_with_title() {
        let section = Section::header("petstore service", "pets");
        assert_eq!(
            section.source,
            "// Code generated by genlock, DO NOT EDIT.\n//\n// petstore service\n\npackage pets\n"
        );
    }
}
