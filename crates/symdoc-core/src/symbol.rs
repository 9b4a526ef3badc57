//! Symbol classification
//!
//! Maps the raw kind/visibility strings emitted by the introspection tool
//! into a closed set of semantic categories and a totally ordered visibility
//! level. Unrecognized input never fails classification: visibility falls
//! back to `Internal` and kinds are carried through the `Other` variant.

/// Access-control level of a declaration, totally ordered.
///
/// The ordering is used pervasively as a filter threshold: an item is
/// included when its visibility is >= the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Visibility {
    Private,
    FilePrivate,
    Internal,
    Public,
    Open,
}

impl Visibility {
    /// Every level, in ascending order
    pub const ALL: [Visibility; 5] = [
        Visibility::Private,
        Visibility::FilePrivate,
        Visibility::Internal,
        Visibility::Public,
        Visibility::Open,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::FilePrivate => "fileprivate",
            Visibility::Internal => "internal",
            Visibility::Public => "public",
            Visibility::Open => "open",
        }
    }

    /// Parse a visibility label case-insensitively, defaulting to `Internal`
    /// on unrecognized input.
    pub fn from_label(label: &str) -> Visibility {
        match label.to_lowercase().as_str() {
            "private" => Visibility::Private,
            "fileprivate" => Visibility::FilePrivate,
            "internal" => Visibility::Internal,
            "public" => Visibility::Public,
            "open" => Visibility::Open,
            _ => Visibility::Internal,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic category of a declaration.
///
/// The fixed variants are the type-level categories that appear at the top
/// of an exported document; everything else (instance methods, enum cases,
/// marks, ...) rides in `Other` with its lowercased raw label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Extension,
    Enum,
    Class,
    Struct,
    Protocol,
    GlobalFunc,
    Typealias,
    Other(String),
}

impl Kind {
    /// The kinds that reside at the top level of an exported document, in
    /// the order the top-level index lists them
    pub const TOP_LEVEL: [Kind; 7] = [
        Kind::Class,
        Kind::Struct,
        Kind::Enum,
        Kind::Protocol,
        Kind::Extension,
        Kind::GlobalFunc,
        Kind::Typealias,
    ];

    /// Display label for the kind
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Extension => "extension",
            Kind::Enum => "enum",
            Kind::Class => "class",
            Kind::Struct => "struct",
            Kind::Protocol => "protocol",
            Kind::GlobalFunc => "global func",
            Kind::Typealias => "typealias",
            Kind::Other(value) => value,
        }
    }

    /// Category string used to classify entries in an offline docset.
    /// A singular capitalized noun; `Other` reduces to its last
    /// space-delimited word, capitalized.
    pub fn doc_set_type(&self) -> String {
        match self {
            Kind::Extension => "Extension".to_string(),
            Kind::Enum => "Enum".to_string(),
            Kind::Class => "Class".to_string(),
            Kind::Struct => "Struct".to_string(),
            Kind::Protocol => "Protocol".to_string(),
            Kind::GlobalFunc => "Function".to_string(),
            Kind::Typealias => "Alias".to_string(),
            Kind::Other(value) => {
                let last = value.split(' ').next_back().unwrap_or("");
                capitalized(last)
            }
        }
    }

    /// Parse a (shortened) classification label, wrapping anything
    /// unrecognized in `Other` with the lowercased input.
    pub fn from_label(label: &str) -> Kind {
        match label.to_lowercase().as_str() {
            "extension" => Kind::Extension,
            "enum" => Kind::Enum,
            "class" => Kind::Class,
            "struct" => Kind::Struct,
            "protocol" => Kind::Protocol,
            "global func" => Kind::GlobalFunc,
            "typealias" => Kind::Typealias,
            other => Kind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uppercase the first character of each space-delimited word
pub(crate) fn capitalized(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shorten a long raw introspection-tool classification string to a display
/// label.
///
/// Unmapped strings are logged as a diagnostic and returned verbatim, or
/// reduced to their last dot-delimited segment when `reduce_unmapped` is
/// set.
pub fn shorten_classification_label(raw: &str, reduce_unmapped: bool) -> String {
    let mapped = match raw {
        "source.lang.swift.accessibility.private" => "private",
        "source.lang.swift.accessibility.fileprivate" => "fileprivate",
        "source.lang.swift.accessibility.internal" => "internal",
        "source.lang.swift.accessibility.public" => "public",
        "source.lang.swift.accessibility.open" => "open",

        "source.lang.swift.decl.class" => "class",
        "source.lang.swift.decl.enumelement" => "enum element",
        "source.lang.swift.decl.enumcase" => "enum case",
        "source.lang.swift.decl.enum" => "enum",
        "source.lang.swift.decl.function.subscript" => "subscript",
        "source.lang.swift.decl.function.method.instance" => "instance method",
        "source.lang.swift.decl.function.free" => "global func",
        "source.lang.swift.decl.var.local" => "local",
        "source.lang.swift.decl.var.static" => "static",
        "source.lang.swift.decl.var.instance" => "instance property",
        "source.lang.swift.decl.function.method.static" => "static",
        "source.lang.swift.decl.generic_type_param" => "generic type parameter",
        "source.lang.swift.decl.protocol" => "protocol",
        "source.lang.swift.decl.extension" => "extension",
        "source.lang.swift.decl.struct" => "struct",
        "source.lang.swift.decl.typealias" => "typealias",
        "source.lang.swift.decl.associatedtype" => "associated type",

        "source.lang.swift.syntaxtype.comment.mark" => "mark",

        "source.decl.attribute.convenience" => "convenience",
        "source.decl.attribute.lazy" => "lazy",
        "source.decl.attribute.open" => "open",
        "source.decl.attribute.fileprivate" => "fileprivate",
        "source.decl.attribute.public" => "public",
        "source.decl.attribute.private" => "private",
        "source.decl.attribute.setter_access.private" => "private(set)",
        "source.decl.attribute.final" => "final",
        "source.decl.attribute.discardableResult" => "discardable result",
        "source.decl.attribute.mutating" => "mutating",
        "source.decl.attribute.prefix" => "prefix",

        _ => "",
    };

    if mapped.is_empty() {
        tracing::warn!(raw, "no short label for classification string");
        if reduce_unmapped {
            raw.rsplit('.').next().unwrap_or_default().to_string()
        } else {
            raw.to_string()
        }
    } else {
        mapped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_is_totally_ordered() {
        let levels = Visibility::ALL;
        for (i, low) in levels.iter().enumerate() {
            for high in &levels[i + 1..] {
                assert!(low < high, "{low} should be < {high}");
                assert!(high >= low);
            }
        }
        assert!(Visibility::Public >= Visibility::Public);
    }

    #[test]
    fn test_visibility_unknown_defaults_to_internal() {
        assert_eq!(Visibility::from_label("PUBLIC"), Visibility::Public);
        assert_eq!(Visibility::from_label("whatever"), Visibility::Internal);
        assert_eq!(Visibility::from_label(""), Visibility::Internal);
    }

    #[test]
    fn test_kind_round_trips_through_label() {
        for kind in Kind::TOP_LEVEL {
            assert_eq!(Kind::from_label(&kind.as_str().to_lowercase()), kind);
        }
    }

    #[test]
    fn test_unknown_kind_wraps_lowercased() {
        assert_eq!(
            Kind::from_label("Instance Method"),
            Kind::Other("instance method".to_string())
        );
        assert_ne!(
            Kind::Other("enum case".to_string()),
            Kind::Other("mark".to_string())
        );
    }

    #[test]
    fn test_doc_set_type_reduces_other_to_last_word() {
        assert_eq!(Kind::GlobalFunc.doc_set_type(), "Function");
        assert_eq!(Kind::Typealias.doc_set_type(), "Alias");
        assert_eq!(
            Kind::Other("instance property".to_string()).doc_set_type(),
            "Property"
        );
        assert_eq!(Kind::Other("mark".to_string()).doc_set_type(), "Mark");
    }

    #[test]
    fn test_shorten_maps_known_labels() {
        assert_eq!(
            shorten_classification_label("source.lang.swift.decl.var.instance", false),
            "instance property"
        );
        assert_eq!(
            shorten_classification_label("source.decl.attribute.lazy", false),
            "lazy"
        );
    }

    #[test]
    fn test_shorten_falls_back_on_unmapped() {
        assert_eq!(
            shorten_classification_label("source.lang.swift.decl.something.new", false),
            "source.lang.swift.decl.something.new"
        );
        assert_eq!(
            shorten_classification_label("source.lang.swift.decl.something.new", true),
            "new"
        );
    }
}
