//! Argument schema types shared between tool declarations and the
//! parser's schema-coercion pass.

use std::collections::HashMap;

/// The expected shape of one tool argument.
///
/// `Union` lets a tool accept more than one shape for the same field
/// (e.g. a numeric argument that may arrive as either an int or a float).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgType {
    /// A string value.
    String,
    /// An integer value.
    Integer,
    /// A floating-point value.
    Float,
    /// A boolean value.
    Bool,
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
    /// Any one of the listed types is acceptable.
    Union(Vec<ArgType>),
}

impl ArgType {
    /// Whether `other` is (or is contained in, for a union) this type.
    #[must_use]
    pub fn accepts(&self, other: &ArgType) -> bool {
        match self {
            Self::Union(variants) => variants.contains(other),
            exact => exact == other,
        }
    }
}

/// A tool's declared argument schema: field name → expected type.
pub type ArgSchema = HashMap<String, ArgType>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_accepts_any_listed_member() {
        let number = ArgType::Union(vec![ArgType::Integer, ArgType::Float]);
        assert!(number.accepts(&ArgType::Integer));
        assert!(number.accepts(&ArgType::Float));
        assert!(!number.accepts(&ArgType::String));
    }
}
