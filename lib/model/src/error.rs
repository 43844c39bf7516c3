use oxrdf::{NamedNode, NamedNodeRef};
use thiserror::Error;

/// A literal's lexical form does not conform to the grammar of its datatype.
///
/// For example, `"twelve"^^xsd:integer`. Construction of a [`TypedValue`]
/// surfaces this to the caller instead of silently defaulting the value.
///
/// [`TypedValue`]: crate::TypedValue
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{lexical_form}' is not a valid lexical form for {datatype}")]
pub struct LexicalFormError {
    lexical_form: String,
    datatype: NamedNode,
}

impl LexicalFormError {
    pub fn new(lexical_form: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        Self {
            lexical_form: lexical_form.into(),
            datatype: datatype.into(),
        }
    }

    /// The offending lexical form.
    pub fn lexical_form(&self) -> &str {
        &self.lexical_form
    }

    /// The datatype whose grammar the lexical form violates.
    pub fn datatype(&self) -> NamedNodeRef<'_> {
        self.datatype.as_ref()
    }
}

/// A coercion between value families that XPath casting rules disallow.
///
/// Casting a date-time to a boolean or a number is an error, not a zero or
/// `false` default.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot cast {from} to {to}")]
pub struct InvalidCastError {
    from: &'static str,
    to: &'static str,
}

impl InvalidCastError {
    pub fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }

    pub fn source_kind(&self) -> &'static str {
        self.from
    }

    pub fn target_kind(&self) -> &'static str {
        self.to
    }
}
