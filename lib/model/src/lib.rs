mod error;
mod numeric;
mod ordering;
mod typed_value;

pub use error::*;
pub use numeric::*;
pub use ordering::*;
pub use typed_value::*;

// Re-export some oxrdf and oxsdatatypes types.
pub use oxiri::Iri;
pub use oxrdf::vocab;
pub use oxrdf::{
    BlankNode, BlankNodeRef, Graph, IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef,
    NamedOrBlankNode, Subject, SubjectRef, Term, TermRef, Triple, TripleRef, Variable,
    VariableNameParseError, VariableRef,
};
pub use oxsdatatypes::{Boolean, DateTime, Decimal, Double, Float, Integer};

use oxrdf::vocab::xsd;

/// Checks if the datatype is one of the XSD integer-derived datatypes.
pub fn is_integer_datatype(datatype: NamedNodeRef<'_>) -> bool {
    static INTEGER_DATATYPES: &[NamedNodeRef<'_>; 13] = &[
        xsd::INTEGER,
        xsd::BYTE,
        xsd::SHORT,
        xsd::INT,
        xsd::LONG,
        xsd::UNSIGNED_BYTE,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_LONG,
        xsd::POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::NON_NEGATIVE_INTEGER,
    ];
    INTEGER_DATATYPES.contains(&datatype)
}
