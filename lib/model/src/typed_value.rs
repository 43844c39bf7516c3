use crate::{is_integer_datatype, InvalidCastError, LexicalFormError, Numeric};
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{BlankNode, Literal, LiteralRef, NamedNode, NamedNodeRef, Term, TermRef};
use oxsdatatypes::{Boolean, DateTime, Decimal, Double, Float, Integer};
use std::fmt;
use std::str::FromStr;

/// The computational value of an RDF term.
///
/// Immutable once constructed; construction parses the lexical form under the
/// datatype's grammar and fails with [`LexicalFormError`] if it does not
/// conform. All parsing and formatting goes through the XSD value types,
/// which are locale-invariant by construction (fixed `.` decimal separator,
/// fixed digit set).
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum TypedValue {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    BooleanLiteral(Boolean),
    NumericLiteral(Numeric),
    SimpleLiteral(String),
    LanguageStringLiteral { value: String, language: String },
    DateTimeLiteral(DateTime),
    /// A literal with a datatype this engine does not interpret, carried
    /// opaquely by lexical form and datatype.
    OtherLiteral(Literal),
}

impl TypedValue {
    /// Decodes a term into its computational value.
    pub fn from_term(term: TermRef<'_>) -> Result<Self, LexicalFormError> {
        match term {
            TermRef::NamedNode(inner) => Ok(TypedValue::NamedNode(inner.into_owned())),
            TermRef::BlankNode(inner) => Ok(TypedValue::BlankNode(inner.into_owned())),
            TermRef::Literal(inner) => Self::from_literal(inner),
        }
    }

    /// Decodes a literal, parsing its lexical form under its datatype.
    pub fn from_literal(literal: LiteralRef<'_>) -> Result<Self, LexicalFormError> {
        if let Some(language) = literal.language() {
            return Ok(TypedValue::LanguageStringLiteral {
                value: literal.value().to_owned(),
                language: language.to_owned(),
            });
        }
        Self::from_lexical_form(literal.value(), Some(literal.datatype()))
    }

    /// Builds a value from a lexical form and an optional datatype IRI.
    ///
    /// A missing datatype yields a simple literal, per RDF 1.1.
    pub fn from_lexical_form(
        lexical_form: &str,
        datatype: Option<NamedNodeRef<'_>>,
    ) -> Result<Self, LexicalFormError> {
        let Some(datatype) = datatype else {
            return Ok(TypedValue::SimpleLiteral(lexical_form.to_owned()));
        };

        let reject = || LexicalFormError::new(lexical_form, datatype);
        if datatype == xsd::STRING {
            Ok(TypedValue::SimpleLiteral(lexical_form.to_owned()))
        } else if datatype == xsd::BOOLEAN {
            Boolean::from_str(lexical_form)
                .map(TypedValue::BooleanLiteral)
                .map_err(|_| reject())
        } else if is_integer_datatype(datatype) {
            Integer::from_str(lexical_form)
                .map(|value| TypedValue::NumericLiteral(Numeric::Integer(value)))
                .map_err(|_| reject())
        } else if datatype == xsd::DECIMAL {
            Decimal::from_str(lexical_form)
                .map(|value| TypedValue::NumericLiteral(Numeric::Decimal(value)))
                .map_err(|_| reject())
        } else if datatype == xsd::FLOAT {
            Float::from_str(lexical_form)
                .map(|value| TypedValue::NumericLiteral(Numeric::Float(value)))
                .map_err(|_| reject())
        } else if datatype == xsd::DOUBLE {
            Double::from_str(lexical_form)
                .map(|value| TypedValue::NumericLiteral(Numeric::Double(value)))
                .map_err(|_| reject())
        } else if datatype == xsd::DATE_TIME {
            DateTime::from_str(lexical_form)
                .map(TypedValue::DateTimeLiteral)
                .map_err(|_| reject())
        } else if datatype == rdf::LANG_STRING {
            // A language-tagged datatype without a tag is malformed input.
            Err(reject())
        } else {
            Ok(TypedValue::OtherLiteral(Literal::new_typed_literal(
                lexical_form,
                datatype.into_owned(),
            )))
        }
    }

    /// A short name for the value's family, used in cast error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypedValue::NamedNode(_) => "IRI",
            TypedValue::BlankNode(_) => "blank node",
            TypedValue::BooleanLiteral(_) => "boolean",
            TypedValue::NumericLiteral(value) => match value {
                Numeric::Integer(_) => "integer",
                Numeric::Decimal(_) => "decimal",
                Numeric::Float(_) => "float",
                Numeric::Double(_) => "double",
            },
            TypedValue::SimpleLiteral(_) => "string",
            TypedValue::LanguageStringLiteral { .. } => "language-tagged string",
            TypedValue::DateTimeLiteral(_) => "dateTime",
            TypedValue::OtherLiteral(_) => "literal",
        }
    }

    /// The numeric view of this value, if it is a numeric literal.
    #[must_use]
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            TypedValue::NumericLiteral(value) => Some(*value),
            _ => None,
        }
    }

    /// [XPath casting to `xs:integer`](https://www.w3.org/TR/xpath-functions-31/#casting-to-integer).
    pub fn as_integer(&self) -> Result<Integer, InvalidCastError> {
        let cast = || InvalidCastError::new(self.kind_name(), "integer");
        match self {
            TypedValue::NumericLiteral(value) => match value {
                Numeric::Integer(value) => Ok(*value),
                Numeric::Decimal(value) => Integer::try_from(*value).map_err(|_| cast()),
                Numeric::Float(value) => Integer::try_from(*value).map_err(|_| cast()),
                Numeric::Double(value) => Integer::try_from(*value).map_err(|_| cast()),
            },
            TypedValue::BooleanLiteral(value) => Ok(Integer::from(i64::from(bool::from(*value)))),
            TypedValue::SimpleLiteral(value) => {
                Integer::from_str(value.trim()).map_err(|_| cast())
            }
            _ => Err(cast()),
        }
    }

    /// [XPath casting to `xs:decimal`](https://www.w3.org/TR/xpath-functions-31/#casting-to-decimal).
    pub fn as_decimal(&self) -> Result<Decimal, InvalidCastError> {
        let cast = || InvalidCastError::new(self.kind_name(), "decimal");
        match self {
            TypedValue::NumericLiteral(value) => match value {
                Numeric::Integer(value) => Ok(Decimal::from(*value)),
                Numeric::Decimal(value) => Ok(*value),
                Numeric::Float(value) => Decimal::try_from(*value).map_err(|_| cast()),
                Numeric::Double(value) => Decimal::try_from(*value).map_err(|_| cast()),
            },
            TypedValue::BooleanLiteral(value) => {
                Ok(Decimal::from(i64::from(bool::from(*value))))
            }
            TypedValue::SimpleLiteral(value) => {
                Decimal::from_str(value.trim()).map_err(|_| cast())
            }
            _ => Err(cast()),
        }
    }

    /// [XPath casting to `xs:float`](https://www.w3.org/TR/xpath-functions-31/#casting-to-float).
    pub fn as_float(&self) -> Result<Float, InvalidCastError> {
        let cast = || InvalidCastError::new(self.kind_name(), "float");
        match self {
            TypedValue::NumericLiteral(value) => Ok(match value {
                Numeric::Integer(value) => Float::from(*value),
                Numeric::Decimal(value) => Float::from(*value),
                Numeric::Float(value) => *value,
                // Lossy by XPath rule: double narrows to float.
                #[allow(clippy::cast_possible_truncation)]
                Numeric::Double(value) => Float::from(f64::from(*value) as f32),
            }),
            TypedValue::BooleanLiteral(value) => Ok(Float::from(Integer::from(i64::from(
                bool::from(*value),
            )))),
            TypedValue::SimpleLiteral(value) => Float::from_str(value.trim()).map_err(|_| cast()),
            _ => Err(cast()),
        }
    }

    /// [XPath casting to `xs:double`](https://www.w3.org/TR/xpath-functions-31/#casting-to-double).
    pub fn as_double(&self) -> Result<Double, InvalidCastError> {
        let cast = || InvalidCastError::new(self.kind_name(), "double");
        match self {
            TypedValue::NumericLiteral(value) => Ok(match value {
                Numeric::Integer(value) => Double::from(*value),
                Numeric::Decimal(value) => Double::from(*value),
                Numeric::Float(value) => Double::from(*value),
                Numeric::Double(value) => *value,
            }),
            TypedValue::BooleanLiteral(value) => Ok(Double::from(Integer::from(i64::from(
                bool::from(*value),
            )))),
            TypedValue::SimpleLiteral(value) => Double::from_str(value.trim()).map_err(|_| cast()),
            _ => Err(cast()),
        }
    }

    /// [XPath casting to `xs:boolean`](https://www.w3.org/TR/xpath-functions-31/#casting-boolean).
    ///
    /// Numeric zero and NaN are `false`, every other numeric is `true`.
    pub fn as_boolean(&self) -> Result<Boolean, InvalidCastError> {
        let cast = || InvalidCastError::new(self.kind_name(), "boolean");
        match self {
            TypedValue::BooleanLiteral(value) => Ok(*value),
            TypedValue::NumericLiteral(value) => Ok(Boolean::from(match value {
                Numeric::Integer(value) => *value != Integer::from(0),
                Numeric::Decimal(value) => *value != Decimal::from(0),
                Numeric::Float(value) => {
                    let value = f32::from(*value);
                    !(value.is_nan() || value == 0.0)
                }
                Numeric::Double(value) => {
                    let value = f64::from(*value);
                    !(value.is_nan() || value == 0.0)
                }
            })),
            TypedValue::SimpleLiteral(value) => {
                Boolean::from_str(value.trim()).map_err(|_| cast())
            }
            _ => Err(cast()),
        }
    }

    /// [XPath casting to `xs:dateTime`](https://www.w3.org/TR/xpath-functions-31/#casting-to-datetimes).
    pub fn as_datetime(&self) -> Result<DateTime, InvalidCastError> {
        let cast = || InvalidCastError::new(self.kind_name(), "dateTime");
        match self {
            TypedValue::DateTimeLiteral(value) => Ok(*value),
            TypedValue::SimpleLiteral(value) => {
                DateTime::from_str(value.trim()).map_err(|_| cast())
            }
            _ => Err(cast()),
        }
    }

    /// The string form of the value, per XPath `xs:string` casting.
    ///
    /// Blank nodes have no string form; they only carry identity.
    pub fn as_string(&self) -> Result<String, InvalidCastError> {
        match self {
            TypedValue::NamedNode(value) => Ok(value.as_str().to_owned()),
            TypedValue::BlankNode(_) => {
                Err(InvalidCastError::new(self.kind_name(), "string"))
            }
            TypedValue::BooleanLiteral(value) => Ok(bool::from(*value).to_string()),
            TypedValue::NumericLiteral(value) => Ok(value.format_value()),
            TypedValue::SimpleLiteral(value) => Ok(value.clone()),
            TypedValue::LanguageStringLiteral { value, .. } => Ok(value.clone()),
            TypedValue::DateTimeLiteral(value) => Ok(value.to_string()),
            TypedValue::OtherLiteral(value) => Ok(value.value().to_owned()),
        }
    }

    /// Re-encodes the value as an RDF term.
    #[must_use]
    pub fn to_term(&self) -> Term {
        match self {
            TypedValue::NamedNode(value) => Term::NamedNode(value.clone()),
            TypedValue::BlankNode(value) => Term::BlankNode(value.clone()),
            TypedValue::BooleanLiteral(value) => Term::Literal(Literal::from(bool::from(*value))),
            TypedValue::NumericLiteral(value) => match value {
                Numeric::Integer(value) => Term::Literal(Literal::from(i64::from(*value))),
                Numeric::Decimal(value) => Term::Literal(Literal::new_typed_literal(
                    value.to_string(),
                    xsd::DECIMAL,
                )),
                Numeric::Float(value) => Term::Literal(Literal::from(f32::from(*value))),
                Numeric::Double(value) => Term::Literal(Literal::from(f64::from(*value))),
            },
            TypedValue::SimpleLiteral(value) => Term::Literal(Literal::from(value.as_str())),
            TypedValue::LanguageStringLiteral { value, language } => Term::Literal(
                Literal::new_language_tagged_literal_unchecked(value, language),
            ),
            TypedValue::DateTimeLiteral(value) => Term::Literal(Literal::new_typed_literal(
                value.to_string(),
                xsd::DATE_TIME,
            )),
            TypedValue::OtherLiteral(value) => Term::Literal(value.clone()),
        }
    }
}

impl From<TypedValue> for Term {
    fn from(value: TypedValue) -> Self {
        value.to_term()
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_term().fmt(f)
    }
}
