use crate::{BindingId, EvalError, EvaluationContext, Expression};
use rdf_reckon_model::{TypedValue, Variable};
use rustc_hash::FxHashMap;

/// An in-memory binding multiset.
///
/// The reference [`EvaluationContext`] implementation: rows are inserted once
/// and handed out by id. Production engines supply their own context over
/// whatever row representation they use.
#[derive(Debug, Clone, Default)]
pub struct BindingMultiset {
    variables: Vec<Variable>,
    rows: Vec<FxHashMap<Variable, TypedValue>>,
}

impl BindingMultiset {
    #[must_use]
    pub fn new(variables: Vec<Variable>) -> Self {
        Self {
            variables,
            rows: Vec::new(),
        }
    }

    /// Appends a row and returns its id.
    ///
    /// Bindings for variables that were not declared at construction are
    /// dropped; variables without a binding in the row are unbound.
    pub fn push(
        &mut self,
        bindings: impl IntoIterator<Item = (Variable, TypedValue)>,
    ) -> BindingId {
        let row = bindings
            .into_iter()
            .filter(|(variable, _)| self.variables.contains(variable))
            .collect();
        self.rows.push(row);
        BindingId::new((self.rows.len() - 1) as u64)
    }

    /// The ids of all rows, in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<BindingId> {
        (0..self.rows.len() as u64).map(BindingId::new).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row_map(&self, binding: BindingId) -> Option<&FxHashMap<Variable, TypedValue>> {
        usize::try_from(binding.as_u64())
            .ok()
            .and_then(|index| self.rows.get(index))
    }
}

impl EvaluationContext for BindingMultiset {
    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn evaluate(
        &self,
        expression: &Expression,
        binding: BindingId,
    ) -> Result<TypedValue, EvalError> {
        match expression {
            Expression::Variable(variable) => self
                .row_map(binding)
                .and_then(|row| row.get(variable))
                .cloned()
                .ok_or_else(|| EvalError::UnboundVariable(variable.clone())),
            Expression::Constant(value) => Ok(value.clone()),
        }
    }

    fn row(&self, binding: BindingId) -> Option<Vec<Option<TypedValue>>> {
        let row = self.row_map(binding)?;
        Some(
            self.variables
                .iter()
                .map(|variable| row.get(variable).cloned())
                .collect(),
        )
    }
}
