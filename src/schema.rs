use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::controller::{FieldName, FieldValues, FormError, FormResult};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldSpec {
    pub required: bool,
    pub refs: BTreeSet<FieldName>,
}

impl FieldSpec {
    pub fn required() -> Self {
        Self {
            required: true,
            refs: BTreeSet::new(),
        }
    }

    pub fn referencing<I>(refs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldName>,
    {
        Self {
            required: false,
            refs: refs.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleViolation {
    pub field: FieldName,
    pub message: String,
}

pub type BoxedRuleFuture = Pin<Box<dyn Future<Output = Result<(), RuleViolation>> + Send + 'static>>;
pub type BoxedValidityFuture = Pin<Box<dyn Future<Output = bool> + Send + 'static>>;

pub trait SchemaEngine: Send + Sync + 'static {
    fn field_spec(&self, name: &FieldName) -> Option<FieldSpec>;

    fn validate_subset(&self, names: BTreeSet<FieldName>, values: FieldValues) -> BoxedRuleFuture;

    fn check_all(&self, values: FieldValues) -> BoxedValidityFuture;
}

#[derive(Clone)]
pub struct SchemaAdapter {
    engine: Arc<dyn SchemaEngine>,
}

impl SchemaAdapter {
    pub fn new(engine: Arc<dyn SchemaEngine>) -> Self {
        Self { engine }
    }

    fn spec_of(&self, name: &FieldName) -> FormResult<FieldSpec> {
        self.engine
            .field_spec(name)
            .ok_or_else(|| FormError::UnknownField(name.clone()))
    }

    pub fn dependencies_of(&self, name: &FieldName) -> FormResult<BTreeSet<FieldName>> {
        Ok(self.spec_of(name)?.refs)
    }

    pub fn is_required(&self, name: &FieldName) -> FormResult<bool> {
        Ok(self.spec_of(name)?.required)
    }

    pub async fn partial_validate(
        &self,
        names: BTreeSet<FieldName>,
        values: FieldValues,
    ) -> Result<(), RuleViolation> {
        self.engine.validate_subset(names, values).await
    }

    pub async fn full_validate(&self, values: FieldValues) -> bool {
        self.engine.check_all(values).await
    }
}
