use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use rust_decimal::Decimal;

use crate::observable::{ObservableCell, ReadView};
use crate::schema::{SchemaAdapter, SchemaEngine};
use crate::store::FieldStateStore;

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldName(Arc<str>);

impl FieldName {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.is_empty())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

pub type FieldValues = BTreeMap<FieldName, FieldValue>;
pub type ErrorMap = BTreeMap<FieldName, String>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ValidationTicket(pub u64);

#[derive(Clone, Debug)]
pub struct FormOptions {
    pub default_values: FieldValues,
    pub validate_on_input: bool,
    pub input_debounce: Duration,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            default_values: FieldValues::new(),
            validate_on_input: false,
            input_debounce: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormError {
    UnknownField(FieldName),
    StatePoisoned(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::UnknownField(name) => {
                write!(f, "field `{name}` is not declared in the schema")
            }
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub(crate) struct FormState {
    pub(crate) store: FieldStateStore,
    pub(crate) tickets: BTreeMap<FieldName, ValidationTicket>,
}

impl FormState {
    pub(crate) fn next_ticket(&mut self, name: &FieldName) -> ValidationTicket {
        let next = ValidationTicket(self.tickets.get(name).map_or(0, |ticket| ticket.0) + 1);
        self.tickets.insert(name.clone(), next);
        next
    }
}

#[derive(Clone)]
pub struct FormController {
    pub(crate) options: FormOptions,
    pub(crate) schema: SchemaAdapter,
    pub(crate) state: Arc<RwLock<FormState>>,
    pub(crate) errors: ObservableCell<ErrorMap>,
    pub(crate) overall_valid: ObservableCell<bool>,
}

impl FormController {
    pub fn new(engine: Arc<dyn SchemaEngine>, options: FormOptions) -> Self {
        let store = FieldStateStore::seeded(options.default_values.clone());
        Self {
            schema: SchemaAdapter::new(engine),
            state: Arc::new(RwLock::new(FormState {
                store,
                tickets: BTreeMap::new(),
            })),
            errors: ObservableCell::new(ErrorMap::new()),
            overall_valid: ObservableCell::new(false),
            options,
        }
    }

    pub fn errors(&self) -> ReadView<ErrorMap> {
        self.errors.read_view()
    }

    pub fn is_valid(&self) -> ReadView<bool> {
        self.overall_valid.read_view()
    }

    pub fn field_error(&self, name: &FieldName) -> Option<String> {
        self.errors.get().get(name).cloned()
    }

    pub fn values(&self) -> FormResult<FieldValues> {
        Ok(read_lock(&self.state, "snapshotting field values")?
            .store
            .values())
    }

    pub fn is_dirty(&self, name: &FieldName) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading dirty state")?
            .store
            .is_dirty(name))
    }

    pub fn dirty_fields(&self) -> FormResult<BTreeSet<FieldName>> {
        Ok(read_lock(&self.state, "reading dirty fields")?
            .store
            .dirty_fields())
    }

    pub(crate) fn is_latest_ticket(
        &self,
        name: &FieldName,
        ticket: ValidationTicket,
    ) -> FormResult<bool> {
        Ok(
            read_lock(&self.state, "checking latest validation ticket")?
                .tickets
                .get(name)
                .copied()
                == Some(ticket),
        )
    }
}

pub(crate) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(crate) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
