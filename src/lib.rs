mod binding;
mod contracts;
mod controller;
mod observable;
mod schema;
mod store;
mod submit;
mod validation;


pub use contracts::{BoxedHandlerFuture, ControlEvent, ControlHandler, FormControl, HandlerList};
pub use controller::{
    ErrorMap, FieldName, FieldValue, FieldValues, FormController, FormError, FormOptions,
    FormResult, ValidationTicket,
};
pub use observable::{ObservableCell, ReadView, Subscription};
pub use schema::{
    BoxedRuleFuture, BoxedValidityFuture, FieldSpec, RuleViolation, SchemaAdapter, SchemaEngine,
};
pub use store::FieldStateStore;
