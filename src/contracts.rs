use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use crate::controller::{FieldName, FieldValue};

pub type BoxedHandlerFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
pub type ControlHandler = Arc<dyn Fn(ControlEvent) -> BoxedHandlerFuture + Send + Sync>;

#[derive(Clone, Debug, PartialEq)]
pub enum ControlEvent {
    Input { value: FieldValue },
    Blur,
}

pub trait FormControl: Send + Sync + 'static {
    fn field_name(&self) -> FieldName;

    fn set_required(&self, required: bool);

    fn set_invalid_marker(&self, present: bool);

    fn add_input_handler(&self, handler: ControlHandler);

    fn add_blur_handler(&self, handler: ControlHandler);
}

#[derive(Clone, Default)]
pub struct HandlerList {
    handlers: Arc<RwLock<Vec<ControlHandler>>>,
}

impl HandlerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, handler: ControlHandler) {
        let mut handlers = match self.handlers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        match self.handlers.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub async fn dispatch(&self, event: ControlEvent) {
        let handlers: Vec<ControlHandler> = {
            let guard = match self.handlers.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.clone()
        };
        for handler in handlers {
            handler(event.clone()).await;
        }
    }
}
