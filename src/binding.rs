use std::sync::{Arc, Weak};

use log::error;

use crate::contracts::{ControlEvent, ControlHandler, FormControl};
use crate::controller::{FieldName, FormController, FormResult, write_lock};

impl FormController {
    pub fn register(&self, control: Arc<dyn FormControl>) -> FormResult<()> {
        let name = control.field_name();
        // Resolving required-ness doubles as the declaration check: an
        // undeclared control must fail at registration, not at first use.
        if self.schema.is_required(&name)? {
            control.set_required(true);
        }

        let this = self.clone();
        let input_name = name.clone();
        let input_control = Arc::downgrade(&control);
        let input_handler: ControlHandler = Arc::new(move |event| {
            let this = this.clone();
            let name = input_name.clone();
            let control = input_control.clone();
            Box::pin(async move {
                let ControlEvent::Input { value } = event else {
                    return;
                };
                let recorded = write_lock(&this.state, "recording input value").map(|mut state| {
                    state.store.mark_dirty(name.clone());
                    state.store.set_value(name.clone(), value);
                });
                if let Err(err) = recorded {
                    error!("dropping input for `{name}`: {err}");
                    return;
                }
                if this.options.validate_on_input {
                    let debounce = this.options.input_debounce;
                    drop(tokio::spawn(async move {
                        match this.validate_field_after(&name, debounce).await {
                            Ok(true) => refresh_marker(&this, &control, &name),
                            Ok(false) => {}
                            Err(err) => error!("input validation for `{name}` failed: {err}"),
                        }
                    }));
                }
            })
        });
        control.add_input_handler(input_handler);

        let this = self.clone();
        let blur_name = name;
        let blur_control = Arc::downgrade(&control);
        let blur_handler: ControlHandler = Arc::new(move |_event| {
            let this = this.clone();
            let name = blur_name.clone();
            let control = blur_control.clone();
            Box::pin(async move {
                match this.validate_field(&name).await {
                    Ok(true) => refresh_marker(&this, &control, &name),
                    Ok(false) => {}
                    Err(err) => error!("blur validation for `{name}` failed: {err}"),
                }
            })
        });
        control.add_blur_handler(blur_handler);

        Ok(())
    }
}

fn refresh_marker(
    controller: &FormController,
    control: &Weak<dyn FormControl>,
    name: &FieldName,
) {
    if let Some(control) = control.upgrade() {
        control.set_invalid_marker(controller.errors.get().contains_key(name));
    }
}
