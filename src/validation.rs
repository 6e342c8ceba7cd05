use std::time::Duration;

use futures_timer::Delay;
use log::debug;

use crate::controller::{FieldName, FormController, FormResult, read_lock, write_lock};

impl FormController {
    pub async fn validate_field(&self, name: &FieldName) -> FormResult<bool> {
        self.validate_field_after(name, Duration::ZERO).await
    }

    pub(crate) async fn validate_field_after(
        &self,
        name: &FieldName,
        debounce: Duration,
    ) -> FormResult<bool> {
        let refs = self.schema.dependencies_of(name)?;

        let ticket = {
            let mut state = write_lock(&self.state, "starting field validation")?;
            state.next_ticket(name)
        };

        if !debounce.is_zero() {
            Delay::new(debounce).await;
            if !self.is_latest_ticket(name, ticket)? {
                return Ok(false);
            }
        }

        let mut closure = refs;
        closure.insert(name.clone());

        let subset = {
            let state = read_lock(&self.state, "reading values for partial validation")?;
            state.store.values_for(&closure)
        };

        debug!("validating `{name}` over {} field(s)", closure.len());
        let outcome = self.schema.partial_validate(closure, subset).await;

        if !self.is_latest_ticket(name, ticket)? {
            debug!("discarding stale validation outcome for `{name}`");
            return Ok(false);
        }

        match outcome {
            Ok(()) => {
                // A partial pass only vouches for the triggering field;
                // entries for its refs stay as they are.
                self.errors.update(|errors| {
                    errors.remove(name);
                });
            }
            Err(violation) => {
                if violation.field != *name {
                    debug!(
                        "rule failed on referenced field `{}`; surfacing on `{name}`",
                        violation.field
                    );
                }
                let owner = name.clone();
                self.errors.update(move |errors| {
                    errors.insert(owner, violation.message);
                });
            }
        }

        // Overall validity always comes from an independent full-schema
        // check; fields outside the closure may be stale-but-invalid
        // without an ErrorMap entry.
        let all_values = {
            let state = read_lock(&self.state, "reading values for full validation")?;
            state.store.values()
        };
        let valid = self.schema.full_validate(all_values).await;
        if self.is_latest_ticket(name, ticket)? {
            self.overall_valid.set(valid);
            debug!("`{name}` validated; form valid = {valid}");
        }
        Ok(true)
    }
}
