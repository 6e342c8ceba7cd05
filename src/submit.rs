use crate::controller::{FieldValues, FormController, FormResult, read_lock};

impl FormController {
    pub fn on_submit<Ev, F>(&self, callback: F) -> impl Fn(Ev) -> FormResult<()> + use<Ev, F>
    where
        F: Fn(FieldValues, Ev),
    {
        let this = self.clone();
        move |event: Ev| {
            let snapshot = read_lock(&this.state, "snapshotting values for submit")?
                .store
                .values();
            callback(snapshot, event);
            Ok(())
        }
    }
}
