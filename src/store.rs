use std::collections::BTreeSet;

use crate::controller::{FieldName, FieldValue, FieldValues};

#[derive(Clone, Debug, Default)]
pub struct FieldStateStore {
    values: FieldValues,
    dirty: BTreeSet<FieldName>,
}

impl FieldStateStore {
    pub fn seeded(defaults: FieldValues) -> Self {
        Self {
            values: defaults,
            dirty: BTreeSet::new(),
        }
    }

    pub fn set_value(&mut self, name: FieldName, value: FieldValue) {
        self.values.insert(name, value);
    }

    pub fn value(&self, name: &FieldName) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn values(&self) -> FieldValues {
        self.values.clone()
    }

    pub fn values_for(&self, names: &BTreeSet<FieldName>) -> FieldValues {
        names
            .iter()
            .filter_map(|name| {
                self.values
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect()
    }

    pub fn mark_dirty(&mut self, name: FieldName) {
        self.dirty.insert(name);
    }

    pub fn is_dirty(&self, name: &FieldName) -> bool {
        self.dirty.contains(name)
    }

    pub fn dirty_fields(&self) -> BTreeSet<FieldName> {
        self.dirty.clone()
    }
}
