use crate::FormField;

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

/// Per-field validation messages. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<FormField, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Clear the message for a field once the user edits it again.
    pub fn clear(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    /// Submission is allowed only when this is true.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> Iter<'_, FormField, String> {
        self.errors.iter()
    }
}

impl<'a> IntoIterator for &'a FormErrors {
    type Item = (&'a FormField, &'a String);
    type IntoIter = Iter<'a, FormField, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
