use serde::Serialize;

use crate::model::ids::ClassId;

/// Label shown when a class has no usable name.
pub const CLASS_PLACEHOLDER_NAME: &str = "Lớp học";

/// A class (grade / cohort) the learner can pick subjects from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassRef {
    pub id: ClassId,
    pub name: String,
}

impl ClassRef {
    #[must_use]
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Name for selectors and headlines, falling back to a generic label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            CLASS_PLACEHOLDER_NAME
        } else {
            &self.name
        }
    }
}
