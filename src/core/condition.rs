use serde::{Deserialize, Serialize};

use crate::core::types::ConditionId;

/// A reference condition from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    /// Human-readable condition name (e.g. "Flu")
    pub name: String,

    /// Whitespace-separated symptom keywords
    pub symptoms: String,

    /// Specialist the user should visit
    pub specialist: String,

    /// Precautions to take while waiting for a consultation
    pub precautions: String,
}

impl ConditionRecord {
    pub fn new(
        name: impl Into<String>,
        symptoms: impl Into<String>,
        specialist: impl Into<String>,
        precautions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symptoms: symptoms.into(),
            specialist: specialist.into(),
            precautions: precautions.into(),
        }
    }

    /// Stable identifier derived from the name
    #[must_use]
    pub fn id(&self) -> ConditionId {
        ConditionId::from_name(&self.name)
    }
}
