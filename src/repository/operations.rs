//! Per-entity operation tables

use crate::gateway::Operation;

/// How a narrow field mutation writes its response into the singular slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Mirror only the mutated field
    Patch,
    /// Reset and replace the whole entity with the response
    Replace,
}

/// A mutation that sets exactly one field server-side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMutation {
    pub field: &'static str,
    pub operation: Operation,
    pub apply: ApplyMode,
}

impl FieldMutation {
    pub const fn patch(field: &'static str, operation: Operation) -> Self {
        Self {
            field,
            operation,
            apply: ApplyMode::Patch,
        }
    }

    pub const fn replace(field: &'static str, operation: Operation) -> Self {
        Self {
            field,
            operation,
            apply: ApplyMode::Replace,
        }
    }
}

/// The subset of repository operations an entity type supports
#[derive(Debug, Clone, Copy)]
pub struct OperationSet {
    pub by_id: Option<Operation>,
    pub page: Option<Operation>,
    pub filtered: Option<Operation>,
    pub create: Option<Operation>,
    pub update: Option<Operation>,
    pub remove: Option<Operation>,
    pub fields: &'static [FieldMutation],
}

impl OperationSet {
    pub const EMPTY: OperationSet = OperationSet {
        by_id: None,
        page: None,
        filtered: None,
        create: None,
        update: None,
        remove: None,
        fields: &[],
    };

    pub fn field(&self, name: &str) -> Option<&FieldMutation> {
        self.fields.iter().find(|mutation| mutation.field == name)
    }
}
