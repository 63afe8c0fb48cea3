//! Back-office roles

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::gateway::{Operation, Shape};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
    pub status: String,
}

const FIELDS: &[FieldMutation] = &[FieldMutation::replace(
    "status",
    Operation::sealed_mutation("editRoleStatus", Shape::Entity),
)];

impl Entity for Role {
    const NAME: &'static str = "Role";

    const SELECTION: &'static str = "id name description permissions status";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("roleById", Shape::Entity)),
        page: Some(Operation::sealed_query("roles", Shape::Connection)),
        create: Some(Operation::sealed_mutation("createRole", Shape::Entity)),
        update: Some(Operation::sealed_mutation("editRole", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteRole", Shape::Ack)),
        fields: FIELDS,
        ..OperationSet::EMPTY
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.roles
    }
}
