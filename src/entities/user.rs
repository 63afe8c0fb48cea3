//! Back-office users

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::gateway::{Operation, Shape};
use crate::models::{OrganizationRef, RoleRef};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: String,
    pub role: RoleRef,
    pub organization: OrganizationRef,
    pub status: String,
    pub last_login: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

const FIELDS: &[FieldMutation] = &[
    FieldMutation::patch(
        "status",
        Operation::sealed_mutation("editUserStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "avatar",
        Operation::sealed_mutation("editUserAvatar", Shape::Entity),
    ),
];

impl Entity for User {
    const NAME: &'static str = "User";

    const SELECTION: &'static str = "id firstName lastName email phone avatar \
        role { id name } organization { id name } status lastLogin";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("userById", Shape::Entity)),
        page: Some(Operation::sealed_query("users", Shape::Connection)),
        filtered: Some(Operation::sealed_query("filterUsers", Shape::Connection)),
        create: Some(Operation::sealed_mutation("createUser", Shape::Entity)),
        update: Some(Operation::sealed_mutation("editUser", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteUser", Shape::Ack)),
        fields: FIELDS,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.users
    }
}
