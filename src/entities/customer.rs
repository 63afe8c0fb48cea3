//! Storefront customers

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::gateway::{Operation, Shape};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: String,
    pub city: String,
    pub status: String,
    pub created_at: String,
}

const FIELDS: &[FieldMutation] = &[
    FieldMutation::patch(
        "status",
        Operation::sealed_mutation("editCustomerStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "avatar",
        Operation::sealed_mutation("editCustomerAvatar", Shape::Entity),
    ),
];

impl Entity for Customer {
    const NAME: &'static str = "Customer";

    const SELECTION: &'static str =
        "id firstName lastName email phone avatar city status createdAt";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("customerById", Shape::Entity)),
        page: Some(Operation::sealed_query("customers", Shape::Connection)),
        filtered: Some(Operation::sealed_query("filterCustomers", Shape::Connection)),
        create: Some(Operation::sealed_mutation("createCustomer", Shape::Entity)),
        update: Some(Operation::sealed_mutation("editCustomer", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteCustomer", Shape::Ack)),
        fields: FIELDS,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.customers
    }
}
