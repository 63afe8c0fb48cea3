//! Organizations grouping vendors (tenants)

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::gateway::{Operation, Shape};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
    pub logo: String,
    pub status: String,
    pub vendor_count: i64,
}

const FIELDS: &[FieldMutation] = &[
    FieldMutation::patch(
        "status",
        Operation::sealed_mutation("editOrganizationStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "logo",
        Operation::sealed_mutation("editOrganizationLogo", Shape::Entity),
    ),
];

impl Entity for Organization {
    const NAME: &'static str = "Organization";

    const SELECTION: &'static str =
        "id name email phone address website logo status vendorCount";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("organizationById", Shape::Entity)),
        page: Some(Operation::sealed_query("organizations", Shape::Connection)),
        create: Some(Operation::sealed_mutation(
            "createOrganization",
            Shape::Entity,
        )),
        update: Some(Operation::sealed_mutation("editOrganization", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteOrganization", Shape::Ack)),
        fields: FIELDS,
        ..OperationSet::EMPTY
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.organizations
    }
}
