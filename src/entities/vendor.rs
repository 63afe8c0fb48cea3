//! Vendors (dealerships) selling on the marketplace

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::gateway::{Operation, Shape};
use crate::models::{OrganizationRef, YesNo};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub logo: String,
    pub status: String,
    pub verified: YesNo,
    pub organization: OrganizationRef,
    pub created_at: String,
}

const FIELDS: &[FieldMutation] = &[
    // Reloads the whole vendor
    FieldMutation::replace(
        "status",
        Operation::sealed_mutation("editVendorStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "logo",
        Operation::sealed_mutation("editVendorLogo", Shape::Entity),
    ),
    FieldMutation::patch(
        "verified",
        Operation::sealed_mutation("editVendorVerified", Shape::Entity),
    ),
];

impl Entity for Vendor {
    const NAME: &'static str = "Vendor";

    const SELECTION: &'static str = "id name email phone address city country logo status verified \
        organization { id name } createdAt";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("vendorById", Shape::Entity)),
        page: Some(Operation::sealed_query("vendors", Shape::Connection)),
        filtered: Some(Operation::sealed_query("filterVendors", Shape::Connection)),
        create: Some(Operation::sealed_mutation("createVendor", Shape::Entity)),
        update: Some(Operation::sealed_mutation("editVendor", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteVendor", Shape::Ack)),
        fields: FIELDS,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.vendors
    }
}
