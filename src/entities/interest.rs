//! Customer interest registered against a vehicle

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::gateway::{Operation, Shape};
use crate::models::{CustomerRef, VehicleRef, VendorRef};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Interest {
    pub id: String,
    pub customer: CustomerRef,
    pub vehicle: VehicleRef,
    pub vendor: VendorRef,
    pub note: String,
    pub status: String,
    pub created_at: String,
}

const FIELDS: &[FieldMutation] = &[FieldMutation::patch(
    "status",
    Operation::sealed_mutation("editInterestStatus", Shape::Entity),
)];

impl Entity for Interest {
    const NAME: &'static str = "Interest";

    const SELECTION: &'static str = "id \
        customer { id firstName lastName email } \
        vehicle { id brand model year price thumbnail } \
        vendor { id name logo phone organization { id name } } \
        note status createdAt";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("interestById", Shape::Entity)),
        page: Some(Operation::sealed_query("interests", Shape::Connection)),
        filtered: Some(Operation::sealed_query("filterInterests", Shape::Connection)),
        create: Some(Operation::sealed_mutation("createInterest", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteInterest", Shape::Ack)),
        fields: FIELDS,
        ..OperationSet::EMPTY
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.interests
    }
}
