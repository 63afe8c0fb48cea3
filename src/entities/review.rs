//! Customer reviews of vehicles and vendors

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::gateway::{Operation, Param, Shape};
use crate::models::{CustomerRef, VehicleRef, VendorRef};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    pub id: String,
    pub rating: i32,
    pub comment: String,
    pub customer: CustomerRef,
    pub vehicle: VehicleRef,
    pub vendor: VendorRef,
    pub status: String,
    pub created_at: String,
}

const PAGE_PARAMS: &[Param] = &[Param::new("vehicleId", "ID")];

const FIELDS: &[FieldMutation] = &[FieldMutation::replace(
    "status",
    Operation::sealed_mutation("editReviewStatus", Shape::Entity),
)];

impl Entity for Review {
    const NAME: &'static str = "Review";

    const SELECTION: &'static str = "id rating comment \
        customer { id firstName lastName email } \
        vehicle { id brand model year price thumbnail } \
        vendor { id name logo phone organization { id name } } \
        status createdAt";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("reviewById", Shape::Entity)),
        page: Some(Operation::plain_query("reviews", PAGE_PARAMS, Shape::Connection)),
        filtered: Some(Operation::sealed_query("filterReviews", Shape::Connection)),
        create: Some(Operation::sealed_mutation("createReview", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteReview", Shape::Ack)),
        fields: FIELDS,
        ..OperationSet::EMPTY
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.reviews
    }
}
