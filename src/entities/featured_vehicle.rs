//! Featured vehicle placements on the storefront

use serde::{Deserialize, Serialize};

use super::{Entity, CLICKS_PARAMS, IMPRESSIONS_PARAMS};
use crate::gateway::{Operation, Shape};
use crate::models::{VehicleRef, VendorRef};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturedVehicle {
    pub id: String,
    pub vehicle: VehicleRef,
    pub vendor: VendorRef,
    pub position: i32,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub impressions: i64,
    pub clicks: i64,
    pub created_at: String,
}

const FIELDS: &[FieldMutation] = &[
    // Reloads the whole placement even though only the status changes
    FieldMutation::replace(
        "status",
        Operation::sealed_mutation("editFeaturedVehicleStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "impressions",
        Operation::plain_mutation(
            "editFeaturedVehicleImpressions",
            IMPRESSIONS_PARAMS,
            Shape::Entity,
        ),
    ),
    FieldMutation::patch(
        "clicks",
        Operation::plain_mutation("editFeaturedVehicleClicks", CLICKS_PARAMS, Shape::Entity),
    ),
];

impl Entity for FeaturedVehicle {
    const NAME: &'static str = "FeaturedVehicle";

    const SELECTION: &'static str = "id \
        vehicle { id brand model year price thumbnail } \
        vendor { id name logo phone organization { id name } } \
        position startDate endDate status impressions clicks createdAt";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("featuredVehicleById", Shape::Entity)),
        page: Some(Operation::plain_query("featuredVehicles", &[], Shape::Connection)),
        filtered: Some(Operation::sealed_query(
            "filterFeaturedVehicles",
            Shape::Connection,
        )),
        create: Some(Operation::sealed_mutation(
            "createFeaturedVehicle",
            Shape::Entity,
        )),
        update: Some(Operation::sealed_mutation("editFeaturedVehicle", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteFeaturedVehicle", Shape::Ack)),
        fields: FIELDS,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.featured_vehicles
    }
}
