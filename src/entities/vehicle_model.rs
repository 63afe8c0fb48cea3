//! Model lines of a brand

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::gateway::{Operation, Param, Shape};
use crate::models::BrandRef;
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleModel {
    pub id: String,
    pub name: String,
    pub brand: BrandRef,
    pub body_type: String,
    pub status: String,
}

const FILTER_PARAMS: &[Param] = &[Param::new("brandId", "ID")];

const FIELDS: &[FieldMutation] = &[FieldMutation::patch(
    "status",
    Operation::sealed_mutation("editModelStatus", Shape::Entity),
)];

impl Entity for VehicleModel {
    const NAME: &'static str = "VehicleModel";

    const SELECTION: &'static str = "id name brand { id name } bodyType status";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("modelById", Shape::Entity)),
        page: Some(Operation::plain_query("models", &[], Shape::Connection)),
        filtered: Some(Operation::plain_query(
            "filterModels",
            FILTER_PARAMS,
            Shape::Connection,
        )),
        create: Some(Operation::sealed_mutation("createModel", Shape::Entity)),
        update: Some(Operation::sealed_mutation("editModel", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteModel", Shape::Ack)),
        fields: FIELDS,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.vehicle_models
    }
}
