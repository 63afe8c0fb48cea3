//! Vehicle brands

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::gateway::{Operation, Shape};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub status: String,
    /// Model names, denormalized from the brand's models
    pub models: Vec<String>,
    pub vehicle_count: i64,
}

const FIELDS: &[FieldMutation] = &[
    FieldMutation::patch(
        "status",
        Operation::sealed_mutation("editBrandStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "logo",
        Operation::sealed_mutation("editBrandLogo", Shape::Entity),
    ),
];

impl Entity for Brand {
    const NAME: &'static str = "Brand";

    const SELECTION: &'static str = "id name logo status models vehicleCount";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("brandById", Shape::Entity)),
        page: Some(Operation::plain_query("brands", &[], Shape::Connection)),
        filtered: Some(Operation::sealed_query("filterBrands", Shape::Connection)),
        create: Some(Operation::sealed_mutation("createBrand", Shape::Entity)),
        update: Some(Operation::sealed_mutation("editBrand", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteBrand", Shape::Ack)),
        fields: FIELDS,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.brands
    }
}
