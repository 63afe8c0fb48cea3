//! Main carousel slides on the storefront

use serde::{Deserialize, Serialize};

use super::{Entity, CLICKS_PARAMS, IMPRESSIONS_PARAMS};
use crate::gateway::{Operation, Shape};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MainCarousel {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub link: String,
    pub position: i32,
    pub status: String,
    pub impressions: i64,
    pub clicks: i64,
}

const FIELDS: &[FieldMutation] = &[
    FieldMutation::patch(
        "status",
        Operation::sealed_mutation("editMainCarouselStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "imageUrl",
        Operation::sealed_mutation("editMainCarouselImage", Shape::Entity),
    ),
    FieldMutation::patch(
        "impressions",
        Operation::plain_mutation("editMainCarouselImpressions", IMPRESSIONS_PARAMS, Shape::Entity),
    ),
    FieldMutation::patch(
        "clicks",
        Operation::plain_mutation("editMainCarouselClicks", CLICKS_PARAMS, Shape::Entity),
    ),
];

impl Entity for MainCarousel {
    const NAME: &'static str = "MainCarousel";

    const SELECTION: &'static str =
        "id title subtitle imageUrl link position status impressions clicks";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("mainCarouselById", Shape::Entity)),
        page: Some(Operation::plain_query("mainCarousels", &[], Shape::Connection)),
        create: Some(Operation::sealed_mutation("createMainCarousel", Shape::Entity)),
        update: Some(Operation::sealed_mutation("editMainCarousel", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteMainCarousel", Shape::Ack)),
        fields: FIELDS,
        ..OperationSet::EMPTY
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.main_carousels
    }
}
