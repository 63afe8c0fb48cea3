//! Promotional banners

use serde::{Deserialize, Serialize};

use super::{Entity, CLICKS_PARAMS, IMPRESSIONS_PARAMS};
use crate::gateway::{Operation, Param, Shape};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: String,
    pub placement: String,
    pub status: String,
    pub impressions: i64,
    pub clicks: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Storefront banner filter
const FILTER_PARAMS: &[Param] = &[
    Param::new("status", "String"),
    Param::new("placement", "String"),
];

const FIELDS: &[FieldMutation] = &[
    FieldMutation::patch(
        "status",
        Operation::sealed_mutation("editBannerStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "imageUrl",
        Operation::sealed_mutation("editBannerImage", Shape::Entity),
    ),
    FieldMutation::patch(
        "impressions",
        Operation::plain_mutation("editBannerImpressions", IMPRESSIONS_PARAMS, Shape::Entity),
    ),
    FieldMutation::patch(
        "clicks",
        Operation::plain_mutation("editBannerClicks", CLICKS_PARAMS, Shape::Entity),
    ),
];

impl Entity for Banner {
    const NAME: &'static str = "Banner";

    const SELECTION: &'static str =
        "id title description imageUrl link placement status impressions clicks createdAt updatedAt";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("bannerById", Shape::Entity)),
        page: Some(Operation::sealed_query("banners", Shape::Connection)),
        filtered: Some(Operation::plain_query(
            "filterBanners",
            FILTER_PARAMS,
            Shape::Connection,
        )),
        create: Some(Operation::sealed_mutation("createBanner", Shape::Entity)),
        update: Some(Operation::sealed_mutation("editBanner", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteBanner", Shape::Ack)),
        fields: FIELDS,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.banners
    }
}
