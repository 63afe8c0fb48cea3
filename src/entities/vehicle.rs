//! Vehicle listings

use serde::{Deserialize, Serialize};

use super::{Entity, CLICKS_PARAMS, IMPRESSIONS_PARAMS, VIEWS_PARAMS};
use crate::gateway::{Operation, Shape};
use crate::models::{VendorRef, YesNo};
use crate::repository::{FieldMutation, OperationSet};
use crate::store::{EntitySlices, Store};

/// A vehicle listing as returned by the gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vehicle {
    pub id: String,
    pub entry_no: String,
    pub vendor: VendorRef,

    // Basic
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub condition: String,
    pub mileage: i64,
    pub description: String,

    // Optics
    pub body_type: String,
    pub exterior_color: String,
    pub interior_color: String,
    pub upholstery: String,
    pub seats: i32,
    pub doors: i32,

    // Drive-train
    pub transmission: String,
    pub fuel_type: String,
    pub engine_size: String,
    pub drive_type: String,
    pub steering: String,

    pub features: Vec<String>,
    pub image_urls: Vec<String>,
    pub thumbnail: String,

    pub price: f64,
    pub currency: String,
    pub negotiable: YesNo,

    // Counters are absolute values set by the server
    pub views: i64,
    pub impressions: i64,
    pub clicks: i64,

    pub reserved: YesNo,
    pub sold: YesNo,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Back-office and storefront vehicle search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_from: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_to: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold: Option<YesNo>,
}

const FIELDS: &[FieldMutation] = &[
    FieldMutation::patch(
        "status",
        Operation::sealed_mutation("editVehicleStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "reserved",
        Operation::sealed_mutation("editVehicleReserved", Shape::Entity),
    ),
    FieldMutation::patch(
        "sold",
        Operation::sealed_mutation("editVehicleSold", Shape::Entity),
    ),
    FieldMutation::patch(
        "thumbnail",
        Operation::sealed_mutation("editVehicleThumbnail", Shape::Entity),
    ),
    // The image handler reloads the whole listing
    FieldMutation::replace(
        "imageUrls",
        Operation::sealed_mutation("editVehicleImages", Shape::Entity),
    ),
    FieldMutation::patch(
        "views",
        Operation::plain_mutation("editVehicleViews", VIEWS_PARAMS, Shape::Entity),
    ),
    FieldMutation::patch(
        "impressions",
        Operation::plain_mutation("editVehicleImpressions", IMPRESSIONS_PARAMS, Shape::Entity),
    ),
    FieldMutation::patch(
        "clicks",
        Operation::plain_mutation("editVehicleClicks", CLICKS_PARAMS, Shape::Entity),
    ),
];

impl Entity for Vehicle {
    const NAME: &'static str = "Vehicle";

    const SELECTION: &'static str = "id entryNo \
        vendor { id name logo phone organization { id name } } \
        brand model year condition mileage description \
        bodyType exteriorColor interiorColor upholstery seats doors \
        transmission fuelType engineSize driveType steering \
        features imageUrls thumbnail price currency negotiable \
        views impressions clicks reserved sold status createdAt updatedAt";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("vehicleById", Shape::Entity)),
        page: Some(Operation::plain_query("vehicles", &[], Shape::Connection)),
        filtered: Some(Operation::sealed_query("filterVehicles", Shape::Connection)),
        create: Some(Operation::sealed_mutation("createVehicle", Shape::Entity)),
        update: Some(Operation::sealed_mutation("editVehicle", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteVehicle", Shape::Ack)),
        fields: FIELDS,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.vehicles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_response_fills_defaults() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": "veh-1",
            "brand": "Toyota",
            "vendor": { "id": "ven-1" },
            "sold": "Yes"
        }))
        .unwrap();

        assert_eq!(vehicle.brand, "Toyota");
        assert_eq!(vehicle.vendor.organization.name, "");
        assert_eq!(vehicle.sold, YesNo::Yes);
        assert_eq!(vehicle.reserved, YesNo::No);
        assert!(vehicle.image_urls.is_empty());
    }

    #[test]
    fn test_filter_skips_unset_fields() {
        let filter = VehicleFilter {
            brand: Some("Mazda".to_string()),
            max_price: Some(20000.0),
            ..VehicleFilter::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({ "brand": "Mazda", "maxPrice": 20000.0 })
        );
    }

    #[test]
    fn test_counter_mutations_are_plain_patches() {
        for field in ["views", "impressions", "clicks"] {
            let mutation = Vehicle::OPERATIONS.field(field).unwrap();
            assert_eq!(mutation.apply, crate::repository::ApplyMode::Patch);
            assert_eq!(mutation.operation.transport, crate::gateway::Transport::Plain);
        }
        assert_eq!(
            Vehicle::OPERATIONS.field("imageUrls").unwrap().apply,
            crate::repository::ApplyMode::Replace
        );
    }
}
