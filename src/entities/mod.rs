//! Marketplace entity types
//!
//! Each entity declares its default shape (via `Default`), the selection set
//! requested for it, the operations the gateway offers for it and which store
//! slices it owns.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::gateway::Param;
use crate::repository::OperationSet;
use crate::store::{EntitySlices, Store};

pub mod banner;
pub mod brand;
pub mod contact;
pub mod customer;
pub mod featured_vehicle;
pub mod interest;
pub mod main_carousel;
pub mod organization;
pub mod review;
pub mod role;
pub mod user;
pub mod vehicle;
pub mod vehicle_model;
pub mod vendor;

pub use banner::Banner;
pub use brand::Brand;
pub use contact::{ContactMessage, ContactReply, ContactThread};
pub use customer::Customer;
pub use featured_vehicle::FeaturedVehicle;
pub use interest::Interest;
pub use main_carousel::MainCarousel;
pub use organization::Organization;
pub use review::Review;
pub use role::Role;
pub use user::User;
pub use vehicle::{Vehicle, VehicleFilter};
pub use vehicle_model::VehicleModel;
pub use vendor::Vendor;

// Plain counter mutations send absolute values, never increments.
pub(crate) const VIEWS_PARAMS: &[Param] = &[Param::new("id", "ID!"), Param::new("views", "Int!")];
pub(crate) const IMPRESSIONS_PARAMS: &[Param] = &[
    Param::new("id", "ID!"),
    Param::new("impressions", "Int!"),
];
pub(crate) const CLICKS_PARAMS: &[Param] = &[Param::new("id", "ID!"), Param::new("clicks", "Int!")];

pub trait Entity: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    /// Human-readable type name used in logs and errors
    const NAME: &'static str;

    /// GraphQL selection set for one node of this type
    const SELECTION: &'static str;

    const OPERATIONS: OperationSet;

    fn id(&self) -> &str;

    fn slices(store: &Store) -> &EntitySlices<Self>;
}
