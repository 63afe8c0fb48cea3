//! Client state store
//!
//! One explicit store object holds a singular slice and a collection slice per
//! entity type. It is shared by reference; there is no global instance.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::entities::{
    Banner, Brand, ContactThread, Customer, FeaturedVehicle, Interest, MainCarousel,
    Organization, Review, Role, User, Vehicle, VehicleModel, Vendor,
};
use crate::models::Connection;

mod slice;

pub use slice::{Phase, Slice, SliceUpdate};

pub type SliceCell<T> = Arc<RwLock<Slice<T>>>;

/// Singular and collection slices of one entity type
pub struct EntitySlices<E> {
    pub one: SliceCell<E>,
    pub list: SliceCell<Connection<E>>,
}

impl<E: Default> Default for EntitySlices<E> {
    fn default() -> Self {
        Self {
            one: Arc::new(RwLock::new(Slice::default())),
            list: Arc::new(RwLock::new(Slice::default())),
        }
    }
}

impl<E: Clone + Default> EntitySlices<E> {
    /// Current singular entity
    pub async fn entity(&self) -> E {
        self.one.read().await.data.clone()
    }

    /// Current collection
    pub async fn collection(&self) -> Connection<E> {
        self.list.read().await.data.clone()
    }

    pub async fn snapshot(&self) -> Slice<E> {
        self.one.read().await.clone()
    }

    pub async fn list_snapshot(&self) -> Slice<Connection<E>> {
        self.list.read().await.clone()
    }

    /// Drop both slices back to their initial state
    pub async fn clear(&self) {
        *self.one.write().await = Slice::default();
        *self.list.write().await = Slice::default();
    }
}

#[derive(Default)]
pub struct Store {
    pub banners: EntitySlices<Banner>,
    pub featured_vehicles: EntitySlices<FeaturedVehicle>,
    pub main_carousels: EntitySlices<MainCarousel>,
    pub brands: EntitySlices<Brand>,
    pub vehicle_models: EntitySlices<VehicleModel>,
    pub roles: EntitySlices<Role>,
    pub users: EntitySlices<User>,
    pub vendors: EntitySlices<Vendor>,
    pub customers: EntitySlices<Customer>,
    pub organizations: EntitySlices<Organization>,
    pub vehicles: EntitySlices<Vehicle>,
    pub reviews: EntitySlices<Review>,
    pub contacts: EntitySlices<ContactThread>,
    pub interests: EntitySlices<Interest>,
}

impl Store {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Reset every slice, used when the session ends
    pub async fn clear(&self) {
        self.banners.clear().await;
        self.featured_vehicles.clear().await;
        self.main_carousels.clear().await;
        self.brands.clear().await;
        self.vehicle_models.clear().await;
        self.roles.clear().await;
        self.users.clear().await;
        self.vendors.clear().await;
        self.customers.clear().await;
        self.organizations.clear().await;
        self.vehicles.clear().await;
        self.reviews.clear().await;
        self.contacts.clear().await;
        self.interests.clear().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;

    #[tokio::test]
    async fn test_slices_are_keyed_by_entity_type() {
        let store = Store::new();
        {
            let mut slice = Vehicle::slices(&store).one.write().await;
            slice.data.id = "veh-1".to_string();
        }
        assert_eq!(store.vehicles.entity().await.id, "veh-1");
        assert_eq!(store.banners.entity().await.id, "");
    }

    #[tokio::test]
    async fn test_clear_resets_all_slices() {
        let store = Store::new();
        {
            let mut slice = store.vendors.one.write().await;
            slice.data.name = "Autohaus".to_string();
            slice.error = Some("stale".to_string());
        }
        store.clear().await;
        let snapshot = store.vendors.snapshot().await;
        assert_eq!(snapshot.data.name, "");
        assert_eq!(snapshot.error, None);
    }
}
