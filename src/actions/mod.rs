//! User-facing workflows composed from repository operations
//!
//! Each action reports its outcome as a toast, and failures are also recorded
//! as the session's last error.

use futures_util::future::join3;
use serde::Serialize;
use serde_json::json;

use crate::client::MarketClient;
use crate::entities::{Banner, Entity, FeaturedVehicle, MainCarousel, Vehicle};
use crate::error::ClientError;
use crate::models::{Connection, PageArgs, PageQuery};
use crate::wizard::ListingWizard;

/// Storefront content fetched together
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub banners: Connection<Banner>,
    pub featured_vehicles: Connection<FeaturedVehicle>,
    pub main_carousels: Connection<MainCarousel>,
}

pub struct Actions {
    client: MarketClient,
}

impl Actions {
    pub fn new(client: MarketClient) -> Self {
        Self { client }
    }

    /// Delete an entity and reload the collection it was listed in.
    ///
    /// The singular slice is reset when it holds the deleted entity.
    pub async fn remove_then_refetch<E, F>(
        &self,
        id: &str,
        query: &PageQuery<F>,
    ) -> Result<Connection<E>, ClientError>
    where
        E: Entity,
        F: Serialize,
    {
        let repo = self.client.repo::<E>();
        self.report(repo.remove(id).await, || format!("{} deleted", E::NAME))?;

        {
            let mut one = repo.slices().one.write().await;
            if one.data.id() == id {
                one.reset();
            }
        }

        self.report_failure(repo.fetch_page(query).await)
    }

    pub async fn set_status<E: Entity>(&self, id: &str, status: &str) -> Result<E, ClientError> {
        let result = self
            .client
            .repo::<E>()
            .update_field(id, "status", json!(status))
            .await;
        self.report(result, || format!("{} status set to {}", E::NAME, status))
    }

    /// Load banners, featured vehicles and carousels concurrently.
    ///
    /// All three fetches run to completion; the first failure is returned.
    pub async fn refresh_dashboard(&self, page: PageArgs) -> Result<Dashboard, ClientError> {
        let query = PageQuery::unfiltered(page);
        let banners = self.client.repo::<Banner>();
        let featured = self.client.repo::<FeaturedVehicle>();
        let carousels = self.client.repo::<MainCarousel>();

        let (banners, featured_vehicles, main_carousels) = join3(
            banners.fetch_page(&query),
            featured.fetch_page(&query),
            carousels.fetch_page(&query),
        )
        .await;

        let dashboard = Dashboard {
            banners: self.report_failure(banners)?,
            featured_vehicles: self.report_failure(featured_vehicles)?,
            main_carousels: self.report_failure(main_carousels)?,
        };
        tracing::debug!(
            banners = dashboard.banners.len(),
            featured_vehicles = dashboard.featured_vehicles.len(),
            main_carousels = dashboard.main_carousels.len(),
            "Dashboard refreshed"
        );
        Ok(dashboard)
    }

    pub async fn submit_listing(&self, wizard: &ListingWizard) -> Result<Vehicle, ClientError> {
        let result = wizard.submit(&self.client.repo::<Vehicle>()).await;
        self.report(result, || "Listing submitted".to_string())
    }

    fn report<T>(
        &self,
        result: Result<T, ClientError>,
        success: impl FnOnce() -> String,
    ) -> Result<T, ClientError> {
        if result.is_ok() {
            self.client.toasts().success(success());
        }
        self.report_failure(result)
    }

    fn report_failure<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(err) = &result {
            let message = err.message();
            self.client.toasts().error(message.clone());
            if let Err(record_err) = self.client.session().record_error(&message) {
                tracing::warn!(error = %record_err, "Failed to record last error");
            }
        }
        result
    }
}
