//! Catalog snapshot fetched once per wizard session
//!
//! The five catalogs have no interdependency, so the prefetch issues the
//! requests concurrently. The snapshot is then treated as immutable for the
//! session: a cabin whose status changes on another console is not observed
//! until the next full reload, and the backend revalidates at submit time.

use shared::error::AppResult;
use shared::models::{Cabin, Client, Plan, Room, Service};

use crate::api::LodgeApi;

/// Immutable per-session view of the reference data
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub clients: Vec<Client>,
    pub plans: Vec<Plan>,
    pub cabins: Vec<Cabin>,
    pub rooms: Vec<Room>,
    pub services: Vec<Service>,
}

impl CatalogSnapshot {
    /// Fetch all catalogs concurrently
    pub async fn prefetch(api: &dyn LodgeApi) -> AppResult<Self> {
        let (clients, plans, cabins, rooms, services) = tokio::try_join!(
            api.list_clients(),
            api.list_plans(),
            api.list_cabins(),
            api.list_rooms(),
            api.list_services(),
        )?;

        Ok(Self {
            clients,
            plans,
            cabins,
            rooms,
            services,
        })
    }

    pub fn client(&self, id: u64) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn plan(&self, id: u64) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn cabin(&self, id: u64) -> Option<&Cabin> {
        self.cabins.iter().find(|c| c.id == id)
    }

    pub fn room(&self, id: u64) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn service(&self, id: u64) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }
}
