use anyhow::{anyhow, Context};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use tracing::debug;
use crate::models::reservation::Reservation;

pub const RESERVATION_RESOURCE: &str = "api/reservation";

/// Remote reservation collection.
///
/// Every operation is a lazy future resolving to exactly one value or one
/// error. Failures are not retried.
pub trait ReservationRepo: Send + Sync {
    fn list(&self) -> BoxFuture<'_, anyhow::Result<Vec<Reservation>>>;

    /// Submits a record without identifier; resolves to the stored record.
    fn create<'a>(&'a self, reservation: &'a Reservation) -> BoxFuture<'a, anyhow::Result<Reservation>>;

    /// Replaces the record addressed by `reservation.id`.
    fn update<'a>(&'a self, reservation: &'a Reservation) -> BoxFuture<'a, anyhow::Result<Reservation>>;

    fn delete(&self, id: i64) -> BoxFuture<'_, anyhow::Result<()>>;
}

#[derive(Clone, Debug)]
pub struct HttpReservationRepo {
    client: Client,
    resource_url: String,
}

impl HttpReservationRepo {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            resource_url: format!("{}/{}", base_url.trim_end_matches('/'), RESERVATION_RESOURCE),
        }
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    fn record_url(&self, id: i64) -> String {
        format!("{}/{}", self.resource_url, id)
    }

    async fn get_all_reservations(&self) -> anyhow::Result<Vec<Reservation>> {
        debug!("GET {}", self.resource_url);
        let reservations = self.client
            .get(&self.resource_url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Reservation>>()
            .await?;

        Ok(reservations)
    }

    async fn add_reservation(&self, reservation: &Reservation) -> anyhow::Result<Reservation> {
        debug!("POST {}", self.resource_url);
        let created = self.client
            .post(&self.resource_url)
            .json(reservation)
            .send()
            .await?
            .error_for_status()?
            .json::<Reservation>()
            .await?;

        Ok(created)
    }

    async fn replace_reservation(&self, reservation: &Reservation) -> anyhow::Result<Reservation> {
        let id = reservation.id
            .ok_or_else(|| anyhow!("Reservation has no id to update"))?;
        let url = self.record_url(id);

        debug!("PUT {}", url);
        let updated = self.client
            .put(&url)
            .json(reservation)
            .send()
            .await?
            .error_for_status()?
            .json::<Reservation>()
            .await?;

        Ok(updated)
    }

    async fn remove_reservation(&self, id: i64) -> anyhow::Result<()> {
        let url = self.record_url(id);

        debug!("DELETE {}", url);
        self.client
            .delete(&url)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

impl ReservationRepo for HttpReservationRepo {
    fn list(&self) -> BoxFuture<'_, anyhow::Result<Vec<Reservation>>> {
        async move {
            self.get_all_reservations()
                .await
                .context("Error retrieving reservations")
        }
        .boxed()
    }

    fn create<'a>(&'a self, reservation: &'a Reservation) -> BoxFuture<'a, anyhow::Result<Reservation>> {
        async move {
            self.add_reservation(reservation)
                .await
                .context("Error creating reservation")
        }
        .boxed()
    }

    fn update<'a>(&'a self, reservation: &'a Reservation) -> BoxFuture<'a, anyhow::Result<Reservation>> {
        async move {
            self.replace_reservation(reservation)
                .await
                .context("Error updating reservation")
        }
        .boxed()
    }

    fn delete(&self, id: i64) -> BoxFuture<'_, anyhow::Result<()>> {
        async move {
            self.remove_reservation(id)
                .await
                .with_context(|| format!("Error deleting reservation {}", id))
        }
        .boxed()
    }
}
