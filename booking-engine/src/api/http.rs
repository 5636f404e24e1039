//! HTTP implementation of [`LodgeApi`] over the REST backend
//!
//! Thin JSON client: no retry, no caching. Server error bodies are
//! preserved verbatim in the returned [`AppError`] so the console can show
//! the raw message.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult};
use shared::models::{
    Cabin, Client, CompanionPayload, CreateReservationPayload, Payment, Plan, Reservation,
    ReservationStatus, Room, Service,
};

use super::LodgeApi;

/// REST client against the reservation backend
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found("resource"));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                format!("server returned {}", status)
            } else {
                body
            };
            return Err(AppError::network(message));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::network(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::network(if body.is_empty() {
                format!("server returned {}", status)
            } else {
                body
            }));
        }
        Ok(())
    }
}

#[async_trait]
impl LodgeApi for HttpApi {
    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.get_json("/clients").await
    }

    async fn list_plans(&self) -> AppResult<Vec<Plan>> {
        self.get_json("/plans").await
    }

    async fn list_cabins(&self) -> AppResult<Vec<Cabin>> {
        self.get_json("/cabins").await
    }

    async fn list_rooms(&self) -> AppResult<Vec<Room>> {
        self.get_json("/rooms").await
    }

    async fn list_services(&self) -> AppResult<Vec<Service>> {
        self.get_json("/services").await
    }

    async fn create_reservation(
        &self,
        payload: &CreateReservationPayload,
    ) -> AppResult<Reservation> {
        self.post_json("/reservations", payload).await
    }

    async fn update_reservation(
        &self,
        id: u64,
        payload: &CreateReservationPayload,
    ) -> AppResult<Reservation> {
        self.put_json(&format!("/reservations/{id}"), payload).await
    }

    async fn change_reservation_status(
        &self,
        id: u64,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        self.put_json(
            &format!("/reservations/{id}/status"),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        self.get_json("/reservations").await
    }

    async fn create_companion(&self, companion: &CompanionPayload) -> AppResult<u64> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Created {
            companion_id: u64,
        }
        let created: Created = self.post_json("/companions", companion).await?;
        Ok(created.companion_id)
    }

    async fn link_companion_to_reservation(
        &self,
        reservation_id: u64,
        companion_id: u64,
    ) -> AppResult<()> {
        let _: serde_json::Value = self
            .post_json(
                &format!("/reservations/{reservation_id}/companions"),
                &serde_json::json!({ "companionId": companion_id }),
            )
            .await?;
        Ok(())
    }

    async fn delete_companion_from_reservation(
        &self,
        reservation_id: u64,
        companion_id: u64,
    ) -> AppResult<()> {
        self.delete(&format!(
            "/reservations/{reservation_id}/companions/{companion_id}"
        ))
        .await
    }

    async fn add_payment_to_reservation(
        &self,
        reservation_id: u64,
        payment: &Payment,
    ) -> AppResult<Payment> {
        self.post_json(&format!("/reservations/{reservation_id}/payments"), payment)
            .await
    }

    async fn list_payments_for_reservation(&self, reservation_id: u64) -> AppResult<Vec<Payment>> {
        self.get_json(&format!("/reservations/{reservation_id}/payments"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpApi::new("http://localhost:3000/api/");
        assert_eq!(api.url("/plans"), "http://localhost:3000/api/plans");
    }
}
