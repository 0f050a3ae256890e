use reqwest::Method;

use eventhub_types::api::{EventCreateRequest, EventPatch};
use eventhub_types::models::{Event, EventCapacity};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn events(&self) -> Result<Vec<Event>, ClientError> {
        self.send_json(self.request(Method::GET, "/Events/All")).await
    }

    pub async fn event(&self, id: i64) -> Result<Event, ClientError> {
        self.send_json(self.request(Method::GET, &format!("/Events/{id}")))
            .await
    }

    pub async fn create_event(&self, req: &EventCreateRequest) -> Result<Event, ClientError> {
        self.send_json(self.request(Method::POST, "/Events/create").json(req))
            .await
    }

    pub async fn update_event(&self, id: i64, patch: &EventPatch) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::PATCH, &format!("/Events/{id}")).json(patch))
            .await
    }

    pub async fn delete_event(&self, id: i64) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/Events/{id}")))
            .await
    }

    pub async fn event_capacity(&self, id: i64) -> Result<EventCapacity, ClientError> {
        self.send_json(self.request(Method::GET, &format!("/Events/{id}/capacity")))
            .await
    }
}
