use reqwest::Method;

use eventhub_types::CONFIRMED;
use eventhub_types::api::RegistrationCreateRequest;
use eventhub_types::models::Registration;

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Register for an event with status `Confirmed`. Participants pass `None`
    /// to register themselves; admins must name the participant.
    pub async fn register_for_event(
        &self,
        event_id: i64,
        participant_id: Option<i64>,
    ) -> Result<Registration, ClientError> {
        let body = RegistrationCreateRequest {
            participant_id,
            status: Some(CONFIRMED.to_string()),
        };
        self.send_json(
            self.request(Method::POST, &format!("/Registrations/event/{event_id}/register"))
                .json(&body),
        )
        .await
    }

    pub async fn event_registrations(&self, event_id: i64) -> Result<Vec<Registration>, ClientError> {
        self.send_json(self.request(
            Method::GET,
            &format!("/Registrations/event/{event_id}/registrations"),
        ))
        .await
    }

    pub async fn delete_registration(&self, id: i64) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/Registrations/registration/{id}")))
            .await
    }
}
