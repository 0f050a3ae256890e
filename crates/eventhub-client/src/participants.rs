use reqwest::Method;

use eventhub_types::api::ParticipantSignUpRequest;
use eventhub_types::models::{Event, ParticipantProfile};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn sign_up(&self, req: &ParticipantSignUpRequest) -> Result<ParticipantProfile, ClientError> {
        self.send_json(self.request(Method::POST, "/Participants/SignUp").json(req))
            .await
    }

    pub async fn participants(&self) -> Result<Vec<ParticipantProfile>, ClientError> {
        self.send_json(self.request(Method::GET, "/Participants/All")).await
    }

    pub async fn participant(&self, id: i64) -> Result<ParticipantProfile, ClientError> {
        self.send_json(self.request(Method::GET, &format!("/Participants/{id}")))
            .await
    }

    pub async fn upcoming_events(&self, participant_id: i64) -> Result<Vec<Event>, ClientError> {
        self.send_json(self.request(
            Method::GET,
            &format!("/Participants/{participant_id}/upcoming-events"),
        ))
        .await
    }

    pub async fn previous_events(&self, participant_id: i64) -> Result<Vec<Event>, ClientError> {
        self.send_json(self.request(
            Method::GET,
            &format!("/Participants/{participant_id}/previous-events"),
        ))
        .await
    }
}
