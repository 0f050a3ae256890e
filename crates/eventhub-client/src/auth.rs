use reqwest::Method;
use tracing::info;

use eventhub_types::Role;
use eventhub_types::api::{
    AdminLoginResponse, AdminRegisterRequest, LoginRequest, MessageResponse, ParticipantLoginResponse,
};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::session::{Profile, Session};

impl ApiClient {
    pub async fn register_admin(&self, req: &AdminRegisterRequest) -> Result<MessageResponse, ClientError> {
        self.send_json(self.request(Method::POST, "/auth/register").json(req))
            .await
    }

    /// Log in as an admin and persist the session.
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<AdminLoginResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role: Some(Role::Admin),
        };
        let resp: AdminLoginResponse = self
            .send_json(self.request(Method::POST, "/auth/login").json(&body))
            .await?;

        self.session().set_on_login(Session {
            token: resp.token.clone(),
            role: Role::Admin,
            profile: Profile::Admin(resp.admin.clone()),
        })?;
        info!(admin_id = resp.admin.admin_id, "Logged in as admin");
        Ok(resp)
    }

    /// Log in as a participant and persist the session.
    pub async fn participant_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ParticipantLoginResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role: Some(Role::User),
        };
        let resp: ParticipantLoginResponse = self
            .send_json(self.request(Method::POST, "/Participants/Login").json(&body))
            .await?;

        self.session().set_on_login(Session {
            token: resp.token.clone(),
            role: Role::User,
            profile: Profile::Participant(resp.participant.clone()),
        })?;
        info!(participant_id = resp.participant.participant_id, "Logged in as participant");
        Ok(resp)
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.session().clear()
    }
}
