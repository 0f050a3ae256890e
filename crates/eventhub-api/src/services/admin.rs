use chrono::Utc;
use tracing::info;

use eventhub_db::{Database, is_constraint_error};
use eventhub_types::Role;
use eventhub_types::api::{AdminLoginResponse, AdminRegisterRequest, LoginRequest};
use eventhub_types::models::AdminProfile;

use super::validation::{self, MAX_NAME_LEN};
use super::{ServiceError, ServiceResult, admin_profile, unexpected};
use crate::password;
use crate::token::TokenIssuer;

const DUPLICATE_EMAIL: &str = "An admin with this email already exists.";
const BAD_CREDENTIALS: &str = "Invalid email or password.";

pub struct AdminService<'a> {
    db: &'a Database,
    tokens: &'a TokenIssuer,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a Database, tokens: &'a TokenIssuer) -> Self {
        Self { db, tokens }
    }

    pub fn register(&self, req: &AdminRegisterRequest) -> ServiceResult<AdminProfile> {
        let full_name = validation::required_text("Full name", &req.full_name, MAX_NAME_LEN)?;
        let email = validation::normalize_email(&req.email)?;
        validation::password(&req.password)?;

        if let Some(label) = req.role.as_deref().map(str::trim) {
            if !label.is_empty() && label != Role::Admin.as_str() {
                return Err(ServiceError::Validation(format!(
                    "Role must be '{}'.",
                    Role::Admin
                )));
            }
        }

        if self
            .db
            .admin_email_exists(&email)
            .map_err(unexpected("registering the admin"))?
        {
            return Err(ServiceError::Conflict(DUPLICATE_EMAIL.into()));
        }

        let hash = password::hash_password(&req.password).map_err(unexpected("registering the admin"))?;
        let created_at = Utc::now();
        let id = match self
            .db
            .create_admin(&full_name, &email, &hash, Role::Admin.as_str(), created_at)
        {
            Ok(id) => id,
            // Lost a race with a concurrent signup for the same address.
            Err(e) if is_constraint_error(&e) => {
                return Err(ServiceError::Conflict(DUPLICATE_EMAIL.into()));
            }
            Err(e) => return Err(unexpected("registering the admin")(e)),
        };

        info!(admin_id = id, "Admin registered");
        let row = self
            .db
            .get_admin_by_id(id)
            .map_err(unexpected("registering the admin"))?
            .ok_or_else(|| ServiceError::Unexpected("An error occurred while registering the admin.".into()))?;
        Ok(admin_profile(row))
    }

    pub fn login(&self, req: &LoginRequest) -> ServiceResult<AdminLoginResponse> {
        let email = req.email.trim();
        let row = self
            .db
            .get_admin_by_email(email)
            .map_err(unexpected("logging in"))?
            .ok_or_else(|| ServiceError::Auth(BAD_CREDENTIALS.into()))?;

        if !password::verify_password(&req.password, &row.password_hash)
            .map_err(unexpected("logging in"))?
        {
            return Err(ServiceError::Auth(BAD_CREDENTIALS.into()));
        }

        let token = self
            .tokens
            .issue(row.id, Role::Admin)
            .map_err(unexpected("issuing a token"))?;
        info!(admin_id = row.id, "Admin logged in");

        Ok(AdminLoginResponse {
            token,
            admin: admin_profile(row),
        })
    }
}
