/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/auth` endpoints. Field names are
 * camelCase on the wire.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SignupRequest {
    pub email: String,
    /// Display name shown as the creator of posts
    pub name: String,
    /// Plain password, hashed before storage
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by signup
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// Returned by login
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token, valid for one hour
    pub token: String,
    pub user_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}
