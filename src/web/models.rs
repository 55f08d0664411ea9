//! Contains the data models for portal forms and admin responses.

use piso_shared::board_config::BoardConfig;
use serde::{Deserialize, Serialize};

/// Voucher form posted from the client portal. A missing field reads as empty.
#[derive(Deserialize, Debug, Default)]
pub struct VoucherForm {
    #[serde(default)]
    pub code: String,
}

/// Admin login form.
#[derive(Deserialize, Debug, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Represents the response for the /admin/status endpoint.
#[derive(Serialize, Debug)]
pub struct AdminStatusResponse {
    pub board: &'static BoardConfig,
}
