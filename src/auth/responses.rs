use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StaffProfile {
    pub id: u64,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: StaffProfile,
}
