use crate::schema::staff;

#[derive(Insertable)]
#[table_name = "staff"]
pub struct NewStaff<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub doctor_id: u64,
}

/// Staff credential joined with the display name of the linked doctor.
#[derive(Queryable, Clone, Debug)]
pub struct StaffRecord {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    pub name: String,
}
