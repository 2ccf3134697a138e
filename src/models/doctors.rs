use crate::schema::doctors;

#[derive(Queryable, Clone, Debug, PartialEq)]
pub struct DoctorData {
    pub id: u64,
    pub name: String,
    pub department_id: u64,
}

#[derive(Insertable)]
#[table_name = "doctors"]
pub struct NewDoctor<'a> {
    pub name: &'a str,
    pub department_id: u64,
}

/// A doctor joined with the department it works in.
#[derive(Queryable, Clone, Debug)]
pub struct DoctorProfile {
    pub id: u64,
    pub name: String,
    pub department_id: u64,
    pub department_name: String,
}
