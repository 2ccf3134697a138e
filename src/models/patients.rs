use crate::schema::patients;

#[derive(Insertable, Clone, Debug, Default, PartialEq)]
#[table_name = "patients"]
pub struct NewPatient {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}
