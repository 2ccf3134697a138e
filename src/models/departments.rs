use crate::schema::departments;

#[derive(Insertable)]
#[table_name = "departments"]
pub struct NewDepart<'a> {
    pub name: &'a str,
}
