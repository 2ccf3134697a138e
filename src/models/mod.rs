pub mod appointments;
pub mod departments;
pub mod doctors;
pub mod patients;
pub mod staff;
