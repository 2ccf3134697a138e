table! {
    appointments (id) {
        id -> Unsigned<Bigint>,
        patient_id -> Unsigned<Bigint>,
        department_id -> Unsigned<Bigint>,
        doctor_id -> Unsigned<Bigint>,
        appointment_date -> Date,
        time_slot -> Varchar,
        problem -> Text,
    }
}

table! {
    departments (id) {
        id -> Unsigned<Bigint>,
        name -> Varchar,
    }
}

table! {
    doctors (id) {
        id -> Unsigned<Bigint>,
        name -> Varchar,
        department_id -> Unsigned<Bigint>,
    }
}

table! {
    patients (id) {
        id -> Unsigned<Bigint>,
        name -> Varchar,
        address -> Varchar,
        email -> Varchar,
        phone -> Varchar,
    }
}

table! {
    staff (id) {
        id -> Unsigned<Bigint>,
        username -> Varchar,
        password_hash -> Varchar,
        doctor_id -> Unsigned<Bigint>,
    }
}

allow_tables_to_appear_in_same_query!(
    appointments,
    departments,
    doctors,
    patients,
    staff,
);
