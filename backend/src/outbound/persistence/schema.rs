//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When a
//! migration changes a table, update the matching block here.

diesel::table! {
    /// Customers referenced by invoices. Read-only from this service.
    customers (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        image_url -> Varchar,
    }
}

diesel::table! {
    /// Invoices. `amount` is stored in cents and constrained positive.
    invoices (id) {
        id -> Uuid,
        customer_id -> Uuid,
        amount -> Int8,
        /// `pending` or `paid`, enforced by a CHECK constraint.
        status -> Varchar,
        date -> Date,
    }
}

diesel::table! {
    /// Registered accounts. `email` carries a UNIQUE constraint.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Text,
        /// bcrypt digest.
        password -> Text,
    }
}

diesel::joinable!(invoices -> customers (customer_id));

diesel::allow_tables_to_appear_in_same_query!(customers, invoices, users);
