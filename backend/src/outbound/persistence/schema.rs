//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Columns with
//! database defaults that the adapters never read (`created_at`,
//! `updated_at`) are still listed so `diesel print-schema` output stays
//! comparable.

diesel::table! {
    /// Registered users and their remaining vote budget.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        gender -> Varchar,
        age -> Int4,
        email -> Varchar,
        phone -> Varchar,
        vote_budget -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Nominated events. `seq` orders them by nomination.
    rs_events (id) {
        id -> Uuid,
        seq -> Int8,
        name -> Varchar,
        keyword -> Varchar,
        owner_id -> Uuid,
        vote_tally -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only vote ledger.
    votes (id) {
        id -> Uuid,
        seq -> Int8,
        voter_id -> Uuid,
        event_id -> Uuid,
        amount -> Int8,
        cast_at -> Timestamptz,
    }
}

diesel::table! {
    /// Live slot bids; one row per rank and per event.
    slots (rank) {
        rank -> Int8,
        event_id -> Uuid,
        amount -> Int8,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Purchase audit trail.
    trades (id) {
        id -> Uuid,
        rank -> Int8,
        amount -> Int8,
        event_id -> Uuid,
        traded_at -> Timestamptz,
    }
}

diesel::joinable!(rs_events -> users (owner_id));
diesel::joinable!(slots -> rs_events (event_id));

diesel::allow_tables_to_appear_in_same_query!(users, rs_events, votes, slots, trades);
