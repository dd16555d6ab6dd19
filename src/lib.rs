//! Parcel Hazard - polygon topology validation and parcel/hazard screening

pub mod backend;
pub mod batch;
pub mod core;
pub mod fixtures;
pub mod geometry;
pub mod ingest;
pub mod parcel;
pub mod store;
pub mod validation;
