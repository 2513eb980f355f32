//! Leave Entitlement Engine
//!
//! This crate calculates statutory leave entitlements under the Korean Labor
//! Standards Act: annual leave accrual and usage, parental leave period
//! usage measured in fractional months, and vacation date planning.
//!
//! The [`calculation`] module holds pure functions over validated inputs.
//! [`engine::LeaveEngine`] is the application layer a form front end calls;
//! it validates raw field values, logs each request and notifies an optional
//! observer.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
