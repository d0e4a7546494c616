//! Client for the external tabular records store.
//!
//! The gateway owns no data: every read and write goes through this module,
//! addressed by table name and record id. Records are never cached.

pub mod client;
pub mod record;

pub use client::{RecordsClient, RecordsError, SelectQuery};
pub use record::{Record, Table};
