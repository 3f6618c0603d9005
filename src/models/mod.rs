//! Data models for the member list.
//!
//! Source records follow the bundled dataset's field names; everything served to
//! the front-end is already resolved into typed values.

mod badge;
mod datastore;
mod member;
mod payment;
mod profile;
mod status;
mod tag;

pub use badge::*;
pub use datastore::*;
pub use member::*;
pub use payment::*;
pub use profile::*;
pub use status::*;
pub use tag::*;
