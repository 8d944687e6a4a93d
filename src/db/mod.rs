//! Metadata database for imgdrop.
//!
//! Image records are kept in a MongoDB collection; see [`MongoImageRepository`].

mod mongo;

pub use mongo::{Database, MongoImageRepository};
