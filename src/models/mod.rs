//! Data models for the club backend.
//!
//! Field names are camelCase on the wire and in the persisted document.

mod dashboard;
mod document;
mod material;
mod notification;
mod team;
mod user;

pub use dashboard::*;
pub use document::*;
pub use material::*;
pub use notification::*;
pub use team::*;
pub use user::*;
