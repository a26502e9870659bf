//! Row types for the `users` and `user_profiles` tables.
//!
//! Each entity is split into its id and its mutable fields: POST bodies carry
//! both, PUT bodies carry only the fields and take the id from the path.

pub mod user;
pub mod user_profile;

pub use user::{User, UserFields};
pub use user_profile::{UserProfile, UserProfileFields};
