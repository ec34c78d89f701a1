//! Request identity.

mod extractor;

pub use extractor::ActingUser;
