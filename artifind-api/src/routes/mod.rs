pub(crate) mod error;
pub(crate) mod files;
pub(crate) mod search;

pub(crate) use error::ApiError;
