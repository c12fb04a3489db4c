mod client;
mod coordinates;
mod repository_url;
mod version;

pub use client::*;
pub use coordinates::*;
pub use repository_url::*;
pub use version::*;
