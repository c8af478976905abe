pub mod route;
pub mod saved_query;

pub use route::*;
pub use saved_query::*;
