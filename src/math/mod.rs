pub mod utils;
pub mod v3;
