pub mod bcb;
pub mod cache;
