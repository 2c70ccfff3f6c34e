pub mod backends;
pub mod portal;
