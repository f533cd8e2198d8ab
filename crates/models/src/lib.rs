pub mod db;
pub mod product;
pub mod user;
