pub mod analyze;
pub mod catalog;
pub mod cost;
pub mod health;
pub mod pages;
