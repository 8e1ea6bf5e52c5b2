pub mod catalog;
pub mod cart;
pub mod quote;
