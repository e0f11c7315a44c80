pub mod catalog;
pub mod error;
pub mod position;
pub mod proximity;
pub mod status;
