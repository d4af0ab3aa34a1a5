pub mod clients;
pub mod contracts;
