pub mod configuration;
pub mod facts;
pub mod response;
