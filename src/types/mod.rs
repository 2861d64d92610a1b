pub mod errors;
pub mod message;
pub mod preferences;
pub mod quiz;
pub mod tab;
