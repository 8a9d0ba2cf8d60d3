pub mod email;
pub mod orders;
