pub mod generate;
pub mod orders;
