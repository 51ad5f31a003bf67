pub mod filter;
pub mod gateway;
pub mod trimmomatic;
