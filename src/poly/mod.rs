pub mod commitment;
pub mod unipoly;
