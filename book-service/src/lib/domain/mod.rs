pub mod book;
pub mod prediction;
