pub mod parse;
pub mod random;
