pub mod embed;
pub mod input;
pub mod limit;
pub mod parse;
pub mod rewards;
pub mod rows;
