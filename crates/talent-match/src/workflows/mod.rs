pub mod matching;
pub mod recommendations;
pub mod skills;
