pub mod compose;
pub mod extract;
pub mod identity;
pub mod run;
pub mod scoring;
