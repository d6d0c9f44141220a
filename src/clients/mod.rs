pub mod geoguessr;
pub mod publisher;
