pub mod decks;
pub mod generate;
pub mod script;
pub mod show;
