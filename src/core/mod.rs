pub mod events;
pub mod filter;
pub mod picker;
pub mod renamer;
