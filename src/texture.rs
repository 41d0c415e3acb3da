pub mod blend;
pub mod canvas;
pub mod composer;
pub mod recipe;
