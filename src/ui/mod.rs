//! Widget helpers shared by the search and bookmarks views

pub mod bookmarks;
pub mod result_card;
pub mod search_bar;
pub mod theme;
