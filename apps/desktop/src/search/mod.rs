//! Search bar: input field, scope chip, and suggestion dropdown.

mod search_bar;
mod suggestions;

pub use search_bar::SearchBar;
