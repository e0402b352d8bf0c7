pub mod filter;
pub mod next;
pub mod reset;
pub mod summary;
pub mod tenses;
pub mod train;
