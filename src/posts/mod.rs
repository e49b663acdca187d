// Narrowing down the posts we got from the content repository.
// Filters are what the server applies, the listing is the text
// search and the pages on top of that.
pub mod filters;
pub mod listing;
