mod eval;
mod lexer;
mod searchable;
mod transliterate;

use crate::items::Item;

pub use eval::filter_items;
pub use lexer::tokenize;
pub use searchable::SearchOptions;

#[cfg(test)]
pub use eval::eval;
#[cfg(test)]
pub use searchable::searchable_text;

/// Tokenize `query` and test a single item against it.
///
/// Tokens are ANDed and order does not matter: `"bar foo"` and `"foo bar"`
/// select the same items. An empty query matches everything.
#[allow(dead_code)]
pub fn matches(query: &str, item: &Item, opts: SearchOptions) -> bool {
    eval::eval_item(&tokenize(query), item, opts)
}

/// Tokenize once and filter a whole source.
#[allow(dead_code)]
pub fn search(query: &str, items: &[Item], opts: SearchOptions) -> Vec<Item> {
    filter_items(&tokenize(query), items, opts)
}
