use super::searchable::{searchable_text, SearchOptions};
use crate::items::Item;

/// Every token must occur in `searchable`. No tokens matches everything.
pub fn eval(tokens: &[String], searchable: &str) -> bool {
    tokens.iter().all(|token| searchable.contains(token.as_str()))
}

pub fn eval_item(tokens: &[String], item: &Item, opts: SearchOptions) -> bool {
    if tokens.is_empty() {
        return true;
    }
    eval(tokens, &searchable_text(&item.title, &item.display_url, opts))
}

/// Keep matching items in their original order.
pub fn filter_items(tokens: &[String], items: &[Item], opts: SearchOptions) -> Vec<Item> {
    items
        .iter()
        .filter(|item| eval_item(tokens, item, opts))
        .cloned()
        .collect()
}
