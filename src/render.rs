//! Turns matched items into list rows. The matching core never sees any of this.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::{
    app::errors::ErrorKind,
    items::{Icon, Item, SourceKind},
};

const MAX_TEXT_LENGTH: usize = 40;
const TRUNCATION_SUFFIX: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub icon: Icon,
    pub accessory: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

pub trait Renders {
    fn render(&self, item: &Item) -> ListRow;
}

pub struct TabView;
pub struct HistoryView;
pub struct BookmarkView;

impl Renders for TabView {
    fn render(&self, item: &Item) -> ListRow {
        ListRow {
            id: item.id.clone(),
            title: truncate(&item.title, MAX_TEXT_LENGTH),
            subtitle: truncate(&item.display_url, MAX_TEXT_LENGTH),
            icon: item.icon.clone(),
            accessory: "🌎Tab",
            keywords: vec![item.display_url.clone()],
        }
    }
}

impl Renders for HistoryView {
    fn render(&self, item: &Item) -> ListRow {
        profile_row(item, "🛜History")
    }
}

impl Renders for BookmarkView {
    fn render(&self, item: &Item) -> ListRow {
        profile_row(item, "⭐️Bookmark")
    }
}

fn profile_row(item: &Item, accessory: &'static str) -> ListRow {
    ListRow {
        id: format!("{}-{}", item.profile.as_deref().unwrap_or_default(), item.id),
        title: truncate(&item.title, MAX_TEXT_LENGTH),
        subtitle: truncate(&item.url, MAX_TEXT_LENGTH),
        icon: item.icon.clone(),
        accessory,
        keywords: vec![],
    }
}

pub fn view_for(kind: SourceKind) -> &'static dyn Renders {
    match kind {
        SourceKind::Tab => &TabView,
        SourceKind::History => &HistoryView,
        SourceKind::Bookmark => &BookmarkView,
    }
}

pub fn render_item(item: &Item) -> ListRow {
    view_for(item.source).render(item)
}

/// Cut to `max_chars` characters and mark the cut. Safe on empty and
/// multi-byte input.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}{TRUNCATION_SUFFIX}")
}

/// Title of the leading "new tab" row.
pub fn new_tab_title(query: &str) -> String {
    if query.is_empty() {
        "Open Empty Tab".to_string()
    } else {
        format!("Search \"{query}\"")
    }
}

pub fn error_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotInstalled => "Browser not installed",
        ErrorKind::Unknown => "Something went wrong",
    }
}

/// Group history items by the local day they were last visited, keeping
/// the order in which each group is first seen.
pub fn group_by_date<'a>(items: &'a [Item], today: NaiveDate) -> Vec<(String, Vec<&'a Item>)> {
    let mut groups: Vec<(String, Vec<&Item>)> = vec![];

    for item in items {
        let label = match item.last_visited {
            Some(visited) => date_label(visited.with_timezone(&Local).date_naive(), today),
            None => "Earlier".to_string(),
        };

        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, group)) => group.push(item),
            None => groups.push((label, vec![item])),
        }
    }

    groups
}

fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}
