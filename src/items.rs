use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use url::Url;

pub type ProfileId = String;

/// Profile used when no profile has been selected yet.
pub const DEFAULT_PROFILE_ID: &str = "Default";

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?sz=64&domain=";

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z0-9_]+:)?//").expect("scheme regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Tab,
    History,
    Bookmark,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Tab => "tab",
            SourceKind::History => "history",
            SourceKind::Bookmark => "bookmark",
        }
    }
}

/// Favicon reference. Resolved by whoever renders it, never fetched here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "source", rename_all = "snake_case")]
pub enum Icon {
    /// Favicon reported by the browser itself.
    Original(String),
    /// Generic favicon built from the page host.
    Generated(String),
    #[default]
    None,
}

/// Uniform record produced by every source.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub url: String,
    /// `url` without scheme and leading `www.`
    pub display_url: String,
    pub source: SourceKind,
    pub profile: Option<ProfileId>,
    pub icon: Icon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<DateTime<Utc>>,
}

impl Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.profile.hash(state);
        self.id.hash(state)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.profile == other.profile && self.id == other.id
    }
}

impl Item {
    pub fn from_tab(tab: RawTab, use_original_favicon: bool) -> Self {
        let icon = match tab.favicon {
            Some(favicon) if use_original_favicon && !favicon.is_empty() => Icon::Original(favicon),
            _ => generated_favicon(&tab.url),
        };

        Item {
            id: tab_key(tab.window_id, tab.tab_index),
            display_url: strip_scheme(&tab.url),
            title: tab.title,
            url: tab.url,
            source: SourceKind::Tab,
            profile: None,
            icon,
            last_visited: None,
        }
    }

    pub fn from_history(entry: RawHistoryEntry, profile: &str) -> Self {
        Item {
            id: entry.id.to_string(),
            display_url: strip_scheme(&entry.url),
            icon: generated_favicon(&entry.url),
            title: entry.title,
            url: entry.url,
            source: SourceKind::History,
            profile: Some(profile.to_string()),
            last_visited: entry.last_visited,
        }
    }

    pub fn from_bookmark(entry: RawBookmark, profile: &str) -> Self {
        Item {
            id: entry.id,
            display_url: strip_scheme(&entry.url),
            icon: generated_favicon(&entry.url),
            title: entry.title,
            url: entry.url,
            source: SourceKind::Bookmark,
            profile: Some(profile.to_string()),
            last_visited: None,
        }
    }
}

/// Open tab as reported by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTab {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default)]
    pub window_id: u64,
    #[serde(default)]
    pub tab_index: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHistoryEntry {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBookmark {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Tabs have no stable id; window and position stand in for one.
pub fn tab_key(window_id: u64, tab_index: u64) -> String {
    format!("{window_id}-{tab_index}")
}

/// Drop leading `scheme://` (or bare `//`) and `www.` prefixes until none is left.
pub fn strip_scheme(url: &str) -> String {
    let mut rest = url;
    loop {
        let next = match SCHEME_RE.find(rest) {
            Some(m) => &rest[m.end()..],
            None => rest,
        };
        let next = next.strip_prefix("www.").unwrap_or(next);
        if next.len() == rest.len() {
            return rest.to_string();
        }
        rest = next;
    }
}

pub fn generated_favicon(url: &str) -> Icon {
    match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => Icon::Generated(format!("{FAVICON_SERVICE}{host}")),
        None => Icon::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("https://example.com/path"), "example.com/path");
        assert_eq!(strip_scheme("http://www.example.com"), "example.com");
        assert_eq!(strip_scheme("//cdn.example.com/a.js"), "cdn.example.com/a.js");
        assert_eq!(strip_scheme("chrome://settings"), "settings");
        assert_eq!(strip_scheme(""), "");
    }

    #[test]
    fn test_strip_scheme_is_idempotent() {
        let cases = [
            ("https://example.com/path", "example.com/path"),
            ("https://www.www.example.com/a", "example.com/a"),
            ("https://http://example.com", "example.com"),
            ("www.example.com", "example.com"),
            ("", ""),
        ];
        for (url, expected) in cases {
            let once = strip_scheme(url);
            assert_eq!(once, expected, "stripping {url:?}");
            assert_eq!(strip_scheme(&once), once, "stripping {url:?} twice");
        }
    }

    #[test]
    fn test_strip_scheme_keeps_inner_www() {
        assert_eq!(
            strip_scheme("https://example.com/?next=www.other.com"),
            "example.com/?next=www.other.com"
        );
    }

    #[test]
    fn test_generated_favicon() {
        assert_eq!(
            generated_favicon("https://github.com/rust-lang"),
            Icon::Generated("https://www.google.com/s2/favicons?sz=64&domain=github.com".into())
        );
        assert_eq!(generated_favicon("not a url"), Icon::None);
        assert_eq!(generated_favicon(""), Icon::None);
    }

    #[test]
    fn test_tab_icon_selection() {
        let tab = RawTab {
            title: "GitHub".into(),
            url: "https://github.com".into(),
            favicon: Some("https://github.com/favicon.ico".into()),
            window_id: 1,
            tab_index: 3,
        };

        let original = Item::from_tab(tab.clone(), true);
        assert_eq!(original.icon, Icon::Original("https://github.com/favicon.ico".into()));
        assert_eq!(original.id, "1-3");
        assert_eq!(original.display_url, "github.com");
        assert_eq!(original.profile, None);

        let generated = Item::from_tab(tab, false);
        assert!(matches!(generated.icon, Icon::Generated(_)));
    }

    #[test]
    fn test_tab_icon_falls_back_without_favicon() {
        let tab = RawTab {
            title: "x".into(),
            url: "https://x.org".into(),
            favicon: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(Item::from_tab(tab, true).icon, Icon::Generated(_)));
    }
}
