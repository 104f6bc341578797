use super::transliterate::romanize;

/// Knobs for building searchable text. Passed in by the caller, never read
/// from preferences here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub romanize_titles: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            romanize_titles: true,
        }
    }
}

/// Lowercase title, lowercase scheme-less url and, when available, the
/// romanized title, joined by single spaces.
pub fn searchable_text(title: &str, display_url: &str, opts: SearchOptions) -> String {
    let mut text = format!("{} {}", title.to_lowercase(), display_url.to_lowercase());

    if !opts.romanize_titles {
        return text;
    }

    match romanize(title) {
        Ok(romanized) => {
            text.push(' ');
            text.push_str(&romanized);
        }
        Err(err) => log::trace!("romanize skipped title={title:?} reason={err}"),
    }

    text
}
