//! Romanization of display titles.
//!
//! Han characters become toneless pinyin, other non-ASCII characters are
//! approximated with their closest ASCII spelling. The output has no
//! whitespace so it behaves as a single searchable token:
//! `"中文 Rust"` → `"zhongwenrust"`.

use pinyin::ToPinyin;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransliterationFailure {
    #[error("title is empty")]
    EmptyTitle,

    #[error("title has nothing to romanize")]
    NothingToRomanize,

    #[error("no romanization for {0:?}")]
    Unmappable(char),
}

pub fn romanize(title: &str) -> Result<String, TransliterationFailure> {
    if title.trim().is_empty() {
        return Err(TransliterationFailure::EmptyTitle);
    }
    if title.is_ascii() {
        return Err(TransliterationFailure::NothingToRomanize);
    }

    let mut out = String::with_capacity(title.len());
    let mut romanized_any = false;
    let mut first_unmapped = None;

    for c in title.chars() {
        if c.is_whitespace() {
            continue;
        }
        if c.is_ascii() {
            out.push(c.to_ascii_lowercase());
            continue;
        }

        let mapped = match c.to_pinyin() {
            Some(pinyin) => Some(pinyin.plain()),
            None => deunicode::deunicode_char(c),
        };

        match mapped {
            Some(s) if !s.trim().is_empty() => {
                out.extend(
                    s.chars()
                        .filter(|ch| !ch.is_whitespace())
                        .map(|ch| ch.to_ascii_lowercase()),
                );
                romanized_any = true;
            }
            _ => {
                first_unmapped.get_or_insert(c);
            }
        }
    }

    if !romanized_any {
        return Err(match first_unmapped {
            Some(c) => TransliterationFailure::Unmappable(c),
            None => TransliterationFailure::NothingToRomanize,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_han_to_pinyin() {
        assert_eq!(romanize("中文").unwrap(), "zhongwen");
        assert_eq!(romanize("百度一下").unwrap(), "baiduyixia");
    }

    #[test]
    fn test_mixed_title_is_space_free() {
        let romanized = romanize("GitHub 中文 社区").unwrap();
        assert_eq!(romanized, "githubzhongwenshequ");
        assert!(!romanized.contains(' '));
    }

    #[test]
    fn test_other_scripts() {
        assert_eq!(romanize("Café").unwrap(), "cafe");
        assert_eq!(romanize("Москва").unwrap(), "moskva");
    }

    #[test]
    fn test_failures() {
        assert_eq!(romanize(""), Err(TransliterationFailure::EmptyTitle));
        assert_eq!(romanize("   "), Err(TransliterationFailure::EmptyTitle));
        assert_eq!(
            romanize("plain ascii"),
            Err(TransliterationFailure::NothingToRomanize)
        );
    }
}
