/// Lowercase a query and split it on runs of whitespace.
///
/// Empty or whitespace-only input yields no tokens.
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
