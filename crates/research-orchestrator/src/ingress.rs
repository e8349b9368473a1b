/// Normalize the extraction collaborator's symbol list at the ingress
/// boundary.
///
/// Legacy extractors sometimes return a single element that is itself a
/// stringified list, e.g. `"['MSFT', 'AAPL']"`. That shape is parsed here,
/// once, so no downstream consumer ever re-parses strings ad hoc. Anything
/// else passes through with whitespace trimmed and empties dropped.
pub fn normalize_mentions(raw: Vec<String>) -> Vec<String> {
    if raw.len() == 1 {
        let only = raw[0].trim();
        if let Some(inner) = only.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return inner
                .split(',')
                .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"').trim())
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect();
        }
    }
    raw.into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize_mentions;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn plain_list_passes_through() {
        assert_eq!(
            normalize_mentions(owned(&["MSFT", " AAPL "])),
            owned(&["MSFT", "AAPL"])
        );
    }

    #[test]
    fn stringified_list_is_parsed_once() {
        assert_eq!(
            normalize_mentions(owned(&["['MSFT', 'AAPL']"])),
            owned(&["MSFT", "AAPL"])
        );
        assert_eq!(
            normalize_mentions(owned(&["[\"NVDA\"]"])),
            owned(&["NVDA"])
        );
    }

    #[test]
    fn empty_brackets_yield_nothing() {
        assert!(normalize_mentions(owned(&["[]"])).is_empty());
        assert!(normalize_mentions(owned(&[""])).is_empty());
        assert!(normalize_mentions(Vec::new()).is_empty());
    }

    #[test]
    fn multi_element_lists_are_never_reparsed() {
        // Bracket syntax only counts when it is the sole element.
        assert_eq!(
            normalize_mentions(owned(&["['MSFT']", "AAPL"])),
            owned(&["['MSFT']", "AAPL"])
        );
    }
}
