// * Price phrase extraction
// * Splits promotional copy into individual price entries, each anchored
// * on a dollar amount and carrying the descriptive words that follow it:
// * "$5 Beers", "$2 off drafts", "$6-8 Wines by the glass".

use std::sync::LazyLock;

use regex::Regex;

// * Dollar anchor: "$5", "$5.50", "$6-8", "$6 - $8"
static RE_PRICE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\d+(?:\.\d{2})?(?:\s*-\s*\$?\d+(?:\.\d{2})?)?").expect("price anchor regex")
});

// * Where an entry's descriptive tail stops
static RE_TAIL_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[,;.!\n]|\band\b|\bhappy\s+hours?\b|\$").expect("price tail regex")
});

/// Pull individual price entries out of free text, in document order.
pub fn parse_price_list(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    for anchor in RE_PRICE_ANCHOR.find_iter(text) {
        let amount = normalize_amount(anchor.as_str());
        let rest = &text[anchor.end()..];
        let tail_end = RE_TAIL_BREAK.find(rest).map(|m| m.start()).unwrap_or(rest.len());
        let tail = rest[..tail_end].trim();
        if tail.is_empty() {
            entries.push(amount);
        } else {
            entries.push(format!("{} {}", amount, tail));
        }
    }
    entries
}

// * Canonical amount spelling: collapse "$6 - $8" to "$6-8"
fn normalize_amount(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    match compact.rsplit_once('-') {
        Some((low, high)) => format!("{}-{}", low, high.trim_start_matches('$')),
        None => compact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_price_with_description() {
        assert_eq!(parse_price_list("$5 beers"), vec!["$5 beers"]);
    }

    #[test]
    fn multiple_entries_split_on_separators() {
        let entries = parse_price_list("$5 Margaritas, $3 Tacos and $8 Wings");
        assert_eq!(entries, vec!["$5 Margaritas", "$3 Tacos", "$8 Wings"]);
    }

    #[test]
    fn decimal_and_range_amounts() {
        let entries = parse_price_list("$5.50 drafts, $6 - $8 wines by the glass");
        assert_eq!(entries, vec!["$5.50 drafts", "$6-8 wines by the glass"]);
    }

    #[test]
    fn bare_amounts_kept_without_tail() {
        let entries = parse_price_list("$3 $6 $9 Happy Hour");
        assert_eq!(entries, vec!["$3", "$6", "$9"]);
    }

    #[test]
    fn no_prices_yields_empty() {
        assert!(parse_price_list("happy hour every day").is_empty());
    }
}
