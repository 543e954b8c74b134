//! Trade classification and insider identity resolution.
//!
//! Splits an insider's trades into purchases and sales by disclosure label,
//! resolves the name an insider files under, and collects their titles.

use crate::domain::trade::InsiderTrade;

/// Placeholder character the disclosure source leaves in some titles.
pub const TITLE_PLACEHOLDER: char = '_';

/// An insider's trades split by side. Trades with unrecognised labels are in
/// neither list.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub purchases: Vec<InsiderTrade>,
    pub sales: Vec<InsiderTrade>,
}

pub fn purchases(trades: &[InsiderTrade]) -> Vec<InsiderTrade> {
    trades
        .iter()
        .filter(|t| t.kind().is_some_and(|k| k.is_purchase()))
        .cloned()
        .collect()
}

pub fn sales(trades: &[InsiderTrade]) -> Vec<InsiderTrade> {
    trades
        .iter()
        .filter(|t| t.kind().is_some_and(|k| k.is_sale()))
        .cloned()
        .collect()
}

pub fn classify(trades: &[InsiderTrade]) -> Classified {
    Classified {
        purchases: purchases(trades),
        sales: sales(trades),
    }
}

/// Resolve the full name an insider files under.
///
/// Without a given name, returns the first name whose leading token equals
/// `last_name` ignoring case. With a given name, returns the *last* name that
/// contains both strings. The asymmetry is long-standing behaviour and is kept.
pub fn resolve_insider_name(
    trades: &[InsiderTrade],
    last_name: &str,
    first_name: Option<&str>,
) -> Option<String> {
    match first_name.filter(|f| !f.is_empty()) {
        None => trades
            .iter()
            .find(|t| {
                t.insider_name
                    .split(' ')
                    .next()
                    .is_some_and(|lead| lead.to_uppercase() == last_name.to_uppercase())
            })
            .map(|t| t.insider_name.clone()),
        Some(first) => trades
            .iter()
            .rev()
            .find(|t| t.insider_name.contains(last_name) && t.insider_name.contains(first))
            .map(|t| t.insider_name.clone()),
    }
}

/// Distinct titles held by `full_name`, placeholder stripped, first-seen order.
pub fn collect_titles(trades: &[InsiderTrade], full_name: &str) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();
    for trade in trades.iter().filter(|t| t.insider_name == full_name) {
        let title = trade.title.replace(TITLE_PLACEHOLDER, "");
        if !titles.contains(&title) {
            titles.push(title);
        }
    }
    titles
}

/// Distinct insider names in filing order.
pub fn insider_names(trades: &[InsiderTrade]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for trade in trades {
        if !names.contains(&trade.insider_name) {
            names.push(trade.insider_name.clone());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn trade(name: &str, title: &str, trade_type: &str, filed: &str) -> InsiderTrade {
        InsiderTrade {
            filing_date: NaiveDateTime::parse_from_str(filed, "%Y-%m-%d %H:%M:%S").unwrap(),
            trade_date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            insider_name: name.to_string(),
            title: title.to_string(),
            trade_type: trade_type.to_string(),
            price: 100.0,
            quantity: 10,
            value: 1000.0,
        }
    }

    fn sample() -> Vec<InsiderTrade> {
        vec![
            trade("Huang Jen Hsun", "Pres, CEO", "S - Sale+OE", "2024-03-13 18:00:01"),
            trade("Kress Colette", "EVP, CFO", "S - Sale", "2024-03-12 18:00:02"),
            trade("Huang Jen Hsun", "Pres, CEO", "P - Purchase", "2024-03-11 18:00:03"),
            trade("Huang Jen Hsun", "_Pres, CEO", "M - OptEx", "2024-03-10 18:00:04"),
            trade("Huang Mei", "Dir", "P - Purchase+OE", "2024-03-09 18:00:05"),
        ]
    }

    #[test]
    fn classify_splits_by_side() {
        let c = classify(&sample());
        assert_eq!(c.purchases.len(), 2);
        assert_eq!(c.sales.len(), 2);
        assert!(c.purchases.iter().all(|t| t.trade_type.starts_with("P - ")));
        assert!(c.sales.iter().all(|t| t.trade_type.starts_with("S - ")));
    }

    #[test]
    fn classify_drops_unrecognised_labels() {
        let c = classify(&sample());
        let all: Vec<_> = c.purchases.iter().chain(c.sales.iter()).collect();
        assert!(all.iter().all(|t| t.trade_type != "M - OptEx"));
    }

    #[test]
    fn classify_preserves_order() {
        let c = classify(&sample());
        assert_eq!(c.purchases[0].insider_name, "Huang Jen Hsun");
        assert_eq!(c.purchases[1].insider_name, "Huang Mei");
    }

    #[test]
    fn resolve_by_surname_is_case_insensitive_first_match() {
        let name = resolve_insider_name(&sample(), "huang", None);
        assert_eq!(name.as_deref(), Some("Huang Jen Hsun"));
    }

    #[test]
    fn resolve_by_surname_matches_leading_token_only() {
        assert_eq!(resolve_insider_name(&sample(), "Colette", None), None);
        assert_eq!(
            resolve_insider_name(&sample(), "KRESS", None).as_deref(),
            Some("Kress Colette")
        );
    }

    #[test]
    fn resolve_with_given_name_takes_last_match() {
        let trades = vec![
            trade("Huang Jen Hsun", "CEO", "S - Sale", "2024-03-13 18:00:01"),
            trade("Huang Jen", "Dir", "S - Sale", "2024-03-12 18:00:01"),
        ];
        // Both contain "Huang" and "Jen"; the later row wins.
        let name = resolve_insider_name(&trades, "Huang", Some("Jen"));
        assert_eq!(name.as_deref(), Some("Huang Jen"));
        // Without a given name the first row wins.
        let name = resolve_insider_name(&trades, "Huang", None);
        assert_eq!(name.as_deref(), Some("Huang Jen Hsun"));
    }

    #[test]
    fn resolve_with_given_name_is_case_sensitive() {
        assert_eq!(resolve_insider_name(&sample(), "Huang", Some("mei")), None);
        assert_eq!(
            resolve_insider_name(&sample(), "Huang", Some("Mei")).as_deref(),
            Some("Huang Mei")
        );
    }

    #[test]
    fn resolve_empty_given_name_behaves_as_absent() {
        assert_eq!(
            resolve_insider_name(&sample(), "Huang", Some("")).as_deref(),
            Some("Huang Jen Hsun")
        );
    }

    #[test]
    fn resolve_no_match() {
        assert_eq!(resolve_insider_name(&sample(), "Musk", None), None);
        assert_eq!(resolve_insider_name(&[], "Huang", None), None);
    }

    #[test]
    fn titles_are_stripped_and_deduplicated() {
        let titles = collect_titles(&sample(), "Huang Jen Hsun");
        assert_eq!(titles, vec!["Pres, CEO"]);
    }

    #[test]
    fn titles_keep_first_seen_order() {
        let trades = vec![
            trade("Kress Colette", "EVP, CFO", "S - Sale", "2024-03-13 18:00:01"),
            trade("Kress Colette", "Dir_", "S - Sale", "2024-03-12 18:00:01"),
            trade("Kress Colette", "EVP, CFO", "S - Sale", "2024-03-11 18:00:01"),
            trade("Kress Colette", "Dir", "S - Sale", "2024-03-10 18:00:01"),
        ];
        assert_eq!(collect_titles(&trades, "Kress Colette"), vec!["EVP, CFO", "Dir"]);
    }

    #[test]
    fn titles_for_unknown_insider_are_empty() {
        assert!(collect_titles(&sample(), "").is_empty());
    }

    #[test]
    fn insider_names_distinct_in_order() {
        assert_eq!(
            insider_names(&sample()),
            vec!["Huang Jen Hsun", "Kress Colette", "Huang Mei"]
        );
    }
}
