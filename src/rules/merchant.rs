//! Merchant keys
//!
//! Card and PayPal bookings carry terminal ids, locations and reference
//! numbers in the counterparty name. The merchant key strips those so that
//! bookings from the same payee group together.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::Transaction;

/// Prefix marking a key derived from a PayPal booking
pub const PAYPAL_PREFIX: &str = "paypal:";

/// Tokens that start the location suffix of card bookings
const LOCATION_TOKENS: [&str; 6] = ["lux", "luxembourg", "deu", "che", "esp", "gbr"];

/// Lowercase and trim a payee name; unwrap `PayPal *Merchant 1234` to `paypal:merchant`
pub fn normalize_name(name: &str) -> String {
    let name = name.trim().to_lowercase();

    let Some(merchant) = name
        .strip_prefix("paypal *")
        .or_else(|| name.strip_prefix("paypal*"))
    else {
        return name;
    };

    let words: Vec<&str> = merchant
        .split_whitespace()
        .take_while(|word| !is_reference_number(word))
        .collect();

    if words.is_empty() {
        name.clone()
    } else {
        format!("{}{}", PAYPAL_PREFIX, words.join(" "))
    }
}

/// All digits, or at least three characters of which most are digits
fn is_reference_number(word: &str) -> bool {
    let len = word.chars().count();
    let digits = word.chars().filter(char::is_ascii_digit).count();
    (len > 0 && digits == len) || (len >= 3 && digits * 2 > len)
}

/// Stable identifier for grouping bookings from the same merchant
///
/// `Sehne.Backwaren.KG.Fil./Holzgerlingen` becomes `sehne.backwaren.kg.fil.`
/// and `Amazon.de QL0TE44A5 LUX Luxembourg` becomes `amazon.de`.
pub fn merchant_key(name: &str) -> String {
    let normalized = normalize_name(name);
    if normalized.starts_with(PAYPAL_PREFIX) {
        return normalized;
    }

    let head = match normalized.split_once('/') {
        Some((head, _)) => head.trim(),
        None => normalized.as_str(),
    };

    let mut words = head.split_whitespace();
    let Some(first) = words.next() else {
        return head.to_string();
    };

    let mut kept = vec![first];
    for word in words {
        if looks_like_code(word) || LOCATION_TOKENS.contains(&word) {
            break;
        }
        kept.push(word);
    }
    kept.join(" ")
}

/// At least five characters mixing digits and letters
fn looks_like_code(word: &str) -> bool {
    word.chars().count() >= 5
        && word.chars().any(|c| c.is_ascii_digit())
        && word.chars().any(char::is_alphabetic)
}

/// Group transactions by merchant key, keeping first-seen order
pub fn group_by_merchant<'a, I>(transactions: I) -> Vec<(String, Vec<&'a Transaction>)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a Transaction>)> = Vec::new();

    for tx in transactions {
        let key = merchant_key(&tx.name);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(tx),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![tx]));
            }
        }
    }

    groups
}

/// Most frequent value with its count; ties go to the value seen first
pub fn most_common<T, I>(values: I) -> Option<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order: Vec<T> = Vec::new();

    for value in values {
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for value in order {
        let count = counts[&value];
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best
}

/// Capitalize the first letter of every word, lowercase the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
        } else {
            out.push(c);
        }
        previous_is_letter = c.is_alphabetic();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::tx;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  REWE  "), "rewe");
        assert_eq!(normalize_name("PayPal *Proshop S 87317327"), "paypal:proshop s");
        assert_eq!(
            normalize_name("PayPal *Merosstechn MER 02862050769"),
            "paypal:merosstechn mer"
        );
        assert_eq!(normalize_name("PAYPAL*Spotify"), "paypal:spotify");
        assert_eq!(normalize_name("PayPal *12345"), "paypal *12345");
    }

    #[test]
    fn test_merchant_key() {
        assert_eq!(merchant_key("REWE"), "rewe");
        assert_eq!(
            merchant_key("Sehne.Backwaren.KG.Fil./Holzgerlingen"),
            "sehne.backwaren.kg.fil."
        );
        assert_eq!(merchant_key("Amazon.de QL0TE44A5 LUX Luxembourg"), "amazon.de");
        assert_eq!(merchant_key("PayPal *LED24 0202610003"), "paypal:led24");
        assert_eq!(merchant_key("BK.19644.SOT/Malsfeld"), "bk.19644.sot");
        assert_eq!(merchant_key("Netflix International B.V."), "netflix international b.v.");
        assert_eq!(merchant_key("Uber BV DEU"), "uber bv");
        assert_eq!(merchant_key(""), "");
    }

    #[test]
    fn test_group_by_merchant_keeps_order() {
        let txs = vec![
            tx("1", "2026-01-01", -100, "Spotify AB"),
            tx("2", "2026-01-02", -200, "REWE Markt"),
            tx("3", "2026-01-03", -100, "spotify ab"),
        ];

        let groups = group_by_merchant(&txs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "spotify ab");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "rewe markt");
    }

    #[test]
    fn test_most_common_prefers_first_on_tie() {
        assert_eq!(most_common(vec!["a", "b", "b", "a"]), Some(("a", 2)));
        assert_eq!(most_common(vec!["a", "b", "b"]), Some(("b", 2)));
        assert_eq!(most_common(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("proshop s"), "Proshop S");
        assert_eq!(title_case("led24"), "Led24");
        assert_eq!(title_case("24abc"), "24Abc");
    }
}
