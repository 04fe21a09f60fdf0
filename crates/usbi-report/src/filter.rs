//! Keyword filtering
//!
//! A keyword matches a descriptor when it is a case-insensitive substring of
//! any display value. IDs therefore match through their hex text (`0x1234`),
//! never their decimal value.
//!
//! Case is folded by uppercasing then lowercasing, so keywords whose case
//! mapping changes length (`ß` and `SS`) still match the same values.

use crate::record::Describe;

/// Check whether any display value of `item` contains `keyword`, ignoring case
pub fn matches_keyword<D: Describe>(item: &D, keyword: &str) -> bool {
    let keyword = fold_case(keyword);
    item.display_record()
        .values()
        .any(|value| fold_case(value).contains(&keyword))
}

fn fold_case(text: &str) -> String {
    text.to_uppercase().to_lowercase()
}

/// Keep the items matching `keyword`
pub fn filter_by_keyword<D: Describe>(items: Vec<D>, keyword: &str) -> Vec<D> {
    items
        .into_iter()
        .filter(|item| matches_keyword(item, keyword))
        .collect()
}
