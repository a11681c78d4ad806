//! `application/x-www-form-urlencoded` body decoding.
//!
//! Checkbox groups submit one pair per checked box under the same key, so
//! fields are kept as an ordered multi-map instead of a struct.

use crate::error::WebError;
use std::collections::BTreeSet;

pub(crate) struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub(crate) fn parse(body: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// First value for `key`, or an empty string when the field is absent.
    pub(crate) fn text(&self, key: &str) -> String {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    /// Every value for `key` parsed as an integer id.
    pub(crate) fn ids(&self, key: &'static str) -> Result<BTreeSet<i64>, WebError> {
        self.pairs
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| {
                value.trim().parse::<i64>().map_err(|_| WebError::BadForm {
                    field: key,
                    reason: format!("`{value}` is not an id"),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::FormFields;
    use crate::error::WebError;
    use std::collections::BTreeSet;

    #[test]
    fn repeated_keys_collect_into_a_set() {
        let form = FormFields::parse(b"title=War+%26+Peace&authors=3&authors=1&authors=3&genres=2");
        assert_eq!(form.text("title"), "War & Peace");
        assert_eq!(form.ids("authors").unwrap(), BTreeSet::from([1, 3]));
        assert_eq!(form.ids("genres").unwrap(), BTreeSet::from([2]));
    }

    #[test]
    fn missing_fields_are_empty() {
        let form = FormFields::parse(b"");
        assert_eq!(form.text("title"), "");
        assert!(form.ids("authors").unwrap().is_empty());
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let form = FormFields::parse(b"authors=abc");
        let err = form.ids("authors").unwrap_err();
        assert!(matches!(err, WebError::BadForm { field: "authors", .. }));
    }
}
