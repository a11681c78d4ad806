use askama_escape::{escape, Html};
use std::collections::HashMap;

pub const BASE_TEMPLATE: &str = include_str!("templates/base.html");
pub const BOOK_LIST_TEMPLATE: &str = include_str!("templates/book_list.html");
pub const BOOK_ROW_TEMPLATE: &str = include_str!("templates/book_row.html");
pub const BOOK_FORM_TEMPLATE: &str = include_str!("templates/book_form.html");
pub const CHECKBOX_TEMPLATE: &str = include_str!("templates/checkbox.html");
pub const NAMED_LIST_TEMPLATE: &str = include_str!("templates/named_list.html");
pub const NAMED_ROW_TEMPLATE: &str = include_str!("templates/named_row.html");
pub const NAMED_FORM_TEMPLATE: &str = include_str!("templates/named_form.html");
pub const ERROR_TEMPLATE: &str = include_str!("templates/error.html");

/// Substitutes `[[key]]` placeholders in one pass.
///
/// Substituted values are never rescanned, so user text containing `[[...]]`
/// stays literal. Unknown placeholders are left as-is.
pub fn render(template: &str, variables: &HashMap<&str, String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("[[") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("]]") {
            Some(end) => {
                let key = &after[..end];
                match variables.get(key) {
                    Some(value) => result.push_str(value),
                    None => result.push_str(&rest[start..start + end + 4]),
                }
                rest = &after[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);

    result
}

pub fn render_page(title: &str, content: &str) -> String {
    let mut vars = HashMap::new();
    vars.insert("title", escape_html(title));
    vars.insert("content", content.to_string());

    render(BASE_TEMPLATE, &vars)
}

/// Escapes user-provided text for HTML body and attribute positions.
pub fn escape_html(value: &str) -> String {
    escape(value, Html).to_string()
}

#[cfg(test)]
mod tests {
    use super::{escape_html, render};
    use std::collections::HashMap;

    #[test]
    fn render_replaces_known_placeholders_once() {
        let mut vars = HashMap::new();
        vars.insert("a", "[[b]]".to_string());
        vars.insert("b", "nope".to_string());

        assert_eq!(render("<[[a]]|[[b]]>", &vars), "<[[b]]|nope>");
    }

    #[test]
    fn render_keeps_unknown_and_unterminated_placeholders() {
        let vars = HashMap::new();
        assert_eq!(render("x [[missing]] y [[open", &vars), "x [[missing]] y [[open");
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        let escaped = escape_html("<b>\"Tom & Jerry\"</b>");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('"'));
        assert!(escaped.contains("&amp;"));
    }
}
