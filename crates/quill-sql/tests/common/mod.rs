#![allow(dead_code)]

use quill_sql::{Dialect, Grammar, PlaceholderStyle, Sql};

/// One grammar per built-in dialect.
pub fn grammars() -> [Grammar; 3] {
    [Grammar::postgres(), Grammar::mysql(), Grammar::sqlite()]
}

/// Returns the placeholders of a rendered statement, in order, as their
/// 1-based index. `?` placeholders are numbered by position.
///
/// Quoted runs are skipped, matching what the renderer leaves alone.
pub fn placeholders(dialect: &Dialect, text: &str) -> Vec<usize> {
    let mut found = vec![];
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match (ch, dialect.placeholder) {
            ('\'' | '"' | '`', _) => quote = Some(ch),
            ('?', PlaceholderStyle::Question) => found.push(found.len() + 1),
            ('$', PlaceholderStyle::Numbered) => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(*d);
                    chars.next();
                }
                let n = digits
                    .parse()
                    .unwrap_or_else(|e| panic!("bad placeholder in {text}: {e}"));
                found.push(n);
            }
            _ => {}
        }
    }
    found
}

/// Asserts that the placeholders of `sql` run 1..=N and N matches the bound
/// values.
pub fn assert_aligned(grammar: &Grammar, sql: &Sql) {
    let found = placeholders(grammar.dialect(), sql.text());
    let expected: Vec<usize> = (1..=sql.values().len()).collect();
    assert_eq!(
        found,
        expected,
        "{} placeholders misaligned in: {}",
        grammar.dialect().name,
        sql.text()
    );
}
