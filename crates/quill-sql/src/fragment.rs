//! SQL fragments with bound values.
//!
//! A [`Sql`] is a piece of SQL text paired with the values bound into it, in
//! order. Each bound value owns one `?` marker whose position is recorded when
//! the value is bound, so a `?` that is part of the SQL itself (the PostgreSQL
//! JSONB `?` operator, a literal) is never mistaken for a parameter.
//! Fragments are dialect-neutral; a [`Grammar`](crate::Grammar) rewrites the
//! recorded markers into the dialect's placeholder syntax when it renders a
//! full statement.

use std::fmt;

use crate::value::{ToValue, Value};

/// Parameter marker used inside fragments.
pub const MARKER: char = '?';

/// SQL text plus its bound values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sql {
    text: String,
    values: Vec<Value>,
    markers: Vec<usize>,
}

impl Sql {
    /// Creates a fragment from text and the values for its `?` markers.
    ///
    /// Every `?` outside a `'...'`, `"..."` or `` `...` `` quoted run is a
    /// marker. Write `??` for a literal `?` (e.g. the JSONB key-exists
    /// operator): `Sql::new("tags ?? ? AND id = ?", ["admin", 1])`.
    #[must_use]
    pub fn new<I, V>(text: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToValue,
    {
        let (text, markers) = parse_markers(&text.into());
        Self {
            text,
            values: values.into_iter().map(ToValue::to_value).collect(),
            markers,
        }
    }

    /// Creates a fragment without bound values.
    ///
    /// The text is kept verbatim: a `?` in it is plain SQL, not a marker.
    ///
    /// **Warning**: Only use this for SQL that doesn't contain user input.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            values: vec![],
            markers: vec![],
        }
    }

    /// Creates a single `?` marker bound to `value`.
    #[must_use]
    pub fn bind(value: impl ToValue) -> Self {
        Self {
            text: String::from(MARKER),
            values: vec![value.to_value()],
            markers: vec![0],
        }
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the bound values.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the byte offsets of the `?` markers in [`Sql::text`].
    #[must_use]
    pub fn markers(&self) -> &[usize] {
        &self.markers
    }

    /// Returns `true` if the fragment has no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the fragment and returns the SQL and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.text, self.values)
    }

    /// Appends literal SQL text. A `?` in `text` is not a marker.
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Appends a single character.
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Appends a `?` marker bound to `value`.
    pub fn push_bind(&mut self, value: Value) {
        self.markers.push(self.text.len());
        self.text.push(MARKER);
        self.values.push(value);
    }

    /// Appends another fragment, text and values.
    pub fn push_sql(&mut self, other: Self) {
        let offset = self.text.len();
        self.markers.extend(other.markers.iter().map(|m| m + offset));
        self.text.push_str(&other.text);
        self.values.extend(other.values);
    }

    /// Wraps the fragment in parentheses.
    #[must_use]
    pub fn paren(self) -> Self {
        Self {
            text: format!("({})", self.text),
            values: self.values,
            markers: self.markers.iter().map(|m| m + 1).collect(),
        }
    }

    /// Joins fragments with `separator`, skipping empty ones.
    #[must_use]
    pub fn join<I>(fragments: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut out = Self::default();
        for fragment in fragments {
            if fragment.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push_str(separator);
            }
            out.push_sql(fragment);
        }
        out
    }

    /// Returns the number of `?` markers.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Builds a fragment whose placeholders are already final, so it carries
    /// no markers.
    pub(crate) const fn rendered(text: String, values: Vec<Value>) -> Self {
        Self {
            text,
            values,
            markers: vec![],
        }
    }
}

impl fmt::Display for Sql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Joins a sequence of fragments with a single space.
pub trait SqlJoined {
    /// Concatenates the fragments, preserving text and binding order.
    fn joined(self) -> Sql;
}

impl<I> SqlJoined for I
where
    I: IntoIterator<Item = Sql>,
{
    fn joined(self) -> Sql {
        Sql::join(self, " ")
    }
}

/// Finds the markers of `text`, unescaping `??` to a literal `?`.
///
/// Returns the unescaped text and the byte offsets of its markers. Quoted runs
/// are copied verbatim.
fn parse_markers(text: &str) -> (String, Vec<usize>) {
    let mut out = String::with_capacity(text.len());
    let mut markers = vec![];
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                MARKER if chars.peek() == Some(&MARKER) => {
                    chars.next();
                }
                MARKER => markers.push(out.len()),
                _ => {}
            },
        }
        out.push(ch);
    }
    (out, markers)
}
