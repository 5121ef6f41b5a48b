//! Named render parameters.
//!
//! A page embeds the hero block with a handful of attributes:
//!
//! ```text
//! camera="reo" show_temp="true" show_humidity="no" alt_text="Harbor view"
//! ```
//!
//! | Attribute | Default | Meaning |
//! |---|---|---|
//! | `camera` | configured default | camera id |
//! | `show_temp` | `true` | temperature badge |
//! | `show_humidity` | `true` | humidity badge |
//! | `alt_text` | camera name | `<img alt>` |
//!
//! Booleans are true for `1`, `true`, `on`, `yes` (any case) and false for
//! everything else. Unknown attributes are ignored.

/// A parsed render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Requested camera id; empty means the configured default.
    pub camera: String,
    pub show_temp: bool,
    pub show_humidity: bool,
    /// Requested alt text; empty means the camera's display name.
    pub alt_text: String,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            camera: String::new(),
            show_temp: true,
            show_humidity: true,
            alt_text: String::new(),
        }
    }
}

impl RenderRequest {
    /// Build a request from `(name, value)` pairs, applying defaults.
    pub fn from_attrs<I, K, V>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        for (key, value) in attrs {
            let value = value.as_ref();
            match key.as_ref().trim().to_ascii_lowercase().as_str() {
                "camera" => request.camera = sanitize_text(value),
                "show_temp" => request.show_temp = parse_bool(value),
                "show_humidity" => request.show_humidity = parse_bool(value),
                "alt_text" => request.alt_text = sanitize_text(value),
                _ => {}
            }
        }
        request
    }

    /// Parse an attribute string such as `camera="reo" show_temp=false`.
    pub fn parse(attrs: &str) -> Self {
        Self::from_attrs(parse_attr_string(attrs))
    }
}

/// `1`, `true`, `on`, `yes` (case-insensitive, trimmed) are true.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Plain-text cleanup for attribute values: drops `<…>` tags and control
/// characters, collapses whitespace runs, trims.
///
/// A `<` opens a tag only when a letter, `/` or `!` follows it, so text
/// such as `temp < 50F` survives intact.
pub fn sanitize_text(value: &str) -> String {
    let mut stripped = String::with_capacity(value.len());
    let mut in_tag = false;
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' if !in_tag
                && chars
                    .peek()
                    .is_some_and(|n| n.is_ascii_alphabetic() || *n == '/' || *n == '!') =>
            {
                in_tag = true
            }
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_control() => stripped.push(' '),
            c => stripped.push(c),
        }
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokenize `key=value`, `key="value"`, `key='value'` pairs.
///
/// Bare words without `=` are skipped. An unterminated quote runs to the
/// end of the input.
pub fn parse_attr_string(input: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
            key.push(c);
        }
        if chars.next_if_eq(&'=').is_none() {
            continue;
        }

        let mut value = String::new();
        match chars.peek().copied() {
            Some(quote @ ('"' | '\'')) => {
                chars.next();
                for c in chars.by_ref() {
                    if c == quote {
                        break;
                    }
                    value.push(c);
                }
            }
            _ => {
                while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                    value.push(c);
                }
            }
        }
        pairs.push((key.to_ascii_lowercase(), value));
    }
    pairs
}
