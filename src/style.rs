//! Stylesheet for the hero block.
//!
//! Embedded at compile time from `static/hero.css` and scoped to the
//! classes [`markup`](crate::markup) emits. The host page registers it once.

use maud::{Markup, PreEscaped, html};

pub const STYLESHEET: &str = include_str!("../static/hero.css");

/// The stylesheet wrapped in a `<style>` element.
pub fn style_tag() -> Markup {
    html! {
        style { (PreEscaped(STYLESHEET)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_rendered_class() {
        for class in [".hero-link", ".hero-frame", ".hero-temp", ".hero-humidity"] {
            assert!(STYLESHEET.contains(class), "missing {class}");
        }
    }

    #[test]
    fn style_tag_is_not_escaped() {
        let tag = style_tag().into_string();
        assert!(tag.starts_with("<style>"));
        assert!(tag.contains("rgba(0, 0, 0, 0.7)"));
    }
}
