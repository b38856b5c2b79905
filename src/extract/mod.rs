// src/extract/mod.rs

pub mod averages;
pub mod states;

use scraper::ElementRef;

/// Lenient price parse: strip every literal `$`, trim, parse as `f64`.
/// Anything that still fails to parse (e.g. "N/A") defaults to 0.0, so a
/// malformed price is indistinguishable from a genuinely zero one in the
/// output. Deliberate policy inherited from the source feed's consumers.
pub fn price_or_zero(text: &str) -> f64 {
    text.replace('$', "").trim().parse().unwrap_or(0.0)
}

/// Concatenated text of an element's descendant text nodes, like the DOM's
/// `textContent`.
fn text_content(el: ElementRef) -> String {
    el.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_prices_parse() {
        assert_eq!(price_or_zero("$3.459"), 3.459);
        assert_eq!(price_or_zero(" $3.10 "), 3.10);
    }

    #[test]
    fn non_numeric_defaults_to_zero() {
        assert_eq!(price_or_zero("N/A"), 0.0);
        assert_eq!(price_or_zero(""), 0.0);
        assert_eq!(price_or_zero("$"), 0.0);
    }
}
