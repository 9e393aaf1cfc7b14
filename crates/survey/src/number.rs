/// Parse a response cell as a rating.
///
/// Blank, non-numeric and NaN cells give `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| !n.is_nan())
}
