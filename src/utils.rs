//! Small text and number formatting helpers shared by the renderers and the CLI.

/// Formats an optional f64 to 4 decimal places, or a dash placeholder if None or non-finite.
pub fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.4}"),
        _ => "—".to_owned(),
    }
}

/// Uppercases the first letter of every word and lowercases the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// `"nome_completo"` with underscores replaced becomes `"Nome Completo"` and
/// `"2nd"` becomes `"2Nd"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(ch);
            prev_is_alpha = false;
        }
    }
    out
}

/// Replaces underscores with spaces and title-cases the result.
pub fn humanize(name: &str) -> String {
    title_case(&name.replace('_', " "))
}
