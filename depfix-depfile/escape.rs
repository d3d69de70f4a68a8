use std::borrow::Cow;

/// Escape `filename` so that it can be embedded as a single token in a
/// dependency file line.
///
/// Backslash, `#`, `:`, space and tab are preceded by a backslash; `$` is
/// doubled, following Makefile variable-expansion convention. The output is
/// recovered losslessly by [`tokenize`](crate::tokenize).
#[must_use]
pub fn escape_filename(filename: &str) -> Cow<'_, str> {
    if !filename.contains(['\\', '#', ':', ' ', '\t', '$']) {
        return Cow::Borrowed(filename);
    }

    let mut escaped = String::with_capacity(filename.len() + 2);
    for c in filename.chars() {
        match c {
            '\\' | '#' | ':' | ' ' | '\t' => escaped.push('\\'),
            '$' => escaped.push('$'),
            _ => {}
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
