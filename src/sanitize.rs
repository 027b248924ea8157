/// Escape quotes, backslashes and line terminators in a referenced path and
/// make it relative.
///
/// `sanitize("a'b")` is `./a\'b`, `sanitize("./x")` is `./x`.
pub fn sanitize(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len() + 2);
    for ch in path.chars() {
        match ch {
            '"' | '\'' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            // Not allowed raw inside a string literal.
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(ch),
        }
    }
    relativize(escaped)
}

/// The unescaped module specifier for `path`, i.e. the value the string
/// literal produced by [`sanitize`] evaluates to.
pub fn module_specifier(path: &str) -> String {
    relativize(path.to_string())
}

/// Printed form of the inlined module reference: `require('<path>')`.
pub fn require_source(path: &str) -> String {
    format!("require('{}')", sanitize(path))
}

fn relativize(path: String) -> String {
    if path.starts_with('.') {
        path
    } else {
        format!("./{path}")
    }
}
