//! Render a request descriptor as an equivalent `curl` invocation.
//!
//! Header names and values are copied verbatim from the descriptor so a
//! pasted command hits the API exactly like the fetch did.

use crate::http::HttpRequest;

pub fn to_curl(request: &HttpRequest) -> String {
    let mut out = format!("curl -X {} {}", request.method.as_str(), shell_quote(&request.url));
    for (name, value) in &request.headers {
        out.push_str(" \\\n  -H ");
        out.push_str(&shell_quote(&format!("{name}: {value}")));
    }
    out
}

/// POSIX single-quote escaping.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
