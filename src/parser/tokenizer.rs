//! Quote-aware tokenization of one raw access-log line.
//!
//! ALB access logs are whitespace-delimited with `"`-quoted spans for fields
//! that may contain embedded spaces (the request line, the user agent). A
//! quoted span is one token; the quote markers are removed from the output.

/// Splits `line` into whitespace-delimited tokens, honoring `"` quoting.
///
/// An empty quoted span (`""`) yields an empty token; unquoted runs of
/// whitespace yield nothing. Quotes are not escapable inside a span, matching
/// the log format (the balancer URL-encodes embedded quotes).
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() || quoted {
        tokens.push(current);
    }

    tokens
}
