use crate::Request;

/// Build the canonical string of a request, which is the exact HMAC input.
///
/// ## Format
///
/// ```text
/// METHOD "\n"
/// path-without-leading-slash ["?" raw-query]
/// { "\n" name ":" value }*
/// ```
///
/// A single leading `/` is stripped from the path. The query string is
/// appended raw, exactly as carried by the URL. Header values are inserted
/// verbatim with no escaping, names in insertion order and values in
/// insertion order under each name; determinism of the output rests
/// entirely on [`crate::HeaderMap`] preserving that order. The result is
/// never reparsed, it is only fed to the signer.
pub fn canonicalize(req: &Request) -> String {
    let mut s = String::with_capacity(256);

    s.push_str(req.method.as_str());
    s.push('\n');

    let path = req.url.path();
    s.push_str(path.strip_prefix('/').unwrap_or(path));

    if let Some(query) = req.url.query() {
        s.push('?');
        s.push_str(query);
    }

    for (name, value) in req.headers.iter() {
        s.push('\n');
        s.push_str(name);
        s.push(':');
        s.push_str(value);
    }

    s
}
