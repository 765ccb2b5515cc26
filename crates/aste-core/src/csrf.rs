// CSRF token extraction from a `Cookie`-style header string.

/// Name of the cookie holding the CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header that carries the token on every POST.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Look up a cookie by name in a `name=value; name2=value2` string and
/// return its percent-decoded value.
///
/// Returns `None` when the string is empty or the cookie is absent. The first
/// matching cookie wins.
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| {
            cookie
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(percent_decode)
}

/// Extract the CSRF token from a cookie string.
pub fn csrf_token(cookies: &str) -> Option<String> {
    get_cookie(cookies, CSRF_COOKIE)
}

/// Decode `%XX` escapes. `+` is left alone, as in URI component decoding.
///
/// Invalid escapes are kept literally, and a result that is not UTF-8 falls
/// back to the undecoded input.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| s.to_string())
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
