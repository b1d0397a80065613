use http::HeaderMap;

/// Returns the first value of header `name`, treating a value that is not UTF-8 as absent.
pub(crate) fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn first_value_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.append("x-request-id", HeaderValue::from_static("first"));
        headers.append("x-request-id", HeaderValue::from_static("second"));

        assert_eq!(header_value(&headers, "X-Request-Id"), Some("first"));
        assert_eq!(header_value(&headers, "x-missing"), None);
    }

    #[test]
    fn utf8_value() {
        let mut headers = HeaderMap::new();
        headers.insert("x-name", HeaderValue::from_bytes("José".as_bytes()).unwrap());

        assert_eq!(header_value(&headers, "x-name"), Some("José"));
    }

    #[test]
    fn opaque_value_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("x-bin", HeaderValue::from_bytes(b"\xfa\xfb").unwrap());

        assert_eq!(header_value(&headers, "x-bin"), None);
    }
}
