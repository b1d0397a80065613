use tracing::warn;

/// Decodes a query string into its fields, keeping every occurrence in order.
pub(crate) fn decode_query(query: Option<&str>) -> Vec<(String, String)> {
    let Some(query) = query else {
        return Vec::new();
    };

    serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_else(|e| {
        warn!(cause = %e, "ignoring undecodable query string");
        Vec::new()
    })
}
