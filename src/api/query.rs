//! OData-style query parameters for entity API requests.

/// Page size used when the caller does not ask for one.
pub const DEFAULT_TOP: i64 = 50;

/// Upper bound on `$top`; larger requests are clamped.
pub const MAX_TOP: i64 = 500;

/// Clamp a requested page size into `[1, MAX_TOP]`.
///
/// Absent or non-positive requests fall back to `DEFAULT_TOP`.
pub fn effective_top(requested: Option<i64>) -> i64 {
    match requested {
        Some(n) if n > MAX_TOP => MAX_TOP,
        Some(n) if n > 0 => n,
        _ => DEFAULT_TOP,
    }
}

/// Query options for entity API requests
///
/// Filter and orderby expressions pass through opaquely; the server is the
/// one that validates OData syntax.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub select: Option<String>,
    pub filter: Option<String>,
    pub orderby: Option<String>,
    pub expand: Option<String>,
    pub top: Option<i64>,
    pub skip: Option<i64>,
}

impl QueryParams {
    /// Build query pairs from the explicitly set options.
    ///
    /// `$top` is clamped when present and `$skip` is dropped unless positive.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(ref select) = self.select {
            pairs.push(("$select", select.clone()));
        }

        if let Some(ref filter) = self.filter {
            pairs.push(("$filter", filter.clone()));
        }

        if let Some(ref orderby) = self.orderby {
            pairs.push(("$orderby", orderby.clone()));
        }

        if let Some(ref expand) = self.expand {
            pairs.push(("$expand", expand.clone()));
        }

        if self.top.is_some() {
            pairs.push(("$top", effective_top(self.top).to_string()));
        }

        if let Some(skip) = self.skip {
            if skip > 0 {
                pairs.push(("$skip", skip.to_string()));
            }
        }

        pairs
    }

    /// Build query pairs for collection requests, which always carry `$top`.
    pub fn to_paged_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.to_pairs();
        if self.top.is_none() {
            pairs.push(("$top", DEFAULT_TOP.to_string()));
        }
        pairs
    }
}
