/// Anchor prepended to relative paths that have no anchored parent.
pub const IMPLICIT_ANCHOR: &str = "%0%";

/// Joins two path fragments with a `.`, without leaving a stray separator when
/// either side is empty.
pub fn join(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{}.{}", head, tail),
    }
}

/// Turns a raw, comma-separated data path into absolute path expressions.
///
/// Parts that are not already anchored are scoped under `parent_path` and,
/// failing that, under the implicit `%0%` anchor. The order of the parts is
/// kept: consumers index resolved values by position. An empty data path
/// yields no parts.
pub fn normalize(data_path: &str, parent_path: Option<&str>) -> Vec<String> {
    if data_path.trim().is_empty() {
        return Vec::new();
    }

    data_path
        .split(',')
        .map(str::trim)
        .map(|part| {
            let mut part = part.to_string();
            if !part.starts_with('%') {
                if let Some(parent) = parent_path {
                    part = join(parent, &part);
                }
            }
            if !part.starts_with('%') {
                part = join(IMPLICIT_ANCHOR, &part);
            }
            part
        })
        .collect()
}
