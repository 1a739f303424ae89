// ============================================================
// LINE SPLITTER
// ============================================================
// Split one CSV line into cells, honoring quoted commas

/// Split a single line into trimmed fields.
///
/// A `"` toggles quoted mode and is never copied into the field, so commas
/// inside quotes stay literal and surrounding quotes disappear. Doubled quotes
/// are not unescaped. An unterminated quote swallows the rest of the line into
/// the current field. Never fails.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == ',' && !in_quotes {
            fields.push(finish_field(&current));
            current.clear();
        } else {
            current.push(ch);
        }
    }

    fields.push(finish_field(&current));
    fields
}

fn finish_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}
