pub fn truncate_ellipsis(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let len = s.chars().count();
    if len <= width {
        return s.to_string();
    }
    if width == 1 {
        return "…".to_string();
    }
    let take = width - 1;
    let mut out = String::with_capacity(s.len().min(width + 4));
    out.extend(s.chars().take(take));
    out.push('…');
    out
}

/// Right-aligned `key: value` rows; multi-line values are indented under
/// the first line.
pub fn format_kv_block<F>(pairs: &[(&str, String)], color_key: F) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    let key_w = pairs
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(pairs.len());
    for (k, v) in pairs {
        let key_padded = format!("{:>key_w$}", k, key_w = key_w);
        let key_col = color_key(&key_padded);

        let v = v.trim_end_matches('\n');
        let mut it = v.lines();
        let first = it.next().unwrap_or("");
        out.push(format!("{}: {}", key_col, first));
        for line in it {
            out.push(format!("{:>key_w$}  {}", "", line, key_w = key_w));
        }
    }
    out
}

pub fn print_kv_block_colored_keys<F>(pairs: &[(&str, String)], color_key: F)
where
    F: Fn(&str) -> String,
{
    for line in format_kv_block(pairs, color_key) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_text() {
        assert_eq!(truncate_ellipsis("Joshimath, Chamoli", 9), "Joshimat…");
        assert_eq!(truncate_ellipsis("Kufri", 9), "Kufri");
    }

    #[test]
    fn kv_block_aligns_keys() {
        let lines = format_kv_block(
            &[("From", "Delhi".into()), ("Distance", "~1148 km".into())],
            |k| k.to_string(),
        );
        assert_eq!(lines, vec!["    From: Delhi", "Distance: ~1148 km"]);
    }
}
