//! Table formatting for CLI list commands

use tabled::{builder::Builder, settings::Style};

/// Render rows as an aligned table with a header
pub fn render(header: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(header.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

/// Display text for an optional field
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_header_and_rows() {
        let out = render(
            &["ID", "NAME"],
            vec![vec!["1".to_string(), "204.1".to_string()]],
        );
        assert!(out.contains("ID"));
        assert!(out.contains("204.1"));
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("x")), "x");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(None), "-");
    }
}
