use ident_sync_core::{paths, pattern::AttributePattern};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// The `.gitattributes` file a pattern was declared in, relative to the root.
fn declared_in(pattern: &AttributePattern) -> String {
    if pattern.source_dir.is_empty() {
        paths::GITATTRIBUTES.to_string()
    } else {
        format!("{}/{}", pattern.source_dir, paths::GITATTRIBUTES)
    }
}

/// One aligned line per pattern: root-relative form, as written, and where.
pub fn pattern_table(patterns: &[AttributePattern]) -> Vec<String> {
    const HEADERS: [&str; 3] = ["PATTERN", "DECLARED AS", "IN"];
    let rows: Vec<[String; 3]> = patterns
        .iter()
        .map(|p| [p.normalized.clone(), p.raw_pattern.clone(), declared_in(p)])
        .collect();

    let width = |col: usize| {
        rows.iter()
            .map(|r| r[col].len())
            .chain(std::iter::once(HEADERS[col].len()))
            .max()
            .unwrap_or(0)
    };
    let (w0, w1) = (width(0), width(1));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("{:w0$}  {:w1$}  {}", HEADERS[0], HEADERS[1], HEADERS[2]));
    lines.push(format!("{}  {}  {}", "-".repeat(w0), "-".repeat(w1), "-".repeat(width(2))));
    for [normalized, raw, source] in &rows {
        lines.push(format!("{normalized:w0$}  {raw:w1$}  {source}"));
    }
    lines
}
