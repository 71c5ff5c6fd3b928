use std::io::{self, Write};

use colored::Colorize;

use crate::format::format_size;
use crate::scanner::AuditNode;

/// Decorators applied to report text before it reaches a sink.
///
/// Decoration is display-only: the console colors sizes and counts, the
/// audit file gets identical undecorated text.
pub struct ReportStyle {
    pub size: fn(&str) -> String,
    pub count: fn(&str) -> String,
}

impl ReportStyle {
    pub fn plain() -> Self {
        Self {
            size: |s: &str| s.to_string(),
            count: |s: &str| s.to_string(),
        }
    }

    pub fn color() -> Self {
        Self {
            size: |s: &str| s.red().to_string(),
            count: |s: &str| s.green().to_string(),
        }
    }
}

/// Write the audit tree to `sink` as indented text, largest entries first.
pub fn render<W: Write>(node: &AuditNode, sink: &mut W, style: &ReportStyle) -> io::Result<()> {
    render_at(node, sink, style, 0)
}

fn render_at<W: Write>(
    node: &AuditNode,
    sink: &mut W,
    style: &ReportStyle,
    depth: usize,
) -> io::Result<()> {
    for _ in 0..depth {
        write!(sink, "    ")?;
    }
    write!(sink, "{} - {}", node.name, (style.size)(&format_size(node.total_size)))?;
    if node.file_count == 1 {
        write!(sink, "{}", (style.count)(" (1 file)"))?;
    } else if node.file_count > 1 {
        write!(sink, "{}", (style.count)(&format!(" ({} files)", node.file_count)))?;
    }
    writeln!(sink)?;

    // Stable descending sort over references: ties keep discovery order and
    // the tree itself is left untouched for other sinks.
    let mut ordered: Vec<&AuditNode> = node.children.iter().collect();
    ordered.sort_by(|a, b| b.total_size.cmp(&a.total_size));
    for child in ordered {
        render_at(child, sink, style, depth + 1)?;
    }

    Ok(())
}

/// Derive a legal report file name from the audited path.
pub fn report_file_name(path: &str) -> String {
    format!("{}-audit.txt", path.replace(':', "").replace('/', "-"))
}
