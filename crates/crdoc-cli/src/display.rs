//! Terminal rendering of documentation trees and repository listings

use console::style;
use crdoc_core::DocNode;
use crdoc_render::{DocPage, OrgPage};
use serde_json::Value;
use std::fmt::Write;

const DESCRIPTION_WIDTH: usize = 96;

/// Header plus the field tree of one CRD
pub fn doc_tree(page: &DocPage<'_>) -> String {
    let mut out = String::new();

    let api = match page.version {
        Some(version) => format!("{}/{}", page.group, version),
        None => page.group.to_string(),
    };
    let _ = writeln!(out, "{}  {}", style(page.kind).cyan().bold(), style(api).dim());
    if let Some(repo) = &page.repo {
        let _ = writeln!(out, "{}", style(with_tag(repo, page.tag.as_deref())).dim());
    }
    if let Some(description) = page.description {
        let _ = writeln!(out, "{}", description.trim());
    }
    out.push('\n');

    let _ = writeln!(out, "{}", summary(page.root));
    write_children(&mut out, page.root, "");
    out
}

/// Repository listing, one CRD per line
pub fn org_list(page: &OrgPage) -> String {
    let mut out = String::new();
    let noun = if page.total == 1 { "CRD" } else { "CRDs" };

    let _ = writeln!(
        out,
        "{}  {}",
        style(with_tag(&page.repo, page.tag.as_deref())).cyan().bold(),
        style(format!("{} {}", page.total, noun)).dim()
    );

    let width = page.crds.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for crd in &page.crds {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            crd.name,
            style(with_tag(&crd.path, page.tag.as_deref())).dim(),
            width = width
        );
    }
    out
}

fn write_children(out: &mut String, node: &DocNode, prefix: &str) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let (branch, indent) = if last { ("└─ ", "   ") } else { ("├─ ", "│  ") };
        let inner = format!("{}{}", prefix, indent);

        let _ = writeln!(out, "{}{}{}", prefix, branch, summary(child));
        if let Some(description) = child.description.as_deref().and_then(first_line) {
            let _ = writeln!(out, "{}   {}", inner, style(description).dim());
        }
        write_children(out, child, &inner);
    }
}

/// One line: key, type and constraints
fn summary(node: &DocNode) -> String {
    let mut line = style(&node.key).bold().to_string();
    if let Some(type_label) = &node.type_label {
        let _ = write!(line, " {}", style(type_label).green());
    }
    if node.required {
        let _ = write!(line, " {}", style("required").yellow());
    }

    let mut notes = Vec::new();
    if let Some(values) = &node.enum_values {
        let values: Vec<String> = values.iter().map(literal).collect();
        notes.push(format!("enum: {}", values.join(", ")));
    }
    if let Some(minimum) = node.minimum {
        notes.push(format!("min: {}", minimum));
    }
    if let Some(maximum) = node.maximum {
        notes.push(format!("max: {}", maximum));
    }
    if let Some(format) = &node.format {
        notes.push(format!("format: {}", format));
    }
    if let Some(pattern) = &node.pattern {
        notes.push(format!("pattern: {}", pattern));
    }
    if let Some(default) = &node.default {
        notes.push(format!("default: {}", literal(default)));
    }
    if node.nullable {
        notes.push("nullable".to_string());
    }
    if node.int_or_string {
        notes.push("int-or-string".to_string());
    }
    if node.embedded_resource {
        notes.push("embedded resource".to_string());
    }
    if node.additional_properties_allowed {
        notes.push("additional properties allowed".to_string());
    }
    if node.preserve_unknown_fields {
        notes.push("preserves unknown fields".to_string());
    }
    if !notes.is_empty() {
        let _ = write!(line, "  {}", style(notes.join("  ")).dim());
    }

    if node.truncated {
        let _ = write!(line, " {}", style("... not expanded").red());
    }
    line
}

fn first_line(text: &str) -> Option<String> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    if line.chars().count() > DESCRIPTION_WIDTH {
        let cut: String = line.chars().take(DESCRIPTION_WIDTH - 3).collect();
        Some(format!("{}...", cut.trim_end()))
    } else {
        Some(line.to_string())
    }
}

fn literal(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

fn with_tag(base: &str, tag: Option<&str>) -> String {
    match tag {
        Some(tag) => format!("{}@{}", base, tag),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crdoc_core::{CrdCatalog, CrdManifest, SchemaNode, SchemaVersion, TreeBuilder, VersionResolver};
    use std::collections::BTreeMap;

    fn plain(text: String) -> String {
        console::strip_ansi_codes(&text).into_owned()
    }

    fn manifest() -> CrdManifest {
        let mut replicas = SchemaNode::integer().with_description("How many\nsecond line");
        replicas.minimum = Some(1.0);
        let mut mode = SchemaNode::string();
        mode.enum_values = vec![serde_json::json!("fast"), serde_json::json!("safe")];

        let mut spec = BTreeMap::new();
        spec.insert("replicas".to_string(), replicas);
        spec.insert("mode".to_string(), mode);
        let mut root = BTreeMap::new();
        root.insert(
            "spec".to_string(),
            SchemaNode::object(spec).with_required(["replicas"]),
        );

        CrdManifest {
            group: "example.com".to_string(),
            kind: "Widget".to_string(),
            versions: vec![
                SchemaVersion::new("v1")
                    .storage()
                    .with_schema(SchemaNode::object(root).with_description("A widget")),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_doc_tree_layout() {
        let crd = manifest();
        let resolution = VersionResolver::resolve(&crd).unwrap();
        let root = TreeBuilder::new().build_named(resolution.schema, &crd.kind);
        let page = DocPage::new(&crd, &resolution, &root).with_repo("acme/widgets", None);
        let text = plain(doc_tree(&page));

        assert!(text.starts_with("Widget  example.com/v1\nacme/widgets\nA widget\n"));
        assert!(text.contains("└─ spec object"));
        assert!(text.contains("   ├─ mode string  enum: \"fast\", \"safe\""));
        assert!(text.contains("   └─ replicas integer required  min: 1"));
        assert!(text.contains("How many"));
        assert!(!text.contains("second line"));
    }

    #[test]
    fn test_truncated_marker() {
        let crd = manifest();
        let resolution = VersionResolver::resolve(&crd).unwrap();
        let root = TreeBuilder::new()
            .with_max_depth(1)
            .build_named(resolution.schema, &crd.kind);
        let page = DocPage::new(&crd, &resolution, &root);
        let text = plain(doc_tree(&page));

        assert_eq!(text.matches("... not expanded").count(), 2);
    }

    #[test]
    fn test_org_list() {
        let catalog = CrdCatalog::from_entries([
            ("Widget", "github.com/acme/widgets/widget.yaml"),
            ("Gadget", "github.com/acme/widgets/gadget.yaml"),
        ]);
        let page = OrgPage::new("acme/widgets", Some("v1".to_string()), &catalog);
        let text = plain(org_list(&page));

        assert!(text.starts_with("acme/widgets@v1  2 CRDs\n"));
        assert!(text.contains("  Gadget  github.com/acme/widgets/gadget.yaml@v1\n"));
        assert!(text.find("Gadget").unwrap() < text.find("Widget").unwrap());
    }

    #[test]
    fn test_first_line_truncates() {
        let long = "x".repeat(200);
        let line = first_line(&long).unwrap();
        assert_eq!(line.chars().count(), DESCRIPTION_WIDTH);
        assert!(line.ends_with("..."));
        assert!(first_line("  \n ").is_none());
    }
}
