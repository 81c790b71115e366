use std::fmt::Write;

use crate::catalog::Catalog;

use super::Style;

fn render_topics(catalog: &Catalog, style: &Style) -> String {
    let Style {
        bold, dim, reset, ..
    } = style;
    let mut out = String::new();

    writeln!(out, "{bold}=== Categories ==={reset}").unwrap();
    writeln!(out).unwrap();
    let total: u32 = catalog.categories.iter().map(|c| c.count).sum();
    writeln!(out, "  All Categories {dim}({}){reset}", total).unwrap();
    for category in &catalog.categories {
        writeln!(out, "  {} {dim}({}){reset}", category.name, category.count).unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "{bold}=== Popular Tags ==={reset}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  {}", catalog.tags.join(", ")).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "{bold}=== Recent Posts ==={reset}").unwrap();
    writeln!(out).unwrap();
    for post in &catalog.recent_posts {
        writeln!(out, "  {}  {}", post.date.format("%Y-%m-%d"), post.title).unwrap();
    }
    out
}

pub(crate) fn cmd_topics(catalog: &Catalog) -> anyhow::Result<()> {
    print!("{}", render_topics(catalog, &Style::for_stdout()));
    Ok(())
}
