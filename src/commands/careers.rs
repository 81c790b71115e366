use std::fmt::Write;

use anyhow::ensure;
use itertools::Itertools;

use crate::catalog::{Catalog, Opening, Team};

use super::{Style, output_width, truncate};

#[derive(Debug, Default)]
pub(crate) struct OpeningFilter {
    pub department: Option<String>,
    pub location: Option<String>,
}

impl OpeningFilter {
    fn matches(&self, opening: &Opening) -> bool {
        let department_ok = self
            .department
            .as_ref()
            .is_none_or(|d| opening.department.eq_ignore_ascii_case(d));
        let location_ok = self.location.as_ref().is_none_or(|l| {
            opening
                .location
                .to_lowercase()
                .contains(&l.to_lowercase())
        });
        department_ok && location_ok
    }
}

/// Writes `=== key ===` sections, keeping the catalog order inside each group.
fn render_sections<T>(
    out: &mut String,
    items: &[&T],
    key: impl Fn(&T) -> &str,
    mut body: impl FnMut(&mut String, &T),
    style: &Style,
) {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| key(a).cmp(key(b)));
    for (group, members) in &sorted.iter().chunk_by(|item| key(item).to_string()) {
        writeln!(out, "{}=== {} ==={}", style.bold, group, style.reset).unwrap();
        writeln!(out).unwrap();
        for item in members {
            body(out, item);
        }
        writeln!(out).unwrap();
    }
}

fn render_openings(openings: &[&Opening], style: &Style, width: usize) -> String {
    let mut out = String::new();
    render_sections(
        &mut out,
        openings,
        |o| o.department.as_str(),
        |out, o| {
            let plural = if o.required_openings == 1 { "" } else { "s" };
            writeln!(out, "  {}{}{}", style.bold, o.position, style.reset).unwrap();
            let mut meta = format!(
                "{} · {} · {} opening{}",
                o.location,
                o.mode_of_work.label(),
                o.required_openings,
                plural
            );
            if o.immediate_joiner {
                meta.push_str(" · immediate joiner");
            }
            writeln!(out, "    {}{}{}", style.accent, meta, style.reset).unwrap();
            if !o.details.is_empty() {
                let text = truncate(&o.details, width.saturating_sub(4));
                writeln!(out, "    {}{}{}", style.dim, text, style.reset).unwrap();
            }
        },
        style,
    );
    out
}

fn render_teams(teams: &[&Team], style: &Style, width: usize) -> String {
    let mut out = String::new();
    render_sections(
        &mut out,
        teams,
        |t| t.category.as_str(),
        |out, t| {
            writeln!(out, "  {}{}{}", style.bold, t.title, style.reset).unwrap();
            let text = truncate(&t.description, width.saturating_sub(4));
            writeln!(out, "    {}{}{}", style.dim, text, style.reset).unwrap();
        },
        style,
    );
    out
}

pub(crate) fn cmd_careers(catalog: &Catalog, filter: &OpeningFilter, teams: bool) -> anyhow::Result<()> {
    let style = Style::for_stdout();
    let width = output_width();
    if teams {
        let teams: Vec<&Team> = catalog.active_teams().collect();
        ensure!(!teams.is_empty(), "No teams are hiring right now");
        print!("{}", render_teams(&teams, &style, width));
        return Ok(());
    }

    let openings: Vec<&Opening> = catalog
        .active_openings()
        .filter(|o| filter.matches(o))
        .collect();
    ensure!(!openings.is_empty(), "No matching openings");
    print!("{}", render_openings(&openings, &style, width));
    Ok(())
}

pub(crate) fn cmd_positions(catalog: &Catalog) -> anyhow::Result<()> {
    let style = Style::for_stdout();
    println!("{}=== Positions ==={}", style.bold, style.reset);
    println!();
    for position in &catalog.positions {
        println!("  {}", position);
    }
    println!();
    println!("{}=== Location preferences ==={}", style.bold, style.reset);
    println!();
    for location in &catalog.locations {
        println!("  {}", location);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WorkMode;

    fn opening(position: &str, department: &str, location: &str) -> Opening {
        Opening {
            id: position.to_lowercase(),
            position: position.to_string(),
            department: department.to_string(),
            details: String::new(),
            location: location.to_string(),
            immediate_joiner: false,
            mode_of_work: WorkMode::OnSite,
            required_openings: 1,
            is_active: true,
        }
    }

    #[test]
    fn test_filter_by_department_is_case_insensitive() {
        let filter = OpeningFilter {
            department: Some("engineering".to_string()),
            location: None,
        };
        assert!(filter.matches(&opening("SRE", "Engineering", "Chennai")));
        assert!(!filter.matches(&opening("Architect", "Infrastructure", "Chennai")));
    }

    #[test]
    fn test_filter_by_location_substring() {
        let filter = OpeningFilter {
            department: None,
            location: Some("bangalore".to_string()),
        };
        assert!(filter.matches(&opening("SRE", "Engineering", "Bangalore/Hybrid")));
        assert!(!filter.matches(&opening("SRE", "Engineering", "Chennai")));
    }

    #[test]
    fn test_render_openings_grouped_by_department() {
        let a = opening("Zeta Engineer", "Engineering", "Chennai");
        let b = opening("Architect", "Infrastructure", "Coimbatore/Remote");
        let mut c = opening("Alpha Engineer", "Engineering", "Bangalore");
        c.required_openings = 3;
        c.immediate_joiner = true;

        let out = render_openings(&[&a, &b, &c], &Style::new(false), 80);

        assert_eq!(
            out,
            "\
=== Engineering ===

  Zeta Engineer
    Chennai · On-site · 1 opening
  Alpha Engineer
    Bangalore · On-site · 3 openings · immediate joiner

=== Infrastructure ===

  Architect
    Coimbatore/Remote · On-site · 1 opening

"
        );
    }

    #[test]
    fn test_render_builtin_teams() {
        let catalog = Catalog::builtin().unwrap();
        let teams: Vec<&Team> = catalog.active_teams().collect();
        let out = render_teams(&teams, &Style::new(false), 80);
        let headers: Vec<&str> = out.lines().filter(|l| l.starts_with("===")).collect();
        assert_eq!(
            headers,
            vec![
                "=== Engineering ===",
                "=== Infrastructure ===",
                "=== Marketing & Sales ===",
                "=== People/HR ===",
                "=== Product ==="
            ]
        );
    }
}
