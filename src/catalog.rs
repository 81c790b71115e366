use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;

const DEFAULT_CATALOG: &str = include_str!("catalog.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentPost {
    pub title: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WorkMode {
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl WorkMode {
    pub fn label(&self) -> &'static str {
        match self {
            WorkMode::Remote => "Remote",
            WorkMode::Hybrid => "Hybrid",
            WorkMode::OnSite => "On-site",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Opening {
    pub id: String,
    pub position: String,
    pub department: String,
    pub details: String,
    pub location: String,
    pub immediate_joiner: bool,
    pub mode_of_work: WorkMode,
    pub required_openings: u32,
    pub is_active: bool,
}

/// A team that is hiring in general, not for one specific opening.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Team {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub is_active: bool,
}

/// Static site content. Loaded once at startup and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub recent_posts: Vec<RecentPost>,
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub openings: Vec<Opening>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Catalog {
    pub fn builtin() -> anyhow::Result<Self> {
        Self::parse(DEFAULT_CATALOG).context("built-in catalog is invalid")
    }

    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("reading catalog from {}", path.display()))?;
                Self::parse(&content)
                    .with_context(|| format!("parsing catalog {}", path.display()))
            }
            None => Self::builtin(),
        }
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn active_openings(&self) -> impl Iterator<Item = &Opening> {
        self.openings.iter().filter(|o| o.is_active)
    }

    pub fn active_teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(|t| t.is_active)
    }

    pub fn is_known_position(&self, position: &str) -> bool {
        self.positions.iter().any(|p| p == position)
    }

    pub fn is_known_location(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.categories.len(), 5);
        assert_eq!(catalog.categories[0].name, "Technology");
        assert_eq!(catalog.categories[0].count, 12);
        assert_eq!(catalog.tags.len(), 10);
        assert_eq!(catalog.recent_posts.len(), 3);
        assert_eq!(catalog.positions.len(), 14);
        assert_eq!(catalog.locations[0], "Any");
        assert_eq!(catalog.openings.len(), 3);
        assert_eq!(catalog.teams.len(), 10);
    }

    #[test]
    fn test_work_mode_labels() {
        let catalog = Catalog::builtin().unwrap();
        let modes: Vec<&str> = catalog
            .openings
            .iter()
            .map(|o| o.mode_of_work.label())
            .collect();
        assert_eq!(modes, vec!["Hybrid", "On-site", "Remote"]);
    }

    #[test]
    fn test_inactive_openings_are_hidden() {
        let catalog = Catalog::parse(
            r#"
            [[openings]]
            id = "a"
            position = "Open"
            department = "Engineering"
            details = ""
            location = "Chennai"
            immediate_joiner = false
            mode_of_work = "Remote"
            required_openings = 1
            is_active = true

            [[openings]]
            id = "b"
            position = "Closed"
            department = "Engineering"
            details = ""
            location = "Chennai"
            immediate_joiner = false
            mode_of_work = "On-site"
            required_openings = 1
            is_active = false
            "#,
        )
        .unwrap();

        let positions: Vec<&str> = catalog
            .active_openings()
            .map(|o| o.position.as_str())
            .collect();
        assert_eq!(positions, vec!["Open"]);
        assert!(catalog.tags.is_empty());
    }

    #[test]
    fn test_known_position_and_location() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.is_known_position("DevOps Engineer"));
        assert!(!catalog.is_known_position("Astronaut"));
        assert!(catalog.is_known_location("Chennai/Hybrid"));
        assert!(!catalog.is_known_location("Mars"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, "tags = [\"Rust\"]\n").unwrap();

        let catalog = Catalog::load(Some(&path)).unwrap();

        assert_eq!(catalog.tags, vec!["Rust"]);
        assert!(catalog.openings.is_empty());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Catalog::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }
}
