//! # Content Document: The Single Root Aggregate
//!
//! All site content lives in one JSON object persisted at
//! [`layout::CONTENT_JSON`](crate::layout::CONTENT_JSON). The public renderer
//! reads it once per page, the admin editors replace or patch it, and the
//! exporter packages it.
//!
//! The typed model here guarantees shape. Format constraints that serde
//! cannot express (hex colors, unique project ids) are enforced by the
//! schema validator in `parsa-schema`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The complete site content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub hero: Hero,
    pub services: Vec<Service>,
    pub color_palettes: Vec<ColorPalette>,
    pub projects: Vec<Project>,
    pub gallery: Vec<GalleryItem>,
    pub about: About,
}

/// Landing-page hero block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub video_url: String,
    /// Ordered media references, e.g. `/images/hero-1.jpg`.
    pub background_images: Vec<String>,
}

/// One offered service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: ServiceIcon,
}

/// A named color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub name: String,
    /// `#RRGGBB` strings.
    pub colors: Vec<String>,
    pub use_case: String,
    pub description: String,
}

/// A portfolio project. `id` doubles as the public route segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: ProjectCategory,
    pub description: String,
    pub images: Vec<String>,
    pub materials: Vec<String>,
    pub specs: ProjectSpecs,
}

/// Free-form project facts, displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpecs {
    pub area: String,
    pub duration: String,
    pub year: String,
}

/// One gallery tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub image: String,
    pub caption: String,
}

/// About/contact section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub title: String,
    pub description: String,
    pub team: String,
    pub office: Office,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub hours: String,
}

/// A string did not name a variant of a closed enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Project category, the portfolio filter on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectCategory {
    Residential,
    Commercial,
    SmallRooms,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 3] = [Self::Residential, Self::Commercial, Self::SmallRooms];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::SmallRooms => "small-rooms",
        }
    }

    /// Display label used by the portfolio filter ("small rooms").
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "project category",
                value: s.to_string(),
                expected: Self::ALL.map(|c| c.as_str()).join(", "),
            })
    }
}

/// Icon tag rendered next to a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceIcon {
    Home,
    Building,
    Lightbulb,
    Wrench,
}

impl ServiceIcon {
    pub const ALL: [ServiceIcon; 4] = [Self::Home, Self::Building, Self::Lightbulb, Self::Wrench];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Building => "building",
            Self::Lightbulb => "lightbulb",
            Self::Wrench => "wrench",
        }
    }
}

impl fmt::Display for ServiceIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceIcon {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "service icon",
                value: s.to_string(),
                expected: Self::ALL.map(|i| i.as_str()).join(", "),
            })
    }
}

impl ContentDocument {
    /// Find a project by id (linear scan, document order).
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects in document order, optionally filtered by category.
    pub fn projects_in(&self, category: Option<ProjectCategory>) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn project_categories(&self) -> Vec<ProjectCategory> {
        let mut seen = Vec::new();
        for project in &self.projects {
            if !seen.contains(&project.category) {
                seen.push(project.category);
            }
        }
        seen
    }

    /// Every media reference the document points at: hero backgrounds,
    /// project images and gallery tiles. Sorted and de-duplicated.
    pub fn media_references(&self) -> BTreeSet<&str> {
        let hero = self.hero.background_images.iter();
        let projects = self.projects.iter().flat_map(|p| p.images.iter());
        let gallery = self.gallery.iter().map(|g| &g.image);
        hero.chain(projects)
            .chain(gallery)
            .map(String::as_str)
            .filter(|r| !r.is_empty())
            .collect()
    }
}
