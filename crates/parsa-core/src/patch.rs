//! # Content Patch: Typed Partial Update
//!
//! A patch names zero or more top-level sections. Each present section
//! replaces the corresponding section of the current document wholesale;
//! there is no deep merge. Absent sections are left untouched.
//!
//! Unknown top-level keys are rejected at deserialization time, so a typo in
//! an editor payload cannot silently turn into a no-op.

use serde::{Deserialize, Serialize};

use crate::content::{About, ColorPalette, ContentDocument, GalleryItem, Hero, Project, Service};

/// Partial document: one optional field per top-level section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<Hero>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_palettes: Option<Vec<ColorPalette>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<GalleryItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<About>,
}

impl ContentPatch {
    /// True when no section is present.
    pub fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }

    /// Wire names of the sections this patch replaces.
    pub fn sections(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.hero.is_some() {
            names.push("hero");
        }
        if self.services.is_some() {
            names.push("services");
        }
        if self.color_palettes.is_some() {
            names.push("colorPalettes");
        }
        if self.projects.is_some() {
            names.push("projects");
        }
        if self.gallery.is_some() {
            names.push("gallery");
        }
        if self.about.is_some() {
            names.push("about");
        }
        names
    }

    /// Merge this patch over `current`, section by section.
    pub fn apply(self, current: ContentDocument) -> ContentDocument {
        ContentDocument {
            hero: self.hero.unwrap_or(current.hero),
            services: self.services.unwrap_or(current.services),
            color_palettes: self.color_palettes.unwrap_or(current.color_palettes),
            projects: self.projects.unwrap_or(current.projects),
            gallery: self.gallery.unwrap_or(current.gallery),
            about: self.about.unwrap_or(current.about),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Office, ProjectCategory};
    use crate::testing::sample_document;
    use proptest::prelude::*;

    fn other_about() -> About {
        About {
            title: "Studio".to_string(),
            description: "Updated".to_string(),
            team: "Five designers.".to_string(),
            office: Office {
                address: "1 New St".to_string(),
                phone: "+1 555 0100".to_string(),
                email: "hello@example.com".to_string(),
                hours: "Mon-Fri 10-18".to_string(),
            },
        }
    }

    #[test]
    fn empty_patch_is_identity() {
        let doc = sample_document();
        let patch = ContentPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply(doc.clone()), doc);
    }

    #[test]
    fn about_patch_replaces_only_about() {
        let doc = sample_document();
        let patch = ContentPatch {
            about: Some(other_about()),
            ..Default::default()
        };
        assert_eq!(patch.sections(), vec!["about"]);
        let merged = patch.apply(doc.clone());
        assert_eq!(merged.about, other_about());
        assert_eq!(merged.hero, doc.hero);
        assert_eq!(merged.services, doc.services);
        assert_eq!(merged.color_palettes, doc.color_palettes);
        assert_eq!(merged.projects, doc.projects);
        assert_eq!(merged.gallery, doc.gallery);
    }

    #[test]
    fn empty_list_section_replaces_wholesale() {
        let doc = sample_document();
        let patch = ContentPatch {
            projects: Some(Vec::new()),
            ..Default::default()
        };
        let merged = patch.apply(doc);
        assert!(merged.projects.is_empty());
    }

    #[test]
    fn deserializes_camel_case_sections() {
        let patch: ContentPatch =
            serde_json::from_str(r#"{"colorPalettes": [], "gallery": []}"#).unwrap();
        assert_eq!(patch.sections(), vec!["colorPalettes", "gallery"]);
    }

    #[test]
    fn rejects_unknown_section() {
        let result = serde_json::from_str::<ContentPatch>(r#"{"heroo": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_invalid_category_in_patch() {
        let mut project = serde_json::to_value(&sample_document().projects[0]).unwrap();
        project["category"] = serde_json::json!("invalid-category");
        let body = serde_json::json!({ "projects": [project] });
        assert!(serde_json::from_value::<ContentPatch>(body).is_err());
    }

    #[test]
    fn serializes_only_present_sections() {
        let patch = ContentPatch {
            gallery: Some(Vec::new()),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "gallery": [] }));
    }

    proptest! {
        #[test]
        fn absent_sections_survive_merge(
            hero in any::<bool>(),
            services in any::<bool>(),
            projects in any::<bool>(),
            about in any::<bool>(),
        ) {
            let current = sample_document();
            let mut replacement = sample_document();
            replacement.hero.title = "Replaced".to_string();
            replacement.services.clear();
            replacement.projects[0].category = ProjectCategory::SmallRooms;
            replacement.about = other_about();

            let patch = ContentPatch {
                hero: hero.then(|| replacement.hero.clone()),
                services: services.then(|| replacement.services.clone()),
                projects: projects.then(|| replacement.projects.clone()),
                about: about.then(|| replacement.about.clone()),
                ..Default::default()
            };
            let merged = patch.apply(current.clone());

            prop_assert_eq!(&merged.hero, if hero { &replacement.hero } else { &current.hero });
            prop_assert_eq!(&merged.services, if services { &replacement.services } else { &current.services });
            prop_assert_eq!(&merged.projects, if projects { &replacement.projects } else { &current.projects });
            prop_assert_eq!(&merged.about, if about { &replacement.about } else { &current.about });
            prop_assert_eq!(&merged.color_palettes, &current.color_palettes);
            prop_assert_eq!(&merged.gallery, &current.gallery);
        }
    }
}
