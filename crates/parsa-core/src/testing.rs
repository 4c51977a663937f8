//! Fixtures shared by the workspace test suites.
//!
//! Compiled for this crate's own tests and, behind the `test-utils`
//! feature, for dependents' dev builds.

use crate::content::{
    About, ColorPalette, ContentDocument, GalleryItem, Hero, Office, Project, ProjectCategory,
    ProjectSpecs, Service, ServiceIcon,
};

/// A small but fully valid document: one service, one palette, two
/// projects in different categories, one gallery tile.
pub fn sample_document() -> ContentDocument {
    ContentDocument {
        hero: Hero {
            title: "Parsa Decor".to_string(),
            tagline: "Interiors with intent".to_string(),
            description: "Residential and commercial interior design.".to_string(),
            video_url: "https://youtube.com/watch?v=studio".to_string(),
            background_images: vec![
                "/images/hero-1.jpg".to_string(),
                "/images/hero-2.jpg".to_string(),
            ],
        },
        services: vec![Service {
            id: "full-renovation".to_string(),
            title: "Full renovation".to_string(),
            description: "From survey to handover.".to_string(),
            icon: ServiceIcon::Home,
        }],
        color_palettes: vec![ColorPalette {
            name: "Warm neutrals".to_string(),
            colors: vec!["#F5F0E6".to_string(), "#8B5E3C".to_string()],
            use_case: "Living rooms".to_string(),
            description: "Soft, earthy tones.".to_string(),
        }],
        projects: vec![
            Project {
                id: "villa-niavaran".to_string(),
                title: "Villa Niavaran".to_string(),
                category: ProjectCategory::Residential,
                description: "A family home.".to_string(),
                images: vec!["/images/villa-1.jpg".to_string()],
                materials: vec!["Walnut".to_string()],
                specs: ProjectSpecs {
                    area: "320 m2".to_string(),
                    duration: "5 months".to_string(),
                    year: "2023".to_string(),
                },
            },
            Project {
                id: "cafe-lale".to_string(),
                title: "Cafe Lale".to_string(),
                category: ProjectCategory::Commercial,
                description: "A corner cafe.".to_string(),
                images: vec!["/images/cafe-1.jpg".to_string()],
                materials: vec!["Terrazzo".to_string()],
                specs: ProjectSpecs {
                    area: "90 m2".to_string(),
                    duration: "2 months".to_string(),
                    year: "2024".to_string(),
                },
            },
        ],
        gallery: vec![GalleryItem {
            image: "/images/hero-1.jpg".to_string(),
            caption: "Entry hall".to_string(),
        }],
        about: About {
            title: "About us".to_string(),
            description: "A small studio.".to_string(),
            team: "Three designers.".to_string(),
            office: Office {
                address: "12 Vali Asr St".to_string(),
                phone: "+98 21 0000 0000".to_string(),
                email: "studio@example.com".to_string(),
                hours: "Sat-Wed 9-17".to_string(),
            },
        },
    }
}
