use serde::{Deserialize, Serialize};

use crate::content::storage::{load_json, save_json, KeyValueStore};

pub const LANDING_CONTENT_KEY: &str = "landingPageContent";

/// The editable copy behind the landing page, stored as one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingContent {
    pub home: HomeSection,
    pub about: AboutSection,
    pub gallery: GallerySection,
    pub contact: ContactSection,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeSection {
    pub title: String,
    pub subtitle: String,
    pub hero_image: String,
    pub cta_text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutSection {
    pub heading: String,
    pub body: String,
    pub mission: String,
    pub vision: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GallerySection {
    pub heading: String,
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryItem {
    pub id: u32,
    pub title: String,
    pub image: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSection {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub office_hours: String,
}

impl Default for LandingContent {
    fn default() -> Self {
        let gallery_item = |id: u32, title: &str, image: &str, caption: &str| GalleryItem {
            id,
            title: title.to_string(),
            image: image.to_string(),
            caption: caption.to_string(),
        };

        Self {
            home: HomeSection {
                title: "Welcome to Our School".to_string(),
                subtitle: "Nurturing curious minds for a brighter tomorrow".to_string(),
                hero_image: "/images/hero.jpg".to_string(),
                cta_text: "Apply for Admission".to_string(),
            },
            about: AboutSection {
                heading: "About Us".to_string(),
                body: "We are a community of teachers, students and families committed \
                       to excellence in learning and character."
                    .to_string(),
                mission: "To provide quality education accessible to every child.".to_string(),
                vision: "Graduates who lead with knowledge and integrity.".to_string(),
                image: "/images/about.jpg".to_string(),
            },
            gallery: GallerySection {
                heading: "Campus Life".to_string(),
                items: vec![
                    gallery_item(1, "Science Fair", "/images/gallery/science-fair.jpg", "Annual science fair projects"),
                    gallery_item(2, "Sports Day", "/images/gallery/sports-day.jpg", "Inter-house athletics"),
                    gallery_item(3, "Library", "/images/gallery/library.jpg", "Our reading room"),
                ],
            },
            contact: ContactSection {
                address: "123 School Road".to_string(),
                phone: "+1 555 0100".to_string(),
                email: "info@school.example".to_string(),
                office_hours: "Sun-Thu, 8:00-15:00".to_string(),
            },
        }
    }
}

pub struct LandingContentStore<S> {
    storage: S,
}

impl<S: KeyValueStore> LandingContentStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current document. Seeds storage with the default when nothing is saved.
    pub fn load(&self) -> LandingContent {
        match load_json(&self.storage, LANDING_CONTENT_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => {
                let content = LandingContent::default();
                self.save(&content);
                content
            }
            Err(e) => {
                tracing::error!("❌ Failed to read landing content, using default: {}", e);
                LandingContent::default()
            }
        }
    }

    /// Replace the whole document. Failures are logged, not returned.
    pub fn save(&self, content: &LandingContent) {
        if let Err(e) = save_json(&self.storage, LANDING_CONTENT_KEY, content) {
            tracing::error!("❌ Failed to save landing content: {}", e);
        }
    }

    /// Load, apply `edit`, and write the whole document back.
    pub fn update<F>(&self, edit: F) -> LandingContent
    where
        F: FnOnce(&mut LandingContent),
    {
        let mut content = self.load();
        edit(&mut content);
        self.save(&content);
        content
    }

    /// Discard edits and restore the default document
    pub fn reset(&self) -> LandingContent {
        let content = LandingContent::default();
        self.save(&content);
        content
    }
}
