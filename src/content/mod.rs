//! Landing-page content and admit-card access, persisted through an injected
//! key-value store. Every operation here is best-effort: storage failures are
//! logged and callers get a default value back.

pub mod admit_cards;
pub mod landing;
pub mod storage;

pub use admit_cards::{AdmitCardAccess, AdmitCardGrant, ADMIT_CARD_ACCESS_KEY};
pub use landing::{LandingContent, LandingContentStore, LANDING_CONTENT_KEY};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
