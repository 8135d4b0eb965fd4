//! Saved settings, profile and UI preferences.
//!
//! Theme and language each persist under their own key as a bare JSON
//! string; the settings and profile documents persist as objects. All loads
//! go through decode-with-default, so malformed state silently resets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    checkout::{FieldErrors, is_valid_email},
    storage::{Storage, keys, load_or_default, persist},
};

/// Maximum profile bio length, in characters.
pub const BIO_LIMIT: usize = 500;

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (default).
    #[default]
    Light,

    /// Dark theme.
    Dark,
}

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default).
    #[default]
    En,

    /// Spanish.
    Es,

    /// French.
    Fr,

    /// Arabic.
    Ar,
}

impl Language {
    /// Whether this language lays out right-to-left.
    pub fn is_rtl(self) -> bool {
        self == Self::Ar
    }
}

/// Per-channel notification toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notifications {
    /// Email notifications.
    pub email: bool,

    /// Push notifications.
    pub push: bool,

    /// SMS notifications.
    pub sms: bool,

    /// Marketing mail.
    pub marketing: bool,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            sms: false,
            marketing: false,
        }
    }
}

/// The saved settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Color theme.
    pub theme: Theme,

    /// Notification toggles.
    pub notifications: Notifications,

    /// Display language.
    pub language: Language,

    /// IANA timezone name.
    pub timezone: String,

    /// ISO currency code.
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            notifications: Notifications::default(),
            language: Language::default(),
            timezone: String::from("UTC"),
            currency: String::from("USD"),
        }
    }
}

impl Settings {
    /// Restore the settings persisted in `store`, or the defaults.
    pub fn load(store: &dyn Storage) -> Self {
        load_or_default(store, keys::SETTINGS)
    }

    /// Persist this settings document.
    pub fn save(&self, store: &dyn Storage) {
        persist(store, keys::SETTINGS, self);
    }
}

/// Restore the theme persisted under its own key, or the default.
pub fn load_theme(store: &dyn Storage) -> Theme {
    load_or_default(store, keys::THEME)
}

/// Persist the theme under its own key.
pub fn save_theme(store: &dyn Storage, theme: Theme) {
    persist(store, keys::THEME, &theme);
}

/// Restore the language persisted under its own key, or the default.
pub fn load_language(store: &dyn Storage) -> Language {
    load_or_default(store, keys::LANGUAGE)
}

/// Persist the language under its own key.
pub fn save_language(store: &dyn Storage, language: Language) {
    persist(store, keys::LANGUAGE, &language);
}

/// The saved profile document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    /// Display name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Free-form location.
    pub location: String,

    /// Personal website URI.
    pub website: String,

    /// Short bio, at most [`BIO_LIMIT`] characters.
    pub bio: String,
}

impl Profile {
    /// Restore the profile persisted in `store`, or an empty one.
    pub fn load(store: &dyn Storage) -> Self {
        load_or_default(store, keys::PROFILE)
    }

    /// Persist this profile.
    pub fn save(&self, store: &dyn Storage) {
        persist(store, keys::PROFILE, self);
    }

    /// Validate the profile form, returning a message per offending field.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert("name", String::from("Name is required"));
        }

        if self.email.trim().is_empty() {
            errors.insert("email", String::from("Email is required"));
        } else if !is_valid_email(&self.email) {
            errors.insert("email", String::from("Email is invalid"));
        }

        if self.bio.chars().count() > BIO_LIMIT {
            errors.insert("bio", String::from("Bio must be 500 characters or less"));
        }

        errors
    }
}

/// Convenience holder wiring every preference document to one store.
#[derive(Debug)]
pub struct Preferences {
    store: Arc<dyn Storage>,
}

impl Preferences {
    /// Wrap a store.
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Current settings document.
    pub fn settings(&self) -> Settings {
        Settings::load(self.store.as_ref())
    }

    /// Replace the settings document.
    pub fn set_settings(&self, settings: &Settings) {
        settings.save(self.store.as_ref());
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        load_theme(self.store.as_ref())
    }

    /// Replace the theme.
    pub fn set_theme(&self, theme: Theme) {
        save_theme(self.store.as_ref(), theme);
    }

    /// Current language.
    pub fn language(&self) -> Language {
        load_language(self.store.as_ref())
    }

    /// Replace the language.
    pub fn set_language(&self, language: Language) {
        save_language(self.store.as_ref(), language);
    }

    /// Current profile document.
    pub fn profile(&self) -> Profile {
        Profile::load(self.store.as_ref())
    }

    /// Replace the profile document.
    pub fn set_profile(&self, profile: &Profile) {
        profile.save(self.store.as_ref());
    }
}
