//! Collection Link Entities
//!
//! A collection carries an ordered list of links. Each link is either a URL
//! with one translation per language, or a single-language uploaded asset.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::id_repr;
use super::language::LanguageCode;

/// Server-assigned link identifier
pub type LinkId = String;

/// Identifier of the collection owning a link
pub type CollectionId = String;

/// Icon shown next to a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionLinkType {
    #[default]
    Link,
    Pdf,
}

impl CollectionLinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionLinkType::Link => "LINK",
            CollectionLinkType::Pdf => "PDF",
        }
    }
}

/// Per-language text of a URL link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTranslation {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "id_repr::option::deserialize"
    )]
    pub id: Option<String>,
    pub language_code: LanguageCode,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl LinkTranslation {
    /// Empty translation inserted when a language view is first opened
    pub fn blank(language_code: LanguageCode) -> Self {
        Self {
            id: None,
            language_code,
            name: String::new(),
            url: String::new(),
        }
    }
}

/// Reference to an uploaded asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssetRef {
    #[serde(default, deserialize_with = "id_repr::option::deserialize")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl AssetRef {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }
}

/// Link to an external URL, translated per language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlLink {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "id_repr::option::deserialize"
    )]
    pub id: Option<LinkId>,
    #[serde(deserialize_with = "id_repr::deserialize")]
    pub collection_id: CollectionId,
    #[serde(default)]
    pub icon: CollectionLinkType,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub translations: Vec<LinkTranslation>,
}

impl UrlLink {
    /// New unsaved URL row with a blank translation for `language`
    pub fn new(collection_id: impl Into<CollectionId>, language: LanguageCode) -> Self {
        Self {
            id: None,
            collection_id: collection_id.into(),
            icon: CollectionLinkType::Link,
            order: 0,
            translations: vec![LinkTranslation::blank(language)],
        }
    }

    pub fn translation(&self, language: &LanguageCode) -> Option<&LinkTranslation> {
        self.translations.iter().find(|t| &t.language_code == language)
    }

    pub fn translation_mut(&mut self, language: &LanguageCode) -> Option<&mut LinkTranslation> {
        self.translations.iter_mut().find(|t| &t.language_code == language)
    }

    /// Append a blank translation for `language` unless one exists.
    /// Returns whether one was appended.
    pub fn ensure_translation(&mut self, language: &LanguageCode) -> bool {
        if self.translation(language).is_some() {
            return false;
        }
        self.translations.push(LinkTranslation::blank(language.clone()));
        true
    }
}

/// Link to an uploaded asset, bound to a single language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLink {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "id_repr::option::deserialize"
    )]
    pub id: Option<LinkId>,
    #[serde(deserialize_with = "id_repr::deserialize")]
    pub collection_id: CollectionId,
    #[serde(default)]
    pub icon: CollectionLinkType,
    #[serde(default)]
    pub order: u32,
    pub language_code: LanguageCode,
    #[serde(default)]
    pub asset: AssetRef,
}

impl AssetLink {
    /// New unsaved asset row with no asset bound yet
    pub fn new(collection_id: impl Into<CollectionId>, language: LanguageCode) -> Self {
        Self {
            id: None,
            collection_id: collection_id.into(),
            icon: CollectionLinkType::Pdf,
            order: 0,
            language_code: language,
            asset: AssetRef::default(),
        }
    }
}

/// A collection link, tagged by `__typename` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum LinkReference {
    #[serde(rename = "CollectionUrlLink")]
    Url(UrlLink),
    #[serde(rename = "CollectionAssetLink")]
    Asset(AssetLink),
}

impl LinkReference {
    pub fn collection_id(&self) -> &CollectionId {
        match self {
            LinkReference::Url(link) => &link.collection_id,
            LinkReference::Asset(link) => &link.collection_id,
        }
    }

    pub fn icon(&self) -> CollectionLinkType {
        match self {
            LinkReference::Url(link) => link.icon,
            LinkReference::Asset(link) => link.icon,
        }
    }

    pub fn set_icon(&mut self, icon: CollectionLinkType) {
        match self {
            LinkReference::Url(link) => link.icon = icon,
            LinkReference::Asset(link) => link.icon = icon,
        }
    }

    pub fn order(&self) -> u32 {
        match self {
            LinkReference::Url(link) => link.order,
            LinkReference::Asset(link) => link.order,
        }
    }

    pub fn set_order(&mut self, order: u32) {
        match self {
            LinkReference::Url(link) => link.order = order,
            LinkReference::Asset(link) => link.order = order,
        }
    }

    /// Whether the row is shown while editing `language`.
    /// URL links are always shown; asset links only in their own language.
    pub fn is_visible_in(&self, language: &LanguageCode) -> bool {
        match self {
            LinkReference::Url(_) => true,
            LinkReference::Asset(link) => &link.language_code == language,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LinkReference::Url(_) => "CollectionUrlLink",
            LinkReference::Asset(_) => "CollectionAssetLink",
        }
    }
}

impl Entity for LinkReference {
    type Id = LinkId;

    fn id(&self) -> Option<&Self::Id> {
        match self {
            LinkReference::Url(link) => link.id.as_ref(),
            LinkReference::Asset(link) => link.id.as_ref(),
        }
    }
}
