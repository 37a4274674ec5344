//! Link Mutation Inputs
//!
//! Payloads sent to the admin API. URL links always carry their complete
//! translation array; the backend replaces the stored state on every save.

use serde::Serialize;

use super::link::{AssetLink, CollectionId, CollectionLinkType, LinkId, LinkTranslation, UrlLink};
use super::language::LanguageCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlLinkInput {
    pub collection_id: CollectionId,
    pub icon: CollectionLinkType,
    pub order: u32,
    pub translations: Vec<LinkTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetLinkInput {
    pub collection_id: CollectionId,
    pub icon: CollectionLinkType,
    pub order: u32,
    pub language_code: LanguageCode,
    pub asset_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUrlLinkInput {
    pub id: LinkId,
    pub collection_id: CollectionId,
    pub icon: CollectionLinkType,
    pub order: u32,
    pub translations: Vec<LinkTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetLinkInput {
    pub id: LinkId,
    pub collection_id: CollectionId,
    pub icon: CollectionLinkType,
    pub order: u32,
    pub language_code: LanguageCode,
    pub asset_id: Option<String>,
}

/// Create operation for an unsaved link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateLink {
    Url(CreateUrlLinkInput),
    Asset(CreateAssetLinkInput),
}

impl CreateLink {
    pub fn order(&self) -> u32 {
        match self {
            CreateLink::Url(input) => input.order,
            CreateLink::Asset(input) => input.order,
        }
    }
}

impl From<&UrlLink> for CreateLink {
    fn from(link: &UrlLink) -> Self {
        CreateLink::Url(CreateUrlLinkInput {
            collection_id: link.collection_id.clone(),
            icon: link.icon,
            order: link.order,
            translations: link.translations.clone(),
        })
    }
}

impl From<&AssetLink> for CreateLink {
    fn from(link: &AssetLink) -> Self {
        CreateLink::Asset(CreateAssetLinkInput {
            collection_id: link.collection_id.clone(),
            icon: link.icon,
            order: link.order,
            language_code: link.language_code.clone(),
            asset_id: link.asset.id.clone(),
        })
    }
}

/// Update operation for a persisted link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateLink {
    Url(UpdateUrlLinkInput),
    Asset(UpdateAssetLinkInput),
}

impl UpdateLink {
    pub fn id(&self) -> &LinkId {
        match self {
            UpdateLink::Url(input) => &input.id,
            UpdateLink::Asset(input) => &input.id,
        }
    }

    pub fn order(&self) -> u32 {
        match self {
            UpdateLink::Url(input) => input.order,
            UpdateLink::Asset(input) => input.order,
        }
    }

    pub fn from_url(id: LinkId, link: &UrlLink) -> Self {
        UpdateLink::Url(UpdateUrlLinkInput {
            id,
            collection_id: link.collection_id.clone(),
            icon: link.icon,
            order: link.order,
            translations: link.translations.clone(),
        })
    }

    pub fn from_asset(id: LinkId, link: &AssetLink) -> Self {
        UpdateLink::Asset(UpdateAssetLinkInput {
            id,
            collection_id: link.collection_id.clone(),
            icon: link.icon,
            order: link.order,
            language_code: link.language_code.clone(),
            asset_id: link.asset.id.clone(),
        })
    }
}
