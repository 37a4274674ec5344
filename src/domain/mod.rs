//! Domain Layer
//!
//! Contains the storefront entities and core abstractions.
//! This layer has no I/O (serde only, for the GraphQL wire shapes).

mod entity;
pub(crate) mod id_repr;
mod language;
mod link;
mod link_input;
mod order;
mod category;
mod cart;

pub use entity::{Entity, DomainError, DomainResult};
pub use language::{LanguageCode, DEFAULT_LANGUAGE};
pub use link::{
    AssetLink, AssetRef, CollectionId, CollectionLinkType, LinkId, LinkReference,
    LinkTranslation, UrlLink,
};
pub use link_input::{
    CreateAssetLinkInput, CreateLink, CreateUrlLinkInput, UpdateAssetLinkInput, UpdateLink,
    UpdateUrlLinkInput,
};
pub use order::{
    Adjustment, Order, OrderCustomer, OrderLine, OrderList, OrderVariant, TaxLine, VariantOption,
};
pub use category::{Category, CategoryId, ProductEntry, ROOT_CATEGORY};
pub use cart::{Cart, CartFee, CartItem, CartTax};
