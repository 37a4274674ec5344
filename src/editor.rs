//! Collection Link Editor State
//!
//! The ordered, indexable list of links the host UI edits. Indices are the
//! positions in the full list; filtered views keep them so edits always hit
//! the right row.

use crate::domain::{
    AssetLink, AssetRef, CollectionId, CollectionLinkType, DomainError, DomainResult,
    LanguageCode, LinkReference, LinkTranslation, UrlLink,
};

/// Local editing state of one collection's links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEditor {
    collection_id: CollectionId,
    language: LanguageCode,
    links: Vec<LinkReference>,
}

impl LinkEditor {
    pub fn new(collection_id: impl Into<CollectionId>, language: LanguageCode) -> Self {
        Self {
            collection_id: collection_id.into(),
            language,
            links: Vec::new(),
        }
    }

    /// Replace the list with freshly fetched server state, sorted by `order`
    pub fn load(&mut self, mut remote: Vec<LinkReference>) {
        remote.sort_by_key(LinkReference::order);
        self.links = remote;
        self.fill_missing_translations();
    }

    pub fn collection_id(&self) -> &CollectionId {
        &self.collection_id
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn links(&self) -> &[LinkReference] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LinkReference> {
        self.links.get(index)
    }

    // ========================
    // Row operations
    // ========================

    /// Append an unsaved URL row with a blank translation in the active language
    pub fn add_url_link(&mut self) -> usize {
        let link = UrlLink::new(self.collection_id.clone(), self.language.clone());
        self.links.push(LinkReference::Url(link));
        self.links.len() - 1
    }

    /// Append an unsaved asset row bound to the active language
    pub fn add_asset_link(&mut self) -> usize {
        let link = AssetLink::new(self.collection_id.clone(), self.language.clone());
        self.links.push(LinkReference::Asset(link));
        self.links.len() - 1
    }

    /// Remove the row at `index`. The server copy is only deleted on save.
    pub fn remove(&mut self, index: usize) -> Option<LinkReference> {
        if index < self.links.len() {
            Some(self.links.remove(index))
        } else {
            None
        }
    }

    /// Swap the row at `index` with the one above it.
    /// Returns `false` for the first row or an out-of-range index.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.links.len() {
            return false;
        }
        self.links.swap(index, index - 1);
        true
    }

    pub fn set_icon(&mut self, index: usize, icon: CollectionLinkType) -> DomainResult<()> {
        self.row_mut(index)?.set_icon(icon);
        Ok(())
    }

    /// Edit the active language's text of a URL row
    pub fn set_translation(&mut self, index: usize, name: &str, url: &str) -> DomainResult<()> {
        let language = self.language.clone();
        match self.row_mut(index)? {
            LinkReference::Url(link) => {
                link.ensure_translation(&language);
                if let Some(translation) = link.translation_mut(&language) {
                    translation.name = name.to_string();
                    translation.url = url.to_string();
                }
                Ok(())
            }
            LinkReference::Asset(_) => Err(DomainError::InvalidInput(format!(
                "row {} is an asset link and has no translations",
                index
            ))),
        }
    }

    /// Bind an uploaded asset to an asset row
    pub fn set_asset(&mut self, index: usize, asset: AssetRef) -> DomainResult<()> {
        match self.row_mut(index)? {
            LinkReference::Asset(link) => {
                link.asset = asset;
                Ok(())
            }
            LinkReference::Url(_) => Err(DomainError::InvalidInput(format!(
                "row {} is a url link and cannot hold an asset",
                index
            ))),
        }
    }

    fn row_mut(&mut self, index: usize) -> DomainResult<&mut LinkReference> {
        self.links
            .get_mut(index)
            .ok_or_else(|| DomainError::NotFound(format!("link row {}", index)))
    }

    // ========================
    // Language view
    // ========================

    /// Switch the active language.
    ///
    /// Appends a blank translation to every URL row missing the new language
    /// and touches nothing else. Returns how many translations were added.
    pub fn set_language(&mut self, language: LanguageCode) -> usize {
        self.language = language;
        self.fill_missing_translations()
    }

    fn fill_missing_translations(&mut self) -> usize {
        let language = &self.language;
        self.links
            .iter_mut()
            .filter_map(|link| match link {
                LinkReference::Url(url) => Some(url.ensure_translation(language)),
                LinkReference::Asset(_) => None,
            })
            .filter(|added| *added)
            .count()
    }

    /// Rows shown in the active language, with their index in the full list
    pub fn visible(&self) -> Vec<(usize, &LinkReference)> {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.is_visible_in(&self.language))
            .collect()
    }

    /// Default-language text of a URL row, used as input placeholder
    pub fn placeholder(&self, index: usize) -> Option<&LinkTranslation> {
        match self.links.get(index)? {
            LinkReference::Url(link) => link.translation(&LanguageCode::default_language()),
            LinkReference::Asset(_) => None,
        }
    }

    // ========================
    // Snapshots
    // ========================

    /// Copy of the list with `order` renumbered from position, as captured on submit
    pub fn snapshot(&self) -> Vec<LinkReference> {
        renumber(self.links.clone())
    }
}

/// Set each link's `order` to its index
pub fn renumber(mut links: Vec<LinkReference>) -> Vec<LinkReference> {
    for (index, link) in links.iter_mut().enumerate() {
        link.set_order(index as u32);
    }
    links
}

/// Check rows the backend would reject. The host form calls this before
/// submitting; the synchronizer does not.
pub fn validate(links: &[LinkReference]) -> DomainResult<()> {
    for (index, link) in links.iter().enumerate() {
        if let LinkReference::Asset(asset) = link {
            if asset.asset.id.is_none() {
                return Err(DomainError::InvalidInput(format!(
                    "asset link at row {} has no asset",
                    index
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entity;

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::new(code)
    }

    fn persisted_url(id: &str, order: u32, translations: &[(&str, &str)]) -> LinkReference {
        LinkReference::Url(UrlLink {
            id: Some(id.to_string()),
            collection_id: "12".to_string(),
            icon: CollectionLinkType::Link,
            order,
            translations: translations
                .iter()
                .map(|(code, name)| LinkTranslation {
                    id: None,
                    language_code: lang(code),
                    name: name.to_string(),
                    url: format!("https://example.ch/{}", name),
                })
                .collect(),
        })
    }

    fn persisted_asset(id: &str, order: u32, code: &str) -> LinkReference {
        let mut asset = AssetLink::new("12", lang(code));
        asset.id = Some(id.to_string());
        asset.order = order;
        asset.asset = AssetRef::with_id(format!("asset-{}", id));
        LinkReference::Asset(asset)
    }

    fn ids(links: &[LinkReference]) -> Vec<Option<String>> {
        links.iter().map(|l| l.id().cloned()).collect()
    }

    #[test]
    fn test_load_sorts_by_order() {
        let mut editor = LinkEditor::new("12", lang("de"));
        editor.load(vec![
            persisted_url("b", 1, &[("de", "b")]),
            persisted_url("a", 0, &[("de", "a")]),
        ]);
        assert_eq!(ids(editor.links()), vec![Some("a".to_string()), Some("b".to_string())]);
    }

    #[test]
    fn test_move_up_swaps_adjacent() {
        let mut editor = LinkEditor::new("12", lang("de"));
        editor.load(vec![
            persisted_url("a", 0, &[("de", "a")]),
            persisted_url("b", 1, &[("de", "b")]),
            persisted_url("c", 2, &[("de", "c")]),
        ]);

        assert!(!editor.move_up(0));
        assert!(editor.move_up(2));
        assert!(!editor.move_up(9));

        let snapshot = editor.snapshot();
        assert_eq!(
            ids(&snapshot),
            vec![Some("a".to_string()), Some("c".to_string()), Some("b".to_string())]
        );
        let orders: Vec<u32> = snapshot.iter().map(LinkReference::order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_swaps_preserve_membership() {
        let mut editor = LinkEditor::new("12", lang("de"));
        editor.load(vec![
            persisted_url("a", 0, &[("de", "a")]),
            persisted_asset("b", 1, "de"),
            persisted_url("c", 2, &[("de", "c")]),
            persisted_asset("d", 3, "de"),
        ]);
        let mut before = ids(editor.links());

        for index in [3, 2, 1, 3, 1, 2, 0] {
            editor.move_up(index);
        }

        let snapshot = editor.snapshot();
        for (index, link) in snapshot.iter().enumerate() {
            assert_eq!(link.order() as usize, index);
        }
        let mut after = ids(&snapshot);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_language_switch_appends_blank_once() {
        let mut editor = LinkEditor::new("12", lang("de"));
        editor.load(vec![
            persisted_url("a", 0, &[("de", "Datenblatt")]),
            persisted_url("b", 1, &[("de", "Katalog"), ("fr", "Catalogue")]),
            persisted_asset("c", 2, "de"),
        ]);
        let original = editor.links().to_vec();

        assert_eq!(editor.set_language(lang("fr")), 1);
        assert_eq!(editor.set_language(lang("fr")), 0);

        let LinkReference::Url(first) = &editor.links()[0] else {
            panic!("expected url link");
        };
        let LinkReference::Url(first_before) = &original[0] else {
            panic!("expected url link");
        };
        assert_eq!(first.translations.len(), 2);
        assert_eq!(first.translations[0], first_before.translations[0]);
        assert_eq!(first.translations[1], LinkTranslation::blank(lang("fr")));

        assert_eq!(editor.links()[1], original[1]);
        assert_eq!(editor.links()[2], original[2]);
        assert_eq!(ids(editor.links()), ids(&original));
    }

    #[test]
    fn test_visible_keeps_list_indices() {
        let mut editor = LinkEditor::new("12", lang("fr"));
        editor.load(vec![
            persisted_asset("a", 0, "de"),
            persisted_url("b", 1, &[("de", "b")]),
            persisted_asset("c", 2, "fr"),
        ]);

        let visible: Vec<usize> = editor.visible().into_iter().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![1, 2]);
        assert_eq!(editor.len(), 3);
    }

    #[test]
    fn test_new_rows_use_active_language() {
        let mut editor = LinkEditor::new("12", lang("it"));
        let url_row = editor.add_url_link();
        let asset_row = editor.add_asset_link();

        match editor.get(url_row) {
            Some(LinkReference::Url(link)) => {
                assert_eq!(link.translations, vec![LinkTranslation::blank(lang("it"))]);
                assert_eq!(link.collection_id, "12");
            }
            other => panic!("expected url row, got {:?}", other),
        }
        match editor.get(asset_row) {
            Some(LinkReference::Asset(link)) => {
                assert_eq!(link.language_code, lang("it"));
                assert_eq!(link.icon, CollectionLinkType::Pdf);
                assert!(link.asset.id.is_none());
            }
            other => panic!("expected asset row, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_rows() {
        let mut editor = LinkEditor::new("12", lang("de"));
        let url_row = editor.add_url_link();
        let asset_row = editor.add_asset_link();

        editor.set_translation(url_row, "Shop", "https://example.ch").unwrap();
        editor.set_icon(url_row, CollectionLinkType::Pdf).unwrap();
        editor.set_asset(asset_row, AssetRef::with_id("7")).unwrap();

        assert!(editor.set_translation(asset_row, "x", "y").is_err());
        assert!(editor.set_asset(url_row, AssetRef::default()).is_err());
        assert!(matches!(editor.set_icon(5, CollectionLinkType::Link), Err(DomainError::NotFound(_))));

        assert_eq!(editor.placeholder(url_row).map(|t| t.name.as_str()), Some("Shop"));
        assert_eq!(editor.get(url_row).map(LinkReference::icon), Some(CollectionLinkType::Pdf));
        assert!(validate(editor.links()).is_ok());
    }

    #[test]
    fn test_remove_and_validate() {
        let mut editor = LinkEditor::new("12", lang("de"));
        editor.add_url_link();
        editor.add_asset_link();

        assert!(matches!(validate(editor.links()), Err(DomainError::InvalidInput(_))));
        assert!(editor.remove(1).is_some());
        assert!(editor.remove(1).is_none());
        assert!(validate(editor.links()).is_ok());
    }
}
