//! Menu item types.

use crate::cart::AddOn;
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A dish on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    /// Catalog reference.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Short description for the menu card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base price of one portion.
    pub price: Money,
    /// Image reference or URL.
    #[serde(default)]
    pub image: String,
    /// Extras that can be added to this dish.
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
}

impl MenuItem {
    /// Create a new menu item without add-ons.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            image: String::new(),
            add_ons: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Offer an add-on for this item.
    pub fn with_add_on(mut self, add_on: AddOn) -> Self {
        self.add_ons.push(add_on);
        self
    }

    /// Check if the item offers any add-ons.
    pub fn has_add_ons(&self) -> bool {
        !self.add_ons.is_empty()
    }
}

/// The full menu, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Menu {
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Create a menu from items.
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Look up an item by id.
    pub fn get(&self, id: &ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Look up an item by id, failing if absent.
    pub fn require(&self, id: &ItemId) -> Result<&MenuItem, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ItemNotFound(id.to_string()))
    }

    /// Ids that appear more than once.
    pub fn duplicate_ids(&self) -> Vec<&ItemId> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for item in &self.items {
            if !seen.insert(&item.id) && !duplicates.contains(&&item.id) {
                duplicates.push(&item.id);
            }
        }
        duplicates
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
