//! Explicit page state: the document the widget reads from and writes to,
//! and the overlay layer where notifications live.

use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

use crate::notifications::NotificationLayer;

/// Marker attribute of "add to cart" controls.
pub const ADD_TO_CART_ATTRIBUTE: &str = "data-add-to-cart";
/// Attribute carrying the product identifier on a control.
pub const PRODUCT_ID_ATTRIBUTE: &str = "data-product-id";
/// Attribute carrying the optional variant identifier on a control.
pub const VARIANT_ID_ATTRIBUTE: &str = "data-variant-id";
/// Id of the quantity input.
pub const QUANTITY_ID: &str = "quantity";
/// Id of the cart counter.
pub const CART_COUNT_ID: &str = "cart-count";
/// Class that hides the cart counter.
pub const HIDDEN_CLASS: &str = "hidden";

/// Product page template shipped with the binary.
pub const PRODUCT_PAGE_TEMPLATE: &str = include_str!("../assets/product_page.toml");

/// Errors raised while loading a page template.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The template file could not be read.
    #[error("failed to read page template: {0}")]
    IoError(#[from] std::io::Error),
    /// The template is not valid TOML or does not describe a page.
    #[error("failed to parse page template: {0}")]
    DeserializeError(#[from] toml::de::Error),
}

/// A single element of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Element {
    pub id: Option<String>,
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    /// Class list, in document order.
    pub classes: Vec<String>,
    pub text: String,
    /// Form value; only input-like elements carry one.
    pub value: Option<String>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }
}

/// The document: its cookie string and its elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Cookies visible to the page, as `name=value; name2=value2`.
    pub cookie: String,
    pub elements: Vec<Element>,
}

impl Document {
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|element| element.id.as_deref() == Some(id))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .find(|element| element.id.as_deref() == Some(id))
    }

    /// Indices of elements carrying `attribute`, in document order.
    pub fn elements_with_attribute(&self, attribute: &str) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.has_attribute(attribute))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Everything the widget can see and change.
#[derive(Debug, Default)]
pub struct Page {
    pub document: Document,
    pub notifications: NotificationLayer,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            notifications: NotificationLayer::default(),
        }
    }

    /// Builds a page from a TOML template.
    pub fn from_toml(template: &str) -> Result<Self, PageError> {
        let document: Document = toml::from_str(template)?;
        Ok(Self::new(document))
    }

    /// Reads and parses a TOML template from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let template = std::fs::read_to_string(path)?;
        Self::from_toml(&template)
    }
}
