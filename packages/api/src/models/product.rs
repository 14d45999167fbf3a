//! # Product model
//!
//! [`Product`] is a record as listed by the API. New products are described by
//! a [`ProductDraft`], which always carries the [`ImageUpload`] the insert
//! endpoint requires. Both create and update travel as multipart form data;
//! [`ProductDraft::form_parts`] and [`Product::form_parts`] build the parts.

use serde::{Deserialize, Serialize};

use super::de;
use crate::backend::FormPart;

/// The two product lines the shop sells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Yogurt,
    Mermelada,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Yogurt, Category::Mermelada];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Yogurt => "Yogurt",
            Category::Mermelada => "Mermelada",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value.trim())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product as returned by `GET /product`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_product: Option<i64>,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub nutritional_information: String,
    #[serde(default)]
    pub category: Category,
    #[serde(deserialize_with = "de::decimal")]
    pub price: f64,
    #[serde(deserialize_with = "de::integer")]
    pub stock: i64,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub url_image: String,
}

/// Binary image forwarded to the API as the multipart part `file`.
#[derive(Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type
                .filter(|ct| !ct.is_empty())
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Fields of a product that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub nutritional_information: String,
    pub category: Category,
    pub price: f64,
    pub stock: i64,
    pub image: ImageUpload,
}

fn text_parts(
    name: &str,
    description: &str,
    nutritional_information: &str,
    category: Category,
    price: f64,
    stock: i64,
) -> Vec<FormPart> {
    vec![
        FormPart::text("Name", name),
        FormPart::text("Description", description),
        FormPart::text("NutritionalInformation", nutritional_information),
        FormPart::text("Category", category.as_str()),
        FormPart::text("Price", price.to_string()),
        FormPart::text("Stock", stock.to_string()),
    ]
}

impl ProductDraft {
    /// Multipart body for `POST /product/insert`.
    pub fn form_parts(&self) -> Vec<FormPart> {
        let mut parts = text_parts(
            &self.name,
            &self.description,
            &self.nutritional_information,
            self.category,
            self.price,
            self.stock,
        );
        parts.push(FormPart::file("file", self.image.clone()));
        parts
    }
}

impl Product {
    /// Multipart body for `PUT /product/Update`; the image part is optional.
    pub fn form_parts(&self, image: Option<&ImageUpload>) -> Vec<FormPart> {
        let mut parts = Vec::new();
        if let Some(id) = self.id_product {
            parts.push(FormPart::text("IdProduct", id.to_string()));
        }
        parts.extend(text_parts(
            &self.name,
            &self.description,
            &self.nutritional_information,
            self.category,
            self.price,
            self.stock,
        ));
        if let Some(image) = image {
            parts.push(FormPart::file("file", image.clone()));
        }
        parts
    }
}
