//! # Response Envelopes
//!
//! Every successful response body is a [`Document`]: `{"data": ...}`.
//!
//! ## Shapes
//! ```text
//! single      {"data": {"id": "4", "type": "item", "attributes": {...}}}
//! collection  {"data": [{"id": "4", "type": "item", "attributes": {...}}, ...]}
//! empty       {"data": {"message": null, "status_code": 200}}
//! ```
//!
//! ## Attribute Coercion
//! - `id` is always a string at the top level of a resource object
//! - `unit_price` is always a JSON float, even for whole amounts (`1000.0`)
//! - `merchant_id` stays an integer inside `attributes`

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error_map::ErrorMessage;
use crate::types::{Item, Merchant};
use crate::{ITEM_TYPE, MERCHANT_TYPE};

// =============================================================================
// Resource Trait
// =============================================================================

/// An entity that can be rendered as a resource object.
pub trait Resource {
    /// Singular collection name, written as `type`.
    const TYPE: &'static str;

    /// The attribute set, serialized in declaration order.
    type Attributes: Serialize;

    /// Store identifier.
    fn id(&self) -> i64;

    /// Attributes with their wire types applied.
    fn attributes(&self) -> Self::Attributes;
}

/// Wire attributes of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemAttributes {
    pub name: String,
    pub description: String,
    pub unit_price: f64,
    pub merchant_id: i64,
}

/// Wire attributes of a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MerchantAttributes {
    pub name: String,
}

impl Resource for Item {
    const TYPE: &'static str = ITEM_TYPE;
    type Attributes = ItemAttributes;

    fn id(&self) -> i64 {
        self.id
    }

    fn attributes(&self) -> ItemAttributes {
        ItemAttributes {
            name: self.name.clone(),
            description: self.description.clone(),
            unit_price: self.unit_price.as_f64(),
            merchant_id: self.merchant_id,
        }
    }
}

impl Resource for Merchant {
    const TYPE: &'static str = MERCHANT_TYPE;
    type Attributes = MerchantAttributes;

    fn id(&self) -> i64 {
        self.id
    }

    fn attributes(&self) -> MerchantAttributes {
        MerchantAttributes {
            name: self.name.clone(),
        }
    }
}

// =============================================================================
// Documents
// =============================================================================

/// One resource inside a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceObject<A> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: A,
}

impl<A> ResourceObject<A> {
    /// Renders a resource, stringifying its id.
    pub fn new<R>(resource: &R) -> Self
    where
        R: Resource<Attributes = A>,
    {
        ResourceObject {
            id: resource.id().to_string(),
            kind: R::TYPE,
            attributes: resource.attributes(),
        }
    }
}

/// The `{"data": ...}` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document<T> {
    pub data: T,
}

/// Document holding one resource.
pub type Single<R> = Document<ResourceObject<<R as Resource>::Attributes>>;

/// Document holding a list of resources.
pub type Collection<R> = Document<Vec<ResourceObject<<R as Resource>::Attributes>>>;

impl<A> Document<ResourceObject<A>> {
    /// Wraps one entity.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::{Document, Merchant};
    /// use chrono::Utc;
    ///
    /// let merchant = Merchant {
    ///     id: 7,
    ///     name: "Ballmart".to_string(),
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    /// let json = serde_json::to_value(Document::single(&merchant)).unwrap();
    /// assert_eq!(json["data"]["id"], "7");
    /// assert_eq!(json["data"]["type"], "merchant");
    /// assert_eq!(json["data"]["attributes"]["name"], "Ballmart");
    /// ```
    pub fn single<R>(resource: &R) -> Self
    where
        R: Resource<Attributes = A>,
    {
        Document {
            data: ResourceObject::new(resource),
        }
    }
}

impl<A> Document<Vec<ResourceObject<A>>> {
    /// Wraps a list of entities, preserving their order.
    pub fn collection<R>(resources: &[R]) -> Self
    where
        R: Resource<Attributes = A>,
    {
        Document {
            data: resources.iter().map(ResourceObject::new).collect(),
        }
    }
}

impl Document<ErrorMessage> {
    /// The success payload of a merchant search that matched nothing.
    ///
    /// This is a 200, not an error: the body signals absence while the status
    /// says the search itself was fine.
    pub fn empty_result() -> Self {
        Document {
            data: ErrorMessage::new(None, 200),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
