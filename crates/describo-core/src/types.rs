//! # Domain Types
//!
//! Core domain types used throughout the Describo dashboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │     Store       │   │  StoreSettings  │   │ EcommerceIntegration│   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (i64)       │──►│  writing_tone   │   │  platform           │   │
//! │  │  name, type     │   │  format prefs   │   │  api_key, store_url │   │
//! │  │  settings       │   │  seo flag       │   │  sync flags         │   │
//! │  │  integration?   │──────────────────────►  │  last_sync_date?    │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │  UserProfile    │   │   Subscription      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (i64)       │   │  name, email    │──►│  plan, status       │   │
//! │  │  product_name   │   │  role           │   │  next_billing?      │   │
//! │  │  description?   │   │  stats          │   │  payment_method     │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Naming
//! Store and profile records travel in camelCase; product records keep the
//! snake_case column names the products endpoint returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of a store inside the store collection.
pub type StoreId = i64;

/// Identifier of a product in the catalog.
pub type ProductId = i64;

// =============================================================================
// Store Settings
// =============================================================================

/// Voice used when generating product descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum WritingTone {
    #[default]
    Formal,
    Casual,
    Technical,
    Friendly,
}

impl WritingTone {
    /// Every tone, in the order the settings screen lists them.
    pub const ALL: [WritingTone; 4] = [
        WritingTone::Formal,
        WritingTone::Casual,
        WritingTone::Technical,
        WritingTone::Friendly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WritingTone::Formal => "formal",
            WritingTone::Casual => "casual",
            WritingTone::Technical => "technical",
            WritingTone::Friendly => "friendly",
        }
    }
}

impl std::str::FromStr for WritingTone {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WritingTone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::ValidationError::NotAllowed {
                field: "writingTone".to_string(),
                allowed: WritingTone::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            })
    }
}

/// Formatting switches applied to every generated description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FormatPreferences {
    pub include_specifications: bool,
    pub include_benefits: bool,
    /// Character budget, `MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH`.
    pub max_description_length: u32,
    pub use_emojis: bool,
    pub highlight_key_features: bool,
}

impl Default for FormatPreferences {
    fn default() -> Self {
        FormatPreferences {
            include_specifications: true,
            include_benefits: true,
            max_description_length: 1000,
            use_emojis: false,
            highlight_key_features: true,
        }
    }
}

/// Per-store description generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub writing_tone: WritingTone,
    pub format_preferences: FormatPreferences,
    pub default_category: Option<String>,
    pub seo_optimization: bool,
}

// =============================================================================
// E-commerce Integration
// =============================================================================

/// Marketplaces a store can be connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MarketplacePlatform {
    Shopify,
    WooCommerce,
    Magento,
    PrestaShop,
    #[serde(rename = "VTEX")]
    Vtex,
    MercadoLivre,
    Other,
}

impl std::fmt::Display for MarketplacePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MarketplacePlatform::Shopify => "Shopify",
            MarketplacePlatform::WooCommerce => "WooCommerce",
            MarketplacePlatform::Magento => "Magento",
            MarketplacePlatform::PrestaShop => "PrestaShop",
            MarketplacePlatform::Vtex => "VTEX",
            MarketplacePlatform::MercadoLivre => "MercadoLivre",
            MarketplacePlatform::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Connection between a store and an external marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EcommerceIntegration {
    pub platform: MarketplacePlatform,
    pub api_key: String,
    pub store_url: String,
    pub is_active: bool,
    #[ts(as = "Option<String>")]
    pub last_sync_date: Option<DateTime<Utc>>,
    pub sync_products: bool,
    pub sync_inventory: bool,
}

// =============================================================================
// Store
// =============================================================================

/// A seller's shop with its description settings.
///
/// `id`, `created_at` and `updated_at` are owned by the store collection;
/// callers build a [`StoreDraft`] and let the collection stamp the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(rename = "type")]
    pub store_type: String,
    pub owner_user_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    pub settings: StoreSettings,
    pub ecommerce_integration: Option<EcommerceIntegration>,
}

impl Store {
    /// Builds a store record from a draft plus collection-assigned fields.
    pub fn from_draft(id: StoreId, draft: StoreDraft, now: DateTime<Utc>) -> Self {
        Store {
            id,
            name: draft.name,
            store_type: draft.store_type,
            owner_user_id: draft.owner_user_id,
            created_at: now,
            updated_at: now,
            settings: draft.settings,
            ecommerce_integration: draft.ecommerce_integration,
        }
    }

    /// Whether an active marketplace integration is configured.
    pub fn has_active_integration(&self) -> bool {
        self.ecommerce_integration
            .as_ref()
            .is_some_and(|integration| integration.is_active)
    }
}

/// A store as entered on the "new store" form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub store_type: String,
    pub owner_user_id: String,
    pub settings: StoreSettings,
    pub ecommerce_integration: Option<EcommerceIntegration>,
}

// =============================================================================
// Product
// =============================================================================

/// One block of a structured rich-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RichTextBlock {
    pub key: String,
    pub text: String,
    #[serde(rename = "type", default = "default_block_type")]
    pub block_type: String,
}

fn default_block_type() -> String {
    "unstyled".to_string()
}

/// A structured description as saved by the rich-text editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RichTextDocument {
    pub blocks: Vec<RichTextBlock>,
}

/// A generated description: either plain text or an editor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum ProductDescription {
    Text(String),
    Document(RichTextDocument),
}

impl ProductDescription {
    /// Flattens the description to plain text, one line per block.
    pub fn plain_text(&self) -> String {
        match self {
            ProductDescription::Text(text) => text.clone(),
            ProductDescription::Document(doc) => doc
                .blocks
                .iter()
                .map(|block| block.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ProductDescription::Text(text) => text.trim().is_empty(),
            ProductDescription::Document(doc) => {
                doc.blocks.iter().all(|block| block.text.trim().is_empty())
            }
        }
    }
}

/// A product listed on the products screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub store_name: String,
    pub category: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    pub description_generated: Option<ProductDescription>,
}

impl Product {
    /// Whether a non-empty description has been generated for this product.
    pub fn has_description(&self) -> bool {
        self.description_generated
            .as_ref()
            .is_some_and(|description| !description.is_empty())
    }
}

// =============================================================================
// User Profile & Subscription
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SubscriptionPlan {
    Free,
    Pro,
    Enterprise,
}

impl SubscriptionPlan {
    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionPlan::Free)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Boleto,
    Pix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    #[ts(as = "Option<String>")]
    pub next_billing: Option<DateTime<Utc>>,
    pub payment_method: PaymentMethod,
    pub auto_renew: bool,
}

/// The store a profile belongs to, as shown on the profile card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfileStore {
    pub id: String,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_descriptions: u32,
    #[ts(as = "String")]
    pub last_active: DateTime<Utc>,
    pub average_rating: f32,
}

/// The profile/subscription panel's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub department: String,
    pub store: ProfileStore,
    pub avatar: String,
    pub subscription: Subscription,
    pub stats: UserStats,
}
