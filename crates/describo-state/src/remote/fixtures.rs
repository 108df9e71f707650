//! Canned payloads served by the mock backend.

use chrono::{DateTime, Utc};
use describo_core::{
    PaymentMethod, ProfileStore, Subscription, SubscriptionPlan, SubscriptionStatus,
    UserProfile, UserRole, UserStats,
};
use serde_json::{json, Value};

/// `GET /stores` body.
pub(crate) fn stores_payload() -> Value {
    json!([
        {
            "id": 1,
            "name": "Loja Principal",
            "type": "fashion",
            "ownerUserId": "123",
            "createdAt": "2024-01-10T09:00:00Z",
            "updatedAt": "2024-03-02T14:20:00Z",
            "settings": {
                "writingTone": "friendly",
                "formatPreferences": {
                    "includeSpecifications": true,
                    "includeBenefits": true,
                    "maxDescriptionLength": 1200,
                    "useEmojis": true,
                    "highlightKeyFeatures": true
                },
                "defaultCategory": "Roupas",
                "seoOptimization": true
            },
            "ecommerceIntegration": {
                "platform": "Shopify",
                "apiKey": "shpat_demo_1a2b3c",
                "storeUrl": "https://loja-principal.myshopify.com",
                "isActive": true,
                "lastSyncDate": "2024-03-25T08:00:00Z",
                "syncProducts": true,
                "syncInventory": true
            }
        },
        {
            "id": 2,
            "name": "Tech Store",
            "type": "electronics",
            "ownerUserId": "123",
            "createdAt": "2024-02-05T11:30:00Z",
            "updatedAt": "2024-02-05T11:30:00Z",
            "settings": {
                "writingTone": "technical",
                "formatPreferences": {
                    "includeSpecifications": true,
                    "includeBenefits": false,
                    "maxDescriptionLength": 2000,
                    "useEmojis": false,
                    "highlightKeyFeatures": true
                },
                "defaultCategory": null,
                "seoOptimization": false
            },
            "ecommerceIntegration": null
        }
    ])
}

/// `GET /products` body.
pub(crate) fn products_payload() -> Value {
    json!([
        {
            "id": 1,
            "product_name": "Camiseta Básica Algodão",
            "store_name": "Loja Principal",
            "category": "Roupas",
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z",
            "description_generated": "Camiseta 100% algodão, macia e respirável."
        },
        {
            "id": 2,
            "product_name": "Fone Bluetooth X200",
            "store_name": "Tech Store",
            "category": "Eletrônicos",
            "created_at": "2024-03-02T12:00:00Z",
            "updated_at": "2024-03-04T16:45:00Z",
            "description_generated": {
                "blocks": [
                    { "key": "h1", "text": "Som sem fios", "type": "header-two" },
                    { "key": "p1", "text": "Até 30 horas de bateria." }
                ]
            }
        },
        {
            "id": 3,
            "product_name": "Calça Jeans Slim",
            "store_name": "Loja Principal",
            "category": "Roupas",
            "created_at": "2024-03-05T09:15:00Z",
            "updated_at": "2024-03-05T09:15:00Z",
            "description_generated": null
        },
        {
            "id": 4,
            "product_name": "Carregador USB-C 65W",
            "store_name": "Tech Store",
            "category": "Acessórios",
            "created_at": "2024-03-06T08:00:00Z",
            "updated_at": "2024-03-06T08:00:00Z",
            "description_generated": "Carregamento rápido para notebook e celular."
        },
        {
            "id": 5,
            "product_name": "Jaqueta Corta-Vento",
            "store_name": "Loja Principal",
            "category": "Roupas",
            "created_at": "2024-03-07T17:30:00Z",
            "updated_at": "2024-03-07T17:30:00Z",
            "description_generated": null
        },
        {
            "id": 6,
            "product_name": "Mouse Sem Fio Ergonômico",
            "store_name": "Tech Store",
            "category": "Acessórios",
            "created_at": "2024-03-08T13:10:00Z",
            "updated_at": "2024-03-08T13:10:00Z",
            "description_generated": "Design ergonômico com sensor de 1600 DPI."
        },
        {
            "id": 7,
            "product_name": "Tênis Casual Couro",
            "store_name": "Loja Principal",
            "category": "Calçados",
            "created_at": "2024-03-09T10:40:00Z",
            "updated_at": "2024-03-09T10:40:00Z",
            "description_generated": null
        }
    ])
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// The profile shown on the profile screen of the demo account.
pub fn demo_profile() -> UserProfile {
    UserProfile {
        name: "João Silva".to_string(),
        email: "joao.silva@loja.com".to_string(),
        phone: "(11) 98765-4321".to_string(),
        role: UserRole::Editor,
        department: "Marketing Digital".to_string(),
        store: ProfileStore {
            id: "LOJA001".to_string(),
            name: "Loja Principal".to_string(),
            address: "Rua das Flores, 123 - São Paulo, SP".to_string(),
        },
        avatar: "https://i.pravatar.cc/150?img=1".to_string(),
        subscription: Subscription {
            plan: SubscriptionPlan::Pro,
            status: SubscriptionStatus::Active,
            // 2024-04-15T00:00:00Z
            next_billing: Some(timestamp(1_713_139_200)),
            payment_method: PaymentMethod::CreditCard,
            auto_renew: true,
        },
        stats: UserStats {
            total_descriptions: 156,
            // 2024-03-27T15:30:00Z
            last_active: timestamp(1_711_553_400),
            average_rating: 4.8,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use describo_core::{Product, Store};

    #[test]
    fn test_payloads_parse() {
        let stores: Vec<Store> = serde_json::from_value(stores_payload()).unwrap();
        assert_eq!(stores.len(), 2);
        assert!(stores[0].has_active_integration());
        assert!(stores[1].ecommerce_integration.is_none());

        let products: Vec<Product> = serde_json::from_value(products_payload()).unwrap();
        assert_eq!(products.len(), 7);
        assert!(products[1].has_description());
        assert!(!products[2].has_description());
    }

    #[test]
    fn test_demo_profile_dates() {
        let profile = demo_profile();
        assert_eq!(
            profile.subscription.next_billing.unwrap().to_rfc3339(),
            "2024-04-15T00:00:00+00:00"
        );
        assert_eq!(profile.stats.last_active.to_rfc3339(), "2024-03-27T15:30:00+00:00");
    }
}
