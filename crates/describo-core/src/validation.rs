//! # Validation Module
//!
//! Form and settings validation for the dashboard.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen forms (this module)                                   │
//! │  ├── Required fields, password confirmation, minimum length            │
//! │  └── Runs before any remote call; failures shown as form messages      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: State managers (describo-state)                              │
//! │  ├── Store settings bounds, store drafts, integrations                 │
//! │  └── Rejected before the simulated round-trip starts                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote boundary                                              │
//! │  └── Credentials accepted or refused by the service                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use describo_core::validation::validate_registration_form;
//!
//! assert!(validate_registration_form("Ana", "ana@shop.com", "secret1", "secret1").is_ok());
//! assert!(validate_registration_form("Ana", "ana@shop.com", "secret1", "secret2").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{EcommerceIntegration, StoreDraft, StoreSettings, UserProfile};
use crate::{MAX_DESCRIPTION_LENGTH, MIN_DESCRIPTION_LENGTH, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Auth Forms
// =============================================================================

/// Validates an email address shape (`local@domain`).
pub fn validate_email(email: &str) -> ValidationResult<()> {
    required("email", email)?;

    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }

    Ok(())
}

/// Validates the login form: both fields are required.
pub fn validate_login_form(email: &str, password: &str) -> ValidationResult<()> {
    required("email", email)?;
    required("password", password)?;
    Ok(())
}

/// Validates the registration form.
///
/// ## Rules
/// - name, email, password and confirmation are required
/// - confirmation must equal the password
/// - password must be at least `MIN_PASSWORD_LENGTH` (6) characters
pub fn validate_registration_form(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult<()> {
    required("name", name)?;
    required("email", email)?;
    required("password", password)?;
    required("password confirmation", confirm_password)?;

    if password != confirm_password {
        return Err(ValidationError::Mismatch {
            field: "password confirmation".to_string(),
            other: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Validates the "forgot password" form.
pub fn validate_reset_request(email: &str) -> ValidationResult<()> {
    required("email", email)
}

// =============================================================================
// Store Validators
// =============================================================================

/// Validates store settings.
///
/// ## Rules
/// - `maxDescriptionLength` within 100..=5000
/// - `defaultCategory`, when present, is not blank
pub fn validate_store_settings(settings: &StoreSettings) -> ValidationResult<()> {
    let max_len = settings.format_preferences.max_description_length;
    if !(MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&max_len) {
        return Err(ValidationError::OutOfRange {
            field: "maxDescriptionLength".to_string(),
            min: i64::from(MIN_DESCRIPTION_LENGTH),
            max: i64::from(MAX_DESCRIPTION_LENGTH),
        });
    }

    if let Some(category) = &settings.default_category {
        required("defaultCategory", category)?;
    }

    Ok(())
}

/// Validates a marketplace integration.
///
/// ## Rules
/// - API key is required
/// - store URL is required and must be an absolute http(s) URL
pub fn validate_integration(integration: &EcommerceIntegration) -> ValidationResult<()> {
    required("apiKey", &integration.api_key)?;
    required("storeUrl", &integration.store_url)?;

    let parsed = url::Url::parse(integration.store_url.trim()).map_err(|e| {
        ValidationError::InvalidFormat {
            field: "storeUrl".to_string(),
            reason: e.to_string(),
        }
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidFormat {
            field: "storeUrl".to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }

    Ok(())
}

/// Validates a new-store draft, including nested settings and integration.
pub fn validate_store_draft(draft: &StoreDraft) -> ValidationResult<()> {
    required("name", &draft.name)?;
    required("type", &draft.store_type)?;
    validate_store_settings(&draft.settings)?;
    if let Some(integration) = &draft.ecommerce_integration {
        validate_integration(integration)?;
    }
    Ok(())
}

// =============================================================================
// Profile Validators
// =============================================================================

/// Validates the profile form before saving.
pub fn validate_profile(profile: &UserProfile) -> ValidationResult<()> {
    required("name", &profile.name)?;
    validate_email(&profile.email)?;
    Ok(())
}
