//! # Profile Manager
//!
//! Holds the user profile and subscription shown on the profile screen.
//!
//! ```text
//!            begin_edit()             save() ok
//!  Viewing ───────────────► Editing ───────────► Viewing (draft saved)
//!     ▲                        │
//!     └──────── cancel() ──────┘  (draft dropped)
//! ```
//!
//! Edits go to a draft copy; the saved profile only changes on a successful
//! [`ProfileManager::save`]. Subscription changes apply directly.

use std::sync::RwLock;

use chrono::{Duration, Utc};
use describo_core::validation::validate_profile;
use describo_core::{CoreError, PaymentMethod, SubscriptionPlan, SubscriptionStatus, UserProfile};
use tracing::{debug, info};

use crate::pending::{read, write};

/// Days between two billing dates of a paid plan.
const BILLING_PERIOD_DAYS: i64 = 30;

/// Changes made on the profile form. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

/// Choices made in the subscription dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionChange {
    pub plan: SubscriptionPlan,
    /// `None` keeps the current payment method.
    pub payment_method: Option<PaymentMethod>,
    /// `None` keeps the current setting. Ignored for the free plan.
    pub auto_renew: Option<bool>,
}

impl SubscriptionChange {
    pub fn plan(plan: SubscriptionPlan) -> Self {
        SubscriptionChange {
            plan,
            payment_method: None,
            auto_renew: None,
        }
    }
}

#[derive(Debug)]
struct ProfileState {
    saved: UserProfile,
    draft: Option<UserProfile>,
    last_error: Option<String>,
}

/// Profile and subscription state holder.
#[derive(Debug)]
pub struct ProfileManager {
    state: RwLock<ProfileState>,
}

impl ProfileManager {
    pub fn new(profile: UserProfile) -> Self {
        ProfileManager {
            state: RwLock::new(ProfileState {
                saved: profile,
                draft: None,
                last_error: None,
            }),
        }
    }

    /// The profile as currently displayed: the draft while editing.
    pub fn profile(&self) -> UserProfile {
        let state = read(&self.state);
        state.draft.clone().unwrap_or_else(|| state.saved.clone())
    }

    pub fn saved_profile(&self) -> UserProfile {
        read(&self.state).saved.clone()
    }

    pub fn is_editing(&self) -> bool {
        read(&self.state).draft.is_some()
    }

    pub fn last_error(&self) -> Option<String> {
        read(&self.state).last_error.clone()
    }

    /// Enters edit mode. Calling it again keeps the current draft.
    pub fn begin_edit(&self) {
        let mut state = write(&self.state);
        if state.draft.is_none() {
            state.draft = Some(state.saved.clone());
            state.last_error = None;
        }
    }

    /// Changes draft fields. Fails outside edit mode.
    pub fn update(&self, edit: ProfileEdit) -> bool {
        let mut state = write(&self.state);
        let Some(draft) = state.draft.as_mut() else {
            state.last_error = Some(CoreError::NotEditing.to_string());
            return false;
        };

        if let Some(name) = edit.name {
            draft.name = name;
        }
        if let Some(email) = edit.email {
            draft.email = email;
        }
        if let Some(phone) = edit.phone {
            draft.phone = phone;
        }
        if let Some(department) = edit.department {
            draft.department = department;
        }
        true
    }

    /// Validates the draft and makes it the saved profile.
    pub fn save(&self) -> bool {
        let mut state = write(&self.state);
        let Some(draft) = state.draft.take() else {
            state.last_error = Some(CoreError::NotEditing.to_string());
            return false;
        };

        if let Err(e) = validate_profile(&draft) {
            debug!(error = %e, "Profile rejected");
            state.last_error = Some(CoreError::from(e).to_string());
            state.draft = Some(draft);
            return false;
        }

        info!("Profile saved");
        state.saved = draft;
        state.last_error = None;
        true
    }

    /// Leaves edit mode, dropping the draft.
    pub fn cancel(&self) {
        let mut state = write(&self.state);
        state.draft = None;
        state.last_error = None;
    }

    /// Changes plan, payment method and auto-renew.
    ///
    /// The free plan has no next billing date and never renews. Paid plans
    /// become active and get a next billing date one period out if they had
    /// none.
    pub fn change_subscription(&self, change: SubscriptionChange) {
        let mut state = write(&self.state);
        let now = Utc::now();

        let apply = |profile: &mut UserProfile| {
            let subscription = &mut profile.subscription;
            subscription.plan = change.plan;
            if let Some(method) = change.payment_method {
                subscription.payment_method = method;
            }

            subscription.status = SubscriptionStatus::Active;
            if change.plan.is_paid() {
                if subscription.next_billing.is_none() {
                    subscription.next_billing = Some(now + Duration::days(BILLING_PERIOD_DAYS));
                }
                if let Some(auto_renew) = change.auto_renew {
                    subscription.auto_renew = auto_renew;
                }
            } else {
                subscription.next_billing = None;
                subscription.auto_renew = false;
            }
        };

        apply(&mut state.saved);
        if let Some(draft) = state.draft.as_mut() {
            apply(draft);
        }
        info!(plan = ?change.plan, "Subscription changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::demo_profile;

    #[test]
    fn test_edit_save_flow() {
        let manager = ProfileManager::new(demo_profile());
        manager.begin_edit();
        assert!(manager.update(ProfileEdit {
            phone: Some("(21) 91234-5678".to_string()),
            ..ProfileEdit::default()
        }));

        assert_eq!(manager.profile().phone, "(21) 91234-5678");
        assert_eq!(manager.saved_profile().phone, "(11) 98765-4321");

        assert!(manager.save());
        assert!(!manager.is_editing());
        assert_eq!(manager.saved_profile().phone, "(21) 91234-5678");
    }

    #[test]
    fn test_cancel_restores_saved_profile() {
        let manager = ProfileManager::new(demo_profile());
        manager.begin_edit();
        manager.update(ProfileEdit {
            name: Some("Outro Nome".to_string()),
            ..ProfileEdit::default()
        });

        manager.cancel();

        assert_eq!(manager.profile().name, "João Silva");
    }

    #[test]
    fn test_update_requires_edit_mode() {
        let manager = ProfileManager::new(demo_profile());
        assert!(!manager.update(ProfileEdit::default()));
        assert_eq!(
            manager.last_error().as_deref(),
            Some("Profile is not being edited")
        );
    }

    #[test]
    fn test_save_rejects_blank_name() {
        let manager = ProfileManager::new(demo_profile());
        manager.begin_edit();
        manager.update(ProfileEdit {
            name: Some("  ".to_string()),
            ..ProfileEdit::default()
        });

        assert!(!manager.save());
        assert!(manager.is_editing());
        assert_eq!(manager.last_error().as_deref(), Some("name is required"));
        assert_eq!(manager.saved_profile().name, "João Silva");
    }

    #[test]
    fn test_downgrade_to_free() {
        let manager = ProfileManager::new(demo_profile());

        manager.change_subscription(SubscriptionChange::plan(SubscriptionPlan::Free));

        let subscription = manager.profile().subscription;
        assert_eq!(subscription.plan, SubscriptionPlan::Free);
        assert!(subscription.next_billing.is_none());
        assert!(!subscription.auto_renew);
    }

    #[test]
    fn test_upgrade_to_paid_plan() {
        let manager = ProfileManager::new(demo_profile());
        manager.change_subscription(SubscriptionChange::plan(SubscriptionPlan::Free));

        manager.change_subscription(SubscriptionChange {
            plan: SubscriptionPlan::Enterprise,
            payment_method: Some(PaymentMethod::Pix),
            auto_renew: Some(true),
        });

        let subscription = manager.profile().subscription;
        assert_eq!(subscription.status, SubscriptionStatus::Active);
        assert_eq!(subscription.payment_method, PaymentMethod::Pix);
        assert!(subscription.auto_renew);
        assert!(subscription.next_billing.unwrap() > Utc::now());
    }
}
