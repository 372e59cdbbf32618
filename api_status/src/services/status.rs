use chrono::{DateTime, SecondsFormat, Utc};
use common::error::{AppError, Res};
use db::models::subscription::SubscriptionRecord;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::status::EntitlementStatus;

/// Resolves a bearer credential to the id of a known user.
pub trait IdentityVerifier {
    async fn resolve(&self, credential: &str) -> Res<Uuid>;
}

/// Read side of the subscription records owned by the billing integration.
pub trait SubscriptionStore {
    async fn latest_subscription_for(&self, user_id: Uuid) -> Res<Option<SubscriptionRecord>>;
}

impl IdentityVerifier for auth::IdentityClient {
    async fn resolve(&self, credential: &str) -> Res<Uuid> {
        self.get_user(credential).await.map(|user| user.id)
    }
}

pub(crate) struct PgSubscriptionStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgSubscriptionStore<'a> {
    pub(crate) fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl SubscriptionStore for PgSubscriptionStore<'_> {
    async fn latest_subscription_for(&self, user_id: Uuid) -> Res<Option<SubscriptionRecord>> {
        db::subscription::latest_subscription_for(self.pool, user_id).await
    }
}

/// Evaluates the caller's entitlement at the given instant.
///
/// A missing, non-Bearer, or blank credential fails `Unauthorized` before
/// anything is looked up. Resolution failures surface as the verifier's
/// single `Unauthorized` message. Having no subscription record is not an
/// error; it evaluates to the inactive default snapshot.
pub async fn evaluate(
    verifier: &impl IdentityVerifier,
    store: &impl SubscriptionStore,
    credential: Option<&str>,
    now: DateTime<Utc>,
) -> Res<EntitlementStatus> {
    let token = credential
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("No authorization token provided".to_string()))?;

    let user_id = verifier.resolve(token).await?;
    let record = store.latest_subscription_for(user_id).await?;

    Ok(status_at(record.as_ref(), now))
}

/// Entitlement snapshot for a record at a fixed instant.
///
/// The trial and paid windows are evaluated independently and combined with
/// a plain OR. Comparisons are strict: an end timestamp equal to `now` is
/// already expired.
pub fn status_at(record: Option<&SubscriptionRecord>, now: DateTime<Utc>) -> EntitlementStatus {
    let Some(record) = record else {
        return EntitlementStatus::none();
    };

    let trial_active = record.trial_ends_at.is_some_and(|ends| ends > now);
    let paid_active =
        record.current_period_end.is_some_and(|ends| ends > now) && record.status == "active";

    EntitlementStatus {
        is_active: trial_active || paid_active,
        plan: record.plan_id.clone(),
        trial_ends_at: record.trial_ends_at.map(iso_instant),
        current_period_end: record.current_period_end.map(iso_instant),
        cancel_at_period_end: record.cancel_at_period_end.unwrap_or(false),
    }
}

fn iso_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct StaticVerifier {
        user_id: Option<Uuid>,
    }

    impl IdentityVerifier for StaticVerifier {
        async fn resolve(&self, _credential: &str) -> Res<Uuid> {
            self.user_id.ok_or_else(|| {
                AppError::Unauthorized("Invalid token or user not found".to_string())
            })
        }
    }

    struct StaticStore {
        record: Option<SubscriptionRecord>,
        fail: bool,
    }

    impl SubscriptionStore for StaticStore {
        async fn latest_subscription_for(
            &self,
            _user_id: Uuid,
        ) -> Res<Option<SubscriptionRecord>> {
            if self.fail {
                return Err(AppError::BackendUnavailable(
                    "connection refused".to_string(),
                ));
            }
            Ok(self.record.clone())
        }
    }

    fn verifier() -> StaticVerifier {
        StaticVerifier {
            user_id: Some(Uuid::new_v4()),
        }
    }

    fn store(record: Option<SubscriptionRecord>) -> StaticStore {
        StaticStore {
            record,
            fail: false,
        }
    }

    fn failing_store() -> StaticStore {
        StaticStore {
            record: None,
            fail: true,
        }
    }

    fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn record(
        plan: Option<&str>,
        status: &str,
        trial_ends_at: Option<DateTime<Utc>>,
        current_period_end: Option<DateTime<Utc>>,
    ) -> SubscriptionRecord {
        SubscriptionRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: plan.map(str::to_string),
            status: status.to_string(),
            trial_ends_at,
            current_period_end,
            cancel_at_period_end: None,
            created_at: instant(2024, 5, 1),
        }
    }

    #[tokio::test]
    async fn missing_credential_is_rejected_before_any_lookup() {
        // the failing store would turn any lookup into a 503, so getting
        // Unauthorized proves the store was never queried
        let result = evaluate(&verifier(), &failing_store(), None, instant(2024, 6, 1)).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn blank_credential_is_rejected() {
        let result = evaluate(
            &verifier(),
            &failing_store(),
            Some("   "),
            instant(2024, 6, 1),
        )
        .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn unresolvable_credential_is_unauthorized() {
        let unresolved = StaticVerifier { user_id: None };
        let result = evaluate(
            &unresolved,
            &failing_store(),
            Some("expired-token"),
            instant(2024, 6, 1),
        )
        .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn no_record_is_the_inactive_default_state() {
        let status = evaluate(
            &verifier(),
            &store(None),
            Some("good-token"),
            instant(2024, 6, 1),
        )
        .await
        .unwrap();
        assert_eq!(status, EntitlementStatus::none());
    }

    #[tokio::test]
    async fn future_trial_is_active_whatever_the_status_says() {
        let trialing = record(
            Some("premium"),
            "trialing",
            Some(instant(2024, 6, 15)),
            None,
        );
        let status = evaluate(
            &verifier(),
            &store(Some(trialing)),
            Some("good-token"),
            instant(2024, 6, 1),
        )
        .await
        .unwrap();

        assert_eq!(
            status,
            EntitlementStatus {
                is_active: true,
                plan: Some("premium".to_string()),
                trial_ends_at: Some("2024-06-15T00:00:00.000Z".to_string()),
                current_period_end: None,
                cancel_at_period_end: false,
            }
        );
    }

    #[tokio::test]
    async fn expired_trial_alone_is_inactive() {
        let trialing = record(
            Some("premium"),
            "trialing",
            Some(instant(2024, 6, 15)),
            None,
        );
        let status = evaluate(
            &verifier(),
            &store(Some(trialing)),
            Some("good-token"),
            instant(2024, 6, 20),
        )
        .await
        .unwrap();
        assert!(!status.is_active);
    }

    #[tokio::test]
    async fn lapsed_trial_with_running_paid_period_is_active() {
        let paid = record(
            Some("premium"),
            "active",
            Some(instant(2024, 6, 1)),
            Some(instant(2024, 7, 1)),
        );
        let status = evaluate(
            &verifier(),
            &store(Some(paid)),
            Some("good-token"),
            instant(2024, 6, 20),
        )
        .await
        .unwrap();
        assert!(status.is_active);
    }

    #[tokio::test]
    async fn both_windows_ended_is_inactive() {
        let lapsed = record(
            Some("premium"),
            "active",
            Some(instant(2024, 5, 1)),
            Some(instant(2024, 6, 1)),
        );
        let status = status_at(Some(&lapsed), instant(2024, 6, 20));
        assert!(!status.is_active);
    }

    #[tokio::test]
    async fn paid_window_requires_the_active_status_label() {
        let past_due = record(Some("premium"), "past_due", None, Some(instant(2024, 7, 1)));
        let status = status_at(Some(&past_due), instant(2024, 6, 20));
        assert!(!status.is_active);
    }

    #[tokio::test]
    async fn end_instants_equal_to_now_are_expired() {
        let now = instant(2024, 6, 15);
        let boundary = record(Some("premium"), "active", Some(now), Some(now));
        let status = status_at(Some(&boundary), now);
        assert!(!status.is_active);
    }

    #[tokio::test]
    async fn store_failure_surfaces_backend_unavailable() {
        let result = evaluate(
            &verifier(),
            &failing_store(),
            Some("good-token"),
            instant(2024, 6, 1),
        )
        .await;
        assert!(matches!(result, Err(AppError::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn evaluation_is_idempotent() {
        let now = instant(2024, 6, 1);
        let row = record(
            Some("premium"),
            "trialing",
            Some(instant(2024, 6, 15)),
            None,
        );
        let first = status_at(Some(&row), now);
        let second = status_at(Some(&row), now);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn record_fields_are_echoed_into_the_snapshot() {
        let mut row = record(
            Some("basic"),
            "active",
            Some(instant(2024, 6, 1)),
            Some(instant(2024, 7, 1)),
        );
        row.cancel_at_period_end = Some(true);

        let status = status_at(Some(&row), instant(2024, 6, 20));
        assert_eq!(status.plan, Some("basic".to_string()));
        assert_eq!(
            status.trial_ends_at,
            Some("2024-06-01T00:00:00.000Z".to_string())
        );
        assert_eq!(
            status.current_period_end,
            Some("2024-07-01T00:00:00.000Z".to_string())
        );
        assert!(status.cancel_at_period_end);
    }
}
