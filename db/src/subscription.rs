use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::subscription::SubscriptionRecord;

/// Most recently created subscription row for the given user, if any.
/// Older rows are ignored entirely; absence is a legitimate state, not an
/// error.
pub async fn latest_subscription_for<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<SubscriptionRecord>> {
    sqlx::query_as::<_, SubscriptionRecord>(
        r#"
        SELECT id, user_id, plan_id, status, trial_ends_at, current_period_end,
               cancel_at_period_end, created_at
        FROM subscriptions
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
