use tubely_api::auth::make_jwt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "tubely-test-secret";

/// `Authorization` header value for `user_id`.
pub fn bearer(user_id: Uuid) -> String {
    let token = make_jwt(user_id, TEST_JWT_SECRET, chrono::Duration::hours(1))
        .expect("Failed to sign test token");
    format!("Bearer {}", token)
}

pub fn expired_bearer(user_id: Uuid) -> String {
    let token = make_jwt(user_id, TEST_JWT_SECRET, chrono::Duration::minutes(-5))
        .expect("Failed to sign test token");
    format!("Bearer {}", token)
}

pub fn foreign_bearer(user_id: Uuid) -> String {
    let token = make_jwt(user_id, "some-other-secret", chrono::Duration::hours(1))
        .expect("Failed to sign test token");
    format!("Bearer {}", token)
}
