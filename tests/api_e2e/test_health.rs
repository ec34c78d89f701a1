//! E2E tests: liveness and readiness.

use super::test_helpers::*;

#[actix_rt::test]
async fn test_health_and_ready() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = get(&app, "/api/v1/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = get(&app, "/api/v1/ready").await;
    assert_eq!(status, 200, "Store should be reachable: {:?}", body);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "Sqlite");
}
