//! Scenarios against the live demo service
//!
//! Ignored by default. Run with `cargo test -- --ignored`; point them at
//! another deployment with `API_BASE_URL` or `API_CONFIG_FILE`.

use api_test_kit::Result;
use rstest::rstest;
use serial_test::serial;

use super::scenarios;
use super::Suite;

#[tokio::test]
#[ignore = "requires network access to jsonplaceholder.typicode.com"]
#[serial]
async fn live_read_endpoints() -> Result<()> {
    let suite = Suite::from_env();
    scenarios::get_all_posts(&suite).await?;
    scenarios::get_single_post(&suite).await?;
    scenarios::get_nonexistent_post(&suite).await?;
    scenarios::get_post_comments(&suite).await?;
    scenarios::listed_posts_are_retrievable(&suite).await?;
    scenarios::invalid_endpoint(&suite).await
}

#[tokio::test]
#[ignore = "requires network access to jsonplaceholder.typicode.com"]
#[serial]
async fn live_write_endpoints() -> Result<()> {
    let suite = Suite::from_env();
    scenarios::create_post(&suite).await?;
    scenarios::create_post_requires_fields(&suite).await?;
    scenarios::update_post(&suite).await?;
    scenarios::update_nonexistent_post(&suite).await?;
    scenarios::delete_post(&suite).await?;
    scenarios::delete_nonexistent_post(&suite).await?;
    scenarios::unsupported_method(&suite).await?;
    scenarios::large_payload(&suite).await
}

#[tokio::test]
#[ignore = "requires network access to jsonplaceholder.typicode.com"]
#[serial]
async fn live_schemas_and_pagination() -> Result<()> {
    let suite = Suite::from_env();
    scenarios::post_schema(&suite).await?;
    scenarios::comment_schema(&suite).await?;
    scenarios::pagination_first_page(&suite).await?;
    scenarios::pagination_pages_dont_overlap(&suite).await
}

#[rstest]
#[case(1, 200)]
#[case(50, 200)]
#[case(100, 200)]
#[case(99999, 404)]
#[tokio::test]
#[ignore = "requires network access to jsonplaceholder.typicode.com"]
#[serial]
async fn live_post_status_codes(#[case] post_id: i64, #[case] expected: u16) -> Result<()> {
    let suite = Suite::from_env();
    scenarios::post_status_code(&suite, post_id, expected).await
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
#[case(10)]
#[tokio::test]
#[ignore = "requires network access to jsonplaceholder.typicode.com"]
#[serial]
async fn live_posts_by_user(#[case] user_id: i64) -> Result<()> {
    let suite = Suite::from_env();
    scenarios::get_posts_by_user(&suite, user_id).await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires network access to jsonplaceholder.typicode.com"]
#[serial]
async fn live_performance() -> Result<()> {
    let suite = Suite::from_env();
    scenarios::list_response_time(&suite).await?;
    scenarios::create_post_response_time(&suite).await?;
    let responses = scenarios::concurrent_requests(&suite).await?;
    log::info!("{} concurrent responses from {}", responses.len(), suite.api.base_url());
    Ok(())
}
