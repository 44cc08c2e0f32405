use std::time::Duration;

use rstest::fixture;
use tokio::sync::OnceCell;

use crate::{
    db::{Database, seed_data::SeedData},
    util::DevContainer,
};

const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

struct TestState {
    _container: DevContainer,
    db_url: String,
}

impl TestState {
    async fn new() -> Self {
        let container = DevContainer::start("unit-test", false).await.unwrap();
        container
            .bootstrap(SeedData::demo(), 1, QUERY_TIMEOUT)
            .await
            .unwrap();
        let db_url = container.db_url().await.unwrap();

        Self {
            _container: container,
            db_url,
        }
    }
}

static TEST_STATE: OnceCell<TestState> = OnceCell::const_new();

// Pooled connections can't outlive the runtime of the test that opened them
#[fixture]
pub async fn db() -> Database {
    let test_state = TEST_STATE.get_or_init(TestState::new).await;

    Database::new(&test_state.db_url, 4, QUERY_TIMEOUT).unwrap()
}
