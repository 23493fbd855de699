pub mod builders;

pub use builders::PlayerSnapshotBuilder;
pub use fixtures::{FakePlayer, FakeSources, servers};

/// Give computed properties time to catch up with their inputs
pub async fn settle() {
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;
}
