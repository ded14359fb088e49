use std::sync::Arc;

use shared::domain::{FeedbackItem, PartitionKey, UserIdentity};
use storage::{FeedbackStore, MemoryStore, Storage};

async fn stores() -> Vec<(&'static str, Arc<dyn FeedbackStore>)> {
    let sqlite = Storage::new("sqlite::memory:").await.expect("db");
    vec![
        ("sqlite", Arc::new(sqlite) as Arc<dyn FeedbackStore>),
        ("memory", Arc::new(MemoryStore::new()) as Arc<dyn FeedbackStore>),
    ]
}

#[tokio::test]
async fn every_store_honours_the_load_save_contract() {
    let carol = PartitionKey::for_identity(Some(&UserIdentity::new("carol@example.com")));
    let collection: Vec<FeedbackItem> = ["love it", "needs dark mode", "love it"]
        .iter()
        .map(|text| FeedbackItem::parse(text).expect("item"))
        .collect();

    for (name, store) in stores().await {
        assert!(store.load(&carol).await.is_empty(), "{name}: fresh load");

        store.save(&carol, &collection).await.expect("save");
        assert_eq!(store.load(&carol).await, collection, "{name}: round trip");
        assert!(
            store.load(&PartitionKey::anonymous()).await.is_empty(),
            "{name}: anonymous partition untouched"
        );

        let partitions = store.list_partitions().await.expect("list");
        assert_eq!(partitions.len(), 1, "{name}: one partition");
        assert_eq!(partitions[0].key, carol);
        assert_eq!(partitions[0].item_count, 3);

        assert!(store.clear(&carol).await.expect("clear"), "{name}: clear");
        assert!(store.load(&carol).await.is_empty(), "{name}: cleared");
    }
}
