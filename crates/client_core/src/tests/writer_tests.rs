use super::*;
use storage::MemoryStore;

fn items(values: &[&str]) -> Vec<FeedbackItem> {
    values
        .iter()
        .map(|value| FeedbackItem::parse(value).expect("item"))
        .collect()
}

#[tokio::test]
async fn last_queued_collection_wins() {
    let store = Arc::new(MemoryStore::new());
    let (writer, _task) = PersistenceWriter::spawn(store.clone());
    let key = PartitionKey::anonymous();

    writer.enqueue(key.clone(), items(&["a"]));
    writer.enqueue(key.clone(), items(&["a", "b"]));
    writer.enqueue(key.clone(), items(&["a", "b", "c"]));
    writer.flush().await;

    assert_eq!(store.load(&key).await, items(&["a", "b", "c"]));
}

#[tokio::test]
async fn failed_saves_are_dropped_and_writer_keeps_running() {
    let store = Arc::new(MemoryStore::new());
    let (writer, _task) = PersistenceWriter::spawn(store.clone());
    let key = PartitionKey::anonymous();

    store.set_fail_saves(true);
    writer.enqueue(key.clone(), items(&["lost"]));
    writer.flush().await;
    assert!(store.load(&key).await.is_empty());

    store.set_fail_saves(false);
    writer.enqueue(key.clone(), items(&["lost", "kept"]));
    writer.flush().await;
    assert_eq!(store.load(&key).await, items(&["lost", "kept"]));
}

#[tokio::test]
async fn flush_after_writer_stops_returns_immediately() {
    let store = Arc::new(MemoryStore::new());
    let (writer, task) = PersistenceWriter::spawn(store);
    task.abort();
    let _ = task.await;

    writer.enqueue(PartitionKey::anonymous(), items(&["dropped"]));
    writer.flush().await;
}
