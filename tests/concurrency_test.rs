//! Concurrency tests for imgdrop.
//!
//! These tests verify that concurrent uploads never share a storage name
//! and that every upload ends up both on disk and in the metadata store.

use std::collections::HashSet;
use std::sync::Arc;

use imgdrop::image::{generate_storage_name, FileStorage, ImageService};
use imgdrop::MemoryImageRepository;
use tempfile::TempDir;

/// Setup an image service over a temporary upload directory.
async fn setup_service() -> (TempDir, Arc<MemoryImageRepository>, ImageService) {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path()).await.unwrap();
    let repo = Arc::new(MemoryImageRepository::new());
    let service = ImageService::new(storage, repo.clone(), "http://127.0.0.1:5000");
    (temp_dir, repo, service)
}

/// Test concurrent uploads of identical content.
///
/// Every upload must get its own storage name, file and record.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_uploads_are_disjoint() {
    const UPLOADS: usize = 64;

    let (temp_dir, repo, service) = setup_service().await;

    let mut handles = Vec::with_capacity(UPLOADS);
    for _ in 0..UPLOADS {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.upload("same.png", b"identical bytes").await
        }));
    }

    let mut names = HashSet::new();
    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        assert!(names.insert(record.filename));
    }

    assert_eq!(names.len(), UPLOADS);
    assert_eq!(repo.len().await, UPLOADS);
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), UPLOADS);

    for name in &names {
        assert_eq!(
            service.fetch(name).await.unwrap(),
            b"identical bytes".to_vec()
        );
    }
}

/// Test that name generation does not collide across threads.
#[test]
fn test_generate_storage_name_no_collisions_across_threads() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25_000;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            std::thread::spawn(|| {
                (0..PER_THREAD)
                    .map(|_| generate_storage_name("photo.jpg"))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut all = HashSet::with_capacity(THREADS * PER_THREAD);
    for handle in handles {
        for name in handle.join().unwrap() {
            assert!(all.insert(name));
        }
    }

    assert_eq!(all.len(), THREADS * PER_THREAD);
}
