//! Concurrent lookups over eagerly materialized documents.

use jpath::{Lookup, SharedJPath};
use std::sync::Arc;
use std::thread;

const SIMPLE: &str = "{\"simpleArray\":[1,2,3],\"labels\":\"{\\\"level_1\\\":{\\\"tag_id\\\":\\\"example-1\\\",\\\"tag_name\\\":\\\"school\\\",\\\"prob\\\":1,\\\"level\\\":1},\\\"level_2\\\":{\\\"tag_id\\\":\\\"example-2\\\",\\\"tag_name\\\":\\\"class\\\",\\\"prob\\\":1,\\\"level\\\":2}}\"}";

#[test]
fn test_scoped_threads_share_one_document() {
    let jpath = SharedJPath::new(SIMPLE).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..100)
            .map(|_| {
                scope.spawn(|| {
                    (
                        jpath.find_string("labels.level_1.tag_name"),
                        jpath.find_string("labels.level_2.tag_name"),
                        jpath.find_f64("simpleArray[1]"),
                    )
                })
            })
            .collect();

        for handle in handles {
            let (level_1, level_2, element) = handle.join().unwrap();
            assert_eq!(level_1, "school");
            assert_eq!(level_2, "class");
            assert_eq!(element, 2.0);
        }
    });
}

#[test]
fn test_arc_shared_document_is_unchanged_by_lookups() {
    let jpath = Arc::new(SharedJPath::new(SIMPLE).unwrap());
    let before = jpath.to_node();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let jpath = Arc::clone(&jpath);
            thread::spawn(move || {
                for _ in 0..100 {
                    let level = if i % 2 == 0 { "level_1" } else { "level_2" };
                    assert_eq!(jpath.find_i64(&format!("labels.{}.level", level)), (i % 2) + 1);
                    assert!(jpath.find("labels.level_3").is_err());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(jpath.to_node(), before);
}
