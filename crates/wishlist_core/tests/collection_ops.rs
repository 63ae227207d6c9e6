use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use uuid::Uuid;
use wishlist_core::{resolve, Category, Collection, Item};

fn item(title: &str, category: Category) -> Item {
    Item::builder(title, category).build().unwrap()
}

#[test]
fn add_rejects_case_insensitive_duplicate() {
    let collection = Collection::new(resolve("alice"));
    let id = Uuid::new_v4();
    let first = Item::builder("Edinburgh Castle", Category::Attraction)
        .id(id)
        .build()
        .unwrap();
    let shouted = Item::builder("EDINBURGH CASTLE", Category::Attraction)
        .id(id)
        .build()
        .unwrap();

    assert!(collection.add(first));
    assert!(!collection.add(shouted));
    assert_eq!(collection.size(), 1);
}

#[test]
fn add_rejects_duplicate_title_differing_in_greek_case() {
    let collection = Collection::new(resolve("alice"));
    let id = Uuid::new_v4();
    let upper = Item::builder("ΟΔΟΣ", Category::Attraction)
        .id(id)
        .build()
        .unwrap();
    let lower = Item::builder("οδος", Category::Attraction)
        .id(id)
        .build()
        .unwrap();

    assert!(collection.add(upper));
    assert!(!collection.add(lower.clone()));
    assert!(collection.remove_by_value(&lower));
    assert!(collection.is_empty());
}

#[test]
fn same_id_different_category_both_add() {
    let collection = Collection::new(resolve("alice"));
    let id = Uuid::new_v4();
    let attraction = Item::builder("Stirling", Category::Attraction)
        .id(id)
        .build()
        .unwrap();
    let accommodation = Item::builder("Stirling", Category::Accommodation)
        .id(id)
        .build()
        .unwrap();

    assert!(collection.add(attraction.clone()));
    assert!(collection.add(accommodation));
    assert_eq!(collection.size(), 2);
    assert!(collection.contains(id));

    assert!(collection.remove_by_value(&attraction));
    assert_eq!(collection.size(), 1);
    assert!(collection.contains(id));
}

#[test]
fn remove_by_value_needs_every_field_to_match() {
    let collection = Collection::new(resolve("bob"));
    let stored = Item::builder("Arthur's Seat", Category::Attraction)
        .description("Extinct volcano")
        .build()
        .unwrap();
    collection.add(stored.clone());

    let without_description = Item::builder("Arthur's Seat", Category::Attraction)
        .id(stored.id())
        .build()
        .unwrap();
    assert!(!collection.remove_by_value(&without_description));
    assert_eq!(collection.size(), 1);

    let recased = Item::builder("ARTHUR'S SEAT", Category::Attraction)
        .id(stored.id())
        .description("Extinct volcano")
        .build()
        .unwrap();
    assert!(collection.remove_by_value(&recased));
    assert!(collection.is_empty());
}

#[test]
fn filter_by_category_returns_only_matching_items() {
    let collection = Collection::new(resolve("carol"));
    let festival = item("Fringe Festival Pass", Category::Event);
    collection.add(festival.clone());
    collection.add(item("Balmoral Hotel", Category::Accommodation));
    collection.add(item("Scott Monument", Category::Attraction));

    let events = collection.filter_by_category(Category::Event);
    assert_eq!(events, HashSet::from([festival]));
    assert_eq!(collection.filter_by_category(Category::Accommodation).len(), 1);
}

#[test]
fn clear_is_idempotent() {
    let collection = Collection::new(resolve("dave"));
    collection.add(item("Rosslyn Chapel", Category::Attraction));

    collection.clear();
    assert_eq!(collection.size(), 0);
    collection.clear();
    assert_eq!(collection.size(), 0);
}

#[test]
fn snapshot_is_unaffected_by_later_mutation() {
    let collection = Arc::new(Collection::new(resolve("erin")));
    let kept = item("Calton Hill", Category::Attraction);
    collection.add(kept.clone());

    let snapshot = collection.items();
    let filtered = collection.filter_by_category(Category::Attraction);

    let writer = {
        let collection = Arc::clone(&collection);
        let kept_id = kept.id();
        thread::spawn(move || {
            collection.add(Item::builder("Dean Village", Category::Attraction).build().unwrap());
            collection.remove_by_id(kept_id);
        })
    };
    writer.join().unwrap();

    assert_eq!(snapshot, HashSet::from([kept.clone()]));
    assert_eq!(filtered, HashSet::from([kept.clone()]));
    assert!(!collection.contains(kept.id()));
    assert_eq!(collection.size(), 1);
}

#[test]
fn concurrent_adds_of_one_item_succeed_exactly_once() {
    const THREADS: usize = 16;
    let collection = Arc::new(Collection::new(resolve("fiona")));
    let shared = item("Edinburgh Military Tattoo", Category::Event);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let collection = Arc::clone(&collection);
            let barrier = Arc::clone(&barrier);
            let shared = shared.clone();
            thread::spawn(move || {
                barrier.wait();
                collection.add(shared)
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|added| *added)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(collection.size(), 1);
}

#[test]
fn concurrent_readers_never_observe_half_applied_mutations() {
    const ROUNDS: usize = 500;
    let collection = Arc::new(Collection::new(resolve("gregor")));
    let pair_id = Uuid::new_v4();

    // Every state the writer passes through holds at most the two items
    // sharing `pair_id`; anything else would be a torn set operation.
    let writer = {
        let collection = Arc::clone(&collection);
        thread::spawn(move || {
            for _ in 0..ROUNDS {
                let event = Item::builder("Beltane", Category::Event)
                    .id(pair_id)
                    .build()
                    .unwrap();
                let attraction = Item::builder("Beltane", Category::Attraction)
                    .id(pair_id)
                    .build()
                    .unwrap();
                collection.add(event);
                collection.add(attraction);
                collection.remove_by_id(pair_id);
            }
        })
    };

    let reader = {
        let collection = Arc::clone(&collection);
        thread::spawn(move || {
            for _ in 0..ROUNDS {
                let snapshot = collection.items();
                assert!(snapshot.len() <= 2, "unexpected size {}", snapshot.len());
                assert!(snapshot.iter().all(|item| item.id() == pair_id));
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert!(collection.is_empty());
}
