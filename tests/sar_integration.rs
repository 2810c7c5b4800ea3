//! End-to-end scenarios for the SAR engine.

use sugerir::prelude::*;
use sugerir::SugerirError;

/// A rates X and Y, B rates Y and Z, C rates X and Z, all weight 1.
fn triangle() -> Vec<Interaction> {
    vec![
        Interaction::new("A", "X"),
        Interaction::new("A", "Y"),
        Interaction::new("B", "Y"),
        Interaction::new("B", "Z"),
        Interaction::new("C", "X"),
        Interaction::new("C", "Z"),
    ]
}

#[test]
fn triangle_cooccurrence_counts() {
    let mut model = Sar::new().with_similarity_type(SimilarityMetric::Counts);
    model.fit(&triangle()).expect("fit succeeds");

    let items = model.item_vocab().expect("fitted");
    let x = items.index("X").expect("seen in training");
    let y = items.index("Y").expect("seen in training");
    let z = items.index("Z").expect("seen in training");

    let c = model.item_cooccurrence().expect("fitted");
    assert_eq!(c.get(x, x), 2.0);
    assert_eq!(c.get(y, y), 2.0);
    assert_eq!(c.get(z, z), 2.0);
    assert_eq!(c.get(x, y), 1.0);
    assert_eq!(c.get(y, z), 1.0);
    assert_eq!(c.get(x, z), 1.0);

    // Under counts, S is C itself.
    let s = model.item_similarity().expect("fitted");
    assert_eq!(s.get(x, y), 1.0);
}

#[test]
fn triangle_jaccard_similarity() {
    let mut model = Sar::new().with_similarity_type(SimilarityMetric::Jaccard);
    model.fit(&triangle()).expect("fit succeeds");

    let items = model.item_vocab().expect("fitted");
    let x = items.index("X").expect("seen in training");
    let y = items.index("Y").expect("seen in training");

    let s = model.item_similarity().expect("fitted");
    // 1 / (2 + 2 - 1) = 1/3
    assert!((s.get(x, y) - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn full_pipeline_with_decay_and_remove_seen() {
    let events = vec![
        Interaction::new("ana", "pan").with_weight(5.0).with_timestamp(100.0),
        Interaction::new("ana", "queso").with_weight(3.0).with_timestamp(90.0),
        Interaction::new("beto", "queso").with_weight(4.0).with_timestamp(95.0),
        Interaction::new("beto", "vino").with_weight(2.0).with_timestamp(100.0),
        Interaction::new("carla", "pan").with_weight(1.0).with_timestamp(80.0),
        Interaction::new("carla", "vino").with_weight(5.0).with_timestamp(85.0),
    ];

    let mut model = Sar::new()
        .with_similarity_type(SimilarityMetric::Jaccard)
        .with_time_decay(30.0)
        .with_remove_seen(true);
    model.fit(&events).expect("fit succeeds");

    let recs = model
        .recommend_k_items(&["ana", "beto", "carla"], 5)
        .expect("fitted");

    // Each user has seen two of three items: exactly one candidate each.
    assert_eq!(recs.len(), 3);
    let for_ana: Vec<&Recommendation> = recs.iter().filter(|r| r.user_id == "ana").collect();
    assert_eq!(for_ana.len(), 1);
    assert_eq!(for_ana[0].item_id, "vino");
    assert!(for_ana[0].score > 0.0);
}

#[test]
fn remove_seen_never_surfaces_training_pairs() {
    let events = triangle();
    let mut model = Sar::new().with_remove_seen(true);
    model.fit(&events).expect("fit succeeds");

    let recs = model
        .recommend_k_items(&["A", "B", "C"], 3)
        .expect("fitted");
    for rec in &recs {
        let was_seen = events
            .iter()
            .any(|e| e.user == rec.user_id && e.item == rec.item_id);
        assert!(
            !was_seen,
            "{} was recommended {} despite having interacted with it",
            rec.user_id, rec.item_id
        );
    }
}

#[test]
fn single_user_single_item_remove_seen_yields_no_rows() {
    let mut model = Sar::new().with_remove_seen(true);
    model
        .fit(&[Interaction::new("solo", "only")])
        .expect("fit succeeds");

    let recs = model.recommend_k_items(&["solo"], 5).expect("fitted");
    assert!(recs.is_empty());
}

#[test]
fn recommend_before_fit_fails_closed() {
    let model = Sar::new();
    match model.recommend_k_items(&["anyone"], 10) {
        Err(SugerirError::EmptyModel { operation }) => {
            assert_eq!(operation, "recommend_k_items");
        }
        other => panic!("expected EmptyModel, got {other:?}"),
    }
}

#[test]
fn at_most_k_rows_per_user() {
    // One heavy user connected to many items through a hub user.
    let mut events = vec![Interaction::new("hub", "seed")];
    for i in 0..20 {
        events.push(Interaction::new("hub", format!("item{i}")));
    }
    events.push(Interaction::new("target", "seed"));

    let mut model = Sar::new().with_remove_seen(true);
    model.fit(&events).expect("fit succeeds");

    let recs = model.recommend_k_items(&["target"], 7).expect("fitted");
    assert_eq!(recs.len(), 7);
    for pair in recs.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn decayed_events_halve_per_half_life() {
    let half_life = 12.0;
    let events = vec![
        Interaction::new("u", "now").with_timestamp(1000.0),
        Interaction::new("u", "old").with_timestamp(1000.0 - half_life),
        Interaction::new("u", "older").with_timestamp(1000.0 - 2.0 * half_life),
    ];
    let mut model = Sar::new().with_time_decay(half_life);
    model.fit(&events).expect("fit succeeds");

    let a = model.user_affinity().expect("fitted");
    let items = model.item_vocab().expect("fitted");
    let now = a.get(0, items.index("now").expect("seen"));
    let old = a.get(0, items.index("old").expect("seen"));
    let older = a.get(0, items.index("older").expect("seen"));

    assert!((now - 1.0).abs() < 1e-6);
    assert!((old - now / 2.0).abs() < 1e-6);
    assert!((older - now / 4.0).abs() < 1e-6);
}

#[test]
fn serialized_model_roundtrips() {
    let mut model = Sar::new().with_remove_seen(true);
    model.fit(&triangle()).expect("fit succeeds");

    let json = serde_json::to_string(&model).expect("fitted model serializes");
    let restored: Sar = serde_json::from_str(&json).expect("model deserializes");

    assert!(restored.is_fitted());
    let recs = restored.recommend_k_items(&["A"], 3).expect("fitted");
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].item_id, "Z");
}
