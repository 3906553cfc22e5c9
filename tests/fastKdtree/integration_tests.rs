#![cfg(feature = "dev")]
use approx::assert_abs_diff_eq;
use fastKdtree::prelude::*;
use ndarray::array;

#[test]
fn test_nearest_scenario() {
    let points: Vec<[f64; 3]> = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ];

    let tree = KdTree::new(&points).unwrap();
    let nearest = tree.nearest(&[0.1, 0.1, 0.1]).unwrap();

    assert_eq!(nearest, [0.0, 0.0, 0.0]);
}

#[test]
fn test_radius_scenario_sorted() {
    let points: Vec<[f64; 3]> = vec![[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 4.0, 0.0]];

    let tree = KdTree::new(&points).unwrap();
    let found = tree.within_radius(&[0.0, 0.0, 0.0], 4.0, true).unwrap();

    // The query point itself (distance 0) is excluded.
    assert_eq!(found.len(), 2);
    assert_eq!(found.points[0], [3.0, 0.0, 0.0]);
    assert_eq!(found.points[1], [0.0, 4.0, 0.0]);
    assert_abs_diff_eq!(found.distances[0], 9.0, epsilon = 1e-12);
    assert_abs_diff_eq!(found.distances[1], 16.0, epsilon = 1e-12);
}

#[test]
fn test_empty_tree_rejects_queries() {
    let points: Vec<[f64; 3]> = Vec::new();
    let tree = KdTree::new(&points).unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);

    let queries: Vec<[f64; 3]> = vec![[1.0, 2.0, 3.0]];

    assert!(matches!(
        tree.nearest(&[0.0, 0.0, 0.0]),
        Err(KdTreeError::EmptyTree)
    ));
    assert!(matches!(
        tree.within_radius(&[0.0, 0.0, 0.0], 1.0, true),
        Err(KdTreeError::EmptyTree)
    ));
    assert!(matches!(
        tree.nearest_batch(&queries),
        Err(KdTreeError::EmptyTree)
    ));
    assert!(matches!(
        tree.within_radius_batch(&queries, 1.0, true),
        Err(KdTreeError::EmptyTree)
    ));
}

#[test]
fn test_empty_query_set_is_distinct_error() {
    let points: Vec<[f64; 3]> = vec![[1.0, 2.0, 3.0]];
    let tree = KdTree::new(&points).unwrap();

    let no_queries: Vec<[f64; 3]> = Vec::new();

    assert!(matches!(
        tree.nearest_batch(&no_queries),
        Err(KdTreeError::EmptyQuerySet)
    ));
    assert!(matches!(
        tree.within_radius_batch(&no_queries, 1.0, true),
        Err(KdTreeError::EmptyQuerySet)
    ));
}

#[test]
fn test_negative_radius_rejected() {
    let points: Vec<[f64; 3]> = vec![[1.0, 2.0, 3.0]];
    let tree = KdTree::new(&points).unwrap();

    assert!(matches!(
        tree.within_radius(&[0.0, 0.0, 0.0], -1.0, true),
        Err(KdTreeError::NegativeRadius { .. })
    ));

    let queries: Vec<[f64; 3]> = vec![[0.0, 0.0, 0.0]];
    assert!(matches!(
        tree.within_radius_batch(&queries, -0.5, false),
        Err(KdTreeError::NegativeRadius { .. })
    ));
}

#[test]
fn test_arena_preserves_point_multiset() {
    // Duplicates included on purpose.
    let points: Vec<[f64; 2]> = vec![
        [2.0, 1.0],
        [0.5, -3.0],
        [2.0, 1.0],
        [-1.0, 4.0],
        [0.0, 0.0],
        [7.0, -2.0],
    ];

    let tree = KdTree::new(&points).unwrap();
    assert_eq!(tree.len(), points.len());

    let sort_key = |a: &[f64; 2], b: &[f64; 2]| {
        a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1]))
    };

    let mut stored: Vec<[f64; 2]> = tree.points().copied().collect();
    let mut expected = points.clone();
    stored.sort_by(sort_key);
    expected.sort_by(sort_key);

    assert_eq!(stored, expected);
}

#[test]
fn test_exact_radius_boundary_included() {
    let points: Vec<[f64; 3]> = vec![[3.0, 0.0, 0.0]];
    let tree = KdTree::new(&points).unwrap();

    // A point at exactly the search radius qualifies.
    let found = tree.within_radius(&[0.0, 0.0, 0.0], 3.0, false).unwrap();
    assert_eq!(found.len(), 1);
    assert_abs_diff_eq!(found.distances[0], 9.0, epsilon = 1e-12);
}

#[test]
fn test_self_match_excluded() {
    let points: Vec<[f64; 3]> = vec![[1.0, 2.0, 3.0], [1.5, 2.0, 3.0], [1.0, 2.5, 3.0]];
    let tree = KdTree::new(&points).unwrap();

    let found = tree.within_radius(&[1.0, 2.0, 3.0], 10.0, true).unwrap();

    assert_eq!(found.len(), 2);
    for &dist in &found.distances {
        assert!(dist > 0.0, "self-match at distance zero was reported");
    }
}

#[test]
fn test_sorted_distances_nondecreasing() {
    let points: Vec<[f64; 2]> = vec![
        [5.0, 0.0],
        [1.0, 1.0],
        [-3.0, 2.0],
        [0.5, -0.5],
        [2.0, 2.0],
        [-1.0, -1.0],
    ];
    let tree = KdTree::new(&points).unwrap();

    let found = tree.within_radius(&[0.0, 0.0], 100.0, true).unwrap();
    assert_eq!(found.len(), points.len());

    for pair in found.distances.windows(2) {
        assert!(pair[0] <= pair[1], "distances not ascending: {:?}", pair);
    }
}

#[test]
fn test_batch_matches_single_query() {
    let points: Vec<[f64; 3]> = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [2.0, 2.0, 2.0],
    ];
    let tree = KdTree::new(&points).unwrap();

    let queries: Vec<[f64; 3]> = vec![[0.1, 0.1, 0.1], [1.9, 2.1, 2.0], [0.9, 0.1, -0.1]];

    let batch = tree.nearest_batch(&queries).unwrap();
    assert_eq!(batch.len(), queries.len());
    for (query, batch_answer) in queries.iter().zip(&batch) {
        assert_eq!(*batch_answer, tree.nearest(query).unwrap());
    }

    let batch_found = tree.within_radius_batch(&queries, 1.5, true).unwrap();
    assert_eq!(batch_found.len(), queries.len());
    for (query, batch_neighborhood) in queries.iter().zip(&batch_found) {
        let single = tree.within_radius(query, 1.5, true).unwrap();
        assert_eq!(batch_neighborhood.points, single.points);
        assert_eq!(batch_neighborhood.distances, single.distances);
    }
}

#[test]
fn test_ndarray_integration() {
    let data = array![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ];

    let tree = KdTree::<f64, 3>::new(&data).unwrap();
    assert_eq!(tree.len(), 4);

    let nearest = tree.nearest(&[0.1, 0.1, 0.1]).unwrap();
    assert_eq!(nearest, [0.0, 0.0, 0.0]);

    // Batch queries accept ndarray input too.
    let queries = array![[0.9, 0.0, 0.1], [0.0, 0.0, 0.9]];
    let batch = tree.nearest_batch(&queries).unwrap();
    assert_eq!(batch[0], [1.0, 0.0, 0.0]);
    assert_eq!(batch[1], [0.0, 0.0, 1.0]);
}

#[test]
fn test_ndarray_shape_validation() {
    // Wrong row width for D = 3.
    let narrow = array![[0.0, 1.0], [2.0, 3.0]];
    assert!(matches!(
        KdTree::<f64, 3>::new(&narrow),
        Err(KdTreeError::InvalidInput(_))
    ));

    // Transposed views are not contiguous.
    let square = array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0], [6.0, 7.0, 8.0]];
    let transposed = square.t();
    assert!(matches!(
        KdTree::<f64, 3>::new(&transposed),
        Err(KdTreeError::InvalidInput(_))
    ));
}

#[test]
fn test_f32_coordinates() {
    let points: Vec<[f32; 2]> = vec![[0.0, 0.0], [1.0, 1.0], [-1.0, 2.0]];
    let tree = KdTree::new(&points).unwrap();

    let nearest = tree.nearest(&[0.9, 0.9]).unwrap();
    assert_eq!(nearest, [1.0, 1.0]);

    let found = tree.within_radius(&[0.0, 0.0], 2.0f32, true).unwrap();
    assert_eq!(found.len(), 1);
    assert_abs_diff_eq!(found.distances[0], 2.0f32, epsilon = 1e-6);
}

#[test]
fn test_render_layout() {
    let points: Vec<[f64; 2]> = vec![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
    let tree = KdTree::new(&points).unwrap();

    let rendered = tree.render();
    assert_eq!(rendered.lines().count(), points.len());
    assert!(rendered.contains("└──"));
    assert!(rendered.contains("├──"));

    let empty: Vec<[f64; 2]> = Vec::new();
    assert!(KdTree::new(&empty).unwrap().render().is_empty());
}

#[test]
fn test_sequential_build() {
    let points: Vec<[f64; 3]> = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ];

    let tree = KdTreeBuilder::new().parallel(false).build(&points).unwrap();

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.nearest(&[0.1, 0.1, 0.1]).unwrap(), [0.0, 0.0, 0.0]);
}
