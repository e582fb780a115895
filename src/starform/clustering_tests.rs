use crate::particles::ParticleStore;
use crate::starform::find_clusters;

#[test]
fn test_chain_within_linking_length_is_one_cluster() {
    // Five particles in a line, each 0.05 apart; the ends are 0.2 apart but
    // the chain connects them.
    let mut store = ParticleStore::new(5);
    for i in 0..5 {
        store.x[i] = i as f64 * 0.05;
    }
    let candidates: Vec<usize> = (0..5).collect();
    let clusters = find_clusters(&store, &candidates, 0.06);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0], vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_result_is_independent_of_traversal_start() {
    let mut store = ParticleStore::new(5);
    for i in 0..5 {
        store.x[i] = i as f64 * 0.05;
    }
    let forward: Vec<usize> = (0..5).collect();
    let backward: Vec<usize> = (0..5).rev().collect();
    let shuffled = vec![2, 0, 4, 1, 3];

    let a = find_clusters(&store, &forward, 0.06);
    let b = find_clusters(&store, &backward, 0.06);
    let c = find_clusters(&store, &shuffled, 0.06);

    assert_eq!(a.len(), 1);
    assert_eq!(a[0], b[0]);
    assert_eq!(a[0], c[0]);
}

#[test]
fn test_separated_groups_form_separate_clusters() {
    let mut store = ParticleStore::new(6);
    for i in 0..3 {
        store.x[i] = i as f64 * 0.05;
    }
    for i in 3..6 {
        store.x[i] = 10.0 + (i - 3) as f64 * 0.05;
    }
    let candidates: Vec<usize> = (0..6).collect();
    let mut clusters = find_clusters(&store, &candidates, 0.06);
    clusters.sort_by_key(|c| c[0]);
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0], vec![0, 1, 2]);
    assert_eq!(clusters[1], vec![3, 4, 5]);
}

#[test]
fn test_empty_candidate_set_yields_no_clusters() {
    let store = ParticleStore::new(3);
    let clusters = find_clusters(&store, &[], 0.1);
    assert!(clusters.is_empty());
}

#[test]
fn test_singleton_candidate_is_its_own_cluster() {
    let store = ParticleStore::new(3);
    let clusters = find_clusters(&store, &[1], 0.1);
    assert_eq!(clusters, vec![vec![1]]);
}
