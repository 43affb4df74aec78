use hits::{
    build_hits, group_pairs, select_hits, Aggregate, BuildOptions, ErrorKind, HitType, Hits,
    HitsError, SelectMode, Selection, Side, SortStrategy,
};

fn pairs(hits: &Hits) -> Vec<(u32, u32)> { hits.iter().collect() }

#[test]
fn forced_paths_agree_on_reverse_maps() {
    let left = [2, 3, 2, 1, 3, 2];
    let right = [1, 2, 3, 4, 5, 6];
    let mut maps = Vec::new();
    for strategy in [SortStrategy::Counting, SortStrategy::Comparison] {
        let options = BuildOptions::default().with_reverse_map().with_strategy(strategy);
        let (hits, revmap) = build_hits(&left, &right, 3, 6, &options).unwrap();
        assert_eq!(hits.left(), &[1, 2, 2, 2, 3, 3]);
        maps.push(revmap.unwrap());
    }
    assert_eq!(maps[0], maps[1]);
    assert_eq!(maps[0].as_slice(), &[4, 1, 3, 6, 2, 5]);
}

#[test]
fn sparse_hits_use_comparison_sort() {
    // Fewer hits than left nodes.
    let options = BuildOptions::default().with_reverse_map();
    let (hits, revmap) = build_hits(&[90, 7, 90], &[1, 2, 3], 100, 3, &options).unwrap();
    assert_eq!(pairs(&hits), vec![(7, 2), (90, 1), (90, 3)]);
    assert_eq!(revmap.unwrap().gather(&["a", "b", "c"]), vec!["b", "a", "c"]);
}

#[test]
fn empty_input_builds_empty_table() {
    let options = BuildOptions::default().with_reverse_map();
    let (hits, revmap) = build_hits::<i32, i32>(&[], &[], 5, 2, &options).unwrap();
    assert!(hits.is_empty());
    assert_eq!((hits.n_left(), hits.n_right()), (5, 2));
    assert!(revmap.unwrap().is_empty());
}

#[test]
fn left_bounds_are_checked() {
    for bad in [0, 4] {
        let err = Hits::new(&[1, bad], &[1, 1], 3, 1).unwrap_err();
        assert_eq!(err, HitsError::OutOfRange { side: Side::Left, position: 2, value: bad as i64, bound: 3 });
        assert_eq!(err.kind(), ErrorKind::Domain);
    }
}

#[test]
fn select_modes_parse_from_text() {
    let mode: SelectMode = "last".parse().unwrap();
    assert_eq!(mode, SelectMode::Last);
    let err = "largest".parse::<SelectMode>().unwrap_err();
    assert_eq!(err, HitsError::UnknownSelectMode("largest".to_owned()));
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn dedup_with_count_is_a_usage_error() {
    let mode = "count".parse().unwrap();
    let err = select_hits(&[1, 2], &[1, 1], 2, 1, mode, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn dedup_on_unsorted_input_is_an_ordering_error() {
    let err = select_hits(&[1, 3, 2], &[1, 2, 3], 3, 3, SelectMode::Arbitrary, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Ordering);
    // Without dedup the order does not matter.
    let picks = select_hits(&[1, 3, 2], &[1, 2, 3], 3, 3, SelectMode::Arbitrary, false).unwrap();
    assert_eq!(picks, Aggregate::Picks(vec![Some(1), Some(3), Some(2)]));
}

#[test]
fn table_select_reuses_validated_columns() {
    let hits = Hits::new(&[2, 2, 1], &[3, 1, 2], 3, 3).unwrap();
    let Selection::Reduced(counts) = hits.select(SelectMode::Count, false).unwrap() else { panic!("expected counts") };
    assert_eq!(counts.counts(), Some(&[1, 2, 0][..]));
    let Selection::Reduced(first) = hits.select(SelectMode::First, false).unwrap() else { panic!("expected picks") };
    assert_eq!(first.picks(), Some(&[Some(2), Some(1), None][..]));
}

#[test]
fn group_pairs_examples() {
    let all = group_pairs(&[3], HitType::All).unwrap();
    assert_eq!(all.len(), 9);
    let upper = group_pairs(&[3], HitType::try_from(1).unwrap()).unwrap();
    assert_eq!(pairs(&upper), vec![(1, 2), (1, 3), (2, 3)]);
    let lower = group_pairs(&[2, 3], HitType::try_from(-1).unwrap()).unwrap();
    assert_eq!(pairs(&lower), vec![(2, 1), (4, 3), (5, 3), (5, 4)]);
    assert!(lower.is_self_hits());
    assert_eq!(HitType::try_from(2).unwrap_err(), HitsError::UnknownHitType(2));
}

#[test]
fn transposed_group_pairs_swap_triangles() {
    let upper = group_pairs(&[4], HitType::Upper).unwrap();
    let lower = group_pairs(&[4], HitType::Lower).unwrap();
    let (transposed, _) = upper.transpose();
    assert_eq!(transposed, lower);
}
