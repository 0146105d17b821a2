use crate::analysis::{PathStats, analyze, shortest_path_len};
use crate::experiment::trial_rng;
use crate::fault::inject_failures;
use crate::net::NodeId;
use crate::topo::fat_tree::build_fat_tree;

#[test]
fn fat_tree_k4_hop_counts_by_locality() {
    let topo = build_fat_tree(4).expect("k=4");
    let net = &topo.net;
    let src = topo.host(0, 0, 0);

    assert_eq!(shortest_path_len(net, src, src), Some(0));
    assert_eq!(shortest_path_len(net, src, topo.host(0, 0, 1)), Some(2));
    assert_eq!(shortest_path_len(net, src, topo.host(0, 1, 0)), Some(4));
    assert_eq!(shortest_path_len(net, src, topo.host(1, 0, 0)), Some(6));
    assert_eq!(shortest_path_len(net, src, topo.host(3, 1, 1)), Some(6));
}

#[test]
fn fat_tree_k4_is_fully_connected() {
    let topo = build_fat_tree(4).expect("k=4");
    let hosts = topo.hosts();
    let pairs = hosts
        .iter()
        .flat_map(move |&a| hosts.iter().filter(move |&&b| b != a).map(move |&b| (a, b)))
        .collect::<Vec<_>>();
    assert_eq!(pairs.len(), 240);

    let stats = analyze(&topo.net, &pairs);
    assert_eq!(stats.reachable, 240);
    assert_eq!(stats.reachability_pct, 100.0);
    // per source: 1 pair at 2 hops, 2 at 4 hops, 12 at 6 hops
    let expected_avg = (2.0 + 2.0 * 4.0 + 12.0 * 6.0) / 15.0;
    assert!((stats.avg_path_len - expected_avg).abs() < 1e-12);
}

#[test]
fn empty_pair_list_yields_zeros() {
    let topo = build_fat_tree(4).expect("k=4");
    assert_eq!(analyze(&topo.net, &[]), PathStats::default());
}

#[test]
fn full_failure_gives_zero_reachability() {
    let mut topo = build_fat_tree(4).expect("k=4");
    inject_failures(&mut topo.net, 100.0, &mut trial_rng(0)).expect("inject");

    let pairs = vec![(topo.host_at(0), topo.host_at(1)), (topo.host_at(2), topo.host_at(9))];
    let stats = analyze(&topo.net, &pairs);
    assert_eq!(stats.checked, 2);
    assert_eq!(stats.reachable, 0);
    assert_eq!(stats.reachability_pct, 0.0);
    assert_eq!(stats.avg_path_len, 0.0);
}

#[test]
fn unreachable_pairs_only_lower_reachability() {
    let mut topo = build_fat_tree(4).expect("k=4");
    let isolated = topo.host_at(0);
    let anchor = topo.net.node(isolated).edge_anchor.expect("anchor");
    let link = topo.net.find_link(isolated, anchor).expect("host link");
    topo.net.remove_link(link);

    let pairs: Vec<(NodeId, NodeId)> = vec![
        (isolated, topo.host_at(1)),
        (topo.host_at(1), isolated),
        (topo.host_at(2), topo.host_at(3)),
        (topo.host_at(4), topo.host_at(8)),
    ];
    let stats = analyze(&topo.net, &pairs);
    assert_eq!(stats.reachable, 2);
    assert_eq!(stats.reachability_pct, 50.0);
    assert_eq!(stats.avg_path_len, (2.0 + 6.0) / 2.0);
    assert!(stats.avg_path_len.is_finite());
}

#[test]
fn cached_analysis_matches_per_pair_bfs() {
    let mut topo = build_fat_tree(6).expect("k=6");
    inject_failures(&mut topo.net, 15.0, &mut trial_rng(5)).expect("inject");

    let hosts = topo.hosts();
    let pairs = (0..hosts.len())
        .flat_map(|i| (0..6).map(move |d| (i, (i * 7 + d + 1) % 54)))
        .filter(|(a, b)| a != b)
        .map(|(a, b)| (hosts[a], hosts[b]))
        .collect::<Vec<_>>();

    let stats = analyze(&topo.net, &pairs);

    let mut reachable = 0;
    let mut total = 0u64;
    for &(a, b) in &pairs {
        if let Some(h) = shortest_path_len(&topo.net, a, b) {
            reachable += 1;
            total += u64::from(h);
        }
    }
    assert_eq!(stats.reachable, reachable);
    assert_eq!(stats.total_hops, total);
    assert!((0.0..=100.0).contains(&stats.reachability_pct));
}
