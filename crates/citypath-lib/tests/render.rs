mod common;

use citypath_lib::{find_shortest_path, render_path, Coordinate, Error, MarkerKind};

use common::triangle;

#[test]
fn single_node_path_has_coincident_markers_and_no_lines() {
    let network = triangle();
    let map = render_path(&network, &[2]).expect("renders");

    assert_eq!(map.markers.len(), 2);
    assert_eq!(map.markers[0].location, map.markers[1].location);
    assert_eq!(map.markers[0].kind, MarkerKind::Start);
    assert_eq!(map.markers[1].kind, MarkerKind::End);
    assert!(map.lines.is_empty());
}

#[test]
fn n_node_path_has_two_markers_and_n_minus_one_lines() {
    let network = triangle();
    let path = find_shortest_path(&network, 1, 3).expect("route exists");
    let map = render_path(&network, path.nodes()).expect("renders");

    assert_eq!(map.markers.len(), 2);
    assert_eq!(map.lines.len(), path.nodes().len() - 1);
    assert_eq!(map.center, Coordinate::new(0.0, 0.0));
    assert_eq!(map.markers[1].location, Coordinate::new(0.0, 2.0));
}

#[test]
fn lines_connect_consecutive_nodes() {
    let network = triangle();
    let map = render_path(&network, &[1, 2, 3]).expect("renders");

    let endpoints: Vec<(i64, i64)> = map.lines.iter().map(|l| (l.from, l.to)).collect();
    assert_eq!(endpoints, vec![(1, 2), (2, 3)]);
    assert_eq!(
        map.lines[1].points,
        [Coordinate::new(0.0, 1.0), Coordinate::new(0.0, 2.0)]
    );
}

#[test]
fn empty_path_is_rejected() {
    let network = triangle();
    assert!(matches!(render_path(&network, &[]), Err(Error::EmptyPath)));
}

#[test]
fn map_document_serialises_to_json() {
    let network = triangle();
    let map = render_path(&network, &[1, 2]).expect("renders");
    let value = serde_json::to_value(&map).expect("serialises");

    assert_eq!(value["zoom"], 12);
    assert_eq!(value["markers"][0]["kind"], "start");
    assert_eq!(value["markers"][1]["color"], "red");
    assert_eq!(value["lines"][0]["color"], "blue");
}
