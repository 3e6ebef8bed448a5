use mudmap::error::MapError;
use mudmap::import::{load_atlas, load_zone_file};
use mudmap::services::edge_command;
use mudmap::{Direction, NodeId, ZoneId};
use std::fs;
use std::path::{Path, PathBuf};

fn content_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("content")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mudmap-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn loads_bundled_zones_in_file_order() {
    let atlas = load_atlas(&content_dir()).unwrap();
    let names: Vec<_> = atlas.zones().map(|z| z.name.clone()).collect();
    assert_eq!(names, vec!["Forest".to_string(), "Town".to_string()]);

    let town = atlas.zone(ZoneId(1)).unwrap();
    let vault = town.node(NodeId(4)).unwrap();
    assert_eq!(vault.position.z, -1);
    assert_eq!(town.labels().len(), 1);

    let tent = town.node(NodeId(6)).unwrap().edge_to(NodeId(8)).unwrap();
    assert_eq!(tent.direction, Direction::None);
    assert_eq!(edge_command(tent), "enter tent");

    let forest = atlas.find("forest").unwrap();
    assert!(forest.node(NodeId(9)).unwrap().map_link);
    assert!(forest.node(NodeId(1)).unwrap().edges[1].hidden);
}

#[test]
fn single_file() {
    let zone = load_zone_file(&content_dir().join("town.yaml")).unwrap();
    assert_eq!(zone.nodes().len(), 8);
    assert_eq!(zone.dangling_edges().count(), 0);
}

#[test]
fn directory_skips_other_files() {
    let dir = scratch_dir("skip");
    fs::write(dir.join("a.yml"), "id: 5\nname: Cellar\nnodes:\n  - { id: 1, name: Barrel Room }\n").unwrap();
    fs::write(dir.join("notes.txt"), "not a zone").unwrap();

    let atlas = load_atlas(&dir).unwrap();
    assert_eq!(atlas.len(), 1);
    assert_eq!(atlas.zone(ZoneId(5)).unwrap().nodes()[0].name, "Barrel Room");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn empty_directory_is_an_error() {
    let dir = scratch_dir("empty");
    assert!(matches!(load_atlas(&dir), Err(MapError::NoZones(_))));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn broken_yaml_is_an_error() {
    let dir = scratch_dir("broken");
    fs::write(dir.join("bad.yaml"), "id: [unterminated").unwrap();
    assert!(matches!(load_atlas(&dir), Err(MapError::Yaml(_))));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_is_an_error() {
    assert!(matches!(
        load_zone_file(Path::new("/definitely/not/here.yaml")),
        Err(MapError::Io(_))
    ));
}
