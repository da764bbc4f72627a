#![allow(dead_code)]

use std::sync::Mutex;

use tilepath::{
    Coord, GridTile, Metric, Pathfinder, Route, SearchEvent, SearchObserver, TileGrid, Tiles,
    Topology,
};

pub type Tile = GridTile<char>;

/// `#` is stone, `~` water, `^` lava, `+` a fast lane; anything else costs 1.
pub fn terrain(to: &Tile, _from: &Tile) -> Option<i32> {
    match to.cell {
        '#' => None,
        '~' => Some(3),
        '^' => Some(21),
        '+' => Some(-1),
        _ => Some(1),
    }
}

pub fn pathfinder(text: &str) -> Pathfinder<TileGrid<char>> {
    pathfinder_with(text, Topology::Square)
}

pub fn pathfinder_with(text: &str, topology: Topology) -> Pathfinder<TileGrid<char>> {
    Pathfinder::builder(TileGrid::parse(text))
        .topology(topology)
        .cost(Metric::custom(terrain))
        .build()
}

/// The tiles marked `S` and `G`.
pub fn endpoints(pf: &Pathfinder<TileGrid<char>>) -> (Tile, Tile) {
    let map = pf.tiles();
    let s = map.find(|&c| c == 'S').expect("map has an S");
    let g = map.find(|&c| c == 'G').expect("map has a G");
    (map.tile(s).unwrap(), map.tile(g).unwrap())
}

pub fn coords(route: &Route<Tile>) -> Vec<Coord> {
    route.tiles.iter().map(|t| t.pos).collect()
}

pub fn has_repeat(route: &Route<Tile>) -> bool {
    let cs = coords(route);
    (0..cs.len()).any(|i| cs[i + 1..].contains(&cs[i]))
}

/// Collects every event it sees.
#[derive(Default)]
pub struct Recorder(pub Mutex<Vec<SearchEvent>>);

impl Recorder {
    pub fn events(&self) -> Vec<SearchEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl SearchObserver for Recorder {
    fn on_event(&self, event: &SearchEvent) {
        self.0.lock().unwrap().push(*event);
    }
}

