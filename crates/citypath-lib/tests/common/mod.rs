#![allow(dead_code)]

use std::path::PathBuf;

use citypath_lib::{NetworkProvider, OverpassFileProvider, RoadNetwork};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn ottawa_fixture() -> PathBuf {
    fixtures_dir().join("ottawa_overpass.json")
}

/// Road network decoded from the checked-in Overpass fixture.
pub fn ottawa_network() -> RoadNetwork {
    OverpassFileProvider::new(ottawa_fixture())
        .fetch("Ottawa, Canada")
        .expect("fixture network loads")
}

/// A(0,0), B(0,1), C(0,2) with A-B and B-C of length 1 and a direct A-C of
/// length 5.
pub fn triangle() -> RoadNetwork {
    RoadNetwork::builder()
        .node(1, 0.0, 0.0)
        .node(2, 0.0, 1.0)
        .node(3, 0.0, 2.0)
        .road(1, 2, 1.0)
        .road(2, 3, 1.0)
        .road(1, 3, 5.0)
        .build()
        .expect("valid network")
}

/// Linear congruential generator with Knuth's MMIX constants; the same seed
/// always yields the same sequence.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    pub fn unit(&mut self) -> f64 {
        self.next_u64() as f64 / (1u64 << 31) as f64
    }
}
