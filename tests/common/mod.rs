//! Shared fixtures for integration tests

use dockviz::{parse_images_json, Image};
use std::fs;
use std::path::PathBuf;

#[allow(dead_code)]
pub const BASE_ID: &str = "511136ea3c5a64f264b78b5433614aec563103b4d4702f3ba7d4d2698e22c158";
#[allow(dead_code)]
pub const UBUNTU_ID: &str = "9cd978db300e27386baa9dd791bf6dc818f13e52235b26e95703361ec3c94dc6";
#[allow(dead_code)]
pub const APP_ID: &str = "3f54d8b4c5a01c3ac7bfa3a56d3c9c3b1f0f4c2a8e6c1f2d3b4a5c6d7e8f9a0b";

/// Tree of the fixture snapshot with default options
#[allow(dead_code)]
pub const FOREST: &str = "\
├─511136ea3c5a Virtual Size: 0.0 B
│ └─e465fff03bce Virtual Size: 192.5 MB
│   ├─9cd978db300e Virtual Size: 197.8 MB Tags: ubuntu:latest, ubuntu:14.04
│   │ └─3f54d8b4c5a0 Virtual Size: 250.0 MB Tags: registry.local:5000/team/app:1.0, registry.local:5000/team/app:latest
│   └─0b9ea3a3b1b0 Virtual Size: 193.0 MB
└─a9eb17255234 Virtual Size: 2.4 MB Tags: busybox:latest
";

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("images.json")
}

#[allow(dead_code)]
pub fn fixture_json() -> String {
    fs::read_to_string(fixture_path()).expect("Should read fixture snapshot")
}

#[allow(dead_code)]
pub fn load_fixture() -> Vec<Image> {
    parse_images_json(fixture_json().as_bytes()).expect("Fixture snapshot should parse")
}
