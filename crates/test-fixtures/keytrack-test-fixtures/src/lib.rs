//! Shared JSON fixtures for keytrack tests.
//!
//! `fixtures/manifest.json` maps fixture names to files under `fixtures/`.
//! Clips live in `animations/`; `samples/` holds the values each clip is
//! expected to produce at given times.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<std::result::Result<Manifest, String>> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).map_err(|err| format!("fixtures manifest should parse: {err}"))
});

#[derive(Debug, Deserialize)]
struct Manifest {
    animations: HashMap<String, String>,
    #[serde(default)]
    samples: HashMap<String, String>,
}

fn manifest() -> Result<&'static Manifest> {
    MANIFEST.as_ref().map_err(|err| anyhow!("{err}"))
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod animations {
    use super::*;

    pub fn keys() -> Result<Vec<String>> {
        let mut keys: Vec<String> = manifest()?.animations.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&manifest()?.animations, "animation", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&manifest()?.animations, "animation", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&manifest()?.animations, "animation", name)?;
        Ok(resolve_path(rel))
    }
}

/// One expected reading: the value of `track` after seeking to `time` ms.
/// `value` keeps the clip's own JSON value encoding.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    pub track: String,
    pub time: f32,
    pub value: serde_json::Value,
}

pub mod samples {
    use super::*;

    pub fn keys() -> Result<Vec<String>> {
        let mut keys: Vec<String> = manifest()?.samples.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    pub fn load(name: &str) -> Result<Vec<Sample>> {
        let rel = lookup(&manifest()?.samples, "samples", name)?;
        super::load_json(rel)
    }
}
