//! `drytoml cache show` and `drytoml cache clear` through the binary

use super::test_utils::{stderr, stdout, Workspace};
use drytoml::fetch::CacheService;

const URL_A: &str = "https://example.com/styles/a.toml";
const URL_B: &str = "https://example.com/styles/b.toml";

fn seeded() -> (Workspace, CacheService) {
    let ws = Workspace::new();
    let cache = CacheService::new(ws.cache_dir());
    cache.put(URL_A, &"a = 1\n".repeat(512)).unwrap();
    cache.put(URL_B, "b = 2\n").unwrap();
    (ws, cache)
}

#[test]
fn test_show_empty_cache() {
    let ws = Workspace::new();
    let output = ws.run(&["cache", "show"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Cache is empty:"));
}

#[test]
fn test_show_lists_entries_and_total() {
    let (ws, _cache) = seeded();
    let output = ws.run(&["cache", "show"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains(&CacheService::key(URL_A)));
    assert!(out.contains(&CacheService::key(URL_B)));
    assert!(out.contains("__total__"));
    assert!(out.contains("3.0"));
}

#[test]
fn test_show_json() {
    let (ws, _cache) = seeded();
    let output = ws.run(&["cache", "show", "--format", "json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["entries"].as_array().unwrap().len(), 2);
    assert_eq!(report["total"], 3072 + 6);
}

#[test]
fn test_clear_by_url_keeps_other_entries() {
    let (ws, cache) = seeded();
    let output = ws.run(&["cache", "clear", "--force", "--name", URL_A]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(cache.get(URL_A).unwrap(), None);
    assert!(cache.get(URL_B).unwrap().is_some());
    assert!(stdout(&output).contains(&CacheService::key(URL_B)));
}

#[test]
fn test_clear_all_then_nothing_left() {
    let (ws, cache) = seeded();
    let output = ws.run(&["cache", "clear", "--force"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(cache.entries().unwrap().is_empty());

    let output = ws.run(&["cache", "clear", "--force"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Nothing cleared from"));
}

#[test]
fn test_cache_dir_flag_overrides_environment() {
    let (ws, _cache) = seeded();
    let other = ws.path("other-cache");
    let output = ws.run(&["--cache-dir", other.to_str().unwrap(), "cache", "show"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Cache is empty:"));
}
