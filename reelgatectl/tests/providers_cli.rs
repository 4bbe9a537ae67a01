use std::path::Path;

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command isolated from the caller's config, keys and state.
fn reelgate(dir: &Path) -> Command {
    let config = dir.join("config.toml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }
    let mut cmd = cargo_bin_cmd!("reelgate");
    cmd.current_dir(dir)
        .env("REELGATE_CONFIG", &config)
        .env_remove("TMDB_API_KEY")
        .env_remove("REELGATE_DATA_DIR")
        .env_remove("REELGATE_TMDB_API_BASE")
        .env_remove("REELGATE_REQUEST_TIMEOUT")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

#[test]
fn defaults_are_listed_with_first_active() {
    let dir = tempfile::tempdir().unwrap();
    reelgate(dir.path())
        .args(["providers", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* Vidsrc.vip"))
        .stdout(predicate::str::contains("  2Embed.cc"));
    assert!(!dir.path().join("data/stream-storage.json").exists());
}

#[test]
fn add_use_and_play_persist_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    reelgate(dir.path())
        .args([
            "providers",
            "add",
            "--name",
            "Custom",
            "--url",
            "https://custom.test/movie/{id}",
            "--tv-url",
            "https://custom.test/tv/{id}/{season}/{episode}",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("added provider 'Custom'"));

    reelgate(dir.path())
        .args(["providers", "use", "Custom"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(dir.path().join("data/stream-storage.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved["activeProvider"]["name"], "Custom");

    reelgate(dir.path())
        .args(["play", "603"])
        .assert()
        .success()
        .stdout("https://custom.test/movie/603\n");

    reelgate(dir.path())
        .args(["play", "1399", "--season", "2"])
        .assert()
        .success()
        .stdout("https://custom.test/tv/1399/2/1\n");
}

#[test]
fn episode_urls_use_the_tv_template() {
    let dir = tempfile::tempdir().unwrap();
    reelgate(dir.path())
        .args(["play", "1399", "--tv", "--season", "2", "--episode", "5"])
        .assert()
        .success()
        .stdout("https://vidsrc.vip/embed/tv/1399/2/5\n");
}

#[test]
fn provider_override_leaves_active_alone() {
    let dir = tempfile::tempdir().unwrap();
    reelgate(dir.path())
        .args(["play", "603", "--provider", "2Embed.cc"])
        .assert()
        .success()
        .stdout("https://www.2embed.cc/embed/603\n");

    reelgate(dir.path())
        .args(["providers", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vidsrc.vip (active)"));
}

#[test]
fn rejections_exit_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    reelgate(dir.path())
        .args([
            "providers",
            "add",
            "--name",
            "Vidsrc.vip",
            "--url",
            "x/{id}",
            "--tv-url",
            "x/{id}/{season}/{episode}",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    reelgate(dir.path())
        .args(["providers", "use", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no provider named 'Nope'"));

    reelgate(dir.path())
        .args(["providers", "remove", "Vidsrc.vip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active provider: 2Embed.cc"));

    reelgate(dir.path())
        .args(["providers", "remove", "2Embed.cc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be removed"));
}

#[test]
fn import_then_export() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("providers.json");
    std::fs::write(
        &file,
        r#"[
            {"name": "One", "url": "https://one.test/{id}", "tv_url": "https://one.test/{id}/{season}/{episode}"},
            {"name": "2Embed.cc", "url": "x", "tv_url": "y"}
        ]"#,
    )
    .unwrap();

    reelgate(dir.path())
        .args(["providers", "import"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("added    One"))
        .stdout(predicate::str::contains("1 added, 1 skipped"));

    let output = reelgate(dir.path())
        .args(["providers", "export"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let exported: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let names: Vec<&str> = exported
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Vidsrc.vip", "2Embed.cc", "One"]);
}

#[test]
fn info_lookup_failure_still_prints_url() {
    let dir = tempfile::tempdir().unwrap();
    reelgate(dir.path())
        .args(["play", "603", "--info"])
        .assert()
        .success()
        .stdout("https://vidsrc.vip/embed/movie/603\n")
        .stderr(predicate::str::contains("warning"));
}

#[test]
fn search_without_key_explains_setup() {
    let dir = tempfile::tempdir().unwrap();
    reelgate(dir.path())
        .args(["search", "heat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}

#[tokio::test(flavor = "multi_thread")]
async fn search_prints_results_from_tmdb() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/multi"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("query", "the matrix"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 603, "media_type": "movie", "title": "The Matrix",
                 "release_date": "1999-03-30"},
                {"id": 1, "media_type": "person", "name": "Someone"}
            ]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = reelgate(dir.path());
    cmd.env("TMDB_API_KEY", "test-key")
        .env("REELGATE_TMDB_API_BASE", format!("{}/3", server.uri()))
        .args(["search", "the", "matrix"]);

    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();
    output
        .assert()
        .success()
        .stdout("     603  Movie  The Matrix (1999)\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn details_print_poster_and_backdrop_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/949"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 949, "title": "Heat", "release_date": "1995-12-15",
            "vote_average": 7.9, "runtime": 170,
            "poster_path": "/p.jpg", "backdrop_path": "/b.jpg"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = reelgate(dir.path());
    cmd.env("TMDB_API_KEY", "test-key")
        .env("REELGATE_TMDB_API_BASE", format!("{}/3", server.uri()))
        .args(["details", "movie", "949"]);

    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();
    output
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Heat (1995)\n"))
        .stdout(predicate::str::contains(
            "poster: https://image.tmdb.org/t/p/w300/p.jpg\n\
             backdrop: https://image.tmdb.org/t/p/w500/b.jpg\n",
        ));
}
