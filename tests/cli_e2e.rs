use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn autopulse(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("autopulse").unwrap();
    cmd.env("AUTOPULSE_HOME", home)
        .env_remove("AUTOPULSE_PASSPHRASE")
        .env_remove("AUTOPULSE_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn first_run_lists_seed_and_persists_it() {
    let home = tempfile::tempdir().unwrap();

    autopulse(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Electric Pickup Trucks Hit the Mainstream",
        ))
        .stdout(predicate::str::contains("Fuel Prices").not());

    assert!(home.path().join("autopulse_posts.json").exists());
}

#[test]
fn category_and_search_filters() {
    let home = tempfile::tempdir().unwrap();

    autopulse(home.path())
        .args(["list", "--category", "review"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compact Hatchback"))
        .stdout(predicate::str::contains("Electric Pickup").not());

    autopulse(home.path())
        .args(["list", "--search", "nothing-matches-this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No articles found."));

    autopulse(home.path())
        .args(["route", "/#/category/Motorsport"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Season Opener"));
}

#[test]
fn admin_commands_need_the_passphrase() {
    let home = tempfile::tempdir().unwrap();
    let out = home.path().join("posts.json");

    autopulse(home.path())
        .arg("export")
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Admin passphrase required"));

    autopulse(home.path())
        .args(["--passphrase", "wrong", "export", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid passphrase"));

    assert!(!out.exists());
}

#[test]
fn create_show_and_delete() {
    let home = tempfile::tempdir().unwrap();

    autopulse(home.path())
        .env("AUTOPULSE_PASSPHRASE", "autopulse")
        .args([
            "create",
            "--title",
            "Track Day Diaries",
            "--content",
            "<p>Fast laps.</p>",
            "--keywords",
            "track, , racing",
            "--category",
            "Motorsport",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Article created: Track Day Diaries"))
        .stdout(predicate::str::contains("slug: track-day-diaries"));

    autopulse(home.path())
        .args(["show", "track-day-diaries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Fast laps.</p>"))
        .stdout(predicate::str::contains("track, racing"));

    autopulse(home.path())
        .args(["--passphrase", "autopulse", "delete", "track-day-diaries", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Article deleted: Track Day Diaries"));

    autopulse(home.path())
        .args(["show", "track-day-diaries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Article not found"));
}

#[test]
fn markdown_content_is_converted() {
    let home = tempfile::tempdir().unwrap();
    let content = home.path().join("body.md");
    fs::write(&content, "# Heading\n\nSome *emphasis*.\n").unwrap();

    autopulse(home.path())
        .args(["--passphrase", "autopulse", "create", "--title", "Markdown Post"])
        .arg("--content-file")
        .arg(&content)
        .arg("--markdown")
        .assert()
        .success();

    autopulse(home.path())
        .args(["show", "markdown-post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Heading</h1>"))
        .stdout(predicate::str::contains("<em>emphasis</em>"));
}

#[test]
fn show_head_renders_metadata() {
    let home = tempfile::tempdir().unwrap();

    autopulse(home.path())
        .args(["show", "electric-pickup-trucks-hit-the-mainstream", "--head"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<title>Electric Pickup Trucks Hit the Mainstream | AutoPulse News</title>",
        ))
        .stdout(predicate::str::contains(
            r#"<link rel="canonical" href="http://localhost:3000/#/post/electric-pickup-trucks-hit-the-mainstream">"#,
        ))
        .stdout(predicate::str::contains("application/ld+json"));
}

#[test]
fn rejected_import_keeps_existing_articles() {
    let home = tempfile::tempdir().unwrap();
    let bad = home.path().join("bad.json");
    fs::write(&bad, r#"[{"id":"1","title":"A"},{"title":"No id"}]"#).unwrap();

    autopulse(home.path())
        .args(["--passphrase", "autopulse", "import"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid file format"));

    autopulse(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Electric Pickup Trucks"));
}

#[test]
fn import_then_export() {
    let home = tempfile::tempdir().unwrap();
    let good = home.path().join("good.json");
    fs::write(
        &good,
        r#"[{"id":"a","title":"Alpha","published":true},{"id":"b","title":"Bravo"}]"#,
    )
    .unwrap();

    autopulse(home.path())
        .args(["--passphrase", "autopulse", "import"])
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Articles imported successfully! (2 total)",
        ));

    let out = home.path().join("export.json");
    autopulse(home.path())
        .args(["--passphrase", "autopulse", "export", "-o"])
        .arg(&out)
        .assert()
        .success();

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let ids: Vec<_> = exported
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn sitemap_uses_configured_origin() {
    let home = tempfile::tempdir().unwrap();

    autopulse(home.path())
        .args(["config", "origin", "https://autopulse.example/"])
        .assert()
        .success();

    let out = home.path().join("sitemap.xml");
    autopulse(home.path())
        .args(["--passphrase", "autopulse", "sitemap", "-o"])
        .arg(&out)
        .assert()
        .success();

    let xml = fs::read_to_string(&out).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains("<loc>https://autopulse.example/#/</loc>"));
    assert!(xml.contains(
        "<loc>https://autopulse.example/#/post/season-opener-what-we-learned-from-the-first-race</loc>"
    ));
    assert!(xml.contains("<lastmod>2024-03-17</lastmod>"));
    assert!(!xml.contains("fuel-prices-and-the-used-car-market"));
}

#[test]
fn generate_adds_unpublished_draft() {
    let home = tempfile::tempdir().unwrap();
    let response = r#"{"title":"Solid-State Batteries Arrive","meta_description":"Faster charging.","keywords":["battery","ev"],"content":"<p>Soon.</p>"}"#;

    autopulse(home.path())
        .args(["--passphrase", "autopulse", "generate", "--response", "-"])
        .write_stdin(response)
        .assert()
        .success()
        .stdout(predicate::str::contains("Solid-State Batteries Arrive"));

    autopulse(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solid-State").not());

    autopulse(home.path())
        .args(["--passphrase", "autopulse", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solid-State Batteries Arrive"));
}

#[test]
fn print_request_needs_no_session() {
    let home = tempfile::tempdir().unwrap();

    autopulse(home.path())
        .args(["generate", "--print-request"])
        .assert()
        .success()
        .stdout(predicate::str::contains("responseSchema"))
        .stdout(predicate::str::contains("meta_description"));
}
