use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn top_level_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("marquee");
    let output = cmd.arg("--help").assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&output);
    for command in ["categories", "search", "genre", "preset", "details", "name"] {
        assert!(text.contains(command), "help missing '{command}'");
    }
    assert!(text.contains("--config"), "help missing --config");
}

#[test]
fn listing_commands_take_page_and_base_url() {
    for command in ["search", "genre", "preset"] {
        let mut cmd = cargo_bin_cmd!("marquee");
        cmd.arg(command)
            .arg("--help")
            .assert()
            .success()
            .stdout(contains("--page"))
            .stdout(contains("--base-url"));
    }
}

#[test]
fn bad_preset_selector_is_rejected_before_any_request() {
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.arg("preset")
        .arg("trending_movies")
        .assert()
        .failure()
        .stderr(contains("unknown preset"));
}

#[test]
fn bad_details_domain_is_rejected() {
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.args(["details", "person", "1"])
        .assert()
        .failure()
        .stderr(contains("unknown media type"));
}
