use common::{SleeperTestConfig, SLEEP_LINES};
use predicates::prelude::predicate;

mod common;

const SINGLE: &str = "[runtime]\nkind = \"single\"\n";

#[test]
fn test_rank_leader_reports_the_job() {
    let sleeper = SleeperTestConfig::with_config(SINGLE);

    let mut cmd = sleeper.cmd(&["rank", "42", "0"]);
    cmd.assert()
        .success()
        .stdout(format!("Job 42 on 1 processors\n{}", SLEEP_LINES));
}

#[test]
fn test_rank_leader_under_a_launcher() {
    let sleeper = SleeperTestConfig::new();

    let mut cmd = sleeper.cmd(&["rank", "7", "0"]);
    cmd.env("PMI_RANK", "0").env("PMI_SIZE", "4");
    cmd.assert()
        .success()
        .stdout(format!("Job 7 on 4 processors\n{}", SLEEP_LINES));
}

#[test]
fn test_rank_non_leader_stays_quiet() {
    let sleeper = SleeperTestConfig::new();

    let mut cmd = sleeper.cmd(&["rank", "7", "0"]);
    cmd.env("PMI_RANK", "1").env("PMI_SIZE", "4");
    cmd.assert().success().stdout(SLEEP_LINES);
}

#[test]
fn test_rank_without_a_launcher_is_a_group_of_one() {
    let sleeper = SleeperTestConfig::bare();

    let mut cmd = sleeper.cmd(&["rank", "3", "0"]);
    cmd.assert()
        .success()
        .stdout(format!("Job 3 on 1 processors\n{}", SLEEP_LINES));
}

#[test]
fn test_rank_missing_args() {
    let sleeper = SleeperTestConfig::new();

    let mut cmd = sleeper.cmd(&["rank", "42"]);
    cmd.assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Usage"));
}
