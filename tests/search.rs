mod common;

use comparator::models::{Build, CatalogStats};

async fn get_search(address: &str, query: &[(&str, &str)]) -> Vec<Build> {
    reqwest::Client::new()
        .get(&format!("{}/api/search", address))
        .query(query)
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .expect("invalid body")
}

#[tokio::test]
async fn empty_filter_set_returns_whole_catalog_ordered_by_price() {
    let app = common::spawn_app().await;
    common::seed(
        &app.db_pool,
        &[
            common::sample_build("b", 200_000),
            common::sample_build("a", 100_000),
            common::sample_build("c", 300_000),
        ],
    )
    .await;

    let builds = get_search(&app.address, &[]).await;
    let ids: Vec<&str> = builds.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn q_matches_title_or_description_case_insensitively() {
    let app = common::spawn_app().await;

    let mut in_title = common::sample_build("in_title", 100_000);
    in_title.title = "Игровой ПК Phantom".to_string();
    let mut in_description = common::sample_build("in_description", 110_000);
    in_description.description = "Корпус phantom в комплекте".to_string();
    let mut unrelated = common::sample_build("unrelated", 120_000);
    unrelated.title = "Офисный ПК".to_string();
    unrelated.description = "Ничего общего".to_string();

    common::seed(&app.db_pool, &[in_title, in_description, unrelated]).await;

    let builds = get_search(&app.address, &[("q", "PHANTOM")]).await;
    let ids: Vec<&str> = builds.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["in_title", "in_description"]);
}

#[tokio::test]
async fn filters_are_conjunctive() {
    let app = common::spawn_app().await;

    let mut both = common::sample_build("both", 100_000);
    both.cpu = "I5-12400F".to_string();
    both.gpu = "RTX 3060".to_string();
    let mut cpu_only = common::sample_build("cpu_only", 110_000);
    cpu_only.cpu = "I5-12400F".to_string();
    cpu_only.gpu = "RX 6600".to_string();
    let mut gpu_only = common::sample_build("gpu_only", 120_000);
    gpu_only.cpu = "R5 5600X".to_string();
    gpu_only.gpu = "RTX 3060".to_string();

    common::seed(&app.db_pool, &[both, cpu_only, gpu_only]).await;

    let builds = get_search(&app.address, &[("cpu", "i5"), ("gpu", "rtx")]).await;
    let ids: Vec<&str> = builds.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["both"]);
}

#[tokio::test]
async fn price_bounds_are_inclusive() {
    let app = common::spawn_app().await;
    common::seed(
        &app.db_pool,
        &[
            common::sample_build("below", 99_999),
            common::sample_build("low", 100_000),
            common::sample_build("high", 200_000),
            common::sample_build("above", 200_001),
        ],
    )
    .await;

    let builds = get_search(
        &app.address,
        &[("min_price", "100000"), ("max_price", "200000")],
    )
    .await;
    let ids: Vec<&str> = builds.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["low", "high"]);
}

#[tokio::test]
async fn company_filter_matches_substring() {
    let app = common::spawn_app().await;

    let mut target = common::sample_build("target", 100_000);
    target.company = "VA-PC Store".to_string();
    let other = common::sample_build("other", 110_000);
    common::seed(&app.db_pool, &[target, other]).await;

    let builds = get_search(&app.address, &[("company", "va-pc")]).await;
    let ids: Vec<&str> = builds.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["target"]);
}

#[tokio::test]
async fn stats_counts_catalog_partitions() {
    let app = common::spawn_app().await;

    let mut ours = common::sample_build("our_1", 150_000);
    ours.is_our_build = true;
    common::seed(
        &app.db_pool,
        &[
            ours,
            common::sample_build("market_1", 100_000),
            common::sample_build("market_2", 120_000),
        ],
    )
    .await;

    let stats: CatalogStats = reqwest::Client::new()
        .get(&format!("{}/api/stats", &app.address))
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .expect("invalid body");

    assert_eq!(stats.total_builds, 3);
    assert_eq!(stats.our_builds, 1);
    assert_eq!(stats.other_builds, 2);
    assert!(stats.last_update.is_some());
}

#[tokio::test]
async fn stats_on_empty_catalog_has_no_last_update() {
    let app = common::spawn_app().await;

    let stats: CatalogStats = reqwest::Client::new()
        .get(&format!("{}/api/stats", &app.address))
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .expect("invalid body");

    assert_eq!(stats.total_builds, 0);
    assert!(stats.last_update.is_none());
}
