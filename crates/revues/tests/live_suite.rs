use revues_core::Scenario;
use revues_core::client::ApiClient;
use revues_core::config::SuiteConfig;

/// This test is marked as `ignore` because it drives the public demo
/// deployment over the network. Run it manually when checking the suite
/// against the live service:
/// `cargo test --package revues --test live_suite -- --ignored`
#[tokio::test]
#[ignore]
async fn standard_scenario_against_live_service() {
    let config = SuiteConfig::default();

    let client = ApiClient::authenticate(&config)
        .await
        .expect("authentication against the live service failed");

    let report = Scenario::standard().run(&client).await;

    assert!(report.all_passed(), "failed steps: {:?}", report.steps);
}
