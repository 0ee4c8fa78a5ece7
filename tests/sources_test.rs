//! HTTP integration tests against mocked scouting services
//!
//! Every service is served from one mock server. Unmatched requests get a 404,
//! which the client reports as a status error.

use action_scout::{
    core::{OfficialCredentials, ScoutConfig},
    sources::ScoutClient,
    ScoutError, Season,
};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer, tweak: impl FnOnce(&mut ScoutConfig)) -> ScoutClient {
    let mut config = ScoutConfig::default().with_base_url(&server.uri());
    config.required_teams = Vec::new();
    tweak(&mut config);
    ScoutClient::new(config).unwrap()
}

fn leaderboard_page(rows: &[(u32, &str, f64, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(n, name, opr, record)| {
            format!("<tr><td>1</td><td>{n} {name}</td><td>{opr}</td><td>{record}</td></tr>")
        })
        .collect();
    format!(
        "<table><tr><th>Rank</th><th>Team</th><th>NP OPR</th><th>Record (W-L-T)</th></tr>{body}</table>"
    )
}

#[cfg(test)]
mod roster_tests {
    use super::*;

    #[tokio::test]
    async fn test_roster_sweep_merges_and_sorts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/teams/search"))
            .and(query_param("searchText", "a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "number": 300, "name": "Alpha Bots", "state": "MO" },
                    { "number": 5, "name": "Five", "state": "KS" }
                ]
            })))
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/teams/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "number": 5, "name": "Five", "state": "KS" },
                { "name": "No Number" }
            ])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/teams/19448"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "number": 19448, "name": "Required" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, |c| c.required_teams = vec![19448, 25779]);
        let roster = client.fetch_roster().await.unwrap();

        let numbers: Vec<u64> = roster.iter().filter_map(|t| t["number"].as_u64()).collect();
        assert_eq!(numbers, vec![5, 300, 19448]);
    }

    #[tokio::test]
    async fn test_roster_all_queries_failing_reports_last_error() {
        let server = MockServer::start().await;
        let client = client_for(&server, |_| {});

        let result = client.fetch_roster().await;
        assert!(matches!(result, Err(ScoutError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_roster_empty_is_no_teams() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "teams": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, |_| {});
        assert!(matches!(client.fetch_roster().await, Err(ScoutError::NoTeams)));
    }

    #[tokio::test]
    async fn test_fetch_team_falls_back_to_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/search"))
            .and(query_param("searchText", "23250"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "number": 123250, "name": "Other" },
                { "number": 23250, "name": "Wanted" }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server, |_| {});
        let team = client.fetch_team(23250).await.unwrap();
        assert_eq!(team["name"], "Wanted");

        let missing = client.fetch_team(1).await;
        assert!(matches!(missing, Err(ScoutError::TeamNotFound { number: 1 })));
    }
}

#[cfg(test)]
mod quick_stats_tests {
    use super::*;

    #[tokio::test]
    async fn test_quick_stats_first_route() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/7/quick-stats"))
            .and(query_param("season", "2025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quick_stats": { "auto_avg": 12.5, "np_opr": 55.0, "win_pct": 75 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, |_| {});
        let record = client.fetch_quick_stats(7, Season::new(2025)).await.unwrap();

        assert_eq!(record.auto_points, Some(12.5));
        assert_eq!(record.total_opr, Some(55.0));
        assert_eq!(record.win_rate, Some(0.75));
    }

    #[tokio::test]
    async fn test_quick_stats_skips_empty_payloads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/7/quick-stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "quickStats": {} })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/teams/7/quickstats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "np_avg": 61.0 })))
            .mount(&server)
            .await;

        let client = client_for(&server, |_| {});
        let record = client.fetch_quick_stats(7, Season::new(2025)).await.unwrap();
        assert_eq!(record.total_points, Some(61.0));
    }

    #[tokio::test]
    async fn test_quick_stats_event_average_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/7/events/2025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "eventCode": "A", "stats": { "np_avg": 40, "auto_avg": 10 } },
                { "eventCode": "B", "stats": { "np_avg": 60, "auto_avg": "20" } }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server, |_| {});
        let record = client.fetch_quick_stats(7, Season::new(2025)).await.unwrap();

        assert_eq!(record.total_points, Some(50.0));
        assert_eq!(record.auto_points, Some(15.0));
    }

    #[tokio::test]
    async fn test_quick_stats_nothing_anywhere() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/7/events/2025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server, |_| {});
        let result = client.fetch_quick_stats(7, Season::new(2025)).await;
        assert!(matches!(result, Err(ScoutError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_quick_stats_batch_drops_failures() {
        let server = MockServer::start().await;
        for n in [1, 3] {
            Mock::given(method("GET"))
                .and(path(format!("/teams/{n}/quick-stats")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "opr": n * 10 })))
                .mount(&server)
                .await;
        }

        let client = client_for(&server, |c| c.batch_size = 2);
        let stats = client
            .fetch_quick_stats_batch(&[1, 2, 3], Season::new(2025))
            .await;

        assert_eq!(stats.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(stats[&3].total_opr, Some(30.0));
    }
}

#[cfg(test)]
mod records_tests {
    use super::*;

    #[tokio::test]
    async fn test_records_paginate_until_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/records/2025/teams"))
            .and(query_param("page", "1"))
            .and(header("Accept", "text/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(leaderboard_page(&[
                (19448, "Action Robotics", 88.5, "10-2-1"),
                (5, "Five", 30.0, "1-5-0"),
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/records/2025/teams"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(leaderboard_page(&[
                (19448, "Action Robotics", 70.0, "3-3-0"),
                (23250, "Gear Heads", 64.0, "8-4-0"),
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/records/2025/teams"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>No more teams</p>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, |_| {});
        let records = client.fetch_season_records(Season::new(2025)).await.unwrap();

        assert_eq!(records.keys().copied().collect::<Vec<_>>(), vec![5, 19448, 23250]);
        let best = &records[&19448];
        assert_eq!(best.total_opr, Some(88.5));
        assert_eq!((best.wins, best.losses, best.ties), (Some(10), Some(2), Some(1)));

        // Served from cache; the `expect(1)` counts above would fail otherwise.
        let again = client.fetch_season_records(Season::new(2025)).await.unwrap();
        assert_eq!(again, records);
    }

    #[tokio::test]
    async fn test_records_missing_season() {
        let server = MockServer::start().await;
        let client = client_for(&server, |_| {});

        let result = client.fetch_season_records(Season::new(2019)).await;
        assert!(matches!(result, Err(ScoutError::NoSeasonRecords { season: 2019 })));
    }
}

#[cfg(test)]
mod official_tests {
    use super::*;

    fn with_token(config: &mut ScoutConfig) {
        config.credentials = Some(OfficialCredentials::Token("dG9rZW4=".into()));
    }

    #[tokio::test]
    async fn test_official_summary_aggregates_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025/events"))
            .and(query_param("teamNumber", "19448"))
            .and(header("Authorization", "Basic dG9rZW4="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{ "code": "USMOKCQ1" }, { "code": "USMOSTQ2" }, { "name": "no code" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/2025/rankings/USMOKCQ1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rankings": [{ "wins": 4, "losses": 1, "ties": 0, "sortOrder1": 2.5, "sortOrder2": 20.0 }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, with_token);
        let summary = client
            .fetch_official_summary(Season::new(2025), 19448)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.wins, 4);
        assert_eq!(summary.matches, 5);
        assert_eq!(summary.auto_points, Some(20.0));
    }

    #[tokio::test]
    async fn test_official_summary_without_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, with_token);
        let summary = client.fetch_official_summary(Season::new(2025), 1).await.unwrap();
        assert!(summary.is_none());
    }

    #[tokio::test]
    async fn test_official_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025/awards/19448"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server, with_token);
        let result = client.fetch_awards(Season::new(2025), 19448).await;
        assert!(matches!(result, Err(ScoutError::Status { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025/events"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "events": [] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, |c| {
            with_token(c);
            c.timeout = Duration::from_millis(200);
        });
        let result = client.fetch_official_summary(Season::new(2025), 19448).await;
        assert!(matches!(result, Err(ScoutError::Timeout { .. })));
    }
}
