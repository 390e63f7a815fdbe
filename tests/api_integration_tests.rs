//! Typed accessors and pagination against a mock Ausmash server.

use ausmash::models::{Game, Player, Region, Resource};
use ausmash::{AusmashClient, AusmashError, Config, DateRange, Id};
use chrono::NaiveDate;
use futures::{StreamExt, TryStreamExt};
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> AusmashClient {
    let mut config = Config::with_api_key("test-key");
    config.endpoint = server.uri();
    config.retry_base_delay_ms = 10;
    AusmashClient::new(config).unwrap()
}

fn player_json(id: u64, name: &str) -> serde_json::Value {
    json!({"ID": id, "Name": name, "RegionShort": "NSW"})
}

/// Mounts `/players` as three enveloped pages linked with `Next`
async fn mount_enveloped_players(server: &MockServer) {
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/players"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [player_json(1, "A"), player_json(2, "B")],
            "Next": format!("{uri}/players?page=2"),
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/players"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [player_json(3, "C")],
            "Next": format!("{uri}/players?page=3"),
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/players"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [player_json(4, "D")],
            "Next": null,
        })))
        .mount(server)
        .await;
}

fn ids(players: &[Player]) -> Vec<u64> {
    players.iter().map(|p| p.id.0).collect()
}

#[tokio::test]
async fn test_collect_all_concatenates_enveloped_pages_in_order() {
    let server = MockServer::start().await;
    mount_enveloped_players(&server).await;

    let players = test_client(&server).players().unwrap().collect_all().await.unwrap();

    assert_eq!(ids(&players), vec![1, 2, 3, 4]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_link_header_pagination_with_relative_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tourneys"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"ID": 10, "Name": "Big Summer Smash"}]))
                .insert_header("Link", "</tourneys?page=2>; rel=\"next\""),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tourneys"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"ID": 11, "Name": "Smash Mouth"}])))
        .mount(&server)
        .await;

    let tournaments = test_client(&server)
        .tournaments()
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    let names: Vec<_> = tournaments.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Big Summer Smash", "Smash Mouth"]);
}

#[tokio::test]
async fn test_stream_fetches_pages_lazily() {
    let server = MockServer::start().await;
    mount_enveloped_players(&server).await;
    let client = test_client(&server);

    let first_two: Vec<Player> = client
        .players()
        .unwrap()
        .into_stream()
        .take(2)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids(&first_two), vec![1, 2]);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    let everything: Vec<Player> = client.players().unwrap().into_stream().try_collect().await.unwrap();
    assert_eq!(ids(&everything), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_paginator_can_resume_after_failed_page() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [{"ID": 1, "Short": "NSW"}],
            "Next": format!("{uri}/regions?page=2"),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [{"ID": 2, "Short": "VIC"}],
        })))
        .mount(&server)
        .await;

    let mut config = Config::with_api_key("test-key");
    config.endpoint = uri.clone();
    config.max_retries = 0;
    let client = AusmashClient::new(config).unwrap();
    let mut pager = client.regions().unwrap();

    let first = pager.next_page().await.unwrap().unwrap();
    assert_eq!(first[0].short, "NSW");

    let err = pager.next_page().await.unwrap_err();
    assert!(matches!(err, AusmashError::ApiServerError { .. }));
    let page2_url = format!("{uri}/regions?page=2");
    assert_eq!(pager.current_url(), Some(page2_url.as_str()));

    let second = pager.next_page().await.unwrap().unwrap();
    assert_eq!(second[0].short, "VIC");
    assert!(pager.next_page().await.unwrap().is_none());
    assert!(pager.is_exhausted());
}

#[tokio::test]
async fn test_self_referencing_next_link_stops() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [{"ID": 1, "Name": "VGBootCamp"}],
            "Next": format!("{uri}/channels"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let channels = test_client(&server).channels().unwrap().collect_all().await.unwrap();
    assert_eq!(channels.len(), 1);
}

#[tokio::test]
async fn test_find_player_percent_encodes_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/players/find/Jim%20Bob/NSW$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(player_json(77, "Jim Bob")))
        .expect(1)
        .mount(&server)
        .await;

    let player = test_client(&server).find_player("NSW", "Jim Bob").await.unwrap();
    assert_eq!(player.id, Id(77));
}

#[tokio::test]
async fn test_player_results_sends_date_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/77/results"))
        .and(query_param("startDate", "2023-01-01"))
        .and(query_param("endDate", "2023-12-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"PlayerName": "Jim", "Result": 3, "Tourney": {"ID": 9001, "Name": "Big Summer Smash 2023"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let range = DateRange::between(
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
    );
    let results = test_client(&server)
        .player_results(Id(77), range)
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].placing, 3);
    assert_eq!(results[0].entrants, None);
}

#[tokio::test]
async fn test_event_results_fill_entrants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/555/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"PlayerName": "Jim", "Result": 1},
            {"PlayerName": "Bob", "Result": 2},
            {"PlayerName": "Guest", "Result": 3},
            {"PlayerName": "Other", "Result": 3},
        ])))
        .mount(&server)
        .await;

    let results = test_client(&server).event_results(Id(555)).await.unwrap();

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.entrants == Some(4)));
    assert_eq!(results[0].rounds_cleared(), Some(3));
}

#[tokio::test]
async fn test_event_matches_mark_bracket_reset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/555/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 3, "MatchName": "GF", "WinnerName": "Jim", "LoserName": "Bob"},
            {"ID": 2, "MatchName": "GF", "WinnerName": "Bob", "LoserName": "Jim"},
            {"ID": 1, "MatchName": "L5", "WinnerName": "Bob", "LoserName": "Guest"},
        ])))
        .mount(&server)
        .await;

    let matches = test_client(&server).event_matches(Id(555)).await.unwrap();

    let rounds: Vec<_> = matches.iter().map(|m| m.round_name.as_str()).collect();
    assert_eq!(rounds, vec!["GF2", "GF", "L5"]);
}

#[tokio::test]
async fn test_game_by_short_is_case_insensitive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pocket/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 1, "Short": "SSBM", "Name": "Super Smash Bros. Melee"},
            {"ID": 2, "Short": "SSBU", "Name": "Super Smash Bros. Ultimate"},
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let client = test_client(&server);

    let melee = client.game_by_short("ssbm").await.unwrap();
    assert_eq!(melee.id, Some(Id(1)));
    assert_eq!(melee.informal_name(), "Melee");

    // Second lookup reuses the cached list
    let err = client.game_by_short("SSB64").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_elo_for_game_in_region() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elo/game/1"))
        .and(query_param("region", "NSW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "Elo": 1850,
            "Player": {"ID": 77, "Name": "Jim"},
            "Game": {"ID": 1, "Short": "SSBM"},
            "PeakElo": 1900,
            "PeakDate": "2023-05-01",
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let elos = test_client(&server)
        .elo_for_game(Id(1), Some("NSW"))
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(elos.len(), 1);
    assert_eq!(elos[0].elo, 1850);
    assert_eq!(elos[0].peak(), Some(1900));
}

#[tokio::test]
async fn test_compare_win_rates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compare/1/77/78/winrates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Player1WinRates": [
                {"Opponent": {"ID": 99, "Name": "Opp"}, "Elo": 1700, "Wins": 3, "Losses": 1, "Total": 4}
            ],
            "Player2WinRates": [
                {"Opponent": {"ID": 99, "Name": "Opp"}, "Elo": 1700, "Wins": 0, "Losses": 2, "Total": 2}
            ],
        })))
        .mount(&server)
        .await;

    let comparison = test_client(&server)
        .compare_win_rates(Id(1), Id(77), Id(78), DateRange::all())
        .await
        .unwrap();

    assert_eq!(comparison.player1[0].rate(), 0.75);
    assert_eq!(comparison.player2[0].rate(), 0.0);
}

#[tokio::test]
async fn test_complete_follows_api_link() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/players/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ID": 77,
            "Name": "Jim",
            "RegionShort": "NSW",
            "Bio": "Melee main",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let partial: Player = serde_json::from_value(json!({
        "ID": 77,
        "Name": "Jim",
        "APILink": format!("{uri}/players/77"),
    }))
    .unwrap();
    assert_eq!(partial.api_link(), Some(format!("{uri}/players/77").as_str()));

    let full = test_client(&server).complete(&partial).await.unwrap();
    assert_eq!(full.bio.as_deref(), Some("Melee main"));
}

#[tokio::test]
async fn test_players_in_region_uses_short_name_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/byregion/NSW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([player_json(1, "A")])))
        .expect(1)
        .mount(&server)
        .await;

    let players = test_client(&server)
        .players_in_region("NSW")
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(ids(&players), vec![1]);
}

#[tokio::test]
async fn test_complete_region_embedded_by_short_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 1, "Short": "VIC", "Name": "Victoria"},
            {"ID": 2, "Short": "NSW", "Name": "New South Wales"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let partial: Region = serde_json::from_value(json!({"Short": "nsw"})).unwrap();
    assert_eq!(partial.id(), None);

    let full = test_client(&server).complete(&partial).await.unwrap();
    assert_eq!(full.id, Some(Id(2)));
    assert_eq!(full.name.as_deref(), Some("New South Wales"));
}

#[tokio::test]
async fn test_complete_game_embedded_by_short_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pocket/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 1, "Short": "SSBM", "Name": "Super Smash Bros. Melee"},
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let client = test_client(&server);

    let partial: Game = serde_json::from_value(json!({"Short": "SSBM"})).unwrap();
    let full = client.complete(&partial).await.unwrap();
    assert_eq!(full.id, Some(Id(1)));

    let unknown: Game = serde_json::from_value(json!({"Short": "SSB64"})).unwrap();
    let err = client.complete(&unknown).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_player_trueskill() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/77/trueskill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Player": player_json(77, "Jim"), "Game": {"ID": 2, "Short": "SSBM"},
             "Mean": 1200, "StandardDeviation": 100, "ConservativeRating": 899},
            {"Player": player_json(77, "Jim"), "Game": {"ID": 5, "Short": "SSBU"},
             "Mean": null, "StandardDeviation": null, "ConservativeRating": null},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ratings = test_client(&server).player_trueskill(Id(77)).await.unwrap();

    assert_eq!(ratings.len(), 2);
    assert_eq!(ratings[0].conservative_rating, Some(899));
    assert!(ratings[0].is_calculated());
    assert!(!ratings[1].is_calculated());
}

#[tokio::test]
async fn test_pocket_results_read_items_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pocket/player/results/77/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [
                {"TourneyID": 9001, "TourneyName": "Big Summer Smash 2023", "EventID": 555,
                 "EventName": "Melee Singles", "Place": "3rd", "Entrants": 48,
                 "RegionShort": "NSW", "Date": "2023-02-19T00:00:00"},
                {"TourneyID": 9002, "TourneyName": "Local", "EventID": 556,
                 "EventName": "Melee Singles", "Place": "1st", "Entrants": 12},
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = test_client(&server)
        .pocket_results(Id(77), Id(2))
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    let placings: Vec<_> = results.iter().map(|r| r.placing()).collect();
    assert_eq!(placings, vec![Some(3), Some(1)]);
    assert_eq!(results[0].date, NaiveDate::from_ymd_opt(2023, 2, 19));
    assert_eq!(results[1].region_short, None);
}

#[tokio::test]
async fn test_compare_results_sends_date_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compare/1/77/78/results"))
        .and(query_param("startDate", "2023-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": [
                {"Event": {"ID": 555, "Name": "Melee Singles"}, "Player1Result": 2, "Player2Result": 5}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let range = DateRange::since(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    let common = test_client(&server)
        .compare_results(Id(1), Id(77), Id(78), range)
        .await
        .unwrap();

    assert_eq!(common.len(), 1);
    assert_eq!(common[0].event.id, Id(555));
    assert_eq!((common[0].player1_result, common[0].player2_result), (2, 5));
    assert_eq!(common[0].player1_placed_higher(), Some(true));
}

#[tokio::test]
async fn test_character_wins_and_losses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/characters/41/matcheswins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 1, "MatchName": "W1"}, {"ID": 2, "MatchName": "W2"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/characters/41/matcheslosses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"ID": 3, "MatchName": "L1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let wins = client.character_wins(Id(41)).unwrap().collect_all().await.unwrap();
    let losses = client.character_losses(Id(41)).unwrap().collect_all().await.unwrap();

    assert_eq!(wins.iter().map(|m| m.id.0).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(losses[0].round_name, "L1");
}

#[tokio::test]
async fn test_all_elo_follows_each_listing() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/elo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"GameID": 2, "PlayerCount": 1, "APILink": format!("{uri}/elo/game/2")},
            {"GameID": 5, "PlayerCount": 2, "APILink": format!("{uri}/elo/game/5")},
        ])))
        .expect(1)
        .mount(&server)
        .await;
    for (game, short, players) in [(2, "SSBM", vec![77]), (5, "SSBU", vec![78, 79])] {
        let records: Vec<_> = players
            .iter()
            .map(|id| json!({"Elo": 1500, "Player": player_json(*id, "P"), "Game": {"ID": game, "Short": short}}))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("/elo/game/{game}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(records))
            .expect(1)
            .mount(&server)
            .await;
    }

    let elos = test_client(&server).all_elo().await.unwrap();

    let owners: Vec<_> = elos.iter().map(|e| (e.game.short.as_str(), e.player.id.0)).collect();
    assert_eq!(owners, vec![("SSBM", 77), ("SSBU", 78), ("SSBU", 79)]);
}
