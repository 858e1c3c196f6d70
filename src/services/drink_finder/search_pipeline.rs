use std::sync::Arc;

use tracing::{debug, error, info};

use super::{
    geo_window::{compute_rectangle, MAX_SEARCH_LATITUDE},
    reconciler::reconcile,
    search_sequencer::SearchSequencer,
    types::{
        search_error::{InputError, SearchError},
        search_report::{SearchOutcome, SearchReport, SearchState},
    },
};
use crate::{
    services::{
        catalog::catalog_store::CatalogStore,
        maps_client::{
            places_service::{PlaceSearch, TextSearchInput},
            types::google_search_text_request::RankPreference,
        },
    },
    types::coordinate::Coordinate,
};

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub radius_meters: f64,
    /// Category term sent to the provider; the drink itself is matched locally.
    pub text_query: String,
    pub language: String,
    pub page_size: u32,
    pub rank_by: RankPreference,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_meters: 800.0,
            text_query: "飲料".to_string(),
            language: "zh-TW".to_string(),
            page_size: 20,
            rank_by: RankPreference::Distance,
        }
    }
}

struct StateTracker {
    state: SearchState,
}

impl StateTracker {
    fn new() -> Self {
        Self {
            state: SearchState::Idle,
        }
    }

    fn advance(&mut self, next: SearchState) {
        debug!("Search state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Runs the catalog → window → provider → reconcile pipeline.
pub struct DrinkFinder {
    catalog: Arc<CatalogStore>,
    places: Arc<dyn PlaceSearch>,
    settings: SearchSettings,
    sequencer: SearchSequencer,
}

impl DrinkFinder {
    pub fn new(
        catalog: Arc<CatalogStore>,
        places: Arc<dyn PlaceSearch>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            catalog,
            places,
            settings,
            sequencer: SearchSequencer::new(),
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    fn validate(
        drink_name: &str,
        coordinate: Option<Coordinate>,
    ) -> Result<Coordinate, InputError> {
        if drink_name.trim().is_empty() {
            return Err(InputError::EmptyDrink);
        }

        let center = coordinate.ok_or(InputError::LocationUnavailable)?;

        if !center.is_in_range() {
            return Err(InputError::CoordinateOutOfRange {
                latitude: center.latitude,
                longitude: center.longitude,
            });
        }

        if center.latitude.abs() >= MAX_SEARCH_LATITUDE {
            return Err(InputError::PolarLatitude(center.latitude));
        }

        Ok(center)
    }

    /// One search invocation. A provider failure ends it without any partial
    /// result; nothing is cached, so a repeat call starts from scratch.
    pub async fn run_search(
        &self,
        drink_name: &str,
        coordinate: Option<Coordinate>,
    ) -> Result<SearchReport, SearchError> {
        let center = Self::validate(drink_name, coordinate)?;
        let drink_name = drink_name.trim();
        let mut state = StateTracker::new();

        let catalog_matches = self.catalog.filter_by_drink(drink_name);
        state.advance(SearchState::CatalogFiltered);

        let rectangle = compute_rectangle(center, self.settings.radius_meters);
        state.advance(SearchState::RectangleComputed);

        // The provider is queried even with no catalog matches so that "no
        // places at all" can still be told apart from "none sell it".
        state.advance(SearchState::AwaitingProvider);
        let places = match self
            .places
            .search_text(TextSearchInput {
                query: self.settings.text_query.clone(),
                rectangle,
                language: self.settings.language.clone(),
                page_size: self.settings.page_size,
                rank_by: self.settings.rank_by,
            })
            .await
        {
            Ok(places) => places,
            Err(e) => {
                state.advance(SearchState::Failed);
                error!("Failed to search places for {}: {}", drink_name, e);
                return Err(e.into());
            }
        };

        let matched = reconcile(&catalog_matches, &places);
        state.advance(SearchState::Reconciled);

        info!(
            "Search for {}: {} catalog matches, {} places nearby, {} matched",
            drink_name,
            catalog_matches.len(),
            places.len(),
            matched.len()
        );

        let outcome = if places.is_empty() {
            SearchOutcome::NoPlacesNearby
        } else if matched.is_empty() {
            SearchOutcome::NoneSellDrink
        } else {
            SearchOutcome::Matched(matched)
        };

        Ok(SearchReport {
            outcome,
            catalog_matches: catalog_matches.iter().map(|e| e.name.clone()).collect(),
            places_nearby: places.len(),
            rectangle,
        })
    }

    /// Like [`run_search`](Self::run_search), but a newer search in the same
    /// session cancels this one and any stale completion is discarded.
    /// Rejected input never takes over the session.
    pub async fn run_session_search(
        &self,
        session: Option<&str>,
        drink_name: &str,
        coordinate: Option<Coordinate>,
    ) -> Result<SearchReport, SearchError> {
        Self::validate(drink_name, coordinate)?;
        let ticket = self.sequencer.begin(session);

        let result = tokio::select! {
            biased;
            _ = ticket.cancelled() => Err(SearchError::Superseded { seq: ticket.seq }),
            result = self.run_search(drink_name, coordinate) => result,
        };

        if !self.sequencer.is_current(&ticket) {
            debug!("Discarding result of stale search {}", ticket.seq);
            return Err(SearchError::Superseded { seq: ticket.seq });
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, sync::Mutex, time::Duration};

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        services::{
            catalog::catalog_store::CatalogEntry,
            maps_client::types::places_service_error::PlacesServiceError,
        },
        types::place_result::{LocalizedText, PlaceResult},
    };

    const TAIPEI: Coordinate = Coordinate {
        latitude: 25.052,
        longitude: 121.520,
    };

    enum Reply {
        Places(Vec<PlaceResult>),
        ServerError,
    }

    struct FakePlaces {
        replies: Mutex<VecDeque<(Duration, Reply)>>,
        requests: Mutex<Vec<TextSearchInput>>,
    }

    impl FakePlaces {
        fn new(replies: Vec<(Duration, Reply)>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(vec![]),
            })
        }

        fn replying(replies: Vec<Reply>) -> Arc<Self> {
            Self::new(replies.into_iter().map(|r| (Duration::ZERO, r)).collect())
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PlaceSearch for FakePlaces {
        async fn search_text(
            &self,
            input: TextSearchInput,
        ) -> Result<Vec<PlaceResult>, PlacesServiceError> {
            self.requests.lock().unwrap().push(input);
            let (delay, reply) = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or((Duration::ZERO, Reply::Places(vec![])));

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match reply {
                Reply::Places(places) => Ok(places),
                Reply::ServerError => Err(PlacesServiceError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: "internal".to_string(),
                }),
            }
        }
    }

    fn place(text: &str) -> PlaceResult {
        PlaceResult {
            id: format!("id-{text}"),
            display_name: LocalizedText {
                language_code: "zh-TW".to_string(),
                text: text.to_string(),
            },
            location: TAIPEI,
            formatted_address: Some("台北市中山區".to_string()),
        }
    }

    fn catalog() -> Arc<CatalogStore> {
        Arc::new(
            CatalogStore::new(vec![
                CatalogEntry {
                    name: "迷客夏".to_string(),
                    drinks: vec!["紅茶".to_string()],
                },
                CatalogEntry {
                    name: "五十嵐".to_string(),
                    drinks: vec!["冬瓜檸檬".to_string()],
                },
            ])
            .unwrap(),
        )
    }

    fn finder(places: Arc<FakePlaces>) -> DrinkFinder {
        DrinkFinder::new(catalog(), places, SearchSettings::default())
    }

    fn store_names(report: &SearchReport) -> Vec<&str> {
        report
            .stores()
            .iter()
            .map(|s| s.place.display_name.text.as_str())
            .collect()
    }

    #[tokio::test]
    async fn matches_nearby_store_selling_the_drink() {
        let places = FakePlaces::replying(vec![Reply::Places(vec![
            place("迷客夏 中山店"),
            place("五十嵐"),
        ])]);

        let report = finder(places.clone())
            .run_search(" 紅茶 ", Some(TAIPEI))
            .await
            .unwrap();

        assert_eq!(report.catalog_matches, vec!["迷客夏"]);
        assert_eq!(store_names(&report), vec!["迷客夏 中山店"]);
        assert_eq!(report.places_nearby, 2);
        assert!(!report.provider_returned_zero());
        assert!(report.rectangle.contains(&TAIPEI));
    }

    #[tokio::test]
    async fn sends_configured_provider_request() {
        let places = FakePlaces::replying(vec![]);

        finder(places.clone())
            .run_search("紅茶", Some(TAIPEI))
            .await
            .unwrap();

        let requests = places.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "飲料");
        assert_eq!(requests[0].language, "zh-TW");
        assert_eq!(requests[0].page_size, 20);
        assert_eq!(requests[0].rank_by, RankPreference::Distance);
        assert_eq!(
            requests[0].rectangle,
            compute_rectangle(TAIPEI, 800.0)
        );
    }

    #[tokio::test]
    async fn sends_configured_rank_preference() {
        let places = FakePlaces::replying(vec![]);
        let settings = SearchSettings {
            rank_by: RankPreference::Relevance,
            ..SearchSettings::default()
        };

        DrinkFinder::new(catalog(), places.clone(), settings)
            .run_search("紅茶", Some(TAIPEI))
            .await
            .unwrap();

        let requests = places.requests.lock().unwrap();
        assert_eq!(requests[0].rank_by, RankPreference::Relevance);
    }

    #[tokio::test]
    async fn unknown_drink_is_none_sell_drink_not_empty_provider() {
        let places = FakePlaces::replying(vec![Reply::Places(vec![
            place("迷客夏 中山店"),
            place("五十嵐"),
        ])]);

        let report = finder(places.clone())
            .run_search("珍珠奶茶", Some(TAIPEI))
            .await
            .unwrap();

        assert!(report.catalog_matches.is_empty());
        assert_eq!(report.outcome, SearchOutcome::NoneSellDrink);
        assert!(!report.provider_returned_zero());
        assert_eq!(places.request_count(), 1);
    }

    #[tokio::test]
    async fn empty_provider_result_is_flagged() {
        let places = FakePlaces::replying(vec![Reply::Places(vec![])]);

        let report = finder(places)
            .run_search("紅茶", Some(TAIPEI))
            .await
            .unwrap();

        assert_eq!(report.outcome, SearchOutcome::NoPlacesNearby);
        assert!(report.provider_returned_zero());
        assert!(report.stores().is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn provider_failure_fails_invocation_without_caching() {
        let places = FakePlaces::replying(vec![
            Reply::ServerError,
            Reply::Places(vec![place("迷客夏 民生店")]),
        ]);
        let finder = finder(places);

        let err = finder.run_search("紅茶", Some(TAIPEI)).await.unwrap_err();
        assert!(matches!(err, SearchError::Failed(_)));
        assert!(logs_contain("AwaitingProvider -> Failed"));

        let report = finder.run_search("紅茶", Some(TAIPEI)).await.unwrap();
        assert_eq!(store_names(&report), vec!["迷客夏 民生店"]);
        assert!(logs_contain("AwaitingProvider -> Reconciled"));
    }

    #[tokio::test]
    async fn rejects_blank_drink_without_calling_provider() {
        let places = FakePlaces::replying(vec![]);

        let err = finder(places.clone())
            .run_search("   ", Some(TAIPEI))
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Input(InputError::EmptyDrink)));
        assert_eq!(places.request_count(), 0);
    }

    #[tokio::test]
    async fn pending_location_is_an_input_error() {
        let places = FakePlaces::replying(vec![]);

        let err = finder(places.clone())
            .run_search("紅茶", None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SearchError::Input(InputError::LocationUnavailable)
        ));
        assert_eq!(places.request_count(), 0);
    }

    #[tokio::test]
    async fn rejects_out_of_range_and_polar_coordinates() {
        let finder = finder(FakePlaces::replying(vec![]));

        let err = finder
            .run_search("紅茶", Some(Coordinate::new(25.0, 200.0)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::Input(InputError::CoordinateOutOfRange { .. })
        ));

        let err = finder
            .run_search("紅茶", Some(Coordinate::new(-89.5, 0.0)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::Input(InputError::PolarLatitude(_))
        ));
    }

    #[tokio::test]
    async fn newer_search_supersedes_outstanding_one() {
        let places = FakePlaces::new(vec![
            (
                Duration::from_millis(200),
                Reply::Places(vec![place("迷客夏 舊店")]),
            ),
            (Duration::ZERO, Reply::Places(vec![place("迷客夏 新店")])),
        ]);
        let finder = finder(places);

        let (stale, fresh) = tokio::join!(
            finder.run_session_search(Some("device-1"), "紅茶", Some(TAIPEI)),
            finder.run_session_search(Some("device-1"), "紅茶", Some(TAIPEI)),
        );

        assert!(matches!(stale, Err(SearchError::Superseded { .. })));
        assert_eq!(store_names(&fresh.unwrap()), vec!["迷客夏 新店"]);
        assert_eq!(finder.sequencer.active_sessions(), 0);
    }

    #[tokio::test]
    async fn rejected_input_does_not_supersede_running_search() {
        let places = FakePlaces::new(vec![(
            Duration::from_millis(200),
            Reply::Places(vec![place("迷客夏 中山店")]),
        )]);
        let finder = finder(places.clone());

        let (valid, blank, pending) = tokio::join!(
            finder.run_session_search(Some("device-1"), "紅茶", Some(TAIPEI)),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                finder
                    .run_session_search(Some("device-1"), "  ", Some(TAIPEI))
                    .await
            },
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                finder
                    .run_session_search(Some("device-1"), "紅茶", None)
                    .await
            },
        );

        assert_eq!(store_names(&valid.unwrap()), vec!["迷客夏 中山店"]);
        assert!(matches!(
            blank,
            Err(SearchError::Input(InputError::EmptyDrink))
        ));
        assert!(matches!(
            pending,
            Err(SearchError::Input(InputError::LocationUnavailable))
        ));
        assert_eq!(places.request_count(), 1);
    }

    #[tokio::test]
    async fn abandoned_search_releases_its_session() {
        let places = FakePlaces::new(vec![(
            Duration::from_secs(10),
            Reply::Places(vec![place("迷客夏 中山店")]),
        )]);
        let finder = finder(places);

        let abandoned = tokio::time::timeout(
            Duration::from_millis(20),
            finder.run_session_search(Some("gone"), "紅茶", Some(TAIPEI)),
        )
        .await;

        assert!(abandoned.is_err());
        assert_eq!(finder.sequencer.active_sessions(), 0);
    }

    #[tokio::test]
    async fn searches_without_session_do_not_interfere() {
        let places = FakePlaces::new(vec![
            (
                Duration::from_millis(50),
                Reply::Places(vec![place("迷客夏 A")]),
            ),
            (Duration::ZERO, Reply::Places(vec![place("迷客夏 B")])),
        ]);
        let finder = finder(places);

        let (first, second) = tokio::join!(
            finder.run_session_search(None, "紅茶", Some(TAIPEI)),
            finder.run_session_search(None, "紅茶", Some(TAIPEI)),
        );

        assert_eq!(store_names(&first.unwrap()), vec!["迷客夏 A"]);
        assert_eq!(store_names(&second.unwrap()), vec!["迷客夏 B"]);
    }
}
