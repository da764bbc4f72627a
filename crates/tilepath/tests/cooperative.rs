mod common;

use std::convert::Infallible;
use std::sync::Arc;

use common::*;
use tilepath::{CancelToken, Pathfinder, SearchError, SearchEvent, SearchOptions, TileGrid};

const MAP: &str = "
S...
.#~.
.#..
...G";

#[tokio::test]
async fn async_matches_sync() {
    let pf = pathfinder(MAP);
    let (s, g) = endpoints(&pf);
    let opts = SearchOptions::new().routes(3).include_costs(true);

    let sync = pf.find_routes(&s, &g, &opts).unwrap();
    let cancel = CancelToken::new();
    let async_routes = pf
        .find_routes_async(&s, &g, &opts, &cancel, |_| async { Ok::<(), Infallible>(()) })
        .await
        .unwrap();
    assert_eq!(sync, async_routes);
}

#[tokio::test]
async fn progress_sees_every_expansion() {
    let pf = pathfinder(MAP);
    let (s, g) = endpoints(&pf);
    let opts = SearchOptions::new();

    let stepwise: Vec<_> = pf.search(&s, &g, &opts).unwrap().collect();

    let mut seen = Vec::new();
    let cancel = CancelToken::new();
    pf.find_routes_async(&s, &g, &opts, &cancel, |e| {
        seen.push(e);
        async { Ok::<(), Infallible>(()) }
    })
    .await
    .unwrap();
    assert_eq!(seen, stepwise);
    assert!(seen.iter().any(|e| e.reached_goal));
}

#[tokio::test]
async fn yielding_to_the_scheduler() {
    let pf = pathfinder(MAP);
    let (s, g) = endpoints(&pf);
    let cancel = CancelToken::new();
    let routes = pf
        .find_routes_async(&s, &g, &SearchOptions::new(), &cancel, |_| async {
            tokio::task::yield_now().await;
            Ok::<(), Infallible>(())
        })
        .await
        .unwrap();
    assert_eq!(routes[0].cost, 6);
}

#[tokio::test]
async fn failing_progress_aborts() {
    let pf = pathfinder(MAP);
    let (s, g) = endpoints(&pf);
    let cancel = CancelToken::new();
    let mut calls = 0;
    let err = pf
        .find_routes_async(&s, &g, &SearchOptions::new(), &cancel, |_| {
            calls += 1;
            let fail = calls == 3;
            async move {
                if fail {
                    Err(std::io::Error::other("host went away"))
                } else {
                    Ok(())
                }
            }
        })
        .await
        .unwrap_err();

    assert_eq!(calls, 3);
    match err {
        SearchError::Aborted(source) => assert_eq!(source.to_string(), "host went away"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn cancelling_stops_between_events() {
    let recorder = Arc::new(Recorder::default());
    let pf = Pathfinder::builder(TileGrid::new(6, 6, '.'))
        .observer(Arc::clone(&recorder))
        .build();
    let map = pf.tiles();
    let (s, g) = (map.at(0, 0).unwrap(), map.at(5, 5).unwrap());

    let cancel = CancelToken::new();
    let handle = cancel.clone();
    let mut calls = 0;
    let err = pf
        .find_routes_async(&s, &g, &SearchOptions::new().routes(4), &cancel, |_| {
            calls += 1;
            if calls == 2 {
                handle.cancel();
            }
            async { Ok::<(), Infallible>(()) }
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Cancelled));
    assert_eq!(calls, 2);
    assert!(cancel.is_cancelled());
    // Abandoned, not finished, and reported to the observer.
    let events = recorder.events();
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, SearchEvent::Finished { .. }))
    );
    assert!(matches!(
        events.last(),
        Some(SearchEvent::Cancelled { expansions }) if *expansions > 0
    ));
}

#[tokio::test]
async fn invalid_options_fail_before_progress() {
    let pf = pathfinder(MAP);
    let (s, g) = endpoints(&pf);
    let cancel = CancelToken::new();
    let mut calls = 0;
    let err = pf
        .find_routes_async(
            &s,
            &g,
            &SearchOptions::new().include_loops(true),
            &cancel,
            |_| {
                calls += 1;
                async { Ok::<(), Infallible>(()) }
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::UnboundedLoops));
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn already_cancelled_token() {
    let pf = pathfinder(MAP);
    let (s, g) = endpoints(&pf);
    let cancel = CancelToken::new();
    cancel.cancel();
    let result = pf
        .find_routes_async(&s, &g, &SearchOptions::new(), &cancel, |_| async {
            Ok::<(), Infallible>(())
        })
        .await;
    assert!(matches!(result, Err(SearchError::Cancelled)));
}
