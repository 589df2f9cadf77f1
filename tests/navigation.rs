mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    animated_config, booted_session, immediate_config, CountingSource, ABOUT, HOME, PHOTO,
};
use spanav::dom::History;
use spanav::{NavError, NavOutcome, Phase};

#[tokio::test(start_paused = true)]
async fn boot_renders_home_without_history_or_progress() {
    let source = Arc::new(CountingSource::site());
    let session = booted_session(&immediate_config(), source.clone()).await;

    assert_eq!(session.document().content(), "<div>Home</div>");
    assert_eq!(session.document().theme_class(), "transition-fade");
    assert_eq!(session.history().entries(), vec!["/"]);
    assert!(session.progress_bar().phases().is_empty());
    assert_eq!(source.fetches_of(HOME), 1);
}

#[tokio::test(start_paused = true)]
async fn navigate_to_photo_renders_photo() {
    let source = Arc::new(CountingSource::site());
    let session = booted_session(&immediate_config(), source).await;

    let outcome = session.navigator().navigate("/photo").await.unwrap();

    assert_eq!(outcome, NavOutcome::Completed);
    assert_eq!(session.document().content(), "<div>Photo</div>");
    assert_eq!(session.document().theme_class(), "transition-slide");
    assert_eq!(session.history().current(), "/photo");
}

#[tokio::test(start_paused = true)]
async fn animated_navigation_renders_photo_after_settle() {
    let source = Arc::new(CountingSource::site());
    let session = booted_session(&animated_config(250), source).await;

    let started = tokio::time::Instant::now();
    let outcome = session.navigator().navigate("/photo").await.unwrap();

    assert_eq!(outcome, NavOutcome::Completed);
    assert!(started.elapsed() >= Duration::from_millis(250));
    assert_eq!(session.document().content(), "<div>Photo</div>");
    assert_eq!(session.document().theme_class(), "transition-slide");
    assert_eq!(session.history().current(), "/photo");
    assert_eq!(session.navigator().context().progress.phase(), Phase::Complete);
}

#[tokio::test(start_paused = true)]
async fn unknown_path_is_a_no_op() {
    let source = Arc::new(CountingSource::site());
    let session = booted_session(&animated_config(250), source.clone()).await;
    let writes = session.document().content_writes();

    let outcome = session.navigator().navigate("/missing").await.unwrap();

    assert_eq!(outcome, NavOutcome::Ignored);
    assert_eq!(session.document().content_writes(), writes);
    assert_eq!(session.document().content(), "<div>Home</div>");
    assert_eq!(session.history().entries(), vec!["/"]);
    assert!(session.progress_bar().phases().is_empty());
    assert_eq!(source.total_fetches(), 1);
}

#[tokio::test(start_paused = true)]
async fn progress_completes_then_resets() {
    let source = Arc::new(CountingSource::site());
    let session = booted_session(&immediate_config(), source).await;

    session.navigator().navigate("/about").await.unwrap();
    let progress = &session.navigator().context().progress;
    assert_eq!(progress.phase(), Phase::Complete);

    tokio::time::sleep(Duration::from_millis(501)).await;
    assert_eq!(progress.phase(), Phase::Idle);
    assert_eq!(
        session.progress_bar().phases(),
        vec![Phase::Active, Phase::Complete, Phase::Idle]
    );
}

#[tokio::test(start_paused = true)]
async fn loading_twice_fetches_once() {
    let source = Arc::new(CountingSource::site());
    let session = booted_session(&immediate_config(), source.clone()).await;
    let loader = session.navigator().loader();

    loader.load("/photo").await.unwrap();
    loader.load("/photo").await.unwrap();

    assert_eq!(source.fetches_of(PHOTO), 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_path_loads_home_under_its_own_key() {
    let source = Arc::new(CountingSource::site());
    let session = spanav::Session::at_home(&immediate_config(), source.clone()).unwrap();
    let loader = session.navigator().loader();

    loader.load("/missing").await.unwrap();
    assert_eq!(session.document().content(), "<div>Home</div>");
    assert_eq!(session.document().theme_class(), "transition-fade");

    let cache = &session.navigator().context().cache;
    assert!(cache.has("/missing"));
    assert!(!cache.has("/"));

    loader.load("/").await.unwrap();
    assert_eq!(source.fetches_of(HOME), 2);
}

#[tokio::test(start_paused = true)]
async fn superseded_navigation_does_not_overwrite_newer_one() {
    let source = Arc::new(
        CountingSource::site().with_delay(PHOTO, Duration::from_millis(100)),
    );
    let session = booted_session(&immediate_config(), source).await;
    let navigator = session.navigator();

    let (slow, fast) = tokio::join!(navigator.navigate("/photo"), async {
        tokio::task::yield_now().await;
        navigator.navigate("/about").await
    });

    assert_eq!(fast.unwrap(), NavOutcome::Completed);
    assert_eq!(slow.unwrap(), NavOutcome::Superseded);
    assert_eq!(session.document().content(), "<div>About</div>");
    assert_eq!(session.history().entries(), vec!["/", "/about"]);

    // The slow result still warms the cache.
    assert!(navigator.context().cache.has("/photo"));
}

#[tokio::test(start_paused = true)]
async fn failed_navigation_reports_error_and_finishes_progress() {
    let source = Arc::new(CountingSource::site().without_page(ABOUT));
    let session = booted_session(&animated_config(100), source).await;

    let err = session.navigator().navigate("/about").await.unwrap_err();

    match err {
        NavError::Fetch { path, .. } => assert_eq!(path, "/about"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.document().content(), "<div>Home</div>");
    assert_eq!(session.history().entries(), vec!["/"]);
    assert!(!session.navigator().context().cache.has("/about"));

    let progress = &session.navigator().context().progress;
    assert_eq!(progress.phase(), Phase::Complete);
    tokio::time::sleep(Duration::from_millis(501)).await;
    assert_eq!(progress.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn cached_navigation_skips_network() {
    let source = Arc::new(CountingSource::site());
    let session = booted_session(&immediate_config(), source.clone()).await;

    session.navigator().navigate("/photo").await.unwrap();
    session.navigator().navigate("/").await.unwrap();
    session.navigator().navigate("/photo").await.unwrap();

    assert_eq!(source.fetches_of(PHOTO), 1);
    assert_eq!(source.fetches_of(HOME), 1);
    assert_eq!(session.history().entries(), vec!["/", "/photo", "/", "/photo"]);
}

#[tokio::test(start_paused = true)]
async fn repeated_navigation_to_same_path_pushes_each_time() {
    let source = Arc::new(CountingSource::site());
    let session = booted_session(&immediate_config(), source.clone()).await;

    session.navigator().navigate("/photo").await.unwrap();
    session.navigator().navigate("/photo").await.unwrap();
    assert_eq!(session.history().entries(), vec!["/", "/photo", "/photo"]);

    session.navigator().navigate("/").await.unwrap();
    assert_eq!(session.history().entries(), vec!["/", "/photo", "/photo", "/"]);
    assert_eq!(source.fetches_of(PHOTO), 1);
}

#[tokio::test(start_paused = true)]
async fn history_replay_leaves_entries_untouched() {
    let source = Arc::new(CountingSource::site());
    let session = booted_session(&immediate_config(), source).await;

    session.navigator().navigate("/photo").await.unwrap();
    let outcome = session.navigator().navigate_from_history("/").await.unwrap();

    assert_eq!(outcome, NavOutcome::Completed);
    assert_eq!(session.document().content(), "<div>Home</div>");
    assert_eq!(session.history().entries(), vec!["/", "/photo"]);
}
