//! Behavioural tests for the subscription registry over in-memory storage.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::join_all;
use rstest::{fixture, rstest};
use ticker_watch::domain::{
    RegistryError, StorageError, SubscriptionRegistry, TickerSymbol, Username,
};
use ticker_watch::outbound::memory::{InMemorySubscriberRepository, InMemoryTickerRepository};

type Registry = SubscriptionRegistry<InMemorySubscriberRepository, InMemoryTickerRepository>;

#[fixture]
fn registry() -> Registry {
    SubscriptionRegistry::new(
        Arc::new(InMemorySubscriberRepository::default()),
        Arc::new(InMemoryTickerRepository::default()),
    )
}

fn ticker(raw: &str) -> TickerSymbol {
    TickerSymbol::normalise(raw).expect("ticker")
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_mixed_subscriptions_stay_symmetric(registry: Registry) {
    let users: Vec<String> = (0..12).map(|n| format!("trader{n}")).collect();
    let symbols = ["aapl", "MSFT", " goog ", "tsla"];
    for user in &users {
        registry
            .create_user(user, "pw", "555.123.4567", "boost")
            .await
            .expect("register");
    }

    let calls = users.iter().flat_map(|user| {
        symbols.iter().map(move |symbol| (user.clone(), (*symbol).to_owned()))
    });
    let tasks: Vec<_> = calls
        .chain(users.iter().map(|user| (user.clone(), "aapl".to_owned())))
        .map(|(user, symbol)| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.subscribe(&user, &symbol).await })
        })
        .collect();
    for result in join_all(tasks).await {
        result.expect("join").expect("subscribe");
    }

    let expected: BTreeSet<Username> = users
        .iter()
        .map(|user| Username::new(user.as_str()).expect("username"))
        .collect();
    for symbol in symbols {
        assert_eq!(
            registry.get_subscribers(symbol).await.expect("subscribers"),
            expected
        );
    }
    for user in &users {
        let followed = registry.get_subscriptions(user).await.expect("subscriptions");
        let want: BTreeSet<TickerSymbol> = symbols.iter().map(|s| ticker(s)).collect();
        assert_eq!(followed, want);
    }
}

#[rstest]
#[tokio::test]
async fn unknown_user_never_creates_ticker_record(registry: Registry) {
    let error = registry
        .subscribe("nobody", "IBM")
        .await
        .expect_err("missing user");

    assert!(matches!(
        error,
        RegistryError::Storage(StorageError::MissingRecord { .. })
    ));
    assert!(registry.get_subscribers("ibm").await.expect("lookup").is_empty());
}

#[rstest]
#[tokio::test]
async fn contact_resolves_gateway_address(registry: Registry) {
    registry
        .create_user("dana", "pw", "+1 555 000 1111", "virgin")
        .await
        .expect_err("eleven digits are rejected");
    registry
        .create_user("dana", "pw", "555 000 1111", "virgin")
        .await
        .expect("register");

    let contact = registry.get_contact("dana").await.expect("contact");

    assert_eq!(contact.sms_address(), "5550001111@vmobl.com");
}
