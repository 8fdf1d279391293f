use cardzen_core::{Client, ClientSettings};
use cardzen_state::{DataSource, StateError};
use cardzen_vault::{BenefitRequest, BenefitType, CardAddRequest, VaultClientExt};
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn client_against(server: &MockServer, data_dir: &TempDir) -> Client {
    Client::new(Some(ClientSettings {
        api_url: server.uri(),
        data_dir: data_dir.path().to_path_buf(),
        user_agent: "CardZen Tests".to_string(),
        request_timeout_ms: 2_000,
    }))
}

fn card_request(name: &str) -> CardAddRequest {
    CardAddRequest {
        provider: "Chase".to_string(),
        network: "Visa".to_string(),
        card_name: name.to_string(),
        benefits: vec![BenefitRequest {
            name: "Dining".to_string(),
            value: 3.0,
            benefit_type: BenefitType::Cashback,
        }],
        due_date: 15,
        statement_date: 20,
        limit: 5_000.0,
        currency: "USD".to_string(),
        annual_fee: 95.0,
        apr: 24.99,
        perks: vec![],
        image_url: None,
        enable_alerts: true,
    }
}

#[tokio::test]
async fn cards_fall_back_to_local_store_when_backend_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    std::fs::write(
        data_dir.path().join("cardzen-credit-cards.json"),
        r#"[{
            "id": "card-1",
            "provider": "Chase",
            "network": "Visa",
            "cardName": "Freedom",
            "benefits": [],
            "dueDate": 10,
            "statementDate": 25,
            "limit": 3000,
            "currency": "USD",
            "enableAlerts": true
        }]"#,
    )
    .unwrap();

    let client = client_against(&server, &data_dir);
    let cards = client.vault().cards();

    assert_eq!(cards.load().await, DataSource::Fallback);
    let listed = cards.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].card_name, "Freedom");
    assert!(cards.is_loaded());
}

#[tokio::test]
async fn unresponsive_backend_fails_over_within_the_request_timeout() {
    let server = MockServer::start().await;
    // The backend hangs far longer than the configured request timeout.
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("[]")
                .set_delay(std::time::Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    std::fs::write(
        data_dir.path().join("cardzen-credit-cards.json"),
        r#"[{
            "id": "card-1",
            "provider": "Chase",
            "network": "Visa",
            "cardName": "Freedom",
            "benefits": [],
            "dueDate": 10,
            "statementDate": 25,
            "limit": 3000,
            "currency": "USD",
            "enableAlerts": true
        }]"#,
    )
    .unwrap();

    let client = Client::new(Some(ClientSettings {
        api_url: server.uri(),
        data_dir: data_dir.path().to_path_buf(),
        user_agent: "CardZen Tests".to_string(),
        request_timeout_ms: 500,
    }));
    let cards = client.vault().cards();

    let started = std::time::Instant::now();
    assert_eq!(cards.load().await, DataSource::Fallback);
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert_eq!(cards.list().len(), 1);
}

#[tokio::test]
async fn legacy_string_dates_are_migrated_on_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cardzen-credit-cards"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{
                "id": "card-1",
                "provider": "Amex",
                "network": "American Express",
                "cardName": "Gold",
                "benefits": [],
                "dueDate": "2024-03-15T00:00:00.000Z",
                "statementDate": "not a date",
                "limit": 10000,
                "currency": "USD",
                "enableAlerts": false
            }]"#,
        ))
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    let client = client_against(&server, &data_dir);
    let cards = client.vault().cards();

    assert_eq!(cards.load().await, DataSource::Primary);
    let card = &cards.list()[0];
    assert_eq!(card.due_date, 15);
    assert_eq!(card.statement_date, 1);
}

#[tokio::test]
async fn added_cards_are_shared_through_the_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    let client = client_against(&server, &data_dir);

    let cards = client.vault().cards();
    cards.load().await;
    let added = cards.add(card_request("Sapphire")).await;
    assert!(!added.id.is_empty());

    // A sub-client built later sees the same in-memory collection.
    let other = client.vault().cards();
    assert_eq!(other.list().len(), 1);
    assert_eq!(other.list()[0].card_name, "Sapphire");
}

#[tokio::test]
async fn card_add_clamps_days_and_amounts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    let client = client_against(&server, &data_dir);
    let cards = client.vault().cards();
    cards.load().await;

    let mut request = card_request("Edge");
    request.due_date = 0;
    request.statement_date = 45;
    request.limit = -100.0;
    request.benefits[0].value = -2.0;

    let added = cards.add(request).await;
    assert_eq!(added.due_date, 1);
    assert_eq!(added.statement_date, 31);
    assert_eq!(added.limit, 0.0);
    assert_eq!(added.benefits[0].value, 0.0);
}

#[tokio::test]
async fn empty_custom_lists_are_seeded_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    let client = client_against(&server, &data_dir);

    let providers = client.vault().custom_lists().providers();
    assert_eq!(providers.load().await, DataSource::Default);
    let names: Vec<_> = providers.list().into_iter().map(|i| i.name).collect();
    assert_eq!(
        names,
        [
            "Chase",
            "American Express",
            "Capital One",
            "Bank of America",
            "Citi",
            "Discover"
        ]
    );

    // The seeded defaults are persisted for the next session.
    assert!(data_dir.path().join("cardzen-providers.json").exists());

    // The perks list has no defaults and stays empty.
    let perks = client.vault().custom_lists().perks();
    perks.load().await;
    assert!(perks.list().is_empty());
}

#[tokio::test]
async fn custom_list_rejects_blank_and_duplicate_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    let client = client_against(&server, &data_dir);
    let providers = client.vault().custom_lists().providers();
    providers.load().await;

    assert!(matches!(
        providers.add("   ").await,
        Err(StateError::ValidationRejected(_))
    ));
    assert!(matches!(
        providers.add("CHASE").await,
        Err(StateError::ValidationRejected(_))
    ));

    // Neither rejection touched the seeded list.
    assert_eq!(providers.list().len(), 6);
}

#[tokio::test]
async fn custom_list_additions_stay_sorted_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    let client = client_against(&server, &data_dir);
    let networks = client.vault().custom_lists().networks();
    networks.load().await;

    networks.add("JCB").await.unwrap();
    networks.add("apple pay").await.unwrap();

    let names: Vec<_> = networks.list().into_iter().map(|i| i.name).collect();
    assert_eq!(
        names,
        [
            "American Express",
            "apple pay",
            "Discover",
            "JCB",
            "Mastercard",
            "Visa"
        ]
    );
}

#[tokio::test]
async fn spending_habit_amounts_are_floored_at_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    let client = client_against(&server, &data_dir);
    let habits = client.vault().spending_habits();
    habits.load().await;

    let habit = habits.add("Groceries", -50.0).await;
    assert_eq!(habit.amount, 0.0);
    // The collection assigns the id.
    assert!(!habit.id.is_empty());
    assert_eq!(habits.list().len(), 1);
}
