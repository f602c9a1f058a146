//! Flight repository integration tests
//!
//! Requires a live PostgreSQL at `TEST_DATABASE_URL` (or `DATABASE_URL`).

mod common;

use serial_test::serial;

use flightdesk_bookings::{delete_flight_tx, in_transaction, CascadeDeletion};
use flightdesk_common::Error;

use crate::common::{departure_on, TestApp};

#[tokio::test]
#[serial]
async fn test_find_by_id() {
    let app = TestApp::new().await.unwrap();
    let flight = app.create_default_flight().await.unwrap();

    let found = app.repos.flights.find_by_id(flight.id).await.unwrap();
    assert_eq!(found, Some(flight));

    let missing = app.repos.flights.find_by_id(9_999).await.unwrap();
    assert!(missing.is_none());

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_find_ids_departing_between() {
    let app = TestApp::new().await.unwrap();
    let early = app.create_flight("MN1000", departure_on(2019, 12, 31)).await.unwrap();
    let first = app.create_flight("MN1001", departure_on(2020, 3, 1)).await.unwrap();
    let second = app.create_flight("MN1002", departure_on(2021, 9, 30)).await.unwrap();
    let late = app.create_flight("MN1003", departure_on(2021, 10, 2)).await.unwrap();

    let from = departure_on(2020, 1, 1);
    let to = departure_on(2021, 10, 1);
    let ids = app
        .repos
        .flights
        .find_ids_departing_between(from, to)
        .await
        .unwrap();

    assert_eq!(ids, vec![first.id, second.id]);
    assert!(!ids.contains(&early.id));
    assert!(!ids.contains(&late.id));

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_delete_with_tickets_removes_both() {
    let app = TestApp::new().await.unwrap();
    let flight = app.create_default_flight().await.unwrap();
    let other = app.create_flight("MN3003", departure_on(2020, 8, 1)).await.unwrap();
    app.create_ticket(flight.id, "A1", "Anna").await.unwrap();
    app.create_ticket(flight.id, "A2", "Boris").await.unwrap();
    app.create_ticket(other.id, "A1", "Clara").await.unwrap();

    let deletion = app.repos.flights.delete_with_tickets(flight.id).await.unwrap();

    assert_eq!(
        deletion,
        CascadeDeletion {
            tickets_deleted: 2,
            flight_deleted: true,
        }
    );
    assert!(app.repos.flights.find_by_id(flight.id).await.unwrap().is_none());
    assert_eq!(app.count_tickets().await.unwrap(), 1);
    assert_eq!(app.count_flights().await.unwrap(), 1);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_delete_with_tickets_unknown_flight() {
    let app = TestApp::new().await.unwrap();

    let deletion = app.repos.flights.delete_with_tickets(9_999).await.unwrap();

    assert_eq!(deletion.tickets_deleted, 0);
    assert!(!deletion.flight_deleted);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_deleting_referenced_flight_alone_fails_and_keeps_it() {
    let app = TestApp::new().await.unwrap();
    let flight = app.create_default_flight().await.unwrap();
    let flight_id = flight.id;
    app.create_ticket(flight_id, "A1", "Anna").await.unwrap();

    let err = in_transaction(app.pool(), |tx| {
        Box::pin(async move { delete_flight_tx(tx, flight_id).await })
    })
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Persistence(_)));
    assert!(err.is_foreign_key_violation());
    assert_eq!(app.count_flights().await.unwrap(), 1);
    assert_eq!(app.count_tickets().await.unwrap(), 1);

    app.cleanup().await.unwrap();
}
