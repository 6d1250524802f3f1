mod common;

use std::sync::Arc;

use common::{mark_deleted, ref_by_id, seed_vehicle, set_text_column, setup_store, total_rows};
use vehicle_mcp_server::db::Store;
use vehicle_mcp_server::error::InventoryError;
use vehicle_mcp_server::tools::{
    AddNotesHandler, AddNotesInput, DeleteVehicleHandler, DeleteVehicleInput,
};

async fn seeded_store() -> Arc<Store> {
    let store = setup_store().await;
    seed_vehicle(
        &store,
        1,
        Some("ZFF98RNA3M0261001"),
        Some("F101"),
        "Ferrari",
        "Roma",
        2021,
        Some(250_000.0),
    )
    .await;
    seed_vehicle(
        &store,
        2,
        Some("ZFF79ALA7K0240002"),
        Some("F102"),
        "Ferrari",
        "488 GTB",
        2019,
        None,
    )
    .await;
    store
}

#[tokio::test]
async fn delete_by_vin_removes_the_row_and_mentions_the_resync() {
    let store = seeded_store().await;
    let handler = DeleteVehicleHandler::new(store.clone());

    let text = handler
        .delete_vehicle(DeleteVehicleInput {
            vin: Some("ZFF98RNA3M0261001".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(text.starts_with("Permanently deleted"), "got: {text}");
    assert!(text.contains("sync"), "got: {text}");

    assert!(ref_by_id(&store, 1).await.is_none());
    assert_eq!(total_rows(&store).await, 1);
}

#[tokio::test]
async fn delete_rejects_both_identifiers() {
    let store = seeded_store().await;
    let handler = DeleteVehicleHandler::new(store.clone());

    let err = handler
        .delete_vehicle(DeleteVehicleInput {
            vin: Some("ZFF98RNA3M0261001".to_string()),
            stock_number: Some("F101".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::AmbiguousIdentifier { .. }));
    assert_eq!(total_rows(&store).await, 2);
}

#[tokio::test]
async fn delete_rejects_missing_identifier() {
    let store = seeded_store().await;
    let handler = DeleteVehicleHandler::new(store);

    let err = handler
        .delete_vehicle(DeleteVehicleInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::NoIdentifier { .. }));
}

#[tokio::test]
async fn delete_reaches_soft_deleted_rows() {
    let store = seeded_store().await;
    mark_deleted(&store, 2).await;

    let handler = DeleteVehicleHandler::new(store.clone());
    let text = handler
        .delete_vehicle(DeleteVehicleInput {
            stock_number: Some("F102".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(text.starts_with("Permanently deleted"), "got: {text}");
    assert!(ref_by_id(&store, 2).await.is_none());
}

#[tokio::test]
async fn delete_unknown_vin_deletes_nothing() {
    let store = seeded_store().await;
    let handler = DeleteVehicleHandler::new(store.clone());

    let text = handler
        .delete_vehicle(DeleteVehicleInput {
            vin: Some("DOESNOTEXIST00000".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(text.contains("No vehicle matched"), "got: {text}");
    assert_eq!(total_rows(&store).await, 2);
}

#[tokio::test]
async fn add_notes_writes_and_stamps_the_row() {
    let store = seeded_store().await;
    let handler = AddNotesHandler::new(store.clone());

    let text = handler
        .add_notes(AddNotesInput {
            id: Some(1),
            notes: Some("Trade-in pending inspection".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(text.starts_with("Added notes"), "got: {text}");
    assert!(text.contains("Trade-in pending inspection"));

    let row = ref_by_id(&store, 1).await.unwrap();
    assert_eq!(row.notes.as_deref(), Some("Trade-in pending inspection"));
}

#[tokio::test]
async fn overwriting_notes_reports_both_values() {
    let store = seeded_store().await;
    set_text_column(&store, 1, "notes", "old note").await;

    let handler = AddNotesHandler::new(store.clone());
    let text = handler
        .add_notes(AddNotesInput {
            vin: Some("ZFF98RNA3M0261001".to_string()),
            notes: Some("new note".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(text.starts_with("Updated notes"), "got: {text}");
    assert!(text.contains("old note"));
    assert!(text.contains("new note"));
}

#[tokio::test]
async fn blank_notes_delete_the_existing_notes() {
    let store = seeded_store().await;
    set_text_column(&store, 1, "notes", "stale remark").await;

    let handler = AddNotesHandler::new(store.clone());
    let text = handler
        .add_notes(AddNotesInput {
            id: Some(1),
            notes: Some("   ".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(text.starts_with("Deleted notes"), "got: {text}");
    assert!(text.contains("stale remark"));

    assert_eq!(ref_by_id(&store, 1).await.unwrap().notes, None);
}

#[tokio::test]
async fn add_notes_rejects_multiple_identifiers() {
    let store = seeded_store().await;
    let handler = AddNotesHandler::new(store);

    let err = handler
        .add_notes(AddNotesInput {
            id: Some(1),
            stock_number: Some("F101".to_string()),
            notes: Some("anything".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::AmbiguousIdentifier { .. }));
}

#[tokio::test]
async fn duplicate_vin_yields_multiple_matches_and_mutates_nothing() {
    let store = seeded_store().await;
    seed_vehicle(
        &store,
        3,
        Some("ZFF98RNA3M0261001"),
        Some("F103"),
        "Ferrari",
        "Roma",
        2022,
        None,
    )
    .await;

    let handler = AddNotesHandler::new(store.clone());
    let err = handler
        .add_notes(AddNotesInput {
            vin: Some("ZFF98RNA3M0261001".to_string()),
            notes: Some("which one?".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::MultipleMatches { .. }));

    assert_eq!(ref_by_id(&store, 1).await.unwrap().notes, None);
    assert_eq!(ref_by_id(&store, 3).await.unwrap().notes, None);
}
