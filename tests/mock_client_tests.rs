//! Tests for consumers of the [`ShadeController`] trait seam
//!
//! Runs against the in-memory mock controller; requires the `test-utils`
//! feature.

use hdplatinum::mock::MockShadeController;
use hdplatinum::{PlatinumError, Room, Shade, ShadeController};
use pretty_assertions::assert_eq;

fn sample_rooms() -> Vec<Room> {
    let shade = |id: &str, room_id: &str, name: &str, height: u16| Shade {
        id: id.to_string(),
        name: name.to_string(),
        room_id: room_id.to_string(),
        height,
        address: "10.0.0.5:522".to_string(),
    };
    vec![
        Room {
            id: "01".to_string(),
            name: "LivingRoom".to_string(),
            shades: vec![
                shade("10", "01", "MainWindow", 50),
                shade("11", "01", "SideWindow", 0),
            ],
        },
        Room {
            id: "02".to_string(),
            name: "Bedroom".to_string(),
            shades: vec![],
        },
    ]
}

#[test]
fn test_mock_lists_rooms_and_shades() {
    let controller = MockShadeController::new().with_rooms(sample_rooms());

    let rooms = controller.list_rooms().unwrap();
    assert_eq!(rooms.len(), 2);
    assert!(rooms[1].shades.is_empty());

    let shades = controller.list_shades().unwrap();
    let ids: Vec<&str> = shades.iter().map(|shade| shade.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "11"]);
}

#[test]
fn test_mock_records_height_commands() {
    let controller = MockShadeController::new().with_rooms(sample_rooms());
    let mut shade = controller.list_shades().unwrap().remove(0);

    controller.set_height(&mut shade, 500).unwrap();
    assert_eq!(shade.height, 500);
    assert_eq!(controller.sent_commands(), vec![("10".to_string(), 500)]);
}

#[test]
fn test_mock_failure_leaves_height_untouched() {
    let controller = MockShadeController::new()
        .with_rooms(sample_rooms())
        .failing();
    let mut shade = controller.list_shades().unwrap().remove(0);

    let err = controller.set_height(&mut shade, 500).unwrap_err();
    assert!(matches!(err, PlatinumError::Connection(_)));
    assert_eq!(shade.height, 50);
    assert!(controller.sent_commands().is_empty());
}
