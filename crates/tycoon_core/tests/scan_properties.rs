//! Randomized checks of the radius scan: every returned ship qualifies and no
//! qualifying ship is dropped.

use tycoon_core::test_fixtures::{make_rng, random_world, BOMBER, TRADER};
use tycoon_core::{distance, scan, PlayerId, Position, ScanFilter, ShipClass, WorldView};

#[test]
fn test_scan_matches_brute_force_filter() {
    let mut rng = make_rng(7);
    let filter = ScanFilter::new(
        [ShipClass::new(TRADER)],
        [PlayerId::new("player_third")],
    );

    for round in 0..50 {
        let world = random_world(&mut rng, 60);
        let view = WorldView::new(&world);
        let candidates = view.enemy_ships(None, None);
        let center = Position::new(f64::from(round) * 7.0 - 150.0, 25.0);
        let radius = 50.0 + f64::from(round) * 5.0;

        let found = scan(center, radius, &candidates, &filter);

        for ship in found.values() {
            assert!(distance(center, ship.position) <= radius);
            assert_ne!(ship.ship_class.0, TRADER);
            assert_ne!(ship.player.0, "player_third");
        }
        for (id, ship) in &candidates {
            let qualifies = distance(center, ship.position) <= radius
                && filter.admits_class(&ship.ship_class)
                && filter.admits_player(&ship.player);
            assert_eq!(found.contains_key(id), qualifies, "round {round} ship {id}");
        }
    }
}

#[test]
fn test_scan_never_returns_own_ships_from_enemy_candidates() {
    let mut rng = make_rng(11);
    let world = random_world(&mut rng, 80);
    let view = WorldView::new(&world);
    let found = scan(
        Position::default(),
        2000.0,
        &view.enemy_ships(Some(&ShipClass::new(BOMBER)), None),
        &ScanFilter::default(),
    );
    assert!(found.values().all(|ship| ship.player != world.player_id));
    assert!(found.values().all(|ship| ship.ship_class.0 == BOMBER));
}
