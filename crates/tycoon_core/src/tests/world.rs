use super::*;

/// Mirrors the fleet the reference bot was checked against: our fighter and
/// mothership, two "duck" fighters and a duck mothership, one other fighter.
fn mixed_world() -> WorldState {
    let mut world = base_world();
    add_ship(&mut world, "1", ship(FIGHTER, ME, 0.0, 0.0));
    add_ship(&mut world, "2", ship(FIGHTER, "player_other", 0.0, 0.0));
    add_ship(&mut world, "3", ship(FIGHTER, ENEMY, 0.0, 0.0));
    add_ship(&mut world, "4", ship(FIGHTER, ENEMY, 0.0, 0.0));
    add_ship(&mut world, "5", ship(CAPITAL, ME, 0.0, 0.0));
    add_ship(&mut world, "6", ship(CAPITAL, ENEMY, 0.0, 0.0));
    world
}

#[test]
fn test_enemy_ships_by_class_and_owner() {
    let world = mixed_world();
    let view = WorldView::new(&world);
    let enemy = PlayerId::new(ENEMY);

    assert_eq!(ids(&view.enemy_ships(Some(&class(FIGHTER)), Some(&enemy))), ["3", "4"]);
    assert_eq!(ids(&view.enemy_ships(Some(&class(CAPITAL)), Some(&enemy))), ["6"]);
    assert_eq!(ids(&view.enemy_ships(Some(&class(CAPITAL)), None)), ["6"]);
    assert_eq!(ids(&view.enemy_ships(None, None)), ["2", "3", "4", "6"]);
}

#[test]
fn test_own_ships_free_only_skips_busy_ships() {
    let mut world = base_world();
    add_ship(&mut world, "t1", ship(TRADER, ME, 0.0, 0.0));
    let mut busy = ship(TRADER, ME, 0.0, 0.0);
    busy.command = Some(Command::Stop);
    add_ship(&mut world, "t2", busy);
    add_ship(&mut world, "t3", ship(TRADER, ENEMY, 0.0, 0.0));
    let view = WorldView::new(&world);

    assert_eq!(ids(&view.own_ships(&class(TRADER), false)), ["t1", "t2"]);
    assert_eq!(ids(&view.own_ships(&class(TRADER), true)), ["t1"]);
    assert_eq!(ids(&view.ships(None, Some(&class(TRADER)), false)), ["t1", "t2", "t3"]);
}

#[test]
fn test_capital_lookup() {
    let world = mixed_world();
    let view = WorldView::new(&world);
    let (id, capital) = view.capital(&class(CAPITAL)).expect("capital present");
    assert_eq!(id.0, "5");
    assert_eq!(capital.player.0, ME);
}

#[test]
fn test_capital_missing_is_none() {
    let mut world = base_world();
    add_ship(&mut world, "9", ship(CAPITAL, ENEMY, 0.0, 0.0));
    let view = WorldView::new(&world);
    assert!(view.capital(&class(CAPITAL)).is_none());
}

#[test]
fn test_centroid_of_group() {
    let mut world = base_world();
    add_ship(&mut world, "a", ship(TRADER, ME, 0.0, 0.0));
    add_ship(&mut world, "b", ship(TRADER, ME, 100.0, 50.0));
    let view = WorldView::new(&world);
    let c = WorldView::centroid_of(&view.own_ships(&class(TRADER), false)).unwrap();
    assert_eq!(c.rounded(), [50, 25]);
    assert!(WorldView::centroid_of(&view.own_ships(&class(BOMBER), false)).is_none());
}

#[test]
fn test_first_cargo_skips_empty_lots() {
    let loaded = with_cargo(with_cargo(ship(TRADER, ME, 0.0, 0.0), "a", 0), "b", 7);
    let (resource, amount) = loaded.first_cargo().unwrap();
    assert_eq!(resource.0, "b");
    assert_eq!(amount, 7);
    assert!(!ship(TRADER, ME, 0.0, 0.0).has_cargo());
}

#[test]
fn test_moving_ship_is_not_stationary() {
    let mut moving = ship(TRADER, ME, 10.0, 0.0);
    moving.prev_position = Position::new(5.0, 0.0);
    assert!(!moving.is_stationary());
    assert!(ship(TRADER, ME, 10.0, 0.0).is_stationary());
}

#[test]
fn test_fixture_planet_markets() {
    let mut world = base_world();
    let id = add_planet(
        &mut world,
        "p1",
        with_market(planet(1.0, 2.0), "food", 20, Some(10), None),
    );
    let entry = &world.planets[&id].resources[&ResourceId::new("food")];
    assert_eq!(entry.buy_price, Some(10));
    assert_eq!(entry.sell_price, None);
}
