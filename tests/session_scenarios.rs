//! End-to-end tick scenarios on the default 960x500 field

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use grid_snake::config::GameConfig;
use grid_snake::game::collision::Outcome;
use grid_snake::game::{
    Agent, Collectible, Direction, Entity, EntityKind, Field, Obstacle, Position, Session,
    SessionStatus, StartParams,
};

const CELL: i32 = 20;

fn session_with(agent: Agent, entities: Vec<Box<dyn Entity>>) -> Session {
    Session::from_parts(Field::default(), agent, entities, StdRng::seed_from_u64(7))
}

fn body(session: &Session) -> Vec<Position> {
    session.agent().segments().iter().map(|s| s.position()).collect()
}

fn assert_trails_head(session: &Session) {
    let agent = session.agent();
    let head = agent.head();
    for (i, pos) in body(session).iter().enumerate() {
        assert_eq!(*pos, Position::new(head.x - (i as i32 + 1) * CELL, head.y));
    }
}

#[test]
fn eats_item_in_its_path() {
    let agent = Agent::new(Position::new(80, 100), 2, Direction::Right, CELL);
    let item: Box<dyn Entity> = Box::new(Collectible::at(Position::new(100, 100)));
    let mut session = session_with(agent, vec![item]);

    let report = session.tick().unwrap();
    assert!(report.collisions.is_empty());
    assert_eq!(session.agent().head(), Position::new(100, 100));
    assert_eq!(body(&session), vec![Position::new(80, 100), Position::new(60, 100)]);

    // The head now sits on the item; the next tick's detection sees it
    let report = session.tick().unwrap();
    assert_eq!(report.items_eaten, 1);
    assert_eq!(session.agent().total_items_eaten(), 1);
    assert_eq!(session.agent().head(), Position::new(120, 100));
    assert_eq!(body(&session), vec![Position::new(100, 100), Position::new(80, 100)]);

    let item = &session.entities()[0];
    let field = session.field();
    assert!(!item.is_destroyed());
    assert!(item.position().is_aligned(CELL));
    assert!(item.position().x <= field.max_x() && item.position().y <= field.max_y());
}

#[test]
fn leaving_the_field_costs_a_life_and_resets() {
    let agent = Agent::new(Position::new(980, 100), 2, Direction::Right, CELL).with_lives(1);
    let mut session = session_with(agent, Vec::new());

    let report = session.tick().unwrap();
    assert_eq!(report.lives_lost, 1);
    assert_eq!(report.collisions[0].outcome, Outcome::Boundary);
    assert!(!report.game_over);

    let agent = session.agent();
    assert_eq!(agent.lives(), 0);
    assert_eq!(agent.direction(), Direction::Right);
    // Reset puts the head at (length + 2) cells, then it moves one cell
    assert_eq!(agent.head().x, 4 * CELL + CELL);
    assert!(agent.head().y >= 0);
    assert_trails_head(&session);
    assert_eq!(session.status(), SessionStatus::Running);
}

#[test]
fn head_exactly_on_far_edge_is_still_inside() {
    let agent = Agent::new(Position::new(960, 100), 2, Direction::Right, CELL).with_lives(1);
    let mut session = session_with(agent, Vec::new());

    let report = session.tick().unwrap();
    assert!(report.collisions.is_empty());
    assert_eq!(session.agent().head(), Position::new(980, 100));

    let report = session.tick().unwrap();
    assert_eq!(report.lives_lost, 1);
}

#[test]
fn obstacle_with_no_lives_left_ends_the_session() {
    let agent = Agent::new(Position::new(100, 100), 2, Direction::Right, CELL).with_lives(0);
    let stone: Box<dyn Entity> = Box::new(Obstacle::at(Position::new(100, 100)));
    let mut session = session_with(agent, vec![stone]);

    let report = session.tick().unwrap();
    assert!(report.game_over);
    assert!(session.is_over());
    assert_eq!(session.agent().lives(), 0);

    // The fatal tick still finished its movement step
    let head = session.agent().head();
    assert_eq!(head, Position::new(120, 100));

    assert!(session.tick().is_none());
    assert_eq!(session.ticks(), 1);
    assert_eq!(session.agent().head(), head);
}

#[test]
fn grows_by_one_after_three_items() {
    let agent = Agent::new(Position::new(100, 100), 2, Direction::Right, CELL);
    let items: Vec<Box<dyn Entity>> = vec![
        Box::new(Collectible::at(Position::new(100, 100))),
        Box::new(Collectible::at(Position::new(120, 100))),
        Box::new(Collectible::at(Position::new(140, 100))),
    ];
    let mut session = session_with(agent, items);

    session.tick();
    session.tick();
    assert_eq!(session.agent().length(), 2);
    assert_eq!(session.agent().items_since_growth(), 2);

    let report = session.tick().unwrap();
    assert!(report.grew);

    let agent = session.agent();
    assert_eq!(agent.total_items_eaten(), 3);
    assert_eq!(agent.items_since_growth(), 0);
    assert_eq!(agent.length(), 3);
    assert_eq!(agent.history().len(), 3);
}

#[test]
fn self_bite_resets_without_overlap() {
    let mut agent = Agent::new(Position::new(400, 200), 4, Direction::Down, CELL);
    agent.advance();
    agent.change_direction(Direction::Left);
    agent.advance();
    agent.change_direction(Direction::Up);
    agent.advance();
    assert!(agent.has_bitten_itself());

    let mut session = session_with(agent, Vec::new());
    let report = session.tick().unwrap();

    assert_eq!(report.collisions[0].outcome, Outcome::SelfBite);
    assert_eq!(session.agent().lives(), 4);
    assert_eq!(session.agent().direction(), Direction::Right);
    assert_trails_head(&session);

    let mut cells: HashSet<Position> = body(&session).into_iter().collect();
    assert!(cells.insert(session.agent().head()));
    assert_eq!(cells.len(), session.agent().length() + 1);
}

#[test]
fn reset_hides_items_on_the_old_cell() {
    let agent = Agent::new(Position::new(300, 300), 2, Direction::Up, CELL).with_lives(3);
    let entities: Vec<Box<dyn Entity>> = vec![
        Box::new(Obstacle::at(Position::new(300, 300))),
        Box::new(Collectible::at(Position::new(300, 300))),
    ];
    let mut session = session_with(agent, entities);

    let report = session.tick().unwrap();
    assert_eq!(report.collisions.len(), 1);
    assert_eq!(report.lives_lost, 1);
    assert_eq!(session.agent().total_items_eaten(), 0);
    assert_eq!(session.entities()[1].position(), Position::new(300, 300));
}

#[test]
fn random_play_keeps_invariants() {
    let config = GameConfig::default();
    let mut session = Session::start(StartParams::new(6, 15, 20), &config, StdRng::seed_from_u64(31));
    let mut steering = StdRng::seed_from_u64(32);
    let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    for _ in 0..2_000 {
        if steering.gen_bool(0.2) {
            session.change_direction(directions[steering.gen_range(0..4)]);
        }
        if session.tick().is_none() {
            break;
        }

        let agent = session.agent();
        assert_eq!(agent.length(), agent.history().len());
        for (segment, pos) in agent.segments().iter().zip(agent.history()) {
            assert_eq!(segment.position(), *pos);
        }
        assert!(agent.head().is_aligned(CELL));

        let field = session.field();
        for entity in session.entities() {
            let pos = entity.position();
            assert!(!entity.is_destroyed());
            assert!(pos.is_aligned(CELL));
            if entity.kind() == EntityKind::Collectible {
                assert!(pos.x >= 0 && pos.x <= field.max_x());
                assert!(pos.y >= 0 && pos.y <= field.max_y());
            }
        }
    }

    // Five lives cannot survive 2000 ticks of random steering
    assert!(session.is_over());
}
