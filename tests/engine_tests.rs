use std::collections::BTreeSet;
use std::sync::Arc;

use blocky::core::{Engine, FixedSequence, Phase, Position, RotationTable, Snapshot, Status, Well};
use blocky::types::{GameAttributes, KeyKind, PieceKind};

fn table() -> Arc<RotationTable> {
    Arc::new(RotationTable::standard())
}

/// Press and release keys on fixed frames, stepping in between.
fn play_script(engine: &mut Engine, frames: u32) {
    for frame in 0..frames {
        match frame % 40 {
            0 => engine.key_down(KeyKind::MoveLeft),
            6 => engine.key_up(KeyKind::MoveLeft),
            10 => engine.key_down(KeyKind::RotateCw),
            11 => engine.key_up(KeyKind::RotateCw),
            20 => engine.key_down(KeyKind::SonicDrop),
            21 => engine.key_up(KeyKind::SonicDrop),
            _ => {}
        }
        if engine.step() == Status::GameOver {
            return;
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Engine::new(table(), GameAttributes::default(), 2024);
    let mut b = Engine::new(table(), GameAttributes::default(), 2024);
    play_script(&mut a, 600);
    play_script(&mut b, 600);
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.well(), b.well());
}

#[test]
fn test_first_seven_pieces_are_one_of_each() {
    let mut engine = Engine::new(table(), GameAttributes::default(), 77);
    let mut kinds = vec![engine.active_piece().unwrap().kind()];
    engine.key_down(KeyKind::SoftDrop);
    for _ in 0..1000 {
        assert_eq!(engine.step(), Status::Running);
        if let Some(kind) = engine.last_tick().spawned {
            kinds.push(kind);
            if kinds.len() == 7 {
                break;
            }
        }
    }
    let unique: BTreeSet<_> = kinds.iter().copied().collect();
    assert_eq!(kinds.len(), 7);
    assert_eq!(unique.len(), 7);
}

#[test]
fn test_default_gravity_accumulates_sub_rows() {
    let mut engine = Engine::with_parts(
        Well::standard(),
        table(),
        GameAttributes::default(),
        FixedSequence::new([PieceKind::T]),
    );
    let _ = engine.step();
    assert_eq!(
        engine.active_piece().unwrap().position(),
        Position::with_remainder(21, 3, 48)
    );
    for _ in 1..16 {
        let _ = engine.step();
    }
    // 16 * 48 = 768 = exactly three rows.
    assert_eq!(engine.active_piece().unwrap().position(), Position::new(18, 3));
}

#[test]
fn test_double_line_clear() {
    let mut well = Well::standard();
    for row in 0..2 {
        for col in (0..10).filter(|c| !(4..6).contains(c)) {
            well.set(row, col, true);
        }
    }
    let mut engine = Engine::with_parts(
        well,
        table(),
        GameAttributes::default(),
        FixedSequence::new([PieceKind::O]),
    );
    engine.key_down(KeyKind::SoftDrop);
    for _ in 0..20 {
        let _ = engine.step();
        if engine.last_tick().locked {
            break;
        }
    }
    assert!(engine.last_tick().locked);
    assert_eq!(engine.last_tick().lines_cleared, 2);
    assert_eq!(engine.lines_cleared(), 2);
    assert_eq!(engine.well().filled_count(), 0);
    assert_eq!(engine.phase(), Phase::Entry);
}

#[test]
fn test_snapshot_into_reuses_buffer() {
    let mut engine = Engine::new(table(), GameAttributes::default(), 5);
    let mut snap = Snapshot::default();
    engine.snapshot_into(&mut snap);
    let ptr = snap.cells.as_ptr();
    for _ in 0..10 {
        let _ = engine.step();
        engine.snapshot_into(&mut snap);
    }
    assert_eq!(snap.cells.as_ptr(), ptr);
    assert_eq!(snap.frame, 10);
    assert_eq!(snap, engine.snapshot());
}

#[test]
fn test_game_over_is_terminal() {
    let mut well = Well::standard();
    for row in 0..22 {
        for col in 0..9 {
            well.set(row, col, true);
        }
    }
    let mut engine = Engine::with_parts(
        well,
        table(),
        GameAttributes::default(),
        FixedSequence::new([PieceKind::I]),
    );
    assert!(engine.is_game_over());
    for _ in 0..5 {
        assert_eq!(engine.step(), Status::GameOver);
    }
    assert!(engine.snapshot().game_over);
    assert!(engine.snapshot().active.is_none());
}
