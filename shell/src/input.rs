//! Maps crossterm events to shell [`Action`]s.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use stepstar_core::Point;
use stepstar_search::Command;

use crate::view::CELL_WIDTH;

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor by (dx, dy).
    Move(i32, i32),
    /// Flip the wall under the cursor.
    ToggleWall,
    /// Set or clear a wall with the mouse.
    Paint { pos: Point, wall: bool },
    PlaceStart,
    PlaceEnd,
    /// Begin a search, clearing a finished one first.
    Start,
    /// Pass a command straight to the engine.
    Engine(Command),
    /// Toggle automatic stepping.
    TogglePlay,
    Redraw,
    Quit,
}

/// Translate one terminal event. `size` is the grid size in cells, used to
/// ignore mouse events outside the grid.
pub fn to_action(ev: &Event, size: Point) -> Option<Action> {
    match ev {
        Event::Key(key) => key_action(key),
        Event::Mouse(me) => mouse_action(me, size),
        Event::Resize(..) => Some(Action::Redraw),
        _ => None,
    }
}

fn key_action(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::Move(0, -1),
        KeyCode::Down | KeyCode::Char('j') => Action::Move(0, 1),
        KeyCode::Left | KeyCode::Char('h') => Action::Move(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => Action::Move(1, 0),
        KeyCode::Char('w') | KeyCode::Char(' ') => Action::ToggleWall,
        KeyCode::Char('s') => Action::PlaceStart,
        KeyCode::Char('e') => Action::PlaceEnd,
        KeyCode::Enter => Action::Start,
        KeyCode::Char('n') => Action::Engine(Command::Step),
        KeyCode::Char('r') => Action::Engine(Command::Run),
        KeyCode::Char('c') => Action::Engine(Command::ClearSearch),
        KeyCode::Char('x') => Action::Engine(Command::Reset),
        KeyCode::Char('p') => Action::TogglePlay,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

fn mouse_action(me: &MouseEvent, size: Point) -> Option<Action> {
    let pos = Point::new(i32::from(me.column) / CELL_WIDTH, i32::from(me.row));
    if pos.x >= size.x || pos.y >= size.y {
        return None;
    }
    let erase = me.modifiers.contains(KeyModifiers::CONTROL);
    match me.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            Some(Action::Paint { pos, wall: !erase })
        }
        MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Drag(MouseButton::Right) => {
            Some(Action::Paint { pos, wall: false })
        }
        _ => None,
    }
}
