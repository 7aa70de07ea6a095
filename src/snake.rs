use crate::Coords;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

/// Body is stored head first. Growth is deferred: `grow` only marks the
/// next `move_step` to keep the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    grow_next_move: bool,
}

impl Snake {
    /// A straight snake of `size` segments with its head at `head`, trailing
    /// away from `direction`.
    pub fn new(head: Coords, size: usize, direction: Direction) -> Self {
        let diff = direction.delta();

        let body = (0..size.max(1) as i32)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body, direction, grow_next_move: false }
    }

    /// Build a snake from explicit segments, head first. Returns `None` for
    /// an empty body.
    pub fn from_body(body: Vec<Coords>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Snake { body, direction, grow_next_move: false })
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Step one cell forward and return the new head. No collision checks
    /// happen here; the caller inspects the result.
    pub fn move_step(&mut self) -> Coords {
        let (dx, dy) = self.direction.delta();
        let old_head = self.head();
        let new_head = (old_head.0 + dx, old_head.1 + dy);

        self.body.insert(0, new_head);

        if self.grow_next_move {
            self.grow_next_move = false;
        } else {
            self.body.pop();
        }

        new_head
    }

    /// Ignores direct reversals.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if !self.direction.is_opposite(new_direction) {
            self.direction = new_direction;
        }
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }

    pub fn is_growing(&self) -> bool {
        self.grow_next_move
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Whether the head sits on any other segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
