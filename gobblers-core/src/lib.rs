//! Gobblet Gobblers game logic with snapshot-based undo.
//!
//! Two players, Yellow and Red, each start with two pieces of three
//! sizes. A piece may be dropped on a vacant cell or on top of a
//! strictly smaller piece of either colour; covered pieces stay inert
//! for the rest of the game. Three same-colour TOP pieces in a row,
//! column, or diagonal win.
//!
//! # Cell Encoding
//!
//! Every cell carries its full state in one tagged variant:
//!
//! ```text
//! Vacant   { label }                the cell's own 1-9 number
//! Occupied { owner, size, origin }  visible piece + the cell number
//!                                   it was placed on
//! ```
//!
//! The display form reproduces the classic terminal encoding:
//! `" 5"` for a vacant cell, `"YY"`/`"RR"` for large pieces,
//! `"Y5"`/`"R5"` for medium, `"y5"`/`"r5"` for small.
//!
//! # Driving the engine
//!
//! [`Game::attempt_move`] takes the raw token a player types
//! (`"a5"` = large piece on cell 5) and either applies it or rejects
//! it without touching any state. It never switches the turn: callers
//! check [`Game::check_win`] for the mover first, then call
//! [`Game::switch_turn`], then [`Game::check_tie`]. Every successful
//! placement pushes a full state snapshot, so [`Game::undo`] restores
//! board, reserves, and turn in one step.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Piece colour, also used as the turn marker.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    Yellow,
    Red,
}

impl Player {
    /// Get the other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Yellow => Player::Red,
            Player::Red => Player::Yellow,
        }
    }

    /// Uppercase colour letter used in cell display strings.
    #[inline]
    pub fn initial(self) -> char {
        match self {
            Player::Yellow => 'Y',
            Player::Red => 'R',
        }
    }

    /// Lowercase colour name for prompts ("yellow" / "red").
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Player::Yellow => "yellow",
            Player::Red => "red",
        }
    }
}

/// Piece size. The derived ordering is stacking power:
/// `Small < Medium < Large`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Size {
    Small = 0,
    Medium = 1,
    Large = 2,
}

impl Size {
    /// Parse the size letter of a move token: 'a' = large,
    /// 'b' = medium, 'c' = small.
    #[inline]
    pub fn from_letter(letter: char) -> Option<Size> {
        match letter {
            'a' => Some(Size::Large),
            'b' => Some(Size::Medium),
            'c' => Some(Size::Small),
            _ => None,
        }
    }

    /// Index into a reserve array. Reserves are kept in menu order
    /// (large, medium, small), matching the 'a'/'b'/'c' letters.
    #[inline]
    pub fn reserve_index(self) -> usize {
        match self {
            Size::Large => 0,
            Size::Medium => 1,
            Size::Small => 2,
        }
    }

    /// Check if a piece of this size may be dropped onto a visible
    /// piece of size `top`. Only strictly smaller pieces are covered:
    /// large is stopped by another large, medium by medium or large,
    /// small by anything.
    #[inline]
    pub fn can_cover(self, top: Size) -> bool {
        self > top
    }

    /// All sizes in menu order (large, medium, small).
    pub fn all() -> impl Iterator<Item = Size> {
        [Size::Large, Size::Medium, Size::Small].into_iter()
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout, with the matching 1-9 cell numbers players type:
/// ```text
///   0 1 2        1 2 3
///   3 4 5   ->   4 5 6
///   6 7 8        7 8 9
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Convert a 1-9 cell number into a position.
    #[inline]
    pub fn from_cell_number(n: u8) -> Option<Pos> {
        if (1..=9).contains(&n) {
            Some(Pos(n - 1))
        } else {
            None
        }
    }

    /// The 1-9 cell number shown to players.
    #[inline]
    pub fn cell_number(self) -> u8 {
        self.0 + 1
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

/// A parsed move token: size letter plus target cell, e.g. `"a5"`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveToken {
    pub size: Size,
    pub to: Pos,
}

impl MoveToken {
    /// Parse a raw token. Anything but exactly one size letter
    /// ('a', 'b', 'c') followed by one digit in 1-9 is rejected.
    pub fn parse(token: &str) -> Option<MoveToken> {
        let mut chars = token.chars();
        let letter = chars.next()?;
        let digit = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let size = Size::from_letter(letter)?;
        let to = Pos::from_cell_number(digit.to_digit(10)? as u8)?;
        Some(MoveToken { size, to })
    }
}

/// Contents of one board cell.
///
/// A vacant cell remembers its own 1-9 label so the board renders
/// without any outside lookup. An occupied cell records the visible
/// piece and `origin`, the cell number it was placed on; covered
/// pieces are overwritten and never resurface (uncovering is not an
/// operation in this game).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Cell {
    Vacant { label: u8 },
    Occupied { owner: Player, size: Size, origin: u8 },
}

impl Cell {
    /// Owner of the visible piece, if any.
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Occupied { owner, .. } => Some(owner),
            Cell::Vacant { .. } => None,
        }
    }

    /// Check if the cell has no piece on it.
    #[inline]
    pub fn is_vacant(self) -> bool {
        matches!(self, Cell::Vacant { .. })
    }

    /// Check if a piece of `size` may legally be dropped here.
    #[inline]
    pub fn accepts(self, size: Size) -> bool {
        match self {
            Cell::Vacant { .. } => true,
            Cell::Occupied { size: top, .. } => size.can_cover(top),
        }
    }

    /// Two-character display form (see crate docs for the encoding).
    pub fn display(self) -> String {
        match self {
            Cell::Vacant { label } => format!(" {}", label),
            Cell::Occupied { owner, size: Size::Large, .. } => {
                let c = owner.initial();
                format!("{}{}", c, c)
            }
            Cell::Occupied { owner, size: Size::Medium, origin } => {
                format!("{}{}", owner.initial(), origin)
            }
            Cell::Occupied { owner, size: Size::Small, origin } => {
                format!("{}{}", owner.initial().to_ascii_lowercase(), origin)
            }
        }
    }
}

/// The 3x3 grid of cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
    const WIN_LINES: [[Pos; 3]; 8] = [
        [Pos(0), Pos(1), Pos(2)], // Row 0
        [Pos(3), Pos(4), Pos(5)], // Row 1
        [Pos(6), Pos(7), Pos(8)], // Row 2
        [Pos(0), Pos(3), Pos(6)], // Col 0
        [Pos(1), Pos(4), Pos(7)], // Col 1
        [Pos(2), Pos(5), Pos(8)], // Col 2
        [Pos(0), Pos(4), Pos(8)], // Main diagonal
        [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
    ];

    /// Create a fresh board: every cell vacant, labelled 1-9.
    pub fn new() -> Board {
        let mut cells = [Cell::Vacant { label: 0 }; 9];
        for pos in Pos::all() {
            cells[pos.0 as usize] = Cell::Vacant { label: pos.cell_number() };
        }
        Board { cells }
    }

    /// Get the cell at the given position.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.0 as usize]
    }

    /// Overwrite the cell at the given position.
    #[inline]
    pub fn set_cell(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.0 as usize] = cell;
    }

    /// Owner of the visible piece at `pos`, if any.
    #[inline]
    pub fn top_owner(&self, pos: Pos) -> Option<Player> {
        self.cell(pos).owner()
    }

    /// Check if `player` owns the top piece of every cell in some
    /// winning line. Stops at the first complete line.
    pub fn has_line(&self, player: Player) -> bool {
        Self::WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&pos| self.top_owner(pos) == Some(player)))
    }

    /// Display strings for all 9 cells in board order. Grid glyphs
    /// (separators, margins) are the presentation layer's business.
    pub fn display_cells(&self) -> [String; 9] {
        std::array::from_fn(|i| self.cells[i].display())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Remaining pieces for one player, indexed large/medium/small.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Reserve([u8; 3]);

impl Reserve {
    /// Full starting reserve: two pieces of each size.
    pub fn new() -> Reserve {
        Reserve([2, 2, 2])
    }

    /// Pieces of `size` still in hand.
    #[inline]
    pub fn count(&self, size: Size) -> u8 {
        self.0[size.reserve_index()]
    }

    /// Take one piece of `size` out of the reserve. Returns false and
    /// changes nothing when none remain, so a count can never go
    /// negative.
    pub fn take(&mut self, size: Size) -> bool {
        let slot = &mut self.0[size.reserve_index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Check if every piece has been placed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.0 == [0, 0, 0]
    }
}

impl Default for Reserve {
    fn default() -> Self {
        Self::new()
    }
}

/// Full copy of the game state, captured immediately before a
/// placement is applied. Owned exclusively by the engine's undo
/// stack until popped and discarded.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
struct Snapshot {
    board: Board,
    yellow: Reserve,
    red: Reserve,
    turn: Player,
}

/// The game engine: board, both reserves, turn marker, and the undo
/// stack.
///
/// All mutation goes through [`attempt_move`](Game::attempt_move),
/// [`undo`](Game::undo), and [`switch_turn`](Game::switch_turn). A
/// rejected move or failed undo leaves every field untouched, so the
/// engine is always in a previously reachable state.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    yellow: Reserve,
    red: Reserve,
    turn: Player,
    history: Vec<Snapshot>,
}

impl Game {
    /// Start a fresh game: numbered vacant board, 2/2/2 reserves for
    /// both players, Yellow to move.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            yellow: Reserve::new(),
            red: Reserve::new(),
            turn: Player::Yellow,
            history: Vec::new(),
        }
    }

    // ========== Move Application ==========

    /// Try to apply a raw move token for the player to move.
    ///
    /// Returns false without touching any state when the token is
    /// malformed, the mover has no piece of that size left, or the
    /// target cell's top piece blocks the size. On success the
    /// pre-move state is pushed onto the undo stack, the piece is
    /// written into the cell, and the mover's reserve is decremented.
    ///
    /// The turn does NOT switch. Callers check [`check_win`] for the
    /// mover first and then call [`switch_turn`] themselves.
    ///
    /// [`check_win`]: Game::check_win
    /// [`switch_turn`]: Game::switch_turn
    #[instrument(skip(self))]
    pub fn attempt_move(&mut self, token: &str) -> bool {
        let Some(mov) = MoveToken::parse(token) else {
            debug!("malformed token");
            return false;
        };
        if self.reserve(self.turn).count(mov.size) == 0 {
            debug!(?mov.size, "reserve exhausted");
            return false;
        }
        if !self.board.cell(mov.to).accepts(mov.size) {
            debug!(cell = mov.to.cell_number(), "placement blocked");
            return false;
        }

        self.history.push(self.snapshot());
        self.board.set_cell(
            mov.to,
            Cell::Occupied {
                owner: self.turn,
                size: mov.size,
                origin: mov.to.cell_number(),
            },
        );
        let taken = self.reserve_mut(self.turn).take(mov.size);
        debug_assert!(taken, "reserve count was checked above");
        debug!(player = self.turn.name(), cell = mov.to.cell_number(), "piece placed");
        true
    }

    // ========== Undo ==========

    /// Roll back the last successful placement, overwriting board,
    /// both reserves, and turn with the popped snapshot in one step.
    /// Returns false when there is nothing to undo. There is no redo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        let Some(snap) = self.history.pop() else {
            debug!("history empty");
            return false;
        };
        self.board = snap.board;
        self.yellow = snap.yellow;
        self.red = snap.red;
        self.turn = snap.turn;
        true
    }

    // ========== Win & Tie Detection ==========

    /// Check if the player to move owns three tops in a row, column,
    /// or diagonal. Call for the mover BEFORE switching turns.
    pub fn check_win(&self) -> bool {
        self.board.has_line(self.turn)
    }

    /// Check if both players have placed every piece. Only meaningful
    /// after the turn switch has confirmed there was no win.
    pub fn check_tie(&self) -> bool {
        self.yellow.is_exhausted() && self.red.is_exhausted()
    }

    // ========== Turn Management & Accessors ==========

    /// Flip the turn marker. Unconditional, no validation.
    pub fn switch_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    /// The player to move.
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Remaining pieces of `size` for `player`.
    #[inline]
    pub fn remaining(&self, player: Player, size: Size) -> u8 {
        self.reserve(player).count(size)
    }

    /// Read access to the board for rendering.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of placements that can still be undone.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            yellow: self.yellow,
            red: self.red,
            turn: self.turn,
        }
    }

    fn reserve(&self, player: Player) -> &Reserve {
        match player {
            Player::Yellow => &self.yellow,
            Player::Red => &self.red,
        }
    }

    fn reserve_mut(&mut self, player: Player) -> &mut Reserve {
        match player {
            Player::Yellow => &mut self.yellow,
            Player::Red => &mut self.red,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
