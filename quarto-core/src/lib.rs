//! Quarto game logic with bit-based piece representation.
//!
//! # Piece Encoding
//!
//! ```text
//! A game with k attributes has 2^k pieces. Each piece is identified by a
//! k-bit encoding where bit i (MSB first) selects which of the two values
//! of attribute i the piece carries.
//!
//! Standard game, attributes [size, shape, color, top]:
//!   encoding 0  = 0b0000 = big, square, brown, hollow
//!   encoding 15 = 0b1111 = small, circle, yellow, solid
//!
//! Encoding -1 is the empty sentinel (no attribute values).
//! ```
//!
//! # Game Cycle
//!
//! ```text
//! First move:  the mover only picks a piece for the opponent (no placement).
//! Normal move: place the designated piece at (x, y), pick the next piece.
//! Last move:   the board has one open square; the mover only places.
//! ```
//!
//! Invalid moves are rejected silently and leave the game untouched.

use serde::{Deserialize, Serialize};

// ============================================================================
// ATTRIBUTE VALUES
// ============================================================================

/// One concrete value an attribute can take.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AttrValue {
    Brown = 0,
    Yellow = 1,
    Big = 2,
    Small = 3,
    Square = 4,
    Circle = 5,
    Hollow = 6,
    Solid = 7,
    Forward = 8,
    Backward = 9,
    Vertical = 10,
    Dashed = 11,
}

impl AttrValue {
    /// All twelve values, in discriminant order.
    pub const ALL: [AttrValue; 12] = [
        AttrValue::Brown,
        AttrValue::Yellow,
        AttrValue::Big,
        AttrValue::Small,
        AttrValue::Square,
        AttrValue::Circle,
        AttrValue::Hollow,
        AttrValue::Solid,
        AttrValue::Forward,
        AttrValue::Backward,
        AttrValue::Vertical,
        AttrValue::Dashed,
    ];
}

/// Set of attribute values packed into a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct ValueSet(pub u16);

impl ValueSet {
    pub const EMPTY: ValueSet = ValueSet(0);

    #[inline]
    pub fn insert(&mut self, v: AttrValue) {
        self.0 |= 1 << v as u16;
    }

    #[inline]
    pub fn contains(self, v: AttrValue) -> bool {
        self.0 & (1 << v as u16) != 0
    }

    /// Check that every value in `other` is present in this set.
    #[inline]
    pub fn contains_all(self, other: ValueSet) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn intersection(self, other: ValueSet) -> ValueSet {
        ValueSet(self.0 & other.0)
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the values present in the set.
    pub fn iter(self) -> impl Iterator<Item = AttrValue> {
        AttrValue::ALL.into_iter().filter(move |&v| self.contains(v))
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// A named attribute with its two possible values.
///
/// Two attributes are equal when they carry the same unordered pair of
/// values; the name does not participate in equality. Duplicate detection
/// relies on this when a ruleset is extended with a fifth attribute.
#[derive(Clone, Copy, Debug)]
pub struct Attribute {
    pub name: &'static str,
    pub value0: AttrValue,
    pub value1: AttrValue,
}

impl Attribute {
    pub const fn new(name: &'static str, value0: AttrValue, value1: AttrValue) -> Attribute {
        Attribute { name, value0, value1 }
    }

    /// An attribute must offer two distinct values.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.value0 != self.value1
    }

    /// The value selected by bit 0 or 1. None for any other selector.
    #[inline]
    pub fn value_at(self, which: u8) -> Option<AttrValue> {
        match which {
            0 => Some(self.value0),
            1 => Some(self.value1),
            _ => None,
        }
    }

    // Pre-defined attributes for the standard game and its extensions.
    pub const COLOR: Attribute = Attribute::new("color", AttrValue::Brown, AttrValue::Yellow);
    pub const SIZE: Attribute = Attribute::new("size", AttrValue::Big, AttrValue::Small);
    pub const SHAPE: Attribute = Attribute::new("shape", AttrValue::Square, AttrValue::Circle);
    pub const TOP: Attribute = Attribute::new("top", AttrValue::Hollow, AttrValue::Solid);
    pub const SLASH: Attribute = Attribute::new("slash", AttrValue::Forward, AttrValue::Backward);
    pub const BAR: Attribute = Attribute::new("bar", AttrValue::Vertical, AttrValue::Dashed);
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Attribute) -> bool {
        (self.value0 == other.value0 && self.value1 == other.value1)
            || (self.value0 == other.value1 && self.value1 == other.value0)
    }
}

impl Eq for Attribute {}

// ============================================================================
// PIECES
// ============================================================================

/// A game piece: its binary encoding plus the attribute values it carries.
///
/// The encoding is the piece identity. Pieces are cheap to copy and compare.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub encoding: i32,
    pub values: ValueSet,
}

impl Piece {
    /// The empty sentinel piece.
    pub const NONE: Piece = Piece { encoding: -1, values: ValueSet::EMPTY };

    /// Build a piece from one selector bit per attribute (MSB first).
    ///
    /// An attribute contributes no value when the piece already holds one of
    /// its two values, so overlapping attributes cannot double-tag a piece.
    pub fn from_bits(attrs: &[Attribute], bits: &[u8]) -> Piece {
        let mut encoding: i32 = 0;
        for &b in bits {
            encoding = (encoding << 1) + b as i32;
        }
        let mut values = ValueSet::EMPTY;
        for (attr, &b) in attrs.iter().zip(bits) {
            if values.contains(attr.value0) || values.contains(attr.value1) {
                continue;
            }
            if let Some(v) = attr.value_at(b) {
                values.insert(v);
            }
        }
        Piece { encoding, values }
    }

    #[inline]
    pub fn has_value(self, v: AttrValue) -> bool {
        self.values.contains(v)
    }

    /// Check the piece carries every listed value. An empty list matches
    /// nothing.
    pub fn has_all(self, vs: &[AttrValue]) -> bool {
        if vs.is_empty() {
            return false;
        }
        vs.iter().all(|&v| self.values.contains(v))
    }

    /// Number of attribute values shared with another piece. Returns -1 when
    /// there is no other piece, which lets similarity sums penalize empty
    /// squares.
    #[inline]
    pub fn shared_count(self, other: Option<Piece>) -> i32 {
        match other {
            Some(p) => self.values.intersection(p.values).len() as i32,
            None => -1,
        }
    }

    /// Two pieces are similar when they share a value, or when both carry no
    /// values at all.
    pub fn is_similar_to(self, other: Piece) -> bool {
        if self.values.is_empty() && other.values.is_empty() {
            return true;
        }
        !self.values.intersection(other.values).is_empty()
    }
}

// ============================================================================
// PLAYERS AND RESULTS
// ============================================================================

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player storage (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Outcome of a game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Draw,
    Won(Player),
}

// ============================================================================
// MOVES
// ============================================================================

/// One full move of the game cycle: the piece placed at (x, y), and the piece
/// picked for the opponent.
///
/// The first move carries no placement (`placed` is None, coordinates are
/// -1); the last move carries no pick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Move {
    pub placed: Option<Piece>,
    pub x: i32,
    pub y: i32,
    pub picked: Option<Piece>,
}

// ============================================================================
// BOARD
// ============================================================================

/// Rectangular board of piece slots, row-major.
///
/// Every accessor is bounds-checked; out-of-range coordinates read as empty
/// and mutations on them do nothing.
#[derive(Clone, Debug)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Construct a board. Non-positive dimensions fall back to 4x4.
    pub fn new(width: i32, height: i32) -> Board {
        let (width, height) = if width <= 0 || height <= 0 { (4, 4) } else { (width, height) };
        Board {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of squares.
    #[inline]
    pub fn capacity(&self) -> i32 {
        self.width * self.height
    }

    /// Check the coordinates refer to a square on the board.
    #[inline]
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// The piece at (x, y). None when empty or out of range.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Piece> {
        if self.is_valid(x, y) {
            self.cells[self.index(x, y)]
        } else {
            None
        }
    }

    /// Place a piece. Does nothing on invalid coordinates.
    pub fn put(&mut self, x: i32, y: i32, piece: Piece) {
        if self.is_valid(x, y) {
            let i = self.index(x, y);
            self.cells[i] = Some(piece);
        }
    }

    /// Clear a square. Does nothing on invalid coordinates.
    pub fn remove(&mut self, x: i32, y: i32) {
        if self.is_valid(x, y) {
            let i = self.index(x, y);
            self.cells[i] = None;
        }
    }

    #[inline]
    pub fn has_piece(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }

    /// Check the square exists and is empty.
    #[inline]
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.is_valid(x, y) && self.cells[self.index(x, y)].is_none()
    }
}

// ============================================================================
// AI SEAM
// ============================================================================

/// A move generator driving one player.
///
/// `gen_move` may mutate the game while searching but must restore it before
/// returning.
pub trait GameAi {
    fn gen_move(&mut self, game: &mut Game) -> Move;

    /// Short label for logs and match reports.
    fn name(&self) -> &str;
}

// ============================================================================
// GAME
// ============================================================================

/// Serializable view of the externally visible game state.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    /// Row-major piece encodings, None for empty squares.
    pub cells: Vec<Option<i32>>,
    pub next_pick: Option<i32>,
    pub turn: Player,
    pub result: GameResult,
    pub frees: Vec<i32>,
    pub actives: Vec<i32>,
    pub moves: usize,
    pub key: String,
}

/// Full Quarto game state: piece pools, board, move history, and the two
/// optional AI controllers.
pub struct Game {
    attributes: Vec<Attribute>,
    frees: Vec<Piece>,
    actives: Vec<Piece>,
    moves: Vec<Move>,
    board: Board,
    cpu: [Option<Box<dyn GameAi>>; 2],
    turn: Player,
    next_pick: Option<Piece>,
    game_over: bool,
    draw: bool,
}

impl Game {
    /// Build a game from an attribute list and board dimensions. Duplicate
    /// attributes (same unordered value pair) are dropped, keeping the first
    /// occurrence. A rectangular request is squared on its width: column
    /// and diagonal win detection assume a square board.
    pub fn new(attributes: Vec<Attribute>, width: i32, height: i32) -> Game {
        let mut attrs: Vec<Attribute> = Vec::new();
        for a in attributes {
            if !attrs.contains(&a) {
                attrs.push(a);
            }
        }
        let height = if height == width { height } else { width };
        let mut game = Game {
            attributes: attrs,
            frees: Vec::new(),
            actives: Vec::new(),
            moves: Vec::new(),
            board: Board::new(width, height),
            cpu: [None, None],
            turn: Player::One,
            next_pick: None,
            game_over: false,
            draw: false,
        };
        game.setup_pieces();
        game
    }

    /// The standard game: four attributes on a 4x4 board, 16 pieces.
    pub fn standard() -> Game {
        Game::new(
            vec![Attribute::SIZE, Attribute::SHAPE, Attribute::COLOR, Attribute::TOP],
            4,
            4,
        )
    }

    /// A custom game with one extra attribute. The board grows to k x k for
    /// k attributes. An extra attribute duplicating a standard one is
    /// rejected, yielding the standard game.
    pub fn with_attribute(extra: Attribute) -> Game {
        let mut attrs = vec![Attribute::SIZE, Attribute::SHAPE, Attribute::COLOR, Attribute::TOP];
        if !attrs.contains(&extra) {
            attrs.push(extra);
        }
        let n = attrs.len() as i32;
        Game::new(attrs, n, n)
    }

    fn setup_pieces(&mut self) {
        let n = self.attributes.len();
        let mut bits = vec![0u8; n];
        self.gen_pieces(&mut bits, n);
    }

    // Generates every selector-bit combination, varying the last attribute's
    // bit slowest. The first generated piece is always encoding 0.
    fn gen_pieces(&mut self, bits: &mut Vec<u8>, n: usize) {
        if n == 0 {
            let piece = Piece::from_bits(&self.attributes, bits);
            self.frees.push(piece);
        } else {
            bits[n - 1] = 0;
            self.gen_pieces(bits, n - 1);
            bits[n - 1] = 1;
            self.gen_pieces(bits, n - 1);
        }
    }

    /// Assign an AI controller to a player slot. None switches the player
    /// back to manual moves.
    pub fn set_ai(&mut self, ai: Option<Box<dyn GameAi>>, player: Player) {
        self.cpu[player.index()] = ai;
    }

    // ------------------------------------------------------------------
    // Move execution
    // ------------------------------------------------------------------

    /// Run a single turn. When the current player has an AI assigned, its
    /// generated move replaces the supplied one.
    pub fn run_turn(&mut self, x: i32, y: i32, pick: Option<Piece>) {
        if self.game_over {
            return;
        }
        let (x, y, pick) = if self.is_cpu_turn() {
            let idx = self.turn.index();
            // Take the controller out so it can mutate the game during search.
            let mut ai = self.cpu[idx].take();
            let generated = ai.as_mut().map(|a| a.gen_move(self));
            self.cpu[idx] = ai;
            match generated {
                Some(m) => (m.x, m.y, m.picked),
                None => (x, y, pick),
            }
        } else {
            (x, y, pick)
        };
        self.make_move(x, y, pick, false);
    }

    /// Execute a move. Classifies it as first, last, or normal from the pool
    /// sizes and the target square; anything else is rejected silently.
    /// Forced mode skips win detection, which search uses when replaying
    /// lines it will undo.
    pub fn make_move(&mut self, mut x: i32, mut y: i32, mut pick: Option<Piece>, forced: bool) {
        if self.game_over {
            return;
        }
        let first_move = self.next_pick.is_none() && self.is_free(pick);
        let last_move = self.board.is_open(x, y)
            && self.actives.len() as i32 == self.board.capacity() - 1;
        let norm_move = self.board.is_open(x, y) && self.is_free(pick);

        if first_move {
            x = -1;
            y = -1;
        }
        if last_move {
            pick = None;
        }

        if first_move || last_move || norm_move {
            let placed = self.next_pick;
            self.moves.push(Move { placed, x, y, picked: pick });
            self.put_piece(placed, x, y);
            if !forced {
                self.game_over = self.check_win(placed, x, y);
            }
            self.pick_piece(pick);
            if self.game_over {
                self.turn = self.turn.opponent();
            }
            self.update_state();
        }
    }

    /// Execute a recorded move.
    pub fn apply(&mut self, m: Move, forced: bool) {
        self.make_move(m.x, m.y, m.picked, forced);
    }

    /// Undo the last move, returning it. Refuses to undo a finished game
    /// unless forced. A forced apply/undo pair restores the state exactly:
    /// the pools, the designated piece, the turn, and the end-of-game flags
    /// all roll back.
    pub fn undo_turn(&mut self, forced: bool) -> Option<Move> {
        if self.game_over && !forced {
            return None;
        }
        let last = self.moves.pop()?;
        if let Some(placed) = last.placed {
            self.board.remove(last.x, last.y);
            self.actives.retain(|p| p.encoding != placed.encoding);
        }
        if let Some(picked) = last.picked {
            self.frees.push(picked);
        }
        self.next_pick = last.placed;
        // Clear the end flags first so the turn flip below is not skipped
        // when rolling back a game-ending move.
        self.game_over = false;
        self.draw = false;
        self.update_state();
        Some(last)
    }

    // Flips the turn and detects the board filling up. A decided game stays
    // frozen.
    fn update_state(&mut self) {
        if self.game_over {
            return;
        }
        if self.actives.len() as i32 == self.board.capacity() {
            self.game_over = true;
            self.draw = true;
        }
        self.turn = self.turn.opponent();
    }

    fn put_piece(&mut self, piece: Option<Piece>, x: i32, y: i32) {
        if let Some(p) = piece {
            self.board.put(x, y, p);
            self.actives.push(p);
        }
    }

    fn pick_piece(&mut self, pick: Option<Piece>) {
        if !self.is_free(pick) {
            return;
        }
        self.next_pick = pick;
        if let Some(p) = pick {
            self.frees.retain(|q| q.encoding != p.encoding);
        }
    }

    // ------------------------------------------------------------------
    // Win detection
    // ------------------------------------------------------------------

    /// Check whether placing `piece` at (x, y) completes a winning line.
    /// Pure with respect to the game state.
    pub fn check_win(&self, piece: Option<Piece>, x: i32, y: i32) -> bool {
        match piece {
            Some(p) => self.check_lines(p, x, y),
            None => false,
        }
    }

    // Collects the column, the row, and any diagonal through (x, y),
    // excluding the square itself. A line wins when it already holds at
    // least dim-1 pieces and all of them share a value with the placed one.
    fn check_lines(&self, p: Piece, x: i32, y: i32) -> bool {
        let n = self.board.width();
        let on_diag = x == y;
        let on_anti = x + y == n - 1;
        let mut col = Vec::new();
        let mut row = Vec::new();
        let mut diag = Vec::new();
        let mut anti = Vec::new();

        for i in 0..n {
            if i != y {
                if let Some(q) = self.board.get(x, i) {
                    col.push(q);
                }
            }
            if i != x {
                if let Some(q) = self.board.get(i, y) {
                    row.push(q);
                }
                if on_diag {
                    if let Some(q) = self.board.get(i, i) {
                        diag.push(q);
                    }
                }
                if on_anti {
                    if let Some(q) = self.board.get(i, n - 1 - i) {
                        anti.push(q);
                    }
                }
            }
        }

        let need = (self.dim() - 1) as usize;
        [col, row, diag, anti]
            .iter()
            .any(|line| line.len() >= need && self.check_all_similar(line, p))
    }

    /// Check that `p` shares at least one attribute value with every piece
    /// in the list. An empty list never matches.
    pub fn check_all_similar(&self, pieces: &[Piece], p: Piece) -> bool {
        if pieces.is_empty() {
            return false;
        }
        let mut intersect = p.values;
        for piece in pieces {
            intersect = intersect.intersection(piece.values);
        }
        !intersect.is_empty()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Check the current player is AI-controlled.
    #[inline]
    pub fn is_cpu_turn(&self) -> bool {
        self.cpu[self.turn.index()].is_some()
    }

    #[inline]
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.board.is_open(x, y)
    }

    /// The piece at (x, y), if any.
    #[inline]
    pub fn piece_at(&self, x: i32, y: i32) -> Option<Piece> {
        self.board.get(x, y)
    }

    /// Check the piece belongs to the game and is still in the free pool.
    pub fn is_free(&self, piece: Option<Piece>) -> bool {
        match piece {
            Some(p) => {
                self.frees.iter().any(|q| q.encoding == p.encoding)
                    && !self.actives.iter().any(|q| q.encoding == p.encoding)
            }
            None => false,
        }
    }

    /// Check the game is one placement away from a full board.
    pub fn is_last_turn(&self) -> bool {
        self.actives.len() as i32 == self.board.capacity() - 1
    }

    #[inline]
    pub fn frees(&self) -> &[Piece] {
        &self.frees
    }

    #[inline]
    pub fn actives(&self) -> &[Piece] {
        &self.actives
    }

    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.moves
    }

    /// The last move made, without undoing it.
    pub fn prev_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[inline]
    pub fn next_pick(&self) -> Option<Piece> {
        self.next_pick
    }

    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side length of the board.
    #[inline]
    pub fn dim(&self) -> i32 {
        self.board.width()
    }

    /// The game outcome. The turn has already flipped past the winner when
    /// a game ends, so the winner is the previous mover.
    pub fn winner(&self) -> GameResult {
        if !self.game_over {
            return GameResult::InProgress;
        }
        if self.draw {
            GameResult::Draw
        } else {
            GameResult::Won(self.turn.opponent())
        }
    }

    /// Free pieces carrying every listed value.
    pub fn find_pieces(&self, values: &[AttrValue]) -> Vec<Piece> {
        self.frees.iter().copied().filter(|p| p.has_all(values)).collect()
    }

    /// Free pieces similar to the given piece.
    pub fn find_similar_pieces(&self, piece: Piece) -> Vec<Piece> {
        self.frees.iter().copied().filter(|p| p.is_similar_to(piece)).collect()
    }

    /// Serialized state key: row-major cell encodings plus the designated
    /// piece, comma-separated, `X` for empty. Used to memoize search nodes
    /// and as a debugging snapshot of a position.
    pub fn board_key(&self) -> String {
        let mut key = String::new();
        for y in 0..self.board.height() {
            for x in 0..self.board.width() {
                match self.board.get(x, y) {
                    Some(p) => key.push_str(&p.encoding.to_string()),
                    None => key.push('X'),
                }
                key.push(',');
            }
        }
        match self.next_pick {
            Some(p) => key.push_str(&p.encoding.to_string()),
            None => key.push('X'),
        }
        key
    }

    /// Serializable view of the whole query surface.
    pub fn snapshot(&self) -> Snapshot {
        let mut cells = Vec::with_capacity(self.board.capacity() as usize);
        for y in 0..self.board.height() {
            for x in 0..self.board.width() {
                cells.push(self.board.get(x, y).map(|p| p.encoding));
            }
        }
        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells,
            next_pick: self.next_pick.map(|p| p.encoding),
            turn: self.turn,
            result: self.winner(),
            frees: self.frees.iter().map(|p| p.encoding).collect(),
            actives: self.actives.iter().map(|p| p.encoding).collect(),
            moves: self.moves.len(),
            key: self.board_key(),
        }
    }

    // Test hook: marks pieces as played without board placement, so endgame
    // states can be built directly.
    #[cfg(test)]
    fn seed_actives(&mut self, count: usize) {
        for _ in 0..count {
            let p = self.frees.remove(0);
            self.actives.push(p);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
