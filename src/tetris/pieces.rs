//! Tetromino shape tables.
//!
//! Each shape is four cell offsets inside a 4x4 bounding box, indexed by
//! piece kind and rotation step. The same box is what the preview pane
//! renders, so every offset stays in `0..4`.

pub const NUM_KINDS: u8 = 7;
pub const NUM_ROTATIONS: u8 = 4;

/// Offset of a single cell relative to the piece origin.
pub type CellOffset = (i8, i8);

/// Shape of a piece, four cell offsets.
pub type PieceShape = [CellOffset; 4];

/// Shape for `kind` (0..7: I, O, T, S, Z, J, L) at `rotation` (0..4).
pub fn shape(kind: u8, rotation: u8) -> PieceShape {
    SHAPES[(kind % NUM_KINDS) as usize][(rotation % NUM_ROTATIONS) as usize]
}

/// Field marker for a piece kind, 1..=7. Zero is reserved for empty cells.
pub fn marker(kind: u8) -> u8 {
    (kind % NUM_KINDS) + 1
}

const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];
