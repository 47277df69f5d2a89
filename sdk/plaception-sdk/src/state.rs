//! Wire types shared with the on-chain program.
//!
//! Both layouts are plain borsh: fields in declaration order, integers
//! little-endian, fixed-size arrays without a length prefix. The
//! [`WireSchema`] descriptors spell the layouts out so the byte length is
//! known at compile time.

use crate::core::constants::CANVAS_CELLS;
use crate::error::{PlaceptionError, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U32,
}

impl FieldKind {
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U8 => 1,
            FieldKind::U32 => 4,
        }
    }
}

/// One field of a wire layout: `count` consecutive values of `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub count: usize,
}

impl FieldSpec {
    pub const fn scalar(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            count: 1,
        }
    }

    pub const fn array(name: &'static str, kind: FieldKind, count: usize) -> Self {
        Self { name, kind, count }
    }

    pub const fn len(&self) -> usize {
        self.kind.width() * self.count
    }
}

/// Total encoded length of an ordered field list.
pub const fn schema_len(fields: &[FieldSpec]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fields.len() {
        total += fields[i].len();
        i += 1;
    }
    total
}

/// A fixed-size borsh layout.
pub trait WireSchema: BorshSerialize + BorshDeserialize {
    const FIELDS: &'static [FieldSpec];
    const LEN: usize = schema_len(Self::FIELDS);

    fn encode(&self) -> Result<Vec<u8>> {
        let bytes = borsh::to_vec(self)?;
        if bytes.len() != Self::LEN {
            return Err(PlaceptionError::InvalidAccountData(format!(
                "encoded {} bytes, layout is {}",
                bytes.len(),
                Self::LEN
            )));
        }
        Ok(bytes)
    }

    /// Decode exactly `Self::LEN` bytes; shorter or longer input is rejected.
    fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != Self::LEN {
            return Err(PlaceptionError::InvalidAccountData(format!(
                "expected {} bytes, got {}",
                Self::LEN,
                data.len()
            )));
        }
        Ok(borsh::from_slice(data)?)
    }
}

/// Canvas account contents: a flat array of colors.
///
/// How (x, y) maps onto a cell is decided by the program, not here.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub cells: [u32; CANVAS_CELLS],
}

impl Canvas {
    pub fn new(cells: [u32; CANVAS_CELLS]) -> Self {
        Self { cells }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().copied()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            cells: [0; CANVAS_CELLS],
        }
    }
}

impl WireSchema for Canvas {
    const FIELDS: &'static [FieldSpec] =
        &[FieldSpec::array("cells", FieldKind::U32, CANVAS_CELLS)];
}

// serde's derive stops at 32-element arrays.
impl Serialize for Canvas {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Canvas", 1)?;
        state.serialize_field("cells", &self.cells[..])?;
        state.end()
    }
}

/// Byte length of the canvas account.
pub const CANVAS_SIZE: usize = Canvas::LEN;

/// Instruction payload for placing one pixel.
#[derive(
    BorshSerialize, BorshDeserialize, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct PixelCommand {
    pub x: u8,
    pub y: u8,
    pub color: u32,
}

impl PixelCommand {
    pub fn new(x: u8, y: u8, color: u32) -> Self {
        Self { x, y, color }
    }
}

impl WireSchema for PixelCommand {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::scalar("x", FieldKind::U8),
        FieldSpec::scalar("y", FieldKind::U8),
        FieldSpec::scalar("color", FieldKind::U32),
    ];
}

pub fn encode_command(command: &PixelCommand) -> Result<Vec<u8>> {
    command.encode()
}

pub fn encode_canvas(canvas: &Canvas) -> Result<Vec<u8>> {
    canvas.encode()
}

pub fn decode_canvas(data: &[u8]) -> Result<Canvas> {
    Canvas::decode(data)
}
