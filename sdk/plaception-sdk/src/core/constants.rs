/// Seed for the canvas account, combined with the payer and program id.
pub const CANVAS_SEED: &str = "c1234c41231234c";

/// Number of color cells stored in the canvas account.
pub const CANVAS_CELLS: usize = 128;

/// Signatures the payer should be able to afford on top of rent.
pub const FEE_SIGNATURE_MULTIPLIER: u64 = 100;

/// Default location of the program build artifacts.
pub const DEFAULT_PROGRAM_PATH: &str = "dist/program";

pub const PROGRAM_SO_NAME: &str = "plaception.so";
pub const PROGRAM_KEYPAIR_NAME: &str = "plaception-keypair.json";
