use crate::core::constants::{DEFAULT_PROGRAM_PATH, PROGRAM_KEYPAIR_NAME, PROGRAM_SO_NAME};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::path::{Path, PathBuf};

/// Local build output of the program: its keypair and shared object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramArtifacts {
    pub dir: PathBuf,
}

impl ProgramArtifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Written by `solana program deploy`; holds the program id.
    pub fn keypair_path(&self) -> PathBuf {
        self.dir.join(PROGRAM_KEYPAIR_NAME)
    }

    /// Written by the program build.
    pub fn so_path(&self) -> PathBuf {
        self.dir.join(PROGRAM_SO_NAME)
    }

    pub fn is_built(&self) -> bool {
        self.so_path().exists()
    }
}

impl Default for ProgramArtifacts {
    fn default() -> Self {
        Self::new(Path::new(DEFAULT_PROGRAM_PATH))
    }
}

/// Payer state after funding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayerInfo {
    pub pubkey: Pubkey,

    /// Balance after any top-up
    pub lamports: u64,

    /// Rent for the canvas plus signature headroom
    pub budget: u64,

    /// Lamports requested from the faucet, if a top-up was needed
    pub airdropped: Option<u64>,
}

/// Outcome of making sure the canvas account exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioning {
    Created(Signature),
    Existing,
}

impl Provisioning {
    pub fn was_created(&self) -> bool {
        matches!(self, Provisioning::Created(_))
    }
}
