use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What the caller has to do before the program can be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployHint {
    /// The shared object exists locally but nothing is on-chain yet.
    NotDeployed { so_path: PathBuf },
    /// No local build artifact was found either.
    NotBuilt,
}

impl fmt::Display for DeployHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployHint::NotDeployed { so_path } => write!(
                f,
                "program needs to be deployed with `solana program deploy {}`",
                so_path.display()
            ),
            DeployHint::NotBuilt => write!(f, "program needs to be built and deployed"),
        }
    }
}

/// SDK error types for Plaception operations
#[derive(Debug, Error)]
pub enum PlaceptionError {
    /// Cannot reach the cluster or query its version
    #[error("Connection error: {0}")]
    Connection(String),

    /// Payer keypair file missing or malformed
    #[error("Failed to read payer keypair at '{}': {reason}", path.display())]
    PayerKeypair { path: PathBuf, reason: String },

    /// Airdrop request or its confirmation failed
    #[error("Airdrop of {lamports} lamports to {payer} failed: {reason}")]
    AirdropFailed {
        payer: Pubkey,
        lamports: u64,
        reason: String,
    },

    /// Balance still below the fee budget after the single top-up
    #[error("Insufficient balance for {payer}: have {available} lamports, need {required}")]
    InsufficientBalance {
        payer: Pubkey,
        available: u64,
        required: u64,
    },

    /// Program keypair file missing or malformed
    #[error(
        "Failed to read program keypair at '{}' due to error: {reason}. Program may need to be deployed with `solana program deploy {}`",
        path.display(),
        so_path.display()
    )]
    ProgramKeyMissing {
        path: PathBuf,
        so_path: PathBuf,
        reason: String,
    },

    /// Program account absent on-chain
    #[error("Program {program_id} not found: {hint}")]
    ProgramNotDeployed { program_id: Pubkey, hint: DeployHint },

    /// Program account present but not marked executable
    #[error("Program {0} is not executable")]
    ProgramNotExecutable(Pubkey),

    /// Canvas read before the account was provisioned
    #[error("Cannot find canvas account {0}")]
    CanvasAccountNotFound(Pubkey),

    /// The cluster rejected a transaction
    #[error("Transaction rejected: {0}")]
    SubmissionRejected(String),

    /// Account data does not match the expected layout
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Seed or owner rejected by address derivation
    #[error("Address derivation failed: {0}")]
    AddressDerivation(String),

    /// Borsh serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] std::io::Error),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, PlaceptionError>;
