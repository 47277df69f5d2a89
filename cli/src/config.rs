use plaception_sdk::core::constants::DEFAULT_PROGRAM_PATH;
use plaception_sdk::ProgramArtifacts;
use std::env;
use std::path::PathBuf;

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";
const DEFAULT_KEYPAIR: &str = "~/.config/solana/id.json";

/// Where the cluster, the payer and the program build live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rpc_url: String,
    pub keypair_path: PathBuf,
    pub program: ProgramArtifacts,
}

impl Config {
    /// Read `RPC_URL`, `KEYPAIR` and `PROGRAM_PATH`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let rpc_url = var("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let keypair = var("KEYPAIR").unwrap_or_else(|| DEFAULT_KEYPAIR.to_string());
        let program = var("PROGRAM_PATH").unwrap_or_else(|| DEFAULT_PROGRAM_PATH.to_string());

        Self {
            rpc_url,
            keypair_path: PathBuf::from(shellexpand::tilde(&keypair).into_owned()),
            program: ProgramArtifacts::new(shellexpand::tilde(&program).into_owned()),
        }
    }
}
