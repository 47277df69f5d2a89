#![allow(dead_code)]

use async_trait::async_trait;
use plaception_sdk::core::connection::{ConnectionError, SolConnection};
use plaception_sdk::ProgramArtifacts;
use solana_sdk::{
    account::Account,
    bpf_loader_upgradeable,
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    rent::Rent,
    signature::{write_keypair_file, Keypair, Signature, Signer},
    system_instruction::SystemInstruction,
    system_program,
    transaction::Transaction,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, Account>,
    transactions: Vec<Transaction>,
    airdrops: Vec<(Pubkey, u64)>,
    airdrop_signatures: Vec<Signature>,
    placements: Vec<(Pubkey, Vec<u8>)>,
    creations: Vec<Pubkey>,
}

/// In-memory cluster.
///
/// Runs system `CreateAccountWithSeed`, charges signature fees and records
/// calls to the deployed program without interpreting them.
#[derive(Clone)]
pub struct MockLedger {
    state: Arc<Mutex<LedgerState>>,
    blockhash: Hash,
    rent: Rent,
    pub offline: bool,
    pub airdrop_cap: Option<u64>,
    pub refuse_airdrops: bool,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState::default())),
            blockhash: Hash::new_unique(),
            rent: Rent::default(),
            offline: false,
            airdrop_cap: None,
            refuse_airdrops: false,
        }
    }

    pub fn rent_for(&self, len: usize) -> u64 {
        self.rent.minimum_balance(len)
    }

    pub fn deploy_program(&self, program_id: Pubkey, executable: bool) {
        self.state.lock().unwrap().accounts.insert(
            program_id,
            Account {
                lamports: 1,
                data: vec![],
                owner: bpf_loader_upgradeable::id(),
                executable,
                rent_epoch: 0,
            },
        );
    }

    pub fn fund(&self, pubkey: Pubkey, lamports: u64) {
        let mut state = self.state.lock().unwrap();
        let account = state
            .accounts
            .entry(pubkey)
            .or_insert_with(|| Account::new(0, 0, &system_program::id()));
        account.lamports += lamports;
    }

    pub fn set_account_data(&self, pubkey: Pubkey, owner: Pubkey, data: Vec<u8>) {
        let lamports = self.rent_for(data.len());
        let account = Account {
            lamports,
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        };
        self.state.lock().unwrap().accounts.insert(pubkey, account);
    }

    pub fn account(&self, pubkey: &Pubkey) -> Option<Account> {
        self.state.lock().unwrap().accounts.get(pubkey).cloned()
    }

    pub fn balance(&self, pubkey: &Pubkey) -> u64 {
        self.account(pubkey).map(|a| a.lamports).unwrap_or(0)
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    pub fn airdrops(&self) -> Vec<(Pubkey, u64)> {
        self.state.lock().unwrap().airdrops.clone()
    }

    pub fn placements(&self) -> Vec<(Pubkey, Vec<u8>)> {
        self.state.lock().unwrap().placements.clone()
    }

    pub fn creations(&self) -> Vec<Pubkey> {
        self.state.lock().unwrap().creations.clone()
    }

    fn process(&self, tx: &Transaction) -> Result<Signature, ConnectionError> {
        tx.verify().map_err(|e| format!("signature verification failed: {e}"))?;
        if tx.message.recent_blockhash != self.blockhash {
            return Err("blockhash not found".into());
        }

        let mut state = self.state.lock().unwrap();
        let mut accounts = state.accounts.clone();
        let mut placements = Vec::new();
        let mut creations = Vec::new();
        let keys = &tx.message.account_keys;

        let fee = LAMPORTS_PER_SIGNATURE * tx.signatures.len() as u64;
        let fee_payer = accounts
            .get_mut(&keys[0])
            .filter(|a| a.lamports >= fee)
            .ok_or("insufficient funds for fee")?;
        fee_payer.lamports -= fee;

        for ix in &tx.message.instructions {
            let program_id = keys[ix.program_id_index as usize];
            let metas: Vec<Pubkey> = ix.accounts.iter().map(|i| keys[*i as usize]).collect();

            if program_id == system_program::id() {
                let decoded: SystemInstruction = bincode::deserialize(&ix.data)?;
                let SystemInstruction::CreateAccountWithSeed {
                    base,
                    seed,
                    lamports,
                    space,
                    owner,
                } = decoded
                else {
                    return Err("unsupported system instruction".into());
                };
                let (from, to) = (metas[0], metas[1]);
                if Pubkey::create_with_seed(&base, &seed, &owner)? != to {
                    return Err("address does not match seed derivation".into());
                }
                if accounts.contains_key(&to) {
                    return Err("account already in use".into());
                }
                let funder = accounts
                    .get_mut(&from)
                    .filter(|a| a.lamports >= lamports)
                    .ok_or("insufficient lamports for new account")?;
                funder.lamports -= lamports;
                let created = Account {
                    lamports,
                    data: vec![0; space as usize],
                    owner,
                    executable: false,
                    rent_epoch: 0,
                };
                accounts.insert(to, created);
                creations.push(to);
            } else {
                accounts
                    .get(&program_id)
                    .filter(|a| a.executable)
                    .ok_or("program not found")?;
                let target = metas.first().ok_or("missing canvas account")?;
                let owned = accounts
                    .get(target)
                    .map(|a| a.owner == program_id)
                    .unwrap_or(false);
                if !owned {
                    return Err("invalid account data for instruction".into());
                }
                placements.push((*target, ix.data.clone()));
            }
        }

        state.accounts = accounts;
        state.placements.extend(placements);
        state.creations.extend(creations);
        state.transactions.push(tx.clone());
        Ok(tx.signatures[0])
    }
}

#[async_trait]
impl SolConnection for MockLedger {
    async fn get_version(&self) -> Result<String, ConnectionError> {
        if self.offline {
            return Err("connection refused".into());
        }
        Ok("2.2.1".to_string())
    }

    async fn send_and_confirm_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, ConnectionError> {
        self.process(tx)
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, ConnectionError> {
        Ok(self.account(pubkey))
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ConnectionError> {
        Ok(self.balance(pubkey))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError> {
        Ok(self.blockhash)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ConnectionError> {
        Ok(self.rent_for(data_len))
    }

    async fn get_fee_for_message(&self, message: &Message) -> Result<u64, ConnectionError> {
        Ok(LAMPORTS_PER_SIGNATURE * message.header.num_required_signatures as u64)
    }

    async fn request_airdrop(
        &self,
        pubkey: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, ConnectionError> {
        if self.refuse_airdrops {
            return Err("airdrop request failed".into());
        }
        let granted = self.airdrop_cap.map_or(lamports, |cap| lamports.min(cap));
        self.fund(*pubkey, granted);

        let signature = Signature::new_unique();
        let mut state = self.state.lock().unwrap();
        state.airdrops.push((*pubkey, lamports));
        state.airdrop_signatures.push(signature);
        Ok(signature)
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), ConnectionError> {
        let known = self
            .state
            .lock()
            .unwrap()
            .airdrop_signatures
            .contains(signature);
        if known {
            Ok(())
        } else {
            Err("signature not found".into())
        }
    }
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("plaception-{}", Pubkey::new_unique()));
    // `Pubkey::new_unique` repeats across processes; drop leftovers from earlier runs.
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Program artifacts with a keypair file written, optionally with a `.so`.
pub fn program_artifacts(built: bool) -> (ProgramArtifacts, Keypair) {
    let artifacts = ProgramArtifacts::new(scratch_dir());
    let program = Keypair::new();
    write_keypair_file(&program, artifacts.keypair_path()).unwrap();
    if built {
        std::fs::write(artifacts.so_path(), b"\x7fELF").unwrap();
    }
    (artifacts, program)
}

/// Ledger with an executable program and its artifacts on disk.
pub fn deployed_ledger() -> (MockLedger, ProgramArtifacts, Pubkey) {
    let ledger = MockLedger::new();
    let (artifacts, program) = program_artifacts(true);
    ledger.deploy_program(program.pubkey(), true);
    (ledger, artifacts, program.pubkey())
}
