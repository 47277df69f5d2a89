//! The client pipeline as a type-state session.
//!
//! connect → fund payer → resolve program and provision the canvas →
//! place pixels → read the canvas. Each stage consumes the previous one, so
//! `place` and `get_canvas` only exist once a program id and canvas address
//! are known. Every call waits for the cluster before returning and nothing
//! runs concurrently.

use crate::advanced::instructions;
use crate::basic::actions::PlacePixelBuilder;
use crate::core::connection::{ConnectionError, SolConnection};
use crate::error::{DeployHint, PlaceptionError, Result};
use crate::state::{Canvas, PixelCommand, CANVAS_SIZE};
use crate::types::{PayerInfo, ProgramArtifacts, Provisioning};
use crate::utils;
use log::{debug, info, warn};
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::native_token::lamports_to_sol;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use std::path::Path;

//=============================================================================
// Stages
//=============================================================================

/// Connection verified, nothing else known yet.
pub struct Connected;

/// Payer loaded and funded.
pub struct Funded {
    payer: Keypair,
    funding: PayerInfo,
}

/// Program verified and canvas account present.
pub struct Ready {
    payer: Keypair,
    funding: PayerInfo,
    program_id: Pubkey,
    canvas: Pubkey,
    provisioning: Provisioning,
}

pub struct Session<C, S = Connected> {
    connection: C,
    state: S,
}

impl<C, S> Session<C, S> {
    pub fn connection(&self) -> &C {
        &self.connection
    }
}

impl<C: SolConnection> Session<C, Connected> {
    /// Check the cluster answers before anything else is attempted.
    pub async fn establish(connection: C) -> Result<Self> {
        establish_connection(&connection).await?;
        Ok(Self {
            connection,
            state: Connected,
        })
    }

    /// Load the payer unless one is supplied, then top it up to the budget.
    pub async fn establish_payer(
        self,
        cached: Option<Keypair>,
        keypair_path: impl AsRef<Path>,
    ) -> Result<Session<C, Funded>> {
        let (payer, funding) =
            fund_payer(&self.connection, cached, keypair_path.as_ref()).await?;
        Ok(Session {
            connection: self.connection,
            state: Funded { payer, funding },
        })
    }
}

impl<C: SolConnection> Session<C, Funded> {
    pub fn payer(&self) -> &Keypair {
        &self.state.payer
    }

    /// Balance, budget and top-up observed while funding.
    pub fn payer_info(&self) -> &PayerInfo {
        &self.state.funding
    }

    /// Verify the deployed program and make sure the canvas account exists.
    pub async fn check_program(self, artifacts: &ProgramArtifacts) -> Result<Session<C, Ready>> {
        let program_id = resolve_program(&self.connection, artifacts).await?;
        let (canvas, provisioning) =
            ensure_canvas_account(&self.connection, &self.state.payer, &program_id).await?;

        Ok(Session {
            connection: self.connection,
            state: Ready {
                payer: self.state.payer,
                funding: self.state.funding,
                program_id,
                canvas,
                provisioning,
            },
        })
    }
}

impl<C: SolConnection> Session<C, Ready> {
    pub fn payer(&self) -> &Keypair {
        &self.state.payer
    }

    pub fn payer_info(&self) -> &PayerInfo {
        &self.state.funding
    }

    pub fn program_id(&self) -> Pubkey {
        self.state.program_id
    }

    pub fn canvas_address(&self) -> Pubkey {
        self.state.canvas
    }

    /// Whether this session created the canvas account or found it.
    pub fn provisioning(&self) -> Provisioning {
        self.state.provisioning
    }

    /// Sign, send and confirm one instruction.
    pub async fn submit(&self, instruction: Instruction) -> Result<Signature> {
        submit_instruction(&self.connection, &self.state.payer, instruction).await
    }

    /// Place one pixel in its own transaction.
    pub async fn place(&self, command: PixelCommand) -> Result<Signature> {
        info!("Placing pixel at canvas: {}", self.state.canvas);
        let ix = PlacePixelBuilder::new(self.state.program_id, self.state.canvas)
            .with_command(command)
            .instruction()?;
        let signature = self.submit(ix).await?;
        debug!(
            "Placed ({}, {}) = {:#08x}: {}",
            command.x, command.y, command.color, signature
        );
        Ok(signature)
    }

    /// Place pixels one after another; stops at the first failure.
    pub async fn place_all(&self, commands: &[PixelCommand]) -> Result<Vec<Signature>> {
        let mut signatures = Vec::with_capacity(commands.len());
        for command in commands {
            signatures.push(self.place(*command).await?);
        }
        Ok(signatures)
    }

    pub async fn get_canvas(&self) -> Result<Canvas> {
        get_canvas(&self.connection, &self.state.canvas).await
    }
}

//=============================================================================
// Pipeline Steps
//=============================================================================

/// Query the node version as a connectivity check.
pub async fn establish_connection(connection: &impl SolConnection) -> Result<String> {
    let version = connection
        .get_version()
        .await
        .map_err(|e| PlaceptionError::Connection(e.to_string()))?;
    info!("Connection to cluster established, version {}", version);
    Ok(version)
}

pub fn load_payer(keypair_path: &Path) -> Result<Keypair> {
    read_keypair_file(keypair_path).map_err(|e| PlaceptionError::PayerKeypair {
        path: keypair_path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Make sure the payer can cover canvas rent plus signature fees.
///
/// Only the shortfall is requested, so calling this again on a funded
/// payer changes nothing. A single airdrop is attempted.
pub async fn fund_payer(
    connection: &impl SolConnection,
    cached: Option<Keypair>,
    keypair_path: &Path,
) -> Result<(Keypair, PayerInfo)> {
    let payer = match cached {
        Some(payer) => payer,
        None => load_payer(keypair_path)?,
    };
    let pubkey = payer.pubkey();

    let rent = utils::fetch_canvas_rent(connection).await?;
    let lamports_per_signature = utils::fetch_lamports_per_signature(connection, &pubkey).await?;
    let budget = utils::fee_budget(rent, lamports_per_signature);
    debug!(
        "Fee budget {} lamports (rent {}, {} per signature)",
        budget, rent, lamports_per_signature
    );

    let mut lamports = balance_of(connection, &pubkey).await?;
    let mut airdropped = None;
    if lamports < budget {
        let request = budget - lamports;
        debug!("Requesting airdrop of {} lamports to {}", request, pubkey);
        let airdrop_err = |e: ConnectionError| {
            PlaceptionError::AirdropFailed {
                payer: pubkey,
                lamports: request,
                reason: e.to_string(),
            }
        };
        let signature = connection
            .request_airdrop(&pubkey, request)
            .await
            .map_err(airdrop_err)?;
        connection
            .confirm_transaction(&signature)
            .await
            .map_err(airdrop_err)?;
        airdropped = Some(request);

        lamports = balance_of(connection, &pubkey).await?;
        if lamports < budget {
            warn!(
                "Balance of {} still short after airdrop: {} < {}",
                pubkey, lamports, budget
            );
            return Err(PlaceptionError::InsufficientBalance {
                payer: pubkey,
                available: lamports,
                required: budget,
            });
        }
    }

    info!(
        "Using account {} containing {} SOL to pay for fees",
        pubkey,
        lamports_to_sol(lamports)
    );

    Ok((
        payer,
        PayerInfo {
            pubkey,
            lamports,
            budget,
            airdropped,
        },
    ))
}

async fn balance_of(connection: &impl SolConnection, pubkey: &Pubkey) -> Result<u64> {
    connection
        .get_balance(pubkey)
        .await
        .map_err(|e| PlaceptionError::Connection(e.to_string()))
}

/// Read the program id from its keypair and check it is deployed and executable.
pub async fn resolve_program(
    connection: &impl SolConnection,
    artifacts: &ProgramArtifacts,
) -> Result<Pubkey> {
    let keypair_path = artifacts.keypair_path();
    let program_id = read_keypair_file(&keypair_path)
        .map_err(|e| PlaceptionError::ProgramKeyMissing {
            path: keypair_path.clone(),
            so_path: artifacts.so_path(),
            reason: e.to_string(),
        })?
        .pubkey();

    let program = connection
        .get_account(&program_id)
        .await
        .map_err(|e| PlaceptionError::Connection(e.to_string()))?;

    match program {
        None => {
            let hint = if artifacts.is_built() {
                DeployHint::NotDeployed {
                    so_path: artifacts.so_path(),
                }
            } else {
                DeployHint::NotBuilt
            };
            Err(PlaceptionError::ProgramNotDeployed { program_id, hint })
        },
        Some(account) if !account.executable => {
            Err(PlaceptionError::ProgramNotExecutable(program_id))
        },
        Some(_) => {
            info!("Using program {}", program_id);
            Ok(program_id)
        },
    }
}

/// Create the canvas account unless it already exists.
pub async fn ensure_canvas_account(
    connection: &impl SolConnection,
    payer: &Keypair,
    program_id: &Pubkey,
) -> Result<(Pubkey, Provisioning)> {
    let canvas = utils::derive_canvas_address(&payer.pubkey(), program_id)?;

    let existing = connection
        .get_account(&canvas)
        .await
        .map_err(|e| PlaceptionError::Connection(e.to_string()))?;
    if let Some(account) = existing {
        if account.data.len() != CANVAS_SIZE {
            warn!(
                "Canvas account {} holds {} bytes, expected {}",
                canvas,
                account.data.len(),
                CANVAS_SIZE
            );
        }
        debug!("Canvas account {} already exists", canvas);
        return Ok((canvas, Provisioning::Existing));
    }

    info!("Creating canvas on account: {}", canvas);
    let lamports = utils::fetch_canvas_rent(connection).await?;
    let ix = instructions::create_canvas_account(&payer.pubkey(), program_id, lamports)?;
    let signature = submit_instruction(connection, payer, ix).await?;

    Ok((canvas, Provisioning::Created(signature)))
}

/// Wrap `instruction` in a transaction signed by `payer` and wait for confirmation.
///
/// Rejections are returned as-is; nothing is retried.
pub async fn submit_instruction(
    connection: &impl SolConnection,
    payer: &Keypair,
    instruction: Instruction,
) -> Result<Signature> {
    let recent_blockhash = connection
        .get_latest_blockhash()
        .await
        .map_err(|e| PlaceptionError::Connection(e.to_string()))?;
    let mut tx = Transaction::new_unsigned(Message::new_with_blockhash(
        &[instruction],
        Some(&payer.pubkey()),
        &recent_blockhash,
    ));
    // Instructions asking for a signer other than the payer fail here.
    tx.try_sign(&[payer], recent_blockhash)
        .map_err(|e| PlaceptionError::SubmissionRejected(e.to_string()))?;

    connection
        .send_and_confirm_transaction(&tx)
        .await
        .map_err(|e| PlaceptionError::SubmissionRejected(e.to_string()))
}

/// Fetch and decode the canvas; a missing account is reported as such.
pub async fn get_canvas(connection: &impl SolConnection, canvas: &Pubkey) -> Result<Canvas> {
    let snapshot = utils::fetch_canvas(connection, canvas).await?;
    info!("{} has canvas", canvas);
    Ok(snapshot)
}
