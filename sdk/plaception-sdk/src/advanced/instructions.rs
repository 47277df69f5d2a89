use crate::core::constants::CANVAS_SEED;
use crate::error::Result;
use crate::state::{encode_command, PixelCommand, CANVAS_SIZE};
use crate::utils::derive_canvas_address;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_instruction;

/// Create the canvas account at its seed-derived address.
///
/// Accounts:
/// 0. `[writable, signer]` Payer (funds the account and is the seed base)
/// 1. `[writable]` Canvas account
/// 2. `[signer]` Base (same key as the payer)
pub fn create_canvas_account(
    payer: &Pubkey,
    program_id: &Pubkey,
    lamports: u64,
) -> Result<Instruction> {
    let canvas = derive_canvas_address(payer, program_id)?;

    Ok(system_instruction::create_account_with_seed(
        payer,
        &canvas,
        payer,
        CANVAS_SEED,
        lamports,
        CANVAS_SIZE as u64,
        program_id,
    ))
}

/// Place one pixel.
///
/// Accounts:
/// 0. `[writable]` Canvas account
pub fn place_pixel(
    program_id: &Pubkey,
    canvas: &Pubkey,
    command: &PixelCommand,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new(*canvas, false)],
        data: encode_command(command)?,
    })
}
