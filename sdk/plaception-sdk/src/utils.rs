use crate::core::connection::SolConnection;
use crate::core::constants::{CANVAS_SEED, FEE_SIGNATURE_MULTIPLIER};
use crate::error::{PlaceptionError, Result};
use crate::state::{decode_canvas, Canvas, CANVAS_SIZE};
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;

//=============================================================================
// Address Derivation
//=============================================================================

/// Derive the canvas account owned by `program_id` for `payer`.
///
/// Same inputs always give the same address; nothing else is stored.
pub fn derive_canvas_address(payer: &Pubkey, program_id: &Pubkey) -> Result<Pubkey> {
    Pubkey::create_with_seed(payer, CANVAS_SEED, program_id)
        .map_err(|e| PlaceptionError::AddressDerivation(e.to_string()))
}

//=============================================================================
// Fees
//=============================================================================

/// Lamports the payer should hold: rent for the canvas plus headroom for
/// [`FEE_SIGNATURE_MULTIPLIER`] signatures.
pub fn fee_budget(rent_exemption: u64, lamports_per_signature: u64) -> u64 {
    rent_exemption.saturating_add(lamports_per_signature.saturating_mul(FEE_SIGNATURE_MULTIPLIER))
}

/// Current per-signature fee, priced from a one-signature message.
pub async fn fetch_lamports_per_signature(
    connection: &impl SolConnection,
    payer: &Pubkey,
) -> Result<u64> {
    let blockhash = connection
        .get_latest_blockhash()
        .await
        .map_err(|e| PlaceptionError::Connection(e.to_string()))?;
    let message = Message::new_with_blockhash(&[], Some(payer), &blockhash);
    connection
        .get_fee_for_message(&message)
        .await
        .map_err(|e| PlaceptionError::Connection(e.to_string()))
}

/// Rent-exempt minimum for an account of [`CANVAS_SIZE`] bytes.
pub async fn fetch_canvas_rent(connection: &impl SolConnection) -> Result<u64> {
    connection
        .get_minimum_balance_for_rent_exemption(CANVAS_SIZE)
        .await
        .map_err(|e| PlaceptionError::Connection(e.to_string()))
}

//=============================================================================
// Account Fetching & Parsing
//=============================================================================

/// Raw bytes of the canvas account.
pub async fn fetch_canvas_account(
    connection: &impl SolConnection,
    canvas: &Pubkey,
) -> Result<Vec<u8>> {
    let account = connection
        .get_account(canvas)
        .await
        .map_err(|e| PlaceptionError::Connection(e.to_string()))?
        .ok_or(PlaceptionError::CanvasAccountNotFound(*canvas))?;

    Ok(account.data)
}

/// Fetch and decode the canvas as it is right now.
pub async fn fetch_canvas(connection: &impl SolConnection, canvas: &Pubkey) -> Result<Canvas> {
    let data = fetch_canvas_account(connection, canvas).await?;
    decode_canvas(&data)
}
