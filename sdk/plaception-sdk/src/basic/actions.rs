use crate::advanced::instructions;
use crate::core::connection::SolConnection;
use crate::error::{PlaceptionError, Result};
use crate::state::PixelCommand;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;

/// Builds a single-pixel placement.
///
/// Coordinates are passed through untouched; the program owns bounds
/// checking and the (x, y) to cell mapping.
pub struct PlacePixelBuilder {
    program_id: Pubkey,
    canvas: Pubkey,
    x: u8,
    y: u8,
    color: u32,
}

impl PlacePixelBuilder {
    pub fn new(program_id: Pubkey, canvas: Pubkey) -> Self {
        Self {
            program_id,
            canvas,
            x: 0,
            y: 0,
            color: 0,
        }
    }

    pub fn at(mut self, x: u8, y: u8) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_command(self, command: PixelCommand) -> Self {
        self.at(command.x, command.y).with_color(command.color)
    }

    pub fn command(&self) -> PixelCommand {
        PixelCommand::new(self.x, self.y, self.color)
    }

    pub fn instruction(&self) -> Result<Instruction> {
        instructions::place_pixel(&self.program_id, &self.canvas, &self.command())
    }

    /// Unsigned transaction with `payer` as fee payer and a fresh blockhash.
    pub async fn build_transaction(
        &self,
        connection: &impl SolConnection,
        payer: Pubkey,
    ) -> Result<Transaction> {
        let ix = self.instruction()?;
        let recent_blockhash = connection
            .get_latest_blockhash()
            .await
            .map_err(|e| PlaceptionError::Connection(e.to_string()))?;

        Ok(Transaction::new_unsigned(Message::new_with_blockhash(
            &[ix],
            Some(&payer),
            &recent_blockhash,
        )))
    }
}
