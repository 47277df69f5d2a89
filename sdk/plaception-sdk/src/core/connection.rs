use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::error::Error;

pub type ConnectionError = Box<dyn Error + Send + Sync>;

/// Everything the SDK needs from a cluster.
///
/// Every call suspends until the cluster answers. Implementations are
/// expected to read and confirm at `confirmed` commitment.
#[async_trait]
pub trait SolConnection: Send + Sync {
    /// Version string of the node, used as a connectivity check.
    async fn get_version(&self) -> Result<String, ConnectionError>;

    /// Submit a signed transaction and wait until it is confirmed.
    async fn send_and_confirm_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, ConnectionError>;

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, ConnectionError>;
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ConnectionError>;
    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError>;
    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ConnectionError>;

    /// Fee the cluster would charge for `message`.
    async fn get_fee_for_message(&self, message: &Message) -> Result<u64, ConnectionError>;

    async fn request_airdrop(
        &self,
        pubkey: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, ConnectionError>;

    /// Block until `signature` reaches the connection's commitment.
    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), ConnectionError>;
}

/// Open an RPC connection at `confirmed` commitment.
pub fn rpc_connection(url: impl Into<String>) -> RpcClient {
    RpcClient::new_with_commitment(url.into(), CommitmentConfig::confirmed())
}

#[async_trait]
impl SolConnection for RpcClient {
    async fn get_version(&self) -> Result<String, ConnectionError> {
        let version = RpcClient::get_version(self).await?;
        Ok(version.solana_core)
    }

    async fn send_and_confirm_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, ConnectionError> {
        Ok(RpcClient::send_and_confirm_transaction(self, tx).await?)
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, ConnectionError> {
        let response = self
            .get_account_with_commitment(pubkey, self.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ConnectionError> {
        Ok(RpcClient::get_balance(self, pubkey).await?)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError> {
        Ok(RpcClient::get_latest_blockhash(self).await?)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ConnectionError> {
        Ok(RpcClient::get_minimum_balance_for_rent_exemption(self, data_len).await?)
    }

    async fn get_fee_for_message(&self, message: &Message) -> Result<u64, ConnectionError> {
        Ok(RpcClient::get_fee_for_message(self, message).await?)
    }

    async fn request_airdrop(
        &self,
        pubkey: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, ConnectionError> {
        Ok(RpcClient::request_airdrop(self, pubkey, lamports).await?)
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), ConnectionError> {
        self.poll_for_signature_with_commitment(signature, self.commitment())
            .await?;
        Ok(())
    }
}
