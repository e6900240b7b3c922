//! Scoped unlocking of the node-side signing account.

use crate::error::{HarnessError, Result};
use donut_core::Address;
use donut_rpc_client::{RpcClient, RpcException};
use std::sync::Arc;
use tracing::{info, warn};

/// Keeps the account unlocked on the node until [`AccountUnlock::release`].
///
/// Dropping the guard without releasing it schedules the lock on the
/// current runtime, if any, and logs a warning.
pub struct AccountUnlock {
    rpc_client: Arc<RpcClient>,
    address: Address,
    released: bool,
}

impl AccountUnlock {
    pub async fn acquire(
        rpc_client: Arc<RpcClient>,
        address: Address,
        password: &str,
        duration_secs: u64,
    ) -> Result<Self> {
        let unlocked = rpc_client
            .personal_unlock_account(&address, password, duration_secs)
            .await
            .map_err(HarnessError::rpc("unlocking account"))?;
        if !unlocked {
            return Err(HarnessError::UnlockRefused(address));
        }
        info!(target: "donut::lifecycle", %address, duration_secs, "account unlocked");
        Ok(Self {
            rpc_client,
            address,
            released: false,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Locks the account again.
    pub async fn release(mut self) -> std::result::Result<(), RpcException> {
        self.released = true;
        let locked = self
            .rpc_client
            .personal_lock_account(&self.address)
            .await?;
        if locked {
            info!(target: "donut::lifecycle", address = %self.address, "account locked");
        } else {
            warn!(target: "donut::lifecycle", address = %self.address, "node reported the account as not locked");
        }
        Ok(())
    }
}

impl Drop for AccountUnlock {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        warn!(target: "donut::lifecycle", address = %self.address, "unlock guard dropped without release");
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let rpc_client = Arc::clone(&self.rpc_client);
            let address = self.address;
            handle.spawn(async move {
                if let Err(err) = rpc_client.personal_lock_account(&address).await {
                    warn!(target: "donut::lifecycle", %address, error = %err, "deferred lock failed");
                }
            });
        }
    }
}
