//! Runs the whole suite against one node.

use crate::builder::{build, ChainContext, Payload};
use crate::error::{HarnessError, Result};
use crate::feature_matrix::{generate_cases, FeatureFilter, TestCase};
use crate::lifecycle::AccountUnlock;
use crate::report::{PendingCase, RunReport};
use crate::submitter::{SubmissionResult, Submitter};
use crate::unprotected::{build_and_submit_unprotected, UnprotectedTxSpec};
use crate::validator_bls::{check_validator_bls_keys, BlsKeyReport};
use donut_config::{ConfigError, HarnessConfig, GAS_LIMIT};
use donut_core::{Address, TransactionRequest};
use donut_cryptography::KeyPair;
use donut_rpc_client::{RegistryApi, RpcClient, TransactionApi, BLOCK_PENDING};
use donut_wallets::LocalWallet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Drives setup, the case pipeline, the replay-protection checks and
/// teardown, strictly one step at a time.
pub struct Orchestrator {
    config: HarnessConfig,
    filter: FeatureFilter,
    rpc_client: Arc<RpcClient>,
}

impl Orchestrator {
    /// Validates `config` and prepares a client for its endpoint.
    pub fn new(config: HarnessConfig, filter: FeatureFilter) -> Result<Self> {
        config.validate()?;
        let rpc_client =
            RpcClient::from_url(&config.url).map_err(HarnessError::rpc("creating RPC client"))?;
        Ok(Self::with_client(config, filter, Arc::new(rpc_client)))
    }

    pub fn with_client(config: HarnessConfig, filter: FeatureFilter, rpc_client: Arc<RpcClient>) -> Self {
        Self {
            config,
            filter,
            rpc_client,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Matrix cases this run will execute.
    pub fn planned_cases(&self) -> Vec<TestCase> {
        if self.config.replay_protection.runs_matrix() {
            generate_cases(&self.filter)
        } else {
            Vec::new()
        }
    }

    /// Checks the validator BLS keys at `block`, latest when `None`.
    pub async fn check_validator_bls(&self, block: Option<u64>) -> Result<BlsKeyReport> {
        check_validator_bls_keys(&self.rpc_client, block).await
    }

    /// Runs the suite. Setup failures are returned as errors; case failures
    /// are recorded in the report. The account is locked again on every
    /// path once it has been unlocked.
    pub async fn run(&self) -> Result<RunReport> {
        let (address, private_key) = self.config.funded_account()?;
        let sender = parse_address("address", &address)?;
        let key = KeyPair::from_hex(&private_key)?;
        if key.address() != sender {
            return Err(ConfigError::InvalidValue {
                field: "private_key",
                reason: format!("key controls {}, not {}", key.address(), sender),
            }
            .into());
        }

        if self.config.settle_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
        }
        let context = self.discover_context(sender).await?;
        info!(
            target: "donut::run",
            chain_id = context.chain_id,
            gas_price = %context.gas_price,
            fee_currency = %context.fee_currency,
            %sender,
            "chain context ready"
        );

        let unlock = AccountUnlock::acquire(
            Arc::clone(&self.rpc_client),
            sender,
            &self.config.unlock_password,
            self.config.unlock_duration_secs,
        )
        .await?;

        let mut report = RunReport::new(context.clone());
        let outcome = self
            .run_unlocked(&context, &key, &private_key, &mut report)
            .await;

        if let Err(err) = unlock.release().await {
            warn!(target: "donut::run", error = %err, "failed to lock account after the run");
            report.teardown_error = Some(err.to_string());
        }
        outcome?;

        info!(
            target: "donut::run",
            passed = report.passed(),
            failed = report.failed(),
            timed_out = report.timed_out,
            "run finished"
        );
        Ok(report)
    }

    async fn run_unlocked(
        &self,
        context: &ChainContext,
        key: &KeyPair,
        private_key: &str,
        report: &mut RunReport,
    ) -> Result<()> {
        let mut wallet = LocalWallet::new();
        let seeded = wallet.add_account(private_key)?;
        debug!(target: "donut::run", address = %seeded, "local wallet seeded");

        self.ensure_funded(context).await?;

        let submitter = Submitter::new(Arc::clone(&self.rpc_client), self.transaction_api(), wallet);
        let payload = Payload::standard()?;
        let mut in_flight = None;
        let cases = self.execute(context, key, &payload, &submitter, report, &mut in_flight);
        match self.config.suite_timeout_secs {
            Some(secs) => {
                if tokio::time::timeout(Duration::from_secs(secs), cases)
                    .await
                    .is_err()
                {
                    let case = in_flight.as_ref().map(|pending: &PendingCase| pending.label.clone());
                    warn!(target: "donut::run", secs, case = ?case, "suite timeout elapsed");
                    if let Some(pending) = in_flight.take() {
                        report.cases.push(pending.interrupted(secs));
                    }
                    report.timed_out = true;
                }
            }
            None => cases.await,
        }
        Ok(())
    }

    async fn execute(
        &self,
        context: &ChainContext,
        key: &KeyPair,
        payload: &Payload,
        submitter: &Submitter,
        report: &mut RunReport,
        in_flight: &mut Option<PendingCase>,
    ) {
        if self.config.replay_protection.runs_matrix() {
            for case in generate_cases(&self.filter) {
                let pending = PendingCase::matrix(&case);
                *in_flight = Some(pending.clone());
                let result = self.run_case(&case, context, payload, submitter).await;
                record(pending, &result, report);
                *in_flight = None;
            }
        }
        if self.config.replay_protection.runs_replay_checks() {
            for compat_mode in [false, true] {
                let pending = PendingCase::replay_protection(compat_mode);
                *in_flight = Some(pending.clone());
                let result = self
                    .run_unprotected(compat_mode, context, key, payload, submitter)
                    .await;
                record(pending, &result, report);
                *in_flight = None;
            }
        }
    }

    async fn run_case(
        &self,
        case: &TestCase,
        context: &ChainContext,
        payload: &Payload,
        submitter: &Submitter,
    ) -> SubmissionResult {
        match self.refresh_nonce(context).await {
            Ok(context) => {
                let tx = build(case, &context, payload);
                debug!(target: "donut::cases", case = %case.label(), nonce = tx.nonce, "built transaction");
                submitter.submit(&tx, case).await
            }
            Err(err) => SubmissionResult::rejected(err.to_string()),
        }
    }

    async fn run_unprotected(
        &self,
        compat_mode: bool,
        context: &ChainContext,
        key: &KeyPair,
        payload: &Payload,
        submitter: &Submitter,
    ) -> SubmissionResult {
        match self.refresh_nonce(context).await {
            Ok(context) => {
                let spec = UnprotectedTxSpec::new(compat_mode, &context, payload);
                build_and_submit_unprotected(&spec, key, submitter).await
            }
            Err(err) => SubmissionResult::rejected(err.to_string()),
        }
    }

    async fn refresh_nonce(&self, context: &ChainContext) -> Result<ChainContext> {
        let nonce = self
            .rpc_client
            .get_transaction_count(&context.sender, BLOCK_PENDING)
            .await
            .map_err(HarnessError::rpc("refreshing nonce"))?;
        Ok(context.with_nonce(nonce))
    }

    async fn discover_context(&self, sender: Address) -> Result<ChainContext> {
        let chain_id = self
            .rpc_client
            .chain_id()
            .await
            .map_err(HarnessError::rpc("reading chain id"))?;
        let registry = RegistryApi::new(Arc::clone(&self.rpc_client))
            .map_err(HarnessError::rpc("opening registry"))?;

        let fee_currency = match &self.config.fee_currency {
            Some(address) => parse_address("fee_currency", address)?,
            None => registry
                .stable_token()
                .await
                .map_err(HarnessError::rpc("resolving StableToken"))?,
        };

        let gas_price = match self.config.gas_price {
            Some(price) => price as u128,
            None => {
                let minimum = registry
                    .gas_price_minimum()
                    .await
                    .map_err(HarnessError::rpc("reading gas price minimum"))?;
                let multiplier = self.config.gas_price_multiplier;
                minimum
                    .checked_mul(multiplier as u128)
                    .ok_or(HarnessError::GasPriceOverflow {
                        minimum,
                        multiplier,
                    })?
            }
        };

        let nonce = self
            .rpc_client
            .get_transaction_count(&sender, BLOCK_PENDING)
            .await
            .map_err(HarnessError::rpc("reading nonce"))?;

        Ok(ChainContext {
            chain_id,
            gas_price,
            sender,
            nonce,
            fee_currency,
        })
    }

    /// Tops the sender up from the faucet when its balance is below the
    /// configured minimum.
    async fn ensure_funded(&self, context: &ChainContext) -> Result<()> {
        let required = self.config.min_balance_wei as u128;
        if required == 0 {
            return Ok(());
        }
        let address = context.sender;
        let balance = self
            .rpc_client
            .get_balance(&address)
            .await
            .map_err(HarnessError::rpc("reading balance"))?;
        if balance >= required {
            debug!(target: "donut::run", %address, %balance, "balance sufficient");
            return Ok(());
        }

        let faucet = match &self.config.faucet {
            Some(faucet) => parse_address("faucet", faucet)?,
            None => {
                return Err(HarnessError::InsufficientFunds {
                    address,
                    balance,
                    required,
                })
            }
        };
        info!(target: "donut::run", %address, %faucet, %balance, top_up = self.config.top_up_wei, "topping up account");

        let funding_failed = |reason: String| HarnessError::FundingFailed { address, reason };
        let nonce = self
            .rpc_client
            .get_transaction_count(&faucet, BLOCK_PENDING)
            .await
            .map_err(|e| funding_failed(e.to_string()))?;
        let transfer = TransactionRequest {
            from: faucet,
            gas: GAS_LIMIT,
            gas_price: context.gas_price,
            chain_id: context.chain_id,
            nonce,
            to: Some(address),
            value: Some(self.config.top_up_wei as u128),
            ..Default::default()
        };
        let hash = self
            .rpc_client
            .send_transaction(&transfer)
            .await
            .map_err(|e| funding_failed(e.to_string()))?;
        let receipt = self
            .transaction_api()
            .wait_for_receipt(&hash)
            .await
            .map_err(|e| funding_failed(e.to_string()))?;
        if !receipt.succeeded() {
            return Err(funding_failed(format!("transfer {hash} reverted")));
        }
        Ok(())
    }

    fn transaction_api(&self) -> TransactionApi {
        TransactionApi::new(
            Arc::clone(&self.rpc_client),
            Duration::from_millis(self.config.receipt_poll_interval_ms),
            self.config.receipt_timeout_secs.map(Duration::from_secs),
        )
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address> {
    value.parse::<Address>().map_err(|e| {
        HarnessError::from(ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        })
    })
}

/// Verifies and logs a finished case, then appends it to `report`.
fn record(pending: PendingCase, result: &SubmissionResult, report: &mut RunReport) {
    let flags = pending.flags_summary();
    let case_report = pending.complete(result);
    if case_report.passed() {
        info!(target: "donut::cases", case = %case_report.label, "passed");
    } else {
        warn!(target: "donut::cases", case = %case_report.label, %flags, observed = ?case_report.observed, "failed");
    }
    report.cases.push(case_report);
}
