//! Per-address UTXO pool and coin selection.
//!
//! The pool is an immutable snapshot replaced wholesale on each refresh
//! from the external provider; selection never mutates it, so concurrent
//! callers may build plans against the same snapshot freely. Callers that
//! must not reuse inputs across back-to-back spends serialise selection
//! themselves.

use std::collections::HashMap;

use log::{debug, trace};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::address::LockingScriptBuilder;
use crate::error::UtxoError;
use crate::fee::estimate_fee;
use crate::network::{Network, UtxoNetworkParams};
use crate::script::{LockingScript, ScriptType};

/// Raw unspent output as supplied by the external UTXO provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    /// Transaction hash in display (big-endian) hex.
    pub transaction_hash: String,
    pub output_index: u32,
    /// Value in satoshis.
    pub amount: u64,
    /// The address this output pays to.
    pub address: String,
}

/// An unspent output enriched with its resolved locking script, computed
/// once at ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptUnspentOutput {
    pub output: UnspentOutput,
    pub script: LockingScript,
}

impl ScriptUnspentOutput {
    pub fn amount(&self) -> u64 {
        self.output.amount
    }

    pub fn script_type(&self) -> ScriptType {
        self.script.script_type
    }
}

/// Per-network post-processing applied to the pool before selection.
pub trait NetworkPolicy {
    fn filter_and_order(&self, pool: Vec<ScriptUnspentOutput>) -> Vec<ScriptUnspentOutput>;
}

/// Identity policy: the pool is returned unfiltered and unsorted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl NetworkPolicy for DefaultPolicy {
    fn filter_and_order(&self, pool: Vec<ScriptUnspentOutput>) -> Vec<ScriptUnspentOutput> {
        pool
    }
}

/// Kaspa bounds how many outputs a transaction may spend, so its pool is
/// sorted descending by amount and capped so the largest, fewest-input
/// set is preferred.
#[derive(Debug, Clone, Copy)]
pub struct KaspaPolicy {
    pub max_outputs_count: usize,
}

impl Default for KaspaPolicy {
    fn default() -> Self {
        Self {
            max_outputs_count: 84,
        }
    }
}

impl NetworkPolicy for KaspaPolicy {
    fn filter_and_order(&self, mut pool: Vec<ScriptUnspentOutput>) -> Vec<ScriptUnspentOutput> {
        pool.sort_by(|a, b| b.amount().cmp(&a.amount()));
        pool.truncate(self.max_outputs_count);
        pool
    }
}

/// A spend plan: selected inputs plus the economics an external
/// transaction assembler and signer consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendPlan {
    pub inputs: Vec<ScriptUnspentOutput>,
    /// Amount paid to the destination, in satoshis.
    pub amount: u64,
    /// Fee in satoshis. Includes any sub-dust change folded in.
    pub fee: u64,
    /// Change returned to the spending address, absent when suppressed.
    pub change: Option<u64>,
    pub destination_script_type: ScriptType,
}

impl SpendPlan {
    /// Sum of the selected inputs' amounts.
    pub fn total_input(&self) -> u64 {
        self.inputs.iter().map(|u| u.amount()).sum()
    }
}

/// Owns the per-address pool of enriched outputs and runs coin selection.
pub struct UnspentOutputManager {
    builder: LockingScriptBuilder,
    policy: Box<dyn NetworkPolicy + Send + Sync>,
    pool: HashMap<String, Vec<ScriptUnspentOutput>>,
}

impl UnspentOutputManager {
    /// Construct with the network's default policy (Kaspa gets the
    /// sort-and-cap policy, everything else the identity).
    pub fn new(params: UtxoNetworkParams) -> Self {
        let policy: Box<dyn NetworkPolicy + Send + Sync> = match params.network {
            Network::Kaspa => Box::new(KaspaPolicy::default()),
            _ => Box::new(DefaultPolicy),
        };
        Self::with_policy(params, policy)
    }

    pub fn with_policy(
        params: UtxoNetworkParams,
        policy: Box<dyn NetworkPolicy + Send + Sync>,
    ) -> Self {
        Self {
            builder: LockingScriptBuilder::new(params),
            policy,
            pool: HashMap::new(),
        }
    }

    pub fn builder(&self) -> &LockingScriptBuilder {
        &self.builder
    }

    /// Replace an address's pool with a fresh provider snapshot, resolving
    /// each output's locking script once at ingestion.
    ///
    /// On any resolution failure the previous snapshot is left untouched.
    pub fn update_outputs(
        &mut self,
        address: &str,
        outputs: Vec<UnspentOutput>,
    ) -> Result<(), UtxoError> {
        let enriched = outputs
            .into_iter()
            .map(|output| {
                let script = self.builder.locking_script(&output.address)?;
                Ok(ScriptUnspentOutput { output, script })
            })
            .collect::<Result<Vec<_>, UtxoError>>()?;

        debug!(
            "refreshed pool for {address}: {} outputs, {} sat total",
            enriched.len(),
            enriched.iter().map(|u| u.amount()).sum::<u64>()
        );
        self.pool.insert(address.to_string(), enriched);
        Ok(())
    }

    /// The current snapshot for an address with the network policy applied.
    pub fn available_outputs(&self, address: &str) -> Vec<ScriptUnspentOutput> {
        let pool = self.pool.get(address).cloned().unwrap_or_default();
        self.policy.filter_and_order(pool)
    }

    /// Greedy descending-by-amount coin selection.
    ///
    /// Accumulates inputs largest-first (stable on ties) until they cover
    /// `target_amount` plus the fee re-estimated for the selection so far;
    /// witness inputs cost fewer virtual bytes than legacy ones. Change
    /// below the network dust threshold is folded into the fee rather than
    /// emitted as a sub-dust output.
    pub fn select_outputs(
        &self,
        address: &str,
        target_amount: Decimal,
        fee_rate_per_byte: Decimal,
        destination_script_type: ScriptType,
    ) -> Result<SpendPlan, UtxoError> {
        let target_sat = to_satoshis(target_amount)?;

        let mut candidates = self.available_outputs(address);
        // sort_by is stable, so equal amounts keep their pool order.
        candidates.sort_by(|a, b| b.amount().cmp(&a.amount()));

        // Change pays back to the spending address, so it takes the pool's
        // own script type.
        let change_type = candidates
            .first()
            .map(|u| u.script_type())
            .unwrap_or(destination_script_type);
        let outputs_with_change = [destination_script_type, change_type];

        let mut selected: Vec<ScriptUnspentOutput> = Vec::new();
        let mut input_types: Vec<ScriptType> = Vec::new();
        let mut total: u64 = 0;
        let mut fee_sat: u64 = 0;
        let mut satisfied = false;

        for utxo in candidates {
            total += utxo.amount();
            input_types.push(utxo.script_type());
            trace!(
                "considering {}:{} ({} sat)",
                utxo.output.transaction_hash,
                utxo.output.output_index,
                utxo.amount()
            );
            selected.push(utxo);

            fee_sat = ceil_satoshis(estimate_fee(
                &input_types,
                &outputs_with_change,
                fee_rate_per_byte,
            ))?;
            if total >= target_sat.saturating_add(fee_sat) {
                satisfied = true;
                break;
            }
        }

        if !satisfied {
            let shortfall = Decimal::from(target_sat) + Decimal::from(fee_sat)
                - Decimal::from(total);
            debug!("selection failed for {address}: short by {shortfall} sat");
            return Err(UtxoError::InsufficientFunds { shortfall });
        }

        let change = total - target_sat - fee_sat;
        let dust_threshold = self.builder.params().dust_threshold();
        let (fee, change) = if change < dust_threshold {
            // Sub-dust change is never emitted; its value goes to the fee.
            (total - target_sat, None)
        } else {
            (fee_sat, Some(change))
        };

        debug!(
            "selected {} inputs for {address}: target {target_sat}, fee {fee}, change {change:?}",
            selected.len()
        );
        Ok(SpendPlan {
            inputs: selected,
            amount: target_sat,
            fee,
            change,
            destination_script_type,
        })
    }
}

fn to_satoshis(amount: Decimal) -> Result<u64, UtxoError> {
    if amount.is_sign_negative() || !amount.is_integer() {
        return Err(UtxoError::InvalidAmount(amount));
    }
    amount.to_u64().ok_or(UtxoError::InvalidAmount(amount))
}

fn ceil_satoshis(fee: Decimal) -> Result<u64, UtxoError> {
    fee.ceil().to_u64().ok_or(UtxoError::InvalidAmount(fee))
}
