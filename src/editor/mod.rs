//! Attach, resolve, write, verify
//!
//! [`MoneyEditor`] owns at most one session on the target process. It moves
//! between [`AttachState::Detached`] and [`AttachState::Attached`], resolves
//! the pointer chain afresh on every operation, and confirms each write with
//! a read of the same address.

use crate::config::Config;
use crate::core::types::{Address, MemoryError, MemoryResult, MoneyValue};
use crate::core::types::{CENTS_PER_UNIT, MAX_ENCODABLE_AMOUNT};
use crate::memory::{ProcessMemory, VerifiedWriter};
use crate::pointer::{PointerChain, PointerResolver};
use crate::process::{ProcessAttacher, SystemAttacher};
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Whether the editor currently holds a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachState {
    Detached,
    Attached,
}

/// Everything the editor needs to find and encode the value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    pub process_name: String,
    pub module_name: String,
    pub chain: PointerChain,
    pub cents_multiplier: u32,
    pub max_amount: u64,
}

impl TargetConfig {
    /// Target whose chain is based on the process's own main module
    pub fn new(process_name: impl Into<String>, chain: PointerChain) -> Self {
        let process_name = process_name.into();
        TargetConfig {
            module_name: process_name.clone(),
            process_name,
            chain,
            cents_multiplier: CENTS_PER_UNIT,
            max_amount: MAX_ENCODABLE_AMOUNT,
        }
    }

    pub fn with_module(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    pub fn with_max_amount(mut self, max_amount: u64) -> Self {
        self.max_amount = max_amount;
        self
    }

    pub fn with_cents_multiplier(mut self, multiplier: u32) -> Self {
        self.cents_multiplier = multiplier;
        self
    }
}

impl From<&Config> for TargetConfig {
    fn from(config: &Config) -> Self {
        TargetConfig::new(config.target.process_name.clone(), config.target.chain())
            .with_module(config.target.module())
            .with_max_amount(config.money.max_amount)
            .with_cents_multiplier(config.money.cents_multiplier)
    }
}

/// A value located in the target, with where it was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedValue {
    pub address: Address,
    pub value: MoneyValue,
}

struct Attachment<P> {
    process: P,
    module_base: Address,
}

/// Edits one money value inside one target process
pub struct MoneyEditor<A: ProcessAttacher = SystemAttacher> {
    attacher: A,
    target: TargetConfig,
    attachment: Option<Attachment<A::Process>>,
}

impl MoneyEditor<SystemAttacher> {
    /// Editor for real processes
    pub fn new(target: TargetConfig) -> Self {
        MoneyEditor::with_attacher(SystemAttacher, target)
    }

    /// Editor for real processes, configured from a loaded [`Config`]
    pub fn from_config(config: &Config) -> Self {
        MoneyEditor::new(TargetConfig::from(config))
    }
}

impl<A: ProcessAttacher> MoneyEditor<A> {
    pub fn with_attacher(attacher: A, target: TargetConfig) -> Self {
        MoneyEditor {
            attacher,
            target,
            attachment: None,
        }
    }

    pub fn state(&self) -> AttachState {
        if self.attachment.is_some() {
            AttachState::Attached
        } else {
            AttachState::Detached
        }
    }

    pub fn target(&self) -> &TargetConfig {
        &self.target
    }

    /// The attached process, if any
    pub fn process(&self) -> Option<&A::Process> {
        self.attachment.as_ref().map(|a| &a.process)
    }

    /// Base of the target module as found on the last attach
    pub fn module_base(&self) -> Option<Address> {
        self.attachment.as_ref().map(|a| a.module_base)
    }

    /// Make sure a live session exists, returning the module base
    ///
    /// Attaching while already attached to a live process is a no-op. A
    /// session whose process has exited is dropped and replaced by a fresh
    /// attach. If the target module cannot be found the new session is
    /// dropped and the editor stays detached.
    pub fn attach(&mut self) -> MemoryResult<Address> {
        if let Some(attachment) = &self.attachment {
            if attachment.process.is_alive() {
                return Ok(attachment.module_base);
            }
            warn!(process = %self.target.process_name, "attached process exited, re-attaching");
            self.release();
        }

        let attachment = self.connect()?;
        let module_base = attachment.module_base;
        self.attachment = Some(attachment);
        Ok(module_base)
    }

    /// Drop the session, if any
    pub fn release(&mut self) {
        if self.attachment.take().is_some() {
            info!(process = %self.target.process_name, "released process session");
        }
    }

    /// Store `amount` in the target and confirm it took effect
    ///
    /// The amount is checked against the configured maximum and the 4-byte
    /// capacity before anything else. A detached editor attaches first; if
    /// that fails the result is [`MemoryError::NotAttached`] and no memory is
    /// touched.
    pub fn set_value(&mut self, amount: u64) -> MemoryResult<AppliedValue> {
        let value = MoneyValue::from_units(
            amount,
            self.target.cents_multiplier,
            self.target.max_amount,
        )?;

        let attachment = self.take_attachment()?;
        let result = Self::write_value(&attachment, &self.target.chain, value);
        self.restore(attachment, result.is_err());

        let applied = result?;
        info!(address = %applied.address, value = %applied.value, "value applied");
        Ok(applied)
    }

    /// Read the value currently stored in the target
    pub fn current_value(&mut self) -> MemoryResult<AppliedValue> {
        let attachment = self.take_attachment()?;
        let result = Self::read_value(&attachment, &self.target);
        self.restore(attachment, result.is_err());
        result
    }

    /// Attach and report only whether a live session exists afterwards
    pub fn attach_to_target(&mut self) -> bool {
        match self.attach() {
            Ok(_) => true,
            Err(e) => {
                error!(process = %self.target.process_name, error = %e, "attach failed");
                false
            }
        }
    }

    /// Apply `amount` and report only whether the write was verified
    pub fn apply_value(&mut self, amount: u64) -> bool {
        match self.set_value(amount) {
            Ok(_) => true,
            Err(e) => {
                match &e {
                    MemoryError::VerificationMismatch { .. } => {
                        warn!(amount, error = %e, "value did not stick")
                    }
                    e if e.is_resolution_failure() => {
                        error!(amount, error = %e, "could not resolve the value address")
                    }
                    _ => error!(amount, error = %e, "could not apply value"),
                }
                false
            }
        }
    }

    fn connect(&self) -> MemoryResult<Attachment<A::Process>> {
        let process = self.attacher.attach(&self.target.process_name)?;
        // On error the fresh session is dropped here
        let module_base = process.module_base_address(&self.target.module_name)?;
        info!(
            process = %self.target.process_name,
            module = %self.target.module_name,
            %module_base,
            "attached"
        );
        Ok(Attachment {
            process,
            module_base,
        })
    }

    fn take_attachment(&mut self) -> MemoryResult<Attachment<A::Process>> {
        match self.attachment.take() {
            Some(attachment) => Ok(attachment),
            None => {
                debug!("not attached, attaching implicitly");
                self.connect().map_err(MemoryError::not_attached)
            }
        }
    }

    fn restore(&mut self, attachment: Attachment<A::Process>, failed: bool) {
        if failed && !attachment.process.is_alive() {
            warn!(process = %self.target.process_name, "target process exited, session released");
            return;
        }
        self.attachment = Some(attachment);
    }

    fn write_value(
        attachment: &Attachment<A::Process>,
        chain: &PointerChain,
        value: MoneyValue,
    ) -> MemoryResult<AppliedValue> {
        let address = PointerResolver::new(&attachment.process).resolve(attachment.module_base, chain)?;
        VerifiedWriter::new(&attachment.process).write_i32(address, value.raw())?;
        Ok(AppliedValue { address, value })
    }

    fn read_value(
        attachment: &Attachment<A::Process>,
        target: &TargetConfig,
    ) -> MemoryResult<AppliedValue> {
        let address = PointerResolver::new(&attachment.process)
            .resolve(attachment.module_base, &target.chain)?;
        let raw = attachment.process.read_i32(address)?;
        Ok(AppliedValue {
            address,
            value: MoneyValue::from_raw(raw, target.cents_multiplier),
        })
    }
}
