//! In-memory stand-in for a target process
//!
//! [`MockTarget`] plays the role of the operating system: it "runs" one named
//! process with a sparse byte-addressed memory and a module table, and hands
//! out [`MockSession`]s through [`ProcessAttacher`]. Every memory operation is
//! logged so tests can assert exactly what was read and written, and the
//! number of live sessions is tracked to catch handle leaks.

use super::ProcessMemory;
use crate::core::types::{names_equal, Address, MemoryError, MemoryResult, ModuleInfo};
use crate::process::ProcessAttacher;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// How the mock reacts to writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteBehavior {
    /// Store the bytes (normal operation)
    Store,
    /// Report success without storing anything
    Discard,
    /// Report an OS-level write failure
    Fail,
    /// Store the bytes, then let the "game" overwrite the same location with this value
    Race(i32),
}

/// One memory operation issued against the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryOp {
    Read { address: Address, len: usize },
    Write { address: Address, data: Vec<u8> },
}

#[derive(Debug)]
struct MockState {
    process_name: String,
    running: bool,
    deny_access: bool,
    modules: Vec<ModuleInfo>,
    bytes: BTreeMap<u64, u8>,
    write_behavior: WriteBehavior,
    ops: Vec<MemoryOp>,
    open_sessions: usize,
    total_sessions: usize,
}

impl MockState {
    fn is_mapped(&self, address: Address, len: usize) -> bool {
        (0..len as u64).all(|i| {
            address
                .checked_add(i)
                .is_some_and(|a| self.bytes.contains_key(&a.as_u64()))
        })
    }

    fn store(&mut self, address: Address, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.bytes.insert(address.as_u64() + i as u64, *byte);
        }
    }
}

/// A fake running process that sessions can be opened against
#[derive(Debug, Clone)]
pub struct MockTarget {
    state: Rc<RefCell<MockState>>,
}

impl MockTarget {
    /// A running process with no memory mapped and no modules loaded
    pub fn new(process_name: impl Into<String>) -> Self {
        MockTarget {
            state: Rc::new(RefCell::new(MockState {
                process_name: process_name.into(),
                running: true,
                deny_access: false,
                modules: Vec::new(),
                bytes: BTreeMap::new(),
                write_behavior: WriteBehavior::Store,
                ops: Vec::new(),
                open_sessions: 0,
                total_sessions: 0,
            })),
        }
    }

    /// Register a loaded module
    pub fn with_module(self, name: &str, base: Address, size: u64) -> Self {
        self.state
            .borrow_mut()
            .modules
            .push(ModuleInfo::new(name.to_string(), base, size));
        self
    }

    /// Map `len` zeroed bytes at `address`
    pub fn with_region(self, address: Address, len: usize) -> Self {
        self.with_bytes(address, &vec![0u8; len])
    }

    /// Map `data` at `address`
    pub fn with_bytes(self, address: Address, data: &[u8]) -> Self {
        self.state.borrow_mut().store(address, data);
        self
    }

    /// Map an 8-byte pointer value at `address`
    pub fn with_u64(self, address: Address, value: u64) -> Self {
        self.with_bytes(address, &value.to_ne_bytes())
    }

    /// Map a 4-byte value at `address`
    pub fn with_i32(self, address: Address, value: i32) -> Self {
        self.with_bytes(address, &value.to_ne_bytes())
    }

    /// Start or stop the process
    pub fn set_running(&self, running: bool) {
        self.state.borrow_mut().running = running;
    }

    /// Make attach attempts fail as if the OS refused the open request
    pub fn set_deny_access(&self, deny: bool) {
        self.state.borrow_mut().deny_access = deny;
    }

    /// Change how subsequent writes behave
    pub fn set_write_behavior(&self, behavior: WriteBehavior) {
        self.state.borrow_mut().write_behavior = behavior;
    }

    /// Change a value the way the game itself would, without logging an operation
    pub fn poke_u64(&self, address: Address, value: u64) {
        self.state.borrow_mut().store(address, &value.to_ne_bytes());
    }

    /// Inspect a 4-byte value without logging an operation
    pub fn peek_i32(&self, address: Address) -> Option<i32> {
        let state = self.state.borrow();
        let mut buffer = [0u8; 4];
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = *state.bytes.get(&(address.as_u64() + i as u64))?;
        }
        Some(i32::from_ne_bytes(buffer))
    }

    /// All operations issued so far, in order
    pub fn ops(&self) -> Vec<MemoryOp> {
        self.state.borrow().ops.clone()
    }

    /// Forget the operation log
    pub fn clear_ops(&self) {
        self.state.borrow_mut().ops.clear();
    }

    /// Number of reads issued so far
    pub fn read_count(&self) -> usize {
        self.state
            .borrow()
            .ops
            .iter()
            .filter(|op| matches!(op, MemoryOp::Read { .. }))
            .count()
    }

    /// Number of writes issued so far
    pub fn write_count(&self) -> usize {
        self.state
            .borrow()
            .ops
            .iter()
            .filter(|op| matches!(op, MemoryOp::Write { .. }))
            .count()
    }

    /// Sessions currently open against this target
    pub fn open_sessions(&self) -> usize {
        self.state.borrow().open_sessions
    }

    /// Sessions ever opened against this target
    pub fn total_sessions(&self) -> usize {
        self.state.borrow().total_sessions
    }

    /// Open a session directly, skipping name matching and access checks
    pub fn open_session(&self) -> MockSession {
        let mut state = self.state.borrow_mut();
        state.open_sessions += 1;
        state.total_sessions += 1;
        MockSession {
            state: Rc::clone(&self.state),
        }
    }
}

impl ProcessAttacher for MockTarget {
    type Process = MockSession;

    fn attach(&self, process_name: &str) -> MemoryResult<MockSession> {
        {
            let state = self.state.borrow();
            if !state.running || !names_equal(&state.process_name, process_name) {
                return Err(MemoryError::ProcessNotFound(process_name.to_string()));
            }
            if state.deny_access {
                return Err(MemoryError::InsufficientPrivileges(format!(
                    "Access denied opening {}",
                    process_name
                )));
            }
        }
        Ok(self.open_session())
    }
}

/// An open session against a [`MockTarget`]; closes itself on drop
#[derive(Debug)]
pub struct MockSession {
    state: Rc<RefCell<MockState>>,
}

impl ProcessMemory for MockSession {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        let mut state = self.state.borrow_mut();
        state.ops.push(MemoryOp::Read {
            address,
            len: buffer.len(),
        });

        if !state.running {
            return Err(MemoryError::read_failed(address, "process has exited"));
        }
        if !state.is_mapped(address, buffer.len()) {
            return Err(MemoryError::read_failed(address, "address is not mapped"));
        }
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = state.bytes[&(address.as_u64() + i as u64)];
        }
        Ok(buffer.len())
    }

    fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        let mut state = self.state.borrow_mut();
        state.ops.push(MemoryOp::Write {
            address,
            data: data.to_vec(),
        });

        if !state.running {
            return Err(MemoryError::write_failed(address, "process has exited"));
        }
        if !state.is_mapped(address, data.len()) {
            return Err(MemoryError::write_failed(address, "address is not mapped"));
        }
        let behavior = state.write_behavior;
        match behavior {
            WriteBehavior::Store => state.store(address, data),
            WriteBehavior::Discard => {}
            WriteBehavior::Fail => {
                return Err(MemoryError::write_failed(address, "write rejected"));
            }
            WriteBehavior::Race(value) => {
                state.store(address, data);
                state.store(address, &value.to_ne_bytes());
            }
        }
        Ok(data.len())
    }

    fn module_base_address(&self, module_name: &str) -> MemoryResult<Address> {
        let state = self.state.borrow();
        if !state.running {
            return Err(MemoryError::ModuleNotFound(module_name.to_string()));
        }
        state
            .modules
            .iter()
            .find(|m| m.name_matches(module_name))
            .map(|m| m.base_address)
            .ok_or_else(|| MemoryError::ModuleNotFound(module_name.to_string()))
    }

    fn is_alive(&self) -> bool {
        self.state.borrow().running
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.open_sessions = state.open_sessions.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_matches_name() {
        let target = MockTarget::new("RDR2.exe");
        assert!(target.attach("RDR2.exe").is_ok());
        assert!(matches!(
            target.attach("other.exe"),
            Err(MemoryError::ProcessNotFound(_))
        ));
    }

    #[test]
    fn test_attach_respects_running_and_access() {
        let target = MockTarget::new("RDR2.exe");
        target.set_deny_access(true);
        assert!(matches!(
            target.attach("RDR2.exe"),
            Err(MemoryError::InsufficientPrivileges(_))
        ));

        target.set_running(false);
        assert!(matches!(
            target.attach("RDR2.exe"),
            Err(MemoryError::ProcessNotFound(_))
        ));
        assert_eq!(target.total_sessions(), 0);
    }

    #[test]
    fn test_sessions_are_counted() {
        let target = MockTarget::new("RDR2.exe");
        let first = target.attach("RDR2.exe").unwrap();
        let second = target.open_session();
        assert_eq!(target.open_sessions(), 2);

        drop(first);
        assert_eq!(target.open_sessions(), 1);
        drop(second);
        assert_eq!(target.open_sessions(), 0);
        assert_eq!(target.total_sessions(), 2);
    }

    #[test]
    fn test_module_lookup() {
        let target =
            MockTarget::new("RDR2.exe").with_module("RDR2.exe", Address::new(0x400000), 0x1000);
        let session = target.open_session();

        assert_eq!(
            session.module_base_address("RDR2.exe").unwrap(),
            Address::new(0x400000)
        );
        assert!(matches!(
            session.module_base_address("missing.dll"),
            Err(MemoryError::ModuleNotFound(_))
        ));
    }

    #[test]
    fn test_race_overwrites_after_store() {
        let target = MockTarget::new("RDR2.exe").with_i32(Address::new(0x10), 0);
        target.set_write_behavior(WriteBehavior::Race(99));
        let session = target.open_session();

        assert_eq!(session.write_memory(Address::new(0x10), &5i32.to_ne_bytes()).unwrap(), 4);
        assert_eq!(target.peek_i32(Address::new(0x10)), Some(99));
    }

    #[test]
    fn test_dead_process_fails_io() {
        let target = MockTarget::new("RDR2.exe").with_i32(Address::new(0x10), 0);
        let session = target.open_session();
        target.set_running(false);

        let mut buffer = [0u8; 4];
        assert!(session.read_memory(Address::new(0x10), &mut buffer).is_err());
        assert!(!session.is_alive());
    }
}
