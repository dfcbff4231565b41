// In-memory Lease Store for integration tests.
//
// Every operation yields once before touching state, so concurrent callers
// interleave at each store call. Writes are recorded in order. Nothing
// enforces uniqueness of addresses or option names.

#![allow(dead_code, clippy::unwrap_used)]

use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dns_switcher_core::{
    ArpEntry, DhcpOption, Lease, LeaseStore, MacAddress, NewDhcpOption, NewLease, RecordId,
    StoreConnector, StoreError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    CreateOption(NewDhcpOption),
    DeleteLease(RecordId),
    CreateLease(NewLease),
}

/// Store operations a test can make fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    LeaseLookup,
    ArpLookup,
    CreateLease,
    DeleteLease,
    OptionLookup,
    CreateOption,
}

#[derive(Default)]
struct State {
    leases: Vec<Lease>,
    arp: Vec<ArpEntry>,
    options: Vec<DhcpOption>,
    writes: Vec<Write>,
    failures: Vec<(Op, StoreError)>,
    next_id: u32,
}

impl State {
    fn next_id(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId::new(format!("*{:X}", 0x100 + self.next_id))
    }

    fn check(&self, op: Op) -> Result<(), StoreError> {
        match self.failures.iter().find(|(o, _)| *o == op) {
            Some((_, err)) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Shared router state. Clone handles point at the same tables.
#[derive(Clone, Default)]
pub struct MemoryRouter {
    state: Arc<Mutex<State>>,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lease(self, ip: Ipv4Addr, mac: &str, dynamic: bool, comment: Option<&str>) -> Self {
        self.push_lease(ip, Some(MacAddress::new(mac)), dynamic, comment)
    }

    /// Lease the router reports without a bound `mac-address`.
    pub fn with_lease_without_mac(self, ip: Ipv4Addr, dynamic: bool) -> Self {
        self.push_lease(ip, None, dynamic, None)
    }

    fn push_lease(
        self,
        ip: Ipv4Addr,
        mac_address: Option<MacAddress>,
        dynamic: bool,
        comment: Option<&str>,
    ) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id();
            state.leases.push(Lease {
                id,
                address: ip,
                mac_address,
                dynamic,
                comment: comment.map(str::to_owned),
                dhcp_option: None,
            });
        }
        self
    }

    pub fn with_arp(self, ip: Ipv4Addr, mac: &str) -> Self {
        self.state.lock().unwrap().arp.push(ArpEntry {
            address: ip,
            mac_address: MacAddress::new(mac),
            interface: Some("bridge".into()),
        });
        self
    }

    pub fn with_option(self, name: &str, value: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id();
            state.options.push(DhcpOption {
                id,
                name: name.to_owned(),
                code: 6,
                value: value.to_owned(),
                comment: None,
            });
        }
        self
    }

    pub fn failing(self, op: Op, err: StoreError) -> Self {
        self.state.lock().unwrap().failures.push((op, err));
        self
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn leases_for(&self, ip: Ipv4Addr) -> Vec<Lease> {
        self.state
            .lock()
            .unwrap()
            .leases
            .iter()
            .filter(|l| l.address == ip)
            .cloned()
            .collect()
    }

    pub fn options(&self) -> Vec<DhcpOption> {
        self.state.lock().unwrap().options.clone()
    }

    pub fn store(&self) -> MemoryStore {
        MemoryStore {
            router: self.clone(),
        }
    }
}

pub struct MemoryStore {
    router: MemoryRouter,
}

impl MemoryStore {
    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.router.state.lock().unwrap()
    }
}

impl LeaseStore for MemoryStore {
    async fn lease_by_address(&self, ip: Ipv4Addr) -> Result<Option<Lease>, StoreError> {
        tokio::task::yield_now().await;
        let state = self.state();
        state.check(Op::LeaseLookup)?;
        let matching: Vec<&Lease> = state.leases.iter().filter(|l| l.address == ip).collect();
        Ok(matching
            .iter()
            .find(|l| !l.dynamic)
            .or_else(|| matching.first())
            .map(|l| (*l).clone()))
    }

    async fn hardware_address(&self, ip: Ipv4Addr) -> Result<Option<ArpEntry>, StoreError> {
        tokio::task::yield_now().await;
        let state = self.state();
        state.check(Op::ArpLookup)?;
        Ok(state.arp.iter().find(|a| a.address == ip).cloned())
    }

    async fn create_lease(&self, lease: NewLease) -> Result<Lease, StoreError> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check(Op::CreateLease)?;
        let id = state.next_id();
        let created = Lease {
            id,
            address: lease.address,
            mac_address: Some(lease.mac_address.clone()),
            dynamic: false,
            comment: Some(lease.comment.clone()),
            dhcp_option: Some(lease.dhcp_option.clone()),
        };
        state.leases.push(created.clone());
        state.writes.push(Write::CreateLease(lease));
        Ok(created)
    }

    async fn delete_lease(&self, id: &RecordId) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check(Op::DeleteLease)?;
        let before = state.leases.len();
        state.leases.retain(|l| &l.id != id);
        if state.leases.len() == before {
            return Err(StoreError::Rejected(format!("no such item ({id})")));
        }
        state.writes.push(Write::DeleteLease(id.clone()));
        Ok(())
    }

    async fn option_by_name(&self, name: &str) -> Result<Option<DhcpOption>, StoreError> {
        tokio::task::yield_now().await;
        let state = self.state();
        state.check(Op::OptionLookup)?;
        Ok(state.options.iter().find(|o| o.name == name).cloned())
    }

    async fn create_option(&self, option: NewDhcpOption) -> Result<DhcpOption, StoreError> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check(Op::CreateOption)?;
        let id = state.next_id();
        let created = DhcpOption {
            id,
            name: option.name.clone(),
            code: option.code,
            value: option.value.clone(),
            comment: Some(option.comment.clone()),
        };
        state.options.push(created.clone());
        state.writes.push(Write::CreateOption(option));
        Ok(created)
    }
}

/// Connector that counts sessions.
pub struct CountingConnector {
    router: MemoryRouter,
    fail_open: Option<StoreError>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

impl CountingConnector {
    pub fn new(router: MemoryRouter) -> Self {
        Self {
            router,
            fail_open: None,
            opened: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
        }
    }

    pub fn failing_open(router: MemoryRouter, err: StoreError) -> Self {
        Self {
            fail_open: Some(err),
            ..Self::new(router)
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl StoreConnector for CountingConnector {
    type Store = MemoryStore;

    async fn open(&self) -> Result<MemoryStore, StoreError> {
        tokio::task::yield_now().await;
        if let Some(err) = &self.fail_open {
            return Err(err.clone());
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(self.router.store())
    }

    async fn close(&self, store: MemoryStore) {
        drop(store);
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
