use crate::journal::EventLog;
use hearth_domain::{Domain, LogEntry, Records};
use serde::{Deserialize, Serialize};

/// In-memory state of one module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleState<D: Domain> {
    pub(crate) consented: bool,
    pub(crate) records: Records<D>,
    pub(crate) log: EventLog<D::Issue>,
}

impl<D: Domain> ModuleState<D> {
    /// Every issue present with empty answers, empty log.
    #[must_use]
    pub fn empty(capacity: usize) -> Self {
        Self { consented: false, records: D::empty_records(), log: EventLog::new(capacity) }
    }

    #[must_use]
    pub const fn consented(&self) -> bool {
        self.consented
    }

    #[must_use]
    pub const fn records(&self) -> &Records<D> {
        &self.records
    }

    #[must_use]
    pub const fn log(&self) -> &EventLog<D::Issue> {
        &self.log
    }

    pub(crate) fn hydrate(&mut self, stored: Snapshot<D>) {
        let mut records = D::empty_records();
        records.extend(stored.records);
        self.records = records;
        self.log = EventLog::from_entries(stored.log, self.log.capacity());
    }

    pub(crate) fn clear(&mut self) {
        self.records = D::empty_records();
        self.log.clear();
    }

    pub(crate) fn snapshot(&self) -> SnapshotRef<'_, D> {
        SnapshotRef { records: &self.records, log: self.log.to_vec() }
    }
}

/// Stored form of a module: records and journal in one vault entry.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = ""))]
pub(crate) struct Snapshot<D: Domain> {
    #[serde(default)]
    pub(crate) records: Records<D>,
    #[serde(default)]
    pub(crate) log: Vec<LogEntry<D::Issue>>,
}

#[derive(Debug, Serialize)]
#[serde(bound(serialize = ""))]
pub(crate) struct SnapshotRef<'a, D: Domain> {
    pub(crate) records: &'a Records<D>,
    pub(crate) log: Vec<&'a LogEntry<D::Issue>>,
}
