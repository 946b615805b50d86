use fleet_schema::{CrewMember, ShipList};
use std::fmt::Display;

/// Identifies one issued fetch. Only the newest ticket may update a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Data shown for one remote collection, plus the state of its last fetch.
///
/// A failed fetch leaves `data` as it was and records the error. When
/// several tasks fetch into one view, only the newest ticket lands.
#[derive(Debug, Clone, Default)]
pub struct FetchView<T> {
    pub data: T,
    pub error: Option<String>,
    pub fetching: bool,
    pub fetched: bool,
    issued: u64,
}

pub type ShipListView = FetchView<ShipList>;
pub type CrewListView = FetchView<Vec<CrewMember>>;

impl<T> FetchView<T> {
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.fetching = true;
        Ticket(self.issued)
    }

    /// Returns `false` when a newer fetch was issued after `ticket`; the
    /// result is then dropped.
    pub fn apply<E: Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.fetching = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
                self.fetched = true;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        true
    }
}

impl<T: Default> FetchView<T> {
    /// Forgets the data; any fetch still in flight is ignored when it lands.
    pub fn clear(&mut self) {
        let issued = self.issued + 1;
        *self = Self {
            issued,
            ..Self::default()
        };
    }
}
