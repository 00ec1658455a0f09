//! The seat ledger.
//!
//! Owns every receipt, seat assignment and free pool for the train, and is
//! the single consistency boundary of the service:
//!
//! 1.  **`Ledger`**: all five public operations lock one mutex over the whole
//!     state, run synchronously without any I/O or await point, and release
//!     the guard on every exit path. Operations are therefore linearizable
//!     with respect to each other and never observe a half-applied update.
//! 2.  **`LedgerError`**: the closed set of business-rule failures. Each
//!     variant carries the offending email/seat/section and a stable kind
//!     tag, so callers branch on the kind rather than parse message text.
//! 3.  **Free pools**: one ordered set of unassigned seats per section,
//!     initialized to the full universe at construction. Seats are drawn
//!     smallest-first from section A, then B, and re-enter circulation only
//!     when a reservation is removed.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::config::SeatingConfig;
use crate::models::{Receipt, Seat, Section, User};

/// Every ticket costs the same flat fare.
pub const TICKET_PRICE: f64 = 20.00;

/// Business-rule failures. None are transient: retrying with the same input
/// reproduces the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("user {email} already has a ticket")]
    DuplicateReservation { email: String },

    #[error("no seats available")]
    NoSeatsAvailable,

    #[error("no receipt found for {email}")]
    ReceiptNotFound { email: String },

    #[error("no section {section}")]
    InvalidSection { section: String },

    #[error("user {email} not found")]
    UserNotFound { email: String },

    #[error("seat {seat} is already taken")]
    SeatTaken { seat: Seat },

    #[error("seat {seat} does not exist")]
    SeatNotExist { seat: String },
}

impl LedgerError {
    /// Stable tag used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::DuplicateReservation { .. } => "DuplicateReservation",
            LedgerError::NoSeatsAvailable => "NoSeatsAvailable",
            LedgerError::ReceiptNotFound { .. } => "ReceiptNotFound",
            LedgerError::InvalidSection { .. } => "InvalidSection",
            LedgerError::UserNotFound { .. } => "UserNotFound",
            LedgerError::SeatTaken { .. } => "SeatTaken",
            LedgerError::SeatNotExist { .. } => "SeatNotExist",
        }
    }
}

/// The reservation ledger. Constructed once at startup and shared behind an
/// `Arc`; never cloned or rebuilt while the service runs.
pub struct Ledger {
    inner: Mutex<LedgerState>,
}

struct LedgerState {
    // One receipt per active reservation, keyed by email.
    receipts: HashMap<String, Receipt>,
    // email -> seat, kept in lockstep with `receipts`.
    assigned: HashMap<String, Seat>,
    // Per-section pool of unassigned seats, smallest first.
    free: BTreeMap<Section, BTreeSet<Seat>>,
    // Seats per section, fixed at startup.
    capacity: BTreeMap<Section, u32>,
}

impl LedgerState {
    fn release(&mut self, seat: Seat) {
        if let Some(pool) = self.free.get_mut(&seat.section) {
            pool.insert(seat);
        }
    }

    fn seat_exists(&self, seat: Seat) -> bool {
        self.capacity
            .get(&seat.section)
            .is_some_and(|&cap| seat.number >= 1 && seat.number <= cap)
    }

    fn seat_taken(&self, seat: Seat) -> bool {
        self.assigned.values().any(|&s| s == seat)
    }
}

impl Ledger {
    pub fn new(seating: &SeatingConfig) -> Self {
        let mut free = BTreeMap::new();
        let mut capacity = BTreeMap::new();
        for section in Section::ALL {
            let seats = seating.capacity(section);
            free.insert(
                section,
                (1..=seats).map(|n| Seat::new(section, n)).collect::<BTreeSet<_>>(),
            );
            capacity.insert(section, seats);
        }
        Ledger {
            inner: Mutex::new(LedgerState {
                receipts: HashMap::new(),
                assigned: HashMap::new(),
                free,
                capacity,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.inner.lock().expect("ledger mutex poisoned")
    }

    /// Purchase a ticket. Assigns the lowest-numbered free seat, drawing from
    /// section A until it is empty, then from B.
    pub fn purchase(&self, user: User, from: &str, to: &str) -> Result<Receipt, LedgerError> {
        let mut state = self.state();

        if state.receipts.contains_key(&user.email) {
            return Err(LedgerError::DuplicateReservation { email: user.email });
        }

        let seat = Section::ALL
            .iter()
            .find_map(|section| state.free.get_mut(section)?.pop_first())
            .ok_or(LedgerError::NoSeatsAvailable)?;

        let receipt = Receipt {
            user,
            from: from.to_string(),
            to: to.to_string(),
            price: TICKET_PRICE,
            seat,
        };
        state.assigned.insert(receipt.user.email.clone(), seat);
        state.receipts.insert(receipt.user.email.clone(), receipt.clone());
        Ok(receipt)
    }

    /// Look up the receipt from an earlier purchase.
    pub fn receipt(&self, email: &str) -> Result<Receipt, LedgerError> {
        self.state()
            .receipts
            .get(email)
            .cloned()
            .ok_or_else(|| LedgerError::ReceiptNotFound {
                email: email.to_string(),
            })
    }

    /// Users currently seated in a section, in no particular order.
    pub fn view_section(&self, section: &str) -> Result<Vec<User>, LedgerError> {
        let wanted = Section::parse(section).ok_or_else(|| LedgerError::InvalidSection {
            section: section.to_string(),
        })?;

        let state = self.state();
        Ok(state
            .assigned
            .iter()
            .filter(|(_, seat)| seat.section == wanted)
            .filter_map(|(email, _)| state.receipts.get(email))
            .map(|receipt| receipt.user.clone())
            .collect())
    }

    /// Cancel a reservation. The vacated seat goes back to its section's
    /// pool; this is the only path by which a seat re-enters circulation.
    pub fn remove_user(&self, email: &str) -> Result<Seat, LedgerError> {
        let mut state = self.state();

        let receipt = state
            .receipts
            .remove(email)
            .ok_or_else(|| LedgerError::UserNotFound {
                email: email.to_string(),
            })?;
        state.assigned.remove(email);

        let seat = receipt.seat;
        state.release(seat);
        Ok(seat)
    }

    /// Move a user to a specific seat. Checks run before any mutation:
    /// unknown user, then the identifier itself, then availability. The
    /// taken-check scans every assignment, so it also rejects the caller's
    /// own current seat.
    pub fn modify_seat(&self, email: &str, new_seat: &str) -> Result<Seat, LedgerError> {
        let mut state = self.state();

        if !state.receipts.contains_key(email) {
            return Err(LedgerError::UserNotFound {
                email: email.to_string(),
            });
        }

        let seat: Seat = new_seat.parse().map_err(|_| LedgerError::SeatNotExist {
            seat: new_seat.to_string(),
        })?;

        if state.seat_taken(seat) {
            return Err(LedgerError::SeatTaken { seat });
        }
        if !state.seat_exists(seat) {
            return Err(LedgerError::SeatNotExist {
                seat: new_seat.to_string(),
            });
        }

        if let Some(pool) = state.free.get_mut(&seat.section) {
            pool.remove(&seat);
        }
        if let Some(old) = state.assigned.insert(email.to_string(), seat) {
            state.release(old);
        }
        if let Some(receipt) = state.receipts.get_mut(email) {
            receipt.seat = seat;
        }
        Ok(seat)
    }
}

#[cfg(test)]
impl Ledger {
    /// Panics unless the four structural invariants hold: receipts/assigned
    /// agree key-for-key, no seat is assigned twice, each section's free and
    /// assigned sets are disjoint and together cover the universe, and every
    /// seat sits in the section its identifier names.
    fn assert_invariants(&self) {
        let state = self.state();

        assert_eq!(state.receipts.len(), state.assigned.len());
        for (email, receipt) in &state.receipts {
            assert_eq!(&receipt.user.email, email);
            assert_eq!(state.assigned.get(email), Some(&receipt.seat));
        }

        let mut seen = BTreeSet::new();
        for seat in state.assigned.values() {
            assert!(seen.insert(*seat), "seat {seat} assigned twice");
        }

        for section in Section::ALL {
            let cap = state.capacity[&section];
            let universe: BTreeSet<Seat> = (1..=cap).map(|n| Seat::new(section, n)).collect();
            let free = state.free[&section].clone();
            let assigned: BTreeSet<Seat> = state
                .assigned
                .values()
                .copied()
                .filter(|s| s.section == section)
                .collect();

            assert!(free.is_disjoint(&assigned), "section {section}: free/assigned overlap");
            let mut union = free;
            union.extend(assigned);
            assert_eq!(union, universe, "section {section}: seats lost or invented");
        }
    }
}
