//! Ride subtype table and its CSV loader.
//!
//! # CSV format
//!
//! One row per subtype.  A subtype listed twice takes the values of its
//! last row.
//!
//! ```csv
//! subtype,thrill_level,installation_cost,ticket_price,duration_mins,capacity
//! ferris-wheel,2,3500,3,8,24
//! rollercoaster,5,3000,5,2,12
//! ```
//!
//! Subtypes are kept sorted, so a random pick driven by a seeded
//! [`Chooser`] is reproducible regardless of file order.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use park_core::Chooser;

use crate::RideError;

// ── RideAttributes ────────────────────────────────────────────────────────────

/// Immutable per-subtype ride numbers, copied into a `Ride` when it is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RideAttributes {
    pub thrill_level:      u8,
    pub installation_cost: u32,
    /// Charged per rider at the end of each run.
    pub ticket_price:      u32,
    /// Length of one run in simulated minutes.
    pub duration_mins:     u32,
    /// Maximum riders per run.
    pub capacity:          u32,
}

impl RideAttributes {
    /// Attributes of a subtype missing from the table.  Capacity 0 means a
    /// ride built with these never leaves `Idle`.
    pub const UNCONFIGURED: RideAttributes = RideAttributes {
        thrill_level:      0,
        installation_cost: 0,
        ticket_price:      0,
        duration_mins:     0,
        capacity:          0,
    };
}

// ── RideTable ─────────────────────────────────────────────────────────────────

/// Subtype name → [`RideAttributes`].
#[derive(Debug, Clone, Default)]
pub struct RideTable {
    entries: BTreeMap<String, RideAttributes>,
}

impl RideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The park's stock ride catalogue.
    pub fn builtin() -> Self {
        // (subtype, thrill, cost, price, minutes, capacity)
        const STOCK: [(&str, u8, u32, u32, u32, u32); 10] = [
            ("arcade",          1, 2000, 3, 6, 15),
            ("bumper-car",      2, 2000, 5, 3, 10),
            ("carousel",        1, 2000, 3, 4, 20),
            ("circus-tent",     1, 2000, 3, 10, 30),
            ("ferris-wheel",    2, 3500, 3, 8, 24),
            ("rollercoaster",   5, 3000, 5, 2, 12),
            ("roundabout",      2, 2500, 3, 3, 12),
            ("space-adventure", 3, 2500, 3, 5, 12),
            ("swing-claw",      4, 3000, 5, 3, 16),
            ("water-ride",      4, 3000, 5, 5, 8),
        ];

        let mut table = Self::new();
        for (name, thrill, cost, price, mins, cap) in STOCK {
            table.insert(name, RideAttributes {
                thrill_level:      thrill,
                installation_cost: cost,
                ticket_price:      price,
                duration_mins:     mins,
                capacity:          cap,
            });
        }
        table
    }

    /// Add or replace a subtype.
    pub fn insert(&mut self, subtype: impl Into<String>, attributes: RideAttributes) {
        self.entries.insert(subtype.into(), attributes);
    }

    pub fn get(&self, subtype: &str) -> Option<&RideAttributes> {
        self.entries.get(subtype)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Subtype names in sorted order.
    pub fn subtypes(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Settle which subtype a new ride gets and its attributes.
    ///
    /// `None` or an empty name picks uniformly among the configured subtypes
    /// via `chooser`.  A name missing from the table is kept as-is with
    /// [`RideAttributes::UNCONFIGURED`].
    pub fn resolve<C: Chooser + ?Sized>(
        &self,
        subtype: Option<&str>,
        chooser: &mut C,
    ) -> (String, RideAttributes) {
        match subtype.filter(|s| !s.is_empty()) {
            Some(name) => match self.entries.get(name) {
                Some(attrs) => (name.to_owned(), *attrs),
                None => {
                    warn!("unknown ride subtype {name:?}; ride will never load");
                    (name.to_owned(), RideAttributes::UNCONFIGURED)
                }
            },
            None => {
                let picked = chooser
                    .choose_index(self.entries.len())
                    .and_then(|i| self.entries.iter().nth(i));
                match picked {
                    Some((name, attrs)) => (name.clone(), *attrs),
                    None => {
                        warn!("ride table is empty; placing an unconfigured ride");
                        (String::new(), RideAttributes::UNCONFIGURED)
                    }
                }
            }
        }
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RideRecord {
    subtype:           String,
    thrill_level:      u8,
    installation_cost: u32,
    ticket_price:      u32,
    duration_mins:     u32,
    capacity:          u32,
}

/// Load a [`RideTable`] from a CSV file.
pub fn load_ride_table_csv(path: &Path) -> Result<RideTable, RideError> {
    let file = std::fs::File::open(path).map_err(RideError::Io)?;
    load_ride_table_reader(file)
}

/// Like [`load_ride_table_csv`] but accepts any `Read` source.
pub fn load_ride_table_reader<R: Read>(reader: R) -> Result<RideTable, RideError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut table = RideTable::new();

    for result in csv_reader.deserialize::<RideRecord>() {
        let row = result.map_err(|e| RideError::Parse(e.to_string()))?;
        if row.subtype.is_empty() {
            return Err(RideError::Parse("empty subtype name".to_owned()));
        }
        table.insert(row.subtype, RideAttributes {
            thrill_level:      row.thrill_level,
            installation_cost: row.installation_cost,
            ticket_price:      row.ticket_price,
            duration_mins:     row.duration_mins,
            capacity:          row.capacity,
        });
    }

    Ok(table)
}
