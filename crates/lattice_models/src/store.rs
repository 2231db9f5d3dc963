//! Price records and the sink interface.
//!
//! The pricing core only hands finished records to a [`PriceSink`]; schemas,
//! connections and consistency are the sink's business. [`StoreError`] stays
//! at that boundary and does not convert into [`PricingError`].

use chrono::{DateTime, Utc};
use lattice_core::traits::Priceable;
use lattice_core::types::PricingError;
use thiserror::Error;

use crate::instruments::LatticeInstrument;

/// Sink failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The sink refused or failed to persist a record.
    #[error("Failed to store price record for {label}: {message}")]
    WriteFailed {
        /// Label of the rejected record
        label: String,
        /// Backend message
        message: String,
    },
}

/// One computed price, stamped at capture time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceRecord {
    /// Contract label
    pub label: String,
    /// Calibration model tag
    pub model: String,
    /// Instrument type (vanilla, knock-out, knock-in)
    pub instrument: String,
    /// Option kind (call, put)
    pub kind: String,
    /// Initial spot
    pub spot: f64,
    /// Share count
    pub shares: f64,
    /// Lattice steps, absent for closed form
    pub steps: Option<usize>,
    /// Computed price
    pub price: f64,
    /// Capture time
    pub priced_at: DateTime<Utc>,
}

impl PriceRecord {
    /// Prices an instrument and captures the result.
    pub fn capture(
        instrument: &LatticeInstrument,
        spot: f64,
        shares: f64,
    ) -> Result<Self, PricingError> {
        let price = instrument.price(spot, shares)?;
        let contract = instrument.contract();
        Ok(Self {
            label: contract.name().to_string(),
            model: contract.model().tag().to_string(),
            instrument: instrument.instrument_type().to_string(),
            kind: contract.kind().as_str().to_string(),
            spot,
            shares,
            steps: contract.steps(),
            price,
            priced_at: Utc::now(),
        })
    }
}

/// Accepts computed price records and stores them.
pub trait PriceSink {
    /// Stores one record.
    fn store(&mut self, record: PriceRecord) -> Result<(), StoreError>;

    /// Stores records in order, stopping at the first failure.
    fn store_all<I>(&mut self, records: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = PriceRecord>,
        Self: Sized,
    {
        let mut stored = 0;
        for record in records {
            self.store(record)?;
            stored += 1;
        }
        Ok(stored)
    }
}

/// Sink that keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSink {
    records: Vec<PriceRecord>,
}

impl InMemoryPriceSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored records, oldest first.
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record for a label.
    pub fn latest(&self, label: &str) -> Option<&PriceRecord> {
        self.records.iter().rev().find(|r| r.label == label)
    }
}

impl PriceSink for InMemoryPriceSink {
    fn store(&mut self, record: PriceRecord) -> Result<(), StoreError> {
        tracing::trace!(label = %record.label, price = record.price, "price record stored");
        self.records.push(record);
        Ok(())
    }
}
