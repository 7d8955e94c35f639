//! # tally-service: Operations over the tally Stores
//!
//! Every operation an operator can run, with its session check, against
//! the catalog and transaction log files.
//!
//! ## Service Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inventory (facade)                               │
//! │                                                                         │
//! │   storage: tally_db::Storage          clock: fn() -> NaiveDateTime      │
//! │        │                                   │                            │
//! │        ├──► catalog()  CatalogService      │  list/get/search/add/...   │
//! │        ├──► sales()    SaleProcessor  ◄────┤  sell                      │
//! │        ├──► reports()  ReportEngine   ◄────┘  best-sellers/revenue/...  │
//! │        └──► stock()    StockMonitor           low stock, refill         │
//! │                                                                         │
//! │  Each service borrows the facade's storage; none keeps state between   │
//! │  calls. Every call re-reads the files it needs.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use tally_core::{SaleLine, Session};
//! use tally_db::StoreConfig;
//! use tally_service::Inventory;
//!
//! let inventory = Inventory::open(StoreConfig::new("./database"))?;
//! let session = Session::employee("sam");
//!
//! let receipt = inventory
//!     .sales()
//!     .sell(&session, &[SaleLine::new("P101", 4)], "Jane Doe", "555")?;
//! println!("{} total {}", receipt.transaction_id, receipt.total);
//! # Ok::<(), tally_service::ServiceError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod report;
pub mod sale;
pub mod stock;

pub use catalog::CatalogService;
pub use error::{ServiceError, ServiceResult};
pub use report::ReportEngine;
pub use sale::SaleProcessor;
pub use stock::{Refill, StockMonitor};

use chrono::{NaiveDateTime, Timelike};
use tally_db::{Storage, StoreConfig};

/// Source of "now" for sales and report windows.
pub type Clock = fn() -> NaiveDateTime;

/// Local wall-clock time, truncated to the second.
pub fn local_now() -> NaiveDateTime {
    truncate_to_second(chrono::Local::now().naive_local())
}

pub(crate) fn truncate_to_second(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}

/// Entry point to every service.
#[derive(Debug, Clone)]
pub struct Inventory {
    storage: Storage,
    clock: Clock,
}

impl Inventory {
    pub fn new(storage: Storage) -> Self {
        Inventory {
            storage,
            clock: local_now,
        }
    }

    /// Opens storage at `config` and wraps it.
    pub fn open(config: StoreConfig) -> ServiceResult<Self> {
        Ok(Inventory::new(Storage::open(config)?))
    }

    /// Replaces the clock. Tests pin time with this.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(&self.storage)
    }

    pub fn sales(&self) -> SaleProcessor<'_> {
        SaleProcessor::new(&self.storage, self.clock)
    }

    pub fn reports(&self) -> ReportEngine<'_> {
        ReportEngine::new(&self.storage, self.clock)
    }

    pub fn stock(&self) -> StockMonitor<'_> {
        StockMonitor::new(&self.storage)
    }
}
