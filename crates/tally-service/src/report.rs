//! # Report Engine
//!
//! Reads the log and catalog on demand and aggregates them.
//!
//! | Report        | Access        |
//! |---------------|---------------|
//! | best sellers  | authenticated |
//! | total revenue | admin         |
//! | sales history | admin         |
//!
//! `days = None` covers the whole log; `Some(n)` covers `[now - n days, now]`
//! with `now` read once per call.

use tally_core::report::{
    best_sellers, sales_history, total_revenue, BestSellersReport, ReportWindow, RevenueReport,
    SalesHistory,
};
use tally_core::{Access, Session};
use tally_db::Storage;
use tracing::debug;

use crate::error::ServiceResult;
use crate::Clock;

pub struct ReportEngine<'a> {
    storage: &'a Storage,
    clock: Clock,
}

impl<'a> ReportEngine<'a> {
    pub fn new(storage: &'a Storage, clock: Clock) -> Self {
        ReportEngine { storage, clock }
    }

    fn window(&self, days: Option<u32>) -> Option<ReportWindow> {
        days.map(|days| ReportWindow::trailing(days, (self.clock)()))
    }

    /// Products ranked by units sold.
    pub fn best_sellers(
        &self,
        session: &Session,
        days: Option<u32>,
    ) -> ServiceResult<BestSellersReport> {
        session.authorize(Access::Authenticated)?;

        let log = self.storage.transactions().load();
        let catalog = self.storage.catalog().load();
        let report = best_sellers(log.values(), &catalog, self.window(days));

        debug!(?days, products = report.ranking.len(), "Best sellers computed");
        Ok(report)
    }

    /// Sum of every in-window line at its recorded price.
    pub fn total_revenue(&self, session: &Session, days: Option<u32>) -> ServiceResult<RevenueReport> {
        session.authorize(Access::Admin)?;

        let log = self.storage.transactions().load();
        let report = total_revenue(log.values(), self.window(days));

        debug!(?days, total = %report.total, "Revenue computed");
        Ok(report)
    }

    /// In-window transactions, newest first.
    pub fn sales_history(&self, session: &Session, days: Option<u32>) -> ServiceResult<SalesHistory> {
        session.authorize(Access::Admin)?;

        let log = self.storage.transactions().load();
        let history = sales_history(log.values(), self.window(days));

        debug!(?days, transactions = history.transactions.len(), "History loaded");
        Ok(history)
    }
}
