//! Order submission
//!
//! Persists a completed session as a durable order with lines, then
//! marks the table occupied. The collaborator offers no transaction
//! primitive, so a line-insert failure triggers compensating cleanup
//! of the header. The table status write is idempotent and retried
//! independently.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use shared::models::{OrderCreate, OrderWithLines, TableStatus};
use shared::{PosError, PosResult, SubmitStage};
use tracing::{error, info, warn};

use super::OrderSession;
use crate::config::CoreConfig;
use crate::store::PosStore;

/// Submits order sessions against the storage collaborator
///
/// Holds the in-flight guard: a second submit while one is
/// outstanding fails with `SubmissionInFlight` instead of creating a
/// duplicate header from a double click.
pub struct OrderSubmitter {
    store: Arc<dyn PosStore>,
    config: CoreConfig,
    in_flight: AtomicBool,
}

impl OrderSubmitter {
    pub fn new(store: Arc<dyn PosStore>, config: CoreConfig) -> Self {
        Self {
            store,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit `session` and clear it on success
    ///
    /// Precondition failures (`NoActiveTable`, `EmptyOrder`) are raised
    /// before any store call. Remote failures carry the stage they
    /// occurred at; the caller may offer a manual retry — the session's
    /// stable submission key makes retrying the header write safe.
    pub async fn submit(&self, session: &mut OrderSession) -> PosResult<OrderWithLines> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PosError::SubmissionInFlight);
        }

        let result =
            tokio::time::timeout(self.config.submit_timeout(), self.submit_inner(session)).await;
        self.in_flight.store(false, Ordering::Release);

        match result {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    timeout_ms = self.config.submit_timeout_ms,
                    "Order submission exceeded deadline"
                );
                Err(PosError::SubmissionTimedOut)
            }
        }
    }

    async fn submit_inner(&self, session: &mut OrderSession) -> PosResult<OrderWithLines> {
        let table = session
            .active_table()
            .cloned()
            .ok_or(PosError::NoActiveTable)?;
        if session.is_empty() {
            return Err(PosError::EmptyOrder);
        }

        // 1. Freeze the total from the captured line prices
        let total_amount = session.total();
        let header = OrderCreate {
            table_id: table.id.clone(),
            customer_name: session.customer_name().map(String::from),
            total_amount,
            notes: session.order_note().map(String::from),
            idempotency_key: session
                .submission_key()
                .ok_or(PosError::NoActiveTable)?
                .to_string(),
        };

        // 2. Order header
        let order = self
            .store
            .create_order(header)
            .await
            .map_err(|e| PosError::submission(SubmitStage::CreateOrder, e.to_string()))?;
        info!(order_id = %order.id, table_id = %table.id, total_amount, "Order header created");

        // 3. Lines, with compensating header delete on failure
        let lines = match self
            .store
            .create_order_lines(&order.id, session.line_payloads())
            .await
        {
            Ok(lines) => lines,
            Err(e) => {
                if let Err(cleanup) = self.store.delete_order(&order.id).await {
                    error!(
                        order_id = %order.id,
                        error = %cleanup,
                        "Compensating order delete failed, orphaned header remains"
                    );
                }
                return Err(PosError::submission(SubmitStage::CreateLines, e.to_string()));
            }
        };

        // 4. Table status; the order is durable at this point, so the
        //    write is retried on its own
        let mut attempt: u32 = 0;
        loop {
            match self
                .store
                .set_table_status(&table.id, TableStatus::Occupied)
                .await
            {
                Ok(_) => break,
                Err(e) if attempt < self.config.table_status_retries => {
                    attempt += 1;
                    warn!(
                        table_id = %table.id,
                        attempt,
                        error = %e,
                        "Table status update failed, retrying"
                    );
                }
                Err(e) => {
                    return Err(PosError::submission(
                        SubmitStage::SetTableStatus,
                        e.to_string(),
                    ));
                }
            }
        }

        // 5. Session is spent
        session.discard();
        info!(order_id = %order.id, lines = lines.len(), "Order submitted");
        Ok(OrderWithLines { order, lines })
    }
}
