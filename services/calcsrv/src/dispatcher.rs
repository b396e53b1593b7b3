//! Calculation dispatch
//!
//! Turns a `/api/calculate` request into a response and a history record.
//! Evaluation failures never escape: they become a response whose result
//! fields read `"Error"` and whose `error` carries the message.

use std::sync::Arc;

use calc_engine::{evaluate_formatted, CalcError, Evaluation, Mode, NumberSystem};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::dto::{CalculationRequest, CalculationResponse};
use crate::history::{CalculationRecord, HistoryStore, DEFAULT_SESSION_ID};

pub const ERROR_RESULT: &str = "Error";

pub struct Dispatcher {
    store: Arc<dyn HistoryStore>,
    record_failures: bool,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn HistoryStore>, record_failures: bool) -> Self {
        Self {
            store,
            record_failures,
        }
    }

    pub async fn calculate(&self, request: CalculationRequest) -> CalculationResponse {
        let calculation_id = Uuid::new_v4().to_string();
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let session_id = match request.session_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => DEFAULT_SESSION_ID.to_string(),
        };

        let outcome = evaluate_request(&request);
        let succeeded = outcome.is_ok();

        let (result, formatted_result, error) = match outcome {
            Ok(eval) => (eval.result, eval.formatted_result, None),
            Err(e) => {
                debug!(expression = %request.expression, "calculation failed: {}", e);
                (ERROR_RESULT.to_string(), ERROR_RESULT.to_string(), Some(e.to_string()))
            },
        };

        let response = CalculationResponse {
            result,
            formatted_result,
            expression: request.expression,
            mode: request.mode,
            number_system: request.number_system,
            timestamp,
            calculation_id,
            error,
        };

        if succeeded || self.record_failures {
            self.record(&response, session_id).await;
        }

        response
    }

    /// Store a record; a store failure is logged and the response stands
    async fn record(&self, response: &CalculationResponse, session_id: String) {
        let record = CalculationRecord {
            calculation_id: response.calculation_id.clone(),
            expression: response.expression.clone(),
            result: response.result.clone(),
            formatted_result: response.formatted_result.clone(),
            mode: response.mode.clone(),
            number_system: response.number_system.clone(),
            timestamp: response.timestamp.clone(),
            session_id,
        };

        if let Err(e) = self.store.append(&record).await {
            warn!(
                calculation_id = %record.calculation_id,
                backend = self.store.backend(),
                "Failed to store calculation history: {}",
                e
            );
        }
    }
}

/// `number_system` is only read in programming mode
fn evaluate_request(request: &CalculationRequest) -> Result<Evaluation, CalcError> {
    let mode: Mode = request.mode.parse()?;
    let number_system = match mode {
        Mode::Programming => request.number_system.parse()?,
        Mode::Basic | Mode::Scientific | Mode::Financial => NumberSystem::Decimal,
    };
    evaluate_formatted(&request.expression, mode, number_system)
}
