//! Public submission flow.
//!
//! ```text
//! CalculationForm ──parse_form──► CalculationInput ──engine──► NewCalculation
//!       │ ✗                                                         │
//!       ▼                                                           ▼
//!  Invalid { errors, form }  ◄──── CreateError::Invalid ──── repo.create
//!                                                                   │ ✓
//!                                                                   ▼
//!                                                        Created(Calculation)
//! ```

use tracing::debug;

use tipsplit_core::validation::{parse_form, CalculationForm};
use tipsplit_core::{Calculation, NewCalculation, ValidationErrors};
use tipsplit_db::{CreateError, Database, DbError};

/// Result of one submission.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Created(Calculation),

    /// Nothing was stored; `form` holds the raw input for re-display.
    Invalid {
        errors: ValidationErrors,
        form: CalculationForm,
    },
}

/// Parses, computes and stores one calculation.
///
/// Only database failures are errors; invalid input is an outcome.
pub async fn submit(db: &Database, form: CalculationForm) -> Result<SubmissionOutcome, DbError> {
    let input = match parse_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            debug!(errors = %errors, "Submission rejected");
            return Ok(SubmissionOutcome::Invalid { errors, form });
        }
    };

    match db.calculations().create(NewCalculation::from(input)).await {
        Ok(record) => Ok(SubmissionOutcome::Created(record)),
        Err(CreateError::Invalid(errors)) => {
            debug!(errors = %errors, "Submission rejected");
            Ok(SubmissionOutcome::Invalid { errors, form })
        }
        Err(CreateError::Db(err)) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipsplit_db::DbConfig;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_valid_submission_is_stored() {
        let db = db().await;

        let outcome = submit(&db, CalculationForm::new("100", "20", "4"))
            .await
            .unwrap();

        match outcome {
            SubmissionOutcome::Created(record) => {
                assert_eq!(record.tip_amount.cents(), 2000);
                assert_eq!(record.total_amount.cents(), 12000);
                assert_eq!(record.per_person_amount.cents(), 3000);
            }
            other => panic!("expected Created, got {other:?}"),
        }
        assert_eq!(db.calculations().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submission_keeps_form() {
        let db = db().await;
        let form = CalculationForm::new("-5", "20", "2");

        match submit(&db, form.clone()).await.unwrap() {
            SubmissionOutcome::Invalid { errors, form: kept } => {
                assert_eq!(
                    errors.full_messages(),
                    vec!["Bill amount must be greater than 0"]
                );
                assert_eq!(kept, form);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(db.calculations().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_zero_share_rejected_after_engine() {
        let db = db().await;

        match submit(&db, CalculationForm::new("0.01", "0", "3")).await.unwrap() {
            SubmissionOutcome::Invalid { errors, .. } => {
                assert_eq!(
                    errors.full_messages(),
                    vec!["Per person amount must be greater than 0"]
                );
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
