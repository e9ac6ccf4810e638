//! Builder session driver and the `ChoicePresenter` port.
//!
//! A session loads the template catalog once, then loops: offer choices,
//! wait for the presenter's answer, apply it. Each iteration is one
//! round-trip with the user and may block indefinitely.

use std::future::Future;

use promptchain_types::builder::{BuilderChoice, BuilderOutcome, ChainBuilderState};
use promptchain_types::error::BuilderError;
use uuid::Uuid;

use super::state::{ChainBuilderStateExt, new_builder_state};
use crate::template::TemplateStore;

/// Whatever shows the builder menu to the user.
///
/// `choices` is exactly what the state machine offers; implementations
/// return one of them. Returning `Cancel` on user abort (Esc, closed menu) is
/// the implementation's responsibility.
pub trait ChoicePresenter: Send {
    fn present(
        &mut self,
        state: &ChainBuilderState,
        choices: &[BuilderChoice],
    ) -> impl Future<Output = Result<BuilderChoice, BuilderError>> + Send;
}

/// Run one builder session to completion.
///
/// The state is owned by this call and dropped when it returns, whether the
/// session was finalized, cancelled, or failed.
///
/// # Errors
///
/// Fails if the catalog cannot be listed, the presenter fails, or the
/// presenter returns a choice the state machine rejects.
#[tracing::instrument(skip(store, presenter), fields(session_id = %session_id))]
pub async fn run_builder_session<S, P>(
    store: &S,
    presenter: &mut P,
    session_id: Uuid,
) -> Result<BuilderOutcome, BuilderError>
where
    S: TemplateStore,
    P: ChoicePresenter,
{
    let catalog = store.list_templates().await?;
    tracing::debug!(templates = catalog.len(), "builder session started");

    let mut state = new_builder_state(session_id, catalog);

    loop {
        if let Some(outcome) = state.outcome() {
            tracing::debug!(phase = %state.phase, steps = state.selected.len(), "builder session ended");
            return Ok(outcome);
        }

        let choices = state.offered_choices();
        let choice = presenter.present(&state, &choices).await?;
        tracing::trace!(?choice, "builder choice received");
        state.apply(choice)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryTemplateStore, ScriptedPresenter};

    fn pick(id: &str) -> BuilderChoice {
        BuilderChoice::PickTemplate(id.to_string())
    }

    fn store() -> InMemoryTemplateStore {
        InMemoryTemplateStore::new()
            .with("risks", "List risks.")
            .with("summarize", "Summarize the code.")
            .with("tests", "Suggest tests.")
    }

    #[tokio::test]
    async fn session_finalizes_in_pick_order() {
        let mut presenter =
            ScriptedPresenter::new(vec![pick("tests"), pick("summarize"), BuilderChoice::Finish]);

        let outcome = run_builder_session(&store(), &mut presenter, Uuid::now_v7())
            .await
            .unwrap();

        match outcome {
            BuilderOutcome::Finalized(chain) => {
                assert_eq!(chain.prompts, vec!["tests", "summarize"]);
            }
            BuilderOutcome::Cancelled => panic!("expected finalized chain"),
        }
    }

    #[tokio::test]
    async fn session_offers_shrinking_choices() {
        let mut presenter = ScriptedPresenter::new(vec![pick("risks"), BuilderChoice::Cancel]);

        run_builder_session(&store(), &mut presenter, Uuid::now_v7())
            .await
            .unwrap();

        assert_eq!(presenter.offers.len(), 2);
        assert_eq!(
            presenter.offers[0],
            vec![pick("risks"), pick("summarize"), pick("tests"), BuilderChoice::Cancel]
        );
        assert_eq!(
            presenter.offers[1],
            vec![
                pick("summarize"),
                pick("tests"),
                BuilderChoice::Finish,
                BuilderChoice::Cancel
            ]
        );
    }

    #[tokio::test]
    async fn cancel_before_first_pick_yields_cancelled() {
        let mut presenter = ScriptedPresenter::new(vec![BuilderChoice::Cancel]);
        let outcome = run_builder_session(&store(), &mut presenter, Uuid::now_v7())
            .await
            .unwrap();
        assert_eq!(outcome, BuilderOutcome::Cancelled);
    }

    #[tokio::test]
    async fn cancel_after_picks_yields_no_chain() {
        let mut presenter =
            ScriptedPresenter::new(vec![pick("risks"), pick("tests"), BuilderChoice::Cancel]);
        let outcome = run_builder_session(&store(), &mut presenter, Uuid::now_v7())
            .await
            .unwrap();
        assert_eq!(outcome, BuilderOutcome::Cancelled);
    }

    #[tokio::test]
    async fn exhausting_catalog_still_allows_finish() {
        let mut presenter = ScriptedPresenter::new(vec![
            pick("summarize"),
            pick("risks"),
            pick("tests"),
            BuilderChoice::Finish,
        ]);
        let outcome = run_builder_session(&store(), &mut presenter, Uuid::now_v7())
            .await
            .unwrap();

        assert_eq!(
            presenter.offers.last().unwrap(),
            &vec![BuilderChoice::Finish, BuilderChoice::Cancel]
        );
        match outcome {
            BuilderOutcome::Finalized(chain) => {
                assert_eq!(chain.prompts, vec!["summarize", "risks", "tests"]);
            }
            BuilderOutcome::Cancelled => panic!("expected finalized chain"),
        }
    }

    #[tokio::test]
    async fn duplicate_pick_from_presenter_is_an_error() {
        let mut presenter = ScriptedPresenter::new(vec![pick("risks"), pick("risks")]);
        let err = run_builder_session(&store(), &mut presenter, Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, BuilderError::AlreadySelected(_)));
    }

    #[tokio::test]
    async fn presenter_failure_aborts_session() {
        let mut presenter = ScriptedPresenter::new(vec![pick("risks")]);
        // Script runs out on the second round-trip.
        let err = run_builder_session(&store(), &mut presenter, Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, BuilderError::Presenter(_)));
    }

    #[tokio::test]
    async fn empty_store_only_offers_cancel() {
        let mut presenter = ScriptedPresenter::new(vec![BuilderChoice::Cancel]);
        let outcome =
            run_builder_session(&InMemoryTemplateStore::new(), &mut presenter, Uuid::now_v7())
                .await
                .unwrap();
        assert_eq!(outcome, BuilderOutcome::Cancelled);
        assert_eq!(presenter.offers, vec![vec![BuilderChoice::Cancel]]);
    }

    #[tokio::test]
    async fn catalog_failure_is_reported() {
        let store = InMemoryTemplateStore::new().failing_listing();
        let mut presenter = ScriptedPresenter::new(vec![]);
        let err = run_builder_session(&store, &mut presenter, Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, BuilderError::Catalog(_)));
    }
}
