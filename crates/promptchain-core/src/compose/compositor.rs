//! Template loading for composition.
//!
//! Every template is loaded sequentially, in chain order, before anything is
//! rendered. The first load failure aborts composition, so no partial
//! document can ever reach a gateway.

use promptchain_types::chain::ChainDefinition;
use promptchain_types::context::ExecutionContext;
use promptchain_types::document::CompositeDocument;
use promptchain_types::error::CompositionError;
use promptchain_types::template::Template;

use super::render::{render_chain, render_single};
use crate::template::TemplateStore;

/// Compose the chain document for `chain`.
///
/// # Errors
///
/// `EmptyChain` for a zero-step chain, `TemplateLoad` naming the first step
/// (1-based) whose template could not be loaded.
#[tracing::instrument(skip_all, fields(chain = %chain.name, steps = chain.len()))]
pub async fn compose_chain<S: TemplateStore>(
    store: &S,
    chain: &ChainDefinition,
    ctx: &ExecutionContext,
) -> Result<CompositeDocument, CompositionError> {
    if chain.is_empty() {
        return Err(CompositionError::EmptyChain);
    }

    let steps = load_in_order(store, &chain.prompts).await?;
    let doc = render_chain(&steps, ctx);
    tracing::debug!(bytes = doc.text.len(), "chain document composed");
    Ok(doc)
}

/// Compose the single-prompt document for template `id`.
#[tracing::instrument(skip(store, ctx))]
pub async fn compose_single<S: TemplateStore>(
    store: &S,
    id: &str,
    ctx: &ExecutionContext,
) -> Result<CompositeDocument, CompositionError> {
    let ids = [id.to_string()];
    let loaded = load_in_order(store, &ids).await?;
    Ok(render_single(&loaded[0], ctx))
}

async fn load_in_order<S: TemplateStore>(
    store: &S,
    ids: &[String],
) -> Result<Vec<Template>, CompositionError> {
    let mut steps = Vec::with_capacity(ids.len());

    for (i, id) in ids.iter().enumerate() {
        match store.load_template(id).await {
            Ok(content) => steps.push(Template::new(id.clone(), content)),
            Err(source) => {
                tracing::warn!(template = %id, position = i + 1, error = %source, "template load failed; aborting composition");
                return Err(CompositionError::TemplateLoad {
                    id: id.clone(),
                    position: i + 1,
                    source,
                });
            }
        }
    }

    Ok(steps)
}
