use crate::error::DeskError;

use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Cached HTML for one route, tagged with the generation it was rendered under.
#[derive(Debug, Clone, Default)]
pub struct CachedPage {
    pub generation: u64,
    pub html: Option<Arc<str>>,
}

/// Messages handled by the render cache actor.
#[derive(Debug)]
pub enum RenderCacheMessage {
    /// Look up the rendering of a route path.
    Get(String, RpcReplyPort<CachedPage>),
    /// Store a rendering; dropped if the path was revalidated since `generation`.
    Put {
        path: String,
        generation: u64,
        html: Arc<str>,
    },
    /// Drop the rendering of a path. Replies with the new generation.
    Revalidate(String, RpcReplyPort<u64>),
}

/// Handle for interacting with the render cache actor.
#[derive(Clone)]
pub struct RenderCacheHandle {
    actor: ActorRef<RenderCacheMessage>,
}

impl RenderCacheHandle {
    pub async fn get(&self, path: impl AsRef<str>) -> Result<CachedPage, DeskError> {
        ractor::call!(
            self.actor,
            RenderCacheMessage::Get,
            path.as_ref().to_string()
        )
        .map_err(|e| DeskError::RactorError(format!("Get RPC failed: {e}")))
    }

    pub fn put(&self, path: impl AsRef<str>, generation: u64, html: Arc<str>) {
        let _ = ractor::cast!(
            self.actor,
            RenderCacheMessage::Put {
                path: path.as_ref().to_string(),
                generation,
                html,
            }
        );
    }

    /// Invalidate the cached rendering of `path`; resolves once the entry is gone.
    pub async fn revalidate_path(&self, path: impl AsRef<str>) -> Result<u64, DeskError> {
        ractor::call!(
            self.actor,
            RenderCacheMessage::Revalidate,
            path.as_ref().to_string()
        )
        .map_err(|e| DeskError::RactorError(format!("Revalidate RPC failed: {e}")))
    }
}

struct RenderCacheActor;

#[ractor::async_trait]
impl Actor for RenderCacheActor {
    type Msg = RenderCacheMessage;
    type State = HashMap<String, CachedPage>;
    type Arguments = ();

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        _arguments: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!("RenderCacheActor started");
        Ok(HashMap::new())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            RenderCacheMessage::Get(path, rp) => {
                let page = state.get(&path).cloned().unwrap_or_default();
                debug!(path = %path, hit = page.html.is_some(), "render cache lookup");
                let _ = rp.send(page);
            }
            RenderCacheMessage::Put {
                path,
                generation,
                html,
            } => {
                let slot = state.entry(path).or_default();
                if slot.generation == generation {
                    slot.html = Some(html);
                }
            }
            RenderCacheMessage::Revalidate(path, rp) => {
                let slot = state.entry(path.clone()).or_default();
                slot.generation += 1;
                slot.html = None;
                debug!(path = %path, generation = slot.generation, "render cache revalidated");
                let _ = rp.send(slot.generation);
            }
        }
        Ok(())
    }
}

/// Spawn the render cache actor and return a handle.
pub async fn spawn() -> Result<RenderCacheHandle, DeskError> {
    let (actor, _jh) = Actor::spawn(None, RenderCacheActor, ())
        .await
        .map_err(|e| DeskError::RactorError(format!("spawn RenderCacheActor failed: {e}")))?;
    Ok(RenderCacheHandle { actor })
}
