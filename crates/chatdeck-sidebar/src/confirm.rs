//! Yes/no confirmation before destructive actions

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

pub const DELETE_CHAT_PROMPT: &str = "Confirm to delete the selected conversation?";

/// Asks the user a yes/no question
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Resolves to `true` when the user accepts
    async fn confirm(&self, prompt: &str) -> bool;
}

/// A pending question handed to the host UI
#[derive(Debug)]
pub struct ConfirmRequest {
    pub prompt: String,
    reply: oneshot::Sender<bool>,
}

impl ConfirmRequest {
    /// Answer the question. Dropping the request without answering declines it.
    pub fn respond(self, accepted: bool) {
        // The asker may have gone away; nothing to do then
        let _ = self.reply.send(accepted);
    }
}

/// Forwards prompts over a channel to whatever draws the dialog
#[derive(Clone)]
pub struct ChannelConfirmer {
    requests: mpsc::Sender<ConfirmRequest>,
}

impl ChannelConfirmer {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<ConfirmRequest>) {
        let (requests, rx) = mpsc::channel(buffer);
        (Self { requests }, rx)
    }
}

#[async_trait]
impl Confirmer for ChannelConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let request = ConfirmRequest {
            prompt: prompt.to_string(),
            reply,
        };

        if self.requests.send(request).await.is_err() {
            tracing::warn!("Confirmation host is gone, treating as declined");
            return false;
        }

        answer.await.unwrap_or(false)
    }
}
