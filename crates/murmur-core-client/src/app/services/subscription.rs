// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::shared::models::ChatError;

const SNAPSHOT_BUFFER_SIZE: usize = 16;

/// A live view. Every item is a complete snapshot of the view. An `Err` item is the last item
/// of a subscription.
///
/// The forwarding task is aborted when the subscription is unsubscribed or dropped.
pub struct Subscription<T> {
    receiver: Option<mpsc::Receiver<Result<T, ChatError>>>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Subscription<T> {
    pub(crate) fn spawn<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<T, ChatError>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(SNAPSHOT_BUFFER_SIZE);

        let task = tokio::spawn(async move {
            let mut stream = Box::pin(stream);

            while let Some(item) = stream.next().await {
                let is_error = item.is_err();

                if tx.send(item).await.is_err() {
                    debug!("Subscriber went away. Stopping subscription.");
                    return;
                }
                if is_error {
                    return;
                }
            }
        });

        Self {
            receiver: Some(rx),
            task: Some(task),
        }
    }
}

impl<T> Subscription<T> {
    /// Stops the delivery of snapshots. Snapshots which were not received yet are discarded.
    /// Calling this more than once has no effect.
    pub fn unsubscribe(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.receiver.take();
    }

    pub fn is_subscribed(&self) -> bool {
        self.receiver.is_some()
    }
}

impl<T> Stream for Subscription<T> {
    type Item = Result<T, ChatError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.receiver.as_mut() {
            Some(receiver) => receiver.poll_recv(cx),
            None => Poll::Ready(None),
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.unsubscribe()
    }
}
