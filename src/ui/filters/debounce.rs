use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};

/// Emit the latest item once `stream` has been quiet for `period`.
///
/// A pending item is flushed immediately when the upstream ends.
pub fn debounce<S>(stream: S, period: Duration) -> impl Stream<Item = S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send,
{
    stream::unfold(Some(stream.boxed()), move |upstream| async move {
        let mut upstream = upstream?;
        let mut latest = upstream.next().await?;
        loop {
            match tokio::time::timeout(period, upstream.next()).await {
                Ok(Some(item)) => latest = item,
                Ok(None) => return Some((latest, None)),
                Err(_) => return Some((latest, Some(upstream))),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;

    #[tokio::test(start_paused = true)]
    async fn bursts_collapse_to_last_item() {
        let (tx, rx) = mpsc::unbounded();
        let mut debounced = Box::pin(debounce(rx, Duration::from_millis(100)));

        tx.unbounded_send(1).unwrap();
        tx.unbounded_send(2).unwrap();
        tx.unbounded_send(3).unwrap();
        assert_eq!(debounced.next().await, Some(3));

        tx.unbounded_send(4).unwrap();
        drop(tx);
        assert_eq!(debounced.next().await, Some(4));
        assert_eq!(debounced.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_items_pass_through() {
        let (tx, rx) = mpsc::unbounded();
        let mut debounced = Box::pin(debounce(rx, Duration::from_millis(50)));

        tokio::spawn(async move {
            for value in 1..=3 {
                tx.unbounded_send(value).unwrap();
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
        });

        let items: Vec<i32> = debounced.by_ref().collect().await;
        assert_eq!(items, vec![1, 2, 3]);
    }
}
