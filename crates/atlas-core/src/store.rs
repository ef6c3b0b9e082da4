//! Storage for user-saved sequences.
//!
//! The `SequenceStore` trait is the persistence boundary: save one sequence,
//! list them all, or subscribe to the list as it changes. `MemoryStore`
//! keeps everything in process and is what tests and the CLI use.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::catalog::{common_partner_sequences, common_solo_sequences};
use crate::sequence::{PartnerSequence, SoloSequence};
use crate::{Error, Result};

/// A sequence that can be given a storage id
pub trait Stored: Clone + Send + Sync + 'static {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
    fn is_empty(&self) -> bool;
}

impl Stored for SoloSequence {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl Stored for PartnerSequence {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }
}

/// Async trait for saving and listing sequences.
#[async_trait]
pub trait SequenceStore<T: Stored>: Send + Sync {
    /// Save a sequence. One without an id is assigned one; one with an id
    /// replaces the stored sequence with that id.
    async fn save(&self, sequence: T) -> Result<()>;

    /// Every saved sequence, in save order
    async fn get_all(&self) -> Result<Vec<T>>;

    /// Receiver that sees the full list after every save
    fn subscribe(&self) -> watch::Receiver<Vec<T>>;
}

/// In-process store backed by a watch channel.
pub struct MemoryStore<T: Stored> {
    sequences: watch::Sender<Vec<T>>,
    next_id: AtomicU64,
}

impl<T: Stored> MemoryStore<T> {
    pub fn new() -> Self {
        let (sequences, _) = watch::channel(Vec::new());
        Self {
            sequences,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.sequences.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Stored> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Stored> SequenceStore<T> for MemoryStore<T> {
    async fn save(&self, mut sequence: T) -> Result<()> {
        if sequence.is_empty() {
            return Err(Error::Storage("refusing to save an empty sequence".into()));
        }

        if sequence.id().is_none() {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            sequence.set_id(format!("user-{}", id));
        }

        let id = sequence.id().map(str::to_string);
        self.sequences.send_modify(|all| {
            match all.iter_mut().find(|s| s.id().map(str::to_string) == id) {
                Some(existing) => *existing = sequence,
                None => all.push(sequence),
            }
        });

        tracing::debug!(id = ?id, "Saved sequence");
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<T>> {
        Ok(self.sequences.borrow().clone())
    }

    fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.sequences.subscribe()
    }
}

/// Curated solo sequences followed by everything the user has saved
pub async fn available_solo_sequences(
    store: &dyn SequenceStore<SoloSequence>,
) -> Result<Vec<SoloSequence>> {
    let mut all = common_solo_sequences();
    all.extend(store.get_all().await?);
    Ok(all)
}

/// Curated partner sequences followed by everything the user has saved
pub async fn available_partner_sequences(
    store: &dyn SequenceStore<PartnerSequence>,
) -> Result<Vec<PartnerSequence>> {
    let mut all = common_partner_sequences();
    all.extend(store.get_all().await?);
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PartnerStepUnit;
    use crate::step::Step;
    use crate::unit::StepUnit;

    fn rock() -> SoloSequence {
        SoloSequence::titled(
            "Rock",
            vec![StepUnit::two(Step::FORWARD, None, Step::BACKWARD)],
        )
    }

    #[tokio::test]
    async fn test_save_assigns_ids() {
        let store: MemoryStore<SoloSequence> = MemoryStore::new();
        store.save(rock()).await.unwrap();
        store.save(rock()).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id.as_deref(), Some("user-1"));
        assert_eq!(all[1].id.as_deref(), Some("user-2"));
    }

    #[tokio::test]
    async fn test_save_with_id_replaces() {
        let store: MemoryStore<SoloSequence> = MemoryStore::new();
        store.save(rock()).await.unwrap();

        let mut updated = store.get_all().await.unwrap().remove(0);
        updated.title = Some("Rock Step".into());
        store.save(updated).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title.as_deref(), Some("Rock Step"));
    }

    #[tokio::test]
    async fn test_empty_sequence_rejected() {
        let store: MemoryStore<SoloSequence> = MemoryStore::new();
        let result = store.save(SoloSequence::new(vec![])).await;
        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_sees_updates() {
        let store: MemoryStore<SoloSequence> = MemoryStore::new();
        let mut rx = store.subscribe();
        assert!(rx.borrow().is_empty());

        store.save(rock()).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_available_combines_curated_and_saved() {
        let store: MemoryStore<SoloSequence> = MemoryStore::new();
        store.save(rock()).await.unwrap();

        let all = available_solo_sequences(&store).await.unwrap();
        let curated = common_solo_sequences().len();
        assert_eq!(all.len(), curated + 1);
        assert!(all[..curated].iter().all(|s| s.id.is_none()));
        assert_eq!(all[curated].title.as_deref(), Some("Rock"));
    }

    #[tokio::test]
    async fn test_partner_store() {
        let store: MemoryStore<PartnerSequence> = MemoryStore::new();
        let basic = StepUnit::two(Step::IN_PLACE, None, Step::IN_PLACE);
        store
            .save(PartnerSequence::new(vec![PartnerStepUnit::new(basic.clone(), basic)]))
            .await
            .unwrap();

        let all = available_partner_sequences(&store).await.unwrap();
        assert_eq!(all.len(), common_partner_sequences().len() + 1);
        assert_eq!(all.last().unwrap().id.as_deref(), Some("user-1"));
    }
}
