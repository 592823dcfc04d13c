//! High-score submission against a capped leaderboard.

use super::identity::IdentityProvider;
use super::store::ScoreStore;
use super::types::{normalize_username, ScoreEntry, ScoreError, SubmitOutcome, LEADERBOARD_SIZE};

/// Submit `score` for `username`.
///
/// Rejected without writing when the board already holds
/// [`LEADERBOARD_SIZE`] better-or-equal scores. An identity is provisioned
/// before anything is written. The new row is stored first and the minimum
/// evicted afterwards, so a failed write leaves the board as it was and the
/// board never settles above [`LEADERBOARD_SIZE`].
pub fn submit_score(
    store: &mut dyn ScoreStore,
    identities: &mut dyn IdentityProvider,
    username: &str,
    score: u32,
) -> Result<SubmitOutcome, ScoreError> {
    let username = normalize_username(username).ok_or(ScoreError::EmptyUsername)?;

    let board = store.list(LEADERBOARD_SIZE)?;
    let better_or_equal = board.iter().filter(|e| e.score >= score).count();
    if better_or_equal >= LEADERBOARD_SIZE {
        let lowest = board.last().map(|e| e.score).unwrap_or(0);
        log::info!("score {} for {} below leaderboard ({})", score, username, lowest);
        return Ok(SubmitOutcome::Rejected { lowest });
    }

    let identity = identities.provision()?;

    store.insert(ScoreEntry {
        username: username.clone(),
        score,
        identity: identity.to_string(),
        created_at: chrono::Utc::now().timestamp(),
    })?;

    // The new row outranks the current minimum, so trimming never removes it.
    let mut evicted = None;
    let mut all = store.list(usize::MAX)?;
    while all.len() > LEADERBOARD_SIZE {
        let Some(minimum) = all.last().map(|e| e.score) else {
            break;
        };
        if !store.delete_by_score(minimum)? {
            break;
        }
        all.pop();
        evicted = Some(minimum);
    }

    let rank = store
        .list(LEADERBOARD_SIZE)?
        .iter()
        .position(|e| e.score == score && e.username == username)
        .map(|i| i + 1)
        .unwrap_or(LEADERBOARD_SIZE);
    log::info!("{} submitted {} (rank {})", username, score, rank);
    Ok(SubmitOutcome::Accepted { rank, evicted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::identity::{AnonymousSession, Identity};
    use crate::scores::store::MemoryScoreStore;

    struct NoIdentity;

    /// Lists and deletes normally but cannot store new rows.
    struct FullDisk(MemoryScoreStore);

    impl ScoreStore for FullDisk {
        fn list(&self, limit: usize) -> std::io::Result<Vec<ScoreEntry>> {
            self.0.list(limit)
        }

        fn insert(&mut self, _entry: ScoreEntry) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn delete_by_score(&mut self, score: u32) -> std::io::Result<bool> {
            self.0.delete_by_score(score)
        }
    }

    impl IdentityProvider for NoIdentity {
        fn provision(&mut self) -> Result<Identity, ScoreError> {
            Err(ScoreError::Identity("sign-up disabled".to_string()))
        }
    }

    fn board(scores: &[u32]) -> MemoryScoreStore {
        let mut store = MemoryScoreStore::new();
        for (i, score) in scores.iter().enumerate() {
            store
                .insert(ScoreEntry {
                    username: format!("p{}", i),
                    score: *score,
                    identity: "seed".to_string(),
                    created_at: 0,
                })
                .unwrap();
        }
        store
    }

    fn scores(store: &MemoryScoreStore) -> Vec<u32> {
        store.list(10).unwrap().iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_empty_username_rejected() {
        let mut store = board(&[]);
        let result = submit_score(&mut store, &mut AnonymousSession::new(), "  ", 10);
        assert!(matches!(result, Err(ScoreError::EmptyUsername)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_higher_score_evicts_minimum() {
        let mut store = board(&[50, 40, 30]);
        let outcome = submit_score(&mut store, &mut AnonymousSession::new(), "ada", 35).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                rank: 3,
                evicted: Some(30)
            }
        );
        assert_eq!(scores(&store), vec![50, 40, 35]);
    }

    #[test]
    fn test_lower_score_rejected_and_board_unchanged() {
        let mut store = board(&[50, 40, 30]);
        let outcome = submit_score(&mut store, &mut AnonymousSession::new(), "ada", 25).unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected { lowest: 30 });
        assert_eq!(scores(&store), vec![50, 40, 30]);
    }

    #[test]
    fn test_tie_with_minimum_is_rejected() {
        let mut store = board(&[50, 40, 30]);
        let outcome = submit_score(&mut store, &mut AnonymousSession::new(), "ada", 30).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
    }

    #[test]
    fn test_board_not_full_accepts_anything() {
        let mut store = board(&[50]);
        let outcome = submit_score(&mut store, &mut AnonymousSession::new(), "ada", 0).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                rank: 2,
                evicted: None
            }
        );
    }

    #[test]
    fn test_identity_failure_writes_nothing() {
        let mut store = board(&[50, 40, 30]);
        let result = submit_score(&mut store, &mut NoIdentity, "ada", 45);
        assert!(matches!(result, Err(ScoreError::Identity(_))));
        assert_eq!(scores(&store), vec![50, 40, 30]);
    }

    #[test]
    fn test_failed_insert_keeps_board() {
        let mut store = FullDisk(board(&[50, 40, 30]));
        let result = submit_score(&mut store, &mut AnonymousSession::new(), "ada", 35);
        assert!(matches!(result, Err(ScoreError::Io(_))));
        assert_eq!(scores(&store.0), vec![50, 40, 30]);
    }

    #[test]
    fn test_rows_carry_identity() {
        let mut store = board(&[]);
        let mut session = AnonymousSession::new();
        submit_score(&mut store, &mut session, "ada", 7).unwrap();
        let expected = session.current().unwrap().to_string();
        assert_eq!(store.list(1).unwrap()[0].identity, expected);
    }
}
