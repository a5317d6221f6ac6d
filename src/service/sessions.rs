use crate::models::DocumentSession;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 会话存储: 会话ID -> 提取上下文 (并发安全)
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<u64, Arc<DocumentSession>>,
    next_id: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配新的会话ID (从 1 开始递增)
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn insert(&self, session: DocumentSession) -> Arc<DocumentSession> {
        let session = Arc::new(session);
        self.sessions.insert(session.id, Arc::clone(&session));
        session
    }

    pub fn get(&self, id: u64) -> Option<Arc<DocumentSession>> {
        self.sessions.get(&id).map(|s| Arc::clone(s.value()))
    }

    pub fn remove(&self, id: u64) -> Option<Arc<DocumentSession>> {
        self.sessions.remove(&id).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
