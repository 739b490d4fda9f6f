use chrono::{DateTime, NaiveDateTime, Utc};
use contracts::dashboards::d400_ecommerce_overview::SessionInfo;
use contracts::shared::date_range::DateRange;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::a001_order_line::{load_from_path, DataLoadError, Dataset};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Load(#[from] DataLoadError),
}

/// Один пользовательский экземпляр дашборда: своя таблица и свой фильтр
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub dataset: Arc<Dataset>,
    /// `None` only when the table has no approval dates at all
    pub filter: Option<DateRange>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        if dataset.is_empty() {
            tracing::warn!("{} contains no order lines", dataset.source);
        }
        let filter = dataset.bounds().to_range();
        Self {
            id: Uuid::new_v4(),
            dataset: Arc::new(dataset),
            filter,
            created_at: Utc::now(),
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.id,
            source: self.dataset.source.clone(),
            total_rows: self.dataset.len(),
            bounds: self.dataset.bounds(),
            filter: self.filter,
            created_at: self.created_at,
        }
    }

    /// Active filter, falling back to an empty window when the table has no
    /// approval dates
    pub fn active_range(&self) -> DateRange {
        self.filter
            .unwrap_or_else(|| DateRange::new(NaiveDateTime::MAX, NaiveDateTime::MIN))
    }
}

/// Sessions live in memory until removed; there is no eviction
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the dataset from `path` into a new session
    pub async fn create(&self, path: &Path) -> Result<SessionInfo, SessionError> {
        let owned = path.to_path_buf();
        let dataset = tokio::task::spawn_blocking(move || load_from_path(&owned))
            .await
            .map_err(|e| DataLoadError::Io {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e),
            })??;

        Ok(self.insert(Session::new(dataset)).await)
    }

    pub async fn insert(&self, session: Session) -> SessionInfo {
        let info = session.info();
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session);
        tracing::info!(
            "Session {} opened: {} rows from {} ({} open)",
            info.session_id,
            info.total_rows,
            info.source,
            sessions.len()
        );
        info
    }

    pub async fn info(&self, id: Uuid) -> Result<SessionInfo, SessionError> {
        self.with_session(id, Session::info).await
    }

    /// Run `f` against a snapshot of the session
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&Session) -> T,
    ) -> Result<T, SessionError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        Ok(f(session))
    }

    pub async fn set_filter(&self, id: Uuid, range: DateRange) -> Result<Session, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.filter = Some(range);
        tracing::debug!("Session {} filter set to {} .. {}", id, range.start, range.end);
        Ok(session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::info!("Session {} closed", id);
                Ok(())
            }
            None => Err(SessionError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_order_line::OrderLineRecord;

    fn dataset(days: &[u32]) -> Dataset {
        let records = days
            .iter()
            .map(|day| OrderLineRecord {
                order_id: format!("o{}", day),
                order_item_id: Some(1),
                seller_id: "s1".to_string(),
                customer_id: "c1".to_string(),
                product_category_name: None,
                customer_state: "SP".to_string(),
                seller_state: "SP".to_string(),
                payment_value: None,
                review_score: None,
                order_approved_at: NaiveDate::from_ymd_opt(2018, 3, *day)
                    .and_then(|d| d.and_hms_opt(15, 30, 0)),
                order_delivered_customer_date: None,
            })
            .collect();
        Dataset::new("inline", records)
    }

    #[tokio::test]
    async fn test_new_session_defaults_to_bounds() {
        let store = SessionStore::new();
        let info = store.insert(Session::new(dataset(&[20, 2, 9]))).await;

        let filter = info.filter.unwrap();
        assert_eq!(filter.start_date(), NaiveDate::from_ymd_opt(2018, 3, 2).unwrap());
        assert_eq!(filter.end_date(), NaiveDate::from_ymd_opt(2018, 3, 20).unwrap());
        assert_eq!(info.total_rows, 3);
        assert_eq!(store.info(info.session_id).await.unwrap(), info);
    }

    #[tokio::test]
    async fn test_sessions_have_independent_filters() {
        let store = SessionStore::new();
        let a = store.insert(Session::new(dataset(&[1, 31]))).await;
        let b = store.insert(Session::new(dataset(&[1, 31]))).await;

        let narrow = DateRange::from_dates(
            NaiveDate::from_ymd_opt(2018, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2018, 3, 2).unwrap(),
        );
        store.set_filter(a.session_id, narrow).await.unwrap();

        assert_eq!(store.info(a.session_id).await.unwrap().filter, Some(narrow));
        assert_eq!(store.info(b.session_id).await.unwrap().filter, b.filter);
    }

    #[tokio::test]
    async fn test_unknown_and_removed_sessions() {
        let store = SessionStore::new();
        let info = store.insert(Session::new(dataset(&[5]))).await;

        store.remove(info.session_id).await.unwrap();
        assert!(matches!(
            store.info(info.session_id).await,
            Err(SessionError::NotFound(_))
        ));
        assert!(matches!(
            store.remove(Uuid::new_v4()).await,
            Err(SessionError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_from_missing_file_fails() {
        let store = SessionStore::new();
        let result = store.create(Path::new("/nonexistent/orders.csv")).await;
        assert!(matches!(
            result,
            Err(SessionError::Load(DataLoadError::NotFound(_)))
        ));
    }

    #[test]
    fn test_session_without_dates_has_empty_window() {
        let session = Session::new(Dataset::new("inline", Vec::new()));
        assert!(session.filter.is_none());
        assert!(session.active_range().is_empty());
    }
}
