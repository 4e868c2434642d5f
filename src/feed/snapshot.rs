//! Versioned window state for save/restore
//!
//! A snapshot holds everything needed to resume a window where the user left
//! it: the query, the materialized items, both edges and the visible index.
//! Loads in flight at capture time are not recorded; a restored proxy is idle
//! and the owner re-triggers loads lazily.

use serde::{Deserialize, Serialize};

use super::error::SnapshotError;
use super::proxy::FeedProxy;
use super::query::{Direction, FeedQuery};
use super::window::{EdgeState, FeedWindow};
use crate::constants::snapshot::VERSION;
use crate::types::FeedItem;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub version: u32,
    pub query: FeedQuery,
    #[serde(default)]
    pub items: Vec<FeedItem>,
    #[serde(default)]
    pub previous: EdgeState,
    #[serde(default)]
    pub next: EdgeState,
    /// Index the owner was showing when the snapshot was taken
    #[serde(default)]
    pub current_index: usize,
}

impl WindowSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot, rejecting versions newer than this build understands
    ///
    /// Unknown fields are ignored so that additive changes stay readable.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let version = value
            .get("version")
            .and_then(serde_json::Value::as_u64)
            .ok_or(SnapshotError::MissingVersion)?;
        check_version(u32::try_from(version).unwrap_or(u32::MAX))?;
        Ok(serde_json::from_value(value)?)
    }
}

fn check_version(found: u32) -> Result<(), SnapshotError> {
    if found > VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found,
            supported: VERSION,
        });
    }
    Ok(())
}

impl FeedProxy {
    /// Capture the window with the owner's current index
    #[must_use]
    pub fn snapshot(&self, current_index: usize) -> WindowSnapshot {
        let window = self.window();
        WindowSnapshot {
            version: VERSION,
            query: window.query().clone(),
            items: window.items().to_vec(),
            previous: *window.edge(Direction::Previous),
            next: *window.edge(Direction::Next),
            current_index,
        }
    }

    /// Rebuild an idle proxy from a snapshot
    ///
    /// Returns the proxy and the index to show. No loader is attached and
    /// no listener is registered.
    pub fn from_snapshot(snapshot: WindowSnapshot) -> Result<(Self, usize), SnapshotError> {
        check_version(snapshot.version)?;
        let WindowSnapshot {
            query,
            items,
            previous,
            next,
            current_index,
            ..
        } = snapshot;

        let window = FeedWindow::from_parts(query, items, previous, next)?;
        let len = window.len();
        if current_index >= len && !(len == 0 && current_index == 0) {
            return Err(SnapshotError::IndexOutOfWindow {
                index: current_index,
                len,
            });
        }

        let proxy = Self::from_window(window);
        proxy.log_restored(current_index);
        Ok((proxy, current_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::query::FeedType;
    use crate::types::{ContentType, ContentTypes};

    fn snapshot_json(version: u32) -> String {
        format!(
            r#"{{"version":{version},"query":{{"feed_type":"new","content_types":1}},"items":[],"current_index":0}}"#
        )
    }

    #[test]
    fn test_missing_version_rejected() {
        let json = r#"{"query":{"feed_type":"new","content_types":1}}"#;
        assert!(matches!(
            WindowSnapshot::from_json(json),
            Err(SnapshotError::MissingVersion)
        ));
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = WindowSnapshot::from_json(&snapshot_json(2)).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion {
                found: 2,
                supported: 1
            }
        ));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let snapshot = WindowSnapshot::from_json(&snapshot_json(1)).unwrap();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.next, EdgeState::default());

        let (proxy, index) = FeedProxy::from_snapshot(snapshot).unwrap();
        assert_eq!(index, 0);
        assert_eq!(proxy.item_count(), 0);
    }

    #[test]
    fn test_corrupt_order_rejected() {
        let snapshot = WindowSnapshot {
            version: VERSION,
            query: FeedQuery::new(FeedType::New, ContentTypes::SFW),
            items: vec![
                FeedItem::new(1, ContentType::Sfw, 0),
                FeedItem::new(2, ContentType::Sfw, 0),
            ],
            previous: EdgeState::default(),
            next: EdgeState::default(),
            current_index: 0,
        };
        assert!(matches!(
            FeedProxy::from_snapshot(snapshot),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn test_index_outside_window_rejected() {
        let snapshot = WindowSnapshot {
            version: VERSION,
            query: FeedQuery::new(FeedType::New, ContentTypes::SFW),
            items: vec![FeedItem::new(1, ContentType::Sfw, 0)],
            previous: EdgeState::default(),
            next: EdgeState::default(),
            current_index: 1,
        };
        assert!(matches!(
            FeedProxy::from_snapshot(snapshot),
            Err(SnapshotError::IndexOutOfWindow { index: 1, len: 1 })
        ));
    }
}
