//! Message shapes exchanged over the push channel.
//!
//! Outbound messages ([`PushMessage`]) are internally tagged on a `type`
//! field so subscribers can dispatch without peeking at payload fields.
//! Inbound messages ([`ClientMessage`]) cover the two recognized client
//! requests plus an explicit fallback variant for anything else, which the
//! hub logs and ignores rather than closing the connection.

use serde::{Deserialize, Serialize};

use crate::domain::{Report, Stats};

/// A message pushed from the hub to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushMessage {
    /// Current counters. `reports` is populated only in the initial
    /// snapshot sent to a newly connected subscriber and omitted from
    /// periodic stats broadcasts.
    Stats {
        /// Number of live users.
        users_online: usize,
        /// Number of stored reports.
        total_reports: usize,
        /// Number of stored traffic samples.
        traffic_points: usize,
        /// Recent reports, present only in the initial snapshot.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reports: Option<Vec<Report>>,
    },
    /// A freshly created report together with the full recent list, so
    /// subscribers can redraw without a follow-up query.
    NewReport {
        /// The report that was just created.
        report: Report,
        /// All reports from the last 24 hours.
        reports: Vec<Report>,
    },
}

impl PushMessage {
    /// Build a periodic stats message (no report list).
    pub const fn stats(stats: Stats) -> Self {
        Self::Stats {
            users_online: stats.users_online,
            total_reports: stats.total_reports,
            traffic_points: stats.traffic_points,
            reports: None,
        }
    }

    /// Build the initial snapshot sent to a newly active subscriber.
    pub const fn snapshot(stats: Stats, reports: Vec<Report>) -> Self {
        Self::Stats {
            users_online: stats.users_online,
            total_reports: stats.total_reports,
            traffic_points: stats.traffic_points,
            reports: Some(reports),
        }
    }
}

/// A message received from a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Keep-alive; no reply payload is required.
    Ping,
    /// Explicit request for a fresh stats broadcast.
    RequestStats,
    /// Any unrecognized message type. Logged and ignored.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::enums::ReportKind;

    fn sample_report() -> Report {
        Report {
            id: 7,
            kind: ReportKind::Hazard,
            lat: 14.09,
            lng: -87.21,
            description: "debris on the road".to_owned(),
            user_id: 2,
            created_at: Utc::now(),
            votes: 1,
        }
    }

    #[test]
    fn stats_message_omits_empty_report_list() {
        let msg = PushMessage::stats(Stats {
            users_online: 3,
            total_reports: 5,
            traffic_points: 8,
        });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "stats");
        assert_eq!(json["users_online"], 3);
        assert!(json.get("reports").is_none());
    }

    #[test]
    fn snapshot_carries_reports() {
        let msg = PushMessage::snapshot(
            Stats {
                users_online: 1,
                total_reports: 1,
                traffic_points: 0,
            },
            vec![sample_report()],
        );
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["reports"][0]["id"], 7);
    }

    #[test]
    fn new_report_message_shape() {
        let report = sample_report();
        let msg = PushMessage::NewReport {
            report: report.clone(),
            reports: vec![report],
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "new_report");
        assert_eq!(json["report"]["type"], "hazard");
        assert_eq!(json["reports"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn client_messages_parse() {
        let ping: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(ping, ClientMessage::Ping);

        let stats: ClientMessage = serde_json::from_str(r#"{"type":"request_stats"}"#).unwrap();
        assert_eq!(stats, ClientMessage::RequestStats);
    }

    #[test]
    fn unknown_client_message_falls_back() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"subscribe_all"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Unknown);
    }
}
