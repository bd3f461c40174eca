//! Hard-coded analytics display data for the admin dashboard. There is no
//! aggregation behind these numbers; they exist so the dashboard has
//! something to render and sit behind this module boundary so nothing else
//! mistakes them for measurements.

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicShare {
    pub label: &'static str,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Neutral,
    Frustrated,
    Urgent,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryLogEntry {
    pub id: &'static str,
    pub query: &'static str,
    pub topic: &'static str,
    pub timestamp: &'static str,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentSplit {
    pub positive_percent: u8,
    pub needs_help_percent: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    pub stats: Vec<StatCard>,
    pub topics: Vec<TopicShare>,
    pub sentiment: SentimentSplit,
    pub recent_queries: Vec<QueryLogEntry>,
}

static SNAPSHOT: Lazy<AnalyticsSnapshot> = Lazy::new(|| AnalyticsSnapshot {
    stats: vec![
        StatCard { label: "Total Interactions", value: "1,284", change: "+12%" },
        StatCard { label: "Knowledge Docs", value: "4", change: "0" },
        StatCard { label: "Avg. Response Time", value: "1.2s", change: "-0.1s" },
    ],
    topics: vec![
        TopicShare { label: "Citizenship & Immigration", percent: 45 },
        TopicShare { label: "Civil Rights & Police", percent: 30 },
        TopicShare { label: "Cyber Crime", percent: 15 },
        TopicShare { label: "Land Disputes", percent: 10 },
    ],
    sentiment: SentimentSplit {
        positive_percent: 88,
        needs_help_percent: 12,
    },
    recent_queries: vec![
        QueryLogEntry {
            id: "1",
            query: "How do I become a citizen?",
            topic: "Citizenship",
            timestamp: "10 mins ago",
            sentiment: Sentiment::Neutral,
        },
        QueryLogEntry {
            id: "2",
            query: "Can police arrest me without warrant?",
            topic: "Civil Rights",
            timestamp: "25 mins ago",
            sentiment: Sentiment::Urgent,
        },
        QueryLogEntry {
            id: "3",
            query: "What is the penalty for cyberbullying?",
            topic: "Cyber Crime",
            timestamp: "1 hour ago",
            sentiment: Sentiment::Neutral,
        },
        QueryLogEntry {
            id: "4",
            query: "Dual citizenship rules for USA/Sierra Leone",
            topic: "Citizenship",
            timestamp: "2 hours ago",
            sentiment: Sentiment::Neutral,
        },
        QueryLogEntry {
            id: "5",
            query: "My neighbor is insulting me loudly",
            topic: "Public Order",
            timestamp: "3 hours ago",
            sentiment: Sentiment::Frustrated,
        },
    ],
});

pub fn snapshot() -> &'static AnalyticsSnapshot {
    &SNAPSHOT
}
