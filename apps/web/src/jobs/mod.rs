//! Job lookup service — turns a free-text query into the list of job postings.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::api::{ApiResponse, FetchClient, FetchError};

/// One job posting as returned by the search API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    #[serde(rename = "websiteTitle")]
    pub title: String,
    #[serde(rename = "websiteOrganization")]
    pub organization: String,
    #[serde(rename = "websiteLocation")]
    pub location: String,
    /// Free-form; usually ISO-8601 but not guaranteed.
    #[serde(rename = "websiteDatePublished")]
    pub date_published: String,
}

/// The `searches` member of the response envelope, passed through as received.
///
/// A malformed response is not normalised: `null` and a missing member stay
/// distinguishable so callers can tell them apart from an empty result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Searches {
    List(Vec<JobRecord>),
    Null,
    #[default]
    Missing,
}

impl Searches {
    /// The jobs, or an empty slice when the server sent no list.
    pub fn as_slice(&self) -> &[JobRecord] {
        match self {
            Searches::List(jobs) => jobs,
            Searches::Null | Searches::Missing => &[],
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Searches::List(_))
    }
}

impl From<Vec<JobRecord>> for Searches {
    fn from(jobs: Vec<JobRecord>) -> Self {
        Searches::List(jobs)
    }
}

impl<'de> Deserialize<'de> for Searches {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Vec<JobRecord>>::deserialize(deserializer)? {
            Some(jobs) => Searches::List(jobs),
            None => Searches::Null,
        })
    }
}

impl Serialize for Searches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Searches::List(jobs) => jobs.serialize(serializer),
            Searches::Null | Searches::Missing => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobEnvelope {
    #[serde(default)]
    pub searches: Searches,
}

/// Anything that can answer a job search. Carried as `Arc<dyn JobSource>`.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search_jobs(&self, query: Option<&str>) -> Result<Searches, FetchError>;
}

/// Job search backed by the HTTP API. Errors from the client propagate unchanged.
#[derive(Clone)]
pub struct JobService {
    client: FetchClient,
}

impl JobService {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn shared(client: FetchClient) -> Arc<dyn JobSource> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl JobSource for JobService {
    async fn search_jobs(&self, query: Option<&str>) -> Result<Searches, FetchError> {
        let pairs;
        let params = match query {
            Some(q) if !q.is_empty() => {
                pairs = [("q", q)];
                Some(&pairs[..])
            }
            _ => None,
        };

        let response: ApiResponse<JobEnvelope> = self.client.fetch_json("", params).await?;
        Ok(response.body.searches)
    }
}
