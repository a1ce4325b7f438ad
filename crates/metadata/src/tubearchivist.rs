//! TubeArchivist API client.
//!
//! Only two endpoints are used: `/api/ping/` to confirm connectivity and
//! `/api/video/{id}/` to fetch channel and publish data for one video.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::provider::MetadataLookup;
use crate::{MetadataError, RemoteMetadata, parse_published};

pub struct TubeArchivistClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PingResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct VideoResponse {
    data: VideoData,
}

#[derive(Debug, Deserialize)]
struct VideoData {
    title: String,
    published: String,
    channel: ChannelData,
}

#[derive(Debug, Deserialize)]
struct ChannelData {
    channel_name: String,
    channel_id: String,
}

impl TubeArchivistClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(
        base_url: &str,
        token: &str,
        timeout: Duration,
    ) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataError::Provider(format!("build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, MetadataError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TubeArchivist request");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.token))
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TubeArchivist returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MetadataLookup for TubeArchivistClient {
    fn name(&self) -> &str {
        "tubearchivist"
    }

    async fn ping(&self) -> Result<(), MetadataError> {
        let pong: PingResponse = self.get_json("/api/ping/").await?;
        if pong.response != "pong" {
            return Err(MetadataError::Provider(format!(
                "unexpected ping response: {:?}",
                pong.response
            )));
        }
        Ok(())
    }

    async fn lookup(&self, video_id: &str) -> Result<RemoteMetadata, MetadataError> {
        let body: VideoResponse = self.get_json(&format!("/api/video/{video_id}/")).await?;
        parse_video(body)
    }
}

fn parse_video(body: VideoResponse) -> Result<RemoteMetadata, MetadataError> {
    let VideoData {
        title,
        published,
        channel,
    } = body.data;
    Ok(RemoteMetadata {
        channel_name: channel.channel_name,
        channel_id: channel.channel_id,
        title,
        published: parse_published(&published)?,
    })
}
