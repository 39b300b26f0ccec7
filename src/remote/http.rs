//! HTTP implementation of [`ChatSource`].
//!
//! One unauthenticated `GET {base_url}{chat_path}?page={n}` per page. No
//! timeout and no retries: failures surface to the user, who decides
//! whether to try again.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::remote::{ChatPage, ChatSource, FetchError};

pub struct HttpChatSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpChatSource {
    pub fn new(base_url: &str, chat_path: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), chat_path);
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatSource for HttpChatSource {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    async fn fetch_page(&self, page: u32) -> Result<ChatPage, FetchError> {
        info!("GET {}?page={}", self.endpoint, page);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Chat endpoint status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat endpoint error: {} - {}", status.as_u16(), body);
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let page_data: ChatPage =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        debug!(
            "Page {} decoded: {} chats (trip {:?})",
            page,
            page_data.chats.len(),
            page_data.name
        );
        Ok(page_data)
    }
}
