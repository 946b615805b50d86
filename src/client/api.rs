use fleet_schema::{
    CrewMember, CrewMemberDraft, ErrorBody, ListParams, MessageBody, Ship, ShipDraft, ShipList,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::ClientError;

/// Typed client for the fleet HTTP API.
#[derive(Debug, Clone)]
pub struct FleetClient {
    http: Client,
    base: Url,
}

impl FleetClient {
    pub fn new(base: Url) -> Result<Self, ClientError> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl);
        }
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and turns a non-2xx answer into [`ClientError::Api`].
    async fn send<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let bytes = resp.bytes().await?;
        debug!(status = status.as_u16(), "fleet API returned an error");
        Err(match serde_json::from_slice::<ErrorBody>(&bytes) {
            Ok(body) => ClientError::Api {
                status: status.as_u16(),
                code: body.inner.code,
                message: body.inner.message,
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                code: "HTTP_ERROR".to_string(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            },
        })
    }

    pub async fn list_ships(&self, params: &ListParams) -> Result<ShipList, ClientError> {
        let mut url = self.endpoint(&["ships"])?;
        let pairs = params.to_query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Self::send(self.http.get(url)).await
    }

    pub async fn get_ship(&self, id: i64) -> Result<Ship, ClientError> {
        let url = self.endpoint(&["ships", &id.to_string()])?;
        Self::send(self.http.get(url)).await
    }

    pub async fn add_ship(&self, ship: &ShipDraft) -> Result<MessageBody, ClientError> {
        let url = self.endpoint(&["ships"])?;
        Self::send(self.http.post(url).json(ship)).await
    }

    /// Creates every ship or none of them.
    pub async fn add_ships(&self, ships: &[ShipDraft]) -> Result<MessageBody, ClientError> {
        let url = self.endpoint(&["ships"])?;
        Self::send(self.http.post(url).query(&[("bulk", "on")]).json(ships)).await
    }

    pub async fn save_ship(&self, id: i64, ship: &ShipDraft) -> Result<MessageBody, ClientError> {
        let url = self.endpoint(&["ships", &id.to_string()])?;
        Self::send(self.http.put(url).json(ship)).await
    }

    pub async fn delete_ship(&self, id: i64) -> Result<MessageBody, ClientError> {
        let url = self.endpoint(&["ships", &id.to_string()])?;
        Self::send(self.http.delete(url)).await
    }

    pub async fn list_crew_members(&self, ship_id: i64) -> Result<Vec<CrewMember>, ClientError> {
        let url = self.endpoint(&["ships", &ship_id.to_string(), "crewmembers"])?;
        Self::send(self.http.get(url)).await
    }

    pub async fn get_crew_member(&self, ship_id: i64, id: i64) -> Result<CrewMember, ClientError> {
        let url = self.endpoint(&[
            "ships",
            &ship_id.to_string(),
            "crewmembers",
            &id.to_string(),
        ])?;
        Self::send(self.http.get(url)).await
    }

    pub async fn add_crew_member(
        &self,
        ship_id: i64,
        member: &CrewMemberDraft,
    ) -> Result<MessageBody, ClientError> {
        let url = self.endpoint(&["ships", &ship_id.to_string(), "crewmembers"])?;
        Self::send(self.http.post(url).json(member)).await
    }

    pub async fn save_crew_member(
        &self,
        ship_id: i64,
        id: i64,
        member: &CrewMemberDraft,
    ) -> Result<MessageBody, ClientError> {
        let url = self.endpoint(&[
            "ships",
            &ship_id.to_string(),
            "crewmembers",
            &id.to_string(),
        ])?;
        Self::send(self.http.put(url).json(member)).await
    }

    pub async fn delete_crew_member(
        &self,
        ship_id: i64,
        id: i64,
    ) -> Result<MessageBody, ClientError> {
        let url = self.endpoint(&[
            "ships",
            &ship_id.to_string(),
            "crewmembers",
            &id.to_string(),
        ])?;
        Self::send(self.http.delete(url)).await
    }

    /// Wipes the server's store.
    pub async fn sync(&self) -> Result<MessageBody, ClientError> {
        let url = self.endpoint(&["sync"])?;
        Self::send(self.http.get(url)).await
    }
}
