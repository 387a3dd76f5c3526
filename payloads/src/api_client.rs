use crate::{
    CityId, HouseId, MediaId, OptionCategory, ProvinceId, RoomId,
    SeasonPrices, requests, responses,
};
use reqwest::{RequestBuilder, StatusCode, multipart};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for the house service.
///
/// Every request carries `Authorization: Bearer <token>` when a token is
/// set. Paths are relative to `address`.
pub struct APIClient {
    pub address: String,
    pub token: Option<SecretString>,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>, token: Option<String>) -> Self {
        Self {
            address: address.into(),
            token: token.map(SecretString::from),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));
        self.authorize(request).send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.put(self.format_url(path)).json(body);
        self.authorize(request).send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);
        self.authorize(request).send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));
        self.authorize(request).send().await
    }

    async fn post_multipart(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> ReqwestResult {
        let request =
            self.inner_client.post(self.format_url(path)).multipart(form);
        self.authorize(request).send().await
    }

    async fn put_multipart(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> ReqwestResult {
        let request =
            self.inner_client.put(self.format_url(path)).multipart(form);
        self.authorize(request).send().await
    }
}

/// Methods on the house service API
impl APIClient {
    /// Get the signed-in user. A 401 here means the session is gone.
    #[tracing::instrument(skip(self))]
    pub async fn get_profile(
        &self,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.get("client/profile").await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self, details))]
    pub async fn update_vendor_profile(
        &self,
        details: &requests::VendorProfile,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.put("client/profile/vendor", details).await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.delete("client/profile/logout").await?;
        ok_empty(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_house(
        &self,
        house_id: &HouseId,
    ) -> Result<responses::House, ClientError> {
        let response = self.get(&format!("client/house/{house_id}")).await?;
        ok_body(response).await
    }

    /// Partial update of the house root with a real `PUT`.
    #[tracing::instrument(skip(self, details))]
    pub async fn update_house(
        &self,
        house_id: &HouseId,
        details: &requests::HouseUpdate,
    ) -> Result<(), ClientError> {
        let response =
            self.put(&format!("client/house/{house_id}"), details).await?;
        ok_empty(response).await
    }

    /// Partial update of the house root sent as `POST` with `_method=PUT`.
    #[tracing::instrument(skip(self, details))]
    pub async fn override_house(
        &self,
        house_id: &HouseId,
        details: &requests::HouseUpdate,
    ) -> Result<(), ClientError> {
        let body = requests::MethodOverride::put(details);
        let response =
            self.post(&format!("client/house/{house_id}"), &body).await?;
        ok_empty(response).await
    }

    #[tracing::instrument(skip(self, details))]
    pub async fn update_facilities(
        &self,
        house_id: &HouseId,
        details: &requests::FacilitiesUpdate,
    ) -> Result<(), ClientError> {
        let response = self
            .put(&format!("client/house/{house_id}/facility"), details)
            .await?;
        ok_empty(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_rooms(
        &self,
        house_id: &HouseId,
    ) -> Result<Vec<responses::Room>, ClientError> {
        let response =
            self.get(&format!("client/house/{house_id}/room")).await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self, details))]
    pub async fn create_room(
        &self,
        house_id: &HouseId,
        details: &requests::RoomDetails,
    ) -> Result<responses::Room, ClientError> {
        let response = self
            .post(&format!("client/house/{house_id}/room"), details)
            .await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self, details))]
    pub async fn update_room(
        &self,
        house_id: &HouseId,
        room_id: &RoomId,
        details: &requests::RoomDetails,
    ) -> Result<responses::Room, ClientError> {
        let response = self
            .put(&format!("client/house/{house_id}/room/{room_id}"), details)
            .await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_room(
        &self,
        house_id: &HouseId,
        room_id: &RoomId,
    ) -> Result<(), ClientError> {
        let response = self
            .delete(&format!("client/house/{house_id}/room/{room_id}"))
            .await?;
        ok_empty(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_room_prices(
        &self,
        house_id: &HouseId,
        room_id: &RoomId,
    ) -> Result<SeasonPrices, ClientError> {
        let response = self
            .get(&format!("client/house/{house_id}/room/{room_id}/prices"))
            .await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self, details))]
    pub async fn update_room_prices(
        &self,
        house_id: &HouseId,
        room_id: &RoomId,
        details: &requests::PriceUpdate,
    ) -> Result<(), ClientError> {
        let response = self
            .put(
                &format!("client/house/{house_id}/room/{room_id}/prices"),
                details,
            )
            .await?;
        ok_empty(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_house_prices(
        &self,
        house_id: &HouseId,
    ) -> Result<SeasonPrices, ClientError> {
        let response =
            self.get(&format!("client/house/{house_id}/prices")).await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_media(
        &self,
        house_id: &HouseId,
    ) -> Result<Vec<responses::Media>, ClientError> {
        let response =
            self.get(&format!("client/house/{house_id}/media")).await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self, details))]
    pub async fn create_media(
        &self,
        house_id: &HouseId,
        details: &requests::MediaUpload,
    ) -> Result<responses::Media, ClientError> {
        let form = media_form(details)?;
        let response = self
            .post_multipart(&format!("client/house/{house_id}/media"), form)
            .await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self, details))]
    pub async fn update_media(
        &self,
        house_id: &HouseId,
        media_id: &MediaId,
        details: &requests::MediaUpload,
    ) -> Result<responses::Media, ClientError> {
        let form = media_form(details)?;
        let response = self
            .put_multipart(
                &format!("client/house/{house_id}/media/{media_id}"),
                form,
            )
            .await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_media(
        &self,
        house_id: &HouseId,
        media_id: &MediaId,
    ) -> Result<(), ClientError> {
        let response = self
            .delete(&format!("client/house/{house_id}/media/{media_id}"))
            .await?;
        ok_empty(response).await
    }

    /// Read-only lookup list for a category.
    #[tracing::instrument(skip(self))]
    pub async fn reference_options(
        &self,
        category: OptionCategory,
    ) -> Result<Vec<responses::ReferenceOption>, ClientError> {
        let response =
            self.get(&format!("assets/types/{category}/detail")).await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn provinces(
        &self,
    ) -> Result<Vec<responses::Province>, ClientError> {
        let response = self.get("assets/province").await?;
        ok_body(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn cities(
        &self,
        province_id: ProvinceId,
    ) -> Result<Vec<responses::City>, ClientError> {
        let response = self
            .get(&format!("assets/province/{province_id}/cities"))
            .await?;
        ok_body(response).await
    }
}

fn media_form(
    details: &requests::MediaUpload,
) -> Result<multipart::Form, ClientError> {
    let mut form = multipart::Form::new()
        .text("title", details.title.clone())
        .text("is_main", if details.is_main { "1" } else { "0" });
    if let Some(file) = &details.file {
        let part = multipart::Part::bytes(file.data.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)?;
        form = form.part("file", part);
    }
    Ok(form)
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the input; messages are keyed by field name.
    #[error("Some fields are invalid: {}", .0.flatten().join(", "))]
    Validation(responses::FieldErrors),
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Unexpected response from server.")]
    Decode(#[from] serde_json::Error),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    pub fn field_errors(&self) -> Option<&responses::FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Turn any response other than 200 into the matching ClientError.
async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }
    let text = response.text().await?;
    tracing::warn!(%status, "request failed");
    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::UNPROCESSABLE_ENTITY => {
            match serde_json::from_str::<responses::ValidationEnvelope>(&text)
            {
                Ok(envelope) => ClientError::Validation(envelope.into()),
                Err(_) => ClientError::APIError(status, text),
            }
        }
        _ => ClientError::APIError(status, text),
    })
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error. Only a 200 counts as success.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    check_status(response).await?;
    Ok(())
}
