use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::classify::{classify, transport_error, Operation};
use crate::domain::gateways::{
    EventGateway, GatewayError, GatewayErrorKind, GatewayResult, LoginResponse, RegistrationGateway,
    ResultsVisibility, SessionGateway, User,
};
use crate::domain::participant::{Discipline, NewParticipant, ParticipantRecord};
use crate::domain::results::{Podium, Prize};
use crate::domain::team::{NewTeam, TeamDocument, TeamRecord, TeamUpdate};

/// reqwest implementation of the backend gateways
///
/// Cheap to clone; clones share the connection pool. A session token is
/// attached per instance through [`HttpBackend::authorized`] instead of
/// being read from global state.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpBackend {
    /// Creates a client whose every request gives up after `timeout`
    pub fn new(base_url: Url, timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Copy of this client that sends `Authorization: Bearer <token>`
    pub fn authorized(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::new(GatewayErrorKind::Transport, "backend url cannot take a path")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> GatewayResult<RequestBuilder> {
        let url = self.url(segments)?;
        debug!(%method, %url, "backend request");

        let builder = self.client.request(method, url);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder, operation: Operation) -> GatewayResult<Response> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify(operation, status, &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> GatewayResult<T> {
        let builder = self.request(Method::GET, segments)?;
        let response = self.send(builder, Operation::Other).await?;
        decode(response).await
    }

    async fn post_json(&self, segments: &[&str], body: serde_json::Value) -> GatewayResult<()> {
        let builder = self.request(Method::POST, segments)?.json(&body);
        self.send(builder, Operation::Other).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    response.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            transport_error(e)
        } else {
            GatewayError::new(GatewayErrorKind::InvalidResponse, e.to_string())
        }
    })
}

#[async_trait]
impl RegistrationGateway for HttpBackend {
    async fn create_team(&self, team: &NewTeam) -> GatewayResult<TeamRecord> {
        let builder = self.request(Method::POST, &["equipos"])?.json(team);
        let response = self.send(builder, Operation::CreateTeam).await?;
        decode(response).await
    }

    async fn register_participant(
        &self,
        team_id: &str,
        participant: &NewParticipant,
    ) -> GatewayResult<ParticipantRecord> {
        let builder = self
            .request(Method::POST, &["equipos", team_id, "participantes"])?
            .json(participant);
        let response = self.send(builder, Operation::RegisterParticipant).await?;
        decode(response).await
    }

    async fn delete_team(&self, team_id: &str) -> GatewayResult<()> {
        let builder = self.request(Method::DELETE, &["equipos", team_id])?;
        self.send(builder, Operation::Other).await?;
        Ok(())
    }

    async fn upload_team_document(&self, team_id: &str, document: &TeamDocument) -> GatewayResult<()> {
        let part = Part::bytes(document.bytes().to_vec())
            .file_name(document.file_name().to_string())
            .mime_str(document.content_type())
            .map_err(|e| GatewayError::new(GatewayErrorKind::Rejected, e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("equipo_id", team_id.to_string());

        let builder = self
            .request(Method::POST, &["archivos", "upload-file-pdf"])?
            .multipart(form);
        self.send(builder, Operation::Other).await?;
        Ok(())
    }
}

#[async_trait]
impl EventGateway for HttpBackend {
    async fn list_teams(&self) -> GatewayResult<Vec<TeamRecord>> {
        self.fetch(&["equipos"]).await
    }

    async fn team(&self, team_id: &str) -> GatewayResult<TeamRecord> {
        self.fetch(&["equipos", team_id]).await
    }

    async fn update_team(&self, team_id: &str, update: &TeamUpdate) -> GatewayResult<TeamRecord> {
        let builder = self.request(Method::PUT, &["equipos", team_id])?.json(update);
        let response = self.send(builder, Operation::UpdateTeam).await?;
        decode(response).await
    }

    async fn team_participants(&self, team_id: &str) -> GatewayResult<Vec<ParticipantRecord>> {
        self.fetch(&["equipos", team_id, "participantes"]).await
    }

    async fn list_participants(&self) -> GatewayResult<Vec<ParticipantRecord>> {
        self.fetch(&["participantes"]).await
    }

    async fn discipline_results(&self, discipline: Discipline) -> GatewayResult<Vec<ParticipantRecord>> {
        self.fetch(&["resultados", "disciplina", discipline.as_str()]).await
    }

    async fn results_visibility(&self) -> GatewayResult<ResultsVisibility> {
        self.fetch(&["resultados", "visibilidad"]).await
    }

    async fn set_results_visibility(&self, visible: bool) -> GatewayResult<ResultsVisibility> {
        let builder = self
            .request(Method::PUT, &["resultados", "visibilidad"])?
            .json(&ResultsVisibility {
                resultados_visibles: visible,
            });
        let response = self.send(builder, Operation::Other).await?;
        decode(response).await
    }

    async fn delete_team(&self, team_id: &str) -> GatewayResult<()> {
        RegistrationGateway::delete_team(self, team_id).await
    }

    async fn update_participant_time(
        &self,
        team_id: &str,
        participant_id: &str,
        time: &str,
    ) -> GatewayResult<()> {
        let builder = self
            .request(Method::PUT, &["equipos", team_id, "participantes", participant_id])?
            .json(&json!({ "tiempo": time }));
        self.send(builder, Operation::Other).await?;
        Ok(())
    }

    async fn recalculate_team_time(&self, team_id: &str) -> GatewayResult<()> {
        self.post_json(&["resultados", "calcular-tiempo"], json!({ "equipo_id": team_id }))
            .await
    }

    async fn update_positions(&self) -> GatewayResult<()> {
        self.post_json(&["resultados", "actualizar-posiciones"], json!({}))
            .await
    }

    async fn apply_penalty(&self, participant_id: &str, discipline: Discipline) -> GatewayResult<()> {
        self.post_json(
            &["resultados", "penalizacion"],
            json!({ "participante_id": participant_id, "disciplina": discipline }),
        )
        .await
    }

    async fn set_special_prize(&self, participant_id: &str) -> GatewayResult<()> {
        self.post_json(
            &["resultados", "premio-especial"],
            json!({ "participante_id": participant_id }),
        )
        .await
    }

    async fn podium(&self) -> GatewayResult<Podium> {
        self.fetch(&["resultados", "podio"]).await
    }

    async fn prizes(&self) -> GatewayResult<Vec<Prize>> {
        self.fetch(&["premios"]).await
    }

    async fn calculate_prizes(&self) -> GatewayResult<Vec<Prize>> {
        let builder = self
            .request(Method::POST, &["resultados", "calcular-premios"])?
            .json(&json!({}));
        let response = self.send(builder, Operation::Other).await?;
        decode(response).await
    }
}

#[async_trait]
impl SessionGateway for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> GatewayResult<LoginResponse> {
        let builder = self
            .request(Method::POST, &["auth", "login"])?
            .json(&json!({ "email": email, "password": password }));
        let response = self.send(builder, Operation::Other).await?;
        decode(response).await
    }

    async fn current_user(&self, token: &str) -> GatewayResult<User> {
        self.authorized(token).fetch(&["auth", "me"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn url_joins_segments_under_base_path() {
        let url = backend("http://localhost:4000/api/").url(&["equipos", "t1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/equipos/t1");
    }

    #[test]
    fn url_without_trailing_slash() {
        let url = backend("http://localhost:4000/api").url(&["equipos"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/equipos");
    }

    #[test]
    fn url_escapes_ids() {
        let url = backend("http://localhost:4000").url(&["equipos", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/equipos/a%2Fb%20c");
    }

    #[test]
    fn authorized_keeps_base_and_sets_token() {
        let base = backend("http://localhost:4000");
        let authed = base.authorized("tok");

        assert_eq!(authed.token.as_deref(), Some("tok"));
        assert!(base.token.is_none());
        assert_eq!(authed.base_url(), base.base_url());
    }
}
