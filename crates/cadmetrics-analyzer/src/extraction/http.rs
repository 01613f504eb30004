//! Blocking HTTP client for the drawing-processing service.

use std::time::Duration;

use cadmetrics_core::ExtractionError;
use reqwest::blocking::{multipart::Form, Client, Response};
use serde::Deserialize;
use tracing::{debug, info};

use super::{ExtractionRequest, ExtractionResponse, ExtractionSource, LayersResponse};

#[derive(Deserialize)]
struct ServiceErrorBody {
    detail: String,
}

/// Talks to `POST /cad/layers` and `POST /cad/process`.
#[derive(Debug, Clone)]
pub struct HttpExtractionClient {
    base_url: String,
    client: Client,
}

impl HttpExtractionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .user_agent(concat!("cadmetrics/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, route: &str, form: Form) -> Result<String, ExtractionError> {
        let url = format!("{}{}", self.base_url, route);
        debug!("POST {}", url);
        let resp = self.client.post(&url).multipart(form).send().map_err(transport)?;
        read_body(resp)
    }

    fn form(request: &ExtractionRequest, with_layers: bool) -> Result<Form, ExtractionError> {
        let form = Form::new().file("file", request.file()).map_err(|e| {
            ExtractionError::Transport {
                reason: format!("{}: {}", request.file().display(), e),
            }
        })?;
        Ok(if with_layers {
            form.text("layers", request.layers_json())
        } else {
            form
        })
    }
}

fn transport(err: reqwest::Error) -> ExtractionError {
    ExtractionError::Transport {
        reason: err.to_string(),
    }
}

fn read_body(resp: Response) -> Result<String, ExtractionError> {
    let status = resp.status();
    let body = resp.text().map_err(transport)?;
    if status.is_success() {
        return Ok(body);
    }
    let detail = serde_json::from_str::<ServiceErrorBody>(&body)
        .map(|b| b.detail)
        .unwrap_or(body);
    Err(ExtractionError::Service {
        status: status.as_u16(),
        detail,
    })
}

impl ExtractionSource for HttpExtractionClient {
    fn layers(&self, request: &ExtractionRequest) -> Result<Vec<String>, ExtractionError> {
        let body = self.post("/cad/layers", Self::form(request, false)?)?;
        let layers: LayersResponse = serde_json::from_str(&body)?;
        Ok(layers.layers)
    }

    fn process(&self, request: &ExtractionRequest) -> Result<ExtractionResponse, ExtractionError> {
        let body = self.post("/cad/process", Self::form(request, true)?)?;
        let response = ExtractionResponse::from_json(&body)?;
        info!(
            "Extracted {} polygon(s) from {}",
            response.polygons.len(),
            request.file().display()
        );
        Ok(response)
    }
}
